use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub export: ExportSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    File,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub dir: String,
    pub key: String,
    /// Byte limit per stored value, memory backend only.
    pub quota: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportSettings {
    pub file_prefix: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub filter: String,
}

fn builder() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(config::Config::builder()
        .set_default("server.bind", "127.0.0.1:8080")?
        .set_default("storage.backend", "file")?
        .set_default("storage.dir", "data")?
        .set_default("storage.key", "coal-dashboard-panels")?
        .set_default("export.file_prefix", "coal-dashboard")?
        .set_default("log.filter", "info")?)
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = builder()?
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: DashboardConfig = builder()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.key, "coal-dashboard-panels");
        assert_eq!(config.storage.quota, None);
        assert_eq!(config.export.file_prefix, "coal-dashboard");
    }

    #[test]
    fn test_toml_overrides() {
        let toml = r#"
            [storage]
            backend = "memory"
            quota = 5000000

            [export]
            file_prefix = "mines"
        "#;
        let config: DashboardConfig = builder()
            .unwrap()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.quota, Some(5_000_000));
        assert_eq!(config.export.file_prefix, "mines");
        assert_eq!(config.storage.dir, "data");
    }
}
