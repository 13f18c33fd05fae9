// File-backed key-value store, one JSON file per key
use crate::application::storage::{KeyValueStore, StorageError};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are slot names; keep them from escaping the data directory.
        let file: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", file))
    }

    fn io_error(key: &str, source: std::io::Error) -> StorageError {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    /// Write and fsync a sibling temp file, then rename it over the slot so
    /// neither readers nor a crash can leave a partial collection behind.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| Self::io_error(key, e))?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        write_synced(&tmp, value).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            Self::io_error(key, e)
        })?;
        fs::rename(&tmp, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            Self::io_error(key, e)
        })
    }
}

fn write_synced(path: &Path, value: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.get("coal-dashboard-panels").unwrap().is_none());
    }

    #[test]
    fn test_set_creates_dir_and_replaces_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        store.set("coal-dashboard-panels", "[]").unwrap();
        store.set("coal-dashboard-panels", "[1]").unwrap();

        assert_eq!(store.get("coal-dashboard-panels").unwrap().as_deref(), Some("[1]"));
        assert!(dir.path().join("nested/coal-dashboard-panels.json").exists());
        assert!(!dir.path().join("nested/coal-dashboard-panels.json.tmp").exists());
    }

    #[test]
    fn test_synced_write_replaces_stale_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        fs::write(dir.path().join("panels.json.tmp"), "[half").unwrap();

        store.set("panels", "[1,2]").unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("panels.json")).unwrap(), "[1,2]");
        assert!(!dir.path().join("panels.json.tmp").exists());
    }

    #[test]
    fn test_key_cannot_escape_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("../outside", "x").unwrap();

        assert!(dir.path().join("___outside.json").exists());
    }
}
