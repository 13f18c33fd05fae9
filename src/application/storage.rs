// Key-value storage port for the persisted panel collection
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("storage rejected write for key {key}: {reason}")]
    Rejected { key: String, reason: String },
}

/// Synchronous string slots addressed by key.
///
/// `set` replaces the whole value or fails leaving the previous one intact.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
