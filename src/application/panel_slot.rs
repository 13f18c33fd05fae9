// Persistence adapter - the single named slot holding the whole collection
use crate::application::storage::{KeyValueStore, StorageError};
use crate::domain::panel::Panel;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlotError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("stored collection under {key} is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone)]
pub struct PanelSlot {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl PanelSlot {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the collection; `None` when the slot was never written.
    pub fn load(&self) -> Result<Option<Vec<Panel>>, SlotError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };

        let panels = serde_json::from_str(&raw).map_err(|source| SlotError::Corrupt {
            key: self.key.clone(),
            source,
        })?;
        Ok(Some(panels))
    }

    pub fn save(&self, panels: &[Panel]) -> Result<(), SlotError> {
        let raw = serde_json::to_string(panels).map_err(|source| SlotError::Corrupt {
            key: self.key.clone(),
            source,
        })?;
        self.store.set(&self.key, &raw)?;
        tracing::debug!(
            key = %self.key,
            panels = panels.len(),
            bytes = raw.len(),
            "collection persisted"
        );
        Ok(())
    }
}
