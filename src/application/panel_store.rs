// Panel store - the single source of truth for the dashboard collection
use crate::application::id_allocator::IdAllocator;
use crate::application::panel_form::Commit;
use crate::application::panel_slot::{PanelSlot, SlotError};
use crate::domain::panel::{ChartPanel, MetricCard, Panel, PanelPayload};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("panel not found: {0}")]
    NotFound(String),
    #[error("duplicate panel id: {0}")]
    DuplicateId(String),
    /// The in-memory collection already holds the change; only the durable
    /// copy is stale.
    #[error("failed to persist collection: {0}")]
    Storage(#[from] SlotError),
}

pub struct PanelStore {
    panels: Vec<Panel>,
    defaults: Vec<Panel>,
    slot: PanelSlot,
    ids: Arc<IdAllocator>,
    last_modified: DateTime<Utc>,
    changes: watch::Sender<Vec<Panel>>,
}

impl PanelStore {
    /// Load the collection from `slot`, falling back to `defaults` when the
    /// slot is empty or unreadable. Nothing is written until the first mutation.
    pub fn open(slot: PanelSlot, ids: Arc<IdAllocator>, defaults: Vec<Panel>) -> Self {
        let panels = match slot.load() {
            Ok(Some(panels)) => match duplicate_id(&panels) {
                None => {
                    tracing::info!(
                        key = slot.key(),
                        panels = panels.len(),
                        "loaded stored collection"
                    );
                    panels
                }
                Some(dup) => {
                    tracing::warn!(
                        key = slot.key(),
                        id = %dup,
                        "stored collection has duplicate ids, using defaults"
                    );
                    defaults.clone()
                }
            },
            Ok(None) => {
                tracing::info!(key = slot.key(), "no stored collection, using defaults");
                defaults.clone()
            }
            Err(e) => {
                tracing::warn!(
                    key = slot.key(),
                    error = %e,
                    "stored collection unreadable, using defaults"
                );
                defaults.clone()
            }
        };

        let (changes, _) = watch::channel(panels.clone());
        Self {
            panels,
            defaults,
            slot,
            ids,
            last_modified: Utc::now(),
            changes,
        }
    }

    pub fn list(&self) -> &[Panel] {
        &self.panels
    }

    pub fn get(&self, id: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn metrics(&self) -> Vec<&MetricCard> {
        self.panels.iter().filter_map(Panel::as_metric).collect()
    }

    pub fn charts(&self) -> Vec<&ChartPanel> {
        self.panels.iter().filter_map(Panel::as_chart).collect()
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// Receiver that sees the full collection after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Panel>> {
        self.changes.subscribe()
    }

    pub fn create(&mut self, payload: PanelPayload) -> Result<Panel, PanelError> {
        let id = self.ids.next_unique(|candidate| self.get(candidate).is_some());
        let panel = Panel::new(id, payload);
        self.panels.push(panel.clone());
        tracing::debug!(id = %panel.id, kind = panel.kind().as_str(), "panel created");

        self.commit_change()?;
        Ok(panel)
    }

    /// Replace the payload of `id` in place; position and identity are kept.
    pub fn update(&mut self, id: &str, payload: PanelPayload) -> Result<Panel, PanelError> {
        let Some(entry) = self.panels.iter_mut().find(|p| p.id == id) else {
            return Err(PanelError::NotFound(id.to_string()));
        };
        *entry = Panel::new(id.to_string(), payload);
        let panel = entry.clone();
        tracing::debug!(id = %panel.id, kind = panel.kind().as_str(), "panel updated");

        self.commit_change()?;
        Ok(panel)
    }

    /// Remove `id` if present. The collection is written back either way.
    pub fn delete(&mut self, id: &str) -> Result<bool, PanelError> {
        let before = self.panels.len();
        self.panels.retain(|p| p.id != id);
        let removed = self.panels.len() != before;
        tracing::debug!(id = %id, removed, "panel delete");

        self.commit_change()?;
        Ok(removed)
    }

    pub fn replace_all(&mut self, panels: Vec<Panel>) -> Result<(), PanelError> {
        if let Some(dup) = duplicate_id(&panels) {
            return Err(PanelError::DuplicateId(dup.to_string()));
        }

        self.panels = panels
            .into_iter()
            .map(|p| Panel::new(p.id, p.payload))
            .collect();
        tracing::debug!(panels = self.panels.len(), "collection replaced");

        self.commit_change()
    }

    pub fn reset(&mut self) -> Result<(), PanelError> {
        self.replace_all(self.defaults.clone())
    }

    /// Route a committed form to create or update.
    pub fn save(&mut self, commit: Commit) -> Result<Panel, PanelError> {
        match commit.target {
            Some(id) => self.update(&id, commit.payload),
            None => self.create(commit.payload),
        }
    }

    fn commit_change(&mut self) -> Result<(), PanelError> {
        self.last_modified = Utc::now();
        self.changes.send_replace(self.panels.clone());

        self.slot.save(&self.panels).map_err(|e| {
            tracing::error!(
                key = self.slot.key(),
                error = %e,
                "collection write failed, in-memory state kept"
            );
            PanelError::Storage(e)
        })
    }
}

/// First id that occurs more than once, in collection order.
fn duplicate_id(panels: &[Panel]) -> Option<&str> {
    let mut seen = HashSet::new();
    panels
        .iter()
        .map(|p| p.id.as_str())
        .find(|id| !seen.insert(*id))
}
