// Dashboard service - Use cases behind the UI actions
use crate::application::id_allocator::IdAllocator;
use crate::application::panel_form::{FormError, PanelForm};
use crate::application::panel_store::{PanelError, PanelStore};
use crate::domain::panel::{ChartPanel, MetricCard, Panel, PanelPayload, PanelType};
use crate::infrastructure::json_codec::{self, ImportError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{watch, Mutex};

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Panel(#[from] PanelError),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error("failed to encode export: {0}")]
    Export(#[source] serde_json::Error),
}

/// The two render groups plus header state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub metrics: Vec<MetricCard>,
    pub charts: Vec<ChartPanel>,
    pub is_empty: bool,
    pub last_modified: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

/// Every action takes the store lock for its whole duration, so actions
/// never interleave.
#[derive(Clone)]
pub struct DashboardService {
    store: Arc<Mutex<PanelStore>>,
    ids: Arc<IdAllocator>,
    export_prefix: String,
}

impl DashboardService {
    pub fn new(store: PanelStore, ids: Arc<IdAllocator>, export_prefix: String) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            ids,
            export_prefix,
        }
    }

    pub async fn list(&self) -> Vec<Panel> {
        self.store.lock().await.list().to_vec()
    }

    pub async fn overview(&self) -> DashboardOverview {
        let store = self.store.lock().await;
        DashboardOverview {
            metrics: store.metrics().into_iter().cloned().collect(),
            charts: store.charts().into_iter().cloned().collect(),
            is_empty: store.is_empty(),
            last_modified: store.last_modified(),
        }
    }

    pub async fn subscribe(&self) -> watch::Receiver<Vec<Panel>> {
        self.store.lock().await.subscribe()
    }

    pub async fn get(&self, id: &str) -> Result<Panel, DashboardError> {
        let store = self.store.lock().await;
        store
            .get(id)
            .cloned()
            .ok_or_else(|| PanelError::NotFound(id.to_string()).into())
    }

    /// Blank draft for the "add panel" form, id already allocated.
    pub fn new_draft(&self, kind: PanelType) -> PanelPayload {
        PanelForm::begin(None, kind, &self.ids).payload()
    }

    pub async fn create(
        &self,
        kind: PanelType,
        data: serde_json::Value,
    ) -> Result<Panel, DashboardError> {
        let mut form = PanelForm::begin(None, kind, &self.ids);
        form.fill(kind, data)?;

        let panel = self.store.lock().await.save(form.commit())?;
        tracing::info!(id = %panel.id, kind = panel.kind().as_str(), "panel added");
        Ok(panel)
    }

    pub async fn update(
        &self,
        id: &str,
        kind: PanelType,
        data: serde_json::Value,
    ) -> Result<Panel, DashboardError> {
        let mut store = self.store.lock().await;
        let existing = store
            .get(id)
            .ok_or_else(|| PanelError::NotFound(id.to_string()))?;

        let mut form = PanelForm::begin(Some(existing), kind, &self.ids);
        form.fill(kind, data)?;

        let panel = store.save(form.commit())?;
        tracing::info!(id = %panel.id, kind = panel.kind().as_str(), "panel edited");
        Ok(panel)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, DashboardError> {
        let removed = self.store.lock().await.delete(id)?;
        tracing::info!(id = %id, removed, "panel delete requested");
        Ok(removed)
    }

    pub async fn export(&self) -> Result<ExportFile, DashboardError> {
        let store = self.store.lock().await;
        let contents = json_codec::export(store.list()).map_err(DashboardError::Export)?;
        let file_name = json_codec::export_file_name(&self.export_prefix, Utc::now().date_naive());
        tracing::info!(file = %file_name, panels = store.list().len(), "collection exported");
        Ok(ExportFile { file_name, contents })
    }

    /// Replace the collection with an imported file. On any error the current
    /// collection is left as it was.
    pub async fn import(&self, bytes: &[u8]) -> Result<usize, DashboardError> {
        let panels = json_codec::decode_utf8(bytes)
            .and_then(json_codec::import)
            .inspect_err(|e| tracing::warn!(error = %e, "import rejected"))?;

        let count = panels.len();
        self.store.lock().await.replace_all(panels)?;
        tracing::info!(panels = count, "collection imported");
        Ok(count)
    }

    pub async fn reset(&self) -> Result<(), DashboardError> {
        self.store.lock().await.reset()?;
        tracing::info!("collection reset to defaults");
        Ok(())
    }
}
