// HTTP request handlers - the dashboard's UI action surface
use crate::application::dashboard_service::DashboardError;
use crate::application::panel_store::PanelError;
use crate::domain::icon::Icon;
use crate::domain::panel::PanelType;
use crate::presentation::app_state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Body of create and edit requests: `{"type": "metric" | "chart", "data": {...}}`.
#[derive(Deserialize)]
pub struct PanelInput {
    #[serde(rename = "type")]
    pub kind: PanelType,
    pub data: serde_json::Value,
}

#[derive(Deserialize)]
pub struct DraftQuery {
    #[serde(rename = "type")]
    pub kind: Option<PanelType>,
}

#[derive(Serialize)]
pub struct IconEntry {
    pub name: &'static str,
    pub label: &'static str,
}

/// Every failure leaves as `{"error": message}` with a matching status.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        let status = match &err {
            DashboardError::Panel(PanelError::NotFound(_)) => StatusCode::NOT_FOUND,
            DashboardError::Panel(PanelError::DuplicateId(_)) => StatusCode::BAD_REQUEST,
            DashboardError::Panel(PanelError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Form(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DashboardError::Import(_) => StatusCode::BAD_REQUEST,
            DashboardError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %err, "request failed");
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn list_panels(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.dashboard_service.list().await)
}

/// Metric and chart groups for the grid, plus the "last update" header line
pub async fn dashboard_overview(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.dashboard_service.overview().await)
}

pub async fn get_panel(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.dashboard_service.get(&id).await?))
}

pub async fn new_draft(
    Query(query): Query<DraftQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let kind = query.kind.unwrap_or(PanelType::Metric);
    Json(json!({
        "type": kind,
        "data": state.dashboard_service.new_draft(kind),
    }))
}

pub async fn create_panel(
    State(state): State<Arc<AppState>>,
    input: Result<Json<PanelInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = input?;
    let panel = state.dashboard_service.create(input.kind, input.data).await?;
    Ok((StatusCode::CREATED, Json(panel)))
}

pub async fn update_panel(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    input: Result<Json<PanelInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = input?;
    let panel = state.dashboard_service.update(&id, input.kind, input.data).await?;
    Ok(Json(panel))
}

pub async fn delete_panel(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = state.dashboard_service.delete(&id).await?;
    Ok(Json(json!({ "removed": removed })))
}

/// Download the collection as `<prefix>-YYYY-MM-DD.json`
pub async fn export_panels(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let file = state.dashboard_service.export().await?;
    let headers = [
        (header::CONTENT_TYPE, "application/json; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.file_name),
        ),
    ];
    Ok((headers, file.contents))
}

/// Replace the collection with the uploaded file's contents
pub async fn import_panels(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let imported = state.dashboard_service.import(&body).await?;
    Ok(Json(json!({ "imported": imported })))
}

pub async fn reset_panels(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    state.dashboard_service.reset().await?;
    Ok(Json(state.dashboard_service.list().await))
}

pub async fn list_icons() -> impl IntoResponse {
    let icons: Vec<IconEntry> = Icon::all()
        .iter()
        .map(|icon| IconEntry {
            name: icon.name(),
            label: icon.label(),
        })
        .collect();
    Json(icons)
}
