// Route table for the dashboard
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    create_panel, dashboard_overview, delete_panel, export_panels, get_panel, health_check,
    import_panels, list_icons, list_panels, new_draft, reset_panels, update_panel,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(dashboard_overview))
        .route("/panels", get(list_panels).post(create_panel))
        .route(
            "/panels/:id",
            get(get_panel).put(update_panel).delete(delete_panel),
        )
        .route("/drafts/new", get(new_draft))
        .route("/export", get(export_panels))
        .route("/import", post(import_panels))
        .route("/reset", post(reset_panels))
        .route("/icons", get(list_icons))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
