// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use coal_dashboard::application::dashboard_service::DashboardService;
use coal_dashboard::application::id_allocator::IdAllocator;
use coal_dashboard::application::panel_slot::PanelSlot;
use coal_dashboard::application::panel_store::PanelStore;
use coal_dashboard::application::storage::KeyValueStore;
use coal_dashboard::domain::defaults::default_collection;
use coal_dashboard::infrastructure::config::{load_dashboard_config, StorageBackend};
use coal_dashboard::infrastructure::file_store::FileStore;
use coal_dashboard::infrastructure::memory_store::MemoryStore;
use coal_dashboard::presentation::app_state::AppState;
use coal_dashboard::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = load_dashboard_config()?;

    // Initialize tracing, RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Create storage (infrastructure layer)
    let backend: Arc<dyn KeyValueStore> = match config.storage.backend {
        StorageBackend::File => Arc::new(FileStore::new(&config.storage.dir)),
        StorageBackend::Memory => Arc::new(MemoryStore::with_quota(config.storage.quota)),
    };
    tracing::info!(
        backend = ?config.storage.backend,
        dir = %config.storage.dir,
        key = %config.storage.key,
        "storage configured"
    );

    // Create store and services (application layer)
    let ids = Arc::new(IdAllocator::system());
    let slot = PanelSlot::new(backend, config.storage.key.clone());
    let store = PanelStore::open(slot, ids.clone(), default_collection());
    let dashboard_service = DashboardService::new(store, ids, config.export.file_prefix.clone());

    let mut changes = dashboard_service.subscribe().await;
    tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            let panels = changes.borrow_and_update().len();
            tracing::info!(panels, "dashboard collection changed");
        }
    });

    // Build router (presentation layer)
    let state = Arc::new(AppState { dashboard_service });
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Starting coal-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
