use placepicker::app_config::AppConfig;
use placepicker::catalog::load_catalog_from;
use placepicker::domain::events::Event;
use placepicker::position::FixedPositionProvider;
use placepicker::selection_controller::SelectionController;
use placepicker::snapshot_listener::snapshot_listener;
use placepicker::storage::{FileKeyValueStore, PersistentSelectionStore};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::{signal, task};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!("✅  Loaded configuration");

    let catalog = Arc::new(load_catalog_from(config.catalog().path()).await?);

    let kv = Arc::new(FileKeyValueStore::new(config.storage().directory()));
    let store = PersistentSelectionStore::new(kv, config.storage().key());

    // The presentation layer sends user actions through `tx`
    let (tx, rx) = mpsc::channel::<Event>(config.core().event_buffer_size());
    let mut controller = SelectionController::new(catalog, store, rx);
    let notifier_rx = controller.notifier();

    task::spawn(async move {
        snapshot_listener(notifier_rx).await;
    });
    info!("✅  Initialized snapshot listener");

    let position_provider = Arc::new(FixedPositionProvider::new(config.location()));
    controller.initialize(position_provider).await;
    info!("✅  Initialized selection controller");

    let controller_task = task::spawn(async move {
        controller.listen().await;
    });

    info!("🔥 {} is up and running", env!("CARGO_PKG_NAME"));

    signal::ctrl_c().await?;
    info!("👋 Shutting down");
    drop(tx);
    controller_task.await?;

    Ok(())
}
