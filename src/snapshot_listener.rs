use crate::domain::Place;
use crate::selection_controller::{RemovalDialog, SelectionSnapshot};
use std::sync::Arc;
use tokio::sync::watch::Receiver;
use tracing::{info, instrument};

#[instrument(skip_all)]
pub async fn snapshot_listener(mut rx: Receiver<SelectionSnapshot>) {
    while rx.changed().await.is_ok() {
        let snapshot = rx.borrow_and_update().clone();
        info!("🖼️ {}", describe(&snapshot));
    }
}

fn describe(snapshot: &SelectionSnapshot) -> String {
    let available = match &snapshot.available {
        Some(places) => titles(places),
        None => "sorting places by distance...".to_string(),
    };
    let removal = match &snapshot.removal {
        RemovalDialog::Closed => "closed".to_string(),
        RemovalDialog::Open { place_id } => format!("confirm removal of '{}'", place_id),
    };

    format!("picked: {} | available: {} | dialog: {}", titles(&snapshot.picked), available, removal)
}

fn titles(places: &[Arc<Place>]) -> String {
    if places.is_empty() {
        return "none".to_string();
    }
    places.iter().map(|place| place.title.as_str()).collect::<Vec<_>>().join(", ")
}
