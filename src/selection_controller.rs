use crate::catalog::Catalog;
use crate::domain::events::Event;
use crate::domain::{Coordinate, Place};
use crate::position::{PositionError, PositionProvider};
use crate::ranking::rank;
use crate::storage::PersistentSelectionStore;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc::Receiver;
use tokio::sync::oneshot;
use tokio::sync::watch::{self, Receiver as WatchReceiver, Sender as WatchSender};
use tokio::task;
use tracing::{debug, error, info, instrument, warn};

pub type PositionResult = Result<Coordinate, PositionError>;

/// The confirmation step in front of removing a picked place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RemovalDialog {
    #[default]
    Closed,
    Open {
        place_id: String,
    },
}

impl RemovalDialog {
    pub fn is_open(&self) -> bool {
        matches!(self, RemovalDialog::Open { .. })
    }

    pub fn pending_place_id(&self) -> Option<&str> {
        match self {
            RemovalDialog::Open { place_id } => Some(place_id.as_str()),
            RemovalDialog::Closed => None,
        }
    }
}

/// What the presentation layer renders. `available` is `None` while the position is unknown.
#[derive(Clone, Debug, Default)]
pub struct SelectionSnapshot {
    pub available: Option<Vec<Arc<Place>>>,
    pub picked: Vec<Arc<Place>>,
    pub removal: RemovalDialog,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("unknown place '{0}'")]
    UnknownPlace(String),
    #[error("place '{0}' is not picked")]
    NotPicked(String),
}

#[derive(Debug)]
pub struct SelectionController {
    catalog: Arc<Catalog>,
    store: PersistentSelectionStore,
    rx: Receiver<Event>,
    available: Option<Vec<Arc<Place>>>,
    picked: Vec<Arc<Place>>,
    removal: RemovalDialog,
    position_rx: Option<oneshot::Receiver<PositionResult>>,
    notifier_tx: WatchSender<SelectionSnapshot>,
    notifier_rx: WatchReceiver<SelectionSnapshot>,
}

impl SelectionController {
    pub fn new(catalog: Arc<Catalog>, store: PersistentSelectionStore, rx: Receiver<Event>) -> Self {
        let (notifier_tx, notifier_rx) = watch::channel(SelectionSnapshot::default());

        SelectionController {
            catalog,
            store,
            rx,
            available: None,
            picked: Vec::new(),
            removal: RemovalDialog::Closed,
            position_rx: None,
            notifier_tx,
            notifier_rx,
        }
    }

    pub fn notifier(&self) -> WatchReceiver<SelectionSnapshot> {
        self.notifier_rx.clone()
    }

    /// Asks for the position once and restores the picked places from storage.
    ///
    /// The position request runs on its own task. Its result is applied by [`listen`](Self::listen) or
    /// [`await_position`](Self::await_position); until then the available places stay unknown.
    #[instrument(skip_all)]
    pub async fn initialize(&mut self, position_provider: Arc<dyn PositionProvider>) {
        let (position_tx, position_rx) = oneshot::channel();
        task::spawn(async move {
            let position = position_provider.current_position().await;
            if position_tx.send(position).is_err() {
                debug!("🧭 Position arrived after the controller stopped");
            }
        });
        self.position_rx = Some(position_rx);
        self.available = None;
        self.removal = RemovalDialog::Closed;

        debug!("📌 Restoring picked places...");
        let stored_ids = self.store.load().await;
        self.picked = stored_ids
            .iter()
            .filter_map(|id| {
                let place = self.catalog.by_id(id);
                if place.is_none() {
                    debug!(place_id = id.as_str(), "📌 Dropping stored place that is no longer in the catalog");
                }
                place
            })
            .collect();

        if self.picked.len() != stored_ids.len() {
            self.persist(self.picked_ids()).await;
        }

        info!("📌 Restoring picked places... OK, {} restored", self.picked.len());
        self.publish();
    }

    /// Handles events and the position result one at a time until the event channel closes.
    #[instrument(skip_all)]
    pub async fn listen(&mut self) {
        loop {
            tokio::select! {
                position = next_position(&mut self.position_rx) => {
                    self.position_rx = None;
                    self.apply_position(position);
                }
                event = self.rx.recv() => {
                    let Some(event) = event else {
                        debug!("🔵 Event channel closed");
                        break;
                    };
                    self.handle(event).await;
                }
            }
        }
    }

    /// Waits for a pending position request and applies its result. Returns immediately when none is pending.
    pub async fn await_position(&mut self) {
        if self.position_rx.is_some() {
            let position = next_position(&mut self.position_rx).await;
            self.position_rx = None;
            self.apply_position(position);
        }
    }

    async fn handle(&mut self, event: Event) {
        debug!("🔵 Received event: {:?}", event);
        let result = match event {
            Event::SelectPlace { place_id } => self.select_place(&place_id).await,
            Event::RequestRemoval { place_id } => self.request_removal(&place_id),
            Event::CancelRemoval => {
                self.cancel_removal();
                Ok(())
            }
            Event::ConfirmRemoval => {
                self.confirm_removal().await;
                Ok(())
            }
        };

        if let Err(e) = result {
            error!("❌ Rejected event: {}", e);
        }
    }

    fn apply_position(&mut self, position: PositionResult) {
        match position {
            Ok(position) => {
                self.available = Some(rank(self.catalog.places(), &position));
                info!(
                    latitude = position.latitude,
                    longitude = position.longitude,
                    "🧭 Sorted {} place(s) by distance",
                    self.catalog.len()
                );
                self.publish();
            }
            Err(e) => warn!("⚠️ No position, available places stay unsorted: {}", e),
        }
    }

    /// Adds the place in front of the picked places. Picking a place twice changes nothing.
    #[instrument(skip(self))]
    pub async fn select_place(&mut self, place_id: &str) -> Result<(), SelectionError> {
        if self.is_picked(place_id) {
            debug!("📌 Place already picked");
            return Ok(());
        }

        let place = self
            .catalog
            .by_id(place_id)
            .ok_or_else(|| SelectionError::UnknownPlace(place_id.to_string()))?;
        self.picked.insert(0, place);

        if !self.store.contains(place_id) {
            let ids = std::iter::once(place_id.to_string()).chain(self.store.snapshot().iter().cloned()).collect();
            self.persist(ids).await;
        }

        info!("📌 Picked place");
        self.publish();
        Ok(())
    }

    /// Opens the confirmation dialog for a picked place, replacing any removal that is still pending.
    #[instrument(skip(self))]
    pub fn request_removal(&mut self, place_id: &str) -> Result<(), SelectionError> {
        if !self.is_picked(place_id) {
            return Err(SelectionError::NotPicked(place_id.to_string()));
        }

        if let Some(pending) = self.removal.pending_place_id() {
            debug!(pending, "🗑️ Replacing pending removal");
        }

        self.removal = RemovalDialog::Open {
            place_id: place_id.to_string(),
        };
        self.publish();
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn cancel_removal(&mut self) {
        if self.removal.is_open() {
            self.removal = RemovalDialog::Closed;
            debug!("🗑️ Removal cancelled");
            self.publish();
        }
    }

    /// Removes the place pending in the confirmation dialog. Does nothing when the dialog is closed.
    #[instrument(skip(self))]
    pub async fn confirm_removal(&mut self) {
        let RemovalDialog::Open { place_id } = std::mem::take(&mut self.removal) else {
            debug!("🗑️ No removal pending");
            return;
        };

        self.picked.retain(|place| place.id != place_id);
        let ids = self.store.snapshot().iter().filter(|id| **id != place_id).cloned().collect();
        self.persist(ids).await;

        info!(place_id = place_id.as_str(), "🗑️ Removed place");
        self.publish();
    }

    pub fn available(&self) -> Option<&[Arc<Place>]> {
        self.available.as_deref()
    }

    pub fn picked(&self) -> &[Arc<Place>] {
        &self.picked
    }

    pub fn removal(&self) -> &RemovalDialog {
        &self.removal
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            available: self.available.clone(),
            picked: self.picked.clone(),
            removal: self.removal.clone(),
        }
    }

    fn is_picked(&self, place_id: &str) -> bool {
        self.picked.iter().any(|place| place.id == place_id)
    }

    fn picked_ids(&self) -> Vec<String> {
        self.picked.iter().map(|place| place.id.clone()).collect()
    }

    async fn persist(&mut self, ids: Vec<String>) {
        if let Err(e) = self.store.save(ids).await {
            warn!("⚠️ Unable to store picked places, they are kept for this session only: {}", e);
        }
    }

    fn publish(&self) {
        self.notifier_tx.send_replace(self.snapshot());
    }
}

async fn next_position(position_rx: &mut Option<oneshot::Receiver<PositionResult>>) -> PositionResult {
    match position_rx {
        Some(rx) => rx.await.unwrap_or(Err(PositionError::Abandoned)),
        None => std::future::pending().await,
    }
}
