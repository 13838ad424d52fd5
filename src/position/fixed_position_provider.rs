use crate::domain::Coordinate;
use crate::position::{PositionError, PositionProvider};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Reports a position known up front, typically from the configuration. Without one it behaves like a denied
/// location permission.
#[derive(Debug, Clone)]
pub struct FixedPositionProvider {
    position: Option<Coordinate>,
}

impl FixedPositionProvider {
    pub fn new(position: Option<Coordinate>) -> Self {
        FixedPositionProvider { position }
    }
}

#[async_trait]
impl PositionProvider for FixedPositionProvider {
    #[instrument(skip_all)]
    async fn current_position(&self) -> Result<Coordinate, PositionError> {
        debug!(position = ?self.position, "🧭 Reporting the fixed position");
        self.position.ok_or(PositionError::Denied)
    }
}
