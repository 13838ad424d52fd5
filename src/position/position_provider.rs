use crate::domain::Coordinate;
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

/// Source of the user's current position. Asked once per session.
#[async_trait]
pub trait PositionProvider: Debug + Send + Sync {
    async fn current_position(&self) -> Result<Coordinate, PositionError>;
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PositionError {
    #[error("permission to read the position was denied")]
    Denied,
    #[error("position unavailable: {0}")]
    Unavailable(String),
    #[error("the position request ended without a result")]
    Abandoned,
}
