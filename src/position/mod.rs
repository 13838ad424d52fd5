mod fixed_position_provider;
mod position_provider;

pub use fixed_position_provider::FixedPositionProvider;
pub use position_provider::{PositionError, PositionProvider};
