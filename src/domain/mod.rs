mod coordinate;
pub mod events;
mod place;

pub use coordinate::{Coordinate, CoordinateError};
pub use place::{Image, Place};
