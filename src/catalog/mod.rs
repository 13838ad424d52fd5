pub mod loader;
mod place_deserializer;
pub mod registry;

pub use loader::{CatalogError, load_catalog_from};
pub use registry::Catalog;
