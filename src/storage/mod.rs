mod file_store;
mod key_value_store;
#[cfg(test)]
mod memory_store;
pub mod selection_store;

pub use file_store::FileKeyValueStore;
pub use key_value_store::{KeyValueStore, StorageError};
#[cfg(test)]
pub use memory_store::InMemoryKeyValueStore;
pub use selection_store::{DEFAULT_SELECTION_KEY, PersistentSelectionStore};
