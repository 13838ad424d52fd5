use crate::storage::{KeyValueStore, StorageError};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

pub const DEFAULT_SELECTION_KEY: &str = "selectedPlaces";

/// Persists the picked place ids, most recent first, as a JSON array under a single key.
///
/// The store remembers the sequence it last loaded or saved. As the only writer of the key, that snapshot is the
/// current stored sequence for the rest of the session, even when the medium went away in between.
#[derive(Debug)]
pub struct PersistentSelectionStore {
    kv: Arc<dyn KeyValueStore>,
    key: String,
    snapshot: Vec<String>,
}

impl PersistentSelectionStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        PersistentSelectionStore {
            kv,
            key: key.into(),
            snapshot: Vec::new(),
        }
    }

    /// Reads the stored ids. Missing, unreadable or malformed records count as an empty selection.
    #[instrument(skip(self), fields(key = self.key.as_str()))]
    pub async fn load(&mut self) -> Vec<String> {
        let ids = match self.kv.get(&self.key).await {
            Ok(Some(raw)) => parse_ids(&self.key, &raw).unwrap_or_else(|e| {
                warn!("⚠️ Ignoring the stored selection: {}", e);
                Vec::new()
            }),
            Ok(None) => {
                debug!("💾 No stored selection");
                Vec::new()
            }
            Err(e) => {
                warn!("⚠️ Unable to read the stored selection: {}", e);
                Vec::new()
            }
        };

        self.snapshot = ids.clone();
        ids
    }

    /// Replaces the stored ids with `ids` in a single write.
    #[instrument(skip(self), fields(key = self.key.as_str()))]
    pub async fn save(&mut self, ids: Vec<String>) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&ids).map_err(|source| StorageError::Serialization {
            key: self.key.clone(),
            source,
        })?;

        self.snapshot = ids;
        self.kv.set(&self.key, raw).await?;

        debug!("💾 Saved {} id(s)", self.snapshot.len());
        Ok(())
    }

    pub fn snapshot(&self) -> &[String] {
        &self.snapshot
    }

    pub fn contains(&self, id: &str) -> bool {
        self.snapshot.iter().any(|stored_id| stored_id == id)
    }
}

fn parse_ids(key: &str, raw: &str) -> Result<Vec<String>, StorageError> {
    let ids: Vec<String> = serde_json::from_str(raw).map_err(|source| StorageError::Corrupt {
        key: key.to_string(),
        source,
    })?;

    let mut seen = HashSet::with_capacity(ids.len());
    Ok(ids.into_iter().filter(|id| seen.insert(id.clone())).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileKeyValueStore, InMemoryKeyValueStore};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::env::temp_dir;
    use test_log::test;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test(tokio::test)]
    async fn load_returns_an_empty_selection_when_nothing_was_stored() {
        let mut store = PersistentSelectionStore::new(Arc::new(InMemoryKeyValueStore::new()), DEFAULT_SELECTION_KEY);

        assert_eq!(store.load().await, Vec::<String>::new());
        assert!(store.snapshot().is_empty());
    }

    #[test(tokio::test)]
    async fn save_then_load_returns_the_same_ids_in_order() -> Result<(), StorageError> {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let mut store = PersistentSelectionStore::new(kv.clone(), DEFAULT_SELECTION_KEY);

        store.save(ids(&["p3", "p1", "p7"])).await?;

        let mut reopened = PersistentSelectionStore::new(kv.clone(), DEFAULT_SELECTION_KEY);
        assert_eq!(reopened.load().await, ids(&["p3", "p1", "p7"]));
        assert_eq!(kv.value(DEFAULT_SELECTION_KEY), Some(r#"["p3","p1","p7"]"#.to_string()));
        Ok(())
    }

    #[test(tokio::test)]
    async fn save_then_load_round_trips_through_files() -> Result<(), StorageError> {
        let directory = temp_dir().join(format!("placepicker-selection-store-{}", std::process::id()));
        let mut store = PersistentSelectionStore::new(Arc::new(FileKeyValueStore::new(&directory)), DEFAULT_SELECTION_KEY);

        store.save(ids(&["p2", "p9"])).await?;

        let mut reopened = PersistentSelectionStore::new(Arc::new(FileKeyValueStore::new(&directory)), DEFAULT_SELECTION_KEY);
        assert_eq!(reopened.load().await, ids(&["p2", "p9"]));
        Ok(())
    }

    #[rstest]
    #[case("not json")]
    #[case("null")]
    #[case(r#"{"p1": true}"#)]
    #[case("[1, 2, 3]")]
    #[case(r#"["p1""#)]
    #[tokio::test]
    async fn load_treats_malformed_records_as_an_empty_selection(#[case] raw: &str) {
        let kv = Arc::new(InMemoryKeyValueStore::new().with_value(DEFAULT_SELECTION_KEY, raw));
        let mut store = PersistentSelectionStore::new(kv, DEFAULT_SELECTION_KEY);

        assert_eq!(store.load().await, Vec::<String>::new());
    }

    #[test(tokio::test)]
    async fn load_treats_an_unavailable_medium_as_an_empty_selection() {
        let kv = Arc::new(InMemoryKeyValueStore::new().with_value(DEFAULT_SELECTION_KEY, r#"["p1"]"#));
        kv.set_available(false);
        let mut store = PersistentSelectionStore::new(kv, DEFAULT_SELECTION_KEY);

        assert_eq!(store.load().await, Vec::<String>::new());
    }

    #[test(tokio::test)]
    async fn load_collapses_duplicate_ids_to_their_first_occurrence() {
        let kv = Arc::new(InMemoryKeyValueStore::new().with_value(DEFAULT_SELECTION_KEY, r#"["p2","p1","p2","p3","p1"]"#));
        let mut store = PersistentSelectionStore::new(kv, DEFAULT_SELECTION_KEY);

        assert_eq!(store.load().await, ids(&["p2", "p1", "p3"]));
    }

    #[test(tokio::test)]
    async fn save_fails_when_the_medium_is_unavailable_but_keeps_the_snapshot() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        kv.set_available(false);
        let mut store = PersistentSelectionStore::new(kv.clone(), DEFAULT_SELECTION_KEY);

        let result = store.save(ids(&["p1"])).await;

        assert!(matches!(result, Err(StorageError::Unavailable { .. })));
        assert_eq!(store.snapshot(), ids(&["p1"]).as_slice());
        assert!(store.contains("p1"));
        assert_eq!(kv.writes(), 0);
    }

    #[test(tokio::test)]
    async fn uses_the_configured_key() -> Result<(), StorageError> {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let mut store = PersistentSelectionStore::new(kv.clone(), "otherKey");

        store.save(ids(&["p1"])).await?;

        assert_eq!(kv.value("otherKey"), Some(r#"["p1"]"#.to_string()));
        assert_eq!(kv.value(DEFAULT_SELECTION_KEY), None);
        Ok(())
    }
}
