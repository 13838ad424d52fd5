use crate::storage::key_value_store::{KeyValueStore, StorageError, validate_key};
use async_trait::async_trait;
use std::io;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, instrument};

/// Stores every key in its own `<key>.json` file below `directory`.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    directory: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        FileKeyValueStore { directory: directory.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{}.json", key))
    }

    fn staging_path_for(&self, key: &str) -> PathBuf {
        self.directory.join(format!(".{}.json.tmp", key))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;

        match fs::read_to_string(self.path_for(key)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("💾 No value stored yet");
                Ok(None)
            }
            Err(e) => Err(StorageError::Unavailable {
                key: key.to_string(),
                source: e,
            }),
        }
    }

    #[instrument(skip(self, value))]
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        validate_key(key)?;
        let unavailable = |source: io::Error| StorageError::Unavailable {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.directory).await.map_err(unavailable)?;

        // Write next to the target and swap it in, readers never see a half written file
        let staging_path = self.staging_path_for(key);
        fs::write(&staging_path, value).await.map_err(unavailable)?;
        fs::rename(&staging_path, self.path_for(key)).await.map_err(unavailable)?;

        debug!("💾 Stored value");
        Ok(())
    }
}
