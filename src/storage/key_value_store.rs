use async_trait::async_trait;
use std::fmt::Debug;
use std::io;
use thiserror::Error;

/// Durable text storage addressed by key. A `set` replaces the whole value at once.
#[async_trait]
pub trait KeyValueStore: Debug + Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
}

pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage unavailable for key '{key}': {source}")]
    Unavailable { key: String, source: io::Error },
    #[error("stored value for key '{key}' is corrupt: {source}")]
    Corrupt { key: String, source: serde_json::Error },
    #[error("unable to serialize the value for key '{key}': {source}")]
    Serialization { key: String, source: serde_json::Error },
    #[error("invalid storage key '{0}', only ascii letters, digits, '_' and '-' are allowed")]
    InvalidKey(String),
}
