use crate::catalog::Catalog;
use crate::domain::Place;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{info, instrument};

#[instrument]
pub async fn load_catalog_from(path: &Path) -> Result<Catalog, CatalogError> {
    info!("📁 Loading catalog...");
    let content = fs::read_to_string(path).await.map_err(|e| CatalogError::Io {
        source: e,
        path: path.to_path_buf(),
    })?;

    let places: Vec<Place> = serde_json::from_str(&content)?;
    let catalog = Catalog::new(places)?;

    info!("📁 Loading catalog... OK, {} place(s)", catalog.len());
    Ok(catalog)
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("unable to read catalog '{}': {}", path.display(), source)]
    Io { source: io::Error, path: PathBuf },
    #[error("json deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate place id '{0}'")]
    DuplicateId(String),
}
