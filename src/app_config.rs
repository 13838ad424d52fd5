use crate::domain::Coordinate;
use crate::storage::DEFAULT_SELECTION_KEY;
use config::{Config, ConfigError};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    core: Core,
    catalog: CatalogSource,
    storage: Storage,
    location: Option<Coordinate>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::with_prefix("PLACEPICKER").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn catalog(&self) -> &CatalogSource {
        &self.catalog
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// The position reported to the selection controller, if any.
    pub fn location(&self) -> Option<Coordinate> {
        self.location
    }
}

#[derive(Debug, Deserialize)]
pub struct Core {
    event_buffer_size: usize,
}

impl Core {
    pub fn event_buffer_size(&self) -> usize {
        self.event_buffer_size
    }
}

#[derive(Debug, Deserialize)]
pub struct CatalogSource {
    path: String,
}

impl CatalogSource {
    pub fn path(&self) -> &Path {
        Path::new(&self.path)
    }
}

#[derive(Debug, Deserialize)]
pub struct Storage {
    directory: String,
    #[serde(default = "default_selection_key")]
    key: String,
}

impl Storage {
    pub fn directory(&self) -> &Path {
        Path::new(&self.directory)
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

fn default_selection_key() -> String {
    DEFAULT_SELECTION_KEY.to_string()
}
