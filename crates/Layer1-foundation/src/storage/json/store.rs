//! Read-only JSON file store

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// JSON settings store rooted at a directory
#[derive(Debug, Clone)]
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Global settings (`<config_dir>/ecssh/`)
    pub fn global() -> Result<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Cannot find config directory".to_string()))?
            .join("ecssh");
        Ok(Self::new(dir))
    }

    pub fn file_path(&self, filename: &str) -> PathBuf {
        self.base_dir.join(filename)
    }

    /// Load and parse a JSON file
    pub fn load<T: DeserializeOwned>(&self, filename: &str) -> Result<T> {
        let path = self.file_path(filename);
        let content = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Load if the file exists
    pub fn load_optional<T: DeserializeOwned>(&self, filename: &str) -> Result<Option<T>> {
        let path = self.file_path(filename);
        if !path.exists() {
            return Ok(None);
        }
        self.load(filename).map(Some)
    }
}
