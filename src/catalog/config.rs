//! Catalog configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the catalog store backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON data file backing the catalog. `None` keeps the catalog in memory.
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// Whether the data file is written pretty-printed.
    #[serde(default)]
    pub pretty: bool,
}

impl CatalogConfig {
    /// In-memory catalog configuration.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// File-backed catalog configuration.
    pub fn with_data_file<P: Into<PathBuf>>(path: P) -> Self {
        CatalogConfig {
            data_file: Some(path.into()),
            ..Self::default()
        }
    }

    /// Set pretty-printing of the data file.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Whether the catalog is persisted to disk.
    pub fn is_persistent(&self) -> bool {
        self.data_file.is_some()
    }
}
