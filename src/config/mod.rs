pub mod settings;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::Catalog;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Snapshot file used when no path is given on the command line.
    pub materials_file: Option<PathBuf>,
    pub catalog: Catalog,
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence.
    pub log_filter: String,
    /// `chrono` format string for the upload date shown on material cards.
    pub date_format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            materials_file: None,
            catalog: Catalog::default(),
            log_filter: "info".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}
