//! Defines the custom error type for the `core` module.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for the `core` module.
///
/// Filtering and grouping are infallible; every variant here belongs to the
/// boundary where a material batch is fetched and decoded.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Represents an I/O error, typically from reading a snapshot file.
    #[error("I/O error for path {1}: {0}")]
    Io(#[source] std::io::Error, PathBuf),

    /// The batch could not be parsed as a list of material rows.
    #[error("Malformed material batch: {0}")]
    Decode(#[from] serde_json::Error),

    /// A single row failed validation while being decoded into a `Material`.
    #[error("Invalid material record '{id}': {reason}")]
    InvalidMaterial { id: String, reason: String },

    /// The upstream source could not produce a batch at all.
    #[error("Material source unavailable: {0}")]
    SourceUnavailable(String),
}
