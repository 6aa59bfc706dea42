// crates/timelord-core/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors: dataset loading and index construction.
///
/// Everything in here aborts the run. Per-query misses and per-field
/// degradation are not errors and never surface as a `TimelordError`.
#[derive(Debug, Error)]
pub enum TimelordError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// The persisted index exists but cannot be opened.
    #[error("index at {path} is corrupt: {reason} (delete it to rebuild)")]
    IndexCorrupt { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, TimelordError>;
