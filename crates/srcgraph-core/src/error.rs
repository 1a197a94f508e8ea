//! Error types for the srcgraph engine.
//!
//! Only run-fatal conditions live here. Per-file parse failures,
//! per-reference resolution misses, and per-call lookup failures are
//! handled locally and never surface as errors.

use std::path::PathBuf;

/// Top-level error enum for the extraction engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("source root not found or not a directory: {0}")]
    InvalidRoot(PathBuf),

    #[error("failed to initialize Java grammar: {0}")]
    Grammar(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
