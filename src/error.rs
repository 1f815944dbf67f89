//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the boardgen library.
///
/// In-run selection problems (shortfalls, tag overages) are not errors; they
/// degrade to a shorter board with logged warnings. This type covers the
/// surrounding machinery: I/O, parsing, serialization.
#[derive(Debug, Error)]
pub enum BoardgenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog file not found: {0}")]
    CatalogNotFound(PathBuf),

    #[error("catalog contains no usable rows")]
    EmptyCatalog,
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, BoardgenError>;
