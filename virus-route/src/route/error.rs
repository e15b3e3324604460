//! Route document error types.

use std::path::PathBuf;

/// Errors from loading or saving a route document.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// Reading or writing the file failed
    #[error("failed to access route file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not a valid route
    #[error("invalid route document: {0}")]
    Json(#[from] serde_json::Error),
}
