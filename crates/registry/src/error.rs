//! Error types for installation registry sources.

use std::path::PathBuf;

/// Errors produced when an installation registry cannot be read.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("registry not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("registry unavailable: {0}")]
    Unavailable(String),
}
