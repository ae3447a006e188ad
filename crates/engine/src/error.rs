//! Error types for engine operations.

use magicengine_registry::RegistryError;

/// Errors produced by the engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The installation registry could not be read. Nothing was cached.
    #[error("installation registry unavailable: {0}")]
    SourceUnavailable(#[from] RegistryError),

    #[error("process-wide engine already installed")]
    AlreadyInstalled,
}
