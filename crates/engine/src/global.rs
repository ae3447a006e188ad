//! Optional process-wide engine.
//!
//! Hosts that cannot thread an [`Engine`] through their UI layer install
//! one here once. The instance lives until process exit.

use std::sync::OnceLock;

use tracing::debug;

use crate::engine::Engine;
use crate::error::EngineError;

static INSTANCE: OnceLock<Engine> = OnceLock::new();

/// Installs `engine` as the process-wide instance.
///
/// Fails with [`EngineError::AlreadyInstalled`] if one is already set; the
/// existing instance is kept.
pub fn install(engine: Engine) -> Result<&'static Engine, EngineError> {
    install_in(&INSTANCE, engine)
}

/// Returns the process-wide instance, if installed.
pub fn instance() -> Option<&'static Engine> {
    INSTANCE.get()
}

/// Returns the process-wide instance, creating it with `init` on first use.
///
/// `init` runs at most once even when several threads race here.
pub fn get_or_init(init: impl FnOnce() -> Engine) -> &'static Engine {
    INSTANCE.get_or_init(|| {
        debug!("creating process-wide engine");
        init()
    })
}

fn install_in(cell: &OnceLock<Engine>, engine: Engine) -> Result<&Engine, EngineError> {
    cell.set(engine).map_err(|_| EngineError::AlreadyInstalled)?;
    debug!("process-wide engine installed");
    cell.get().ok_or(EngineError::AlreadyInstalled)
}
