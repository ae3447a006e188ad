//! Engine context for the installed-game catalog.
//!
//! [`Engine`] owns an installation registry, builds the [`GameCatalog`] from
//! it on first request, caches it, and tells subscribers when the cached
//! catalog changes. Hosts that want a single process-wide engine use the
//! [`global`] module; everything else passes an `Engine` around explicitly.
//!
//! [`GameCatalog`]: magicengine_catalog::GameCatalog

pub mod engine;
pub mod error;
pub mod global;
pub mod host;
pub mod notifier;

pub use engine::{Engine, EngineProperty};
pub use error::EngineError;
pub use host::{HostInfo, LauncherVersion};
pub use notifier::{ChangeNotifier, Observer, SubscriptionId};
