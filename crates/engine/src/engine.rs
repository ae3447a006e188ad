//! The engine context: lazily built, cached game catalog.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::{debug, info, warn};

use magicengine_catalog::GameCatalog;
use magicengine_registry::InstallationRegistry;

use crate::error::EngineError;
use crate::host::HostInfo;
use crate::notifier::{ChangeNotifier, SubscriptionId};

/// Observable engine properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineProperty {
    /// The cached game catalog was built or replaced.
    GameInfo,
}

impl EngineProperty {
    /// Stable property name exposed to UI bindings.
    pub fn name(&self) -> &'static str {
        match self {
            EngineProperty::GameInfo => "GameInfo",
        }
    }
}

impl fmt::Display for EngineProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Owns the installation registry and the cached catalog built from it.
///
/// The catalog is built on the first [`Engine::catalog`] call and shared as
/// an immutable `Arc` until [`Engine::invalidate`] or [`Engine::refresh`].
/// Builds are serialized by an internal mutex; readers of an already cached
/// catalog only clone the `Arc` and never wait for a build.
pub struct Engine {
    registry: Arc<dyn InstallationRegistry>,
    catalog: RwLock<Option<Arc<GameCatalog>>>,
    build_lock: Mutex<()>,
    builds: AtomicU64,
    notifier: ChangeNotifier<EngineProperty>,
    host: HostInfo,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("registry", &self.registry.describe())
            .field("cached", &self.cached_catalog().is_some())
            .field("builds", &self.build_count())
            .field("host", &self.host)
            .finish()
    }
}

impl Engine {
    /// Creates an engine over `registry`. Nothing is read until the catalog
    /// is first requested.
    pub fn new(registry: impl InstallationRegistry + 'static, host: HostInfo) -> Self {
        Self::with_shared_registry(Arc::new(registry), host)
    }

    /// Creates an engine over a registry shared with other owners.
    pub fn with_shared_registry(registry: Arc<dyn InstallationRegistry>, host: HostInfo) -> Self {
        Self {
            registry,
            catalog: RwLock::new(None),
            build_lock: Mutex::new(()),
            builds: AtomicU64::new(0),
            notifier: ChangeNotifier::new(),
            host,
        }
    }

    /// Returns the cached catalog, building it first if there is none.
    ///
    /// Concurrent first callers trigger a single build and all receive the
    /// same `Arc`. A registry failure is returned as
    /// [`EngineError::SourceUnavailable`] and nothing is cached, so the next
    /// call retries.
    pub fn catalog(&self) -> Result<Arc<GameCatalog>, EngineError> {
        if let Some(catalog) = self.cached_catalog() {
            return Ok(catalog);
        }

        let catalog = {
            let _build = self.build_lock.lock().unwrap_or_else(PoisonError::into_inner);

            // Another caller may have published while we waited for the lock.
            if let Some(catalog) = self.cached_catalog() {
                debug!("catalog published by concurrent build");
                return Ok(catalog);
            }

            let catalog = self.build()?;
            self.store(Some(catalog.clone()));
            catalog
        };

        info!(games = catalog.len(), "game catalog ready");
        self.notifier.notify(EngineProperty::GameInfo);
        Ok(catalog)
    }

    /// Returns the cached catalog without building.
    pub fn cached_catalog(&self) -> Option<Arc<GameCatalog>> {
        self.catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drops the cached catalog; the next [`Engine::catalog`] call rebuilds.
    ///
    /// Returns `true` if a catalog was cached.
    pub fn invalidate(&self) -> bool {
        let _build = self.build_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let dropped = self.store(None).is_some();
        if dropped {
            debug!("game catalog invalidated");
        }
        dropped
    }

    /// Rebuilds the catalog now and swaps it in.
    ///
    /// Readers keep getting the previous catalog until the new one is
    /// published. On failure the previous catalog stays cached.
    pub fn refresh(&self) -> Result<Arc<GameCatalog>, EngineError> {
        let catalog = {
            let _build = self.build_lock.lock().unwrap_or_else(PoisonError::into_inner);
            let catalog = self.build()?;
            self.store(Some(catalog.clone()));
            catalog
        };

        info!(games = catalog.len(), "game catalog refreshed");
        self.notifier.notify(EngineProperty::GameInfo);
        Ok(catalog)
    }

    /// Number of catalog builds that completed successfully.
    pub fn build_count(&self) -> u64 {
        self.builds.load(Ordering::Acquire)
    }

    /// Subscribes to property changes. See [`EngineProperty`].
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(EngineProperty) + Send + Sync + 'static,
    {
        self.notifier.subscribe(observer)
    }

    /// Removes a subscription. Returns `true` if it existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Launcher label, e.g. `CC Magic [1.2r0 Build: 3]`.
    pub fn launcher_version(&self) -> &str {
        &self.host.launcher_version
    }

    pub fn os_version(&self) -> &str {
        &self.host.os_version
    }

    pub fn platform_bitness(&self) -> &str {
        &self.host.platform_bitness
    }

    pub fn host(&self) -> &HostInfo {
        &self.host
    }

    /// Reads the registry and builds a catalog. Caller holds `build_lock`.
    fn build(&self) -> Result<Arc<GameCatalog>, EngineError> {
        let source = self.registry.describe();
        let records = self.registry.packages().inspect_err(|e| {
            warn!(source = %source, error = %e, "failed to read installation registry");
        })?;
        debug!(source = %source, records = records.len(), "building game catalog");

        let catalog = Arc::new(magicengine_catalog::build(records));
        self.builds.fetch_add(1, Ordering::AcqRel);
        Ok(catalog)
    }

    /// Swaps the cached catalog. Caller holds `build_lock` and notifies
    /// after releasing it, so observers may call back into the engine.
    fn store(&self, catalog: Option<Arc<GameCatalog>>) -> Option<Arc<GameCatalog>> {
        let mut cached = self.catalog.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *cached, catalog)
    }
}
