//! In-memory registry source.

use std::sync::{PoisonError, RwLock};

use crate::error::RegistryError;
use crate::types::{InstallationRegistry, InstalledPackage};

/// Registry backed by a list of records held in memory.
///
/// The list can be replaced at runtime, which lets hosts feed records from
/// their own scanners and tests simulate installs and removals.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    packages: RwLock<Vec<InstalledPackage>>,
}

impl MemoryRegistry {
    /// Creates a registry holding the given records.
    pub fn new(packages: Vec<InstalledPackage>) -> Self {
        Self {
            packages: RwLock::new(packages),
        }
    }

    /// Replaces every record.
    pub fn set_packages(&self, packages: Vec<InstalledPackage>) {
        *self.packages.write().unwrap_or_else(PoisonError::into_inner) = packages;
    }

    /// Appends a single record.
    pub fn push(&self, package: InstalledPackage) {
        self.packages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(package);
    }

    /// Returns the number of records currently held.
    pub fn len(&self) -> usize {
        self.packages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no records are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl InstallationRegistry for MemoryRegistry {
    fn packages(&self) -> Result<Vec<InstalledPackage>, RegistryError> {
        Ok(self
            .packages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn describe(&self) -> String {
        "memory".into()
    }
}
