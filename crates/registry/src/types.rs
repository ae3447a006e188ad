//! Installed package records and the registry trait.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// One installed package as reported by the installation registry.
///
/// Only `product_id` and `is_game` drive catalog construction; the rest is
/// carried through to the display entries or ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledPackage {
    pub product_id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub is_game: bool,
    #[serde(default)]
    pub install_path: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl InstalledPackage {
    /// Creates a record with empty path and metadata.
    pub fn new(
        product_id: u32,
        name: impl Into<String>,
        version: impl Into<String>,
        is_game: bool,
    ) -> Self {
        Self {
            product_id,
            name: name.into(),
            version: version.into(),
            is_game,
            install_path: String::new(),
            metadata: BTreeMap::new(),
        }
    }
}

/// Read-only source of installed package records.
///
/// Implementations return the records in whatever order the underlying store
/// yields them. A failure means the store could not be read at all; it is
/// never reported as an empty list.
pub trait InstallationRegistry: Send + Sync {
    /// Reads every installed package record.
    fn packages(&self) -> Result<Vec<InstalledPackage>, RegistryError>;

    /// Short human-readable description of the source, used in logs.
    fn describe(&self) -> String;
}

impl<T: InstallationRegistry + ?Sized> InstallationRegistry for Arc<T> {
    fn packages(&self) -> Result<Vec<InstalledPackage>, RegistryError> {
        (**self).packages()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<T: InstallationRegistry + ?Sized> InstallationRegistry for Box<T> {
    fn packages(&self) -> Result<Vec<InstalledPackage>, RegistryError> {
        (**self).packages()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_deserializes_camel_case_with_defaults() {
        let json = r#"{"productId": 1001, "isGame": true, "name": "Base Game"}"#;
        let pkg: InstalledPackage = serde_json::from_str(json).unwrap();

        assert_eq!(pkg.product_id, 1001);
        assert!(pkg.is_game);
        assert_eq!(pkg.name, "Base Game");
        assert!(pkg.version.is_empty());
        assert!(pkg.install_path.is_empty());
        assert!(pkg.metadata.is_empty());
    }

    #[test]
    fn package_missing_product_id_is_rejected() {
        let json = r#"{"isGame": true, "name": "No Id"}"#;
        assert!(serde_json::from_str::<InstalledPackage>(json).is_err());
    }

    #[test]
    fn package_serializes_camel_case() {
        let pkg = InstalledPackage::new(7, "Expansion", "1.4.6", false);
        let value = serde_json::to_value(&pkg).unwrap();

        assert_eq!(value["productId"], 7);
        assert_eq!(value["isGame"], false);
        assert_eq!(value["installPath"], "");
    }
}
