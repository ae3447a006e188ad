//! JSON manifest registry source.
//!
//! The manifest lists installed packages as written by an external scanner:
//!
//! ```json
//! {
//!   "packages": [
//!     { "productId": 1, "name": "Base Game", "version": "1.67.2", "isGame": true }
//!   ]
//! }
//! ```
//!
//! The file is re-read on every call so a rebuild picks up rescans.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::RegistryError;
use crate::types::{InstallationRegistry, InstalledPackage};

#[derive(Debug, Deserialize)]
struct ManifestFile {
    #[serde(default)]
    packages: Vec<InstalledPackage>,
}

/// Registry that reads records from a JSON manifest file.
#[derive(Debug, Clone)]
pub struct ManifestRegistry {
    path: PathBuf,
}

impl ManifestRegistry {
    /// Creates a registry reading from `path`. The file is not touched yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the manifest path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InstallationRegistry for ManifestRegistry {
    fn packages(&self) -> Result<Vec<InstalledPackage>, RegistryError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RegistryError::NotFound(self.path.clone())
            } else {
                RegistryError::Io(e)
            }
        })?;

        let manifest: ManifestFile = serde_json::from_str(&content)?;
        debug!(
            path = %self.path.display(),
            count = manifest.packages.len(),
            "read installation manifest"
        );
        Ok(manifest.packages)
    }

    fn describe(&self) -> String {
        format!("manifest {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_manifest(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("packages.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn reads_packages_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(
            &dir,
            r#"{"packages": [
                {"productId": 3, "name": "Late Night", "version": "3.0", "isGame": true},
                {"productId": 9001, "name": "Stuff Pack", "isGame": false,
                 "metadata": {"region": "EU"}}
            ]}"#,
        );

        let reg = ManifestRegistry::new(&path);
        let packages = reg.packages().unwrap();

        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].product_id, 3);
        assert_eq!(packages[0].version, "3.0");
        assert!(!packages[1].is_game);
        assert_eq!(packages[1].metadata["region"], "EU");
    }

    #[test]
    fn empty_object_yields_no_packages() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(&dir, "{}");

        assert!(ManifestRegistry::new(path).packages().unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let reg = ManifestRegistry::new(dir.path().join("absent.json"));

        match reg.packages() {
            Err(RegistryError::NotFound(path)) => assert!(path.ends_with("absent.json")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn corrupt_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(&dir, "{ not json");

        assert!(matches!(
            ManifestRegistry::new(path).packages(),
            Err(RegistryError::Json(_))
        ));
    }

    #[test]
    fn rereads_file_on_every_call() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(&dir, r#"{"packages": []}"#);
        let reg = ManifestRegistry::new(&path);
        assert!(reg.packages().unwrap().is_empty());

        std::fs::write(
            &path,
            r#"{"packages": [{"productId": 1, "isGame": true}]}"#,
        )
        .unwrap();
        assert_eq!(reg.packages().unwrap().len(), 1);
    }

    #[test]
    fn describe_names_the_path() {
        let reg = ManifestRegistry::new("/srv/packages.json");
        assert!(reg.describe().contains("packages.json"));
    }
}
