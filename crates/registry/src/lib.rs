//! Installation registry seam for the game catalog.
//!
//! The engine never scans installations itself. It reads an unordered list
//! of [`InstalledPackage`] records from anything implementing
//! [`InstallationRegistry`]:
//!
//! - [`MemoryRegistry`] — records held in memory, replaceable at runtime
//! - [`ManifestRegistry`] — records read from a JSON manifest on disk

pub mod error;
pub mod manifest;
pub mod memory;
pub mod types;

pub use error::RegistryError;
pub use manifest::ManifestRegistry;
pub use memory::MemoryRegistry;
pub use types::{InstallationRegistry, InstalledPackage};
