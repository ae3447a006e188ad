//! Catalog dump configuration.
//!
//! Read from `~/.config/magicengine/config.json` (`%APPDATA%\magicengine` on
//! Windows), or from the file named by `MAGICENGINE_CONFIG`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "MAGICENGINE_CONFIG";

/// On-disk layout; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    #[serde(default)]
    manifest_path: Option<PathBuf>,
    #[serde(default)]
    app_name: Option<String>,
    #[serde(default)]
    json_output: Option<bool>,
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpConfig {
    /// JSON manifest listing installed packages.
    pub manifest_path: PathBuf,

    /// Application name shown in the launcher version label.
    pub app_name: String,

    /// Print the catalog as JSON instead of a text table.
    pub json_output: bool,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            manifest_path: config_base_dir()
                .join("magicengine")
                .join("packages.json"),
            app_name: magicengine_engine::host::DEFAULT_APP_NAME.into(),
            json_output: false,
        }
    }
}

impl DumpConfig {
    /// Loads the configuration. A missing file yields defaults; a malformed
    /// file is logged and also yields defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let mut config = DumpConfig::default();
        if !path.exists() {
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str::<ConfigFile>(&content) {
            Ok(file) => {
                if let Some(manifest) = file.manifest_path {
                    config.manifest_path = manifest;
                }
                if let Some(name) = file.app_name.filter(|n| !n.is_empty()) {
                    config.app_name = name;
                }
                if let Some(json) = file.json_output {
                    config.json_output = json;
                }
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config, using defaults"
                );
            }
        }

        Ok(config)
    }
}

/// Returns the config file path, honouring [`CONFIG_ENV`].
pub fn config_path() -> PathBuf {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => config_base_dir().join("magicengine").join("config.json"),
    }
}

fn config_base_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata)
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home).join(".config")
    }
}
