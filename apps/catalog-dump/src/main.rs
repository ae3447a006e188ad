//! Prints the installed-game catalog built from an installation manifest.

mod config;

use std::io::Write;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use magicengine_engine::{Engine, HostInfo, LauncherVersion, global};
use magicengine_registry::ManifestRegistry;

use config::DumpConfig;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,magicengine=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cfg = match DumpConfig::load() {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load config, using defaults");
            DumpConfig::default()
        }
    };

    let version = LauncherVersion::parse(env!("CARGO_PKG_VERSION")).unwrap_or_default();
    let host = HostInfo::detect(&cfg.app_name, version);
    let registry = ManifestRegistry::new(&cfg.manifest_path);

    let engine = global::get_or_init(|| Engine::new(registry, host));
    engine.subscribe(|property| tracing::debug!(%property, "engine property changed"));

    let catalog = engine
        .catalog()
        .with_context(|| format!("building catalog from {}", cfg.manifest_path.display()))?;

    let mut out = std::io::stdout().lock();
    if cfg.json_output {
        serde_json::to_writer_pretty(&mut out, &*catalog)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "{}", engine.launcher_version())?;
    writeln!(out, "{}", engine.os_version())?;
    writeln!(out, "{}", engine.platform_bitness())?;
    writeln!(out)?;

    if catalog.is_empty() {
        writeln!(out, "No games installed.")?;
    }
    for entry in catalog.iter() {
        writeln!(out, "{:>10}  {}", entry.product_id(), entry.display_label())?;
    }
    for id in catalog.duplicate_ids() {
        writeln!(out, "warning: product id {id} reported more than once")?;
    }

    Ok(())
}
