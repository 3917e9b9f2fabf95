//! Configuration loading for playrank.
//! Reads the file given with `--config`, else the path in PLAYRANK_CONFIG,
//! else playrank.toml from the current directory. With none of those present
//! the built-in defaults apply.

use anyhow::Context;
use std::path::{Path, PathBuf};

use playrank_common::PlayrankConfig;

pub const CONFIG_ENV: &str = "PLAYRANK_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "playrank.toml";


/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Explicit `--config` path or PLAYRANK_CONFIG; must exist.
    Required(PathBuf),
    /// ./playrank.toml; optional.
    Default(PathBuf),
}

/// Decide which file to read. `env_path` is the value of PLAYRANK_CONFIG.
pub fn resolve_source(explicit: Option<&Path>, env_path: Option<String>) -> ConfigSource {
    match (explicit, env_path) {
        (Some(p), _) => ConfigSource::Required(p.to_path_buf()),
        (None, Some(p)) if !p.is_empty() => ConfigSource::Required(PathBuf::from(p)),
        _ => ConfigSource::Default(PathBuf::from(DEFAULT_CONFIG_FILE)),
    }
}

/// Load configuration from `source`.
pub fn load_from(source: &ConfigSource) -> anyhow::Result<PlayrankConfig> {
    match source {
        ConfigSource::Required(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            PlayrankConfig::from_path(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))
        }
        ConfigSource::Default(path) if path.exists() => PlayrankConfig::from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        ConfigSource::Default(_) => {
            tracing::debug!("No {DEFAULT_CONFIG_FILE} found; using built-in defaults");
            Ok(PlayrankConfig::default())
        }
    }
}

/// Resolve and load configuration for this process.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<PlayrankConfig> {
    let source = resolve_source(explicit, std::env::var(CONFIG_ENV).ok());
    load_from(&source)
}
