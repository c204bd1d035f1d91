use anyhow::{Context, Result};
use deepcow_core::EnvConfig;
use std::fs;
use std::path::Path;

/// Reads and validates an [`EnvConfig`] from a TOML file.
///
/// A missing file is not an error: the defaults are used and a warning is
/// logged. A file that exists but does not parse or validate is an error.
pub fn load_config(path: &Path) -> Result<EnvConfig> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "Config file not found, using defaults");
        return Ok(EnvConfig::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = EnvConfig::from_toml(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    tracing::info!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Renders `config` as TOML, in the layout [`load_config`] accepts.
pub fn to_toml(config: &EnvConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize config")
}
