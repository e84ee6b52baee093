use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

use super::Config;

pub fn config_path() -> PathBuf {
    crate::paths::config_dir().join("config.toml")
}

pub fn load() -> Result<Config> {
    let path = config_path();
    let mut config = if path.exists() {
        let contents = fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?
    } else {
        Config::default()
    };
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Load, degrading to defaults (with a warning) on any failure.
pub fn load_or_default() -> Config {
    match load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("config load failed, using defaults: {e}");
            let mut config = Config::default();
            apply_env_overrides(&mut config);
            config
        }
    }
}

/// Env vars win over file values: `FT_ACTOR`, `FT_SLOT`, `FT_LOG`.
pub fn apply_env_overrides(config: &mut Config) {
    if let Ok(actor) = std::env::var("FT_ACTOR")
        && !actor.trim().is_empty()
    {
        config.defaults.actor = Some(actor);
    }
    if let Ok(slot) = std::env::var("FT_SLOT")
        && !slot.trim().is_empty()
    {
        config.storage.slot = Some(PathBuf::from(slot));
    }
    if let Ok(filter) = std::env::var("FT_LOG")
        && !filter.trim().is_empty()
    {
        config.logging.filter = Some(filter);
    }
}

pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("failed to serialize config: {e}")))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| Error::Config(format!("failed to create {}: {e}", parent.display())))?;
    }
    fs::write(path, contents)
        .map_err(|e| Error::Config(format!("failed to write {}: {e}", path.display())))?;
    Ok(())
}

impl Config {
    /// Resolve the slot path: explicit config wins, then the XDG default.
    pub fn slot_path(&self) -> PathBuf {
        self.storage
            .slot
            .clone()
            .unwrap_or_else(crate::paths::default_slot_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&toml).unwrap();
        assert_eq!(back.logging.stderr, config.logging.stderr);
        assert!(back.storage.slot.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: Config = toml::from_str("[defaults]\nactor = \"Alice\"\n").unwrap();
        assert_eq!(config.defaults.actor.as_deref(), Some("Alice"));
        assert!(config.logging.stderr);
    }
}
