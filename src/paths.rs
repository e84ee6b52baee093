//! XDG directory helpers for config/data locations.

use std::path::PathBuf;

/// Base directory for persistent data (the entity slot, logs).
///
/// Uses `FT_DATA_DIR` if set, otherwise `$XDG_DATA_HOME/flowtrack` or
/// `~/.local/share/flowtrack`.
pub(crate) fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FT_DATA_DIR")
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir);
    }

    std::env::var("XDG_DATA_HOME")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join(".local")
                .join("share")
        })
        .join("flowtrack")
}

/// Directory for the user config file.
pub(crate) fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FT_CONFIG_DIR")
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir);
    }

    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("flowtrack")
}

/// Directory for rotated log files.
pub(crate) fn log_dir() -> PathBuf {
    data_dir().join("logs")
}

/// Default location of the durable entity slot.
pub(crate) fn default_slot_path() -> PathBuf {
    data_dir().join("entities.json")
}
