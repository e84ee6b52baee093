//! Config loading and persistence.

mod load;
mod schema;

pub use load::{apply_env_overrides, config_path, load, load_or_default, write_config};
pub use schema::{Config, DefaultsConfig, FileLoggingConfig, LogFormat, LoggingConfig, StorageConfig};
