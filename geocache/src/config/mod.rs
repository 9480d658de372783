//! Configuration file handling.
//!
//! Settings live in an INI file at `<config dir>/geocache/config.ini`.
//! Every setting is addressable as `section.key` through [`ConfigKey`], which
//! is also where values are validated, so the file loader and the
//! `config set` command share one set of rules.

mod error;
mod file;
mod keys;

pub use error::ConfigError;
pub use file::{
    config_dir, config_file_path, default_save_path, ConfigFile, GameSettings, LoggingSettings,
    DEFAULT_LOG_LEVEL,
};
pub use keys::ConfigKey;
