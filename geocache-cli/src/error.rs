//! CLI error type and exit handling.

use std::fmt;
use std::io;

use geocache::cache::IdParseError;
use geocache::config::ConfigError;
use geocache::coord::CoordError;
use geocache::logging::LoggingError;
use geocache::save::SaveError;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Configuration could not be loaded, saved or applied.
    Config(String),
    /// Logging could not be set up.
    Logging(LoggingError),
    /// The save file could not be read or written.
    Save(SaveError),
    /// A command argument was rejected.
    Input(String),
    /// Writing output or reading a prompt failed.
    Io(io::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Input(_) => 2,
            _ => 1,
        }
    }

    /// Print the error and exit.
    pub fn exit(&self) -> ! {
        eprintln!("{} {}", console::style("Error:").red().bold(), self);
        std::process::exit(self.exit_code());
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Logging(e) => write!(f, "Failed to initialize logging: {}", e),
            CliError::Save(e) => write!(f, "Save file error: {}", e),
            CliError::Input(msg) => write!(f, "{}", msg),
            CliError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Logging(e) => Some(e),
            CliError::Save(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}

impl From<SaveError> for CliError {
    fn from(e: SaveError) -> Self {
        CliError::Save(e)
    }
}

impl From<CoordError> for CliError {
    fn from(e: CoordError) -> Self {
        CliError::Input(e.to_string())
    }
}

impl From<IdParseError> for CliError {
    fn from(e: IdParseError) -> Self {
        CliError::Input(e.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(e: dialoguer::Error) -> Self {
        CliError::Io(io::Error::new(io::ErrorKind::Other, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_exit_with_usage_code() {
        let err: CliError = "cache_x".parse::<geocache::cache::CacheId>().unwrap_err().into();
        assert!(matches!(err, CliError::Input(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_config_error_message() {
        let err: CliError = ConfigError::UnknownKey("world.nope".to_string()).into();
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("world.nope"));
    }
}
