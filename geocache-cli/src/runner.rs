//! Shared setup for commands that play the game.
//!
//! [`CliRunner`] loads the configuration, installs logging and knows where
//! the save file lives. Gameplay commands load the world through it, apply
//! one action and save the result back.

use std::path::{Path, PathBuf};

use geocache::config::ConfigFile;
use geocache::logging::{init_logging, WorkerGuard};
use geocache::save::{load_world, save_world};
use geocache::world::WorldState;
use tracing::info;

use crate::error::CliError;

/// Global options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Save file overriding `game.save_file`.
    pub save_file: Option<PathBuf>,
    /// Force debug-level logging.
    pub verbose: bool,
}

/// Loaded configuration plus the logging guard for one CLI invocation.
pub struct CliRunner {
    config: ConfigFile,
    save_path: PathBuf,
    _log_guard: Option<WorkerGuard>,
}

impl CliRunner {
    /// Load configuration and initialize logging.
    pub fn new(options: &RunOptions) -> Result<Self, CliError> {
        let config = ConfigFile::load()?;
        let level = if options.verbose {
            "debug"
        } else {
            config.logging.level.as_str()
        };
        let guard = init_logging(level, config.logging.file.as_deref())?;

        let mut runner = Self::with_config(config, options.save_file.clone());
        runner._log_guard = guard;
        Ok(runner)
    }

    /// Build a runner from an already loaded configuration, without logging.
    pub fn with_config(config: ConfigFile, save_file: Option<PathBuf>) -> Self {
        let save_path = save_file.unwrap_or_else(|| config.game.save_file.clone());
        Self {
            config,
            save_path,
            _log_guard: None,
        }
    }

    /// The loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Where the game is saved.
    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    /// Log the startup line for `command`.
    pub fn log_startup(&self, command: &str) {
        info!(
            version = geocache::VERSION,
            command,
            save = %self.save_path.display(),
            "geocache starting"
        );
    }

    /// Build the world and restore the saved session, if any.
    pub fn load_world(&self) -> Result<WorldState, CliError> {
        let mut world = WorldState::new(self.config.world.clone())?;
        if let Some(report) = load_world(&self.save_path, &mut world)? {
            if !report.is_clean() {
                eprintln!(
                    "{} {} damaged entries in {} were skipped",
                    console::style("Warning:").yellow().bold(),
                    report.caches.skipped.len() + report.skipped_ids.len(),
                    self.save_path.display()
                );
            }
        }
        Ok(world)
    }

    /// Persist the world to the save file.
    pub fn save_world(&self, world: &WorldState) -> Result<(), CliError> {
        save_world(&self.save_path, world)?;
        Ok(())
    }
}
