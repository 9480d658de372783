//! Addressable configuration keys in `section.key` form.

use std::path::PathBuf;
use std::str::FromStr;

use tracing_subscriber::EnvFilter;

use super::error::ConfigError;
use super::file::ConfigFile;
use crate::coord::validate_grid_size;
use crate::world::MAX_VISIBILITY_RADIUS;

/// Every setting that can be read or written by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    WorldOriginLat,
    WorldOriginLng,
    WorldGridSize,
    WorldCacheProbability,
    WorldVisibilityRadius,
    WorldMaxCoins,
    GameSaveFile,
    LoggingLevel,
    LoggingFile,
}

const ALL_KEYS: [ConfigKey; 9] = [
    ConfigKey::WorldOriginLat,
    ConfigKey::WorldOriginLng,
    ConfigKey::WorldGridSize,
    ConfigKey::WorldCacheProbability,
    ConfigKey::WorldVisibilityRadius,
    ConfigKey::WorldMaxCoins,
    ConfigKey::GameSaveFile,
    ConfigKey::LoggingLevel,
    ConfigKey::LoggingFile,
];

impl ConfigKey {
    /// All keys, grouped by section.
    pub fn all() -> &'static [ConfigKey] {
        &ALL_KEYS
    }

    /// INI section name.
    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::WorldOriginLat
            | ConfigKey::WorldOriginLng
            | ConfigKey::WorldGridSize
            | ConfigKey::WorldCacheProbability
            | ConfigKey::WorldVisibilityRadius
            | ConfigKey::WorldMaxCoins => "world",
            ConfigKey::GameSaveFile => "game",
            ConfigKey::LoggingLevel | ConfigKey::LoggingFile => "logging",
        }
    }

    /// Key name within its section.
    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::WorldOriginLat => "origin_lat",
            ConfigKey::WorldOriginLng => "origin_lng",
            ConfigKey::WorldGridSize => "grid_size",
            ConfigKey::WorldCacheProbability => "cache_probability",
            ConfigKey::WorldVisibilityRadius => "visibility_radius",
            ConfigKey::WorldMaxCoins => "max_coins",
            ConfigKey::GameSaveFile => "save_file",
            ConfigKey::LoggingLevel => "level",
            ConfigKey::LoggingFile => "file",
        }
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Current value as a string. Unset optional values are empty.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::WorldOriginLat => config.world.origin.lat.to_string(),
            ConfigKey::WorldOriginLng => config.world.origin.lng.to_string(),
            ConfigKey::WorldGridSize => config.world.grid_size.to_string(),
            ConfigKey::WorldCacheProbability => config.world.cache_probability.to_string(),
            ConfigKey::WorldVisibilityRadius => config.world.visibility_radius.to_string(),
            ConfigKey::WorldMaxCoins => config.world.max_coins.to_string(),
            ConfigKey::GameSaveFile => config.game.save_file.display().to_string(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
            ConfigKey::LoggingFile => config
                .logging
                .file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        }
    }

    /// Validate `value` and store it.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match self {
            ConfigKey::WorldOriginLat => config.world.origin.lat = self.parse_finite(value)?,
            ConfigKey::WorldOriginLng => config.world.origin.lng = self.parse_finite(value)?,
            ConfigKey::WorldGridSize => {
                let size = self.parse_finite(value)?;
                validate_grid_size(size).map_err(|e| self.invalid(value, e))?;
                config.world.grid_size = size;
            }
            ConfigKey::WorldCacheProbability => {
                let p = self.parse_finite(value)?;
                if !(0.0..=1.0).contains(&p) {
                    return Err(self.invalid(value, "must be between 0 and 1"));
                }
                config.world.cache_probability = p;
            }
            ConfigKey::WorldVisibilityRadius => {
                let radius = self.parse_u32(value)?;
                if radius > MAX_VISIBILITY_RADIUS {
                    return Err(self.invalid(
                        value,
                        format!("must be at most {}", MAX_VISIBILITY_RADIUS),
                    ));
                }
                config.world.visibility_radius = radius;
            }
            ConfigKey::WorldMaxCoins => config.world.max_coins = self.parse_u32(value)?,
            ConfigKey::GameSaveFile => {
                if value.is_empty() {
                    return Err(self.invalid(value, "path must not be empty"));
                }
                config.game.save_file = PathBuf::from(value);
            }
            ConfigKey::LoggingLevel => {
                EnvFilter::try_new(value).map_err(|e| self.invalid(value, e))?;
                config.logging.level = value.to_string();
            }
            ConfigKey::LoggingFile => {
                config.logging.file = (!value.is_empty()).then(|| PathBuf::from(value));
            }
        }
        Ok(())
    }

    fn invalid(&self, value: &str, reason: impl std::fmt::Display) -> ConfigError {
        ConfigError::invalid(self.name(), value, reason)
    }

    fn parse_finite(&self, value: &str) -> Result<f64, ConfigError> {
        match value.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            Ok(_) => Err(self.invalid(value, "must be a finite number")),
            Err(e) => Err(self.invalid(value, e)),
        }
    }

    fn parse_u32(&self, value: &str) -> Result<u32, ConfigError> {
        value.parse::<u32>().map_err(|e| self.invalid(value, e))
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ALL_KEYS
            .iter()
            .copied()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}
