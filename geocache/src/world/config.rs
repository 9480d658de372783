//! World configuration.
//!
//! `WorldConfig` holds every parameter the core consumes: world origin, grid
//! size, cache probability, visibility radius and coin cap. It is fixed once
//! a [`super::WorldState`] is built.

use crate::config::ConfigError;
use crate::coord::{validate_grid_size, LatLng};

/// Default world origin latitude.
pub const DEFAULT_ORIGIN_LAT: f64 = 36.9895;

/// Default world origin longitude.
pub const DEFAULT_ORIGIN_LNG: f64 = -122.0627;

/// Default cell edge length in coordinate units (roughly 11 m of latitude).
pub const DEFAULT_GRID_SIZE: f64 = 0.0001;

/// Default probability that a cell holds a cache.
pub const DEFAULT_CACHE_PROBABILITY: f64 = 0.1;

/// Default visibility radius in cells.
///
/// Also the stride of the existence seed, so changing it reshapes the world.
pub const DEFAULT_VISIBILITY_RADIUS: u32 = 8;

/// Largest accepted visibility radius in cells.
///
/// A radius of `r` resolves `(2r + 1)²` cells on every move.
pub const MAX_VISIBILITY_RADIUS: u32 = 64;

/// Default exclusive upper bound on coins minted per cache.
pub const DEFAULT_MAX_COINS: u32 = 10;

/// Parameters of a generated world.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldConfig {
    /// Where a new player starts.
    pub origin: LatLng,

    /// Cell edge length.
    pub grid_size: f64,

    /// Probability in `[0, 1]` that a cell holds a cache.
    pub cache_probability: f64,

    /// Visibility window radius in cells.
    pub visibility_radius: u32,

    /// Coins minted per cache are in `0..max_coins`.
    pub max_coins: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            origin: LatLng::new(DEFAULT_ORIGIN_LAT, DEFAULT_ORIGIN_LNG),
            grid_size: DEFAULT_GRID_SIZE,
            cache_probability: DEFAULT_CACHE_PROBABILITY,
            visibility_radius: DEFAULT_VISIBILITY_RADIUS,
            max_coins: DEFAULT_MAX_COINS,
        }
    }
}

impl WorldConfig {
    /// Create a config with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the world origin.
    pub fn with_origin(mut self, origin: LatLng) -> Self {
        self.origin = origin;
        self
    }

    /// Set the grid size.
    pub fn with_grid_size(mut self, grid_size: f64) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Set the cache probability.
    pub fn with_cache_probability(mut self, probability: f64) -> Self {
        self.cache_probability = probability;
        self
    }

    /// Set the visibility radius.
    pub fn with_visibility_radius(mut self, radius: u32) -> Self {
        self.visibility_radius = radius;
        self
    }

    /// Set the coin cap.
    pub fn with_max_coins(mut self, max_coins: u32) -> Self {
        self.max_coins = max_coins;
        self
    }

    /// Check every parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_grid_size(self.grid_size)
            .map_err(|e| ConfigError::invalid("world.grid_size", self.grid_size, e))?;
        self.origin
            .validate_for_grid(self.grid_size)
            .map_err(|e| ConfigError::invalid("world.origin", self.origin, e))?;
        if self.visibility_radius > MAX_VISIBILITY_RADIUS {
            return Err(ConfigError::invalid(
                "world.visibility_radius",
                self.visibility_radius,
                format!("must be at most {}", MAX_VISIBILITY_RADIUS),
            ));
        }
        if !(0.0..=1.0).contains(&self.cache_probability) {
            return Err(ConfigError::invalid(
                "world.cache_probability",
                self.cache_probability,
                "must be between 0 and 1",
            ));
        }
        Ok(())
    }
}
