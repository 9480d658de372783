//! World state and lifecycle.
//!
//! [`WorldState`] replaces module-level globals with one explicit aggregate:
//! configuration, cache generator, cache store and player. Every gameplay
//! operation goes through it and returns plain data for a renderer to show.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        WorldState                         │
//! │                                                          │
//! │  step / relocate / center_on                             │
//! │     └─► Player.move_to ─► VisibilityWindow.resolve       │
//! │                              └─► CacheStore.resolve      │
//! │                                     └─► CacheFactory     │
//! │                                         (cache miss only)│
//! │                                                          │
//! │  collect / deposit ─► transaction ─► TransactionOutcome  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use geocache::coord::Direction;
//! use geocache::world::{WorldConfig, WorldState};
//!
//! let mut world = WorldState::new(WorldConfig::default())?;
//! let visible = world.step(Direction::North);
//!
//! if let Some(cache) = visible.iter().find(|c| !c.is_empty()) {
//!     let outcome = world.collect(&cache.id());
//!     assert!(outcome.is_success());
//! }
//! # Ok::<(), geocache::config::ConfigError>(())
//! ```

mod config;
mod outcome;
mod state;
mod transaction;

pub use config::{
    WorldConfig, DEFAULT_CACHE_PROBABILITY, DEFAULT_GRID_SIZE, DEFAULT_MAX_COINS,
    DEFAULT_ORIGIN_LAT, DEFAULT_ORIGIN_LNG, DEFAULT_VISIBILITY_RADIUS, MAX_VISIBILITY_RADIUS,
};
pub use outcome::TransactionOutcome;
pub use state::WorldState;
pub use transaction::{collect, deposit};
