//! Geocache - a procedural geocaching game core
//!
//! The world is an unbounded grid of cells over latitude/longitude space.
//! Each cell may hold a cache of coins; whether it does, and how many coins
//! it starts with, is a pure function of the cell. Caches are generated
//! lazily as they come into view, memoized so player changes stick, and can
//! be snapshotted to JSON and restored.
//!
//! # Modules
//!
//! - [`rng`]: seeded deterministic generator
//! - [`coord`]: coordinates, cells and the grid mapping
//! - [`cache`]: caches, coins, the factory and the memoizing store
//! - [`visibility`]: the square window of cells around the player
//! - [`player`]: position, inventory and history
//! - [`world`]: the game state tying it all together
//! - [`config`]: `config.ini` handling
//! - [`save`]: save files
//! - [`logging`]: `tracing` subscriber setup

pub mod cache;
pub mod config;
pub mod coord;
pub mod logging;
pub mod player;
pub mod rng;
pub mod save;
pub mod visibility;
pub mod world;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
