//! Cache system for the procedural world.
//!
//! - [`GeoCache`], [`CacheId`], [`Coin`] - the entities
//! - [`CacheGenerator`] / [`CacheFactory`] - deterministic generation
//! - [`CacheStore`] - memoizing store, the single source of truth
//! - [`serialize_cache`] / [`deserialize_cache`] - versioned snapshot records
//!
//! ```
//! use geocache::cache::{CacheFactory, CacheStore};
//! use geocache::coord::Cell;
//! use geocache::world::WorldConfig;
//!
//! let factory = CacheFactory::new(&WorldConfig::default());
//! let mut store = CacheStore::new();
//!
//! // First sight generates, later lookups read the stored entry.
//! let first = store.resolve(Cell::new(0, 3), &factory).cloned();
//! let again = store.resolve(Cell::new(0, 3), &factory).cloned();
//! assert_eq!(first, again);
//! ```

mod factory;
mod snapshot;
mod store;
mod types;

pub use factory::{CacheFactory, CacheGenerator};
pub use snapshot::{
    decode_cache, deserialize_cache, encode_cache, serialize_cache, CacheRecord, SnapshotError,
    SNAPSHOT_VERSION,
};
pub use store::{CacheStore, RestoreReport, SkippedEntry, SnapshotEntry};
pub use types::{CacheId, Coin, GeoCache, IdParseError};
