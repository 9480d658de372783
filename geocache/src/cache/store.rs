//! The cache store: single source of truth for every generated cache.
//!
//! The store memoizes generation. Once a cell has been resolved, its cache
//! (or the fact that it has none) is remembered for the rest of the session
//! and the generator is never consulted for it again. Mutations made through
//! [`CacheStore::get_mut`] land directly in the stored entry, so walking away
//! and back shows the mutated state rather than a regenerated one.
//!
//! Entries are never evicted. The store only grows during a session.

use std::collections::{BTreeMap, HashSet};

use tracing::{trace, warn};

use super::factory::CacheGenerator;
use super::snapshot::{decode_cache, encode_cache, SnapshotError};
use super::types::{CacheId, GeoCache};
use crate::coord::Cell;

/// One serialized store entry: cache id and its encoded record.
pub type SnapshotEntry = (String, serde_json::Value);

/// An entry rejected during [`CacheStore::restore`].
#[derive(Debug)]
pub struct SkippedEntry {
    /// Key of the rejected entry as it appeared in the snapshot.
    pub id: String,
    /// Why it was rejected.
    pub error: SnapshotError,
}

/// Result of restoring a snapshot.
#[derive(Debug, Default)]
pub struct RestoreReport {
    /// Number of entries restored.
    pub restored: usize,
    /// Entries that failed to decode and were left out.
    pub skipped: Vec<SkippedEntry>,
}

impl RestoreReport {
    /// Whether every entry was restored.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Mapping from cache identity to cache state.
#[derive(Debug, Clone, Default)]
pub struct CacheStore {
    caches: BTreeMap<CacheId, GeoCache>,
    /// Cells already known to hold no cache. Session-only: not snapshotted,
    /// since vacancy is fully derivable from the generator.
    vacant: HashSet<Cell>,
}

impl CacheStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a cache with this id exists.
    pub fn has(&self, id: &CacheId) -> bool {
        self.caches.contains_key(id)
    }

    /// Look up a cache.
    pub fn get(&self, id: &CacheId) -> Option<&GeoCache> {
        self.caches.get(id)
    }

    /// Look up a cache for mutation. Changes are visible to every later read.
    pub fn get_mut(&mut self, id: &CacheId) -> Option<&mut GeoCache> {
        self.caches.get_mut(id)
    }

    /// Insert or replace a cache under its own id.
    pub fn put(&mut self, cache: GeoCache) {
        self.vacant.remove(&cache.cell());
        self.caches.insert(cache.id(), cache);
    }

    /// Record that `cell` has no cache.
    pub fn mark_vacant(&mut self, cell: Cell) {
        if !self.caches.contains_key(&CacheId::new(cell)) {
            self.vacant.insert(cell);
        }
    }

    /// Whether `cell` is known to hold no cache.
    pub fn is_vacant(&self, cell: Cell) -> bool {
        self.vacant.contains(&cell)
    }

    /// Whether `cell` has been resolved before, with or without a cache.
    pub fn is_resolved(&self, cell: Cell) -> bool {
        self.vacant.contains(&cell) || self.caches.contains_key(&CacheId::new(cell))
    }

    /// Resolve a cell: return the stored cache, generating it on first sight.
    ///
    /// The generator runs only for cells never resolved before.
    pub fn resolve<G>(&mut self, cell: Cell, generator: &G) -> Option<&GeoCache>
    where
        G: CacheGenerator + ?Sized,
    {
        if self.is_resolved(cell) {
            trace!(cell = %cell, "Cache store hit");
        } else {
            generator.try_generate(cell, self);
        }
        self.caches.get(&CacheId::new(cell))
    }

    /// Number of caches held.
    pub fn len(&self) -> usize {
        self.caches.len()
    }

    /// Whether the store holds no caches.
    pub fn is_empty(&self) -> bool {
        self.caches.is_empty()
    }

    /// Iterate caches in id order.
    pub fn iter(&self) -> impl Iterator<Item = &GeoCache> {
        self.caches.values()
    }

    /// Drop every cache and vacancy marker.
    pub fn clear(&mut self) {
        self.caches.clear();
        self.vacant.clear();
    }

    /// Serialize every cache as an ordered list of `(id, record)` pairs.
    pub fn snapshot(&self) -> Vec<SnapshotEntry> {
        self.caches
            .values()
            .filter_map(|cache| match encode_cache(cache) {
                Ok(value) => Some((cache.id().to_string(), value)),
                Err(e) => {
                    warn!(cache = %cache.id(), error = %e, "Failed to encode cache");
                    None
                }
            })
            .collect()
    }

    /// Replace the store's contents with a snapshot.
    ///
    /// Entries that fail to decode are skipped individually; the rest are
    /// restored. Later duplicates of an id replace earlier ones.
    pub fn restore<I>(&mut self, entries: I) -> RestoreReport
    where
        I: IntoIterator<Item = SnapshotEntry>,
    {
        self.clear();

        let mut report = RestoreReport::default();
        for (id, value) in entries {
            match decode_cache(&id, &value) {
                Ok(cache) => {
                    self.put(cache);
                    report.restored += 1;
                }
                Err(error) => {
                    warn!(cache = %id, error = %error, "Skipping malformed snapshot entry");
                    report.skipped.push(SkippedEntry { id, error });
                }
            }
        }
        report
    }

    /// Build a new store from a snapshot.
    pub fn from_snapshot<I>(entries: I) -> (Self, RestoreReport)
    where
        I: IntoIterator<Item = SnapshotEntry>,
    {
        let mut store = Self::new();
        let report = store.restore(entries);
        (store, report)
    }
}
