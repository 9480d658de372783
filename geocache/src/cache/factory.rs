//! Deterministic cache generation.
//!
//! The [`CacheGenerator`] trait is the seam between the store and whatever
//! decides cache contents. [`CacheFactory`] is the production implementation:
//! existence and coin count are pure functions of the cell, driven by
//! [`crate::rng::deterministic`].

use tracing::debug;

use super::store::CacheStore;
use super::types::{Coin, GeoCache};
use crate::coord::{cell_anchor, Cell};
use crate::rng::deterministic;
use crate::world::WorldConfig;

/// Decides whether a cell holds a cache and what it initially contains.
pub trait CacheGenerator {
    /// Pure generation decision for `cell`. Never touches a store.
    ///
    /// Calling this twice for the same cell must yield equal results.
    fn generate(&self, cell: Cell) -> Option<GeoCache>;

    /// Generate and register the result in `store` before returning it.
    ///
    /// Cells without a cache are recorded as vacant so they are not
    /// generated again.
    fn try_generate(&self, cell: Cell, store: &mut CacheStore) -> Option<GeoCache> {
        let generated = self.generate(cell);
        match &generated {
            Some(cache) => store.put(cache.clone()),
            None => store.mark_vacant(cell),
        }
        generated
    }
}

/// Seeded cache factory.
///
/// # Seeding
///
/// - Existence: `deterministic(i * existence_stride + j) < cache_probability`.
///   The stride is the world's visibility radius, so changing the radius
///   changes which cells hold caches.
/// - Coin count: `floor(deterministic(i + j + 1) * max_coins)`.
#[derive(Debug, Clone)]
pub struct CacheFactory {
    grid_size: f64,
    cache_probability: f64,
    existence_stride: i64,
    max_coins: u32,
}

impl CacheFactory {
    /// Create a factory from world parameters.
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            grid_size: config.grid_size,
            cache_probability: config.cache_probability,
            existence_stride: i64::from(config.visibility_radius),
            max_coins: config.max_coins,
        }
    }

    /// Seed for the existence test of `cell`.
    #[inline]
    pub fn existence_seed(&self, cell: Cell) -> i64 {
        cell.i
            .wrapping_mul(self.existence_stride)
            .wrapping_add(cell.j)
    }

    /// Seed for the initial coin count of `cell`.
    #[inline]
    pub fn coin_count_seed(cell: Cell) -> i64 {
        cell.i.wrapping_add(cell.j).wrapping_add(1)
    }

    /// Whether `cell` holds a cache.
    pub fn has_cache(&self, cell: Cell) -> bool {
        deterministic(self.existence_seed(cell)) < self.cache_probability
    }

    /// Number of coins minted when the cache at `cell` is born.
    pub fn initial_coin_count(&self, cell: Cell) -> u32 {
        let roll = deterministic(Self::coin_count_seed(cell));
        (roll * f64::from(self.max_coins)).floor() as u32
    }
}

impl CacheGenerator for CacheFactory {
    fn generate(&self, cell: Cell) -> Option<GeoCache> {
        if !self.has_cache(cell) {
            return None;
        }

        let count = self.initial_coin_count(cell);
        let coins = (0..count).map(|serial| Coin::new(cell, serial)).collect();
        let cache = GeoCache::new(cell, cell_anchor(cell, self.grid_size), coins);

        debug!(cache = %cache.id(), coins = count, "Generated cache");
        Some(cache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheId;

    fn factory() -> CacheFactory {
        CacheFactory::new(&WorldConfig::default())
    }

    /// First cell at or after `start` (scanning j) that holds a cache.
    fn find_cache_cell(factory: &CacheFactory, start: Cell) -> Cell {
        (0..100_000)
            .map(|dj| start.offset(0, dj))
            .find(|c| factory.has_cache(*c))
            .expect("no cache found in scan range")
    }

    #[test]
    fn test_existence_seed_uses_radius_stride() {
        let f = factory();
        assert_eq!(f.existence_seed(Cell::new(2, 3)), 2 * 8 + 3);
        assert_eq!(CacheFactory::coin_count_seed(Cell::new(2, 3)), 6);
    }

    #[test]
    fn test_generate_matches_existence_test() {
        let f = factory();
        for j in -50..50 {
            let cell = Cell::new(369895, -1220627 + j);
            assert_eq!(f.generate(cell).is_some(), f.has_cache(cell));
        }
    }

    #[test]
    fn test_generated_cache_contents() {
        let f = factory();
        let cell = find_cache_cell(&f, Cell::new(369895, -1220627));
        let cache = f.generate(cell).unwrap();

        assert_eq!(cache.id(), CacheId::new(cell));
        assert_eq!(cache.location(), cell_anchor(cell, 0.0001));
        assert_eq!(cache.coin_count() as u32, f.initial_coin_count(cell));
        assert!(cache.coin_count() < 10);
        for (serial, coin) in cache.coins().iter().enumerate() {
            assert_eq!(*coin, Coin::new(cell, serial as u32));
        }
    }

    #[test]
    fn test_generate_is_idempotent() {
        let f = factory();
        let cell = find_cache_cell(&f, Cell::new(-20, -20));
        assert_eq!(f.generate(cell), f.generate(cell));
    }

    #[test]
    fn test_zero_probability_generates_nothing() {
        let f = CacheFactory::new(&WorldConfig::default().with_cache_probability(0.0));
        for j in 0..500 {
            assert!(f.generate(Cell::new(0, j)).is_none());
        }
    }

    #[test]
    fn test_full_probability_generates_everywhere() {
        let f = CacheFactory::new(&WorldConfig::default().with_cache_probability(1.0));
        for j in 0..100 {
            assert!(f.generate(Cell::new(3, j)).is_some());
        }
    }

    #[test]
    fn test_try_generate_writes_through() {
        let f = factory();
        let hit = find_cache_cell(&f, Cell::new(0, 0));
        let miss = (0..1000)
            .map(|dj| Cell::new(1, dj))
            .find(|c| !f.has_cache(*c))
            .unwrap();

        let mut store = CacheStore::new();
        let cache = f.try_generate(hit, &mut store).unwrap();
        assert_eq!(store.get(&cache.id()), Some(&cache));

        assert!(f.try_generate(miss, &mut store).is_none());
        assert!(store.is_vacant(miss));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_extreme_cells_do_not_overflow() {
        let f = factory();
        let _ = f.generate(Cell::new(i64::MAX, i64::MAX));
        let _ = f.generate(Cell::new(i64::MIN, i64::MIN));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_generation_deterministic(
                i in -10_000_000_i64..10_000_000,
                j in -10_000_000_i64..10_000_000
            ) {
                let f = factory();
                let cell = Cell::new(i, j);
                prop_assert_eq!(f.generate(cell), f.generate(cell));
            }

            #[test]
            fn test_coin_count_below_max(
                i in -10_000_000_i64..10_000_000,
                j in -10_000_000_i64..10_000_000,
                max in 0u32..50
            ) {
                let f = CacheFactory::new(&WorldConfig::default().with_max_coins(max));
                let count = f.initial_coin_count(Cell::new(i, j));
                prop_assert!(count < max.max(1));
            }
        }
    }
}
