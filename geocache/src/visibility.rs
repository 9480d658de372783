//! Visibility window: the square of cells around the player.
//!
//! A window of radius `r` covers the inclusive `(2r + 1) × (2r + 1)` square
//! centred on the player's cell. Every cell in it is resolved through the
//! [`CacheStore`], so caches are generated lazily on first sight. Caches that
//! leave the window stay in the store; they are just not returned.

use crate::cache::{CacheGenerator, CacheStore, GeoCache};
use crate::coord::{to_cell, Cell, LatLng};

/// Square window of cells around a centre cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityWindow {
    center: Cell,
    radius: u32,
}

impl VisibilityWindow {
    /// Window around an explicit centre cell.
    pub fn new(center: Cell, radius: u32) -> Self {
        Self { center, radius }
    }

    /// Window around the cell containing `position`.
    pub fn around(position: LatLng, grid_size: f64, radius: u32) -> Self {
        Self::new(to_cell(position, grid_size), radius)
    }

    /// Centre cell.
    pub fn center(&self) -> Cell {
        self.center
    }

    /// Radius in cells.
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Number of cells covered.
    pub fn cell_count(&self) -> u64 {
        let side = 2 * u64::from(self.radius) + 1;
        side * side
    }

    /// Whether `cell` lies inside the window.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.chebyshev_distance(&self.center) <= u64::from(self.radius)
    }

    /// Cells in enumeration order: row offset outer, column offset inner,
    /// both ascending.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let r = i64::from(self.radius);
        let center = self.center;
        (-r..=r).flat_map(move |di| (-r..=r).map(move |dj| center.offset(di, dj)))
    }

    /// Resolve every cell in the window and return the caches found, in
    /// enumeration order.
    pub fn resolve<G>(&self, store: &mut CacheStore, generator: &G) -> Vec<GeoCache>
    where
        G: CacheGenerator + ?Sized,
    {
        self.cells()
            .filter_map(|cell| store.resolve(cell, generator).cloned())
            .collect()
    }
}

/// Resolve the caches visible from `center`.
///
/// Convenience wrapper over [`VisibilityWindow::around`] and
/// [`VisibilityWindow::resolve`].
pub fn resolve_visible<G>(
    store: &mut CacheStore,
    generator: &G,
    center: LatLng,
    grid_size: f64,
    radius: u32,
) -> Vec<GeoCache>
where
    G: CacheGenerator + ?Sized,
{
    VisibilityWindow::around(center, grid_size, radius).resolve(store, generator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheFactory, CacheId, Coin};
    use crate::world::WorldConfig;
    use std::cell::RefCell;
    use std::collections::HashSet;

    /// Generator that puts a cache on every cell and records each call.
    #[derive(Default)]
    struct Everywhere {
        seen: RefCell<Vec<Cell>>,
    }

    impl CacheGenerator for Everywhere {
        fn generate(&self, cell: Cell) -> Option<GeoCache> {
            self.seen.borrow_mut().push(cell);
            Some(GeoCache::new(cell, LatLng::new(0.0, 0.0), vec![Coin::new(cell, 0)]))
        }
    }

    #[test]
    fn test_window_cell_count() {
        for r in 0..5 {
            let w = VisibilityWindow::new(Cell::new(0, 0), r);
            assert_eq!(w.cells().count() as u64, w.cell_count());
        }
        assert_eq!(VisibilityWindow::new(Cell::new(0, 0), 8).cell_count(), 289);
    }

    #[test]
    fn test_window_order_row_major() {
        let w = VisibilityWindow::new(Cell::new(10, 10), 1);
        let cells: Vec<Cell> = w.cells().collect();
        assert_eq!(cells[0], Cell::new(9, 9));
        assert_eq!(cells[1], Cell::new(9, 10));
        assert_eq!(cells[2], Cell::new(9, 11));
        assert_eq!(cells[3], Cell::new(10, 9));
        assert_eq!(cells[8], Cell::new(11, 11));
    }

    #[test]
    fn test_window_cells_unique_and_contained() {
        let w = VisibilityWindow::new(Cell::new(-3, 4), 3);
        let set: HashSet<Cell> = w.cells().collect();
        assert_eq!(set.len() as u64, w.cell_count());
        assert!(set.iter().all(|c| w.contains(*c)));
        assert!(!w.contains(Cell::new(-3, 8)));
        assert!(!w.contains(Cell::new(1, 4)));
    }

    #[test]
    fn test_resolve_each_cell_once() {
        let gen = Everywhere::default();
        let mut store = CacheStore::new();
        let w = VisibilityWindow::new(Cell::new(0, 0), 2);

        let first = w.resolve(&mut store, &gen);
        let second = w.resolve(&mut store, &gen);

        assert_eq!(first.len(), 25);
        assert_eq!(first, second);
        assert_eq!(gen.seen.borrow().len(), 25);
    }

    #[test]
    fn test_overlapping_windows_only_generate_new_cells() {
        let gen = Everywhere::default();
        let mut store = CacheStore::new();

        VisibilityWindow::new(Cell::new(0, 0), 1).resolve(&mut store, &gen);
        VisibilityWindow::new(Cell::new(0, 1), 1).resolve(&mut store, &gen);

        // Moving one column east reveals one new column of three cells.
        assert_eq!(gen.seen.borrow().len(), 12);
        assert_eq!(store.len(), 12);
    }

    #[test]
    fn test_caches_outside_window_stay_in_store() {
        let gen = Everywhere::default();
        let mut store = CacheStore::new();

        VisibilityWindow::new(Cell::new(0, 0), 0).resolve(&mut store, &gen);
        let far = VisibilityWindow::new(Cell::new(100, 100), 0).resolve(&mut store, &gen);

        assert_eq!(far.len(), 1);
        assert!(store.has(&CacheId::new(Cell::new(0, 0))));
    }

    #[test]
    fn test_resolve_visible_matches_factory() {
        let config = WorldConfig::default();
        let factory = CacheFactory::new(&config);
        let mut store = CacheStore::new();

        let visible = resolve_visible(&mut store, &factory, config.origin, config.grid_size, 3);
        let window = VisibilityWindow::around(config.origin, config.grid_size, 3);
        let expected: Vec<Cell> = window.cells().filter(|c| factory.has_cache(*c)).collect();

        let got: Vec<Cell> = visible.iter().map(|c| c.cell()).collect();
        assert_eq!(got, expected);
    }
}
