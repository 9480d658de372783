//! The world aggregate: configuration, generator, store and player.

use tracing::{debug, info, warn};

use super::config::WorldConfig;
use super::outcome::TransactionOutcome;
use super::transaction;
use crate::cache::{CacheFactory, CacheGenerator, CacheId, CacheStore, GeoCache};
use crate::config::ConfigError;
use crate::coord::{cell_anchor, to_cell, Cell, CoordError, Direction, LatLng};
use crate::player::Player;
use crate::visibility::VisibilityWindow;

/// Everything one game session owns.
///
/// Every operation is a single synchronous step: movement plus visibility
/// resolution complete before the caller sees the returned caches, and
/// nothing else can touch the store in between.
///
/// The generator is a type parameter so tests can observe or replace
/// generation; production code uses [`CacheFactory`].
#[derive(Debug, Clone)]
pub struct WorldState<G = CacheFactory> {
    config: WorldConfig,
    generator: G,
    store: CacheStore,
    player: Player,
}

impl WorldState<CacheFactory> {
    /// Start a fresh world with the player at the origin.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        let generator = CacheFactory::new(&config);
        Self::with_generator(config, generator)
    }
}

impl<G: CacheGenerator> WorldState<G> {
    /// Start a fresh world driven by a custom generator.
    pub fn with_generator(config: WorldConfig, generator: G) -> Result<Self, ConfigError> {
        config.validate()?;
        let player = Player::new(config.origin);
        info!(
            origin = %config.origin,
            grid_size = config.grid_size,
            radius = config.visibility_radius,
            "World created"
        );
        Ok(Self {
            config,
            generator,
            store: CacheStore::new(),
            player,
        })
    }

    /// World parameters.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The cache generator.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// The cache store.
    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// The cache store, for restoring snapshots.
    pub fn store_mut(&mut self) -> &mut CacheStore {
        &mut self.store
    }

    /// The player.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Swap in a different player, e.g. one loaded from a save.
    pub fn replace_player(&mut self, player: Player) {
        self.player = player;
    }

    /// Cell the player currently stands in.
    pub fn current_cell(&self) -> Cell {
        to_cell(self.player.position(), self.config.grid_size)
    }

    /// Window around the player.
    pub fn window(&self) -> VisibilityWindow {
        VisibilityWindow::new(self.current_cell(), self.config.visibility_radius)
    }

    /// Resolve the caches visible from the player's position.
    pub fn visible_caches(&mut self) -> Vec<GeoCache> {
        let window = self.window();
        let visible = window.resolve(&mut self.store, &self.generator);
        debug!(
            center = %window.center(),
            visible = visible.len(),
            known = self.store.len(),
            "Resolved visible caches"
        );
        visible
    }

    /// Step one cell in `direction` and return the new visible caches.
    ///
    /// The player always lands in the neighbouring cell. When adding one
    /// grid length falls short of the edge through rounding, the moving axis
    /// is placed on the neighbour's corner instead.
    pub fn step(&mut self, direction: Direction) -> Vec<GeoCache> {
        let grid_size = self.config.grid_size;
        let (di, dj) = direction.cell_offset();
        let expected = self.current_cell().offset(di, dj);

        let (d_lat, d_lng) = direction.displacement(grid_size);
        let mut target = self.player.position().offset(d_lat, d_lng);
        if to_cell(target, grid_size) != expected {
            let corner = cell_anchor(expected, grid_size);
            if di != 0 {
                target.lat = corner.lat;
            } else {
                target.lng = corner.lng;
            }
        }
        self.player.move_to(target);
        debug!(direction = %direction, position = %target, "Player stepped");
        self.visible_caches()
    }

    /// Jump to an externally reported position (e.g. a location sensor).
    pub fn relocate(&mut self, position: LatLng) -> Result<Vec<GeoCache>, CoordError> {
        position.validate_for_grid(self.config.grid_size)?;
        self.player.move_to(position);
        debug!(position = %position, "Player relocated");
        Ok(self.visible_caches())
    }

    /// Move the player onto a cache's anchor.
    ///
    /// Returns `None` (and leaves the player where it was) when the id is
    /// not in the store.
    pub fn center_on(&mut self, id: &CacheId) -> Option<Vec<GeoCache>> {
        let Some(cache) = self.store.get(id) else {
            warn!(cache = %id, "Center on unknown cache ignored");
            return None;
        };
        let target = cache.location();
        self.player.move_to(target);
        self.player.mark_visited(*id);
        Some(self.visible_caches())
    }

    /// Collect the top coin from cache `id`.
    pub fn collect(&mut self, id: &CacheId) -> TransactionOutcome {
        transaction::collect(&mut self.player, &mut self.store, id)
    }

    /// Deposit the most recently collected coin into cache `id`.
    pub fn deposit(&mut self, id: &CacheId) -> TransactionOutcome {
        transaction::deposit(&mut self.player, &mut self.store, id)
    }

    /// Forget every cache and return the player, empty-handed, to the origin.
    pub fn reset(&mut self) {
        self.store.clear();
        self.player = Player::new(self.config.origin);
        info!("World reset");
    }

    /// Anchor coordinate of `cell` under this world's grid.
    pub fn anchor_of(&self, cell: Cell) -> LatLng {
        cell_anchor(cell, self.config.grid_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Coin;
    use std::cell::Cell as Counter;

    /// Generator putting two coins in every cell, counting calls.
    struct Dense {
        calls: Counter<usize>,
    }

    impl CacheGenerator for Dense {
        fn generate(&self, cell: Cell) -> Option<GeoCache> {
            self.calls.set(self.calls.get() + 1);
            Some(GeoCache::new(
                cell,
                cell_anchor(cell, 0.0001),
                vec![Coin::new(cell, 0), Coin::new(cell, 1)],
            ))
        }
    }

    fn dense_world(radius: u32) -> WorldState<Dense> {
        let config = WorldConfig::default()
            .with_origin(LatLng::new(0.00005, 0.00005))
            .with_visibility_radius(radius);
        WorldState::with_generator(
            config,
            Dense {
                calls: Counter::new(0),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_new_world_starts_at_origin() {
        let world = WorldState::new(WorldConfig::default()).unwrap();
        assert_eq!(world.player().position(), LatLng::new(36.9895, -122.0627));
        assert_eq!(world.current_cell(), Cell::new(369895, -1220627));
        assert!(world.store().is_empty());
    }

    #[test]
    fn test_new_world_rejects_invalid_config() {
        let result = WorldState::new(WorldConfig::default().with_grid_size(-1.0));
        assert!(result.is_err());
    }

    #[test]
    fn test_visible_caches_cover_window() {
        let mut world = dense_world(1);
        let visible = world.visible_caches();
        assert_eq!(visible.len(), 9);
        assert_eq!(world.generator().calls.get(), 9);
    }

    #[test]
    fn test_step_moves_one_cell_and_records_history() {
        let mut world = dense_world(1);
        world.visible_caches();

        let visible = world.step(Direction::North);
        assert_eq!(world.current_cell(), Cell::new(1, 0));
        assert_eq!(visible.len(), 9);
        assert_eq!(world.player().history().len(), 1);
        // Only the new northern row is generated.
        assert_eq!(world.generator().calls.get(), 12);
    }

    #[test]
    fn test_walk_away_and_back_keeps_mutations() {
        let mut world = dense_world(1);
        world.visible_caches();
        let id = CacheId::new(Cell::new(0, 0));

        assert!(world.collect(&id).is_success());
        for _ in 0..5 {
            world.step(Direction::East);
        }
        for _ in 0..5 {
            world.step(Direction::West);
        }

        let visible = world.visible_caches();
        let cache = visible.iter().find(|c| c.id() == id).unwrap();
        assert_eq!(cache.coin_count(), 1);
        assert_eq!(world.player().coin_count(), 1);
    }

    #[test]
    fn test_relocate_rejects_non_finite() {
        let mut world = dense_world(0);
        assert!(world.relocate(LatLng::new(f64::NAN, 0.0)).is_err());
        assert!(world.player().history().is_empty());

        let visible = world.relocate(LatLng::new(0.00125, 0.00125)).unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].cell(), Cell::new(12, 12));
    }

    #[test]
    fn test_center_on_cache() {
        let mut world = dense_world(0);
        world.relocate(LatLng::new(0.00125, 0.00125)).unwrap();
        let id = CacheId::new(Cell::new(12, 12));

        world.relocate(LatLng::new(0.5, 0.5)).unwrap();
        let visible = world.center_on(&id).unwrap();

        assert_eq!(world.current_cell(), Cell::new(12, 12));
        assert_eq!(world.player().position(), world.anchor_of(Cell::new(12, 12)));
        assert_eq!(visible[0].id(), id);
        assert!(world.player().visited().contains(&id));
    }

    #[test]
    fn test_relocate_rejects_out_of_range_position() {
        let mut world = dense_world(1);
        let before = world.player().position();

        let result = world.relocate(LatLng::new(1.0e300, 0.0));
        assert!(matches!(result, Err(CoordError::OutOfRange { .. })));
        assert_eq!(world.player().position(), before);
        assert_eq!(world.generator().calls.get(), 0);
    }

    #[test]
    fn test_step_from_anchor_changes_cell() {
        let mut world = dense_world(0);
        for i in [-5, 0, 3, 369_895] {
            for j in [-1_220_627, -7, 0, 11] {
                let start = Cell::new(i, j);
                for dir in Direction::ALL {
                    world.relocate(world.anchor_of(start)).unwrap();
                    world.step(dir);
                    let (di, dj) = dir.cell_offset();
                    assert_eq!(world.current_cell(), start.offset(di, dj), "{} from {}", dir, start);
                }
            }
        }
    }

    #[test]
    fn test_center_on_unknown_cache() {
        let mut world = dense_world(0);
        let before = world.player().position();
        assert!(world.center_on(&CacheId::new(Cell::new(5, 5))).is_none());
        assert_eq!(world.player().position(), before);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut world = dense_world(1);
        world.visible_caches();
        world.collect(&CacheId::new(Cell::new(0, 0)));
        world.step(Direction::South);

        world.reset();

        assert!(world.store().is_empty());
        assert_eq!(world.player().coin_count(), 0);
        assert!(world.player().history().is_empty());
        assert_eq!(world.player().position(), world.config().origin);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_step_moves_exactly_one_cell(
                lat in -90.0..90.0_f64,
                lng in -180.0..180.0_f64,
                dir in 0usize..4
            ) {
                let mut world = dense_world(0);
                world.relocate(LatLng::new(lat, lng)).unwrap();
                let start = world.current_cell();
                let dir = Direction::ALL[dir];

                world.step(dir);

                let (di, dj) = dir.cell_offset();
                prop_assert_eq!(world.current_cell(), start.offset(di, dj));
            }
        }
    }

    #[test]
    fn test_factory_world_is_reproducible() {
        let mut a = WorldState::new(WorldConfig::default()).unwrap();
        let mut b = WorldState::new(WorldConfig::default()).unwrap();
        assert_eq!(a.visible_caches(), b.visible_caches());
        assert_eq!(a.step(Direction::West), b.step(Direction::West));
    }
}
