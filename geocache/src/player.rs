//! The player: position, held coins, visited caches and movement history.

use std::collections::BTreeSet;

use crate::cache::{CacheId, Coin};
use crate::coord::LatLng;

/// Player state.
///
/// The inventory is ordered; [`Player::take_coin`] gives back the most
/// recently received coin, so a collect followed by a deposit returns the
/// same coin to the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    position: LatLng,
    inventory: Vec<Coin>,
    visited: BTreeSet<CacheId>,
    history: Vec<LatLng>,
}

impl Player {
    /// A new player standing at `position` with nothing in hand.
    pub fn new(position: LatLng) -> Self {
        Self {
            position,
            inventory: Vec::new(),
            visited: BTreeSet::new(),
            history: Vec::new(),
        }
    }

    /// Rebuild a player from saved parts.
    pub fn from_parts(
        position: LatLng,
        inventory: Vec<Coin>,
        visited: BTreeSet<CacheId>,
        history: Vec<LatLng>,
    ) -> Self {
        Self {
            position,
            inventory,
            visited,
            history,
        }
    }

    /// Current position.
    pub fn position(&self) -> LatLng {
        self.position
    }

    /// Move to `position`, recording it in the movement history.
    pub fn move_to(&mut self, position: LatLng) {
        self.position = position;
        self.history.push(position);
    }

    /// Held coins, oldest first.
    pub fn inventory(&self) -> &[Coin] {
        &self.inventory
    }

    /// Number of held coins.
    pub fn coin_count(&self) -> usize {
        self.inventory.len()
    }

    /// Add a coin to the inventory.
    pub fn receive_coin(&mut self, coin: Coin) {
        self.inventory.push(coin);
    }

    /// Remove the most recently received coin.
    pub fn take_coin(&mut self) -> Option<Coin> {
        self.inventory.pop()
    }

    /// Remember that the player interacted with a cache.
    pub fn mark_visited(&mut self, id: CacheId) {
        self.visited.insert(id);
    }

    /// Caches the player has interacted with.
    pub fn visited(&self) -> &BTreeSet<CacheId> {
        &self.visited
    }

    /// Every position moved to, in order.
    pub fn history(&self) -> &[LatLng] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Cell;

    #[test]
    fn test_new_player_is_empty() {
        let p = Player::new(LatLng::new(1.0, 2.0));
        assert_eq!(p.position(), LatLng::new(1.0, 2.0));
        assert_eq!(p.coin_count(), 0);
        assert!(p.history().is_empty());
        assert!(p.visited().is_empty());
    }

    #[test]
    fn test_move_records_history() {
        let mut p = Player::new(LatLng::new(0.0, 0.0));
        p.move_to(LatLng::new(0.1, 0.0));
        p.move_to(LatLng::new(0.1, 0.1));
        assert_eq!(p.position(), LatLng::new(0.1, 0.1));
        assert_eq!(
            p.history(),
            &[LatLng::new(0.1, 0.0), LatLng::new(0.1, 0.1)]
        );
    }

    #[test]
    fn test_inventory_is_lifo() {
        let mut p = Player::new(LatLng::new(0.0, 0.0));
        let a = Coin::new(Cell::new(0, 0), 0);
        let b = Coin::new(Cell::new(1, 1), 3);
        p.receive_coin(a);
        p.receive_coin(b);
        assert_eq!(p.take_coin(), Some(b));
        assert_eq!(p.take_coin(), Some(a));
        assert_eq!(p.take_coin(), None);
    }

    #[test]
    fn test_visited_deduplicates() {
        let mut p = Player::new(LatLng::new(0.0, 0.0));
        let id = CacheId::new(Cell::new(4, 4));
        p.mark_visited(id);
        p.mark_visited(id);
        assert_eq!(p.visited().len(), 1);
    }
}
