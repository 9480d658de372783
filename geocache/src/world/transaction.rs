//! Coin transfers between a single cache and the player's inventory.
//!
//! Each transfer touches exactly one cache and the inventory. Caches are
//! mutated in place inside the store, so the change is already written back
//! when the function returns. A failed transfer changes nothing.

use tracing::{info, warn};

use super::outcome::TransactionOutcome;
use crate::cache::{CacheId, CacheStore};
use crate::player::Player;

/// Move the top coin of cache `id` into the player's inventory.
pub fn collect(player: &mut Player, store: &mut CacheStore, id: &CacheId) -> TransactionOutcome {
    let Some(cache) = store.get_mut(id) else {
        warn!(cache = %id, "Collect from unknown cache ignored");
        return TransactionOutcome::UnknownCache(*id);
    };

    let Some(coin) = cache.pop_coin() else {
        return TransactionOutcome::EmptyCache(*id);
    };

    player.receive_coin(coin);
    player.mark_visited(*id);
    info!(cache = %id, coin = %coin, held = player.coin_count(), "Collected coin");

    TransactionOutcome::Collected {
        cache: *id,
        coin,
        held: player.coin_count(),
    }
}

/// Move the player's most recently received coin onto cache `id`.
pub fn deposit(player: &mut Player, store: &mut CacheStore, id: &CacheId) -> TransactionOutcome {
    let Some(cache) = store.get_mut(id) else {
        warn!(cache = %id, "Deposit into unknown cache ignored");
        return TransactionOutcome::UnknownCache(*id);
    };

    let Some(coin) = player.take_coin() else {
        return TransactionOutcome::EmptyInventory;
    };

    cache.push_coin(coin);
    let cache_coins = cache.coin_count();
    player.mark_visited(*id);
    info!(cache = %id, coin = %coin, cache_coins, "Deposited coin");

    TransactionOutcome::Deposited {
        cache: *id,
        coin,
        cache_coins,
    }
}
