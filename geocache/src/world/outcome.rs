//! Outcomes of player transactions.
//!
//! Failed transactions are ordinary values, not errors: the UI decides how to
//! tell the player, and no state has changed.

use std::fmt;

use crate::cache::{CacheId, Coin};

/// Result of a collect or deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionOutcome {
    /// A coin moved from the cache to the player.
    Collected {
        cache: CacheId,
        coin: Coin,
        /// Coins held by the player afterwards.
        held: usize,
    },

    /// A coin moved from the player to the cache.
    Deposited {
        cache: CacheId,
        coin: Coin,
        /// Coins left in the cache's stack afterwards.
        cache_coins: usize,
    },

    /// The cache had no coins to collect.
    EmptyCache(CacheId),

    /// The player had no coins to deposit.
    EmptyInventory,

    /// No cache with this id exists in the store.
    UnknownCache(CacheId),
}

impl TransactionOutcome {
    /// Whether a coin actually moved.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            TransactionOutcome::Collected { .. } | TransactionOutcome::Deposited { .. }
        )
    }

    /// The coin that moved, if any.
    pub fn coin(&self) -> Option<Coin> {
        match self {
            TransactionOutcome::Collected { coin, .. }
            | TransactionOutcome::Deposited { coin, .. } => Some(*coin),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionOutcome::Collected { coin, held, .. } => {
                write!(f, "Collected coin {}! Total coins: {}", coin, held)
            }
            TransactionOutcome::Deposited { cache, coin, .. } => {
                write!(f, "Deposited coin {} into {}", coin, cache)
            }
            TransactionOutcome::EmptyCache(cache) => {
                write!(f, "{} has no coins left", cache)
            }
            TransactionOutcome::EmptyInventory => write!(f, "You have no coins to deposit"),
            TransactionOutcome::UnknownCache(cache) => write!(f, "No cache named {}", cache),
        }
    }
}
