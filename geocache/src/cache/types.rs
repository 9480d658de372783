//! Core cache types: identifiers, coins and the cache entity itself.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coord::{Cell, LatLng};

/// Error parsing a cache or coin identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    /// Not of the form `cache_{i}_{j}`.
    #[error("invalid cache id '{0}' (expected cache_<i>_<j>)")]
    InvalidCacheId(String),

    /// Not of the form `{i}:{j}#{serial}`.
    #[error("invalid coin id '{0}' (expected <i>:<j>#<serial>)")]
    InvalidCoinId(String),
}

/// Cache id pattern: `cache_<i>_<j>` with signed integers.
fn cache_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^cache_(-?\d+)_(-?\d+)$").unwrap())
}

/// Coin id pattern: `<i>:<j>#<serial>`.
fn coin_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(-?\d+):(-?\d+)#(\d+)$").unwrap())
}

/// Stable identity of a cache, derived from its origin cell.
///
/// Renders as `cache_{i}_{j}` and is used as the store key. Ordering follows
/// the cell (`i` then `j`), which keeps store snapshots deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CacheId(Cell);

impl CacheId {
    /// Identity of the cache generated for `cell`.
    pub const fn new(cell: Cell) -> Self {
        Self(cell)
    }

    /// The origin cell.
    pub const fn cell(&self) -> Cell {
        self.0
    }
}

impl From<Cell> for CacheId {
    fn from(cell: Cell) -> Self {
        Self(cell)
    }
}

impl fmt::Display for CacheId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cache_{}_{}", self.0.i, self.0.j)
    }
}

impl FromStr for CacheId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || IdParseError::InvalidCacheId(s.to_string());
        let captures = cache_id_pattern().captures(s.trim()).ok_or_else(err)?;
        let i = captures[1].parse::<i64>().map_err(|_| err())?;
        let j = captures[2].parse::<i64>().map_err(|_| err())?;
        Ok(Self(Cell::new(i, j)))
    }
}

impl From<CacheId> for String {
    fn from(id: CacheId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for CacheId {
    type Error = IdParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A single coin, identified by its minting cell and a serial unique within
/// that cell.
///
/// Coins are minted only when a cache is first generated. They keep their
/// identity as they move between caches and the player's inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Coin {
    /// Cell whose cache minted this coin.
    pub cell: Cell,
    /// Serial number within the minting cell (0-based).
    pub serial: u32,
}

impl Coin {
    /// Create a new coin identity.
    pub const fn new(cell: Cell, serial: u32) -> Self {
        Self { cell, serial }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}#{}", self.cell.i, self.cell.j, self.serial)
    }
}

impl FromStr for Coin {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || IdParseError::InvalidCoinId(s.to_string());
        let captures = coin_id_pattern().captures(s.trim()).ok_or_else(err)?;
        let i = captures[1].parse::<i64>().map_err(|_| err())?;
        let j = captures[2].parse::<i64>().map_err(|_| err())?;
        let serial = captures[3].parse::<u32>().map_err(|_| err())?;
        Ok(Self::new(Cell::new(i, j), serial))
    }
}

impl From<Coin> for String {
    fn from(coin: Coin) -> Self {
        coin.to_string()
    }
}

impl TryFrom<String> for Coin {
    type Error = IdParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A cache: a world entity anchored to a cell, holding a stack of coins.
///
/// Coins behave as a stack: collecting pops the most recently added coin and
/// depositing pushes onto the top.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoCache {
    id: CacheId,
    location: LatLng,
    coins: Vec<Coin>,
}

impl GeoCache {
    /// Create a cache for `cell` at `location` with the given coins
    /// (bottom of the stack first).
    pub fn new(cell: Cell, location: LatLng, coins: Vec<Coin>) -> Self {
        Self {
            id: CacheId::new(cell),
            location,
            coins,
        }
    }

    /// Store key of this cache.
    pub fn id(&self) -> CacheId {
        self.id
    }

    /// Origin cell.
    pub fn cell(&self) -> Cell {
        self.id.cell()
    }

    /// Anchor coordinate.
    pub fn location(&self) -> LatLng {
        self.location
    }

    /// Coins, bottom of the stack first.
    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    /// Number of coins currently held.
    pub fn coin_count(&self) -> usize {
        self.coins.len()
    }

    /// Whether the cache holds no coins.
    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    /// The coin a collect would take, if any.
    pub fn top(&self) -> Option<&Coin> {
        self.coins.last()
    }

    /// Remove and return the most recently added coin.
    pub fn pop_coin(&mut self) -> Option<Coin> {
        self.coins.pop()
    }

    /// Add a coin on top of the stack.
    pub fn push_coin(&mut self, coin: Coin) {
        self.coins.push(coin);
    }
}

impl fmt::Display for GeoCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {} - Coins: {}",
            self.id,
            self.location,
            self.coins.len()
        )
    }
}
