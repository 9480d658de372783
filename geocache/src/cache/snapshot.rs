//! Serialized form of a cache, decoupled from the in-memory entity.
//!
//! [`serialize_cache`] and [`deserialize_cache`] convert between
//! [`GeoCache`] and [`CacheRecord`]. Records carry a format version and are
//! validated on the way back in, so one corrupted entry can be rejected
//! without touching the rest of a store.
//!
//! # Record Format (version 1)
//!
//! ```json
//! {
//!   "version": 1,
//!   "id": "cache_369895_-1220627",
//!   "location": { "lat": 36.9895, "lng": -122.0627 },
//!   "coins": ["369895:-1220627#0", "369895:-1220627#1"]
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{CacheId, Coin, GeoCache, IdParseError};
use crate::coord::LatLng;

/// Current record format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors decoding a single snapshot entry.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The entry is not a well-formed record.
    #[error("malformed record: {0}")]
    Json(#[from] serde_json::Error),

    /// The record was written by a newer format.
    #[error("unsupported snapshot version {found} (max supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Cache or coin identifier failed to parse.
    #[error(transparent)]
    InvalidId(#[from] IdParseError),

    /// The anchor coordinate is not finite.
    #[error("invalid location ({lat}, {lng})")]
    InvalidLocation { lat: f64, lng: f64 },

    /// The entry key disagrees with the id stored inside the record.
    #[error("entry key '{key}' does not match record id '{record}'")]
    IdMismatch { key: String, record: String },
}

/// Plain serialized view of a [`GeoCache`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    pub version: u32,
    pub id: String,
    pub location: LatLng,
    /// Coin ids, bottom of the stack first.
    pub coins: Vec<String>,
}

/// Convert a cache into its serialized record.
pub fn serialize_cache(cache: &GeoCache) -> CacheRecord {
    CacheRecord {
        version: SNAPSHOT_VERSION,
        id: cache.id().to_string(),
        location: cache.location(),
        coins: cache.coins().iter().map(Coin::to_string).collect(),
    }
}

/// Rebuild a cache from a record, validating every field.
pub fn deserialize_cache(record: &CacheRecord) -> Result<GeoCache, SnapshotError> {
    if record.version > SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            found: record.version,
            supported: SNAPSHOT_VERSION,
        });
    }

    let id: CacheId = record.id.parse()?;

    let LatLng { lat, lng } = record.location;
    if !lat.is_finite() || !lng.is_finite() {
        return Err(SnapshotError::InvalidLocation { lat, lng });
    }

    let coins = record
        .coins
        .iter()
        .map(|c| c.parse::<Coin>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GeoCache::new(id.cell(), record.location, coins))
}

/// Serialize a cache straight to a JSON value.
pub fn encode_cache(cache: &GeoCache) -> Result<serde_json::Value, SnapshotError> {
    Ok(serde_json::to_value(serialize_cache(cache))?)
}

/// Decode a JSON value into a cache, checking it against its entry key.
pub fn decode_cache(key: &str, value: &serde_json::Value) -> Result<GeoCache, SnapshotError> {
    let record: CacheRecord = serde_json::from_value(value.clone())?;
    if record.id != key {
        return Err(SnapshotError::IdMismatch {
            key: key.to_string(),
            record: record.id,
        });
    }
    deserialize_cache(&record)
}
