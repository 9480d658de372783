//! Game save files.
//!
//! A save captures the player (position, held coins, visited caches,
//! movement history) and a snapshot of the cache store as versioned JSON.
//! Loading is tolerant: a malformed cache entry or coin id is dropped with a
//! warning, and everything else is restored.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::cache::{CacheGenerator, CacheId, Coin, IdParseError, RestoreReport, SnapshotEntry};
use crate::coord::{CoordError, LatLng};
use crate::player::Player;
use crate::world::WorldState;

/// Current save format version.
pub const SAVE_FORMAT_VERSION: u32 = 1;

/// Errors reading or writing a save file.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Filesystem failure.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not a valid save.
    #[error("Failed to parse save file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The save could not be encoded.
    #[error("Failed to encode save data: {0}")]
    Encode(#[from] serde_json::Error),

    /// The file was written by a newer format.
    #[error("Unsupported save format version {found} (max supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// Saved player state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSave {
    pub position: LatLng,
    /// Held coin ids, oldest first.
    pub inventory: Vec<String>,
    #[serde(default)]
    pub visited: Vec<String>,
    #[serde(default)]
    pub history: Vec<LatLng>,
}

/// Everything persisted between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSave {
    pub version: u32,
    /// RFC 3339 timestamp of when the save was taken.
    pub saved_at: String,
    pub player: PlayerSave,
    /// Cache store snapshot as `[id, record]` pairs.
    pub caches: Vec<SnapshotEntry>,
}

/// What happened while applying a save.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Cache store restore result.
    pub caches: RestoreReport,
    /// Inventory and visited ids that failed to parse.
    pub skipped_ids: Vec<IdParseError>,
    /// Why the saved position was rejected; the player restarts at the origin.
    pub invalid_position: Option<CoordError>,
}

impl LoadReport {
    /// Whether everything in the save was restored.
    pub fn is_clean(&self) -> bool {
        self.caches.is_clean() && self.skipped_ids.is_empty() && self.invalid_position.is_none()
    }
}

impl GameSave {
    /// Capture the current state of a world.
    pub fn capture<G>(world: &WorldState<G>) -> Self
    where
        G: CacheGenerator,
    {
        let player = world.player();
        Self {
            version: SAVE_FORMAT_VERSION,
            saved_at: chrono::Local::now().to_rfc3339(),
            player: PlayerSave {
                position: player.position(),
                inventory: player.inventory().iter().map(Coin::to_string).collect(),
                visited: player.visited().iter().map(CacheId::to_string).collect(),
                history: player.history().to_vec(),
            },
            caches: world.store().snapshot(),
        }
    }

    /// Replace a world's store and player with the saved state.
    pub fn apply<G>(self, world: &mut WorldState<G>) -> LoadReport
    where
        G: CacheGenerator,
    {
        let mut report = LoadReport {
            caches: world.store_mut().restore(self.caches),
            skipped_ids: Vec::new(),
            invalid_position: None,
        };

        let mut position = self.player.position;
        if let Err(e) = position.validate_for_grid(world.config().grid_size) {
            warn!(position = %position, error = %e, "Saved position rejected, starting at origin");
            position = world.config().origin;
            report.invalid_position = Some(e);
        }

        let inventory = parse_ids::<Coin>(&self.player.inventory, &mut report.skipped_ids);
        let visited: BTreeSet<CacheId> =
            parse_ids::<CacheId>(&self.player.visited, &mut report.skipped_ids)
                .into_iter()
                .collect();

        world.replace_player(Player::from_parts(
            position,
            inventory,
            visited,
            self.player.history,
        ));
        report
    }
}

fn parse_ids<T>(raw: &[String], skipped: &mut Vec<IdParseError>) -> Vec<T>
where
    T: std::str::FromStr<Err = IdParseError>,
{
    raw.iter()
        .filter_map(|s| match s.parse::<T>() {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(error = %e, "Skipping malformed id in save");
                skipped.push(e);
                None
            }
        })
        .collect()
}

/// Write a save file, creating parent directories.
///
/// The data is written to a sibling temporary file first and renamed into
/// place, so an interrupted write never truncates an existing save.
pub fn write_save(path: &Path, save: &GameSave) -> Result<(), SaveError> {
    let io_err = |source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let json = serde_json::to_string_pretty(save)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}

/// Read a save file. Returns `Ok(None)` if it does not exist.
pub fn read_save(path: &Path) -> Result<Option<GameSave>, SaveError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SaveError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let save: GameSave = serde_json::from_str(&data).map_err(|source| SaveError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if save.version > SAVE_FORMAT_VERSION {
        return Err(SaveError::UnsupportedVersion {
            found: save.version,
            supported: SAVE_FORMAT_VERSION,
        });
    }
    Ok(Some(save))
}

/// Capture `world` and write it to `path`.
pub fn save_world<G>(path: &Path, world: &WorldState<G>) -> Result<(), SaveError>
where
    G: CacheGenerator,
{
    let save = GameSave::capture(world);
    let caches = save.caches.len();
    write_save(path, &save)?;
    info!(path = %path.display(), caches, "Game saved");
    Ok(())
}

/// Load the save at `path` into `world`.
///
/// Returns `Ok(None)` and leaves the world untouched if there is no save.
pub fn load_world<G>(path: &Path, world: &mut WorldState<G>) -> Result<Option<LoadReport>, SaveError>
where
    G: CacheGenerator,
{
    let Some(save) = read_save(path)? else {
        return Ok(None);
    };
    let report = save.apply(world);
    info!(
        path = %path.display(),
        caches = report.caches.restored,
        skipped = report.caches.skipped.len() + report.skipped_ids.len(),
        "Game loaded"
    );
    Ok(Some(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Direction;
    use crate::world::WorldConfig;
    use serde_json::json;
    use tempfile::TempDir;

    /// A world with some history, held coins and mutated caches.
    fn played_world() -> WorldState {
        let mut world = WorldState::new(WorldConfig::default()).unwrap();
        let mut visible = world.visible_caches();
        for dir in [Direction::North, Direction::East, Direction::East] {
            visible = world.step(dir);
        }
        let ids: Vec<CacheId> = visible
            .iter()
            .filter(|c| !c.is_empty())
            .map(|c| c.id())
            .collect();
        for id in ids.iter().take(3) {
            world.collect(id);
        }
        if let Some(last) = ids.last() {
            world.deposit(last);
        }
        world
    }

    #[test]
    fn test_missing_save_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_save(&dir.path().join("none.json")).unwrap().is_none());

        let mut world = WorldState::new(WorldConfig::default()).unwrap();
        assert!(load_world(&dir.path().join("none.json"), &mut world)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("saves").join("save.json");
        let original = played_world();

        save_world(&path, &original).unwrap();

        let mut loaded = WorldState::new(WorldConfig::default()).unwrap();
        let report = load_world(&path, &mut loaded).unwrap().unwrap();

        assert!(report.is_clean());
        assert_eq!(loaded.player(), original.player());
        assert_eq!(loaded.store().len(), original.store().len());
        for cache in original.store().iter() {
            assert_eq!(loaded.store().get(&cache.id()), Some(cache));
        }
    }

    #[test]
    fn test_loaded_world_keeps_playing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("save.json");
        let mut original = played_world();
        save_world(&path, &original).unwrap();

        let mut loaded = WorldState::new(WorldConfig::default()).unwrap();
        load_world(&path, &mut loaded).unwrap();

        assert_eq!(loaded.visible_caches(), original.visible_caches());
        assert_eq!(loaded.step(Direction::South), original.step(Direction::South));
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let original = played_world();
        let mut save = GameSave::capture(&original);
        save.caches
            .push(("cache_1_1".to_string(), json!({ "broken": true })));
        save.player.inventory.push("not a coin".to_string());
        save.player.visited.push("cache_?".to_string());

        let mut loaded = WorldState::new(WorldConfig::default()).unwrap();
        let report = save.apply(&mut loaded);

        assert!(!report.is_clean());
        assert_eq!(report.caches.skipped.len(), 1);
        assert_eq!(report.skipped_ids.len(), 2);
        assert_eq!(loaded.store().len(), original.store().len());
        assert_eq!(loaded.player().inventory(), original.player().inventory());
    }

    #[test]
    fn test_out_of_range_position_restarts_at_origin() {
        let mut save = GameSave::capture(&played_world());
        save.player.position = LatLng::new(1.0e300, 0.0);

        let mut loaded = WorldState::new(WorldConfig::default()).unwrap();
        let report = save.apply(&mut loaded);

        assert!(!report.is_clean());
        assert!(matches!(
            report.invalid_position,
            Some(CoordError::OutOfRange { .. })
        ));
        assert_eq!(loaded.player().position(), loaded.config().origin);
        loaded.step(Direction::North);
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("save.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(read_save(&path), Err(SaveError::Parse { .. })));
    }

    #[test]
    fn test_future_version_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("save.json");
        let mut save = GameSave::capture(&played_world());
        save.version = SAVE_FORMAT_VERSION + 1;
        write_save(&path, &save).unwrap();

        assert!(matches!(
            read_save(&path),
            Err(SaveError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn test_save_format_shape() {
        let save = GameSave::capture(&played_world());
        let value = serde_json::to_value(&save).unwrap();

        assert_eq!(value["version"], json!(SAVE_FORMAT_VERSION));
        assert!(value["player"]["position"]["lat"].is_f64());
        let first = &value["caches"][0];
        assert!(first[0].as_str().unwrap().starts_with("cache_"));
        assert_eq!(first[1]["id"], first[0]);
    }
}
