//! Common types and utilities shared across CLI commands.

use clap::ValueEnum;
use geocache::cache::CacheId;
use geocache::coord::Direction;

use crate::error::CliError;

/// Movement direction for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum DirectionArg {
    /// One cell north (latitude +)
    #[value(alias = "n", alias = "up")]
    North,
    /// One cell south (latitude -)
    #[value(alias = "s", alias = "down")]
    South,
    /// One cell east (longitude +)
    #[value(alias = "e", alias = "right")]
    East,
    /// One cell west (longitude -)
    #[value(alias = "w", alias = "left")]
    West,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::North => Direction::North,
            DirectionArg::South => Direction::South,
            DirectionArg::East => Direction::East,
            DirectionArg::West => Direction::West,
        }
    }
}

/// Parse a cache id argument such as `cache_369893_-1220630`.
pub fn parse_cache_id(raw: &str) -> Result<CacheId, CliError> {
    raw.trim().parse::<CacheId>().map_err(|e| {
        CliError::Input(format!(
            "{}. Use 'geocache look' to see nearby cache ids.",
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geocache::coord::Cell;

    #[test]
    fn test_direction_conversion() {
        assert_eq!(Direction::from(DirectionArg::North), Direction::North);
        assert_eq!(Direction::from(DirectionArg::West), Direction::West);
    }

    #[test]
    fn test_direction_aliases() {
        assert_eq!(DirectionArg::from_str("n", true).unwrap(), DirectionArg::North);
        assert_eq!(DirectionArg::from_str("left", true).unwrap(), DirectionArg::West);
        assert_eq!(DirectionArg::from_str("EAST", true).unwrap(), DirectionArg::East);
    }

    #[test]
    fn test_parse_cache_id() {
        let id = parse_cache_id(" cache_3_-7 ").unwrap();
        assert_eq!(id.cell(), Cell::new(3, -7));
        assert!(matches!(parse_cache_id("cache"), Err(CliError::Input(_))));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_cache_id_display_parses_back(i in -10_000_000i64..10_000_000, j in -10_000_000i64..10_000_000) {
                let id = CacheId::new(Cell::new(i, j));
                prop_assert_eq!(parse_cache_id(&id.to_string()).unwrap(), id);
            }
        }
    }
}
