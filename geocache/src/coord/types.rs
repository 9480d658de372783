//! Coordinate types: continuous positions, discrete grid cells and movement
//! directions.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest cell index magnitude a coordinate may map to.
///
/// Every integer up to `2^52` is exact as an `f64`, and offsets of a
/// visibility window around such a cell stay far from `i64` overflow.
pub const MAX_CELL_INDEX: i64 = 1 << 52;

/// Errors for coordinates and grid parameters coming from outside the core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Latitude is NaN or infinite.
    #[error("Invalid latitude: {0}")]
    InvalidLatitude(f64),

    /// Longitude is NaN or infinite.
    #[error("Invalid longitude: {0}")]
    InvalidLongitude(f64),

    /// Grid size must be finite and strictly positive.
    #[error("Invalid grid size: {0} (must be finite and > 0)")]
    InvalidGridSize(f64),

    /// The coordinate lies beyond the last representable cell of the grid.
    #[error("Coordinate {value} is out of range for grid size {grid_size}")]
    OutOfRange { value: f64, grid_size: f64 },
}

/// A continuous (latitude-like, longitude-like) position.
///
/// The values are illustrative rather than real geography; the only
/// requirement is that both components are finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Create a new coordinate.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Create a coordinate, rejecting non-finite components.
    pub fn checked(lat: f64, lng: f64) -> Result<Self, CoordError> {
        let coord = Self { lat, lng };
        coord.validate()?;
        Ok(coord)
    }

    /// Check that both components are finite.
    pub fn validate(&self) -> Result<(), CoordError> {
        if !self.lat.is_finite() {
            return Err(CoordError::InvalidLatitude(self.lat));
        }
        if !self.lng.is_finite() {
            return Err(CoordError::InvalidLongitude(self.lng));
        }
        Ok(())
    }

    /// Check that the position maps to a cell within [`MAX_CELL_INDEX`] of
    /// zero under `grid_size`.
    pub fn validate_for_grid(&self, grid_size: f64) -> Result<(), CoordError> {
        self.validate()?;
        let limit = MAX_CELL_INDEX as f64;
        for value in [self.lat, self.lng] {
            let quotient = (value / grid_size).floor();
            if !(-limit..=limit).contains(&quotient) {
                return Err(CoordError::OutOfRange { value, grid_size });
            }
        }
        Ok(())
    }

    /// Return this coordinate shifted by the given deltas.
    pub fn offset(&self, d_lat: f64, d_lng: f64) -> Self {
        Self {
            lat: self.lat + d_lat,
            lng: self.lng + d_lng,
        }
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lng)
    }
}

/// A discrete grid cell: the floored quotient of a coordinate by the grid size.
///
/// `i` follows latitude, `j` follows longitude. Both may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub i: i64,
    pub j: i64,
}

impl Cell {
    /// Create a new cell.
    pub const fn new(i: i64, j: i64) -> Self {
        Self { i, j }
    }

    /// Return the cell `di` rows and `dj` columns away.
    ///
    /// Saturates at the ends of the `i64` range.
    #[inline]
    pub fn offset(&self, di: i64, dj: i64) -> Self {
        Self {
            i: self.i.saturating_add(di),
            j: self.j.saturating_add(dj),
        }
    }

    /// Chebyshev distance (in cells) to another cell.
    ///
    /// A cell is inside a visibility window of radius `r` around `center`
    /// exactly when `cell.chebyshev_distance(&center) <= r`.
    pub fn chebyshev_distance(&self, other: &Cell) -> u64 {
        self.i.abs_diff(other.i).max(self.j.abs_diff(other.j))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.i, self.j)
    }
}

/// A one-cell step on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All directions in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Coordinate delta `(d_lat, d_lng)` for one step of `grid_size`.
    pub fn displacement(self, grid_size: f64) -> (f64, f64) {
        match self {
            Direction::North => (grid_size, 0.0),
            Direction::South => (-grid_size, 0.0),
            Direction::East => (0.0, grid_size),
            Direction::West => (0.0, -grid_size),
        }
    }

    /// Cell delta `(di, dj)` of one step.
    pub fn cell_offset(self) -> (i64, i64) {
        match self {
            Direction::North => (1, 0),
            Direction::South => (-1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
