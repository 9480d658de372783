//! Coordinate conversion module
//!
//! Provides conversions between continuous (lat, lng) positions and the
//! discrete cell grid used for world generation.

mod types;

pub use types::{Cell, CoordError, Direction, LatLng, MAX_CELL_INDEX};

/// Converts a coordinate to the grid cell containing it.
///
/// `i = floor(lat / grid_size)` and `j = floor(lng / grid_size)`, so each
/// cell is a half-open square. Flooring goes toward negative infinity:
/// `-0.00005` with a grid of `0.0001` lands in cell `-1`, not `0`.
///
/// Positions beyond [`MAX_CELL_INDEX`] saturate; reject them first with
/// [`LatLng::validate_for_grid`].
///
/// # Arguments
///
/// * `coord` - Position to convert
/// * `grid_size` - Cell edge length in coordinate units (must be > 0)
#[inline]
pub fn to_cell(coord: LatLng, grid_size: f64) -> Cell {
    Cell {
        i: (coord.lat / grid_size).floor() as i64,
        j: (coord.lng / grid_size).floor() as i64,
    }
}

/// Smallest value that floors to `index` when divided by `grid_size`.
///
/// `index as f64 * grid_size` can land an ulp either side of the true edge,
/// so the product is nudged until it is the first value of the cell.
fn cell_edge(index: i64, grid_size: f64) -> f64 {
    let target = index as f64;
    let mut edge = target * grid_size;
    while (edge / grid_size).floor() < target {
        edge = edge.next_up();
    }
    while (edge.next_down() / grid_size).floor() >= target {
        edge = edge.next_down();
    }
    edge
}

/// Returns the anchor coordinate of a cell: its south-west corner.
///
/// Anchors are absolute (`cell × grid_size`, corrected to the nearest
/// representable corner inside the cell), independent of the world origin,
/// so `to_cell(cell_anchor(c, g), g) == c` for every cell.
#[inline]
pub fn cell_anchor(cell: Cell, grid_size: f64) -> LatLng {
    LatLng {
        lat: cell_edge(cell.i, grid_size),
        lng: cell_edge(cell.j, grid_size),
    }
}

/// Validates a grid size for use with [`to_cell`].
pub fn validate_grid_size(grid_size: f64) -> Result<(), CoordError> {
    if grid_size.is_finite() && grid_size > 0.0 {
        Ok(())
    } else {
        Err(CoordError::InvalidGridSize(grid_size))
    }
}
