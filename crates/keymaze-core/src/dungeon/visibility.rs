//! Axis-aligned line of sight.
//!
//! Sight exists only along a shared row or column; diagonal and
//! general-position targets are never visible. This is the intended
//! aggro model, not a raycasting stub.

use super::grid::{Grid, Position};
use super::tile::Tile;

/// Can `from` see `to`? True when the two cells share a row or column
/// and no strictly-between cell blocks sight. Keys and closed doors do
/// not block; only walls do.
pub fn can_see(grid: &Grid, from: Position, to: Position) -> bool {
    debug_assert!(grid.in_bounds(from) && grid.in_bounds(to));

    if from.x == to.x {
        let (lo, hi) = (from.y.min(to.y), from.y.max(to.y));
        (lo + 1..hi).all(|y| clear(grid, Position::new(from.x, y)))
    } else if from.y == to.y {
        let (lo, hi) = (from.x.min(to.x), from.x.max(to.x));
        (lo + 1..hi).all(|x| clear(grid, Position::new(x, from.y)))
    } else {
        false
    }
}

fn clear(grid: &Grid, pos: Position) -> bool {
    match Tile::from_code(grid.get(pos)) {
        Some(tile) => !tile.blocks_sight(),
        None => false,
    }
}
