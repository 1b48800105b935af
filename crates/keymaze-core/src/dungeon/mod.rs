//! Dungeon system: the grid, its tile codes, maze generation, and the
//! spatial queries (pathfinding, visibility) built on top of it.

mod features;
mod grid;
pub mod maze;
mod path;
mod tile;
mod visibility;

pub use features::{place_keys_and_doors, Door, Feature, Key};
pub use grid::{Direction, Grid, Position};
pub use path::{distance, reachable_cells, shortest_path};
pub use tile::{is_door_code, is_key_code, is_walkable_code, key_opens, KeyColor, KeyId, Tile};
pub use visibility::can_see;
