//! Core simulation constants.
//!
//! Tile codes form three fixed bands: terrain (0..=3), key pickups
//! (7..=10) and locked doors (17..=20). A door code is always its
//! matching key's code plus [`DOOR_KEY_OFFSET`]; both placement and
//! unlocking rely on that single offset.

/// Impassable wall.
pub const WALL: u8 = 0;
/// Plain walkable floor.
pub const FLOOR: u8 = 1;
/// Exit marker. Walkable; reaching it wins the level.
pub const FINISH: u8 = 3;

/// Key with id `k` occupies code `KEY_BASE - k`.
pub const KEY_BASE: u8 = 10;
/// Lowest code in the key band.
pub const KEY_MIN: u8 = 7;
/// Door matching key id `k` occupies code `DOOR_BASE - k`.
pub const DOOR_BASE: u8 = 20;
/// Lowest code in the door band.
pub const DOOR_MIN: u8 = 17;
/// Fixed relation between a door code and its key code.
pub const DOOR_KEY_OFFSET: u8 = 10;
/// Width of the key/door identity bands.
pub const MAX_KEYS: u8 = 4;

/// Entrance cell carved into the top border during generation.
pub const ENTRANCE_X: i32 = 1;
pub const ENTRANCE_Y: i32 = 0;

/// Smallest maze dimension the carver accepts.
pub const MIN_MAZE_DIM: i32 = 5;

/// Border margin (cells) excluded from key/door candidate selection.
pub const PLACEMENT_MARGIN: i32 = 5;
/// Main-path cells excluded from each end when injecting branches.
pub const BRANCH_MARGIN: usize = 5;

/// Seconds a player transition takes per cell.
pub const PLAYER_MOVE_DURATION: f32 = 0.20;
/// Seconds an enemy transition takes per cell.
pub const ENEMY_MOVE_DURATION: f32 = 0.30;

/// Seconds between contact attacks from the same enemy.
pub const ATTACK_COOLDOWN: f32 = 0.5;

/// Health ceiling for the player.
pub const MAX_HEALTH: i32 = 100;
/// Baseline enemy health.
pub const ENEMY_HEALTH: i32 = 50;
/// Seconds between passive regeneration ticks.
pub const REGEN_INTERVAL: f32 = 1.0;
/// Health restored per regeneration tick.
pub const REGEN_AMOUNT: i32 = 1;
