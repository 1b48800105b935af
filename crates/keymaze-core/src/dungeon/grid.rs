//! The level grid: a rectangular array of tile codes with bounds and
//! adjacency queries. All behavior lives in the systems that consume it.

use serde::{Deserialize, Serialize};
use strum::Display;

use super::tile::{is_walkable_code, Tile};
use crate::consts::WALL;
use crate::errors::ConfigError;

/// A cell coordinate. Embedded by composition in every entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// 4-neighbor taxicab distance.
    pub const fn manhattan(self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }

    /// The adjacent cell in `dir`.
    pub const fn step(self, dir: Direction) -> Position {
        let (dx, dy) = dir.delta();
        self.offset(dx, dy)
    }
}

/// Cardinal facing/step direction. `y` grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    /// Scan order used everywhere a direction list is walked; BFS
    /// determinism depends on it.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Facing from `from` toward `to`; horizontal wins when both axes
    /// differ, `None` when the positions coincide.
    pub const fn between(from: Position, to: Position) -> Option<Direction> {
        if to.x > from.x {
            Some(Direction::Right)
        } else if to.x < from.x {
            Some(Direction::Left)
        } else if to.y > from.y {
            Some(Direction::Down)
        } else if to.y < from.y {
            Some(Direction::Up)
        } else {
            None
        }
    }
}

/// Row-major grid of tile codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<u8>,
}

impl Grid {
    /// A `width x height` grid with every cell set to `code`.
    pub fn filled(width: i32, height: i32, code: u8) -> Self {
        debug_assert!(width > 0 && height > 0);
        Self {
            width,
            height,
            cells: vec![code; (width * height) as usize],
        }
    }

    /// Build a grid from externally supplied rows (scripted levels).
    /// Rows must be non-empty, rectangular, and use only known codes.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, ConfigError> {
        let height = rows.len();
        if height == 0 || rows[0].is_empty() {
            return Err(ConfigError::EmptyGrid);
        }
        let width = rows[0].len();
        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(ConfigError::RaggedRow {
                    row: y,
                    len: row.len(),
                    expected: width,
                });
            }
            for (x, &code) in row.iter().enumerate() {
                if Tile::from_code(code).is_none() {
                    return Err(ConfigError::UnknownTileCode {
                        code,
                        x: x as i32,
                        y: y as i32,
                    });
                }
                cells.push(code);
            }
        }
        Ok(Self {
            width: width as i32,
            height: height as i32,
            cells,
        })
    }

    pub const fn width(&self) -> i32 {
        self.width
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    pub const fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// Interior check: strictly inside the outer wall ring.
    pub const fn is_interior(&self, pos: Position) -> bool {
        pos.x > 0 && pos.y > 0 && pos.x < self.width - 1 && pos.y < self.height - 1
    }

    pub fn get(&self, pos: Position) -> u8 {
        debug_assert!(self.in_bounds(pos));
        self.cells[(pos.y * self.width + pos.x) as usize]
    }

    pub fn set(&mut self, pos: Position, code: u8) {
        debug_assert!(self.in_bounds(pos));
        self.cells[(pos.y * self.width + pos.x) as usize] = code;
    }

    /// Can an entity stand on `pos`? Out of bounds and locked doors are
    /// both solid.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.in_bounds(pos) && is_walkable_code(self.get(pos))
    }

    /// Count of wall cells among the 4 neighbors; out-of-bounds counts
    /// as wall.
    pub fn walls_around(&self, pos: Position) -> u32 {
        Direction::ALL
            .iter()
            .filter(|dir| {
                let n = pos.step(**dir);
                !self.in_bounds(n) || self.get(n) == WALL
            })
            .count() as u32
    }

    /// Iterate every cell position, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |y| (0..w).map(move |x| Position::new(x, y)))
    }
}
