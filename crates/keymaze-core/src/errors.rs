//! Construction-time error taxonomy.
//!
//! Gameplay outcomes (blocked moves, unreachable paths) are ordinary
//! return values, never errors. Only configuration problems that make a
//! level unstartable surface here.

use thiserror::Error;

/// Rejected simulation configuration or custom grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("maze dimensions {width}x{height} are below the 5x5 minimum")]
    DimensionsTooSmall { width: i32, height: i32 },

    /// The carver works on a 2-cell stride lattice; even dimensions
    /// would leave the entrance column disconnected.
    #[error("maze dimensions {width}x{height} must be odd")]
    EvenDimensions { width: i32, height: i32 },

    #[error("key count {requested} exceeds the identity band of 4")]
    TooManyKeys { requested: u8 },

    #[error("enemy damage {damage} must be non-negative")]
    NegativeDamage { damage: i32 },

    #[error("custom grid has no rows")]
    EmptyGrid,

    #[error("custom grid row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("unknown tile code {code} at ({x}, {y})")]
    UnknownTileCode { code: u8, x: i32, y: i32 },

    #[error("entrance cell (1, 0) is not walkable")]
    BlockedEntrance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_problem() {
        let err = ConfigError::RaggedRow {
            row: 2,
            len: 4,
            expected: 7,
        };
        assert!(err.to_string().contains("row 2"));
        assert!(err.to_string().contains("expected 7"));

        let err = ConfigError::EvenDimensions {
            width: 20,
            height: 21,
        };
        assert!(err.to_string().contains("20x21"));
    }
}
