//! Tile codes and their typed view.
//!
//! The grid stores raw `u8` codes (the external contract for custom
//! levels); [`Tile`] is the decoded form the rest of the crate matches
//! on. The two key/door bands are related by a fixed offset so that
//! "does this key open that door" is a single arithmetic comparison.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::consts::{
    DOOR_BASE, DOOR_KEY_OFFSET, DOOR_MIN, FINISH, FLOOR, KEY_BASE, KEY_MIN, WALL,
};

/// Identity shared by a key and the door it opens (0..=3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyId(pub u8);

impl KeyId {
    /// Cell code of this key's pickup.
    pub const fn key_code(self) -> u8 {
        KEY_BASE - self.0
    }

    /// Cell code of the door this key opens.
    pub const fn door_code(self) -> u8 {
        DOOR_BASE - self.0
    }
}

impl core::fmt::Display for KeyId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "key #{}", self.0)
    }
}

/// Render-only metadata attached to a key/door pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum KeyColor {
    Red,
    Green,
    Blue,
    Yellow,
}

impl KeyColor {
    /// Fixed id-to-color assignment.
    pub const fn for_id(id: KeyId) -> Self {
        match id.0 % 4 {
            0 => KeyColor::Red,
            1 => KeyColor::Green,
            2 => KeyColor::Blue,
            _ => KeyColor::Yellow,
        }
    }
}

/// Decoded cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Tile {
    Wall,
    Floor,
    Finish,
    Key(KeyId),
    Door(KeyId),
}

impl Tile {
    /// Decode a raw cell code. `None` for codes outside the table.
    pub const fn from_code(code: u8) -> Option<Tile> {
        match code {
            WALL => Some(Tile::Wall),
            FLOOR => Some(Tile::Floor),
            FINISH => Some(Tile::Finish),
            c if c >= KEY_MIN && c <= KEY_BASE => Some(Tile::Key(KeyId(KEY_BASE - c))),
            c if c >= DOOR_MIN && c <= DOOR_BASE => Some(Tile::Door(KeyId(DOOR_BASE - c))),
            _ => None,
        }
    }

    /// Raw cell code for this tile.
    pub const fn code(self) -> u8 {
        match self {
            Tile::Wall => WALL,
            Tile::Floor => FLOOR,
            Tile::Finish => FINISH,
            Tile::Key(id) => id.key_code(),
            Tile::Door(id) => id.door_code(),
        }
    }

    /// Can an entity stand here? Locked doors count as solid.
    pub const fn is_walkable(self) -> bool {
        matches!(self, Tile::Floor | Tile::Finish | Tile::Key(_))
    }

    /// Does this tile stop an axis-aligned sight line? Only walls do;
    /// a closed door can be seen through.
    pub const fn blocks_sight(self) -> bool {
        matches!(self, Tile::Wall)
    }

    /// Display character for headless map dumps.
    pub const fn symbol(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Floor => '.',
            Tile::Finish => '>',
            Tile::Key(_) => 'k',
            Tile::Door(_) => '+',
        }
    }
}

/// Walkability on the raw code, locked doors excluded.
pub const fn is_walkable_code(code: u8) -> bool {
    match Tile::from_code(code) {
        Some(tile) => tile.is_walkable(),
        None => false,
    }
}

/// Is this code in the key pickup band?
pub const fn is_key_code(code: u8) -> bool {
    code >= KEY_MIN && code <= KEY_BASE
}

/// Is this code in the locked door band?
pub const fn is_door_code(code: u8) -> bool {
    code >= DOOR_MIN && code <= DOOR_BASE
}

/// Does `key_code` open `door_code`?
pub const fn key_opens(key_code: u8, door_code: u8) -> bool {
    key_code + DOOR_KEY_OFFSET == door_code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for code in [0u8, 1, 3, 7, 8, 9, 10, 17, 18, 19, 20] {
            let tile = Tile::from_code(code).unwrap();
            assert_eq!(tile.code(), code);
        }
    }

    #[test]
    fn test_unknown_codes_rejected() {
        for code in [2u8, 4, 5, 6, 11, 16, 21, 255] {
            assert!(Tile::from_code(code).is_none(), "code {code}");
        }
    }

    #[test]
    fn test_door_key_offset_is_uniform() {
        for id in 0..4 {
            let id = KeyId(id);
            assert_eq!(id.door_code(), id.key_code() + DOOR_KEY_OFFSET);
            assert!(key_opens(id.key_code(), id.door_code()));
        }
        // Mismatched identities never open.
        assert!(!key_opens(KeyId(0).key_code(), KeyId(1).door_code()));
    }

    #[test]
    fn test_walkability() {
        assert!(is_walkable_code(FLOOR));
        assert!(is_walkable_code(FINISH));
        assert!(is_walkable_code(KeyId(2).key_code()));
        assert!(!is_walkable_code(WALL));
        assert!(!is_walkable_code(KeyId(2).door_code()));
    }

    #[test]
    fn test_only_walls_block_sight() {
        assert!(Tile::Wall.blocks_sight());
        assert!(!Tile::Door(KeyId(0)).blocks_sight());
        assert!(!Tile::Key(KeyId(0)).blocks_sight());
    }
}
