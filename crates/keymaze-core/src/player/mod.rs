//! The player avatar.

use serde::{Deserialize, Serialize};

use crate::action::Motion;
use crate::consts::{DOOR_KEY_OFFSET, MAX_HEALTH, REGEN_INTERVAL};
use crate::dungeon::{Direction, Key, Position};

/// Player state. The discrete position is authoritative for all game
/// logic; the draw position exists for presentation and for the
/// "currently mid-transition" gate on new moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Position,
    pub health: i32,
    pub facing: Direction,
    pub inventory: Vec<Key>,
    pub(crate) motion: Motion,
    pub(crate) next_regen_at: f32,
}

impl Player {
    pub(crate) fn spawn(pos: Position) -> Self {
        Self {
            pos,
            health: MAX_HEALTH,
            facing: Direction::Down,
            inventory: Vec::new(),
            motion: Motion::default(),
            next_regen_at: REGEN_INTERVAL,
        }
    }

    /// Continuous presentation position.
    pub fn draw_pos(&self) -> (f32, f32) {
        self.motion.draw_pos(self.pos)
    }

    /// Is a transition currently running?
    pub fn is_moving(&self) -> bool {
        self.motion.in_progress()
    }

    /// Inventory slot of a key opening `door_code`, if any.
    pub fn key_slot_for(&self, door_code: u8) -> Option<usize> {
        self.inventory
            .iter()
            .position(|key| key.code() + DOOR_KEY_OFFSET == door_code)
    }
}
