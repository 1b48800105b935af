//! Enemy instances and their behavior.

mod ai;

pub use ai::take_turn;

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::action::Motion;
use crate::consts::ENEMY_HEALTH;
use crate::dungeon::{Direction, Position};

/// Behavior state of an enemy.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
pub enum EnemyState {
    #[default]
    Wandering,
    Chasing,
}

/// A pursuing enemy. Health and damage are data; nothing currently
/// reduces enemy health, so enemies persist for the life of the level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Position,
    pub health: i32,
    pub damage: i32,
    pub facing: Direction,
    pub state: EnemyState,
    pub(crate) motion: Motion,
    /// Simulation-clock deadline before the next contact attack.
    pub(crate) next_attack_at: f32,
}

impl Enemy {
    pub(crate) fn spawn(pos: Position, damage: i32) -> Self {
        Self {
            pos,
            health: ENEMY_HEALTH,
            damage,
            facing: Direction::Down,
            state: EnemyState::Wandering,
            motion: Motion::default(),
            next_attack_at: 0.0,
        }
    }

    /// Continuous presentation position.
    pub fn draw_pos(&self) -> (f32, f32) {
        self.motion.draw_pos(self.pos)
    }

    pub fn is_moving(&self) -> bool {
        self.motion.in_progress()
    }
}
