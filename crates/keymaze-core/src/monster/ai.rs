//! Enemy decision making.
//!
//! Each enemy acts independently: sight of the player along a clear
//! row or column flips it into pursuit, losing sight decays it back to
//! wandering. Chasers follow a fresh BFS path each tick; wanderers try
//! the four directions in a newly shuffled order.

use super::{Enemy, EnemyState};
use crate::consts::ATTACK_COOLDOWN;
use crate::dungeon::{can_see, shortest_path, Direction, Grid, Position};
use crate::gameloop::GameEvent;
use crate::player::Player;
use crate::rng::GameRng;

/// Run one tick of behavior for a single enemy: state transition,
/// movement intent, then contact combat.
pub fn take_turn(
    enemy: &mut Enemy,
    grid: &Grid,
    player: &mut Player,
    now: f32,
    rng: &mut GameRng,
    events: &mut Vec<GameEvent>,
) {
    // Decisions happen only between transitions; an in-flight move is
    // never re-planned.
    if !enemy.motion.in_progress() {
        if can_see(grid, enemy.pos, player.pos) {
            enemy.state = EnemyState::Chasing;
        } else if enemy.state == EnemyState::Chasing {
            enemy.state = EnemyState::Wandering;
        }

        match enemy.state {
            EnemyState::Chasing => chase_step(enemy, grid, player.pos),
            EnemyState::Wandering => wander_step(enemy, grid, rng),
        }
    }

    attack_if_adjacent(enemy, player, now, events);
}

/// Step along the shortest path toward the player. A path of two cells
/// means the player is adjacent; the enemy holds position and lets
/// combat resolve instead.
fn chase_step(enemy: &mut Enemy, grid: &Grid, target: Position) {
    let path = shortest_path(grid, enemy.pos, target);
    if path.len() > 2 {
        step_into(enemy, grid, path[1]);
    }
}

/// Move into the first walkable direction of a per-tick shuffle.
fn wander_step(enemy: &mut Enemy, grid: &Grid, rng: &mut GameRng) {
    let mut dirs = Direction::ALL;
    rng.shuffle(&mut dirs);
    for dir in dirs {
        let next = enemy.pos.step(dir);
        if grid.is_walkable(next) {
            step_into(enemy, grid, next);
            break;
        }
    }
}

fn step_into(enemy: &mut Enemy, grid: &Grid, next: Position) {
    if enemy.motion.in_progress() || !grid.is_walkable(next) {
        return;
    }
    if let Some(dir) = Direction::between(enemy.pos, next) {
        enemy.facing = dir;
    }
    enemy.motion.begin(enemy.pos, next);
}

/// Contact damage with a per-enemy cooldown deadline.
fn attack_if_adjacent(enemy: &mut Enemy, player: &mut Player, now: f32, events: &mut Vec<GameEvent>) {
    if enemy.pos.manhattan(player.pos) > 1 || now < enemy.next_attack_at {
        return;
    }
    if let Some(dir) = Direction::between(enemy.pos, player.pos) {
        enemy.facing = dir;
    }
    player.health -= enemy.damage;
    enemy.next_attack_at = now + ATTACK_COOLDOWN;
    events.push(GameEvent::PlayerDamaged {
        damage: enemy.damage,
        health: player.health,
    });
}
