//! Player move intents and the pickup/unlock rules resolved with them.
//!
//! Everything here happens at the moment a move is accepted, not when
//! the transition finishes: a door opens (and its key is spent) before
//! the walkability check that admits the step, and a key leaves the
//! grid the instant the player commits to entering its cell.

use crate::consts::FLOOR;
use crate::dungeon::{is_door_code, is_key_code, Direction, Feature, Grid, Position};
use crate::gameloop::{FeatureMap, GameEvent};
use crate::player::Player;

/// Resolve a player move intent. `dx`/`dy` outside −1..=1 are clamped.
///
/// No-ops: a zero intent, an intent during a running transition, and a
/// fully blocked destination. Diagonal intents whose target is blocked
/// degrade to whichever single axis is enterable, horizontal first.
pub(crate) fn try_player_step(
    player: &mut Player,
    grid: &mut Grid,
    features: &mut FeatureMap,
    dx: i32,
    dy: i32,
    events: &mut Vec<GameEvent>,
) {
    if player.motion.in_progress() {
        return;
    }
    let (dx, dy) = (dx.clamp(-1, 1), dy.clamp(-1, 1));
    if dx == 0 && dy == 0 {
        return;
    }

    let Some(dest) = pick_destination(player, grid, dx, dy) else {
        return;
    };

    let code = grid.get(dest);
    if is_door_code(code) {
        // `pick_destination` only admits a door the player can open.
        let slot = match player.key_slot_for(code) {
            Some(slot) => slot,
            None => {
                debug_assert!(false, "door admitted without a matching key");
                return;
            }
        };
        let key = player.inventory.remove(slot);
        grid.set(dest, FLOOR);
        features.remove(&(dest.x, dest.y));
        events.push(GameEvent::DoorUnlocked { id: key.id });
    } else if is_key_code(code) {
        grid.set(dest, FLOOR);
        let key = match features.remove(&(dest.x, dest.y)) {
            Some(Feature::Key(key)) => key,
            _ => {
                debug_assert!(false, "key code without a key record");
                return;
            }
        };
        let id = key.id;
        player.inventory.push(key);
        events.push(GameEvent::KeyCollected { id });
    }

    if let Some(dir) = Direction::between(player.pos, dest) {
        player.facing = dir;
    }
    player.motion.begin(player.pos, dest);
}

/// Choose the cell this intent actually enters, applying the diagonal
/// axis relaxation.
fn pick_destination(player: &Player, grid: &Grid, dx: i32, dy: i32) -> Option<Position> {
    let target = player.pos.offset(dx, dy);
    if enterable(player, grid, target) {
        return Some(target);
    }
    if dx != 0 && dy != 0 {
        let horizontal = player.pos.offset(dx, 0);
        if enterable(player, grid, horizontal) {
            return Some(horizontal);
        }
        let vertical = player.pos.offset(0, dy);
        if enterable(player, grid, vertical) {
            return Some(vertical);
        }
    }
    None
}

/// Walkable, or a locked door the player holds the key for.
fn enterable(player: &Player, grid: &Grid, pos: Position) -> bool {
    if !grid.in_bounds(pos) {
        return false;
    }
    let code = grid.get(pos);
    if is_door_code(code) {
        player.key_slot_for(code).is_some()
    } else {
        grid.is_walkable(pos)
    }
}

/// Rebuild the feature records for an externally supplied grid.
pub(crate) fn scan_features(grid: &Grid) -> FeatureMap {
    use crate::dungeon::{Door, Key, Tile};

    let mut features = FeatureMap::default();
    for pos in grid.positions() {
        match Tile::from_code(grid.get(pos)) {
            Some(Tile::Key(id)) => {
                let mut key = Key::provisional(id);
                key.pos = pos;
                features.insert((pos.x, pos.y), Feature::Key(key));
            }
            Some(Tile::Door(id)) => {
                let mut door = Door::provisional(id);
                door.pos = pos;
                features.insert((pos.x, pos.y), Feature::Door(door));
            }
            _ => {}
        }
    }
    features
}
