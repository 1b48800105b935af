//! Key and door records, and their placement into a carved maze.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::grid::{Grid, Position};
use super::path::distance;
use crate::consts::{ENTRANCE_X, ENTRANCE_Y, FLOOR, MAX_KEYS, PLACEMENT_MARGIN};
use crate::dungeon::tile::{KeyColor, KeyId};
use crate::rng::GameRng;

/// A collectible key. Created provisionally at (0,0), relocated exactly
/// once by placement, and moved into the player inventory on pickup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    pub id: KeyId,
    pub color: KeyColor,
    pub pos: Position,
}

impl Key {
    pub(crate) fn provisional(id: KeyId) -> Self {
        Self {
            id,
            color: KeyColor::for_id(id),
            pos: Position::default(),
        }
    }

    /// Cell code of this key's pickup tile.
    pub const fn code(&self) -> u8 {
        self.id.key_code()
    }
}

/// A locked door. Becomes floor exactly once, when unlocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    pub id: KeyId,
    pub color: KeyColor,
    pub pos: Position,
}

impl Door {
    pub(crate) fn provisional(id: KeyId) -> Self {
        Self {
            id,
            color: KeyColor::for_id(id),
            pos: Position::default(),
        }
    }

    pub const fn code(&self) -> u8 {
        self.id.door_code()
    }
}

/// A placed grid feature, looked up by cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feature {
    Key(Key),
    Door(Door),
}

/// Place `key_count` key/door pairs into a carved maze.
///
/// Candidate cells come from the interior sub-rectangle (margin
/// [`PLACEMENT_MARGIN`]) so nothing lands next to the entrance or exit.
/// The shuffled pool is filtered toward alcoves: the first `key_count`
/// picks need exactly two surrounding walls, later picks two or more.
/// Candidates are then walked in BFS-distance-from-entrance order,
/// placing a key whenever the pools are level and a door while doors
/// outnumber keys, which guarantees each key is reachable no later
/// than its door.
///
/// If the alcove pass cannot seat every pair, the remaining features
/// fall back to any interior floor cell in distance order. Placement
/// never fails; at worst fewer features are seated than requested.
pub fn place_keys_and_doors(
    grid: &mut Grid,
    key_count: u8,
    rng: &mut GameRng,
) -> (Vec<Key>, Vec<Door>) {
    debug_assert!(key_count <= MAX_KEYS);

    let mut keys: VecDeque<Key> = (0..key_count).map(|i| Key::provisional(KeyId(i))).collect();
    let mut doors: VecDeque<Door> = (0..key_count)
        .map(|i| Door::provisional(KeyId(i)))
        .collect();
    let mut placed_keys = Vec::new();
    let mut placed_doors = Vec::new();
    if key_count == 0 {
        return (placed_keys, placed_doors);
    }

    let entrance = Position::new(ENTRANCE_X, ENTRANCE_Y);
    let mut pool: Vec<Position> = interior_floor(grid);
    rng.shuffle(&mut pool);

    // Alcove-biased candidate selection.
    let want = 2 * key_count as usize;
    let mut alcoves = Vec::new();
    for &cell in &pool {
        let walls = grid.walls_around(cell);
        let eligible = if alcoves.len() < key_count as usize {
            walls == 2
        } else {
            walls >= 2
        };
        if eligible {
            alcoves.push(cell);
        }
        if alcoves.len() == want {
            break;
        }
    }

    let mut ordered: Vec<(i32, Position)> = alcoves
        .iter()
        .map(|&c| (distance(grid, entrance, c), c))
        .collect();
    ordered.sort_by_key(|&(d, _)| d);

    // Distance of the most recently seated key; a door may never be
    // placed nearer than its key.
    let mut last_key_dist = -1;
    for &(dist, cell) in &ordered {
        if !doors.is_empty() && doors.len() > keys.len() && grid.walls_around(cell) == 2 {
            seat_door(grid, &mut doors, &mut placed_doors, cell);
        } else if !keys.is_empty() && keys.len() == doors.len() && grid.walls_around(cell) >= 2 {
            seat_key(grid, &mut keys, &mut placed_keys, cell);
            last_key_dist = dist;
        }
        if keys.is_empty() && doors.is_empty() {
            return (placed_keys, placed_doors);
        }
    }

    // Fallback: relax the wall conditions and fill from whatever
    // interior floor remains, still in distance order.
    let mut rest: Vec<(i32, Position)> = pool
        .iter()
        .filter(|&&c| grid.get(c) == FLOOR)
        .map(|&c| (distance(grid, entrance, c), c))
        .collect();
    rest.sort_by_key(|&(d, _)| d);

    for &(dist, cell) in &rest {
        if !keys.is_empty() && keys.len() == doors.len() {
            seat_key(grid, &mut keys, &mut placed_keys, cell);
            last_key_dist = dist;
        } else if !doors.is_empty() && dist >= last_key_dist {
            seat_door(grid, &mut doors, &mut placed_doors, cell);
        }
        if keys.is_empty() && doors.is_empty() {
            break;
        }
    }

    // Last resort: seat leftover doors farthest-first rather than drop
    // them. A level missing a door is worse than one where the
    // distance bias degraded.
    for &(_, cell) in rest.iter().rev() {
        if doors.is_empty() {
            break;
        }
        if grid.get(cell) == FLOOR {
            seat_door(grid, &mut doors, &mut placed_doors, cell);
        }
    }

    (placed_keys, placed_doors)
}

fn seat_key(grid: &mut Grid, pending: &mut VecDeque<Key>, placed: &mut Vec<Key>, cell: Position) {
    if let Some(mut key) = pending.pop_front() {
        key.pos = cell;
        grid.set(cell, key.code());
        placed.push(key);
    }
}

fn seat_door(
    grid: &mut Grid,
    pending: &mut VecDeque<Door>,
    placed: &mut Vec<Door>,
    cell: Position,
) {
    if let Some(mut door) = pending.pop_front() {
        door.pos = cell;
        grid.set(cell, door.code());
        placed.push(door);
    }
}

/// Floor cells inside the placement margin.
fn interior_floor(grid: &Grid) -> Vec<Position> {
    let mut out = Vec::new();
    for y in PLACEMENT_MARGIN..grid.height() - PLACEMENT_MARGIN {
        for x in PLACEMENT_MARGIN..grid.width() - PLACEMENT_MARGIN {
            let p = Position::new(x, y);
            if grid.get(p) == FLOOR {
                out.push(p);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::WALL;
    use crate::dungeon::maze::{add_branches, carve_maze, open_endpoints};

    fn generated(seed: u64, key_count: u8) -> (Grid, Vec<Key>, Vec<Door>) {
        let mut grid = Grid::filled(21, 21, WALL);
        let mut rng = GameRng::new(seed);
        let path = carve_maze(&mut grid, &mut rng);
        add_branches(&mut grid, &path, 15, &mut rng);
        open_endpoints(&mut grid);
        let (keys, doors) = place_keys_and_doors(&mut grid, key_count, &mut rng);
        (grid, keys, doors)
    }

    #[test]
    fn test_places_exact_counts() {
        for seed in [1, 2, 3, 40, 500] {
            let (grid, keys, doors) = generated(seed, 3);
            assert_eq!(keys.len(), 3, "seed {seed}");
            assert_eq!(doors.len(), 3, "seed {seed}");
            for key in &keys {
                assert_eq!(grid.get(key.pos), key.code());
            }
            for door in &doors {
                assert_eq!(grid.get(door.pos), door.code());
            }
        }
    }

    #[test]
    fn test_zero_keys_changes_nothing() {
        let mut grid = Grid::filled(21, 21, WALL);
        let mut rng = GameRng::new(9);
        let path = carve_maze(&mut grid, &mut rng);
        add_branches(&mut grid, &path, 15, &mut rng);
        open_endpoints(&mut grid);
        let snapshot = grid.clone();
        let (keys, doors) = place_keys_and_doors(&mut grid, 0, &mut rng);
        assert!(keys.is_empty() && doors.is_empty());
        assert_eq!(grid, snapshot);
    }

    #[test]
    fn test_key_never_farther_than_its_door() {
        let entrance = Position::new(ENTRANCE_X, ENTRANCE_Y);
        for seed in [7, 8, 9, 100, 2024] {
            let (grid, keys, doors) = generated(seed, 3);
            for door in &doors {
                let key = keys.iter().find(|k| k.id == door.id).expect("matching key");
                let kd = distance(&grid, entrance, key.pos);
                let dd = distance(&grid, entrance, door.pos);
                assert!(kd >= 0 && dd >= 0, "seed {seed}: unreachable feature");
                assert!(
                    kd <= dd,
                    "seed {seed}: key {:?} at {kd}, door at {dd}",
                    door.id
                );
            }
        }
    }

    #[test]
    fn test_features_keep_margin() {
        let (_, keys, doors) = generated(77, 3);
        for pos in keys.iter().map(|k| k.pos).chain(doors.iter().map(|d| d.pos)) {
            assert!(pos.x >= PLACEMENT_MARGIN && pos.x < 21 - PLACEMENT_MARGIN);
            assert!(pos.y >= PLACEMENT_MARGIN && pos.y < 21 - PLACEMENT_MARGIN);
        }
    }
}
