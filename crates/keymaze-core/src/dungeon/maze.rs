//! Maze carving.
//!
//! A randomized depth-first carve over a 2-cell stride lattice yields a
//! perfect maze; branch injection then knocks a bounded number of extra
//! holes in it so the level has loops instead of a single spanning tree.

use super::grid::{Grid, Position};
use crate::consts::{
    BRANCH_MARGIN, ENTRANCE_X, ENTRANCE_Y, FINISH, FLOOR, MIN_MAZE_DIM, WALL,
};
use crate::rng::GameRng;

/// Stride steps for the carve lattice.
const STRIDES: [(i32, i32); 4] = [(0, -2), (0, 2), (-2, 0), (2, 0)];

/// Carve a perfect maze into `grid` (expected all-wall) and return the
/// carve order of the lattice cells, the main path used for branch
/// injection.
///
/// The walk starts next to the exit corner and repeatedly carves a
/// random still-unvisited 2-stride neighbor, opening the intermediate
/// wall cell as it goes. Backtracking pops the explicit stack, so the
/// recursion depth never depends on maze size.
pub fn carve_maze(grid: &mut Grid, rng: &mut GameRng) -> Vec<Position> {
    debug_assert!(grid.width() >= MIN_MAZE_DIM && grid.height() >= MIN_MAZE_DIM);
    debug_assert!(grid.width() % 2 == 1 && grid.height() % 2 == 1);

    let start = Position::new(grid.width() - 2, grid.height() - 2);
    let mut path = Vec::new();
    let mut stack = vec![start];

    grid.set(start, FLOOR);
    path.push(start);

    while let Some(&cur) = stack.last() {
        let mut open_dirs = [(0i32, 0i32); 4];
        let mut q = 0;
        for stride in STRIDES {
            if carveable(grid, cur, stride) {
                open_dirs[q] = stride;
                q += 1;
            }
        }

        if q == 0 {
            stack.pop();
            continue;
        }

        let (dx, dy) = open_dirs[rng.index(q)];
        let mid = cur.offset(dx / 2, dy / 2);
        let next = cur.offset(dx, dy);
        grid.set(mid, FLOOR);
        grid.set(next, FLOOR);
        path.push(next);
        stack.push(next);
    }

    path
}

/// Inject up to `count` extra connections off the main path.
///
/// Each attempt picks a random interior path cell (a margin at both
/// ends avoids trivial loops near entrance and exit) and opens the
/// first shuffled stride direction whose intermediate wall still
/// stands. Carving only ever removes walls, so connectivity is
/// preserved by construction.
pub fn add_branches(grid: &mut Grid, path: &[Position], count: u32, rng: &mut GameRng) {
    if path.len() <= 2 * BRANCH_MARGIN {
        // Too short to leave the end margins; degrade to no branches.
        return;
    }

    let span = path.len() - 2 * BRANCH_MARGIN;
    for _ in 0..count {
        let at = path[BRANCH_MARGIN + rng.index(span)];

        let mut strides = STRIDES;
        rng.shuffle(&mut strides);
        for (dx, dy) in strides {
            let mid = at.offset(dx / 2, dy / 2);
            let target = at.offset(dx, dy);
            if grid.is_interior(target) && grid.get(mid) == WALL {
                grid.set(mid, FLOOR);
                if grid.get(target) == WALL {
                    grid.set(target, FLOOR);
                }
                break;
            }
        }
    }
}

/// Open the entrance, stamp the finish marker, and wall off the two
/// cells diagonally outside the exit so it is entered from exactly one
/// direction.
pub fn open_endpoints(grid: &mut Grid) {
    let (w, h) = (grid.width(), grid.height());
    grid.set(Position::new(ENTRANCE_X, ENTRANCE_Y), FLOOR);
    grid.set(Position::new(w - 2, h - 2), FINISH);
    grid.set(Position::new(w - 1, h - 2), WALL);
    grid.set(Position::new(w - 2, h - 1), WALL);
}

/// A stride is carveable when its target lies in the interior and has
/// not been reached yet.
fn carveable(grid: &Grid, from: Position, (dx, dy): (i32, i32)) -> bool {
    let target = from.offset(dx, dy);
    grid.is_interior(target) && grid.get(target) == WALL
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::path::reachable_cells;

    fn carved(width: i32, height: i32, seed: u64) -> (Grid, Vec<Position>) {
        let mut grid = Grid::filled(width, height, WALL);
        let mut rng = GameRng::new(seed);
        let path = carve_maze(&mut grid, &mut rng);
        (grid, path)
    }

    #[test]
    fn test_carve_reaches_whole_lattice() {
        let (grid, path) = carved(21, 21, 11);
        // Every odd-coordinate interior cell is a lattice cell and must
        // have been carved exactly once.
        let lattice = (21 / 2) * (21 / 2);
        assert_eq!(path.len(), lattice);
        for p in grid.positions() {
            if p.x % 2 == 1 && p.y % 2 == 1 && grid.is_interior(p) {
                assert_eq!(grid.get(p), FLOOR, "lattice cell {p:?} not carved");
            }
        }
    }

    #[test]
    fn test_carve_starts_at_exit_corner() {
        let (_, path) = carved(15, 15, 5);
        assert_eq!(path[0], Position::new(13, 13));
    }

    #[test]
    fn test_border_stays_walled() {
        let (mut grid, path) = carved(21, 21, 17);
        let mut rng = GameRng::new(18);
        add_branches(&mut grid, &path, 15, &mut rng);
        open_endpoints(&mut grid);

        for p in grid.positions() {
            if !grid.is_interior(p) && !(p.x == ENTRANCE_X && p.y == ENTRANCE_Y) {
                assert_eq!(grid.get(p), WALL, "border cell {p:?} opened");
            }
        }
        assert_eq!(grid.get(Position::new(ENTRANCE_X, ENTRANCE_Y)), FLOOR);
        assert_eq!(grid.get(Position::new(19, 19)), FINISH);
    }

    #[test]
    fn test_branches_never_disconnect() {
        let (mut grid, path) = carved(21, 21, 23);
        let before = {
            let mut g = grid.clone();
            open_endpoints(&mut g);
            reachable_cells(&g, Position::new(ENTRANCE_X, ENTRANCE_Y)).len()
        };

        let mut rng = GameRng::new(24);
        add_branches(&mut grid, &path, 25, &mut rng);
        open_endpoints(&mut grid);

        let after = reachable_cells(&grid, Position::new(ENTRANCE_X, ENTRANCE_Y));
        assert!(after.len() >= before);
        // Every non-wall cell is reachable from the entrance.
        let reachable: std::collections::HashSet<_> = after.into_iter().collect();
        for p in grid.positions() {
            if grid.get(p) != WALL {
                assert!(reachable.contains(&p), "cell {p:?} unreachable");
            }
        }
    }

    #[test]
    fn test_short_path_skips_branches() {
        let (mut grid, path) = carved(5, 5, 1);
        let snapshot = grid.clone();
        let mut rng = GameRng::new(2);
        add_branches(&mut grid, &path, 10, &mut rng);
        assert_eq!(grid, snapshot);
    }
}
