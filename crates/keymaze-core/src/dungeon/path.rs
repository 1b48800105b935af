//! Breadth-first search over the grid.
//!
//! Two walkability notions coexist on purpose: combat pathing treats
//! locked doors as solid, while placement-distance treats any non-wall
//! cell as passable so that cells behind an already-placed door still
//! order correctly.

use std::collections::VecDeque;

use super::grid::{Direction, Grid, Position};
use super::tile::is_walkable_code;
use crate::consts::WALL;

/// Shortest path from `start` to `goal`, both inclusive, over
/// 4-directional adjacency. Locked doors block. Empty when unreachable
/// or either endpoint is out of bounds.
///
/// Neighbors are expanded in the fixed up/down/left/right scan order,
/// so equal-length ties always resolve the same way for a given grid.
pub fn shortest_path(grid: &Grid, start: Position, goal: Position) -> Vec<Position> {
    if !grid.in_bounds(start) || !grid.in_bounds(goal) {
        return Vec::new();
    }
    if start == goal {
        return vec![start];
    }

    let idx = |p: Position| (p.y * grid.width() + p.x) as usize;
    let mut prev: Vec<Option<Position>> = vec![None; (grid.width() * grid.height()) as usize];
    let mut seen = vec![false; prev.len()];
    let mut frontier = VecDeque::new();

    seen[idx(start)] = true;
    frontier.push_back(start);

    while let Some(cur) = frontier.pop_front() {
        for dir in Direction::ALL {
            let next = cur.step(dir);
            if !grid.in_bounds(next) || seen[idx(next)] || !is_walkable_code(grid.get(next)) {
                continue;
            }
            seen[idx(next)] = true;
            prev[idx(next)] = Some(cur);
            if next == goal {
                let mut out = vec![goal];
                let mut walk = cur;
                loop {
                    out.push(walk);
                    match prev[idx(walk)] {
                        Some(p) => walk = p,
                        None => break,
                    }
                }
                out.reverse();
                return out;
            }
            frontier.push_back(next);
        }
    }

    Vec::new()
}

/// BFS edge-count distance from `start` to `goal`, −1 when
/// unreachable. Walls block; doors and pickups do not. Used only for
/// placement ordering during generation.
pub fn distance(grid: &Grid, start: Position, goal: Position) -> i32 {
    if !grid.in_bounds(start) || !grid.in_bounds(goal) {
        return -1;
    }
    if start == goal {
        return 0;
    }

    let idx = |p: Position| (p.y * grid.width() + p.x) as usize;
    let mut dist = vec![-1i32; (grid.width() * grid.height()) as usize];
    let mut frontier = VecDeque::new();

    dist[idx(start)] = 0;
    frontier.push_back(start);

    while let Some(cur) = frontier.pop_front() {
        for dir in Direction::ALL {
            let next = cur.step(dir);
            if !grid.in_bounds(next) || dist[idx(next)] >= 0 || grid.get(next) == WALL {
                continue;
            }
            dist[idx(next)] = dist[idx(cur)] + 1;
            if next == goal {
                return dist[idx(next)];
            }
            frontier.push_back(next);
        }
    }

    -1
}

/// All cells reachable from `start` under combat walkability (locked
/// doors block). Includes `start`.
pub fn reachable_cells(grid: &Grid, start: Position) -> Vec<Position> {
    if !grid.in_bounds(start) {
        return Vec::new();
    }

    let idx = |p: Position| (p.y * grid.width() + p.x) as usize;
    let mut seen = vec![false; (grid.width() * grid.height()) as usize];
    let mut frontier = VecDeque::new();
    let mut out = Vec::new();

    seen[idx(start)] = true;
    frontier.push_back(start);

    while let Some(cur) = frontier.pop_front() {
        out.push(cur);
        for dir in Direction::ALL {
            let next = cur.step(dir);
            if grid.in_bounds(next) && !seen[idx(next)] && is_walkable_code(grid.get(next)) {
                seen[idx(next)] = true;
                frontier.push_back(next);
            }
        }
    }

    out
}
