//! Discrete-to-continuous motion.
//!
//! Grid logic runs on integer cells; presentation reads an
//! interpolated position. A transition, once accepted, always runs to
//! completion, and the discrete position snaps only when progress
//! reaches one.

use serde::{Deserialize, Serialize};

use crate::dungeon::Position;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Transit {
    from: Position,
    to: Position,
    progress: f32,
}

/// Per-entity transition state. Shared by the player and enemies; only
/// the per-cell duration differs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    transit: Option<Transit>,
}

impl Motion {
    /// Start a transition. Callers must have checked `in_progress`.
    pub(crate) fn begin(&mut self, from: Position, to: Position) {
        debug_assert!(self.transit.is_none());
        debug_assert!(from.manhattan(to) >= 1 && from.manhattan(to) <= 2);
        self.transit = Some(Transit {
            from,
            to,
            progress: 0.0,
        });
    }

    /// Advance by `dt` seconds against a fixed per-cell `duration`.
    /// Returns the destination cell when the transition completes on
    /// this step.
    pub(crate) fn advance(&mut self, dt: f32, duration: f32) -> Option<Position> {
        let transit = self.transit.as_mut()?;
        transit.progress += dt / duration;
        if transit.progress >= 1.0 {
            let dest = transit.to;
            self.transit = None;
            Some(dest)
        } else {
            None
        }
    }

    pub fn in_progress(&self) -> bool {
        self.transit.is_some()
    }

    /// Continuous presentation position: the clamped lerp while
    /// transitioning, the resting cell otherwise.
    pub fn draw_pos(&self, resting: Position) -> (f32, f32) {
        match self.transit {
            Some(t) => {
                let k = t.progress.clamp(0.0, 1.0);
                (
                    t.from.x as f32 + (t.to.x - t.from.x) as f32 * k,
                    t.from.y as f32 + (t.to.y - t.from.y) as f32 * k,
                )
            }
            None => (resting.x as f32, resting.y as f32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_until_snap() {
        let mut motion = Motion::default();
        let from = Position::new(2, 2);
        let to = Position::new(3, 2);
        motion.begin(from, to);
        assert!(motion.in_progress());

        assert_eq!(motion.advance(0.05, 0.20), None);
        let (x, y) = motion.draw_pos(from);
        assert!((x - 2.25).abs() < 1e-5);
        assert!((y - 2.0).abs() < 1e-5);

        assert_eq!(motion.advance(0.10, 0.20), None);
        assert_eq!(motion.advance(0.10, 0.20), Some(to));
        assert!(!motion.in_progress());
        assert_eq!(motion.draw_pos(to), (3.0, 2.0));
    }

    #[test]
    fn test_draw_pos_clamps_overshoot() {
        let mut motion = Motion::default();
        motion.begin(Position::new(0, 0), Position::new(0, 1));
        // One giant step: progress far past 1, draw position must not
        // overshoot the target before the snap is observed.
        let transit_done = motion.advance(10.0, 0.20);
        assert_eq!(transit_done, Some(Position::new(0, 1)));
    }

    #[test]
    fn test_resting_draw_pos_matches_cell() {
        let motion = Motion::default();
        assert_eq!(motion.draw_pos(Position::new(7, 4)), (7.0, 4.0));
    }
}
