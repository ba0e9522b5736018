//! Declarative sprite actions
//!
//! A sprite may carry one action sequence. Each tick the sequence advances by
//! the frame time, moving the sprite and eventually asking for its removal.
//! Dropping the sprite drops its sequence, which is how in-flight actions get
//! cancelled.

use std::collections::VecDeque;

use glam::Vec2;

use crate::consts::TIME_EPSILON;

/// A single step of an action sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Move linearly from wherever the sprite is when the step starts
    MoveTo { target: Vec2, duration: f32 },
    /// Take the sprite out of the scene
    RemoveFromParent,
}

/// Result of advancing a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    /// Steps remain
    Running,
    /// Every step ran; the sprite stays
    Finished,
    /// A remove step ran; the owner must drop the sprite
    Remove,
}

/// Ordered steps run one after another
#[derive(Debug, Clone, PartialEq)]
pub struct ActionSequence {
    steps: VecDeque<Action>,
    /// Time spent in the current step
    elapsed: f32,
    /// Position captured when the current move started
    start: Option<Vec2>,
}

impl ActionSequence {
    pub fn new(steps: impl IntoIterator<Item = Action>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            elapsed: 0.0,
            start: None,
        }
    }

    /// Advance by `dt` seconds, writing the animated position into `pos`.
    ///
    /// Time left over after a step completes flows into the next step, so a
    /// chain of short moves stays in sync with wall time.
    pub fn advance(&mut self, pos: &mut Vec2, dt: f32) -> ActionStatus {
        let mut budget = dt;
        while let Some(step) = self.steps.front().copied() {
            match step {
                Action::MoveTo { target, duration } => {
                    let start = *self.start.get_or_insert(*pos);
                    let remaining = duration - self.elapsed;
                    if budget + TIME_EPSILON >= remaining {
                        *pos = target;
                        budget = (budget - remaining).max(0.0);
                        self.next_step();
                        continue;
                    }
                    self.elapsed += budget;
                    *pos = start + (target - start) * (self.elapsed / duration);
                    return ActionStatus::Running;
                }
                Action::RemoveFromParent => {
                    self.steps.clear();
                    return ActionStatus::Remove;
                }
            }
        }
        ActionStatus::Finished
    }

    pub fn is_finished(&self) -> bool {
        self.steps.is_empty()
    }

    fn next_step(&mut self) {
        self.steps.pop_front();
        self.elapsed = 0.0;
        self.start = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_interpolates_linearly() {
        let mut seq = ActionSequence::new([Action::MoveTo {
            target: Vec2::new(100.0, 0.0),
            duration: 2.0,
        }]);
        let mut pos = Vec2::ZERO;

        assert_eq!(seq.advance(&mut pos, 0.5), ActionStatus::Running);
        assert!((pos.x - 25.0).abs() < 1e-4);

        assert_eq!(seq.advance(&mut pos, 1.0), ActionStatus::Running);
        assert!((pos.x - 75.0).abs() < 1e-4);

        assert_eq!(seq.advance(&mut pos, 0.5), ActionStatus::Finished);
        assert_eq!(pos, Vec2::new(100.0, 0.0));
        assert!(seq.is_finished());
    }

    #[test]
    fn test_start_is_captured_once() {
        let mut seq = ActionSequence::new([Action::MoveTo {
            target: Vec2::new(10.0, 0.0),
            duration: 1.0,
        }]);
        let mut pos = Vec2::ZERO;
        seq.advance(&mut pos, 0.5);

        // Something else moved the sprite; the move keeps its own path
        let mut pos = Vec2::new(-50.0, 7.0);
        seq.advance(&mut pos, 0.25);
        assert!((pos.x - 7.5).abs() < 1e-4);
        assert!(pos.y.abs() < 1e-4);
    }

    #[test]
    fn test_leftover_time_flows_into_next_step() {
        let mut seq = ActionSequence::new([
            Action::MoveTo {
                target: Vec2::new(30.0, 0.0),
                duration: 0.3,
            },
            Action::MoveTo {
                target: Vec2::new(10.0, 0.0),
                duration: 0.2,
            },
        ]);
        let mut pos = Vec2::ZERO;

        // 0.4s: first move done, 0.1s into the return
        assert_eq!(seq.advance(&mut pos, 0.4), ActionStatus::Running);
        assert!((pos.x - 20.0).abs() < 1e-3);

        assert_eq!(seq.advance(&mut pos, 0.1), ActionStatus::Finished);
        assert_eq!(pos.x, 10.0);
    }

    #[test]
    fn test_remove_after_move() {
        let mut seq = ActionSequence::new([
            Action::MoveTo {
                target: Vec2::new(-20.0, 5.0),
                duration: 1.0,
            },
            Action::RemoveFromParent,
        ]);
        let mut pos = Vec2::new(100.0, 5.0);

        assert_eq!(seq.advance(&mut pos, 0.9), ActionStatus::Running);
        assert_eq!(seq.advance(&mut pos, 0.1), ActionStatus::Remove);
        assert_eq!(pos, Vec2::new(-20.0, 5.0));
    }

    #[test]
    fn test_zero_duration_move_snaps() {
        let mut seq = ActionSequence::new([Action::MoveTo {
            target: Vec2::ONE,
            duration: 0.0,
        }]);
        let mut pos = Vec2::ZERO;
        assert_eq!(seq.advance(&mut pos, 0.0), ActionStatus::Finished);
        assert_eq!(pos, Vec2::ONE);
    }
}
