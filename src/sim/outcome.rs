//! Win/lose message scene
//!
//! Shows the result for a fixed time, then asks for a new round.

use glam::Vec2;

use crate::consts::*;

#[derive(Debug, Clone)]
pub struct OutcomeScene {
    size: Vec2,
    won: bool,
    /// Seconds on screen so far
    elapsed: f32,
}

impl OutcomeScene {
    pub fn new(size: Vec2, won: bool) -> Self {
        Self {
            size,
            won,
            elapsed: 0.0,
        }
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn message(&self) -> &'static str {
        if self.won { WIN_MESSAGE } else { LOSE_MESSAGE }
    }

    /// Label is centred in the field
    pub fn label_position(&self) -> Vec2 {
        self.size / 2.0
    }

    /// Advance by `dt`; true once the message has been up long enough
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.elapsed + TIME_EPSILON >= OUTCOME_DISPLAY
    }
}
