//! Scene state, events and errors shared by every scene

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::sprite::EntityId;
use crate::consts::TRANSITION_DURATION;

/// Which scene the game is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneState {
    /// Monsters are coming
    Playing,
    /// Outcome message on screen
    Ended { won: bool },
}

/// Sound cues the host plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sound {
    /// Sword swing (tap and monster hit)
    Strike,
}

/// Animation the host plays while swapping scenes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Transition {
    /// Cut straight to the next scene
    None,
    /// Flip horizontally over the given seconds
    FlipHorizontal { duration: f32 },
}

impl Default for Transition {
    fn default() -> Self {
        Transition::FlipHorizontal {
            duration: TRANSITION_DURATION,
        }
    }
}

/// Things that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlaySound(Sound),
    MonsterSpawned { id: EntityId, y: f32, duration: f32 },
    MonsterDestroyed { id: EntityId, score: u32 },
    MonsterEscaped { id: EntityId },
    PlayerHit { monster: EntityId },
    StrikeIssued { target: Vec2 },
    ScenePresented { state: SceneState, transition: Transition },
}

/// Scene construction failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    /// Scenes are built from a field size, never restored from an archive
    #[error("scene decoding is not supported")]
    DecodeUnsupported,
}
