//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only advances through `tick`
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod action;
pub mod body;
pub mod category;
pub mod contact;
pub mod director;
pub mod game;
pub mod outcome;
pub mod sprite;
pub mod state;

pub use action::{Action, ActionSequence, ActionStatus};
pub use body::{Body, ContactTracker, Shape};
pub use category::Category;
pub use contact::{ContactRule, classify};
pub use director::{Director, FrameInput, Scene};
pub use game::GameScene;
pub use outcome::OutcomeScene;
pub use sprite::{EntityId, Sprite, SpriteKind};
pub use state::{GameEvent, SceneError, SceneState, Sound, Transition};
