//! Scene entities
//!
//! Sprites are tagged by kind and addressed by a stable id; the scene looks
//! them up by id instead of inspecting types at runtime.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::action::{ActionSequence, ActionStatus};
use super::body::Body;
use super::category::Category;
use crate::consts::*;

/// Unique identifier for a sprite within a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// What a sprite is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    Player,
    Arm,
    Monster,
}

impl SpriteKind {
    /// Image asset this kind is drawn with
    pub fn image(self) -> &'static str {
        match self {
            SpriteKind::Player => crate::assets::PLAYER_IMAGE,
            SpriteKind::Arm => crate::assets::ARM_IMAGE,
            SpriteKind::Monster => crate::assets::MONSTER_IMAGE,
        }
    }
}

/// A positioned, sized scene entity (anchored at its centre)
#[derive(Debug, Clone)]
pub struct Sprite {
    pub id: EntityId,
    pub kind: SpriteKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub z: f32,
    pub body: Option<Body>,
    /// Running action sequence, if any
    pub actions: Option<ActionSequence>,
}

impl Sprite {
    /// Player: rectangle body, listens for monsters
    pub fn player(id: EntityId, pos: Vec2) -> Self {
        Self {
            id,
            kind: SpriteKind::Player,
            pos,
            size: PLAYER_SIZE,
            z: PLAYER_Z,
            body: Some(Body::rect(PLAYER_SIZE, Category::PLAYER).with_contact_test(Category::MONSTER)),
            actions: None,
        }
    }

    /// Arm: circle body of half its width, listens for monsters
    pub fn arm(id: EntityId, pos: Vec2) -> Self {
        Self {
            id,
            kind: SpriteKind::Arm,
            pos,
            size: ARM_SIZE,
            z: ARM_Z,
            body: Some(Body::circle(ARM_SIZE.x / 2.0, Category::ARM).with_contact_test(Category::MONSTER)),
            actions: None,
        }
    }

    /// Monster: rectangle body, listens for the arm
    pub fn monster(id: EntityId, pos: Vec2) -> Self {
        Self {
            id,
            kind: SpriteKind::Monster,
            pos,
            size: MONSTER_SIZE,
            z: MONSTER_Z,
            body: Some(Body::rect(MONSTER_SIZE, Category::MONSTER).with_contact_test(Category::ARM)),
            actions: None,
        }
    }

    /// Category of the attached body (NONE without one)
    pub fn category(&self) -> Category {
        self.body.as_ref().map_or(Category::NONE, |b| b.category)
    }

    /// Replace whatever the sprite was doing
    pub fn run(&mut self, actions: ActionSequence) {
        self.actions = Some(actions);
    }

    pub fn has_actions(&self) -> bool {
        self.actions.is_some()
    }

    /// Advance the running sequence; finished sequences are dropped
    pub fn advance_actions(&mut self, dt: f32) -> ActionStatus {
        let Some(actions) = self.actions.as_mut() else {
            return ActionStatus::Finished;
        };
        let status = actions.advance(&mut self.pos, dt);
        if status != ActionStatus::Running {
            self.actions = None;
        }
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::action::Action;

    #[test]
    fn test_bodies_match_roles() {
        let player = Sprite::player(EntityId(1), Vec2::ZERO);
        let arm = Sprite::arm(EntityId(2), Vec2::ZERO);
        let monster = Sprite::monster(EntityId(3), Vec2::ZERO);

        assert_eq!(player.category(), Category::PLAYER);
        assert_eq!(arm.category(), Category::ARM);
        assert_eq!(monster.category(), Category::MONSTER);

        let body = monster.body.as_ref().unwrap();
        assert_eq!(body.contact_test, Category::ARM);
        assert_eq!(body.collision, Category::NONE);
        assert!(arm.z > player.z && player.z > monster.z);
    }

    #[test]
    fn test_advance_drops_finished_sequence() {
        let mut sprite = Sprite::monster(EntityId(1), Vec2::ZERO);
        sprite.run(ActionSequence::new([Action::MoveTo {
            target: Vec2::new(4.0, 0.0),
            duration: 0.5,
        }]));
        assert!(sprite.has_actions());

        assert_eq!(sprite.advance_actions(0.25), ActionStatus::Running);
        assert_eq!(sprite.advance_actions(0.25), ActionStatus::Finished);
        assert!(!sprite.has_actions());
        assert_eq!(sprite.pos, Vec2::new(4.0, 0.0));
    }

    #[test]
    fn test_images() {
        assert_eq!(SpriteKind::Arm.image(), "sword");
        assert_eq!(SpriteKind::Monster.image(), "monster");
    }
}
