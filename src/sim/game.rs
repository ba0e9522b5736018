//! The playing scene
//!
//! Owns the player, the arm and the live monsters. Each tick it:
//! - delivers a pending touch release (strike)
//! - re-pins the arm beside the player
//! - runs sprite actions and the spawner
//! - reports new contacts to the rule table

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::action::{Action, ActionSequence, ActionStatus};
use super::body::{Body, ContactTracker};
use super::contact::{ContactRule, Participant, classify};
use super::sprite::{EntityId, Sprite};
use super::state::{GameEvent, SceneState, Sound};
use crate::consts::*;

/// Monster-swiping scene
#[derive(Debug, Clone)]
pub struct GameScene {
    size: Vec2,
    seed: u64,
    rng: Pcg32,
    /// Seconds since the scene started
    time: f32,
    player: Sprite,
    arm: Sprite,
    /// Live monsters (spawn order)
    monsters: Vec<Sprite>,
    monsters_destroyed: u32,
    /// Seconds until the next spawn
    spawn_cooldown: f32,
    contacts: ContactTracker,
    /// Set once a win or loss has been decided
    outcome: Option<bool>,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameScene {
    /// Build a fresh scene for a field of `size`, spawning the first monster
    pub fn new(size: Vec2, seed: u64) -> Self {
        let player_pos = size * PLAYER_START;
        let mut scene = Self {
            size,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time: 0.0,
            player: Sprite::player(EntityId(1), player_pos),
            arm: Sprite::arm(EntityId(2), Vec2::ZERO),
            monsters: Vec::new(),
            monsters_destroyed: 0,
            spawn_cooldown: SPAWN_INTERVAL,
            contacts: ContactTracker::new(),
            outcome: None,
            events: Vec::new(),
            next_id: 3,
        };
        scene.arm.pos = scene.arm_position(ARM_REST_GAP);

        log::info!("Game scene {}x{} (seed {})", size.x, size.y, seed);
        scene.spawn_monster();
        scene
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn score(&self) -> u32 {
        self.monsters_destroyed
    }

    pub fn player(&self) -> &Sprite {
        &self.player
    }

    /// Direct access for hosts that place the player themselves
    pub fn player_mut(&mut self) -> &mut Sprite {
        &mut self.player
    }

    pub fn arm(&self) -> &Sprite {
        &self.arm
    }

    pub fn monsters(&self) -> &[Sprite] {
        &self.monsters
    }

    pub fn monster(&self, id: EntityId) -> Option<&Sprite> {
        self.monsters.iter().find(|m| m.id == id)
    }

    /// Every sprite, in no particular draw order
    pub fn sprites(&self) -> impl Iterator<Item = &Sprite> {
        std::iter::once(&self.player)
            .chain(std::iter::once(&self.arm))
            .chain(self.monsters.iter())
    }

    /// `Ended` once a win or loss has been decided this scene
    pub fn outcome(&self) -> Option<SceneState> {
        self.outcome.map(|won| SceneState::Ended { won })
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Arm position `gap` past the player's right edge, raised half a player
    fn arm_position(&self, gap: f32) -> Vec2 {
        let p = &self.player;
        Vec2::new(p.pos.x + p.size.x + gap, p.pos.y + p.size.y / 2.0)
    }

    /// Add a monster just past the right edge, heading for the left edge
    pub fn spawn_monster(&mut self) -> EntityId {
        let id = self.next_entity_id();
        let half = MONSTER_SIZE / 2.0;

        let (min_y, max_y) = (half.y, self.size.y - half.y);
        let y = if min_y <= max_y {
            self.rng.random_range(min_y..=max_y)
        } else {
            self.size.y / 2.0
        };
        let duration = self.rng.random_range(CROSSING_MIN..CROSSING_MAX);

        let mut monster = Sprite::monster(id, Vec2::new(self.size.x + half.x, y));
        monster.run(ActionSequence::new([
            Action::MoveTo {
                target: Vec2::new(-half.x, y),
                duration,
            },
            Action::RemoveFromParent,
        ]));
        self.monsters.push(monster);

        log::debug!("Spawned monster {} at y={:.1}, crossing in {:.2}s", id.0, y, duration);
        self.events.push(GameEvent::MonsterSpawned { id, y, duration });
        id
    }

    /// Per-frame update: pin the arm beside the player
    pub fn update(&mut self, _current_time: f32) {
        self.arm.pos = self.arm_position(ARM_REST_GAP);
    }

    /// Touch/click released at `location`: lunge the player toward it
    pub fn touch_ended(&mut self, location: Vec2) {
        self.events.push(GameEvent::PlaySound(Sound::Strike));

        let offset = location - self.player.pos;
        if offset.length_squared() == 0.0 {
            return;
        }
        let target = self.player.pos + offset.normalize() * STRIKE_DISTANCE;
        self.player.run(ActionSequence::new([Action::MoveTo {
            target,
            duration: STRIKE_DURATION,
        }]));
        self.events.push(GameEvent::StrikeIssued { target });
    }

    /// Physics contact began between two bodies
    pub fn did_begin_contact(&mut self, a: EntityId, b: EntityId) {
        if self.outcome.is_some() {
            return;
        }
        let (Some(a), Some(b)) = (self.participant(a), self.participant(b)) else {
            return;
        };
        let Some(contact) = classify(a, b) else {
            return;
        };
        match contact.rule {
            ContactRule::PlayerHit => self.resolve_player_hit(contact.second.id, contact.first.id),
            ContactRule::MonsterDestroyed => {
                self.resolve_monster_destroyed(contact.second.id, contact.first.id)
            }
        }
    }

    /// The arm struck a live monster
    pub fn resolve_monster_destroyed(&mut self, arm: EntityId, monster: EntityId) {
        if arm != self.arm.id {
            log::warn!("Entity {} is not the arm", arm.0);
            return;
        }
        if !self.remove_monster(monster) {
            return;
        }
        log::info!("Monster {} got hit!", monster.0);
        self.events.push(GameEvent::PlaySound(Sound::Strike));

        let lunge = self.arm_position(ARM_LUNGE_GAP);
        let rest = self.arm_position(ARM_REST_GAP);
        self.arm.run(ActionSequence::new([
            Action::MoveTo {
                target: lunge,
                duration: ARM_LUNGE_OUT,
            },
            Action::MoveTo {
                target: rest,
                duration: ARM_LUNGE_BACK,
            },
        ]));

        self.monsters_destroyed += 1;
        self.events.push(GameEvent::MonsterDestroyed {
            id: monster,
            score: self.monsters_destroyed,
        });
        if self.monsters_destroyed > WIN_THRESHOLD {
            self.request_outcome(true);
        }
    }

    /// A live monster reached the player
    pub fn resolve_player_hit(&mut self, player: EntityId, monster: EntityId) {
        if player != self.player.id {
            log::warn!("Entity {} is not the player", player.0);
            return;
        }
        if !self.remove_monster(monster) {
            return;
        }
        log::info!("Player got hit by monster {}!", monster.0);
        self.events.push(GameEvent::PlayerHit { monster });
        self.request_outcome(false);
    }

    /// Advance the scene by `dt` seconds.
    ///
    /// Returns the requested end state once a win or loss is decided.
    pub fn tick(&mut self, release: Option<Vec2>, dt: f32) -> Option<SceneState> {
        self.time += dt;

        if let Some(location) = release {
            self.touch_ended(location);
        }
        self.update(self.time);
        self.run_actions(dt);
        self.run_spawner(dt);
        self.detect_contacts();

        self.outcome()
    }

    fn run_actions(&mut self, dt: f32) {
        self.player.advance_actions(dt);
        self.arm.advance_actions(dt);

        let mut escaped = Vec::new();
        self.monsters.retain_mut(|m| {
            if m.advance_actions(dt) == ActionStatus::Remove {
                escaped.push(m.id);
                false
            } else {
                true
            }
        });
        for id in escaped {
            log::debug!("Monster {} escaped", id.0);
            self.events.push(GameEvent::MonsterEscaped { id });
        }
    }

    fn run_spawner(&mut self, dt: f32) {
        self.spawn_cooldown -= dt;
        while self.spawn_cooldown <= TIME_EPSILON {
            self.spawn_monster();
            self.spawn_cooldown += SPAWN_INTERVAL;
        }
    }

    fn detect_contacts(&mut self) {
        let bodies: Vec<(EntityId, Vec2, &Body)> = std::iter::once(&self.player)
            .chain(std::iter::once(&self.arm))
            .chain(self.monsters.iter())
            .filter_map(|s| s.body.as_ref().map(|b| (s.id, s.pos, b)))
            .collect();
        let began = self.contacts.step(&bodies);

        for (a, b) in began {
            self.did_begin_contact(a, b);
        }
    }

    fn participant(&self, id: EntityId) -> Option<Participant> {
        self.sprites().find(|s| s.id == id).map(|s| Participant {
            id,
            category: s.category(),
        })
    }

    fn remove_monster(&mut self, id: EntityId) -> bool {
        let before = self.monsters.len();
        self.monsters.retain(|m| m.id != id);
        self.monsters.len() != before
    }

    fn request_outcome(&mut self, won: bool) {
        if self.outcome.is_none() {
            log::info!("Round over: {}", if won { "won" } else { "lost" });
            self.outcome = Some(won);
        }
    }
}
