//! Scene director
//!
//! Top-level state machine: holds the current scene, routes ticks and input
//! to it, and swaps scenes through `present`.

use glam::Vec2;

use super::game::GameScene;
use super::outcome::OutcomeScene;
use super::state::{GameEvent, SceneError, SceneState, Transition};

/// The scene on screen
#[derive(Debug, Clone)]
pub enum Scene {
    Game(GameScene),
    Outcome(OutcomeScene),
}

impl Scene {
    pub fn state(&self) -> SceneState {
        match self {
            Scene::Game(_) => SceneState::Playing,
            Scene::Outcome(outcome) => SceneState::Ended {
                won: outcome.won(),
            },
        }
    }

    pub fn size(&self) -> Vec2 {
        match self {
            Scene::Game(game) => game.size(),
            Scene::Outcome(outcome) => outcome.size(),
        }
    }

    /// Scenes cannot be restored from an archive; they are always built fresh
    pub fn decode(_archive: &[u8]) -> Result<Scene, SceneError> {
        Err(SceneError::DecodeUnsupported)
    }
}

/// Input collected between ticks
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Touch/click released here (scene coordinates)
    pub release: Option<Vec2>,
}

pub struct Director {
    size: Vec2,
    seed: u64,
    /// Rounds started so far (also offsets each round's seed)
    rounds: u64,
    transition: Transition,
    scene: Scene,
    events: Vec<GameEvent>,
}

impl Director {
    /// Start the first round on a field of `size`
    pub fn new(size: Vec2, seed: u64) -> Self {
        let first = GameScene::new(size, seed.wrapping_add(1));
        log::info!("Presenting {:?}", SceneState::Playing);
        Self {
            size,
            seed,
            rounds: 1,
            transition: Transition::default(),
            scene: Scene::Game(first),
            events: vec![GameEvent::ScenePresented {
                state: SceneState::Playing,
                transition: Transition::None,
            }],
        }
    }

    /// Animation used for later scene swaps
    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn state(&self) -> SceneState {
        self.scene.state()
    }

    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// The playing scene, if that is what's on screen
    pub fn game(&self) -> Option<&GameScene> {
        match &self.scene {
            Scene::Game(game) => Some(game),
            Scene::Outcome(_) => None,
        }
    }

    pub fn game_mut(&mut self) -> Option<&mut GameScene> {
        match &mut self.scene {
            Scene::Game(game) => Some(game),
            Scene::Outcome(_) => None,
        }
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        if let Scene::Game(game) = &mut self.scene {
            self.events.extend(game.drain_events());
        }
        std::mem::take(&mut self.events)
    }

    /// Replace the current scene
    pub fn present(&mut self, mut next: Scene) {
        if let Scene::Game(old) = &mut self.scene {
            self.events.extend(old.drain_events());
        }
        let state = next.state();
        log::info!("Presenting {:?}", state);
        self.events.push(GameEvent::ScenePresented {
            state,
            transition: self.transition,
        });
        if let Scene::Game(game) = &mut next {
            self.events.extend(game.drain_events());
        }
        self.scene = next;
    }

    fn new_round(&mut self) -> GameScene {
        self.rounds += 1;
        GameScene::new(self.size, self.seed.wrapping_add(self.rounds))
    }

    /// Advance the current scene by `dt` seconds
    pub fn tick(&mut self, input: &FrameInput, dt: f32) {
        let mut restart = false;
        let next = match &mut self.scene {
            Scene::Game(game) => {
                let ended = game.tick(input.release, dt);
                self.events.extend(game.drain_events());
                match ended {
                    Some(SceneState::Ended { won }) => {
                        Some(Scene::Outcome(OutcomeScene::new(self.size, won)))
                    }
                    _ => None,
                }
            }
            Scene::Outcome(outcome) => {
                restart = outcome.tick(dt);
                None
            }
        };

        let next = if restart {
            Some(Scene::Game(self.new_round()))
        } else {
            next
        };
        if let Some(scene) = next {
            self.present(scene);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn director() -> Director {
        Director::new(DEFAULT_FIELD_SIZE, 7)
    }

    #[test]
    fn test_starts_playing() {
        let mut director = director();
        assert_eq!(director.state(), SceneState::Playing);
        assert_eq!(director.rounds(), 1);

        let events = director.drain_events();
        assert_eq!(
            events[0],
            GameEvent::ScenePresented {
                state: SceneState::Playing,
                transition: Transition::None,
            }
        );
        assert!(matches!(events[1], GameEvent::MonsterSpawned { .. }));
    }

    #[test]
    fn test_present_swaps_scene() {
        let mut director = director();
        director.drain_events();
        director.present(Scene::Outcome(OutcomeScene::new(DEFAULT_FIELD_SIZE, true)));

        assert_eq!(director.state(), SceneState::Ended { won: true });
        assert!(director.game().is_none());
        assert_eq!(
            director.drain_events(),
            vec![GameEvent::ScenePresented {
                state: SceneState::Ended { won: true },
                transition: Transition::default(),
            }]
        );
    }

    #[test]
    fn test_reduced_motion_transition() {
        let mut director = director().with_transition(Transition::None);
        director.drain_events();
        director.present(Scene::Outcome(OutcomeScene::new(DEFAULT_FIELD_SIZE, false)));
        assert_eq!(
            director.drain_events(),
            vec![GameEvent::ScenePresented {
                state: SceneState::Ended { won: false },
                transition: Transition::None,
            }]
        );
    }

    #[test]
    fn test_outcome_ignores_input_and_restarts() {
        let mut director = director();
        director.present(Scene::Outcome(OutcomeScene::new(DEFAULT_FIELD_SIZE, false)));
        director.drain_events();

        let tap = FrameInput {
            release: Some(Vec2::new(10.0, 10.0)),
        };
        for _ in 0..359 {
            director.tick(&tap, SIM_DT);
        }
        assert_eq!(director.state(), SceneState::Ended { won: false });
        assert!(director.drain_events().is_empty());

        director.tick(&FrameInput::default(), SIM_DT);
        assert_eq!(director.state(), SceneState::Playing);
        assert_eq!(director.rounds(), 2);

        let game = director.game().unwrap();
        assert_eq!(game.score(), 0);
        assert_eq!(game.monsters().len(), 1);
        assert_eq!(game.time(), 0.0);
    }

    #[test]
    fn test_rounds_use_distinct_seeds() {
        let mut director = director();
        let first = director.game().unwrap().seed();
        director.present(Scene::Outcome(OutcomeScene::new(DEFAULT_FIELD_SIZE, true)));
        for _ in 0..360 {
            director.tick(&FrameInput::default(), SIM_DT);
        }
        assert_ne!(director.game().unwrap().seed(), first);
    }

    #[test]
    fn test_decode_is_unsupported() {
        assert_eq!(
            Scene::decode(b"archive").unwrap_err(),
            SceneError::DecodeUnsupported
        );
    }
}
