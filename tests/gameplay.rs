//! Round-level scenarios driven through the public API

use glam::Vec2;

use monster_swipe::consts::*;
use monster_swipe::sim::{
    Director, EntityId, FrameInput, GameEvent, GameScene, SceneState,
};

fn director() -> Director {
    Director::new(DEFAULT_FIELD_SIZE, 2024)
}

/// Destroy `count` monsters through the contact entry point
fn destroy_monsters(game: &mut GameScene, count: usize) {
    for _ in 0..count {
        let monster = game.spawn_monster();
        let arm = game.arm().id;
        game.did_begin_contact(monster, arm);
    }
}

fn presented(events: &[GameEvent], wanted: SceneState) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, GameEvent::ScenePresented { state, .. } if *state == wanted))
        .count()
}

#[test]
fn ten_destroys_win_the_round() {
    let mut director = director();
    let game = director.game_mut().unwrap();

    destroy_monsters(game, 9);
    assert_eq!(game.score(), 9);
    assert_eq!(game.outcome(), None);

    destroy_monsters(game, 1);
    assert_eq!(game.score(), 10);

    director.tick(&FrameInput::default(), SIM_DT);
    assert_eq!(director.state(), SceneState::Ended { won: true });
}

#[test]
fn score_counts_up_by_one() {
    let mut director = director();
    let game = director.game_mut().unwrap();
    let mut last = game.score();
    for _ in 0..5 {
        destroy_monsters(game, 1);
        assert_eq!(game.score(), last + 1);
        last = game.score();
    }

    let scores: Vec<u32> = director
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::MonsterDestroyed { score, .. } => Some(score),
            _ => None,
        })
        .collect();
    assert_eq!(scores, vec![1, 2, 3, 4, 5]);
}

#[test]
fn win_is_presented_exactly_once() {
    let mut director = director();
    director.drain_events();

    // Overshoot the threshold within a single frame
    destroy_monsters(director.game_mut().unwrap(), 12);
    director.tick(&FrameInput::default(), SIM_DT);
    director.tick(&FrameInput::default(), SIM_DT);

    let events = director.drain_events();
    assert_eq!(presented(&events, SceneState::Ended { won: true }), 1);
    assert_eq!(presented(&events, SceneState::Ended { won: false }), 0);
}

#[test]
fn player_hit_loses_regardless_of_score() {
    for score in [0usize, 5, 9] {
        let mut director = director();
        let game = director.game_mut().unwrap();
        destroy_monsters(game, score);

        let monster = game.spawn_monster();
        let player = game.player().id;
        game.did_begin_contact(player, monster);
        assert_eq!(game.outcome(), Some(SceneState::Ended { won: false }));

        director.tick(&FrameInput::default(), SIM_DT);
        assert_eq!(director.state(), SceneState::Ended { won: false });
        let events = director.drain_events();
        assert_eq!(presented(&events, SceneState::Ended { won: false }), 1);
    }
}

#[test]
fn outcome_returns_to_fresh_round_after_three_seconds() {
    let mut director = director();
    let game = director.game_mut().unwrap();
    destroy_monsters(game, 3);
    let monster = game.spawn_monster();
    let player = game.player().id;
    game.did_begin_contact(monster, player);
    director.tick(&FrameInput::default(), SIM_DT);
    assert_eq!(director.state(), SceneState::Ended { won: false });

    // 2.99s: still showing the message
    for _ in 0..359 {
        director.tick(&FrameInput::default(), SIM_DT);
    }
    assert_eq!(director.state(), SceneState::Ended { won: false });

    // 3.0s: new round
    director.tick(&FrameInput::default(), SIM_DT);
    assert_eq!(director.state(), SceneState::Playing);
    let game = director.game().unwrap();
    assert_eq!(game.score(), 0);
    assert_eq!(game.monsters().len(), 1);
    assert_eq!(game.monsters()[0].id, EntityId(3));
}

#[test]
fn escaped_monster_leaves_quietly() {
    let mut game = GameScene::new(DEFAULT_FIELD_SIZE, 99);
    // Keep the player and arm out of every monster's path
    game.player_mut().pos = Vec2::new(-1000.0, -1000.0);

    let (id, duration) = game
        .drain_events()
        .into_iter()
        .find_map(|e| match e {
            GameEvent::MonsterSpawned { id, duration, .. } => Some((id, duration)),
            _ => None,
        })
        .unwrap();

    let ticks = (duration / SIM_DT).ceil() as usize + 1;
    let mut escaped = false;
    for _ in 0..ticks {
        assert_eq!(game.tick(None, SIM_DT), None);
        escaped |= game
            .drain_events()
            .contains(&GameEvent::MonsterEscaped { id });
    }

    assert!(escaped);
    assert!(game.monster(id).is_none());
    assert_eq!(game.score(), 0);
    assert_eq!(game.outcome(), None);
}

#[test]
fn monster_crosses_at_constant_height() {
    let mut game = GameScene::new(DEFAULT_FIELD_SIZE, 5);
    game.player_mut().pos = Vec2::new(-1000.0, -1000.0);
    let first = game.monsters()[0].clone();

    for _ in 0..60 {
        game.tick(None, SIM_DT);
    }
    let moved = game.monster(first.id).unwrap();
    assert_eq!(moved.pos.y, first.pos.y);
    assert!(moved.pos.x < first.pos.x);
}

#[test]
fn tap_plays_sound_and_moves_player() {
    let mut director = director();
    director.drain_events();
    let start = director.game().unwrap().player().pos;

    let tap = FrameInput {
        release: Some(start + Vec2::new(0.0, 50.0)),
    };
    director.tick(&tap, SIM_DT);

    let events = director.drain_events();
    assert!(events.contains(&GameEvent::PlaySound(monster_swipe::sim::Sound::Strike)));
    assert!(events.contains(&GameEvent::StrikeIssued {
        target: start + Vec2::new(0.0, STRIKE_DISTANCE),
    }));
    let now = director.game().unwrap().player().pos;
    assert!(now.y > start.y);
}
