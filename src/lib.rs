//! Monster Swipe - a one-screen arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (scenes, actions, contacts, scoring)
//! - `settings`: Player preferences
//! - `audio`: Browser audio playback (wasm32 only)
//! - `renderer`: Canvas 2D drawing (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Slack used when comparing accumulated frame time against a deadline
    pub const TIME_EPSILON: f32 = 1e-4;

    /// Field size used when no surface dictates one (landscape phone)
    pub const DEFAULT_FIELD_SIZE: Vec2 = Vec2::new(667.0, 375.0);

    /// Sprite sizes (match the image assets)
    pub const PLAYER_SIZE: Vec2 = Vec2::new(40.0, 60.0);
    pub const ARM_SIZE: Vec2 = Vec2::new(30.0, 30.0);
    pub const MONSTER_SIZE: Vec2 = Vec2::new(40.0, 40.0);

    /// Draw order
    pub const PLAYER_Z: f32 = 55.0;
    pub const ARM_Z: f32 = 75.0;
    pub const MONSTER_Z: f32 = 0.0;

    /// Player starts at this fraction of the field
    pub const PLAYER_START: Vec2 = Vec2::new(0.2, 0.5);

    /// Gap between the player's right edge and the resting arm
    pub const ARM_REST_GAP: f32 = 10.0;
    /// Gap at the far point of the lunge
    pub const ARM_LUNGE_GAP: f32 = 20.0;
    /// Lunge out / return durations (seconds)
    pub const ARM_LUNGE_OUT: f32 = 0.3;
    pub const ARM_LUNGE_BACK: f32 = 0.2;

    /// Seconds between monster spawns
    pub const SPAWN_INTERVAL: f32 = 1.0;
    /// Monster crossing time range [min, max) in seconds
    pub const CROSSING_MIN: f32 = 2.0;
    pub const CROSSING_MAX: f32 = 4.0;

    /// Distance the player lunges toward a tap
    pub const STRIKE_DISTANCE: f32 = 100.0;
    /// Duration of the player's strike move (seconds)
    pub const STRIKE_DURATION: f32 = 2.0;

    /// Winning needs a score strictly above this (10 destroys)
    pub const WIN_THRESHOLD: u32 = 9;

    /// Outcome message display time (seconds)
    pub const OUTCOME_DISPLAY: f32 = 3.0;
    /// Flip transition between scenes (seconds)
    pub const TRANSITION_DURATION: f32 = 0.5;

    /// Outcome label
    pub const LABEL_FONT_SIZE: f32 = 40.0;
    pub const WIN_MESSAGE: &str = "Good Job!";
    pub const LOSE_MESSAGE: &str = "Game Over";
}

/// Names of the external assets the shell loads
pub mod assets {
    pub const BACKGROUND_MUSIC: &str = "backgroundmusic.mp3";
    pub const STRIKE_SOUND: &str = "swordsound.mp3";
    pub const LABEL_FONT: &str = "Chalkduster";
    pub const PLAYER_IMAGE: &str = "player";
    pub const ARM_IMAGE: &str = "sword";
    pub const MONSTER_IMAGE: &str = "monster";

    /// Directory the shell serves assets from
    pub const ASSET_ROOT: &str = "assets";

    /// Image assets are PNGs under the asset root
    pub fn image_path(name: &str) -> String {
        format!("{ASSET_ROOT}/{name}.png")
    }

    /// Sound assets keep their file name under the asset root
    pub fn sound_path(file: &str) -> String {
        format!("{ASSET_ROOT}/{file}")
    }
}

/// Convert between scene space (origin bottom-left, y up) and screen space
/// (origin top-left, y down). The mapping is its own inverse.
#[inline]
pub fn flip_y(pos: Vec2, field_height: f32) -> Vec2 {
    Vec2::new(pos.x, field_height - pos.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_y_round_trips() {
        let p = Vec2::new(12.0, 30.0);
        let screen = flip_y(p, 375.0);
        assert_eq!(screen, Vec2::new(12.0, 345.0));
        assert_eq!(flip_y(screen, 375.0), p);
    }

    #[test]
    fn test_asset_paths() {
        assert_eq!(assets::image_path(assets::ARM_IMAGE), "assets/sword.png");
        assert_eq!(
            assets::sound_path(assets::STRIKE_SOUND),
            "assets/swordsound.mp3"
        );
    }
}
