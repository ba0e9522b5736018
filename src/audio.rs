//! Audio playback through HTML audio elements
//!
//! Sound files are served next to the page under `assets/`.

use web_sys::HtmlAudioElement;

use crate::assets;
use crate::settings::Settings;
use crate::sim::Sound;

/// Audio manager for the game
pub struct AudioManager {
    music: Option<HtmlAudioElement>,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        let music = match HtmlAudioElement::new_with_src(&assets::sound_path(assets::BACKGROUND_MUSIC)) {
            Ok(el) => {
                el.set_loop(true);
                Some(el)
            }
            Err(e) => {
                log::warn!("Failed to create music element - music disabled: {:?}", e);
                None
            }
        };
        let mut audio = Self {
            music,
            sfx_volume: 0.0,
            music_volume: 0.0,
            muted: false,
        };
        audio.apply_settings(settings);
        audio
    }

    /// Pick up volume changes
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.sfx_volume = settings.effective_sfx_volume();
        self.music_volume = settings.effective_music_volume();
        self.sync_music();
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.sync_music();
    }

    /// Start the looping background track (needs a prior user gesture)
    pub fn start_music(&self) {
        if self.muted || self.music_volume <= 0.0 {
            return;
        }
        if let Some(music) = &self.music {
            if music.paused() {
                // Autoplay may be refused until the player interacts
                let _ = music.play();
            }
        }
    }

    fn sync_music(&self) {
        let Some(music) = &self.music else { return };
        let vol = if self.muted { 0.0 } else { self.music_volume };
        music.set_volume(vol as f64);
        if vol <= 0.0 {
            let _ = music.pause();
        }
    }

    /// Play a sound cue
    pub fn play(&self, sound: Sound) {
        let vol = if self.muted { 0.0 } else { self.sfx_volume };
        if vol <= 0.0 {
            return;
        }
        let file = match sound {
            Sound::Strike => assets::STRIKE_SOUND,
        };
        // A fresh element per cue so overlapping swings don't cut each other off
        match HtmlAudioElement::new_with_src(&assets::sound_path(file)) {
            Ok(el) => {
                el.set_volume(vol as f64);
                let _ = el.play();
            }
            Err(e) => log::warn!("Failed to play {}: {:?}", file, e),
        }
    }
}
