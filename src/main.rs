//! Monster Swipe entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use monster_swipe::audio::AudioManager;
    use monster_swipe::consts::*;
    use monster_swipe::flip_y;
    use monster_swipe::renderer::CanvasRenderer;
    use monster_swipe::sim::{Director, FrameInput, GameEvent, SceneState};
    use monster_swipe::Settings;

    /// Game instance holding all state
    struct Game {
        director: Director,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: FrameInput,
        field_height: f32,
    }

    impl Game {
        fn new(size: Vec2, seed: u64, settings: Settings) -> Self {
            Self {
                director: Director::new(size, seed).with_transition(settings.transition()),
                renderer: None,
                audio: AudioManager::new(&settings),
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                input: FrameInput::default(),
                field_height: size.y,
            }
        }

        /// Queue a release at a canvas-relative point
        fn release_at(&mut self, x: f32, y: f32) {
            self.input.release = Some(flip_y(Vec2::new(x, y), self.field_height));
            // First gesture unlocks audio
            if self.director.state() == SceneState::Playing {
                self.audio.start_music();
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.director.tick(&self.input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.release = None;
            }

            for event in self.director.drain_events() {
                match event {
                    GameEvent::PlaySound(sound) => self.audio.play(sound),
                    GameEvent::ScenePresented { state, transition } => {
                        if let Some(renderer) = self.renderer.as_mut() {
                            renderer.begin_transition(transition);
                        }
                        if state == SceneState::Playing {
                            self.audio.start_music();
                        }
                    }
                    _ => {}
                }
            }
        }

        /// Render the current frame
        fn render(&mut self, dt: f32) {
            if let Some(ref mut renderer) = self.renderer {
                if let Err(e) = renderer.render(self.director.scene(), self.settings.show_score, dt) {
                    log::warn!("Render error: {:?}", e);
                }
            }
        }

        fn toggle_music(&mut self) {
            self.settings.music_enabled = !self.settings.music_enabled;
            self.audio.apply_settings(&self.settings);
            if self.settings.music_enabled {
                self.audio.start_music();
            }
            self.settings.save();
            log::info!("Music: {}", self.settings.music_enabled);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Monster Swipe starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Scene units are CSS pixels
        let client_w = canvas.client_width().max(1) as u32;
        let client_h = canvas.client_height().max(1) as u32;
        canvas.set_width(client_w);
        canvas.set_height(client_h);
        let size = Vec2::new(client_w as f32, client_h as f32);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(size, seed, settings)));

        log::info!("Game initialized with seed: {}", seed);

        match CanvasRenderer::new(&canvas) {
            Ok(renderer) => game.borrow_mut().renderer = Some(renderer),
            Err(e) => log::error!("Canvas unavailable: {:?}", e),
        }

        setup_input_handlers(&canvas, game.clone());
        setup_focus_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Monster Swipe running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse release
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .release_at(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch release
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.changed_touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    game.borrow_mut().release_at(x, y);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if matches!(event.key().as_str(), "m" | "M") {
                    game.borrow_mut().toggle_music();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_focus_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                    log::info!("Muted (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window focus
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.audio.set_muted(false);
                if g.director.state() == SceneState::Playing {
                    g.audio.start_music();
                }
            });
            let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render(dt);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Monster Swipe (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build for the playable version");

    let seconds: f32 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(30.0);
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    headless::run(seed, seconds);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use monster_swipe::Settings;
    use monster_swipe::consts::*;
    use monster_swipe::sim::{Director, FrameInput, GameEvent, SceneState};

    /// Seconds between scripted taps
    const TAP_INTERVAL: f32 = 0.75;

    /// Play for `seconds` of game time, tapping toward the most urgent monster
    pub fn run(seed: u64, seconds: f32) {
        let settings = Settings::load();
        let mut director =
            Director::new(DEFAULT_FIELD_SIZE, seed).with_transition(settings.transition());
        log::info!("Headless run: seed {}, {}s", seed, seconds);

        let ticks = (seconds / SIM_DT).round() as u64;
        let tap_every = (TAP_INTERVAL / SIM_DT).round() as u64;
        let (mut wins, mut losses) = (0u32, 0u32);

        for tick in 0..ticks {
            let input = FrameInput {
                release: if tick % tap_every == 0 { aim(&director) } else { None },
            };
            director.tick(&input, SIM_DT);

            for event in director.drain_events() {
                if let GameEvent::ScenePresented { state, .. } = &event {
                    match state {
                        SceneState::Ended { won: true } => wins += 1,
                        SceneState::Ended { won: false } => losses += 1,
                        SceneState::Playing => {}
                    }
                }
                match serde_json::to_string(&event) {
                    Ok(line) => log::info!("{}", line),
                    Err(e) => log::warn!("Unserializable event {:?}: {}", event, e),
                }
            }
        }

        log::info!("Done: {} rounds, {} won, {} lost", director.rounds(), wins, losses);
    }

    /// Tap level with the monster closest to the left edge, so the arm meets it
    fn aim(director: &Director) -> Option<Vec2> {
        let game = director.game()?;
        let player = game.player();
        let target = game
            .monsters()
            .iter()
            .filter(|m| m.pos.x > player.pos.x)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))?;
        let arm_lift = player.size.y / 2.0;
        Some(Vec2::new(player.pos.x, target.pos.y - arm_lift))
    }
}
