//! Canvas 2D renderer

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::assets;
use crate::consts::LABEL_FONT_SIZE;
use crate::flip_y;
use crate::sim::{Scene, Sprite, SpriteKind, Transition};

const GAME_BACKGROUND: &str = "#ffff00";
const OUTCOME_BACKGROUND: &str = "#0000ff";
const LABEL_COLOR: &str = "#000000";

/// Box colours used until the sprite images have loaded
fn placeholder_color(kind: SpriteKind) -> &'static str {
    match kind {
        SpriteKind::Player => "#2e7d32",
        SpriteKind::Arm => "#9e9e9e",
        SpriteKind::Monster => "#6a1b9a",
    }
}

/// Flip animation in progress
struct Flip {
    duration: f32,
    elapsed: f32,
}

impl Flip {
    /// Horizontal scale: 1 -> 0 -> 1 over the flip
    fn scale_x(&self) -> f64 {
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        (1.0 - 2.0 * t).abs() as f64
    }
}

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    /// Drawing size in CSS pixels
    size: (f64, f64),
    images: Vec<(SpriteKind, HtmlImageElement)>,
    flip: Option<Flip>,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let mut images = Vec::new();
        for kind in [SpriteKind::Player, SpriteKind::Arm, SpriteKind::Monster] {
            let img = HtmlImageElement::new()?;
            img.set_src(&assets::image_path(kind.image()));
            images.push((kind, img));
        }

        Ok(Self {
            ctx,
            size: (canvas.width() as f64, canvas.height() as f64),
            images,
            flip: None,
        })
    }

    /// Start the animation for a scene swap
    pub fn begin_transition(&mut self, transition: Transition) {
        self.flip = match transition {
            Transition::None => None,
            Transition::FlipHorizontal { duration } if duration > 0.0 => Some(Flip {
                duration,
                elapsed: 0.0,
            }),
            Transition::FlipHorizontal { .. } => None,
        };
    }

    /// Draw the current scene, advancing any flip by `dt` seconds
    pub fn render(&mut self, scene: &Scene, show_score: bool, dt: f32) -> Result<(), JsValue> {
        let (w, h) = self.size;
        self.ctx.save();

        if let Some(flip) = self.flip.as_mut() {
            flip.elapsed += dt;
            if flip.elapsed >= flip.duration {
                self.flip = None;
            }
        }
        if let Some(flip) = &self.flip {
            self.ctx.translate(w / 2.0, 0.0)?;
            self.ctx.scale(flip.scale_x().max(0.001), 1.0)?;
            self.ctx.translate(-w / 2.0, 0.0)?;
        }

        let result = match scene {
            Scene::Game(game) => {
                self.fill(GAME_BACKGROUND, w, h);
                let mut sprites: Vec<&Sprite> = game.sprites().collect();
                sprites.sort_by(|a, b| a.z.total_cmp(&b.z));
                sprites
                    .into_iter()
                    .try_for_each(|sprite| self.draw_sprite(sprite, h))
                    .and_then(|_| {
                        if show_score {
                            self.draw_score(game.score())
                        } else {
                            Ok(())
                        }
                    })
            }
            Scene::Outcome(outcome) => {
                self.fill(OUTCOME_BACKGROUND, w, h);
                let at = flip_y(outcome.label_position(), h as f32);
                self.ctx.set_fill_style_str(LABEL_COLOR);
                self.ctx
                    .set_font(&format!("{}px {}", LABEL_FONT_SIZE, assets::LABEL_FONT));
                self.ctx.set_text_align("center");
                self.ctx.set_text_baseline("middle");
                self.ctx
                    .fill_text(outcome.message(), at.x as f64, at.y as f64)
            }
        };

        self.ctx.restore();
        result
    }

    fn fill(&self, color: &str, w: f64, h: f64) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(0.0, 0.0, w, h);
    }

    fn draw_sprite(&self, sprite: &Sprite, field_height: f64) -> Result<(), JsValue> {
        let center = flip_y(sprite.pos, field_height as f32);
        let x = (center.x - sprite.size.x / 2.0) as f64;
        let y = (center.y - sprite.size.y / 2.0) as f64;
        let (sw, sh) = (sprite.size.x as f64, sprite.size.y as f64);

        let image = self
            .images
            .iter()
            .find(|(kind, _)| *kind == sprite.kind)
            .map(|(_, img)| img)
            .filter(|img| img.complete() && img.natural_width() > 0);

        match image {
            Some(img) => self
                .ctx
                .draw_image_with_html_image_element_and_dw_and_dh(img, x, y, sw, sh),
            None => {
                self.ctx.set_fill_style_str(placeholder_color(sprite.kind));
                self.ctx.fill_rect(x, y, sw, sh);
                Ok(())
            }
        }
    }

    fn draw_score(&self, score: u32) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str(LABEL_COLOR);
        self.ctx.set_font(&format!("20px {}", assets::LABEL_FONT));
        self.ctx.set_text_align("left");
        self.ctx.set_text_baseline("top");
        self.ctx.fill_text(&format!("Score: {}", score), 12.0, 12.0)
    }
}
