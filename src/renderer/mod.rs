//! Canvas-2D rendering module
//!
//! Draws one frame from immutable simulation state. Missing sprites are
//! skipped, never fatal: the game stays playable in a degraded state.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::assets::Assets;
use crate::consts::MAX_LIVES;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, Obstacle, ObstacleKind, PowerUp};

pub struct Renderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl Renderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    /// Draw one frame. `now_ms` drives the scroll offset and flicker
    /// phases so animation continues even while the sim is not ticking.
    pub fn draw(&self, state: &GameState, assets: &Assets, settings: &Settings, now_ms: f64) {
        if !assets.ready() {
            self.draw_loading();
            return;
        }

        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);

        if settings.parallax {
            if let Some(bg) = assets.get("bg") {
                self.draw_scrolling_layer(bg, now_ms);
            }
        }
        if let Some(ground) = assets.get("ground") {
            self.draw_scrolling_layer(ground, now_ms);
            self.draw_platforms(state, ground);
        }

        if settings.particles {
            self.draw_smoke(state);
        }

        self.draw_player(state, assets, settings, now_ms);
        self.draw_hearts(state);

        for obstacle in &state.obstacles {
            self.draw_obstacle(obstacle, assets);
        }
        for power_up in &state.power_ups {
            self.draw_power_up(power_up, settings, now_ms);
        }

        self.draw_effect_badges(state, now_ms);

        if state.phase == GamePhase::Ended {
            self.draw_game_over(state);
        }
    }

    fn draw_loading(&self) {
        self.ctx.set_fill_style_str("#87CEEB");
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
        self.ctx.set_fill_style_str("#FFF");
        self.ctx.set_font("bold 32px Arial");
        self.ctx.set_text_align("center");
        let _ = self
            .ctx
            .fill_text("Loading Assets...", self.width / 2.0, self.height / 2.0);
    }

    /// Tile a full-height layer horizontally, offset by the wall clock so
    /// it loops forever
    fn draw_scrolling_layer(&self, img: &HtmlImageElement, now_ms: f64) {
        let scale = self.height / img.natural_height() as f64;
        let scaled_w = img.natural_width() as f64 * scale;
        if scaled_w <= 0.0 {
            return;
        }

        let offset = -(now_ms / 100.0) % scaled_w;
        let mut x = -scaled_w + offset;
        while x < self.width {
            let _ = self
                .ctx
                .draw_image_with_html_image_element_and_dw_and_dh(img, x, 0.0, scaled_w, self.height);
            x += scaled_w;
        }
    }

    /// Platforms reuse the ground texture, tiled at platform height
    fn draw_platforms(&self, state: &GameState, ground: &HtmlImageElement) {
        let src_w = ground.natural_width() as f64;
        let src_h = ground.natural_height() as f64;
        if src_h <= 0.0 {
            return;
        }
        let aspect = src_w / src_h;

        for platform in &state.platforms {
            let rect = &platform.rect;
            let tile_w = rect.h as f64 * aspect;
            let mut x = rect.x as f64;
            let end = (rect.x + rect.w) as f64;
            while x < end {
                let draw_w = tile_w.min(end - x);
                let _ = self
                    .ctx
                    .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                        ground,
                        0.0,
                        0.0,
                        src_w * (draw_w / tile_w),
                        src_h,
                        x,
                        rect.y as f64,
                        draw_w,
                        rect.h as f64,
                    );
                x += tile_w;
            }
        }
    }

    fn draw_smoke(&self, state: &GameState) {
        for particle in &state.particles {
            let alpha = (particle.life * 0.5) as f64;
            let size = ((1.0 - particle.life) * 8.0 + 2.0) as f64;

            self.ctx.set_global_alpha(alpha);
            self.ctx.set_fill_style_str("#888888");
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                particle.pos.x as f64,
                particle.pos.y as f64,
                size,
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.fill();
        }
        self.ctx.set_global_alpha(1.0);
    }

    fn draw_player(&self, state: &GameState, assets: &Assets, settings: &Settings, now_ms: f64) {
        let alpha = if settings.reduced_motion {
            if state.invincible || state.grace_ms > 0.0 {
                0.7
            } else {
                1.0
            }
        } else if state.invincible {
            (now_ms / 100.0).sin() * 0.3 + 0.7
        } else if state.grace_ms > 0.0 {
            (now_ms / 80.0).sin() * 0.4 + 0.6
        } else {
            1.0
        };

        self.ctx.set_global_alpha(alpha);
        if let Some(sprite) = assets.get("char") {
            let p = &state.player;
            let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                sprite, p.x as f64, p.y as f64, p.w as f64, p.h as f64,
            );
        }
        self.ctx.set_global_alpha(1.0);
    }

    /// Diamond heart pips over the player sprite
    fn draw_hearts(&self, state: &GameState) {
        for i in 0..MAX_LIVES {
            let x = (state.player.x + 12.0 + i as f32 * 12.0) as f64;
            let y = (state.player.y + 25.0) as f64;

            self.ctx
                .set_fill_style_str(if i < state.lives { "#FF0000" } else { "#666666" });
            self.ctx.begin_path();
            self.ctx.move_to(x + 4.0, y);
            self.ctx.line_to(x + 8.0, y + 4.0);
            self.ctx.line_to(x + 4.0, y + 8.0);
            self.ctx.line_to(x, y + 4.0);
            self.ctx.close_path();
            self.ctx.fill();
        }
    }

    fn draw_obstacle(&self, obstacle: &Obstacle, assets: &Assets) {
        let r = &obstacle.rect;
        let (x, y, w, h) = (r.x as f64, r.y as f64, r.w as f64, r.h as f64);

        let sprite = match obstacle.kind {
            ObstacleKind::Ground => assets.get("rock_a"),
            ObstacleKind::Moving => assets.get("rock_b"),
            ObstacleKind::Spike => assets.get("plant"),
            ObstacleKind::Flying => {
                // Vector-drawn: two-tone box
                self.ctx.set_fill_style_str("#4B0082");
                self.ctx.fill_rect(x, y, w, h);
                self.ctx.set_fill_style_str("#8A2BE2");
                self.ctx.fill_rect(x + 7.0, y + 5.0, w - 14.0, h - 10.0);
                return;
            }
        };

        if let Some(sprite) = sprite {
            let _ = self
                .ctx
                .draw_image_with_html_image_element_and_dw_and_dh(sprite, x, y, w, h);
        }
    }

    fn draw_power_up(&self, power_up: &PowerUp, settings: &Settings, now_ms: f64) {
        let pulse = if settings.reduced_motion {
            1.0
        } else {
            1.0 + (now_ms / 200.0).sin() * 0.1
        };
        let r = &power_up.rect;
        let cx = (r.x + r.w / 2.0) as f64;
        let cy = (r.y + r.h / 2.0) as f64;
        let w = r.w as f64 * pulse;
        let h = r.h as f64 * pulse;

        self.ctx.set_fill_style_str(power_up.kind.color());
        self.ctx.fill_rect(cx - w / 2.0, cy - h / 2.0, w, h);

        self.ctx.set_fill_style_str("#FFF");
        self.ctx.set_font("bold 18px Arial");
        self.ctx.set_text_align("center");
        let _ = self.ctx.fill_text(power_up.kind.symbol(), cx, cy + 6.0);
    }

    /// Active-effect badges with countdowns, stacked top-left
    fn draw_effect_badges(&self, state: &GameState, now_ms: f64) {
        self.ctx.set_font("bold 14px Arial");
        self.ctx.set_text_align("left");

        let mut y = 10.0;
        for effect in &state.effects {
            let text = format!("{}: {}s", effect.kind.label(), effect.secs_left(now_ms));

            self.ctx.set_fill_style_str("rgba(0, 0, 0, 0.5)");
            self.ctx.fill_rect(10.0, y, 150.0, 20.0);
            self.ctx.set_fill_style_str(effect.kind.color());
            let _ = self.ctx.fill_text(&text, 15.0, y + 15.0);
            y += 25.0;
        }
    }

    fn draw_game_over(&self, state: &GameState) {
        self.ctx.set_fill_style_str("rgba(0, 0, 0, 0.8)");
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);

        self.ctx.set_fill_style_str("#FFF");
        self.ctx.set_text_align("center");
        self.ctx.set_font("bold 48px Arial");
        let _ = self
            .ctx
            .fill_text("Game Over!", self.width / 2.0, self.height / 2.0 - 30.0);

        self.ctx.set_font("bold 24px Arial");
        let _ = self.ctx.fill_text(
            &format!("Final Score: {}", state.score),
            self.width / 2.0,
            self.height / 2.0 + 20.0,
        );

        self.ctx.set_font("bold 18px Arial");
        self.ctx.set_fill_style_str("#FFD700");
        let _ = self.ctx.fill_text(
            "You ran out of lives!",
            self.width / 2.0,
            self.height / 2.0 + 50.0,
        );
    }
}
