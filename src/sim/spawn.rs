//! Entity spawners
//!
//! Three independent wall-clock timers (obstacles, platforms, power-ups).
//! Each spawn draws a variant and geometry from the instance RNG, then
//! re-arms its timer with a randomized interval inside a fixed band so
//! spacing is irregular but bounded.
//!
//! The timers compare against host-supplied wall-clock time and are not
//! suspended while the host skips ticks; a long pause is followed by an
//! immediate catch-up spawn.

use rand::Rng;

use super::state::{GameState, Obstacle, ObstacleKind, Platform, PlatformKind, PowerUp, PowerUpKind, Rect};

pub fn spawn_obstacle(state: &mut GameState, now_ms: f64) {
    if now_ms - state.last_obstacle_at <= state.obstacle_interval {
        return;
    }

    let ground_y = state.ground_y;
    let x = state.view_w;
    let kind = match state.rng.random_range(0..4u8) {
        0 => ObstacleKind::Ground,
        1 => ObstacleKind::Flying,
        2 => ObstacleKind::Moving,
        _ => ObstacleKind::Spike,
    };

    let obstacle = match kind {
        ObstacleKind::Ground => Obstacle {
            rect: Rect::new(x, ground_y - 100.0, 100.0, 100.0),
            kind,
            passed: false,
            vel_y: 0.0,
            origin_y: 0.0,
            move_range: 0.0,
        },
        ObstacleKind::Flying => {
            let y = ground_y - 120.0 - state.rng.random_range(0.0..80.0f32);
            Obstacle {
                rect: Rect::new(x, y, 45.0, 35.0),
                kind,
                passed: false,
                vel_y: 0.0,
                origin_y: 0.0,
                move_range: 0.0,
            }
        }
        ObstacleKind::Moving => {
            let base_y = ground_y - 110.0;
            Obstacle {
                rect: Rect::new(x, base_y, 90.0, 90.0),
                kind,
                passed: false,
                vel_y: 1.0 + state.rng.random_range(0.0..2.0f32),
                origin_y: base_y,
                move_range: 60.0,
            }
        }
        ObstacleKind::Spike => Obstacle {
            rect: Rect::new(x, ground_y - 150.0, 80.0, 150.0),
            kind,
            passed: false,
            vel_y: 0.0,
            origin_y: 0.0,
            move_range: 0.0,
        },
    };

    state.obstacles.push(obstacle);
    state.last_obstacle_at = now_ms;
    state.obstacle_interval = 1200.0 + state.rng.random_range(0.0..800.0f64);
}

pub fn spawn_platform(state: &mut GameState, now_ms: f64) {
    if now_ms - state.last_platform_at <= state.platform_interval {
        return;
    }

    let width = 100.0 + state.rng.random_range(0.0..60.0f32);
    let height = 20.0;
    let y = state.ground_y - 80.0 - state.rng.random_range(0.0..100.0f32);
    let rect = Rect::new(state.view_w, y, width, height);

    let platform = if state.rng.random_range(0..2u8) == 0 {
        Platform {
            rect,
            kind: PlatformKind::Static,
            passed: false,
            vel_y: 0.0,
            origin_y: y,
            move_range: 0.0,
        }
    } else {
        Platform {
            rect,
            kind: PlatformKind::Moving,
            passed: false,
            vel_y: 0.5 + state.rng.random_range(0.0..1.0f32),
            origin_y: y,
            move_range: 30.0,
        }
    };

    state.platforms.push(platform);
    state.last_platform_at = now_ms;
    state.platform_interval = 2500.0 + state.rng.random_range(0.0..3000.0f64);
}

pub fn spawn_power_up(state: &mut GameState, now_ms: f64) {
    if now_ms - state.last_powerup_at <= state.powerup_interval {
        return;
    }

    let kind = match state.rng.random_range(0..4u8) {
        0 => PowerUpKind::Speed,
        1 => PowerUpKind::Invincibility,
        2 => PowerUpKind::DoubleJump,
        _ => PowerUpKind::ScoreMultiplier,
    };
    let y = state.ground_y - 80.0 - state.rng.random_range(0.0..80.0f32);

    state.power_ups.push(PowerUp {
        rect: Rect::new(state.view_w, y, 40.0, 40.0),
        kind,
        collected: false,
    });
    state.last_powerup_at = now_ms;
    state.powerup_interval = 6000.0 + state.rng.random_range(0.0..4000.0f64);
}
