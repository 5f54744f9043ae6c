//! Canyon Dash - a side-scrolling canyon runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning, game state)
//! - `renderer`: Canvas-2D rendering (wasm)
//! - `assets`: Named image loading with a resolved-count gate (wasm)
//! - `analytics`: Fire-and-forget telemetry collector
//! - `highscores`: Best-score persistence in LocalStorage
//! - `settings`: Presentation preferences

pub mod analytics;
#[cfg(target_arch = "wasm32")]
pub mod assets;
pub mod highscores;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Downward acceleration per frame (pixels/frame²)
    pub const GRAVITY: f32 = 0.45;
    /// Vertical impulse on jump (negative y is up)
    pub const JUMP_POWER: f32 = -13.0;
    /// Double jump impulse as a fraction of a grounded jump
    pub const DOUBLE_JUMP_FACTOR: f32 = 0.8;
    /// Horizontal run speed while a direction is held
    pub const MOVE_SPEED: f32 = 5.0;
    /// Per-frame horizontal velocity decay when no direction is held
    pub const FRICTION: f32 = 0.8;

    /// Leftward scroll speed applied to all world entities at game start
    pub const BASE_GAME_SPEED: f32 = 2.0;
    /// Scroll speed ramp per passed obstacle
    pub const SPEED_INCREMENT: f32 = 0.015;
    /// Scroll speed multiplier while a speed power-up is active
    pub const SPEED_BOOST_FACTOR: f32 = 1.5;

    pub const MAX_LIVES: u8 = 3;
    /// Post-damage window during which further collisions are ignored
    pub const GRACE_WINDOW_MS: f64 = 2000.0;
    /// Grace window is counted down per tick, not against the wall clock
    pub const GRACE_TICK_MS: f64 = 16.0;

    /// Ground strip height at the bottom of the viewport
    pub const GROUND_MARGIN: f32 = 40.0;
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    pub const PLAYER_SPAWN_X: f32 = 100.0;

    /// Points for scrolling an obstacle past the player
    pub const OBSTACLE_POINTS: u64 = 10;
    /// Points for scrolling a platform past the player
    pub const PLATFORM_POINTS: u64 = 5;
    /// Score multiplier while the scoreMultiplier power-up is active
    pub const SCORE_MULTIPLIER: u64 = 2;

    /// A platform catches the player only within this band below its top edge
    pub const PLATFORM_CATCH_BAND: f32 = 20.0;

    /// Initial spawn timer arming (ms after game start)
    pub const OBSTACLE_INTERVAL_MS: f64 = 1800.0;
    pub const PLATFORM_INTERVAL_MS: f64 = 3500.0;
    pub const POWERUP_INTERVAL_MS: f64 = 8000.0;

    /// Chance per grounded frame of emitting a smoke particle
    pub const SMOKE_CHANCE: f32 = 0.3;
    /// Smoke life lost per frame (life is a 0..=1 fraction)
    pub const SMOKE_FADE: f32 = 0.02;
    /// Particle pool cap
    pub const MAX_PARTICLES: usize = 256;
}
