//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and host-independent:
//! - Seeded RNG only
//! - Wall-clock time is passed in by the host, never read here
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{aabb_overlap, platform_catch};
pub use state::{
    ActiveEffect, GameEvent, GamePhase, GameState, JumpKind, Obstacle, ObstacleKind, Platform,
    PlatformKind, Player, PowerUp, PowerUpKind, Rect, SmokeParticle, Stats,
};
pub use tick::{TickInput, tick};
