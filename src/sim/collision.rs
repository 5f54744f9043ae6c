//! Collision tests for axis-aligned boxes
//!
//! Pure overlap checks, half-open on both axes: touching edges do not
//! collide. No swept tests — a fast enough obstacle can tunnel through
//! the player between frames, which is accepted.

use super::state::{Platform, Player, Rect};
use crate::consts::PLATFORM_CATCH_BAND;

/// Strict-inequality AABB overlap. `a.x + a.w == b.x` is NOT a hit.
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Whether a platform catches the player this frame.
///
/// Platforms are solid from above only: the player must be falling or
/// resting (`vel_y >= 0`), horizontally overlapping, with their foot band
/// inside a small tolerance below the platform's top edge.
pub fn platform_catch(player: &Player, platform: &Platform) -> bool {
    let p = &platform.rect;
    player.vel_y >= 0.0
        && player.x + player.w > p.x
        && player.x < p.x + p.w
        && player.y + player.h >= p.y
        && player.y + player.h <= p.y + PLATFORM_CATCH_BAND
}
