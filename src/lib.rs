//! Asteroid Drift - a fixed-tick Asteroids simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ship, asteroids, lasers, collisions, scoring)
//! - `tuning`: Data-driven game balance
//! - `persistence`: Best-score storage backends
//! - `platform`: Key code to action mapping
//! - `audio`: Event to sound effect mapping

pub mod audio;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use persistence::{MemoryStore, ScoreStore, StoreError};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Host loop constants
pub mod consts {
    /// Maximum ticks run per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta (seconds) fed to the clock
    pub const MAX_FRAME_DELTA: f32 = 0.1;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Unit heading in screen space (y grows downward, so the y component is negated)
#[inline]
pub fn heading_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), -angle.sin())
}

/// Toroidal wrap of one coordinate into `[-margin, extent + margin)`.
///
/// `extent + margin` and `-margin` are the same point on the torus, so reaching
/// the far edge lands exactly on `-margin`. Overshoot is carried across. Values
/// already inside the band come back unchanged, which makes the wrap idempotent.
#[inline]
pub fn wrap_axis(value: f32, extent: f32, margin: f32) -> f32 {
    let low = -margin;
    let high = extent + margin;
    if (low..high).contains(&value) {
        return value;
    }
    let wrapped = low + (value - low).rem_euclid(high - low);
    // rem_euclid may round up to the full period
    if wrapped < high { wrapped } else { low }
}

/// Wrap a position on both axes independently
#[inline]
pub fn wrap_position(pos: Vec2, arena: Vec2, margin: f32) -> Vec2 {
    Vec2::new(
        wrap_axis(pos.x, arena.x, margin),
        wrap_axis(pos.y, arena.y, margin),
    )
}
