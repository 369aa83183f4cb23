//! Data-driven game balance
//!
//! Every gameplay constant lives here. Durations are in seconds and speeds in
//! pixels per second; the `*_ticks` / `*_per_tick` helpers convert them using the
//! fixed tick rate so the simulation never sees a variable timestep.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Problems found while loading or validating a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("`{field}` must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("`asteroid_jag` must be within [0, 1] (got {0})")]
    JagOutOfRange(f32),
    #[error("asteroid points must differ per tier (got {large}/{medium}/{small})")]
    PointsNotDistinct { large: u64, medium: u64, small: u64 },
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Logical ticks per second
    pub tick_rate: u32,
    pub arena_width: f32,
    pub arena_height: f32,

    // === Ship ===
    /// Collision radius of the ship (px)
    pub ship_size: f32,
    /// Rotation speed (degrees per second)
    pub rotation_speed: f32,
    /// Thrust acceleration (px/s²)
    pub ship_thrust: f32,
    /// 0 = no friction
    pub friction: f32,
    pub explosion_duration: f32,
    pub respawn_invulnerability_duration: f32,
    pub blink_duration: f32,
    pub starting_lives: u32,

    // === Asteroids ===
    /// Asteroids spawned on level 0
    pub asteroid_count: u32,
    /// Average vertex count
    pub asteroid_vertices: u32,
    /// Silhouette jaggedness, range [0, 1]
    pub asteroid_jag: f32,
    /// Max starting speed (px/s)
    pub asteroid_speed: f32,
    /// Diameter of a large asteroid (px)
    pub asteroid_size: f32,
    pub points_large: u64,
    pub points_medium: u64,
    pub points_small: u64,

    // === Lasers ===
    pub laser_max: usize,
    /// px/s
    pub laser_speed: f32,
    pub laser_explode_duration: f32,

    // === HUD ===
    /// Seconds for a banner to fade from opaque to invisible
    pub banner_fade_time: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_rate: 100,
            arena_width: 860.0,
            arena_height: 660.0,

            ship_size: 15.0,
            rotation_speed: 360.0,
            ship_thrust: 5.0,
            friction: 0.4,
            explosion_duration: 0.3,
            respawn_invulnerability_duration: 1.0,
            blink_duration: 0.1,
            starting_lives: 3,

            asteroid_count: 3,
            asteroid_vertices: 10,
            asteroid_jag: 0.3,
            asteroid_speed: 50.0,
            asteroid_size: 100.0,
            points_large: 20,
            points_medium: 50,
            points_small: 100,

            laser_max: 10,
            laser_speed: 500.0,
            laser_explode_duration: 0.1,

            banner_fade_time: 2.5,
        }
    }
}

/// Convert seconds to a whole number of ticks (at least one)
fn seconds_to_ticks(seconds: f32, tick_rate: u32) -> u32 {
    ((seconds * tick_rate as f32).round() as u32).max(1)
}

impl Tuning {
    /// Parse and validate tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("tick_rate", self.tick_rate as f32),
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("ship_size", self.ship_size),
            ("asteroid_size", self.asteroid_size),
            ("asteroid_vertices", self.asteroid_vertices as f32),
            ("blink_duration", self.blink_duration),
            ("explosion_duration", self.explosion_duration),
            ("laser_explode_duration", self.laser_explode_duration),
            ("banner_fade_time", self.banner_fade_time),
        ];
        for (field, value) in positive {
            if value <= 0.0 || !value.is_finite() {
                return Err(TuningError::NotPositive { field, value });
            }
        }
        if !(0.0..=1.0).contains(&self.asteroid_jag) {
            return Err(TuningError::JagOutOfRange(self.asteroid_jag));
        }
        let (large, medium, small) = (self.points_large, self.points_medium, self.points_small);
        if large == medium || medium == small || large == small {
            return Err(TuningError::PointsNotDistinct {
                large,
                medium,
                small,
            });
        }
        Ok(())
    }

    pub fn arena(&self) -> glam::Vec2 {
        glam::Vec2::new(self.arena_width, self.arena_height)
    }

    /// Ticks the ship spends exploding
    pub fn explosion_ticks(&self) -> u32 {
        seconds_to_ticks(self.explosion_duration, self.tick_rate)
    }

    /// Ticks between blink flips
    pub fn blink_ticks(&self) -> u32 {
        seconds_to_ticks(self.blink_duration, self.tick_rate)
    }

    /// Blinks granted by a full invulnerability window
    pub fn respawn_blinks(&self) -> u32 {
        (self.respawn_invulnerability_duration / self.blink_duration).round() as u32
    }

    pub fn laser_explode_ticks(&self) -> u32 {
        seconds_to_ticks(self.laser_explode_duration, self.tick_rate)
    }

    /// Angular velocity (radians per tick) while a rotate key is held
    pub fn rotation_per_tick(&self) -> f32 {
        self.rotation_speed.to_radians() / self.tick_rate as f32
    }

    pub fn laser_speed_per_tick(&self) -> f32 {
        self.laser_speed / self.tick_rate as f32
    }

    /// Banner alpha lost per tick
    pub fn banner_fade_per_tick(&self) -> f32 {
        1.0 / (self.banner_fade_time * self.tick_rate as f32)
    }

    /// Distance from the ship inside which no asteroid may spawn
    pub fn spawn_clearance(&self) -> f32 {
        self.asteroid_size * 2.0 + self.ship_size
    }
}
