//! The player ship and its life cycle
//!
//! `Alive` → `Exploding` on a fatal hit, then back to `Alive` (respawn with a
//! blink window) or on to `Destroyed`, which only a new game undoes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;
use crate::{heading_vector, normalize_angle, wrap_position};

/// Ship life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeState {
    Alive,
    Exploding,
    /// Terminal until a new game
    Destroyed,
}

/// Post-respawn blink window. Both counters are zero when not invulnerable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invulnerability {
    pub blinks_remaining: u32,
    pub ticks_until_next_blink: u32,
}

impl Invulnerability {
    pub fn full(tuning: &Tuning) -> Self {
        let blinks = tuning.respawn_blinks();
        Self {
            blinks_remaining: blinks,
            ticks_until_next_blink: if blinks > 0 { tuning.blink_ticks() } else { 0 },
        }
    }

    pub fn is_active(&self) -> bool {
        self.blinks_remaining > 0
    }

    /// Visibility alternates with each consumed blink
    pub fn is_visible(&self) -> bool {
        self.blinks_remaining % 2 == 0
    }

    /// Count down one tick, consuming a blink when the timer runs out
    fn tick(&mut self, blink_ticks: u32) {
        if self.blinks_remaining == 0 {
            return;
        }
        self.ticks_until_next_blink = self.ticks_until_next_blink.saturating_sub(1);
        if self.ticks_until_next_blink == 0 {
            self.blinks_remaining -= 1;
            self.ticks_until_next_blink = if self.blinks_remaining > 0 { blink_ticks } else { 0 };
        }
    }
}

/// Result of a ship tick the director must act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipTick {
    Idle,
    /// Explosion animation finished this tick; lives need settling
    ExplosionFinished,
}

/// What happened once lives were settled after an explosion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeOutcome {
    Respawned,
    Destroyed,
}

/// The player entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    /// Heading (radians, counter-clockwise on screen)
    pub angle: f32,
    /// Angular velocity (radians per tick)
    pub rot: f32,
    /// Velocity accumulated from thrust (pixels per tick)
    pub thrust: Vec2,
    pub radius: f32,
    pub thrusting: bool,
    /// Edge trigger: cleared by every fire, re-armed only by releasing fire
    pub can_shoot: bool,
    pub life_state: LifeState,
    pub invulnerability: Invulnerability,
    pub explosion_ticks_remaining: u32,
}

impl Ship {
    /// Fresh ship at the arena center pointing up, with a full blink window
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: Self::spawn_point(tuning),
            angle: std::f32::consts::FRAC_PI_2,
            rot: 0.0,
            thrust: Vec2::ZERO,
            radius: tuning.ship_size,
            thrusting: false,
            can_shoot: true,
            life_state: LifeState::Alive,
            invulnerability: Invulnerability::full(tuning),
            explosion_ticks_remaining: 0,
        }
    }

    pub fn spawn_point(tuning: &Tuning) -> Vec2 {
        tuning.arena() / 2.0
    }

    pub fn is_alive(&self) -> bool {
        self.life_state == LifeState::Alive
    }

    pub fn is_exploding(&self) -> bool {
        self.life_state == LifeState::Exploding
    }

    pub fn is_destroyed(&self) -> bool {
        self.life_state == LifeState::Destroyed
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerability.is_active()
    }

    /// Alive and outside the blink window
    pub fn can_collide(&self) -> bool {
        self.is_alive() && !self.is_invulnerable()
    }

    /// Whether a renderer should draw the hull this tick
    pub fn is_visible(&self) -> bool {
        match self.life_state {
            LifeState::Alive => self.invulnerability.is_visible(),
            LifeState::Exploding | LifeState::Destroyed => false,
        }
    }

    /// Kill all drift (stop action)
    pub fn stop(&mut self) {
        if self.is_alive() {
            self.thrust = Vec2::ZERO;
        }
    }

    /// Start exploding. Returns false unless the ship was alive.
    pub fn explode(&mut self, tuning: &Tuning) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.life_state = LifeState::Exploding;
        self.explosion_ticks_remaining = tuning.explosion_ticks();
        true
    }

    /// Advance one tick
    pub fn integrate(&mut self, tuning: &Tuning) -> ShipTick {
        match self.life_state {
            LifeState::Destroyed => ShipTick::Idle,
            LifeState::Exploding => {
                self.explosion_ticks_remaining = self.explosion_ticks_remaining.saturating_sub(1);
                if self.explosion_ticks_remaining == 0 {
                    ShipTick::ExplosionFinished
                } else {
                    ShipTick::Idle
                }
            }
            LifeState::Alive => {
                self.invulnerability.tick(tuning.blink_ticks());

                let rate = tuning.tick_rate as f32;
                if self.thrusting {
                    self.thrust += heading_vector(self.angle) * tuning.ship_thrust / rate;
                } else {
                    self.thrust -= self.thrust * tuning.friction / rate;
                }

                self.angle = normalize_angle(self.angle + self.rot);
                self.pos += self.thrust;
                self.pos = wrap_position(self.pos, tuning.arena(), self.radius);
                ShipTick::Idle
            }
        }
    }

    /// Settle lives after the explosion animation: respawn or stay down for good
    pub fn finish_explosion(&mut self, lives: &mut u32, tuning: &Tuning) -> LifeOutcome {
        *lives = lives.saturating_sub(1);
        if *lives == 0 {
            self.life_state = LifeState::Destroyed;
            self.thrusting = false;
            self.rot = 0.0;
            LifeOutcome::Destroyed
        } else {
            self.respawn(tuning);
            LifeOutcome::Respawned
        }
    }

    /// Back to the spawn point with zero velocity and a full blink window
    fn respawn(&mut self, tuning: &Tuning) {
        self.pos = Self::spawn_point(tuning);
        self.angle = std::f32::consts::FRAC_PI_2;
        self.rot = 0.0;
        self.thrust = Vec2::ZERO;
        self.thrusting = false;
        self.life_state = LifeState::Alive;
        self.invulnerability = Invulnerability::full(tuning);
        self.explosion_ticks_remaining = 0;
    }
}
