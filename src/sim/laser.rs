//! Laser projectiles: firing, travel, impact explosions and expiry

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ship::Ship;
use crate::heading_vector;
use crate::tuning::Tuning;

/// A single shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Laser {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    /// 0 while traveling, otherwise ticks left in the impact animation
    pub explode_ticks_remaining: u32,
}

impl Laser {
    /// Traveling lasers are the only ones that can still hit anything
    pub fn is_traveling(&self) -> bool {
        self.explode_ticks_remaining == 0
    }

    pub fn is_exploding(&self) -> bool {
        self.explode_ticks_remaining > 0
    }

    /// Start the impact animation. Returns false if already exploding.
    pub fn trigger_explosion(&mut self, duration_ticks: u32) -> bool {
        if self.is_exploding() {
            return false;
        }
        self.explode_ticks_remaining = duration_ticks.max(1);
        true
    }
}

/// Owns every laser in flight
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectileManager {
    lasers: Vec<Laser>,
}

impl ProjectileManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lasers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lasers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Laser> {
        self.lasers.iter()
    }

    pub(crate) fn lasers_mut(&mut self) -> &mut [Laser] {
        &mut self.lasers
    }

    /// Only a new game clears lasers; respawning does not
    pub fn clear(&mut self) {
        self.lasers.clear();
    }

    /// Fire from the ship's nose.
    ///
    /// Always consumes the ship's trigger, even when the laser cap is reached.
    /// Returns whether a laser was created.
    pub fn fire(&mut self, ship: &mut Ship, tuning: &Tuning) -> bool {
        let armed = ship.can_shoot;
        ship.can_shoot = false;
        if !armed || self.lasers.len() >= tuning.laser_max {
            return false;
        }

        let heading = heading_vector(ship.angle);
        self.lasers.push(Laser {
            pos: ship.pos + heading * (4.0 / 3.0) * ship.radius,
            vel: heading * tuning.laser_speed_per_tick(),
            explode_ticks_remaining: 0,
        });
        true
    }

    /// Advance one tick: count down explosions, move travelers, drop what left the arena
    pub fn integrate(&mut self, arena: Vec2) {
        self.lasers.retain_mut(|laser| {
            if laser.is_exploding() {
                laser.explode_ticks_remaining -= 1;
                return laser.explode_ticks_remaining > 0;
            }
            laser.pos += laser.vel;
            (0.0..=arena.x).contains(&laser.pos.x) && (0.0..=arena.y).contains(&laser.pos.y)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn ship(tuning: &Tuning) -> Ship {
        let mut ship = Ship::spawn(tuning);
        ship.can_shoot = true;
        ship
    }

    #[test]
    fn test_fire_spawns_at_nose() {
        let tuning = Tuning::default();
        let mut ship = ship(&tuning);
        ship.angle = FRAC_PI_2;
        let mut lasers = ProjectileManager::new();

        assert!(lasers.fire(&mut ship, &tuning));
        let laser = lasers.iter().next().unwrap();
        assert!((laser.pos.x - ship.pos.x).abs() < 1e-4);
        assert!((laser.pos.y - (ship.pos.y - 20.0)).abs() < 1e-4);
        assert!((laser.vel.y + 5.0).abs() < 1e-4);
        assert!(laser.is_traveling());
        assert!(!ship.can_shoot);
    }

    #[test]
    fn test_fire_requires_rearm() {
        let tuning = Tuning::default();
        let mut ship = ship(&tuning);
        let mut lasers = ProjectileManager::new();

        assert!(lasers.fire(&mut ship, &tuning));
        assert!(!lasers.fire(&mut ship, &tuning));
        assert_eq!(lasers.len(), 1);
    }

    #[test]
    fn test_fire_at_cap_still_clears_trigger() {
        let tuning = Tuning::default();
        let mut ship = ship(&tuning);
        let mut lasers = ProjectileManager::new();
        for _ in 0..tuning.laser_max {
            ship.can_shoot = true;
            lasers.fire(&mut ship, &tuning);
        }
        assert_eq!(lasers.len(), tuning.laser_max);

        ship.can_shoot = true;
        assert!(!lasers.fire(&mut ship, &tuning));
        assert_eq!(lasers.len(), tuning.laser_max);
        assert!(!ship.can_shoot);
    }

    #[test]
    fn test_lasers_leave_arena_without_wrapping() {
        let arena = Vec2::new(100.0, 100.0);
        let mut lasers = ProjectileManager::new();
        lasers.lasers.push(Laser {
            pos: Vec2::new(98.0, 50.0),
            vel: Vec2::new(5.0, 0.0),
            explode_ticks_remaining: 0,
        });
        lasers.lasers.push(Laser {
            pos: Vec2::new(50.0, 50.0),
            vel: Vec2::new(0.0, 5.0),
            explode_ticks_remaining: 0,
        });
        lasers.integrate(arena);
        assert_eq!(lasers.len(), 1);
        assert_eq!(lasers.iter().next().unwrap().pos, Vec2::new(50.0, 55.0));
    }

    #[test]
    fn test_explosion_counts_down_then_removes() {
        let arena = Vec2::new(100.0, 100.0);
        let mut lasers = ProjectileManager::new();
        lasers.lasers.push(Laser {
            pos: Vec2::new(50.0, 50.0),
            vel: Vec2::new(1.0, 0.0),
            explode_ticks_remaining: 0,
        });
        assert!(lasers.lasers[0].trigger_explosion(3));
        assert!(!lasers.lasers[0].trigger_explosion(3));

        lasers.integrate(arena);
        lasers.integrate(arena);
        assert_eq!(lasers.len(), 1);
        // Exploding lasers stay put
        assert_eq!(lasers.lasers[0].pos, Vec2::new(50.0, 50.0));
        lasers.integrate(arena);
        assert!(lasers.is_empty());
    }
}
