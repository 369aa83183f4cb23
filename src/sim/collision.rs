//! Collision detection and scoring inputs
//!
//! Plain radius-distance checks. Asteroids hit this tick are only marked during
//! the scan; the field is compacted and split once afterwards.

use rand::Rng;

use super::asteroid::{AsteroidField, SizeTier};
use super::laser::ProjectileManager;
use super::ship::Ship;
use crate::distance;
use crate::tuning::Tuning;

/// What destroyed an asteroid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitCause {
    Laser,
    Ship,
}

/// One destroyed asteroid
#[derive(Debug, Clone, PartialEq)]
pub struct Kill {
    pub tier: SizeTier,
    pub points: u64,
    pub cause: HitCause,
}

/// Everything the director needs to apply after a collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// In asteroid iteration order
    pub kills: Vec<Kill>,
    pub ship_exploded: bool,
}

/// Resolve laser/asteroid and ship/asteroid hits for one tick
pub fn resolve<R: Rng>(
    ship: &mut Ship,
    field: &mut AsteroidField,
    lasers: &mut ProjectileManager,
    rng: &mut R,
    tuning: &Tuning,
    level: u32,
) -> CollisionReport {
    let mut causes: Vec<Option<HitCause>> = vec![None; field.len()];

    // Lasers: first traveling laser inside the asteroid wins; it then explodes,
    // so it cannot claim a second asteroid this tick.
    let explode_ticks = tuning.laser_explode_ticks();
    for (cause, asteroid) in causes.iter_mut().zip(field.iter()) {
        let hit = lasers
            .lasers_mut()
            .iter_mut()
            .find(|l| l.is_traveling() && distance(l.pos, asteroid.pos) < asteroid.radius);
        if let Some(laser) = hit {
            laser.trigger_explosion(explode_ticks);
            *cause = Some(HitCause::Laser);
        }
    }

    // Ship: every overlapping asteroid dies, only the first hit explodes the ship
    let mut ship_exploded = false;
    if ship.can_collide() {
        for (cause, asteroid) in causes.iter_mut().zip(field.iter()) {
            if cause.is_some() {
                continue;
            }
            if distance(ship.pos, asteroid.pos) < ship.radius + asteroid.radius {
                *cause = Some(HitCause::Ship);
                ship_exploded |= ship.explode(tuning);
            }
        }
    }

    let marked: Vec<bool> = causes.iter().map(Option::is_some).collect();
    let outcomes = field.split_marked(&marked, rng, tuning, level);
    let kills = causes
        .into_iter()
        .flatten()
        .zip(outcomes)
        .map(|(cause, outcome)| Kill {
            tier: outcome.tier,
            points: outcome.points,
            cause,
        })
        .collect();

    CollisionReport {
        kills,
        ship_exploded,
    }
}
