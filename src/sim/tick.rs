//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation one logical tick, driving every
//! component in a fixed order.

use serde::{Deserialize, Serialize};

use super::collision;
use super::ship::{LifeOutcome, ShipTick};
use super::state::{GameEvent, Simulation};
use crate::persistence::ScoreStore;

/// Logical player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    RotateLeft,
    RotateRight,
    Thrust,
    Fire,
    /// Cancel all drift
    Stop,
}

/// Input buffered since the previous tick, applied in arrival order
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// (action, pressed)
    pub actions: Vec<(Action, bool)>,
}

impl TickInput {
    pub fn press(action: Action) -> Self {
        Self {
            actions: vec![(action, true)],
        }
    }

    pub fn release(action: Action) -> Self {
        Self {
            actions: vec![(action, false)],
        }
    }

    pub fn push(&mut self, action: Action, pressed: bool) {
        self.actions.push((action, pressed));
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }
}

/// Advance the simulation by one fixed tick
pub fn tick<S: ScoreStore>(sim: &mut Simulation<S>, input: &TickInput) {
    for &(action, pressed) in &input.actions {
        sim.apply_input(action, pressed);
    }

    sim.time_ticks += 1;
    let arena = sim.tuning.arena();

    // Ship
    if sim.ship.integrate(&sim.tuning) == ShipTick::ExplosionFinished {
        match sim.ship.finish_explosion(&mut sim.state.lives, &sim.tuning) {
            LifeOutcome::Respawned => {
                log::info!("Ship respawned, {} lives left", sim.state.lives);
                let lives = sim.state.lives;
                sim.push_event(GameEvent::ShipRespawned { lives });
            }
            LifeOutcome::Destroyed => sim.game_over(),
        }
    }

    // Lasers, then asteroids
    sim.lasers.integrate(arena);
    sim.asteroids.integrate(arena);

    // Collisions
    let was_thrusting = sim.ship.thrusting;
    let report = collision::resolve(
        &mut sim.ship,
        &mut sim.asteroids,
        &mut sim.lasers,
        &mut sim.rng,
        &sim.tuning,
        sim.state.level,
    );
    if report.ship_exploded {
        log::info!("Ship exploded ({} lives before settling)", sim.state.lives);
        sim.ship.rot = 0.0;
        sim.ship.thrusting = false;
        if was_thrusting {
            sim.push_event(GameEvent::ThrustStopped);
        }
        sim.push_event(GameEvent::ShipExploded);
    }
    for kill in report.kills {
        log::debug!("{:?} asteroid destroyed by {:?}", kill.tier, kill.cause);
        sim.push_event(GameEvent::AsteroidDestroyed {
            tier: kill.tier,
            points: kill.points,
        });
        sim.award_points(kill.points);
    }

    // Level clear
    if !sim.state.is_game_over && sim.asteroids.level_cleared() {
        sim.state.level += 1;
        sim.start_level();
    }

    // Banner fade; a faded game-over banner starts the next game
    let fade = sim.tuning.banner_fade_per_tick();
    sim.state.fade_banner(fade);
    if sim.state.is_game_over && sim.state.banner_faded() {
        sim.new_game();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::asteroid::{Asteroid, SizeTier};
    use crate::sim::ship::{Invulnerability, LifeState};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn sim() -> Simulation {
        Simulation::new(Tuning::default(), 12345, MemoryStore::default())
    }

    /// Replace the field with a single asteroid far from the ship
    fn lone_asteroid(sim: &mut Simulation, tier: SizeTier, pos: Vec2) {
        sim.asteroids.clear();
        let mut asteroid = Asteroid::new(tier, pos, &mut sim.rng, &sim.tuning, 0);
        asteroid.vel = Vec2::ZERO;
        sim.asteroids.insert(asteroid, &sim.tuning);
    }

    #[test]
    fn test_determinism() {
        let mut a = sim();
        let mut b = sim();
        let inputs = [
            TickInput::press(Action::Thrust),
            TickInput::press(Action::RotateLeft),
            TickInput::press(Action::Fire),
            TickInput::release(Action::Fire),
            TickInput::default(),
        ];
        for _ in 0..50 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.ship.pos, b.ship.pos);
        assert_eq!(a.asteroids.len(), b.asteroids.len());
        assert_eq!(a.state.score, b.state.score);
    }

    #[test]
    fn test_level_advances_when_field_clears() {
        let mut sim = sim();
        lone_asteroid(&mut sim, SizeTier::Small, Vec2::new(100.0, 100.0));
        sim.lasers.clear();
        sim.ship.can_shoot = true;
        sim.lasers.fire(&mut sim.ship, &sim.tuning);
        sim.lasers.lasers_mut()[0].pos = Vec2::new(100.0, 100.0);
        sim.lasers.lasers_mut()[0].vel = Vec2::ZERO;
        sim.drain_events();

        tick(&mut sim, &TickInput::default());

        assert_eq!(sim.state.level, 1);
        assert_eq!(sim.state.score, sim.tuning.points_small);
        assert_eq!(sim.asteroids.len(), 4);
        assert!(sim.asteroids.iter().all(|a| a.tier == SizeTier::Large));
        assert_eq!(sim.state.banner.as_ref().unwrap().text, "Level 2");
        let events = sim.drain_events();
        assert!(events.contains(&GameEvent::LevelStarted { level: 1 }));
    }

    #[test]
    fn test_ship_collision_emits_events() {
        let mut sim = sim();
        sim.ship.invulnerability = Invulnerability::default();
        sim.apply_input(Action::Thrust, true);
        sim.drain_events();

        let pos = sim.ship.pos;
        lone_asteroid(&mut sim, SizeTier::Small, pos);
        // Distant asteroid so the level does not clear
        let far = Asteroid::new(SizeTier::Large, Vec2::new(60.0, 60.0), &mut sim.rng, &sim.tuning, 0);
        sim.asteroids.insert(far, &sim.tuning);
        tick(&mut sim, &TickInput::default());

        assert_eq!(sim.ship.life_state, LifeState::Exploding);
        assert!(!sim.ship.thrusting);
        let events = sim.drain_events();
        assert!(events.contains(&GameEvent::ThrustStopped));
        assert!(events.contains(&GameEvent::ShipExploded));
        assert!(events.contains(&GameEvent::AsteroidDestroyed {
            tier: SizeTier::Small,
            points: sim.tuning.points_small,
        }));
    }

    #[test]
    fn test_respawn_after_explosion_with_lives_left() {
        let mut sim = sim();
        sim.ship.invulnerability = Invulnerability::default();
        sim.ship.explode(&sim.tuning);
        sim.drain_events();

        for _ in 0..sim.tuning.explosion_ticks() {
            tick(&mut sim, &TickInput::default());
        }
        assert!(sim.ship.is_alive());
        assert!(sim.ship.is_invulnerable());
        assert_eq!(sim.state.lives, 2);
        assert!(sim
            .drain_events()
            .contains(&GameEvent::ShipRespawned { lives: 2 }));
    }

    #[test]
    fn test_game_over_then_auto_new_game() {
        let mut sim = sim();
        sim.state.lives = 1;
        sim.state.score = 40;
        sim.ship.invulnerability = Invulnerability::default();
        sim.ship.explode(&sim.tuning);

        for _ in 0..sim.tuning.explosion_ticks() {
            tick(&mut sim, &TickInput::default());
        }
        assert!(sim.state.is_game_over);
        assert_eq!(sim.state.banner.as_ref().unwrap().text, "Game Over");

        let fade_ticks = (sim.tuning.banner_fade_time * sim.tuning.tick_rate as f32) as u32 + 2;
        for _ in 0..fade_ticks {
            if !sim.state.is_game_over {
                break;
            }
            tick(&mut sim, &TickInput::default());
        }
        assert!(!sim.state.is_game_over);
        assert_eq!(sim.state.score, 0);
        assert_eq!(sim.state.lives, sim.tuning.starting_lives);
        assert!(sim.ship.is_alive());
    }
}
