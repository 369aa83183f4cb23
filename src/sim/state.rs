//! Game state and the simulation aggregate
//!
//! `Simulation` owns every entity plus the RNG, the event queue and the
//! best-score store. Nothing else mutates game state.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::{AsteroidField, SizeTier};
use super::laser::ProjectileManager;
use super::ship::Ship;
use super::tick::Action;
use crate::persistence::{MemoryStore, ScoreStore, load_best};
use crate::tuning::Tuning;

/// Notifications for audio and other observers, drained by the host each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    NewGame,
    LevelStarted { level: u32 },
    ThrustStarted,
    ThrustStopped,
    LaserFired,
    AsteroidDestroyed { tier: SizeTier, points: u64 },
    ShipExploded,
    ShipRespawned { lives: u32 },
    GameOver { score: u64 },
    NewBestScore { score: u64 },
}

/// Fading announcement text ("Level 2", "Game Over")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub text: String,
    /// 1.0 = opaque, 0.0 = gone
    pub alpha: f32,
}

impl Banner {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            alpha: 1.0,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.alpha > 0.0
    }

    fn fade(&mut self, amount: f32) {
        self.alpha = (self.alpha - amount).max(0.0);
    }
}

/// Score, level and lives for the current session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// 0-based
    pub level: u32,
    pub score: u64,
    pub lives: u32,
    pub best_score: u64,
    pub banner: Option<Banner>,
    pub is_game_over: bool,
}

impl GameState {
    pub fn new(lives: u32, best_score: u64) -> Self {
        Self {
            level: 0,
            score: 0,
            lives,
            best_score,
            banner: None,
            is_game_over: false,
        }
    }

    /// Add points; returns true when this set a new best
    fn add_points(&mut self, points: u64) -> bool {
        self.score += points;
        if self.score > self.best_score {
            self.best_score = self.score;
            return true;
        }
        false
    }

    pub(crate) fn fade_banner(&mut self, amount: f32) {
        if let Some(banner) = &mut self.banner {
            banner.fade(amount);
        }
    }

    /// True once no banner is showing
    pub fn banner_faded(&self) -> bool {
        self.banner.as_ref().is_none_or(|b| !b.is_visible())
    }
}

/// The whole simulation
#[derive(Debug)]
pub struct Simulation<S: ScoreStore = MemoryStore> {
    pub tuning: Tuning,
    pub ship: Ship,
    pub asteroids: AsteroidField,
    pub lasers: ProjectileManager,
    pub state: GameState,
    /// Ticks since the process started (survives new games)
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
    store: S,
}

impl<S: ScoreStore> Simulation<S> {
    /// Create a simulation and start the first game
    pub fn new(tuning: Tuning, seed: u64, store: S) -> Self {
        let mut sim = Self {
            ship: Ship::spawn(&tuning),
            asteroids: AsteroidField::new(),
            lasers: ProjectileManager::new(),
            state: GameState::new(tuning.starting_lives, 0),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            store,
            tuning,
        };
        sim.new_game();
        sim
    }

    /// Reset ship, field, lasers, score, level and lives; re-read the best score
    pub fn new_game(&mut self) {
        let best = load_best(&mut self.store);
        self.state = GameState::new(self.tuning.starting_lives, best);
        self.ship = Ship::spawn(&self.tuning);
        self.lasers.clear();
        self.asteroids.clear();
        log::info!("New game (best score {best})");
        self.events.push(GameEvent::NewGame);
        self.start_level();
    }

    /// Announce the current level and spawn its asteroid batch
    pub(crate) fn start_level(&mut self) {
        let level = self.state.level;
        let count = self.tuning.asteroid_count + level;
        self.asteroids.spawn(
            &mut self.rng,
            &self.tuning,
            count,
            self.ship.pos,
            self.tuning.spawn_clearance(),
            level,
        );
        self.state.banner = Some(Banner::new(format!("Level {}", level + 1)));
        log::info!("Level {} started with {count} asteroids", level + 1);
        self.events.push(GameEvent::LevelStarted { level });
    }

    pub(crate) fn game_over(&mut self) {
        self.state.is_game_over = true;
        self.state.banner = Some(Banner::new("Game Over"));
        log::info!(
            "Game over at level {} with score {}",
            self.state.level + 1,
            self.state.score
        );
        self.events.push(GameEvent::GameOver {
            score: self.state.score,
        });
    }

    /// Apply a key press/release. Silently ignored once the ship is destroyed.
    pub fn apply_input(&mut self, action: Action, pressed: bool) {
        if self.ship.is_destroyed() {
            return;
        }
        // Releasing fire re-arms the trigger in any non-terminal state
        if action == Action::Fire && !pressed {
            self.ship.can_shoot = true;
            return;
        }
        if !self.ship.is_alive() {
            return;
        }

        match action {
            Action::RotateLeft => {
                self.ship.rot = if pressed { self.tuning.rotation_per_tick() } else { 0.0 };
            }
            Action::RotateRight => {
                self.ship.rot = if pressed { -self.tuning.rotation_per_tick() } else { 0.0 };
            }
            Action::Thrust => {
                if self.ship.thrusting != pressed {
                    self.ship.thrusting = pressed;
                    self.events.push(if pressed {
                        GameEvent::ThrustStarted
                    } else {
                        GameEvent::ThrustStopped
                    });
                }
            }
            Action::Fire => self.fire(),
            Action::Stop => {
                if pressed {
                    self.ship.stop();
                }
            }
        }
    }

    /// Fire a laser if the trigger is armed and the cap allows
    pub fn fire(&mut self) {
        if !self.ship.is_alive() {
            return;
        }
        if self.lasers.fire(&mut self.ship, &self.tuning) {
            log::debug!("Laser fired ({} in flight)", self.lasers.len());
            self.events.push(GameEvent::LaserFired);
        }
    }

    /// Record a scoring event, persisting the best score when it is beaten
    pub fn award_points(&mut self, points: u64) {
        if self.state.add_points(points) {
            let best = self.state.best_score;
            if let Err(e) = self.store.write_best(best) {
                log::warn!("Failed to persist best score {best}: {e}");
            }
            self.events.push(GameEvent::NewBestScore { score: best });
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events raised since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim() -> Simulation {
        Simulation::new(Tuning::default(), 12345, MemoryStore::default())
    }

    #[test]
    fn test_new_game_initial_state() {
        let mut sim = sim();
        assert_eq!(sim.asteroids.len(), 3);
        assert_eq!(sim.state.level, 0);
        assert_eq!(sim.state.lives, 3);
        assert_eq!(sim.state.banner.as_ref().unwrap().text, "Level 1");
        assert_eq!(
            sim.drain_events(),
            vec![GameEvent::NewGame, GameEvent::LevelStarted { level: 0 }]
        );
        assert!(sim.drain_events().is_empty());
    }

    #[test]
    fn test_new_game_reads_best_score() {
        let sim = Simulation::new(Tuning::default(), 1, MemoryStore::with_best(777));
        assert_eq!(sim.state.best_score, 777);
        assert_eq!(sim.state.score, 0);
    }

    #[test]
    fn test_rotation_input() {
        let mut sim = sim();
        sim.apply_input(Action::RotateLeft, true);
        assert!(sim.ship.rot > 0.0);
        sim.apply_input(Action::RotateRight, true);
        assert!(sim.ship.rot < 0.0);
        sim.apply_input(Action::RotateLeft, false);
        assert_eq!(sim.ship.rot, 0.0);
    }

    #[test]
    fn test_thrust_events_only_on_change() {
        let mut sim = sim();
        sim.drain_events();
        sim.apply_input(Action::Thrust, true);
        sim.apply_input(Action::Thrust, true);
        sim.apply_input(Action::Thrust, false);
        assert_eq!(
            sim.drain_events(),
            vec![GameEvent::ThrustStarted, GameEvent::ThrustStopped]
        );
    }

    #[test]
    fn test_fire_is_edge_triggered() {
        let mut sim = sim();
        sim.apply_input(Action::Fire, true);
        sim.apply_input(Action::Fire, true);
        assert_eq!(sim.lasers.len(), 1);
        sim.apply_input(Action::Fire, false);
        sim.apply_input(Action::Fire, true);
        assert_eq!(sim.lasers.len(), 2);
    }

    #[test]
    fn test_stop_kills_drift() {
        let mut sim = sim();
        sim.ship.thrust = glam::Vec2::new(1.0, -2.0);
        sim.apply_input(Action::Stop, true);
        assert_eq!(sim.ship.thrust, glam::Vec2::ZERO);
    }

    #[test]
    fn test_award_points_tracks_best() {
        let mut sim = Simulation::new(Tuning::default(), 1, MemoryStore::with_best(30));
        sim.award_points(20);
        assert_eq!(sim.state.best_score, 30);
        assert!(sim.store().writes().is_empty());
        sim.award_points(20);
        assert_eq!(sim.state.best_score, 40);
        assert_eq!(sim.store().writes(), &[40]);
    }

    #[test]
    fn test_banner_fades_to_zero() {
        let mut state = GameState::new(3, 0);
        assert!(state.banner_faded());
        state.banner = Some(Banner::new("Level 1"));
        state.fade_banner(0.6);
        assert!(!state.banner_faded());
        state.fade_banner(0.6);
        assert!(state.banner_faded());
        assert_eq!(state.banner.unwrap().alpha, 0.0);
    }
}
