//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick rate only
//! - Seeded RNG only
//! - Stable iteration order within a tick
//! - No rendering or platform dependencies

pub mod asteroid;
pub mod clock;
pub mod collision;
pub mod laser;
pub mod ship;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use asteroid::{Asteroid, AsteroidField, SizeTier, SplitOutcome};
pub use clock::FixedClock;
pub use collision::{CollisionReport, HitCause, Kill, resolve};
pub use laser::{Laser, ProjectileManager};
pub use ship::{Invulnerability, LifeOutcome, LifeState, Ship, ShipTick};
pub use snapshot::{AsteroidView, BannerView, FrameSnapshot, HudView, LaserView, ShipView};
pub use state::{Banner, GameEvent, GameState, Simulation};
pub use tick::{Action, TickInput, tick};
