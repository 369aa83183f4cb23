//! Asteroid field: spawning, fragmentation and toroidal drift
//!
//! Asteroids only ever exist at one of three tier radii. Members are removed
//! mid-scan by the collision pass, so nothing outside this module holds on to
//! an index across ticks.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;
use crate::{distance, wrap_position};

/// Candidate positions tried before settling for the farthest one seen
const MAX_SPAWN_ATTEMPTS: u32 = 1000;

/// Asteroid size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeTier {
    Large,
    Medium,
    Small,
}

impl SizeTier {
    /// Radius for this tier given the configured large-asteroid diameter
    pub fn radius(self, base_size: f32) -> f32 {
        let base = base_size.ceil();
        match self {
            SizeTier::Large => base / 2.0,
            SizeTier::Medium => base / 4.0,
            SizeTier::Small => base / 8.0,
        }
    }

    /// Tier whose radius is exactly `radius`
    pub fn from_radius(radius: f32, base_size: f32) -> Option<Self> {
        [SizeTier::Large, SizeTier::Medium, SizeTier::Small]
            .into_iter()
            .find(|tier| tier.radius(base_size) == radius)
    }

    /// Tier and number of children produced when destroyed
    pub fn fragments(self) -> Option<(SizeTier, usize)> {
        match self {
            SizeTier::Large => Some((SizeTier::Medium, 2)),
            SizeTier::Medium => Some((SizeTier::Small, 3)),
            SizeTier::Small => None,
        }
    }

    pub fn points(self, tuning: &Tuning) -> u64 {
        match self {
            SizeTier::Large => tuning.points_large,
            SizeTier::Medium => tuning.points_medium,
            SizeTier::Small => tuning.points_small,
        }
    }
}

/// A drifting polygonal rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub radius: f32,
    pub tier: SizeTier,
    /// Rotation of the silhouette (radians)
    pub angle: f32,
    /// Per-vertex radius multipliers; fixed for the asteroid's lifetime
    vert_offsets: Vec<f32>,
}

impl Asteroid {
    /// Create an asteroid of `tier` at `pos` with a random velocity and silhouette
    pub fn new<R: Rng>(tier: SizeTier, pos: Vec2, rng: &mut R, tuning: &Tuning, level: u32) -> Self {
        let radius = tier.radius(tuning.asteroid_size);
        assert!(radius > 0.0, "asteroid radius must be positive, got {radius}");

        let level_mult = 1.0 + 0.1 * level as f32;
        let max_speed = tuning.asteroid_speed * level_mult / tuning.tick_rate as f32;
        let mut component = || {
            let magnitude = rng.random::<f32>() * max_speed;
            if rng.random_bool(0.5) { magnitude } else { -magnitude }
        };
        let vel = Vec2::new(component(), component());

        let base_verts = tuning.asteroid_vertices as f32;
        let vertex_count = rng.random_range(base_verts / 2.0..base_verts * 1.5).floor() as usize;
        let jag = tuning.asteroid_jag;
        let vert_offsets = (0..vertex_count)
            .map(|_| 1.0 - jag + rng.random::<f32>() * 2.0 * jag)
            .collect();

        Self {
            pos,
            vel,
            radius,
            tier,
            angle: rng.random::<f32>() * std::f32::consts::TAU,
            vert_offsets,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vert_offsets.len()
    }

    pub fn vert_offsets(&self) -> &[f32] {
        &self.vert_offsets
    }

    /// Outline points in arena space, for renderers
    pub fn outline(&self) -> Vec<Vec2> {
        let n = self.vert_offsets.len() as f32;
        self.vert_offsets
            .iter()
            .enumerate()
            .map(|(i, offset)| {
                let a = self.angle + i as f32 * std::f32::consts::TAU / n;
                self.pos + Vec2::new(a.cos(), a.sin()) * self.radius * offset
            })
            .collect()
    }
}

/// What a destroyed asteroid left behind
#[derive(Debug, Clone, PartialEq)]
pub struct SplitOutcome {
    pub tier: SizeTier,
    pub points: u64,
    pub children: usize,
}

/// Owns every live asteroid
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AsteroidField {
    asteroids: Vec<Asteroid>,
}

impl AsteroidField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.asteroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asteroids.is_empty()
    }

    /// True once every asteroid is gone
    pub fn level_cleared(&self) -> bool {
        self.asteroids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Asteroid> {
        self.asteroids.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Asteroid> {
        self.asteroids.get(index)
    }

    pub fn clear(&mut self) {
        self.asteroids.clear();
    }

    /// Add an asteroid, enforcing the tier radius invariant
    pub fn insert(&mut self, asteroid: Asteroid, tuning: &Tuning) {
        assert_eq!(
            SizeTier::from_radius(asteroid.radius, tuning.asteroid_size),
            Some(asteroid.tier),
            "asteroid radius {} does not match tier {:?}",
            asteroid.radius,
            asteroid.tier
        );
        self.asteroids.push(asteroid);
    }

    /// Spawn `count` large asteroids at random positions outside the forbidden circle
    pub fn spawn<R: Rng>(
        &mut self,
        rng: &mut R,
        tuning: &Tuning,
        count: u32,
        forbidden_center: Vec2,
        forbidden_radius: f32,
        level: u32,
    ) {
        for _ in 0..count {
            let pos = Self::sample_position(rng, tuning, forbidden_center, forbidden_radius);
            let asteroid = Asteroid::new(SizeTier::Large, pos, rng, tuning, level);
            self.insert(asteroid, tuning);
        }
        log::debug!("Spawned {count} asteroids (level {level}), field size {}", self.len());
    }

    fn sample_position<R: Rng>(
        rng: &mut R,
        tuning: &Tuning,
        forbidden_center: Vec2,
        forbidden_radius: f32,
    ) -> Vec2 {
        let mut best = Vec2::ZERO;
        let mut best_dist = f32::NEG_INFINITY;
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let candidate = Vec2::new(
                rng.random::<f32>() * tuning.arena_width,
                rng.random::<f32>() * tuning.arena_height,
            );
            let dist = distance(candidate, forbidden_center);
            if dist >= forbidden_radius {
                return candidate;
            }
            if dist > best_dist {
                best = candidate;
                best_dist = dist;
            }
        }
        log::warn!(
            "No spawn position clears radius {forbidden_radius}; using farthest candidate ({best_dist:.1})"
        );
        best
    }

    /// Children for a destroyed asteroid, at its position with fresh velocity/shape
    fn fragments_of<R: Rng>(asteroid: &Asteroid, rng: &mut R, tuning: &Tuning, level: u32) -> Vec<Asteroid> {
        match asteroid.tier.fragments() {
            Some((tier, count)) => (0..count)
                .map(|_| Asteroid::new(tier, asteroid.pos, rng, tuning, level))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Destroy the asteroid at `index`, replacing it with its fragments
    pub fn split<R: Rng>(
        &mut self,
        index: usize,
        rng: &mut R,
        tuning: &Tuning,
        level: u32,
    ) -> Option<SplitOutcome> {
        if index >= self.asteroids.len() {
            return None;
        }
        let destroyed = self.asteroids.swap_remove(index);
        let children = Self::fragments_of(&destroyed, rng, tuning, level);
        let outcome = SplitOutcome {
            tier: destroyed.tier,
            points: destroyed.tier.points(tuning),
            children: children.len(),
        };
        for child in children {
            self.insert(child, tuning);
        }
        Some(outcome)
    }

    /// Destroy every asteroid whose flag is set, compacting once.
    ///
    /// Fragments are appended after the survivors, so they are not visited by the
    /// scan that destroyed their parent.
    pub fn split_marked<R: Rng>(
        &mut self,
        marked: &[bool],
        rng: &mut R,
        tuning: &Tuning,
        level: u32,
    ) -> Vec<SplitOutcome> {
        debug_assert_eq!(marked.len(), self.asteroids.len());
        let mut outcomes = Vec::new();
        let mut children = Vec::new();
        for (asteroid, _) in self.asteroids.iter().zip(marked).filter(|(_, m)| **m) {
            let frags = Self::fragments_of(asteroid, rng, tuning, level);
            outcomes.push(SplitOutcome {
                tier: asteroid.tier,
                points: asteroid.tier.points(tuning),
                children: frags.len(),
            });
            children.extend(frags);
        }

        let mut flags = marked.iter();
        self.asteroids.retain(|_| !flags.next().copied().unwrap_or(false));
        for child in children {
            self.insert(child, tuning);
        }
        outcomes
    }

    /// Move every asteroid one tick, wrapping at the arena edges
    pub fn integrate(&mut self, arena: Vec2) {
        for asteroid in &mut self.asteroids {
            asteroid.pos += asteroid.vel;
            asteroid.pos = wrap_position(asteroid.pos, arena, asteroid.radius);
        }
    }
}
