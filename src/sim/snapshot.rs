//! Read-only views handed to renderers each frame

use glam::Vec2;
use serde::Serialize;

use super::asteroid::SizeTier;
use super::state::Simulation;
use crate::persistence::ScoreStore;

#[derive(Debug, Clone, Serialize)]
pub struct ShipView {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub radius: f32,
    /// False during the off phase of a blink and once exploding
    pub visible: bool,
    /// Draw the thrust flame
    pub thrusting: bool,
    pub exploding: bool,
    pub destroyed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AsteroidView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub angle: f32,
    pub tier: SizeTier,
    pub vert_offsets: Vec<f32>,
    /// Polygon points in arena space
    pub outline: Vec<Vec2>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LaserView {
    pub x: f32,
    pub y: f32,
    pub exploding: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BannerView {
    pub text: String,
    pub alpha: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct HudView {
    pub score: u64,
    pub best_score: u64,
    /// 1-based for display
    pub level: u32,
    pub lives: u32,
    pub game_over: bool,
    pub banner: Option<BannerView>,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub ship: ShipView,
    pub asteroids: Vec<AsteroidView>,
    pub lasers: Vec<LaserView>,
    pub hud: HudView,
}

impl<S: ScoreStore> Simulation<S> {
    pub fn snapshot(&self) -> FrameSnapshot {
        let ship = &self.ship;
        FrameSnapshot {
            tick: self.time_ticks,
            ship: ShipView {
                x: ship.pos.x,
                y: ship.pos.y,
                angle: ship.angle,
                radius: ship.radius,
                visible: ship.is_visible(),
                thrusting: ship.is_alive() && ship.thrusting,
                exploding: ship.is_exploding(),
                destroyed: ship.is_destroyed(),
            },
            asteroids: self
                .asteroids
                .iter()
                .map(|a| AsteroidView {
                    x: a.pos.x,
                    y: a.pos.y,
                    radius: a.radius,
                    angle: a.angle,
                    tier: a.tier,
                    vert_offsets: a.vert_offsets().to_vec(),
                    outline: a.outline(),
                })
                .collect(),
            lasers: self
                .lasers
                .iter()
                .map(|l| LaserView {
                    x: l.pos.x,
                    y: l.pos.y,
                    exploding: l.is_exploding(),
                })
                .collect(),
            hud: HudView {
                score: self.state.score,
                best_score: self.state.best_score,
                level: self.state.level + 1,
                lives: self.state.lives,
                game_over: self.state.is_game_over,
                banner: self
                    .state
                    .banner
                    .as_ref()
                    .filter(|b| b.is_visible())
                    .map(|b| BannerView {
                        text: b.text.clone(),
                        alpha: b.alpha,
                    }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::persistence::MemoryStore;
    use crate::sim::Simulation;
    use crate::tuning::Tuning;

    #[test]
    fn test_snapshot_mirrors_state() {
        let sim = Simulation::new(Tuning::default(), 5, MemoryStore::with_best(90));
        let snap = sim.snapshot();
        assert_eq!(snap.asteroids.len(), sim.asteroids.len());
        assert_eq!(snap.hud.level, 1);
        assert_eq!(snap.hud.best_score, 90);
        assert_eq!(snap.hud.banner.as_ref().unwrap().text, "Level 1");
        assert!(snap.ship.visible);
        let jag = sim.tuning.asteroid_jag;
        for (view, asteroid) in snap.asteroids.iter().zip(sim.asteroids.iter()) {
            assert_eq!(view.vert_offsets.len(), asteroid.vertex_count());
            assert_eq!(view.outline.len(), asteroid.vertex_count());
            for point in &view.outline {
                let d = point.distance(asteroid.pos);
                assert!(d >= asteroid.radius * (1.0 - jag) - 1e-3);
                assert!(d <= asteroid.radius * (1.0 + jag) + 1e-3);
            }
        }
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let sim = Simulation::new(Tuning::default(), 5, MemoryStore::default());
        let json = serde_json::to_value(sim.snapshot()).unwrap();
        assert_eq!(json["hud"]["lives"], 3);
        assert!(json["asteroids"].is_array());
        assert!(json["asteroids"][0]["outline"][0].is_array());
    }
}
