//! Asteroid Drift entry point
//!
//! The browser build is driven from JavaScript through `asteroid_drift::web`.
//! Natively this runs a headless session with a scripted pilot, which is handy
//! for checking balance changes from a tuning file.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use asteroid_drift::audio::{AudioSink, NullAudio};
    use asteroid_drift::persistence::JsonFileStore;
    use asteroid_drift::sim::{Action, GameEvent, Simulation, TickInput, tick};
    use asteroid_drift::{Tuning, normalize_angle};

    /// One minute at the default tick rate
    const SESSION_TICKS: u64 = 6000;
    /// Ticks between trigger pulls
    const FIRE_INTERVAL: u64 = 12;
    /// Heading error (radians) the pilot tolerates before turning
    const AIM_TOLERANCE: f32 = 0.05;

    /// Turn toward the nearest asteroid and keep shooting
    fn pilot_input(sim: &Simulation<JsonFileStore>, tick_index: u64) -> TickInput {
        let mut input = TickInput::default();
        let ship = &sim.ship;

        let nearest = sim.asteroids.iter().min_by(|a, b| {
            a.pos
                .distance_squared(ship.pos)
                .total_cmp(&b.pos.distance_squared(ship.pos))
        });
        if let Some(target) = nearest {
            let d = target.pos - ship.pos;
            // Screen y grows downward
            let wanted = (-d.y).atan2(d.x);
            let error = normalize_angle(wanted - ship.angle);
            if error > AIM_TOLERANCE {
                input.push(Action::RotateLeft, true);
            } else if error < -AIM_TOLERANCE {
                input.push(Action::RotateRight, true);
            } else {
                input.push(Action::RotateLeft, false);
            }
        }

        match tick_index % FIRE_INTERVAL {
            0 => input.push(Action::Fire, true),
            1 => input.push(Action::Fire, false),
            _ => {}
        }
        input
    }

    pub fn run() {
        let tuning = match std::env::args().nth(1) {
            Some(path) => {
                let loaded = std::fs::read_to_string(&path)
                    .map_err(|e| e.to_string())
                    .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
                match loaded {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from {path}");
                        tuning
                    }
                    Err(e) => {
                        log::error!("Invalid tuning file {path}: {e}");
                        std::process::exit(1);
                    }
                }
            }
            None => Tuning::default(),
        };

        let store = JsonFileStore::new(std::env::temp_dir().join("asteroid-drift-best.json"));
        let seed = 0x5eed_u64;
        log::info!("Headless session with seed {seed}, {SESSION_TICKS} ticks");

        let mut sim = Simulation::new(tuning, seed, store);
        let mut audio = NullAudio;
        let (mut games, mut kills, mut deaths) = (0u32, 0u32, 0u32);

        for i in 0..SESSION_TICKS {
            let input = pilot_input(&sim, i);
            tick(&mut sim, &input);

            let events = sim.drain_events();
            audio.play_events(&events);
            for event in &events {
                match event {
                    GameEvent::AsteroidDestroyed { .. } => kills += 1,
                    GameEvent::ShipExploded => deaths += 1,
                    GameEvent::NewGame => games += 1,
                    _ => {}
                }
            }
        }

        log::info!(
            "Session over: {games} game(s), {kills} asteroids, {deaths} deaths, score {}, level {}, best {}",
            sim.state.score,
            sim.state.level + 1,
            sim.state.best_score
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Asteroid Drift (native) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
