//! Browser host bindings
//!
//! JavaScript owns the canvas and the animation loop. Each frame it forwards
//! key events, calls `frame(time)` and draws `snapshot_json()`.

use wasm_bindgen::prelude::*;

use crate::audio::{AudioSink, WebAudio};
use crate::persistence::LocalStorageStore;
use crate::platform::KeyLatch;
use crate::sim::{FixedClock, Simulation, TickInput, tick};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Asteroid Drift starting...");
}

/// Game instance holding all state
#[wasm_bindgen]
pub struct WebGame {
    sim: Simulation<LocalStorageStore>,
    clock: FixedClock,
    input: TickInput,
    latch: KeyLatch,
    audio: WebAudio,
    last_time: Option<f64>,
}

#[wasm_bindgen]
impl WebGame {
    /// Start a game; `tuning_json` may override any gameplay constant
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> Result<WebGame, JsValue> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Tuning::default(),
        };
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {seed}");
        Ok(Self {
            clock: FixedClock::new(tuning.tick_rate),
            sim: Simulation::new(tuning, seed, LocalStorageStore::default()),
            input: TickInput::default(),
            latch: KeyLatch::default(),
            audio: WebAudio::new(),
            last_time: None,
        })
    }

    /// Returns true if the key is bound (so the page can preventDefault)
    pub fn key_down(&mut self, code: &str) -> bool {
        self.key_event(code, true)
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.key_event(code, false)
    }

    fn key_event(&mut self, code: &str, pressed: bool) -> bool {
        let bound = crate::platform::action_for_key(code).is_some();
        if let Some((action, pressed)) = self.latch.key_event(code, pressed) {
            self.input.push(action, pressed);
        }
        bound
    }

    /// Run the ticks owed since the last frame; `time_ms` is the rAF timestamp
    pub fn frame(&mut self, time_ms: f64) -> u32 {
        let elapsed = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(time_ms);

        let ticks = self.clock.advance(elapsed);
        for _ in 0..ticks {
            let was_alive = self.sim.ship.is_alive();
            tick(&mut self.sim, &self.input);
            self.input.clear();
            if !was_alive && self.sim.ship.is_alive() {
                self.latch.replay_into(&mut self.input);
            }
        }

        let events = self.sim.drain_events();
        self.audio.play_events(&events);
        ticks
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.audio.set_muted(muted);
    }

    /// Current frame as JSON (see `FrameSnapshot`)
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.sim.snapshot()).unwrap_or_else(|e| {
            log::error!("Snapshot serialization failed: {e}");
            String::from("{}")
        })
    }
}
