//! Audio: simulation events to sound effects
//!
//! The simulation only emits [`GameEvent`]s. A sink turns the ones that make
//! noise into playback; `NullAudio` is a valid sink. On the web, `WebAudio`
//! synthesizes every effect procedurally - no external files needed!

use crate::sim::{GameEvent, SizeTier};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Thrust key pressed (looping rumble starts)
    ThrustOn,
    /// Thrust released or ship lost (rumble stops)
    ThrustOff,
    LaserFire,
    /// Asteroid destroyed, pitched by size
    AsteroidHit(SizeTier),
    ShipExplode,
    LevelStart,
    GameOver,
}

impl SoundEffect {
    /// Effect for an event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ThrustStarted => Some(Self::ThrustOn),
            GameEvent::ThrustStopped => Some(Self::ThrustOff),
            GameEvent::LaserFired => Some(Self::LaserFire),
            GameEvent::AsteroidDestroyed { tier, .. } => Some(Self::AsteroidHit(*tier)),
            GameEvent::ShipExploded => Some(Self::ShipExplode),
            GameEvent::LevelStarted { level } if *level > 0 => Some(Self::LevelStart),
            GameEvent::GameOver { .. } => Some(Self::GameOver),
            GameEvent::NewGame
            | GameEvent::LevelStarted { .. }
            | GameEvent::ShipRespawned { .. }
            | GameEvent::NewBestScore { .. } => None,
        }
    }
}

/// Anything that can play effects
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);

    /// Play every audible event, in order
    fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

#[cfg(target_arch = "wasm32")]
pub use web_audio::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web_audio {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect};
    use crate::sim::SizeTier;

    /// Web Audio API sink
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        master_volume: f32,
        muted: bool,
        /// Running thrust rumble, stopped on `ThrustOff`
        thrust: Option<(OscillatorNode, GainNode)>,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: 0.8,
                muted: false,
                thrust: None,
            }
        }

        /// Set master volume (0.0 - 1.0)
        pub fn set_master_volume(&mut self, vol: f32) {
            self.master_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
            if muted {
                self.stop_thrust();
            }
        }

        fn effective_volume(&self) -> f32 {
            if self.muted { 0.0 } else { self.master_volume }
        }

        /// Create an oscillator routed through its own gain node
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn start_thrust(&mut self, ctx: &AudioContext, vol: f32) {
            if self.thrust.is_some() {
                return;
            }
            if let Some((osc, gain)) = Self::create_osc(ctx, 55.0, OscillatorType::Sawtooth) {
                let t = ctx.current_time();
                gain.gain().set_value_at_time(0.01, t).ok();
                gain.gain()
                    .linear_ramp_to_value_at_time(vol * 0.15, t + 0.05)
                    .ok();
                osc.start().ok();
                self.thrust = Some((osc, gain));
            }
        }

        fn stop_thrust(&mut self) {
            if let Some((osc, _gain)) = self.thrust.take() {
                osc.stop().ok();
            }
        }

        /// Laser - short falling zap
        fn play_laser(ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = Self::create_osc(ctx, 1200.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(300.0, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.12).ok();
        }

        /// Asteroid hit - low thud, deeper for bigger rocks
        fn play_asteroid_hit(ctx: &AudioContext, vol: f32, tier: SizeTier) {
            let freq = match tier {
                SizeTier::Large => 60.0,
                SizeTier::Medium => 90.0,
                SizeTier::Small => 140.0,
            };
            let Some((osc, gain)) = Self::create_osc(ctx, freq, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(freq * 0.5, t + 0.25)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }

        /// Ship explosion - crackle over a sub bass punch
        fn play_ship_explode(ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = Self::create_osc(ctx, 120.0, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.frequency().set_value_at_time(120.0, t).ok();
                osc.frequency().set_value_at_time(400.0, t + 0.02).ok();
                osc.frequency().set_value_at_time(150.0, t + 0.04).ok();
                osc.frequency().set_value_at_time(350.0, t + 0.06).ok();
                osc.frequency().set_value_at_time(80.0, t + 0.15).ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.35).ok();
            }

            if let Some((osc, gain)) = Self::create_osc(ctx, 40.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.4, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.35).ok();
            }
        }

        /// Rising or falling three-note arpeggio
        fn play_arpeggio(ctx: &AudioContext, vol: f32, notes: [f32; 3]) {
            for (i, freq) in notes.iter().enumerate() {
                let delay = i as f64 * 0.1;
                if let Some((osc, gain)) = Self::create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.25).ok();
                }
            }
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, effect: SoundEffect) {
            if effect == SoundEffect::ThrustOff {
                self.stop_thrust();
                return;
            }

            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = self.ctx.clone() else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::ThrustOn => self.start_thrust(&ctx, vol),
                SoundEffect::ThrustOff => {}
                SoundEffect::LaserFire => Self::play_laser(&ctx, vol),
                SoundEffect::AsteroidHit(tier) => Self::play_asteroid_hit(&ctx, vol, tier),
                SoundEffect::ShipExplode => Self::play_ship_explode(&ctx, vol),
                SoundEffect::LevelStart => Self::play_arpeggio(&ctx, vol, [440.0, 550.0, 660.0]),
                SoundEffect::GameOver => Self::play_arpeggio(&ctx, vol, [440.0, 330.0, 220.0]),
            }
        }
    }
}
