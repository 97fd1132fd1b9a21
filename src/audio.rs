//! Audio using the Web Audio API
//!
//! Procedurally generated blips - no external files needed. The effect
//! table is plain data so it can be checked natively; playback is wasm only.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball returned by a paddle
    PaddleHit,
    /// Ball bounced off top or bottom
    WallBounce,
    /// A point was scored
    Score,
    /// A match was won
    MatchWon,
}

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Triangle,
}

/// One oscillator burst: frequency glide plus exponential decay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub wave: Wave,
    pub start_hz: f32,
    pub end_hz: f32,
    /// Peak gain before master volume
    pub gain: f32,
    /// Seconds after the effect is triggered
    pub delay: f64,
    pub duration: f64,
}

const fn tone(
    wave: Wave,
    start_hz: f32,
    end_hz: f32,
    gain: f32,
    delay: f64,
    duration: f64,
) -> Tone {
    Tone {
        wave,
        start_hz,
        end_hz,
        gain,
        delay,
        duration,
    }
}

const PADDLE_HIT: &[Tone] = &[tone(Wave::Square, 440.0, 330.0, 0.25, 0.0, 0.08)];
const WALL_BOUNCE: &[Tone] = &[tone(Wave::Sine, 660.0, 660.0, 0.2, 0.0, 0.06)];
const SCORE: &[Tone] = &[
    tone(Wave::Triangle, 520.0, 260.0, 0.4, 0.0, 0.25),
    tone(Wave::Sine, 130.0, 65.0, 0.3, 0.0, 0.3),
];
const MATCH_WON: &[Tone] = &[
    tone(Wave::Square, 523.0, 523.0, 0.25, 0.0, 0.12),
    tone(Wave::Square, 659.0, 659.0, 0.25, 0.12, 0.12),
    tone(Wave::Square, 784.0, 784.0, 0.25, 0.24, 0.12),
    tone(Wave::Triangle, 1047.0, 1047.0, 0.3, 0.36, 0.4),
];

impl SoundEffect {
    /// Effect to play for a simulation event
    pub fn for_event(event: &GameEvent) -> SoundEffect {
        match event {
            GameEvent::PaddleHit(_) => SoundEffect::PaddleHit,
            GameEvent::WallBounce => SoundEffect::WallBounce,
            GameEvent::Scored { .. } => SoundEffect::Score,
            GameEvent::MatchWon(_) => SoundEffect::MatchWon,
        }
    }

    pub fn tones(self) -> &'static [Tone] {
        match self {
            SoundEffect::PaddleHit => PADDLE_HIT,
            SoundEffect::WallBounce => WALL_BOUNCE,
            SoundEffect::Score => SCORE,
            SoundEffect::MatchWon => MATCH_WON,
        }
    }

    /// Total length in seconds
    pub fn duration(self) -> f64 {
        self.tones()
            .iter()
            .map(|t| t.delay + t.duration)
            .fold(0.0, f64::max)
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, Tone, Wave};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, volume: 0.8 }
        }

        /// Set output volume (0.0 - 1.0); zero silences everything
        pub fn set_volume(&mut self, vol: f32) {
            self.volume = vol.clamp(0.0, 1.0);
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let t = ctx.current_time();
            for tone in effect.tones() {
                self.play_tone(ctx, tone, t + tone.delay);
            }
        }

        /// Create an oscillator routed through its own gain node
        fn create_osc(
            &self,
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

        fn play_tone(&self, ctx: &AudioContext, tone: &Tone, start: f64) {
            let osc_type = match tone.wave {
                Wave::Sine => OscillatorType::Sine,
                Wave::Square => OscillatorType::Square,
                Wave::Triangle => OscillatorType::Triangle,
            };
            let Some((osc, gain)) = self.create_osc(ctx, tone.start_hz, osc_type) else {
                return;
            };
            let end = start + tone.duration;

            gain.gain().set_value_at_time(0.0, ctx.current_time()).ok();
            gain.gain()
                .set_value_at_time(tone.gain * self.volume, start)
                .ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();
            osc.frequency().set_value_at_time(tone.start_hz, start).ok();
            if tone.end_hz != tone.start_hz {
                osc.frequency()
                    .exponential_ramp_to_value_at_time(tone.end_hz, end)
                    .ok();
            }

            osc.start_with_when(start).ok();
            osc.stop_with_when(end + 0.02).ok();
        }
    }
}
