//! Sound effects
//!
//! Each effect plays its loaded clip. If the clip failed to load, or is still
//! loading, a short synthesized tone stands in. Playback is fire-and-forget.

use crate::assets::AssetId;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Coin picked up
    CoinCollect,
    /// Player struck by an enemy shot
    PlayerHit,
    /// Basic enemy shot down or boss finished off
    EnemyDestroyed,
}

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Triangle,
}

/// One oscillator of a fallback tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub wave: Wave,
    pub start_hz: f32,
    /// Pitch glides exponentially to this by the end
    pub end_hz: f32,
    /// Seconds after the trigger
    pub delay: f64,
    pub duration: f64,
    /// Peak gain before master volume
    pub gain: f32,
}

impl Voice {
    const fn steady(wave: Wave, hz: f32, delay: f64, duration: f64, gain: f32) -> Self {
        Self {
            wave,
            start_hz: hz,
            end_hz: hz,
            delay,
            duration,
            gain,
        }
    }

    const fn glide(wave: Wave, from: f32, to: f32, duration: f64, gain: f32) -> Self {
        Self {
            wave,
            start_hz: from,
            end_hz: to,
            delay: 0.0,
            duration,
            gain,
        }
    }
}

/// Rising three-note chime
const COIN_TONE: [Voice; 3] = [
    Voice::steady(Wave::Sine, 660.0, 0.0, 0.12, 0.25),
    Voice::steady(Wave::Sine, 880.0, 0.07, 0.12, 0.25),
    Voice::steady(Wave::Sine, 1320.0, 0.14, 0.18, 0.2),
];

/// Low buzz dropping away
const HIT_TONE: [Voice; 1] = [Voice::glide(Wave::Square, 220.0, 70.0, 0.25, 0.35)];

/// Short pop over a falling body
const DESTROY_TONE: [Voice; 2] = [
    Voice::glide(Wave::Triangle, 520.0, 90.0, 0.22, 0.45),
    Voice::glide(Wave::Sine, 1200.0, 600.0, 0.06, 0.15),
];

impl SoundEffect {
    /// The effect a game event should trigger, if any
    pub fn for_event(event: GameEvent) -> Option<Self> {
        match event {
            GameEvent::CoinCollected => Some(SoundEffect::CoinCollect),
            GameEvent::PlayerHit => Some(SoundEffect::PlayerHit),
            GameEvent::EnemyDestroyed | GameEvent::BossDestroyed => {
                Some(SoundEffect::EnemyDestroyed)
            }
            GameEvent::BossSpawned | GameEvent::BossHit | GameEvent::GameOver => None,
        }
    }

    pub fn clip(&self) -> AssetId {
        match self {
            SoundEffect::CoinCollect => AssetId::CoinSound,
            SoundEffect::PlayerHit => AssetId::HitSound,
            SoundEffect::EnemyDestroyed => AssetId::DestroySound,
        }
    }

    /// Voices of the synthesized stand-in
    pub fn voices(&self) -> &'static [Voice] {
        match self {
            SoundEffect::CoinCollect => &COIN_TONE,
            SoundEffect::PlayerHit => &HIT_TONE,
            SoundEffect::EnemyDestroyed => &DESTROY_TONE,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{SoundEffect, Voice, Wave};
    use crate::assets::{AssetId, AssetRegistry};
    use web_sys::{AudioContext, HtmlAudioElement, OscillatorType};

    impl From<Wave> for OscillatorType {
        fn from(wave: Wave) -> Self {
            match wave {
                Wave::Sine => OscillatorType::Sine,
                Wave::Square => OscillatorType::Square,
                Wave::Triangle => OscillatorType::Triangle,
            }
        }
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        clips: Vec<(AssetId, HtmlAudioElement)>,
        volume: f32,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Only needed for fallback tones; clips play without it
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - fallback tones disabled");
            }
            Self {
                ctx,
                clips: Vec::new(),
                volume: 0.8,
            }
        }

        /// Register a clip element for a sound asset
        pub fn add_clip(&mut self, id: AssetId, element: HtmlAudioElement) {
            self.clips.push((id, element));
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn play(&self, effect: SoundEffect, assets: &AssetRegistry) {
            log::debug!("sfx {:?}", effect);

            let id = effect.clip();
            if assets.is_ready(id) {
                if let Some((_, clip)) = self.clips.iter().find(|(clip_id, _)| *clip_id == id) {
                    clip.set_volume(self.volume as f64);
                    // Restart so rapid repeats are heard
                    clip.set_current_time(0.0);
                    if clip.play().is_ok() {
                        return;
                    }
                }
            }

            let Some(ctx) = &self.ctx else { return };
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            for voice in effect.voices() {
                if play_voice(ctx, voice, self.volume).is_none() {
                    log::debug!("Fallback tone for {:?} could not be scheduled", effect);
                }
            }
        }
    }

    /// Schedule one oscillator with a decaying gain envelope
    fn play_voice(ctx: &AudioContext, voice: &Voice, volume: f32) -> Option<()> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;
        osc.set_type(voice.wave.into());
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        let start = ctx.current_time() + voice.delay;
        let end = start + voice.duration;

        let freq = osc.frequency();
        freq.set_value_at_time(voice.start_hz, start).ok()?;
        if voice.end_hz != voice.start_hz {
            freq.exponential_ramp_to_value_at_time(voice.end_hz, end).ok()?;
        }

        let envelope = gain.gain();
        envelope.set_value_at_time(voice.gain * volume, start).ok()?;
        envelope.exponential_ramp_to_value_at_time(0.01, end).ok()?;

        osc.start_with_when(start).ok()?;
        osc.stop_with_when(end + 0.05).ok()?;
        Some(())
    }
}
