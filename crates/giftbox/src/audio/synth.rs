//! Kira-backed cue playback with synthesized tones.
//!
//! Both cues are short sine blips generated at startup, so no audio assets
//! need to ship with the widget.

use super::{AudioError, Cue, CueBackend, Voice};
use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings};
use kira::{AudioManager, AudioManagerSettings, DefaultBackend, Frame, Tween};
use std::collections::HashMap;
use std::f32::consts::TAU;
use std::sync::Arc;
use std::time::Duration;
use strum::IntoEnumIterator;

const SAMPLE_RATE: u32 = 44_100;

/// Pitch and loudness envelope of one synthesized cue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub length: f32,
    pub freq_start: f32,
    pub freq_end: f32,
    /// Time over which the pitch glides from start to end.
    pub glide: f32,
    pub gain_start: f32,
    pub gain_end: f32,
}

impl Tone {
    pub fn for_cue(cue: Cue) -> Self {
        match cue {
            Cue::Shake => Self {
                length: 0.1,
                freq_start: 400.0,
                freq_end: 400.0,
                glide: 0.1,
                gain_start: 0.1,
                gain_end: 0.01,
            },
            Cue::Open => Self {
                length: 0.3,
                freq_start: 600.0,
                freq_end: 800.0,
                glide: 0.2,
                gain_start: 0.2,
                gain_end: 0.01,
            },
        }
    }

    /// Exponential ramp from `a` to `b` over `span`, holding `b` afterwards.
    fn exp_ramp(a: f32, b: f32, t: f32, span: f32) -> f32 {
        let k = (t / span).clamp(0.0, 1.0);
        a * (b / a).powf(k)
    }

    pub fn frequency_at(&self, t: f32) -> f32 {
        Self::exp_ramp(self.freq_start, self.freq_end, t, self.glide)
    }

    pub fn gain_at(&self, t: f32) -> f32 {
        Self::exp_ramp(self.gain_start, self.gain_end, t, self.length)
    }

    pub fn samples(&self, sample_rate: u32, volume: f32) -> Vec<f32> {
        let count = (self.length * sample_rate as f32).round() as usize;
        let dt = 1.0 / sample_rate as f32;
        let mut phase = 0.0_f32;

        (0..count)
            .map(|i| {
                let t = i as f32 * dt;
                let sample = phase.sin() * self.gain_at(t) * volume;
                phase = (phase + TAU * self.frequency_at(t) * dt) % TAU;
                sample
            })
            .collect()
    }
}

pub struct KiraVoice(StaticSoundHandle);

impl Voice for KiraVoice {
    fn stop(&mut self) {
        let _ = self.0.stop(Tween {
            duration: Duration::ZERO,
            ..Default::default()
        });
    }
}

pub struct KiraBackend {
    manager: AudioManager<DefaultBackend>,
    sounds: HashMap<Cue, StaticSoundData>,
}

impl KiraBackend {
    pub fn new(volume: f32) -> Result<Self, AudioError> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| AudioError::Unavailable(e.to_string()))?;

        let volume = volume.clamp(0.0, 1.0);
        let sounds = Cue::iter()
            .map(|cue| (cue, Self::render(Tone::for_cue(cue), volume)))
            .collect();

        Ok(Self { manager, sounds })
    }

    fn render(tone: Tone, volume: f32) -> StaticSoundData {
        let frames: Arc<[Frame]> = tone
            .samples(SAMPLE_RATE, volume)
            .into_iter()
            .map(Frame::from_mono)
            .collect();

        StaticSoundData {
            sample_rate: SAMPLE_RATE,
            frames,
            settings: StaticSoundSettings::default(),
            slice: None,
        }
    }
}

impl CueBackend for KiraBackend {
    type Voice = KiraVoice;

    fn start(&mut self, cue: Cue) -> Result<KiraVoice, AudioError> {
        let data = self
            .sounds
            .get(&cue)
            .ok_or(AudioError::MissingCue(cue))?
            .clone();

        self.manager
            .play(data)
            .map(KiraVoice)
            .map_err(|e| AudioError::Playback {
                cue,
                reason: e.to_string(),
            })
    }
}
