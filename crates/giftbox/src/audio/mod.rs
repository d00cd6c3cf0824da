use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

pub mod registry;
pub mod synth;

pub use registry::{CueBackend, CueRegistry, Voice};
pub use synth::KiraBackend;

/// The two one-shot feedback sounds the gift box can request.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    Shake,
    Open,
}

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Audio engine unavailable: {0}")]
    Unavailable(String),
    #[error("Cue '{0}' is not loaded")]
    MissingCue(Cue),
    #[error("Failed to play cue '{cue}': {reason}")]
    Playback { cue: Cue, reason: String },
}

/// Fire-and-forget cue playback.
pub trait CuePlayer {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError>;
}

/// Player used when audio is disabled or no device could be opened.
#[derive(Debug, Default, Clone, Copy)]
pub struct Muted;

impl CuePlayer for Muted {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        log::trace!("Muted cue '{}'", cue);
        Ok(())
    }
}

/// Opens the system audio device and wraps it in a restart-on-retrigger
/// registry. Falls back to [`Muted`] when audio is off or unavailable.
pub fn open_player(enabled: bool, volume: f32) -> Box<dyn CuePlayer> {
    if !enabled {
        log::info!("Audio cues disabled by configuration");
        return Box::new(Muted);
    }

    match KiraBackend::new(volume) {
        Ok(backend) => Box::new(CueRegistry::new(backend)),
        Err(e) => {
            log::debug!("{}, running silent", e);
            Box::new(Muted)
        }
    }
}
