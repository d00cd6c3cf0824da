use super::{AudioError, Cue, CuePlayer};
use std::collections::HashMap;

/// A playing instance of a cue.
pub trait Voice {
    fn stop(&mut self);
}

/// Starts playback of a cue on some audio engine.
pub trait CueBackend {
    type Voice: Voice;

    fn start(&mut self, cue: Cue) -> Result<Self::Voice, AudioError>;
}

/// Holds at most one live voice per cue. Retriggering a cue stops the
/// previous voice before starting a new one, so instances never layer.
pub struct CueRegistry<B: CueBackend> {
    backend: B,
    voices: HashMap<Cue, B::Voice>,
}

impl<B: CueBackend> CueRegistry<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            voices: HashMap::new(),
        }
    }
}

impl<B: CueBackend> CuePlayer for CueRegistry<B> {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        if let Some(mut previous) = self.voices.remove(&cue) {
            previous.stop();
        }
        let voice = self.backend.start(cue)?;
        self.voices.insert(cue, voice);
        Ok(())
    }
}

impl<B: CueBackend> Drop for CueRegistry<B> {
    fn drop(&mut self) {
        self.voices.values_mut().for_each(Voice::stop);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Mixer {
        live: HashMap<Cue, usize>,
        peak: HashMap<Cue, usize>,
        started: usize,
    }

    struct FakeVoice {
        cue: Cue,
        mixer: Rc<RefCell<Mixer>>,
        stopped: bool,
    }

    impl Voice for FakeVoice {
        fn stop(&mut self) {
            if !self.stopped {
                self.stopped = true;
                *self.mixer.borrow_mut().live.entry(self.cue).or_default() -= 1;
            }
        }
    }

    struct FakeBackend {
        mixer: Rc<RefCell<Mixer>>,
        fail: bool,
    }

    impl CueBackend for FakeBackend {
        type Voice = FakeVoice;

        fn start(&mut self, cue: Cue) -> Result<FakeVoice, AudioError> {
            if self.fail {
                return Err(AudioError::Playback {
                    cue,
                    reason: "blocked".into(),
                });
            }
            let mut mixer = self.mixer.borrow_mut();
            mixer.started += 1;
            let live = {
                let live = mixer.live.entry(cue).or_default();
                *live += 1;
                *live
            };
            let peak = mixer.peak.entry(cue).or_default();
            *peak = (*peak).max(live);
            Ok(FakeVoice {
                cue,
                mixer: self.mixer.clone(),
                stopped: false,
            })
        }
    }

    fn registry(fail: bool) -> (CueRegistry<FakeBackend>, Rc<RefCell<Mixer>>) {
        let mixer = Rc::new(RefCell::new(Mixer::default()));
        let backend = FakeBackend {
            mixer: mixer.clone(),
            fail,
        };
        (CueRegistry::new(backend), mixer)
    }

    #[test]
    fn test_retrigger_restarts_instead_of_layering() {
        let (mut registry, mixer) = registry(false);
        for _ in 0..5 {
            registry.play(Cue::Shake).unwrap();
        }

        let mixer = mixer.borrow();
        assert_eq!(mixer.started, 5);
        assert_eq!(mixer.peak[&Cue::Shake], 1);
        assert_eq!(mixer.live[&Cue::Shake], 1);
    }

    #[test]
    fn test_different_cues_play_side_by_side() {
        let (mut registry, mixer) = registry(false);
        registry.play(Cue::Shake).unwrap();
        registry.play(Cue::Open).unwrap();

        let mixer = mixer.borrow();
        assert_eq!(mixer.live[&Cue::Shake], 1);
        assert_eq!(mixer.live[&Cue::Open], 1);
    }

    #[test]
    fn test_dropping_registry_stops_voices() {
        let (mut registry, mixer) = registry(false);
        registry.play(Cue::Open).unwrap();
        drop(registry);
        assert_eq!(mixer.borrow().live[&Cue::Open], 0);
    }

    #[test]
    fn test_backend_failure_is_reported() {
        let (mut registry, _) = registry(true);
        assert!(matches!(
            registry.play(Cue::Open),
            Err(AudioError::Playback { cue: Cue::Open, .. })
        ));
    }
}
