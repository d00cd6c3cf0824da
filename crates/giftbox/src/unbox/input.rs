use crate::unbox::model::{Controller, Outcome, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Click or tap inside the box region.
    Pointer,
    Key(Key),
}

#[derive(Debug, Default)]
pub struct InputResponse {
    /// The host should stop default handling (e.g. scroll-on-space).
    pub consumed: bool,
    pub outcome: Outcome,
}

impl Controller {
    pub fn handle_input(&mut self, input: Input) -> InputResponse {
        match input {
            Input::Pointer => InputResponse {
                consumed: true,
                outcome: self.activate(),
            },
            Input::Key(Key::Enter | Key::Space) => InputResponse {
                consumed: true,
                outcome: if self.phase() == Phase::Idle {
                    self.activate()
                } else {
                    Outcome::default()
                },
            },
            Input::Key(Key::Other) => InputResponse::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Muted;
    use crate::unbox::Signal;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn controller() -> Controller {
        Controller::new(Box::new(Muted), Box::new(StdRng::seed_from_u64(1)))
    }

    #[test]
    fn test_activation_keys_are_consumed_and_open_once() {
        let mut c = controller();
        let first = c.handle_input(Input::Key(Key::Space));
        assert!(first.consumed);
        assert!(first.outcome.contains(Signal::LidLifting));
        assert_eq!(c.phase(), Phase::Opening);

        let second = c.handle_input(Input::Key(Key::Enter));
        assert!(second.consumed);
        assert!(second.outcome.signals.is_empty());
    }

    #[test]
    fn test_other_keys_pass_through() {
        let mut c = controller();
        let response = c.handle_input(Input::Key(Key::Other));
        assert!(!response.consumed);
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn test_pointer_activates() {
        let mut c = controller();
        assert!(c.handle_input(Input::Pointer).outcome.contains(Signal::LidLifting));
        assert!(c.handle_input(Input::Pointer).outcome.signals.is_empty());
    }
}
