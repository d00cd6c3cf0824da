use crate::audio::{AudioError, Cue, CuePlayer};
use crate::unbox::tween::{Keyframes, Spring};
use crate::unbox::{
    BOUNCE_DURATION, BOUNCE_KEYFRAMES, EASE_IN_OUT, EASE_OUT, LID_DAMPING, LID_MASS,
    LID_MAX_DURATION, LID_OPEN, LID_OPEN_REDUCED, LID_STIFFNESS, MAX_FRAME_STEP,
    MIN_SHAKE_PERIOD, REDUCED_BOUNCE_FACTOR, SHAKE_DURATION, SHAKE_KEYFRAMES, SHAKE_PERIOD,
};
use confetti::{BurstGenerator, Particle};
use rand::RngCore;
use std::sync::Arc;
use std::time::Duration;
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Phase {
    Idle,
    Opening,
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum MotionPreference {
    #[default]
    Full,
    Reduced,
}

impl MotionPreference {
    pub fn is_reduced(self) -> bool {
        self == Self::Reduced
    }
}

impl From<bool> for MotionPreference {
    fn from(reduced: bool) -> Self {
        if reduced { Self::Reduced } else { Self::Full }
    }
}

/// Vertical offset (px), rotation (degrees) and uniform scale of a part of the box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub y: f64,
    pub rotate: f64,
    pub scale: f64,
}

impl Transform {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(y: f64, rotate: f64, scale: f64) -> Self {
        Self { y, rotate, scale }
    }

    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        Self {
            y: self.y + (to.y - self.y) * t,
            rotate: self.rotate + (to.rotate - self.rotate) * t,
            scale: self.scale + (to.scale - self.scale) * t,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Observable side effects of a transition, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Cue(Cue),
    LidLifting,
    LidSettled,
    BounceStarted,
    BounceSettled,
    ParticlesRevealed(usize),
    Shake,
    Reset,
}

#[derive(Debug, Default)]
pub struct Outcome {
    /// Signals stamped with the controller clock at the moment they fired.
    pub signals: Vec<(Duration, Signal)>,
    pub should_redraw: bool,
}

impl Outcome {
    fn emit(&mut self, at: Duration, signal: Signal) {
        self.signals.push((at, signal));
        self.should_redraw = true;
    }

    pub fn contains(&self, signal: Signal) -> bool {
        self.signals.iter().any(|(_, s)| *s == signal)
    }
}

/// Immutable view of the box handed to the renderer after every transition.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub phase: Phase,
    pub lid: Transform,
    pub body: Transform,
    pub revealed: bool,
    pub particles: Arc<[Particle]>,
    /// Bumped on every reset, so a host can tell one burst from the next.
    pub burst_epoch: u64,
    /// Time since the current burst was revealed.
    pub revealed_for: Duration,
    pub reduced_motion: bool,
}

impl Snapshot {
    pub fn visible_particles(&self) -> &[Particle] {
        if self.revealed { &self.particles[..] } else { &[] }
    }
}

enum Stage {
    Lid {
        spring: Spring,
        from: Transform,
        to: Transform,
        bounce: Keyframes,
    },
    Bounce(Keyframes),
}

/// Magnitudes and burst size are fixed when the sequence starts.
struct OpenSequence {
    reduced: bool,
    stage: Stage,
}

enum StageChange {
    None,
    LidSettled,
    BounceSettled { reduced: bool },
}

#[derive(Default)]
struct IdleShake {
    since_last: Duration,
    wobble: Option<Keyframes>,
}

pub struct Controller {
    phase: Phase,
    lid: Transform,
    body: Transform,
    revealed: bool,
    particles: Arc<[Particle]>,
    burst_epoch: u64,
    revealed_for: Duration,
    clock: Duration,
    motion: MotionPreference,
    shake_period: Duration,
    shake: Option<IdleShake>,
    opening: Option<OpenSequence>,
    generator: BurstGenerator,
    cues: Box<dyn CuePlayer>,
    rng: Box<dyn RngCore>,
    on_reset: Option<Box<dyn FnMut()>>,
}

impl Controller {
    pub fn new(cues: Box<dyn CuePlayer>, rng: Box<dyn RngCore>) -> Self {
        let mut controller = Self {
            phase: Phase::Idle,
            lid: Transform::IDENTITY,
            body: Transform::IDENTITY,
            revealed: false,
            particles: Vec::new().into(),
            burst_epoch: 0,
            revealed_for: Duration::ZERO,
            clock: Duration::ZERO,
            motion: MotionPreference::Full,
            shake_period: SHAKE_PERIOD,
            shake: None,
            opening: None,
            generator: BurstGenerator::default(),
            cues,
            rng,
            on_reset: None,
        };
        controller.rearm_shake();
        controller
    }

    pub fn with_motion(mut self, motion: MotionPreference) -> Self {
        self.motion = motion;
        self.rearm_shake();
        self
    }

    pub fn with_shake_period(mut self, period: Duration) -> Self {
        self.set_shake_period(period);
        self
    }

    pub fn with_generator(mut self, generator: BurstGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Host hook invoked after every reset.
    pub fn on_reset(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_reset = Some(Box::new(callback));
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn motion(&self) -> MotionPreference {
        self.motion
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn lid(&self) -> Transform {
        self.lid
    }

    pub fn body(&self) -> Transform {
        self.body
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            lid: self.lid,
            body: self.body,
            revealed: self.revealed,
            particles: self.particles.clone(),
            burst_epoch: self.burst_epoch,
            revealed_for: self.revealed_for,
            reduced_motion: self.motion.is_reduced(),
        }
    }

    pub fn set_shake_period(&mut self, period: Duration) {
        self.shake_period = period.max(MIN_SHAKE_PERIOD);
    }

    pub fn set_generator(&mut self, generator: BurstGenerator) {
        self.generator = generator;
    }

    pub fn set_cue_player(&mut self, cues: Box<dyn CuePlayer>) {
        self.cues = cues;
    }

    /// Applies a new motion preference. Only the shake timer and future
    /// sequences see it; an open sequence keeps its magnitudes.
    pub fn set_motion(&mut self, motion: MotionPreference) -> Outcome {
        let mut out = Outcome::default();
        if self.motion == motion {
            return out;
        }
        self.motion = motion;
        log::debug!("Motion preference is now {}", motion);

        if self.phase == Phase::Idle {
            let wobbling = self.shake.as_ref().is_some_and(|s| s.wobble.is_some());
            if motion.is_reduced() {
                self.shake = None;
                if wobbling {
                    self.lid = Transform::IDENTITY;
                    out.should_redraw = true;
                }
            } else if self.shake.is_none() {
                self.rearm_shake();
            }
        }
        out
    }

    /// Starts the open sequence. Ignored unless the box is idle.
    pub fn activate(&mut self) -> Outcome {
        let mut out = Outcome::default();
        if self.phase != Phase::Idle {
            log::debug!("Ignoring activation while {}", self.phase);
            return out;
        }

        let reduced = self.motion.is_reduced();
        self.phase = Phase::Opening;
        self.shake = None;
        self.request_cue(Cue::Open, &mut out);

        let (target, bounce_factor) = if reduced {
            (LID_OPEN_REDUCED, REDUCED_BOUNCE_FACTOR)
        } else {
            (LID_OPEN, 1.0)
        };
        self.opening = Some(OpenSequence {
            reduced,
            stage: Stage::Lid {
                spring: Spring::new(LID_STIFFNESS, LID_DAMPING, LID_MASS, LID_MAX_DURATION),
                from: self.lid,
                to: target,
                bounce: Keyframes::new(BOUNCE_KEYFRAMES, BOUNCE_DURATION, EASE_OUT)
                    .scaled_around(1.0, bounce_factor),
            },
        });
        out.emit(self.clock, Signal::LidLifting);
        log::debug!("Opening gift box (reduced motion: {})", reduced);
        out
    }

    /// Snaps back to a closed, idle box from any phase. Any open sequence in
    /// flight is dropped and never resumes.
    pub fn reset(&mut self) -> Outcome {
        let mut out = Outcome::default();
        if self.opening.take().is_some() {
            log::debug!("Reset interrupted an open sequence");
        }

        self.phase = Phase::Idle;
        self.lid = Transform::IDENTITY;
        self.body = Transform::IDENTITY;
        self.revealed = false;
        self.particles = Vec::new().into();
        self.revealed_for = Duration::ZERO;
        self.burst_epoch += 1;
        self.rearm_shake();

        out.emit(self.clock, Signal::Reset);
        if let Some(on_reset) = self.on_reset.as_mut() {
            on_reset();
        }
        log::info!("Gift box reset");
        out
    }

    /// Moves the controller clock forward. Steps longer than
    /// [`MAX_FRAME_STEP`] are clamped.
    pub fn advance(&mut self, dt: Duration) -> Outcome {
        let dt = dt.min(MAX_FRAME_STEP);
        self.clock += dt;

        let mut out = Outcome::default();
        match self.phase {
            Phase::Idle => self.advance_idle(dt, &mut out),
            Phase::Opening => self.advance_opening(dt, &mut out),
            Phase::Revealed => {
                self.revealed_for += dt;
                let elapsed = self.revealed_for.as_secs_f32();
                out.should_redraw = self.particles.iter().any(|p| !p.has_landed(elapsed));
            }
        }
        out
    }

    fn advance_idle(&mut self, dt: Duration, out: &mut Outcome) {
        let Some(shake) = self.shake.as_mut() else {
            return;
        };

        if let Some(wobble) = shake.wobble.as_mut() {
            wobble.advance(dt);
            self.lid.rotate = wobble.value();
            out.should_redraw = true;
            if wobble.is_finished() {
                shake.wobble = None;
                self.lid = Transform::IDENTITY;
            }
        }

        shake.since_last += dt;
        if shake.since_last < self.shake_period {
            return;
        }
        shake.since_last = (shake.since_last - self.shake_period).min(self.shake_period);
        shake.wobble = Some(Keyframes::new(SHAKE_KEYFRAMES, SHAKE_DURATION, EASE_IN_OUT));

        out.emit(self.clock, Signal::Shake);
        self.request_cue(Cue::Shake, out);
    }

    fn advance_opening(&mut self, dt: Duration, out: &mut Outcome) {
        let Some(sequence) = self.opening.as_mut() else {
            return;
        };
        out.should_redraw = true;

        let change = match &mut sequence.stage {
            Stage::Lid {
                spring, from, to, ..
            } => {
                spring.advance(dt);
                self.lid = from.lerp(to, spring.progress());
                if spring.is_settled() {
                    self.lid = *to;
                    StageChange::LidSettled
                } else {
                    StageChange::None
                }
            }
            Stage::Bounce(track) => {
                track.advance(dt);
                self.body.scale = track.value();
                if track.is_finished() {
                    StageChange::BounceSettled {
                        reduced: sequence.reduced,
                    }
                } else {
                    StageChange::None
                }
            }
        };

        match change {
            StageChange::None => {}
            StageChange::LidSettled => {
                if let Some(sequence) = self.opening.as_mut()
                    && let Stage::Lid { bounce, .. } = &sequence.stage
                {
                    sequence.stage = Stage::Bounce(bounce.clone());
                }
                out.emit(self.clock, Signal::LidSettled);
                out.emit(self.clock, Signal::BounceStarted);
            }
            StageChange::BounceSettled { reduced } => {
                self.body = Transform::IDENTITY;
                out.emit(self.clock, Signal::BounceSettled);
                self.reveal(reduced, out);
            }
        }
    }

    fn reveal(&mut self, reduced: bool, out: &mut Outcome) {
        self.opening = None;
        self.phase = Phase::Revealed;
        self.revealed = true;
        self.revealed_for = Duration::ZERO;
        self.particles = self.generator.generate(true, reduced, &mut self.rng).into();

        out.emit(self.clock, Signal::ParticlesRevealed(self.particles.len()));
        log::debug!("Revealed burst of {} particles", self.particles.len());
    }

    fn rearm_shake(&mut self) {
        self.shake = (self.phase == Phase::Idle && !self.motion.is_reduced())
            .then(IdleShake::default);
    }

    fn request_cue(&mut self, cue: Cue, out: &mut Outcome) {
        out.emit(self.clock, Signal::Cue(cue));
        match self.cues.play(cue) {
            Ok(()) => {}
            Err(e @ AudioError::Unavailable(_)) => log::debug!("{}", e),
            Err(e) => log::warn!("{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unbox::SHAKE_PERIOD;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    const FRAME: Duration = Duration::from_millis(16);

    struct RecordingCues(Rc<RefCell<Vec<Cue>>>);

    impl CuePlayer for RecordingCues {
        fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
            self.0.borrow_mut().push(cue);
            Ok(())
        }
    }

    struct BlockedCues;

    impl CuePlayer for BlockedCues {
        fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
            Err(AudioError::Playback {
                cue,
                reason: "autoplay blocked".into(),
            })
        }
    }

    struct Harness {
        controller: Controller,
        cues: Rc<RefCell<Vec<Cue>>>,
        resets: Rc<Cell<usize>>,
        trace: Vec<(Duration, Signal)>,
    }

    impl Harness {
        fn new(motion: MotionPreference) -> Self {
            let cues = Rc::new(RefCell::new(Vec::new()));
            let resets = Rc::new(Cell::new(0));
            let counter = resets.clone();
            let controller = Controller::new(
                Box::new(RecordingCues(cues.clone())),
                Box::new(StdRng::seed_from_u64(11)),
            )
            .with_motion(motion)
            .on_reset(move || counter.set(counter.get() + 1));

            Self {
                controller,
                cues,
                resets,
                trace: Vec::new(),
            }
        }

        fn record(&mut self, out: Outcome) {
            self.trace.extend(out.signals);
        }

        fn activate(&mut self) {
            let out = self.controller.activate();
            self.record(out);
        }

        fn reset(&mut self) {
            let out = self.controller.reset();
            self.record(out);
        }

        fn run_for(&mut self, span: Duration) {
            let mut elapsed = Duration::ZERO;
            while elapsed < span {
                let out = self.controller.advance(FRAME);
                self.record(out);
                elapsed += FRAME;
            }
        }

        fn run_until_revealed(&mut self) {
            for _ in 0..500 {
                if self.controller.phase() == Phase::Revealed {
                    return;
                }
                let out = self.controller.advance(FRAME);
                self.record(out);
            }
            panic!("open sequence never completed");
        }

        fn count(&self, signal: Signal) -> usize {
            self.trace.iter().filter(|(_, s)| *s == signal).count()
        }

        fn first(&self, signal: Signal) -> Duration {
            self.trace
                .iter()
                .find(|(_, s)| *s == signal)
                .map(|(at, _)| *at)
                .unwrap_or_else(|| panic!("{:?} never fired", signal))
        }

        fn kinds(&self) -> Vec<Signal> {
            self.trace.iter().map(|(_, s)| *s).collect()
        }
    }

    #[test]
    fn test_mounts_idle_and_closed() {
        let h = Harness::new(MotionPreference::Full);
        let snap = h.controller.snapshot();
        assert_eq!(snap.phase, Phase::Idle);
        assert!(snap.lid.is_identity());
        assert!(snap.body.is_identity());
        assert!(!snap.revealed);
        assert!(snap.particles.is_empty());
    }

    #[test]
    fn test_full_open_sequence_reveals_burst() {
        let mut h = Harness::new(MotionPreference::Full);
        h.activate();
        h.run_until_revealed();

        assert_eq!(
            h.kinds(),
            vec![
                Signal::Cue(Cue::Open),
                Signal::LidLifting,
                Signal::LidSettled,
                Signal::BounceStarted,
                Signal::BounceSettled,
                Signal::ParticlesRevealed(54),
            ]
        );
        assert_eq!(*h.cues.borrow(), vec![Cue::Open]);

        let snap = h.controller.snapshot();
        assert_eq!(snap.phase, Phase::Revealed);
        assert!(snap.revealed);
        assert_eq!(snap.visible_particles().len(), 54);
        assert_eq!(snap.lid, LID_OPEN);
        assert!(snap.body.is_identity());
    }

    #[test]
    fn test_repeated_activation_runs_one_sequence() {
        let mut h = Harness::new(MotionPreference::Full);
        h.activate();
        h.activate();
        h.run_for(Duration::from_millis(200));
        h.activate();
        h.run_until_revealed();
        h.activate();
        h.run_for(Duration::from_secs(1));

        assert_eq!(h.count(Signal::Cue(Cue::Open)), 1);
        assert_eq!(h.count(Signal::LidLifting), 1);
        assert_eq!(h.count(Signal::LidSettled), 1);
        assert_eq!(h.count(Signal::BounceSettled), 1);
        assert_eq!(h.count(Signal::ParticlesRevealed(54)), 1);
        assert_eq!(h.controller.phase(), Phase::Revealed);
    }

    #[test]
    fn test_lid_then_bounce_then_particles() {
        let mut h = Harness::new(MotionPreference::Full);
        let started = h.controller.clock();
        h.activate();

        // body holds still while the lid moves
        while h.controller.phase() == Phase::Opening && h.count(Signal::LidSettled) == 0 {
            h.run_for(FRAME);
            if h.count(Signal::LidSettled) == 0 {
                assert!(h.controller.body().is_identity());
            }
        }
        // lid holds its open pose while the body bounces
        while h.controller.phase() == Phase::Opening {
            assert_eq!(h.controller.lid(), LID_OPEN);
            h.run_for(FRAME);
        }

        let lid_settled = h.first(Signal::LidSettled);
        assert!(lid_settled > started);
        assert!(h.first(Signal::BounceStarted) >= lid_settled);
        assert!(h.first(Signal::BounceSettled) > h.first(Signal::BounceStarted));
        assert!(h.first(Signal::ParticlesRevealed(54)) >= h.first(Signal::BounceSettled));
    }

    #[test]
    fn test_reduced_motion_keeps_phases_but_shrinks_effects() {
        let mut h = Harness::new(MotionPreference::Reduced);
        h.activate();

        let mut peak_scale = 1.0_f64;
        while h.controller.phase() == Phase::Opening {
            h.run_for(FRAME);
            peak_scale = peak_scale.max(h.controller.body().scale);
        }

        assert_eq!(
            h.kinds(),
            vec![
                Signal::Cue(Cue::Open),
                Signal::LidLifting,
                Signal::LidSettled,
                Signal::BounceStarted,
                Signal::BounceSettled,
                Signal::ParticlesRevealed(18),
            ]
        );
        assert_eq!(h.controller.lid(), LID_OPEN_REDUCED);
        assert!(peak_scale > 1.0 && peak_scale < 1.03);
    }

    #[test]
    fn test_reset_snaps_back_and_round_trips() {
        let mut h = Harness::new(MotionPreference::Full);
        h.activate();
        h.run_until_revealed();
        let first_run = h.kinds();
        let epoch = h.controller.snapshot().burst_epoch;

        h.reset();
        let snap = h.controller.snapshot();
        assert_eq!(snap.phase, Phase::Idle);
        assert!(snap.lid.is_identity());
        assert!(snap.body.is_identity());
        assert!(!snap.revealed);
        assert!(snap.particles.is_empty());
        assert_eq!(snap.burst_epoch, epoch + 1);
        assert_eq!(h.resets.get(), 1);

        h.trace.clear();
        h.activate();
        h.run_until_revealed();
        assert_eq!(h.kinds(), first_run);
    }

    #[test]
    fn test_reset_mid_opening_drops_the_sequence() {
        let mut h = Harness::new(MotionPreference::Full);
        h.activate();
        h.run_for(Duration::from_millis(100));
        assert!(!h.controller.lid().is_identity());

        h.reset();
        assert!(h.controller.lid().is_identity());
        h.run_for(Duration::from_secs(2));

        assert_eq!(h.controller.phase(), Phase::Idle);
        assert!(h.controller.lid().is_identity());
        assert!(h.controller.body().is_identity());
        assert_eq!(h.count(Signal::LidSettled), 0);
        assert_eq!(h.count(Signal::ParticlesRevealed(54)), 0);
    }

    #[test]
    fn test_reset_from_idle_mid_wobble_restarts_shake_timer() {
        let mut h = Harness::new(MotionPreference::Full);
        h.run_for(SHAKE_PERIOD + Duration::from_millis(100));
        assert_eq!(h.count(Signal::Shake), 1);
        assert!(!h.controller.lid().is_identity());
        let epoch = h.controller.snapshot().burst_epoch;

        let out = h.controller.reset();
        assert!(out.contains(Signal::Reset));
        assert!(out.should_redraw);
        h.record(out);

        assert_eq!(h.controller.phase(), Phase::Idle);
        assert!(h.controller.lid().is_identity());
        assert_eq!(h.resets.get(), 1);
        assert_eq!(h.controller.snapshot().burst_epoch, epoch + 1);

        // the timer starts over, so no shake until a full period has passed
        h.run_for(SHAKE_PERIOD - FRAME * 2);
        assert_eq!(h.count(Signal::Shake), 1);
        assert!(h.controller.lid().is_identity());
        h.run_for(FRAME * 4);
        assert_eq!(h.count(Signal::Shake), 2);
    }

    #[test]
    fn test_idle_box_shakes_periodically() {
        let mut h = Harness::new(MotionPreference::Full);
        h.run_for(SHAKE_PERIOD + Duration::from_millis(200));
        assert!(h.count(Signal::Shake) >= 1);
        assert!(h.cues.borrow().contains(&Cue::Shake));
        assert!(h.controller.lid().rotate != 0.0);

        h.run_for(Duration::from_millis(600));
        assert!(h.controller.lid().is_identity());
    }

    #[test]
    fn test_reduced_motion_never_shakes() {
        let mut h = Harness::new(MotionPreference::Reduced);
        h.run_for(SHAKE_PERIOD * 3);
        assert_eq!(h.count(Signal::Shake), 0);
        assert!(h.cues.borrow().is_empty());
    }

    #[test]
    fn test_shake_is_suspended_outside_idle() {
        let mut h = Harness::new(MotionPreference::Full);
        h.activate();
        h.run_for(SHAKE_PERIOD * 3);
        assert_eq!(h.controller.phase(), Phase::Revealed);
        assert_eq!(h.count(Signal::Shake), 0);

        h.reset();
        h.run_for(SHAKE_PERIOD + FRAME * 2);
        assert_eq!(h.count(Signal::Shake), 1);
    }

    #[test]
    fn test_motion_change_does_not_touch_running_sequence() {
        let mut h = Harness::new(MotionPreference::Full);
        h.activate();
        h.run_for(Duration::from_millis(100));
        h.controller.set_motion(MotionPreference::Reduced);
        h.run_until_revealed();

        assert_eq!(h.controller.lid(), LID_OPEN);
        assert_eq!(h.count(Signal::ParticlesRevealed(54)), 1);

        h.reset();
        h.run_for(SHAKE_PERIOD * 2);
        assert_eq!(h.count(Signal::Shake), 0);

        h.controller.set_motion(MotionPreference::Full);
        h.run_for(SHAKE_PERIOD + FRAME * 2);
        assert_eq!(h.count(Signal::Shake), 1);
    }

    #[test]
    fn test_switching_to_reduced_mid_shake_settles_lid() {
        let mut h = Harness::new(MotionPreference::Full);
        h.run_for(SHAKE_PERIOD + Duration::from_millis(100));
        assert!(!h.controller.lid().is_identity());

        let out = h.controller.set_motion(MotionPreference::Reduced);
        assert!(out.should_redraw);
        assert!(h.controller.lid().is_identity());
    }

    #[test]
    fn test_audio_failures_do_not_block_opening() {
        let mut controller =
            Controller::new(Box::new(BlockedCues), Box::new(StdRng::seed_from_u64(3)));
        let out = controller.activate();
        assert!(out.contains(Signal::Cue(Cue::Open)));

        for _ in 0..500 {
            controller.advance(FRAME);
        }
        assert_eq!(controller.phase(), Phase::Revealed);
        assert_eq!(controller.snapshot().particles.len(), 54);
    }

    #[test]
    fn test_custom_shake_period_is_clamped() {
        let mut h = Harness::new(MotionPreference::Full);
        h.controller.set_shake_period(Duration::from_millis(10));
        h.run_for(MIN_SHAKE_PERIOD + FRAME);
        assert_eq!(h.count(Signal::Shake), 1);
    }
}
