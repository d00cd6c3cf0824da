use confetti::curve::CubicBezier;
use std::time::Duration;

pub mod input;
pub mod layout;
pub mod model;
pub mod tween;
pub mod view;

pub use input::{Input, InputResponse, Key};
pub use layout::{BoxLayout, Point};
pub use model::{Controller, MotionPreference, Outcome, Phase, Signal, Snapshot, Transform};
pub use view::draw;

pub const SHAKE_PERIOD: Duration = Duration::from_millis(3000);
pub const MIN_SHAKE_PERIOD: Duration = Duration::from_millis(500);
pub const SHAKE_DURATION: Duration = Duration::from_millis(500);
pub const SHAKE_KEYFRAMES: [f64; 6] = [0.0, -2.0, 2.0, -2.0, 2.0, 0.0]; // degrees

// Lid pose at the end of the opening spring (px, degrees, factor)
pub const LID_OPEN: Transform = Transform::new(-120.0, -25.0, 1.1);
pub const LID_OPEN_REDUCED: Transform = Transform::new(-80.0, -15.0, 1.0);
pub const LID_STIFFNESS: f64 = 200.0;
pub const LID_DAMPING: f64 = 20.0;
pub const LID_MASS: f64 = 1.0;
pub const LID_MAX_DURATION: Duration = Duration::from_millis(800);

pub const BOUNCE_KEYFRAMES: [f64; 5] = [1.0, 1.05, 0.98, 1.02, 1.0]; // body scale
pub const BOUNCE_DURATION: Duration = Duration::from_millis(600);
pub const REDUCED_BOUNCE_FACTOR: f64 = 0.5;

pub const EASE_OUT: CubicBezier = CubicBezier::new(0.0, 0.0, 0.58, 1.0);
pub const EASE_IN_OUT: CubicBezier = CubicBezier::new(0.42, 0.0, 0.58, 1.0);

// Longest frame step fed to the animations (keeps a stalled clock from skipping stages)
pub const MAX_FRAME_STEP: Duration = Duration::from_millis(100);
