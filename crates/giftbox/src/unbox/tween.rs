use confetti::curve::CubicBezier;
use std::time::Duration;

/// Piecewise-linear keyframe track, evenly spaced in time, with one easing
/// curve applied across the whole track.
#[derive(Debug, Clone)]
pub struct Keyframes {
    values: Vec<f64>,
    duration: Duration,
    ease: CubicBezier,
    elapsed: Duration,
}

impl Keyframes {
    pub fn new(values: impl Into<Vec<f64>>, duration: Duration, ease: CubicBezier) -> Self {
        Self {
            values: values.into(),
            duration,
            ease,
            elapsed: Duration::ZERO,
        }
    }

    /// Rescales every keyframe's distance from `rest` by `factor`.
    pub fn scaled_around(mut self, rest: f64, factor: f64) -> Self {
        self.values
            .iter_mut()
            .for_each(|v| *v = rest + (*v - rest) * factor);
        self
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn value(&self) -> f64 {
        match self.values.as_slice() {
            [] => 0.0,
            [only] => *only,
            values => {
                let t = if self.duration.is_zero() {
                    1.0
                } else {
                    self.elapsed.as_secs_f64() / self.duration.as_secs_f64()
                };
                let eased = self.ease.solve(t as f32) as f64;
                let segments = (values.len() - 1) as f64;
                let pos = (eased * segments).clamp(0.0, segments);
                let i = (pos.floor() as usize).min(values.len() - 2);
                let frac = pos - i as f64;
                values[i] + (values[i + 1] - values[i]) * frac
            }
        }
    }
}

/// Damped spring driving a progress value from 0 toward 1.
#[derive(Debug, Clone)]
pub struct Spring {
    stiffness: f64,
    damping: f64,
    mass: f64,
    position: f64,
    velocity: f64,
    elapsed: Duration,
    max_duration: Duration,
    settled: bool,
}

const SPRING_STEP: f64 = 0.001;
const REST_DISTANCE: f64 = 0.001;
const REST_SPEED: f64 = 0.01;

impl Spring {
    pub fn new(stiffness: f64, damping: f64, mass: f64, max_duration: Duration) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            position: 0.0,
            velocity: 0.0,
            elapsed: Duration::ZERO,
            max_duration,
            settled: false,
        }
    }

    pub fn advance(&mut self, dt: Duration) {
        if self.settled {
            return;
        }
        self.elapsed += dt;

        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let h = remaining.min(SPRING_STEP);
            let accel =
                (-self.stiffness * (self.position - 1.0) - self.damping * self.velocity) / self.mass;
            self.velocity += accel * h;
            self.position += self.velocity * h;
            remaining -= h;
        }

        let at_rest =
            (1.0 - self.position).abs() < REST_DISTANCE && self.velocity.abs() < REST_SPEED;
        if at_rest || self.elapsed >= self.max_duration {
            self.position = 1.0;
            self.velocity = 0.0;
            self.settled = true;
        }
    }

    pub fn progress(&self) -> f64 {
        self.position
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }
}
