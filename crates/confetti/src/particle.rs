use crate::curve::CubicBezier;
use rand::Rng;
use serde::Serialize;
use strum::Display;

/// Vertical spawn position, in percent of viewport height (above the top edge).
pub const ORIGIN_Y: f32 = -10.0;
/// Vertical rest position, in percent of viewport height.
pub const REST_Y: f32 = 95.0;
/// Extra rotation accumulated over a full fall, in degrees.
pub const FALL_SPIN: f32 = 720.0;

pub const FALL_EASE: CubicBezier = CubicBezier::new(0.34, 1.56, 0.64, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    Pink,
    Yellow,
    Blue,
    Green,
}

impl ColorToken {
    pub const PALETTE: [ColorToken; 4] = [Self::Pink, Self::Yellow, Self::Blue, Self::Green];

    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::PALETTE[rng.gen_range(0..Self::PALETTE.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParticleKind {
    Speck { color: ColorToken },
    Glyph { letter: char, color: ColorToken },
    /// Drawn with the brand image; carries no color.
    BrandMark,
}

/// One piece of confetti. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Particle {
    pub id: u32,
    /// Horizontal spawn position, percent of viewport width.
    pub origin_x: f32,
    pub kind: ParticleKind,
    /// Seconds.
    pub start_delay: f32,
    /// Seconds.
    pub fall_duration: f32,
    /// Degrees.
    pub initial_rotation: f32,
    pub scale: f32,
}

/// Where a particle sits at a given moment, in viewport percent and degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticlePose {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub scale: f32,
}

impl Particle {
    pub fn color(&self) -> Option<ColorToken> {
        match self.kind {
            ParticleKind::Speck { color } | ParticleKind::Glyph { color, .. } => Some(color),
            ParticleKind::BrandMark => None,
        }
    }

    pub fn content(&self) -> Option<char> {
        match self.kind {
            ParticleKind::Glyph { letter, .. } => Some(letter),
            _ => None,
        }
    }

    /// Pose `elapsed` seconds after the burst was revealed. `None` while the
    /// particle is still waiting out its start delay.
    pub fn pose_at(&self, elapsed: f32) -> Option<ParticlePose> {
        let local = elapsed - self.start_delay;
        if local < 0.0 {
            return None;
        }

        let t = if self.fall_duration > 0.0 {
            (local / self.fall_duration).min(1.0)
        } else {
            1.0
        };
        let eased = FALL_EASE.solve(t);

        Some(ParticlePose {
            x: self.origin_x,
            y: ORIGIN_Y + (REST_Y - ORIGIN_Y) * eased,
            rotation: self.initial_rotation + FALL_SPIN * eased,
            scale: self.scale,
        })
    }

    pub fn has_landed(&self, elapsed: f32) -> bool {
        elapsed >= self.start_delay + self.fall_duration
    }
}
