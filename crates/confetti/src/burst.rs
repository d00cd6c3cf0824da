use crate::particle::{ColorToken, Particle, ParticleKind};
use derive_more::{AsRef, Deref, Display};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::str::FromStr;
use thiserror::Error;

pub const BASE_COUNT: usize = 60;
pub const REDUCED_BASE_COUNT: usize = 20;
pub const REDUCED_GLYPH_COUNT: usize = 5;
pub const BRAND_MARK_COUNT: usize = 8;
pub const REDUCED_BRAND_MARK_COUNT: usize = 3;
pub const DEFAULT_BRAND: &str = "HULUGRAM";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BrandError {
    #[error("Brand token must contain at least one glyph")]
    Empty,
}

/// The word spelled out by the glyph particles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, AsRef)]
#[serde(try_from = "String", into = "String")]
pub struct BrandToken(String);

impl BrandToken {
    pub fn new(s: impl Into<String>) -> Result<Self, BrandError> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(BrandError::Empty);
        }
        Ok(Self(s))
    }

    pub fn glyphs(&self) -> impl Iterator<Item = char> + Clone + '_ {
        self.0.chars().filter(|c| !c.is_whitespace())
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs().count()
    }
}

impl Default for BrandToken {
    fn default() -> Self {
        Self(DEFAULT_BRAND.to_string())
    }
}

impl TryFrom<String> for BrandToken {
    type Error = BrandError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BrandToken> for String {
    fn from(token: BrandToken) -> Self {
        token.0
    }
}

impl FromStr for BrandToken {
    type Err = BrandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Randomization bounds shared by every particle of one group.
struct Spread {
    delay: Range<f32>,
    duration: Range<f32>,
    scale: Range<f32>,
}

const SPECK_SPREAD: Spread = Spread {
    delay: 0.0..0.3,
    duration: 2.0..3.5,
    scale: 0.5..1.0,
};

const GLYPH_SPREAD: Spread = Spread {
    delay: 0.0..0.5,
    duration: 2.5..3.5,
    scale: 0.8..1.2,
};

const BRAND_MARK_SPREAD: Spread = Spread {
    delay: 0.0..0.4,
    duration: 2.5..3.5,
    scale: 0.3..0.6,
};

impl Spread {
    fn particle<R: Rng + ?Sized>(&self, id: u32, kind: ParticleKind, rng: &mut R) -> Particle {
        Particle {
            id,
            origin_x: rng.gen_range(0.0..100.0),
            kind,
            start_delay: rng.gen_range(self.delay.clone()),
            fall_duration: rng.gen_range(self.duration.clone()),
            initial_rotation: rng.gen_range(0.0..360.0),
            scale: rng.gen_range(self.scale.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurstCounts {
    pub specks: usize,
    pub glyphs: usize,
    pub brand_marks: usize,
}

impl BurstCounts {
    pub fn total(&self) -> usize {
        self.specks + self.glyphs + self.brand_marks
    }
}

#[derive(Debug, Clone, Default)]
pub struct BurstGenerator {
    brand: BrandToken,
}

impl BurstGenerator {
    pub fn new(brand: BrandToken) -> Self {
        Self { brand }
    }

    pub fn brand(&self) -> &BrandToken {
        &self.brand
    }

    pub fn counts(&self, reduced_motion: bool) -> BurstCounts {
        let base = if reduced_motion {
            REDUCED_BASE_COUNT
        } else {
            BASE_COUNT
        };

        BurstCounts {
            specks: base / 2,
            glyphs: if reduced_motion {
                REDUCED_GLYPH_COUNT
            } else {
                self.brand.glyph_count() * 2
            },
            brand_marks: if reduced_motion {
                REDUCED_BRAND_MARK_COUNT
            } else {
                BRAND_MARK_COUNT
            },
        }
    }

    /// Produces a fresh burst: specks, then glyphs, then brand marks. Ids are
    /// positions in the returned sequence, so they never collide across groups.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        active: bool,
        reduced_motion: bool,
        rng: &mut R,
    ) -> Vec<Particle> {
        if !active {
            return Vec::new();
        }

        let counts = self.counts(reduced_motion);
        let mut particles = Vec::with_capacity(counts.total());

        for _ in 0..counts.specks {
            let kind = ParticleKind::Speck {
                color: ColorToken::pick(rng),
            };
            let id = particles.len() as u32;
            particles.push(SPECK_SPREAD.particle(id, kind, rng));
        }

        for letter in self.brand.glyphs().cycle().take(counts.glyphs) {
            let kind = ParticleKind::Glyph {
                letter,
                color: ColorToken::pick(rng),
            };
            let id = particles.len() as u32;
            particles.push(GLYPH_SPREAD.particle(id, kind, rng));
        }

        for _ in 0..counts.brand_marks {
            let id = particles.len() as u32;
            particles.push(BRAND_MARK_SPREAD.particle(id, ParticleKind::BrandMark, rng));
        }

        log::debug!(
            "generated burst of {} particles (reduced motion: {})",
            particles.len(),
            reduced_motion
        );
        particles
    }
}

/// Generates a burst with the default brand token.
pub fn generate<R: Rng + ?Sized>(active: bool, reduced_motion: bool, rng: &mut R) -> Vec<Particle> {
    BurstGenerator::default().generate(active, reduced_motion, rng)
}
