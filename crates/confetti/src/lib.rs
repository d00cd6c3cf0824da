pub mod burst;
pub mod curve;
pub mod particle;

pub use burst::{BrandError, BrandToken, BurstCounts, BurstGenerator, generate};
pub use particle::{ColorToken, Particle, ParticleKind, ParticlePose};
