//! Ambient particles: drifting fireflies and orbiting bodies.
//!
//! Particle state is fixed at creation; everything visible is a pure function
//! of elapsed time plus the scene's parallax offset, so a frame can be
//! recomputed from any point in time without replaying history.

use crate::constants::{FIREFLY_OPACITY_KEYFRAMES, FIREFLY_WEIGHT_BANDS, MAX_PARTICLE_COUNT};
use crate::easing::{cycle_progress, sample_keyframes, Easing};
use crate::error::ConfigError;
use crate::mapper::MappingRange;
use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrbitRing {
    pub radius: f32,
    pub period: f32,
    /// Diameter hint for the composer; the engine does not use it.
    #[serde(default)]
    pub body_size: f32,
    pub parallax_weight: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "style")]
pub enum ParticleConfig {
    /// Randomly placed points that drift between two random spots while
    /// fading in and out. Positions are relative to the scene center.
    #[serde(rename_all = "camelCase")]
    Fireflies {
        count: usize,
        period_range: [f32; 2],
        spawn_half_extent: f32,
    },
    /// Fixed rings around the scene center, one body per ring.
    #[serde(rename_all = "camelCase")]
    Orbits { rings: Vec<OrbitRing> },
}

impl ParticleConfig {
    pub fn count(&self) -> usize {
        match self {
            ParticleConfig::Fireflies { count, .. } => *count,
            ParticleConfig::Orbits { rings } => rings.len(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count() > MAX_PARTICLE_COUNT {
            return Err(ConfigError::InvalidParticles("too many particles"));
        }
        match self {
            ParticleConfig::Fireflies {
                period_range,
                spawn_half_extent,
                ..
            } => {
                let [lo, hi] = *period_range;
                if !(lo > 0.0 && lo <= hi && hi.is_finite()) {
                    return Err(ConfigError::InvalidParticles(
                        "period range must be positive and ordered",
                    ));
                }
                if !(*spawn_half_extent >= 0.0 && spawn_half_extent.is_finite()) {
                    return Err(ConfigError::InvalidParticles(
                        "spawn extent must be non-negative",
                    ));
                }
            }
            ParticleConfig::Orbits { rings } => {
                for ring in rings {
                    if !(ring.period > 0.0 && ring.period.is_finite()) {
                        return Err(ConfigError::InvalidParticles("orbit period must be positive"));
                    }
                    if !(ring.radius >= 0.0 && ring.radius.is_finite()) {
                        return Err(ConfigError::InvalidParticles(
                            "orbit radius must be non-negative",
                        ));
                    }
                    if !ring.parallax_weight.is_finite() {
                        return Err(ConfigError::InvalidParticles("orbit weight must be finite"));
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParticleMotion {
    /// Ease from the base position to `to`, then restart from the base.
    Drift { to: Vec2 },
    Orbit { radius: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleState {
    pub base_position: Vec2,
    /// Starting offset into the cycle, as a fraction of `period`.
    pub phase: f32,
    pub period: f32,
    pub parallax_weight: f32,
    pub motion: ParticleMotion,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParticleFrame {
    pub position: Vec2,
    pub opacity: f32,
}

impl ParticleState {
    /// Orbit angle in degrees at `elapsed`, wrapped to `[0, 360)`.
    pub fn angle_deg(&self, elapsed: f64) -> f32 {
        360.0 * cycle_progress(elapsed, self.period, self.phase)
    }

    /// Position and opacity at `elapsed` seconds. `parallax` is the scene's
    /// mapped offset before this particle's weight is applied.
    pub fn sample(&self, elapsed: f64, parallax: Vec2) -> ParticleFrame {
        let progress = cycle_progress(elapsed, self.period, self.phase);
        let (local, opacity) = match self.motion {
            ParticleMotion::Drift { to } => {
                let eased = Easing::EaseInOut.apply(progress);
                let pos = self.base_position.lerp(to, eased);
                let opacity =
                    sample_keyframes(&FIREFLY_OPACITY_KEYFRAMES, progress, Easing::EaseInOut);
                (pos, opacity)
            }
            ParticleMotion::Orbit { radius } => {
                // angle 0 is the top of the ring; positive angles run clockwise
                // in screen space (y down)
                let angle = TAU * progress;
                let pos = self.base_position + Vec2::new(radius * angle.sin(), -radius * angle.cos());
                (pos, 1.0)
            }
        };
        ParticleFrame {
            position: local + parallax * self.parallax_weight,
            opacity,
        }
    }
}

/// The particle set of one scene plus the parallax range shared by all of it.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleField {
    particles: Vec<ParticleState>,
    parallax: MappingRange,
}

impl ParticleField {
    pub fn generate<R: Rng + ?Sized>(
        config: &ParticleConfig,
        parallax: MappingRange,
        rng: &mut R,
    ) -> Self {
        let particles = match config {
            ParticleConfig::Fireflies {
                count,
                period_range,
                spawn_half_extent,
            } => {
                let h = *spawn_half_extent;
                let [lo, hi] = *period_range;
                (0..*count)
                    .map(|i| {
                        let base = Vec2::new(rng.gen_range(-h..=h), rng.gen_range(-h..=h));
                        let to = Vec2::new(rng.gen_range(-h..=h), rng.gen_range(-h..=h));
                        ParticleState {
                            base_position: base,
                            phase: rng.gen::<f32>(),
                            period: rng.gen_range(lo..=hi),
                            parallax_weight: (i % FIREFLY_WEIGHT_BANDS + 1) as f32,
                            motion: ParticleMotion::Drift { to },
                        }
                    })
                    .collect()
            }
            ParticleConfig::Orbits { rings } => rings
                .iter()
                .map(|ring| ParticleState {
                    base_position: Vec2::ZERO,
                    phase: 0.0,
                    period: ring.period,
                    parallax_weight: ring.parallax_weight,
                    motion: ParticleMotion::Orbit {
                        radius: ring.radius,
                    },
                })
                .collect(),
        };
        Self {
            particles,
            parallax,
        }
    }

    pub fn particles(&self) -> &[ParticleState] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn parallax_offset(&self, smoothed: Vec2) -> Vec2 {
        Vec2::new(self.parallax.map(smoothed.x), self.parallax.map(smoothed.y))
    }

    pub fn sample_into(&self, elapsed: f64, smoothed: Vec2, out: &mut Vec<ParticleFrame>) {
        let parallax = self.parallax_offset(smoothed);
        out.clear();
        out.extend(self.particles.iter().map(|p| p.sample(elapsed, parallax)));
    }
}
