//! Per-scene configuration and the two built-in presets.

use crate::constants::*;
use crate::easing::{Easing, KeyframeLoop};
use crate::error::ConfigError;
use crate::mapper::{LayerConfig, MappingRange};
use crate::particles::{OrbitRing, ParticleConfig};
use crate::signal::OrientationCalibration;
use crate::spring::SpringConfig;
use serde::{Deserialize, Serialize};

/// A looping scale and/or opacity animation on one decorative element
/// (the sun, a moon glow). Independent of input.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PulseConfig {
    #[serde(default)]
    pub scale: Option<KeyframeLoop>,
    #[serde(default)]
    pub opacity: Option<KeyframeLoop>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneConfig {
    pub spring: SpringConfig,
    /// Parallax layers, back to front. Each maps the smoothed signal through
    /// its own x/y ranges.
    pub layers: Vec<LayerConfig>,
    pub particles: ParticleConfig,
    /// Base offset range for particles, multiplied by each particle's weight.
    pub particle_parallax: MappingRange,
    #[serde(default)]
    pub orientation: OrientationCalibration,
    #[serde(default)]
    pub pulses: Vec<PulseConfig>,
}

impl SceneConfig {
    /// Tilting disc with a pulsing sun and three orbiting bodies.
    pub fn solar_system() -> Self {
        let rings = (0..ORBIT_RADII_PX.len())
            .map(|i| OrbitRing {
                radius: ORBIT_RADII_PX[i],
                period: ORBIT_PERIODS_SEC[i],
                body_size: ORBIT_BODY_SIZES_PX[i],
                parallax_weight: ORBIT_PARALLAX_WEIGHTS[i],
            })
            .collect();
        Self {
            spring: SpringConfig::SCENE_TILT,
            layers: vec![LayerConfig::tilt(TILT_MAX_DEG)],
            particles: ParticleConfig::Orbits { rings },
            particle_parallax: MappingRange::symmetric(ORBIT_PARALLAX_PX),
            orientation: OrientationCalibration::default(),
            pulses: vec![PulseConfig {
                scale: Some(KeyframeLoop::new(
                    SUN_PULSE_SCALE,
                    SUN_PULSE_PERIOD_SEC,
                    Easing::EaseInOut,
                )),
                opacity: None,
            }],
        }
    }

    /// Three mountain layers sliding at different rates, fireflies and a
    /// breathing moon glow.
    pub fn landscape() -> Self {
        let layers = LANDSCAPE_LAYER_X_PX
            .iter()
            .zip(LANDSCAPE_LAYER_Y_PX.iter())
            .map(|(&x, &y)| LayerConfig::translate(x, y))
            .collect();
        Self {
            spring: SpringConfig::LANDSCAPE,
            layers,
            particles: ParticleConfig::Fireflies {
                count: FIREFLY_COUNT,
                period_range: [FIREFLY_PERIOD_MIN_SEC, FIREFLY_PERIOD_MAX_SEC],
                spawn_half_extent: FIREFLY_SPAWN_HALF_EXTENT_PX,
            },
            particle_parallax: MappingRange::symmetric(FIREFLY_PARALLAX_PX),
            orientation: OrientationCalibration {
                resting_beta: LANDSCAPE_RESTING_BETA_DEG,
                max_tilt: ORIENTATION_MAX_TILT_DEG,
            },
            pulses: vec![PulseConfig {
                scale: Some(KeyframeLoop::new(
                    GLOW_PULSE_SCALE,
                    GLOW_PULSE_PERIOD_SEC,
                    Easing::EaseInOut,
                )),
                opacity: Some(KeyframeLoop::new(
                    GLOW_PULSE_OPACITY,
                    GLOW_PULSE_PERIOD_SEC,
                    Easing::EaseInOut,
                )),
            }],
        }
    }

    pub fn preset(name: &str) -> Result<Self, ConfigError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "solar" | "solar-system" | "solar_system" => Ok(Self::solar_system()),
            "landscape" | "nature" => Ok(Self::landscape()),
            _ => Err(ConfigError::UnknownPreset(name.to_string())),
        }
    }

    /// Parse and validate a JSON scene description.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.spring.validate()?;
        for (i, layer) in self.layers.iter().enumerate() {
            let (x, y) = layer.ranges();
            if x.is_degenerate() {
                return Err(ConfigError::InvalidRange(format!("layer {i} x")));
            }
            if y.is_degenerate() {
                return Err(ConfigError::InvalidRange(format!("layer {i} y")));
            }
        }
        if self.particle_parallax.is_degenerate() {
            return Err(ConfigError::InvalidRange("particle parallax".to_string()));
        }
        self.particles.validate()?;
        if !(self.orientation.max_tilt > 0.0 && self.orientation.max_tilt.is_finite())
            || !self.orientation.resting_beta.is_finite()
        {
            return Err(ConfigError::InvalidCalibration);
        }
        for pulse in &self.pulses {
            for track in [&pulse.scale, &pulse.opacity].into_iter().flatten() {
                if !(track.period > 0.0 && track.period.is_finite()) {
                    return Err(ConfigError::InvalidParticles("pulse period must be positive"));
                }
            }
        }
        Ok(())
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::solar_system()
    }
}
