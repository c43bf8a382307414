//! Linear range mapping from the smoothed signal to per-layer transforms.

use crate::constants::SIGNAL_HALF_RANGE;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Map `value` from `input` onto `output`, extrapolating outside `input`.
///
/// Written as a two-term lerp so both endpoints land exactly on `output`.
/// An empty input range maps everything to the start of `output`.
#[inline]
pub fn map(value: f32, input: [f32; 2], output: [f32; 2]) -> f32 {
    let [a, b] = input;
    let [c, d] = output;
    let span = b - a;
    if span == 0.0 || !span.is_finite() {
        return c;
    }
    let t = (value - a) / span;
    c * (1.0 - t) + d * t
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRange {
    pub input: [f32; 2],
    pub output: [f32; 2],
}

impl MappingRange {
    pub const fn new(input: [f32; 2], output: [f32; 2]) -> Self {
        Self { input, output }
    }

    /// Full signal range onto `[-half, half]`.
    pub const fn symmetric(half: f32) -> Self {
        Self::new([-SIGNAL_HALF_RANGE, SIGNAL_HALF_RANGE], [-half, half])
    }

    #[inline]
    pub fn map(&self, value: f32) -> f32 {
        map(value, self.input, self.output)
    }

    pub fn output_span(&self) -> f32 {
        (self.output[1] - self.output[0]).abs()
    }

    pub fn is_degenerate(&self) -> bool {
        let span = self.input[1] - self.input[0];
        span == 0.0
            || !span.is_finite()
            || !self.output[0].is_finite()
            || !self.output[1].is_finite()
    }
}

/// One parallax layer. Tilt layers output rotation in degrees, translate
/// layers output pixel offsets.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum LayerConfig {
    Tilt { x: MappingRange, y: MappingRange },
    Translate { x: MappingRange, y: MappingRange },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayerTransform {
    /// Degrees about the screen X and Y axes.
    Tilt { rotate_x: f32, rotate_y: f32 },
    Translate(Vec2),
}

impl LayerConfig {
    pub const fn tilt(max_deg: f32) -> Self {
        LayerConfig::Tilt {
            x: MappingRange::symmetric(max_deg),
            y: MappingRange::symmetric(max_deg),
        }
    }

    pub const fn translate(x_px: f32, y_px: f32) -> Self {
        LayerConfig::Translate {
            x: MappingRange::symmetric(x_px),
            y: MappingRange::symmetric(y_px),
        }
    }

    pub fn ranges(&self) -> (&MappingRange, &MappingRange) {
        match self {
            LayerConfig::Tilt { x, y } | LayerConfig::Translate { x, y } => (x, y),
        }
    }

    /// Pointer right turns the surface about Y (positive); pointer down tips
    /// the bottom edge toward the viewer, so the Y signal is negated for X.
    pub fn apply(&self, smoothed: Vec2) -> LayerTransform {
        match self {
            LayerConfig::Tilt { x, y } => LayerTransform::Tilt {
                rotate_x: -y.map(smoothed.y),
                rotate_y: x.map(smoothed.x),
            },
            LayerConfig::Translate { x, y } => {
                LayerTransform::Translate(Vec2::new(x.map(smoothed.x), y.map(smoothed.y)))
            }
        }
    }
}

impl LayerTransform {
    pub fn is_finite(&self) -> bool {
        match self {
            LayerTransform::Tilt { rotate_x, rotate_y } => {
                rotate_x.is_finite() && rotate_y.is_finite()
            }
            LayerTransform::Translate(v) => v.is_finite(),
        }
    }
}
