//! Pointer and orientation input, normalized to a bounded origin-centered signal.

use crate::constants::{
    ORIENTATION_MAX_TILT_DEG, ORIENTATION_RESTING_BETA_DEG, SIGNAL_HALF_RANGE,
};
use crate::error::InputError;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned screen rectangle in CSS pixels, as reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    /// A rect that has not been laid out yet (or reports garbage) cannot
    /// normalize anything: dividing by its size would produce NaN or inf.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
            || !self.width.is_finite()
            || !self.height.is_finite()
            || !self.left.is_finite()
            || !self.top.is_finite()
    }
}

/// Input direction/intensity, each axis in `[-0.5, 0.5]`.
///
/// Fields are private so the range invariant cannot be broken from outside;
/// `new` clamps and replaces non-finite components with zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NormalizedSignal {
    x: f32,
    y: f32,
}

impl NormalizedSignal {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp_axis(x),
            y: clamp_axis(y),
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[inline]
fn clamp_axis(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(-SIGNAL_HALF_RANGE, SIGNAL_HALF_RANGE)
    } else {
        0.0
    }
}

/// Raw `deviceorientation` payload in degrees. Either field may be absent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrientationSample {
    pub beta: Option<f32>,
    pub gamma: Option<f32>,
}

impl OrientationSample {
    pub fn new(beta: f32, gamma: f32) -> Self {
        Self {
            beta: Some(beta),
            gamma: Some(gamma),
        }
    }
}

/// Where the neutral pose sits and how far either side of it maps to the
/// signal extremes. There is no runtime calibration step; the resting beta
/// is a fixed assumption about how a phone is held.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrientationCalibration {
    pub resting_beta: f32,
    pub max_tilt: f32,
}

impl Default for OrientationCalibration {
    fn default() -> Self {
        Self {
            resting_beta: ORIENTATION_RESTING_BETA_DEG,
            max_tilt: ORIENTATION_MAX_TILT_DEG,
        }
    }
}

/// Map a pointer position inside `bounds` to the normalized signal.
pub fn normalize_pointer(pointer: Vec2, bounds: Rect) -> Result<NormalizedSignal, InputError> {
    if bounds.is_degenerate() {
        return Err(InputError::DegenerateBounds {
            width: bounds.width,
            height: bounds.height,
        });
    }
    let nx = (pointer.x - bounds.left) / bounds.width - SIGNAL_HALF_RANGE;
    let ny = (pointer.y - bounds.top) / bounds.height - SIGNAL_HALF_RANGE;
    Ok(NormalizedSignal::new(nx, ny))
}

/// Map an orientation sample to the normalized signal.
///
/// gamma (left/right roll) drives x, beta (front/back pitch) drives y around
/// the calibrated resting angle.
pub fn normalize_orientation(
    sample: OrientationSample,
    calibration: OrientationCalibration,
) -> Result<NormalizedSignal, InputError> {
    let (beta, gamma) = match (sample.beta, sample.gamma) {
        (Some(b), Some(g)) if b.is_finite() && g.is_finite() => (b, g),
        _ => return Err(InputError::IncompleteSample),
    };
    let max_tilt = calibration.max_tilt;
    let rest = calibration.resting_beta;
    let gamma = gamma.clamp(-max_tilt, max_tilt);
    let beta = beta.clamp(rest - max_tilt, rest + max_tilt);
    let span = max_tilt * 2.0;
    Ok(NormalizedSignal::new(gamma / span, (beta - rest) / span))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputSource {
    #[default]
    None,
    Pointer,
    Orientation,
}

/// Single-writer cell holding the latest normalized signal for one scene.
///
/// Every event overwrites the previous value regardless of source; nothing is
/// queued or averaged. The animation tick is the only reader.
#[derive(Clone, Debug, Default)]
pub struct InputNormalizer {
    signal: NormalizedSignal,
    source: InputSource,
    calibration: OrientationCalibration,
}

impl InputNormalizer {
    pub fn new(calibration: OrientationCalibration) -> Self {
        Self {
            signal: NormalizedSignal::ZERO,
            source: InputSource::None,
            calibration,
        }
    }

    #[inline]
    pub fn signal(&self) -> NormalizedSignal {
        self.signal
    }

    #[inline]
    pub fn source(&self) -> InputSource {
        self.source
    }

    pub fn calibration(&self) -> OrientationCalibration {
        self.calibration
    }

    /// Degenerate bounds count as "no input" rather than propagating NaN.
    pub fn pointer_move(&mut self, pointer: Vec2, bounds: Rect) -> NormalizedSignal {
        match normalize_pointer(pointer, bounds) {
            Ok(signal) => {
                self.signal = signal;
                self.source = InputSource::Pointer;
            }
            Err(err) => {
                log::debug!("[input] {err}; treating pointer as no input");
                self.reset();
            }
        }
        self.signal
    }

    pub fn pointer_leave(&mut self) {
        self.reset();
    }

    /// Incomplete samples are dropped and the previous signal is kept.
    pub fn orientation(&mut self, sample: OrientationSample) -> Result<NormalizedSignal, InputError> {
        let signal = normalize_orientation(sample, self.calibration)?;
        self.signal = signal;
        self.source = InputSource::Orientation;
        Ok(signal)
    }

    pub fn sensor_unavailable(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.signal = NormalizedSignal::ZERO;
        self.source = InputSource::None;
    }
}
