//! Easing curves and looping keyframe tracks for ambient animation.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    /// CSS `ease-in-out`, i.e. `cubic-bezier(0.42, 0, 0.58, 1)`.
    #[default]
    EaseInOut,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Apply to progress in `[0, 1]`. Endpoints map to themselves.
    pub fn apply(&self, t: f32) -> f32 {
        match *self {
            Easing::Linear => t.clamp(0.0, 1.0),
            Easing::EaseInOut => cubic_bezier(t, 0.42, 0.0, 0.58, 1.0),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, x1, y1, x2, y2),
        }
    }
}

/// Solve the bezier's x(p) = t with Newton steps, fall back to bisection when
/// the slope flattens, then evaluate y(p).
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let x = t as f64;
    let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);

    let mut p = x;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2) as f32;
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    p = x;
    for _ in 0..24 {
        let v = bezier_sample(p, x1, x2);
        if (v - x).abs() < 1e-7 {
            break;
        }
        if v < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }
    bezier_sample(p, y1, y2) as f32
}

#[inline]
fn bezier_sample(p: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * p + b) * p + c) * p
}

#[inline]
fn bezier_slope(p: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * p + 2.0 * b) * p + c
}

/// Evenly spaced keyframes repeated forever.
///
/// Each segment between neighbouring values is eased independently, so
/// `[0, 1, 0]` with `EaseInOut` fades in and out smoothly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyframeLoop {
    pub values: Vec<f32>,
    pub period: f32,
    #[serde(default)]
    pub easing: Easing,
}

impl KeyframeLoop {
    pub fn new(values: impl Into<Vec<f32>>, period: f32, easing: Easing) -> Self {
        Self {
            values: values.into(),
            period,
            easing,
        }
    }

    /// Position within the current cycle, in `[0, 1)`. `phase` is a fraction
    /// of a cycle.
    pub fn progress(&self, elapsed: f64, phase: f32) -> f32 {
        cycle_progress(elapsed, self.period, phase)
    }

    pub fn sample_at(&self, progress: f32) -> f32 {
        sample_keyframes(&self.values, progress, self.easing)
    }

    pub fn sample(&self, elapsed: f64, phase: f32) -> f32 {
        self.sample_at(self.progress(elapsed, phase))
    }
}

/// Interpolate evenly spaced `values` at `progress` in `[0, 1]`.
pub fn sample_keyframes(values: &[f32], progress: f32, easing: Easing) -> f32 {
    match values.len() {
        0 => 0.0,
        1 => values[0],
        n => {
            let segments = (n - 1) as f32;
            let pos = progress.clamp(0.0, 1.0) * segments;
            let i = (pos.floor() as usize).min(n - 2);
            let eased = easing.apply(pos - i as f32);
            let (from, to) = (values[i], values[i + 1]);
            from * (1.0 - eased) + to * eased
        }
    }
}

/// Fraction of the way through a repeating cycle of length `period` seconds.
pub fn cycle_progress(elapsed: f64, period: f32, phase: f32) -> f32 {
    if !(period > 0.0) || !elapsed.is_finite() {
        return 0.0;
    }
    let cycles = elapsed / period as f64 + phase as f64;
    let frac = cycles.rem_euclid(1.0) as f32;
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if frac >= 1.0 {
        0.0
    } else {
        frac
    }
}
