//! Damped-spring smoothing and the table of springs owned by the engine.

use crate::constants::{
    LANDSCAPE_DAMPING, LANDSCAPE_MASS, LANDSCAPE_STIFFNESS, MAGNETIC_DAMPING, MAGNETIC_MASS,
    MAGNETIC_STIFFNESS, MAX_FRAME_DT_SEC, TILT_DAMPING, TILT_MASS, TILT_STIFFNESS,
};
use crate::engine::{AttractorId, SceneId};
use crate::error::ConfigError;
use fnv::FnvHashMap;
use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    /// Scene tilt: settles in a few hundred milliseconds with a little overshoot.
    pub const SCENE_TILT: Self = Self {
        stiffness: TILT_STIFFNESS,
        damping: TILT_DAMPING,
        mass: TILT_MASS,
    };
    pub const LANDSCAPE: Self = Self {
        stiffness: LANDSCAPE_STIFFNESS,
        damping: LANDSCAPE_DAMPING,
        mass: LANDSCAPE_MASS,
    };
    /// Light mass: the control follows the pointer almost immediately.
    pub const MAGNETIC: Self = Self {
        stiffness: MAGNETIC_STIFFNESS,
        damping: MAGNETIC_DAMPING,
        mass: MAGNETIC_MASS,
    };

    /// Undamped angular frequency, rad/s.
    pub fn natural_frequency(&self) -> f32 {
        (self.stiffness / self.mass).sqrt()
    }

    /// 1.0 is critical damping; below oscillates, above creeps.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Time for the slowest mode to decay to ~2% of its initial amplitude.
    pub fn settle_time(&self) -> f32 {
        let omega = self.natural_frequency();
        let zeta = self.damping_ratio();
        let decay = omega * (zeta - (zeta * zeta - 1.0).max(0.0).sqrt());
        4.0 / decay
    }

    /// Upper bound on speed for a spring released from rest `span` away from
    /// its target. Damping only removes energy, so `omega * span` holds.
    pub fn peak_speed(&self, span: f32) -> f32 {
        self.natural_frequency() * span.abs()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.stiffness > 0.0 && self.stiffness.is_finite()) {
            return Err(ConfigError::InvalidSpring("stiffness must be positive"));
        }
        if !(self.mass > 0.0 && self.mass.is_finite()) {
            return Err(ConfigError::InvalidSpring("mass must be positive"));
        }
        // an undamped spring oscillates forever and never settles
        if !(self.damping > 0.0 && self.damping.is_finite()) {
            return Err(ConfigError::InvalidSpring("damping must be positive"));
        }
        Ok(())
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::SCENE_TILT
    }
}

/// One axis of spring-smoothed motion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    value: f32,
    velocity: f32,
    target: f32,
    config: SpringConfig,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            value: initial,
            velocity: 0.0,
            target: initial,
            config,
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// Non-finite targets are ignored so a bad sample cannot poison the state.
    pub fn set_target(&mut self, target: f32) {
        if target.is_finite() {
            self.target = target;
        } else {
            log::trace!("[spring] ignoring non-finite target {target}");
        }
    }

    /// Advance by `dt` seconds.
    ///
    /// Uses the closed-form solution of the damped oscillator for a target
    /// held constant over the step, so any valid tuning is stable at any
    /// frame rate and energy never grows. Long deltas are truncated to
    /// `MAX_FRAME_DT_SEC`.
    pub fn step(&mut self, dt: f32) {
        if !(dt > 0.0) {
            return;
        }
        let t = dt.min(MAX_FRAME_DT_SEC) as f64;
        let k = self.config.stiffness as f64;
        let c = self.config.damping as f64;
        let m = self.config.mass as f64;
        let omega = (k / m).sqrt();
        let zeta = c / (2.0 * (k * m).sqrt());
        let x0 = (self.value - self.target) as f64;
        let v0 = self.velocity as f64;

        let (x, v) = if (zeta - 1.0).abs() < 1e-6 {
            let decay = (-omega * t).exp();
            let b = v0 + omega * x0;
            (decay * (x0 + b * t), decay * (v0 - omega * b * t))
        } else if zeta < 1.0 {
            let a = zeta * omega;
            let wd = omega * (1.0 - zeta * zeta).sqrt();
            let decay = (-a * t).exp();
            let b = (v0 + a * x0) / wd;
            let (sin, cos) = (wd * t).sin_cos();
            (
                decay * (x0 * cos + b * sin),
                decay * (v0 * cos - (a * b + x0 * wd) * sin),
            )
        } else {
            let s = (zeta * zeta - 1.0).sqrt();
            // slow root written without cancellation for large zeta
            let r1 = -omega / (zeta + s);
            let r2 = -omega * (zeta + s);
            let c1 = (v0 - r2 * x0) / (r1 - r2);
            let c2 = x0 - c1;
            let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
            (c1 * e1 + c2 * e2, r1 * c1 * e1 + r2 * c2 * e2)
        };

        if x.is_finite() && v.is_finite() {
            self.value = self.target + x as f32;
            self.velocity = v as f32;
        } else {
            log::trace!("[spring] non-finite step result; snapping to target");
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    pub fn is_at_rest(&self, epsilon: f32) -> bool {
        (self.target - self.value).abs() < epsilon && self.velocity.abs() < epsilon
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpringOwner {
    Scene(SceneId),
    Attractor(AttractorId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpringKey {
    pub owner: SpringOwner,
    pub axis: Axis,
}

impl SpringKey {
    pub fn new(owner: SpringOwner, axis: Axis) -> Self {
        Self { owner, axis }
    }
}

/// All live springs, keyed by owner and axis.
///
/// Owners always hold an x/y pair; removing an owner drops both.
#[derive(Clone, Debug, Default)]
pub struct SpringTable {
    springs: FnvHashMap<SpringKey, Spring>,
}

impl SpringTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_pair(&mut self, owner: SpringOwner, config: SpringConfig) {
        for axis in [Axis::X, Axis::Y] {
            self.springs
                .insert(SpringKey::new(owner, axis), Spring::new(config, 0.0));
        }
    }

    pub fn get(&self, key: SpringKey) -> Option<&Spring> {
        self.springs.get(&key)
    }

    /// Returns false if the owner has no springs.
    pub fn set_target(&mut self, owner: SpringOwner, target: Vec2) -> bool {
        let mut found = false;
        for (axis, t) in [(Axis::X, target.x), (Axis::Y, target.y)] {
            if let Some(s) = self.springs.get_mut(&SpringKey::new(owner, axis)) {
                s.set_target(t);
                found = true;
            }
        }
        found
    }

    pub fn value(&self, owner: SpringOwner) -> Option<Vec2> {
        let x = self.springs.get(&SpringKey::new(owner, Axis::X))?;
        let y = self.springs.get(&SpringKey::new(owner, Axis::Y))?;
        Some(Vec2::new(x.value(), y.value()))
    }

    pub fn velocity(&self, owner: SpringOwner) -> Option<Vec2> {
        let x = self.springs.get(&SpringKey::new(owner, Axis::X))?;
        let y = self.springs.get(&SpringKey::new(owner, Axis::Y))?;
        Some(Vec2::new(x.velocity(), y.velocity()))
    }

    /// Every spring advances by the same `dt`.
    pub fn step_all(&mut self, dt: f32) {
        for spring in self.springs.values_mut() {
            spring.step(dt);
        }
    }

    pub fn remove_owner(&mut self, owner: SpringOwner) -> usize {
        let before = self.springs.len();
        self.springs.retain(|key, _| key.owner != owner);
        before - self.springs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SpringKey, &Spring)> {
        self.springs.iter()
    }

    pub fn len(&self) -> usize {
        self.springs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.springs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn run(spring: &mut Spring, seconds: f32) {
        let frames = (seconds / FRAME).ceil() as usize;
        for _ in 0..frames {
            spring.step(FRAME);
        }
    }

    #[test]
    fn converges_for_each_preset() {
        for config in [
            SpringConfig::SCENE_TILT,
            SpringConfig::LANDSCAPE,
            SpringConfig::MAGNETIC,
        ] {
            let mut s = Spring::new(config, 0.0);
            s.set_target(0.5);
            run(&mut s, 10.0 * config.settle_time());
            assert!(
                (s.value() - 0.5).abs() < 1e-3,
                "{config:?} did not settle: {}",
                s.value()
            );
            assert!(s.velocity().abs() < 1e-3, "{config:?} still moving");
            assert!(s.is_at_rest(1e-3));
        }
    }

    #[test]
    fn tilt_is_underdamped_and_magnetic_is_not() {
        assert!(SpringConfig::SCENE_TILT.damping_ratio() < 1.0);
        assert!((SpringConfig::LANDSCAPE.damping_ratio() - 1.0).abs() < 1e-6);
        assert!(SpringConfig::MAGNETIC.damping_ratio() > 1.0);
    }

    #[test]
    fn nan_target_is_ignored() {
        let mut s = Spring::new(SpringConfig::SCENE_TILT, 0.0);
        s.set_target(0.25);
        s.set_target(f32::NAN);
        assert_eq!(s.target(), 0.25);
        s.step(FRAME);
        assert!(s.value().is_finite());
    }

    #[test]
    fn long_frames_stay_stable() {
        let mut s = Spring::new(SpringConfig::MAGNETIC, 0.0);
        s.set_target(10.0);
        for _ in 0..50 {
            s.step(2.5);
            assert!(s.value().is_finite());
            assert!(s.value().abs() < 20.0, "diverged: {}", s.value());
        }
        assert!((s.value() - 10.0).abs() < 1e-2);
    }

    #[test]
    fn extreme_valid_tunings_never_diverge() {
        for stiffness in [0.5, 150.0, 1.0e4, 1.0e6] {
            for damping in [0.01, 1.0, 15.0, 1.0e3] {
                for mass in [1.0e-4, 0.01, 1.0, 100.0] {
                    let config = SpringConfig {
                        stiffness,
                        damping,
                        mass,
                    };
                    assert!(config.validate().is_ok());
                    let mut s = Spring::new(config, 0.0);
                    s.set_target(10.0);
                    for dt in [FRAME, FRAME, 0.004, 2.5, FRAME] {
                        for _ in 0..20 {
                            s.step(dt);
                            assert!(
                                s.value().is_finite() && s.velocity().is_finite(),
                                "{config:?} produced non-finite state"
                            );
                            // released from rest, it can never swing further
                            // from the target than it started
                            assert!(
                                (s.value() - 10.0).abs() <= 10.0 * 1.001,
                                "{config:?} diverged to {}",
                                s.value()
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn light_mass_spring_follows_at_frame_rate() {
        let config = SpringConfig {
            stiffness: 150.0,
            damping: 15.0,
            mass: 0.01,
        };
        let mut s = Spring::new(config, 0.0);
        s.set_target(10.0);
        run(&mut s, 2.0);
        assert!((s.value() - 10.0).abs() < 1e-3, "settled at {}", s.value());
    }

    #[test]
    fn zero_damping_is_rejected() {
        let undamped = SpringConfig {
            damping: 0.0,
            ..SpringConfig::SCENE_TILT
        };
        assert!(matches!(
            undamped.validate(),
            Err(ConfigError::InvalidSpring(_))
        ));
    }

    #[test]
    fn zero_and_negative_dt_do_nothing() {
        let mut s = Spring::new(SpringConfig::SCENE_TILT, 0.0);
        s.set_target(1.0);
        s.step(0.0);
        s.step(-1.0);
        s.step(f32::NAN);
        assert_eq!(s.value(), 0.0);
        assert_eq!(s.velocity(), 0.0);
    }

    #[test]
    fn table_removes_both_axes_of_an_owner() {
        let mut table = SpringTable::new();
        let a = SpringOwner::Scene(SceneId::from_raw(1));
        let b = SpringOwner::Attractor(AttractorId::from_raw(2));
        table.insert_pair(a, SpringConfig::SCENE_TILT);
        table.insert_pair(b, SpringConfig::MAGNETIC);
        assert_eq!(table.len(), 4);
        assert!(table.set_target(b, Vec2::new(3.0, -2.0)));
        table.step_all(FRAME);
        let v = table.velocity(b).unwrap();
        assert!(v.x > 0.0 && v.y < 0.0, "moving toward the target: {v:?}");
        assert_eq!(table.remove_owner(a), 2);
        assert!(table.value(a).is_none());
        assert!(!table.set_target(a, Vec2::ONE));
        assert_eq!(table.get(SpringKey::new(b, Axis::Y)).map(|s| s.target()), Some(-2.0));
    }
}
