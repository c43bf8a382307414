//! Magnetic pointer-follow for a single interactive control.

use crate::constants::MAGNETIC_STRENGTH;
use crate::error::{ConfigError, InputError};
use crate::signal::{normalize_pointer, NormalizedSignal, Rect};
use crate::spring::SpringConfig;
use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttractorConfig {
    pub spring: SpringConfig,
    /// Fraction of the pointer's offset from the control center that the
    /// control travels.
    pub strength: f32,
}

impl Default for AttractorConfig {
    fn default() -> Self {
        Self {
            spring: SpringConfig::MAGNETIC,
            strength: MAGNETIC_STRENGTH,
        }
    }
}

impl AttractorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.spring.validate()?;
        if !self.strength.is_finite() {
            return Err(ConfigError::InvalidSpring("attraction strength must be finite"));
        }
        Ok(())
    }
}

/// Offset the control should settle at for a pointer at `pointer`.
pub fn attraction_target(pointer: Vec2, bounds: Rect, strength: f32) -> Result<Vec2, InputError> {
    if bounds.is_degenerate() {
        return Err(InputError::DegenerateBounds {
            width: bounds.width,
            height: bounds.height,
        });
    }
    Ok((pointer - bounds.center()) * strength)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttractorState {
    /// Pointer position over the control, normalized like the scene signal.
    pub origin: NormalizedSignal,
    /// Current smoothed offset, refreshed each tick.
    pub displacement: Vec2,
    pub bounds: Rect,
    target: Vec2,
}

impl AttractorState {
    pub fn new(bounds: Rect) -> Self {
        Self {
            origin: NormalizedSignal::ZERO,
            displacement: Vec2::ZERO,
            bounds,
            target: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn target(&self) -> Vec2 {
        self.target
    }
}

#[derive(Clone, Debug)]
pub struct Attractor {
    config: AttractorConfig,
    state: AttractorState,
}

impl Attractor {
    pub fn new(bounds: Rect, config: AttractorConfig) -> Self {
        Self {
            config,
            state: AttractorState::new(bounds),
        }
    }

    pub fn config(&self) -> &AttractorConfig {
        &self.config
    }

    pub fn state(&self) -> &AttractorState {
        &self.state
    }

    /// `bounds` is re-read on every move because the control itself moves.
    pub fn pointer_move(&mut self, pointer: Vec2, bounds: Rect) {
        self.state.bounds = bounds;
        match attraction_target(pointer, bounds, self.config.strength) {
            Ok(target) => {
                self.state.target = target;
                self.state.origin = normalize_pointer(pointer, bounds).unwrap_or_default();
            }
            Err(err) => {
                log::debug!("[magnet] {err}; releasing control");
                self.pointer_leave();
            }
        }
    }

    pub fn pointer_leave(&mut self) {
        self.state.target = Vec2::ZERO;
        self.state.origin = NormalizedSignal::ZERO;
    }

    pub(crate) fn set_displacement(&mut self, displacement: Vec2) {
        self.state.displacement = displacement;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUTTON: Rect = Rect::new(200.0, 400.0, 160.0, 48.0);

    #[test]
    fn target_is_scaled_center_offset() {
        let t = attraction_target(Vec2::new(360.0, 448.0), BUTTON, 0.2).unwrap();
        assert!((t - Vec2::new(16.0, 4.8)).length() < 1e-4, "got {t:?}");
        let centered = attraction_target(BUTTON.center(), BUTTON, 0.2).unwrap();
        assert_eq!(centered, Vec2::ZERO);
    }

    #[test]
    fn leave_resets_target_and_origin() {
        let mut a = Attractor::new(BUTTON, AttractorConfig::default());
        a.pointer_move(Vec2::new(200.0, 400.0), BUTTON);
        assert_eq!(a.state().origin.as_vec2(), Vec2::new(-0.5, -0.5));
        assert!(a.state().target().length() > 0.0);
        a.pointer_leave();
        assert_eq!(a.state().target(), Vec2::ZERO);
        assert_eq!(a.state().origin, NormalizedSignal::ZERO);
    }

    #[test]
    fn degenerate_bounds_release_the_control() {
        let mut a = Attractor::new(BUTTON, AttractorConfig::default());
        a.pointer_move(Vec2::new(360.0, 448.0), BUTTON);
        a.pointer_move(Vec2::new(360.0, 448.0), Rect::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(a.state().target(), Vec2::ZERO);
        assert!(a.state().target().is_finite());
    }
}
