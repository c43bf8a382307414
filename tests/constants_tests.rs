// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use motion_core::constants as motion;
use motion_core::{SceneConfig, SpringConfig};

#[test]
fn dom_attributes_are_distinct_data_attributes() {
    let attrs = [LAYER_ATTR, PARTICLE_ATTR, PULSE_ATTR];
    for (i, a) in attrs.iter().enumerate() {
        assert!(a.starts_with("data-"), "{a} is not a data attribute");
        for b in &attrs[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn default_preset_exists() {
    assert!(SceneConfig::preset(DEFAULT_PRESET).is_ok());
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn perspective_is_far_enough_for_the_tilt() {
    // a surface tilted by the max angle must stay well in front of the eye
    assert!(TILT_PERSPECTIVE_PX > 0.0);
    let half_width = 300.0_f32;
    let depth = half_width * motion::TILT_MAX_DEG.to_radians().sin();
    assert!(depth < TILT_PERSPECTIVE_PX / 4.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn layer_ranges_grow_toward_the_front() {
    let x = motion::LANDSCAPE_LAYER_X_PX;
    let y = motion::LANDSCAPE_LAYER_Y_PX;
    assert!(x.windows(2).all(|w| w[0] < w[1]));
    assert!(y.windows(2).all(|w| w[0] < w[1]));
    assert!(motion::ORBIT_RADII_PX.windows(2).all(|w| w[0] < w[1]));
    assert!(motion::ORBIT_PARALLAX_WEIGHTS.windows(2).all(|w| w[0] < w[1]));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn frame_limits_are_consistent() {
    assert!(motion::MAX_FRAME_DT_SEC > 0.0 && motion::MAX_FRAME_DT_SEC < 1.0);
    // every preset spring settles well within a second
    for spring in [SpringConfig::SCENE_TILT, SpringConfig::LANDSCAPE, SpringConfig::MAGNETIC] {
        assert!(spring.validate().is_ok());
        assert!(spring.settle_time() < 1.0, "{spring:?}");
    }
    assert!(motion::FIREFLY_PERIOD_MIN_SEC <= motion::FIREFLY_PERIOD_MAX_SEC);
    assert!(motion::FIREFLY_COUNT <= motion::MAX_PARTICLE_COUNT);
}
