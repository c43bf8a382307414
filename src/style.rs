// CSS value formatting for painted frames. Pure so it can be tested on the host.
use crate::constants::*;
use motion_core::{LayerTransform, Vec2};

// Avoid writing "-0.00" into styles
#[inline]
fn clean(v: f32) -> f32 {
    if v == 0.0 || !v.is_finite() {
        0.0
    } else {
        v
    }
}

pub fn translate(offset: Vec2) -> String {
    format!(
        "translate3d({:.p$}px, {:.p$}px, 0px)",
        clean(offset.x),
        clean(offset.y),
        p = TRANSLATE_DECIMALS
    )
}

pub fn layer_transform(transform: &LayerTransform) -> String {
    match *transform {
        LayerTransform::Tilt { rotate_x, rotate_y } => format!(
            "perspective({}px) rotateX({:.p$}deg) rotateY({:.p$}deg)",
            TILT_PERSPECTIVE_PX,
            clean(rotate_x),
            clean(rotate_y),
            p = ROTATE_DECIMALS
        ),
        LayerTransform::Translate(offset) => translate(offset),
    }
}

/// Particles are authored centered on the scene (`left: 50%; top: 50%`), so
/// the element is first pulled back by half its own size.
pub fn particle_transform(position: Vec2) -> String {
    format!("translate(-50%, -50%) {}", translate(position))
}

pub fn scale(factor: f32) -> String {
    let factor = if factor.is_finite() { factor } else { 1.0 };
    format!("scale({:.p$})", factor, p = SCALE_DECIMALS)
}

pub fn opacity(value: f32) -> String {
    format!("{:.p$}", clean(value).clamp(0.0, 1.0), p = OPACITY_DECIMALS)
}
