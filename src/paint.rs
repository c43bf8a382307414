use crate::constants::{LAYER_ATTR, PARTICLE_ATTR, PULSE_ATTR};
use crate::dom::{self, set_style};
use crate::style;
use glam::Vec2;
use motion_core::SceneFrame;
use web_sys as web;

/// The tagged elements of one scene, collected once at mount.
pub struct ScenePainter {
    layers: Vec<web::HtmlElement>,
    particles: Vec<web::HtmlElement>,
    pulses: Vec<web::HtmlElement>,
}

impl ScenePainter {
    pub fn collect(surface: &web::Element) -> Self {
        Self {
            layers: dom::tagged_children(surface, LAYER_ATTR),
            particles: dom::tagged_children(surface, PARTICLE_ATTR),
            pulses: dom::tagged_children(surface, PULSE_ATTR),
        }
    }

    /// Warn when the markup and the scene config disagree; extra elements are
    /// left alone and extra outputs are not painted.
    pub fn check_counts(&self, layers: usize, particles: usize, pulses: usize) {
        for (what, found, expected) in [
            ("layers", self.layers.len(), layers),
            ("particles", self.particles.len(), particles),
            ("pulses", self.pulses.len(), pulses),
        ] {
            if found != expected {
                log::warn!("[paint] scene has {found} tagged {what}, config expects {expected}");
            }
        }
    }

    pub fn paint(&self, frame: &SceneFrame) {
        for (el, transform) in self.layers.iter().zip(&frame.layers) {
            set_style(el, "transform", &style::layer_transform(transform));
        }
        for (el, p) in self.particles.iter().zip(&frame.particles) {
            set_style(el, "transform", &style::particle_transform(p.position));
            set_style(el, "opacity", &style::opacity(p.opacity));
        }
        for (el, pulse) in self.pulses.iter().zip(&frame.pulses) {
            set_style(el, "transform", &style::scale(pulse.scale));
            if let Some(opacity) = pulse.opacity {
                set_style(el, "opacity", &style::opacity(opacity));
            }
        }
    }

    /// Put every painted element back to its authored style.
    pub fn clear(&self) {
        for el in self.layers.iter().chain(&self.particles).chain(&self.pulses) {
            _ = el.style().remove_property("transform");
            _ = el.style().remove_property("opacity");
        }
    }
}

pub fn control(el: &web::HtmlElement, displacement: Vec2) {
    set_style(el, "transform", &style::translate(displacement));
}
