use super::Listener;
use crate::stage::{with_stage, Stage};
use motion_core::{InputError, OrientationSample, SceneId};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys as web;

/// Desktop browsers and locked-down contexts have no `DeviceOrientationEvent`.
fn sensor_supported(window: &web::Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("DeviceOrientationEvent")).unwrap_or(false)
}

/// Subscribe the scene to device tilt. Returns `None` when the sensor API is
/// absent; the scene then stays pointer-driven.
pub fn wire_scene(stage: &Rc<RefCell<Stage>>, id: SceneId) -> anyhow::Result<Option<Listener>> {
    let Some(window) = web::window() else {
        return Ok(None);
    };
    if !sensor_supported(&window) {
        log::info!("[orientation] {}; {id} is pointer-only", InputError::MissingSensor);
        if let Ok(mut s) = stage.try_borrow_mut() {
            s.engine.sensor_unavailable(id);
        }
        return Ok(None);
    }

    let weak = Rc::downgrade(stage);
    let listener = Listener::new(
        window.as_ref(),
        "deviceorientation",
        move |ev: web::DeviceOrientationEvent| {
            let sample = OrientationSample {
                beta: ev.beta().map(|v| v as f32),
                gamma: ev.gamma().map(|v| v as f32),
            };
            with_stage(&weak, |s| {
                s.engine.orientation(id, sample);
            });
        },
    )?;
    Ok(Some(listener))
}
