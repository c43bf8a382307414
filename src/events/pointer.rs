use super::Listener;
use crate::dom;
use crate::stage::{with_stage, Stage};
use glam::Vec2;
use motion_core::{AttractorId, SceneId};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

#[inline]
fn client_pos(ev: &web::PointerEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// Pointer tracking on a scene surface. Bounds are read per event so layout
/// changes (resize, scroll) are picked up without a separate listener.
pub fn wire_scene(
    stage: &Rc<RefCell<Stage>>,
    id: SceneId,
    surface: &web::HtmlElement,
) -> anyhow::Result<[Listener; 2]> {
    let target: &web::EventTarget = surface.as_ref();

    let weak = Rc::downgrade(stage);
    let el = surface.clone();
    let moved = Listener::new(target, "pointermove", move |ev: web::PointerEvent| {
        let bounds = dom::element_rect(&el);
        let pointer = client_pos(&ev);
        with_stage(&weak, |s| {
            s.engine.pointer_move(id, pointer, bounds);
        });
    })?;

    let weak = Rc::downgrade(stage);
    let left = Listener::new(target, "pointerleave", move |_: web::PointerEvent| {
        with_stage(&weak, |s| {
            s.engine.pointer_leave(id);
        });
    })?;

    Ok([moved, left])
}

pub fn wire_control(
    stage: &Rc<RefCell<Stage>>,
    id: AttractorId,
    control: &web::HtmlElement,
) -> anyhow::Result<[Listener; 2]> {
    let target: &web::EventTarget = control.as_ref();

    let weak = Rc::downgrade(stage);
    let el = control.clone();
    let moved = Listener::new(target, "pointermove", move |ev: web::PointerEvent| {
        // the control's own box moves with it, so re-read every time
        let bounds = dom::element_rect(&el);
        let pointer = client_pos(&ev);
        with_stage(&weak, |s| {
            s.engine.attractor_move(id, pointer, bounds);
        });
    })?;

    let weak = Rc::downgrade(stage);
    let left = Listener::new(target, "pointerleave", move |_: web::PointerEvent| {
        with_stage(&weak, |s| {
            s.engine.attractor_leave(id);
        });
    })?;

    Ok([moved, left])
}
