use anyhow::anyhow;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A `requestAnimationFrame` chain. The callback receives the time since the
/// previous frame and returns whether to keep going. Dropping the loop cancels
/// the pending frame and frees the callback.
pub struct FrameLoop {
    tick: TickSlot,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn start(mut on_frame: impl FnMut(Duration) -> bool + 'static) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow!("no window"))?;
        let tick: TickSlot = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let tick_clone = tick.clone();
        let pending_tick = pending.clone();
        let mut last_instant = Instant::now();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_tick.set(None);
            let now = Instant::now();
            let dt = now.duration_since(last_instant);
            last_instant = now;
            if !on_frame(dt) {
                log::debug!("[frame] loop stopped");
                return;
            }
            if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
                pending_tick.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
            }
        }) as Box<dyn FnMut()>));

        let first = match tick.borrow().as_ref() {
            Some(cb) => window
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .map_err(|e| anyhow!("requestAnimationFrame: {e:?}"))?,
            None => return Err(anyhow!("frame callback missing")),
        };
        pending.set(Some(first));
        log::debug!("[frame] loop started");
        Ok(Self { tick, pending })
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let (Some(w), Some(handle)) = (web::window(), self.pending.take()) {
            _ = w.cancel_animation_frame(handle);
        }
        // the callback holds a clone of `tick`; clearing the slot breaks the cycle
        self.tick.borrow_mut().take();
    }
}
