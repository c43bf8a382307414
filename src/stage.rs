use crate::detach::{DetachQueue, Detached};
use crate::frame::FrameLoop;
use crate::paint::{self, ScenePainter};
use motion_core::{AttractorId, MotionEngine, SceneId};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use std::time::Duration;
use web_sys as web;

/// Page-wide motion state shared by every mounted scene and control.
///
/// Handles own the strong references; the frame loop and event listeners only
/// hold weak ones, so the stage (and its loop) goes away with the last handle.
pub struct Stage {
    pub engine: MotionEngine,
    pub scenes: BTreeMap<SceneId, ScenePainter>,
    pub controls: BTreeMap<AttractorId, web::HtmlElement>,
    pub detached: Rc<DetachQueue>,
    frame: Option<FrameLoop>,
}

thread_local! {
    static SHARED: RefCell<Weak<RefCell<Stage>>> = RefCell::new(Weak::new());
}

impl Stage {
    fn new(seed: u64) -> Self {
        Self {
            engine: MotionEngine::new(seed),
            scenes: BTreeMap::new(),
            controls: BTreeMap::new(),
            detached: Rc::new(DetachQueue::default()),
            frame: None,
        }
    }

    /// Unmount from the engine and restore the authored styles.
    pub fn remove(&mut self, target: Detached) {
        target.apply(&mut self.engine);
        match target {
            Detached::Scene(id) => {
                if let Some(painter) = self.scenes.remove(&id) {
                    painter.clear();
                }
            }
            Detached::Control(id) => {
                if let Some(el) = self.controls.remove(&id) {
                    _ = el.style().remove_property("transform");
                }
            }
        }
    }

    fn frame(&mut self, dt: Duration) {
        for target in self.detached.drain() {
            log::debug!("[stage] applying deferred removal of {target:?}");
            self.remove(target);
        }
        let snapshot = self.engine.tick(dt);
        for (id, frame) in &snapshot.scenes {
            if let Some(painter) = self.scenes.get(id) {
                painter.paint(frame);
            }
        }
        for (id, displacement) in &snapshot.attractors {
            if let Some(el) = self.controls.get(id) {
                paint::control(el, *displacement);
            }
        }
    }
}

/// The live stage, or a fresh one with its own frame loop.
pub fn shared() -> anyhow::Result<Rc<RefCell<Stage>>> {
    if let Some(stage) = SHARED.with(|cell| cell.borrow().upgrade()) {
        return Ok(stage);
    }

    let seed: u64 = rand::random();
    let stage = Rc::new(RefCell::new(Stage::new(seed)));
    let weak = Rc::downgrade(&stage);
    let frame = FrameLoop::start(move |dt| match weak.upgrade() {
        Some(stage) => {
            if let Ok(mut s) = stage.try_borrow_mut() {
                s.frame(dt);
            }
            true
        }
        None => false,
    })?;
    stage.borrow_mut().frame = Some(frame);
    SHARED.with(|cell| *cell.borrow_mut() = Rc::downgrade(&stage));
    log::info!("[stage] created (seed {seed:#x})");
    Ok(stage)
}

/// Remove `target` now, or at the next frame if the stage is busy.
pub fn detach(stage: &Rc<RefCell<Stage>>, detached: &DetachQueue, target: Detached) {
    match stage.try_borrow_mut() {
        Ok(mut s) => s.remove(target),
        Err(_) => {
            log::debug!("[stage] busy; deferring removal of {target:?}");
            detached.push(target);
        }
    }
}

/// Run `f` on the stage if it is still alive and not already borrowed.
/// Returns false when the callback was skipped.
pub fn with_stage(weak: &Weak<RefCell<Stage>>, f: impl FnOnce(&mut Stage)) -> bool {
    let Some(stage) = weak.upgrade() else {
        return false;
    };
    let Ok(mut s) = stage.try_borrow_mut() else {
        log::debug!("[stage] busy; event dropped");
        return false;
    };
    f(&mut s);
    true
}
