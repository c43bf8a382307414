// Removal requests that arrive while the stage is borrowed. Pure so it can be
// tested on the host.
use motion_core::{AttractorId, MotionEngine, SceneId};
use std::cell::RefCell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Detached {
    Scene(SceneId),
    Control(AttractorId),
}

impl Detached {
    /// Returns false if the target was already gone.
    pub fn apply(self, engine: &mut MotionEngine) -> bool {
        match self {
            Detached::Scene(id) => engine.unmount_scene(id),
            Detached::Control(id) => engine.unmount_attractor(id),
        }
    }
}

/// Shared outside the stage's `RefCell` so a handle can queue its own
/// removal when the stage cannot be borrowed. Drained at the next frame.
#[derive(Debug, Default)]
pub struct DetachQueue {
    pending: RefCell<Vec<Detached>>,
}

impl DetachQueue {
    pub fn push(&self, target: Detached) {
        let mut pending = self.pending.borrow_mut();
        if !pending.contains(&target) {
            pending.push(target);
        }
    }

    pub fn drain(&self) -> Vec<Detached> {
        std::mem::take(&mut *self.pending.borrow_mut())
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }
}
