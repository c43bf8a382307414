// Host-side tests for removals queued while the stage is borrowed.

#![allow(dead_code)]
mod detach {
    include!("../src/detach.rs");
}

use detach::*;
use motion_core::{AttractorConfig, MotionEngine, Rect, SceneConfig};

#[test]
fn queued_removals_are_applied_once() {
    let mut engine = MotionEngine::new(7);
    let scene = engine.mount_scene(SceneConfig::landscape()).unwrap();
    let control = engine
        .mount_attractor(Rect::new(0.0, 0.0, 120.0, 40.0), AttractorConfig::default())
        .unwrap();
    assert!(!engine.springs().is_empty());

    let queue = DetachQueue::default();
    assert!(queue.is_empty());
    queue.push(Detached::Scene(scene));
    queue.push(Detached::Control(control));
    queue.push(Detached::Scene(scene));

    let pending = queue.drain();
    assert_eq!(pending, vec![Detached::Scene(scene), Detached::Control(control)]);
    assert!(queue.is_empty());

    for target in &pending {
        assert!(target.apply(&mut engine), "{target:?} was not mounted");
    }
    for target in pending {
        assert!(!target.apply(&mut engine), "{target:?} removed twice");
    }
    assert!(engine.is_empty());
    assert!(engine.springs().is_empty());
}

#[test]
fn a_drained_queue_starts_over() {
    let queue = DetachQueue::default();
    let mut engine = MotionEngine::new(1);
    let scene = engine.mount_scene(SceneConfig::solar_system()).unwrap();
    queue.push(Detached::Scene(scene));
    assert_eq!(queue.drain().len(), 1);
    assert!(queue.drain().is_empty());

    queue.push(Detached::Scene(scene));
    assert!(!queue.is_empty());
}
