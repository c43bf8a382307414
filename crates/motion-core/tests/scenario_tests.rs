// End-to-end behaviour of the engine as the page would drive it: events in,
// one tick per frame, transforms out.

use motion_core::*;
use std::time::Duration;

const FRAME: Duration = Duration::from_micros(16_667);
const SURFACE: Rect = Rect::new(40.0, 80.0, 600.0, 400.0);
const BUTTON: Rect = Rect::new(200.0, 400.0, 160.0, 48.0);

fn run(engine: &mut MotionEngine, seconds: f32) -> FrameSnapshot {
    let frames = (seconds / FRAME.as_secs_f32()).ceil() as usize;
    let mut last = FrameSnapshot::default();
    for _ in 0..frames {
        last = engine.tick(FRAME);
    }
    last
}

fn translate(t: &LayerTransform) -> Vec2 {
    match t {
        LayerTransform::Translate(v) => *v,
        other => panic!("expected translate layer, got {other:?}"),
    }
}

fn tilt(t: &LayerTransform) -> (f32, f32) {
    match t {
        LayerTransform::Tilt { rotate_x, rotate_y } => (*rotate_x, *rotate_y),
        other => panic!("expected tilt layer, got {other:?}"),
    }
}

#[test]
fn top_left_pointer_drives_layers_to_their_extremes() {
    let mut engine = MotionEngine::new(11);
    let id = engine.mount_scene(SceneConfig::landscape()).unwrap();
    assert!(engine.pointer_move(id, Vec2::new(SURFACE.left, SURFACE.top), SURFACE));

    let settle = SpringConfig::LANDSCAPE.settle_time();
    let snap = run(&mut engine, 10.0 * settle);
    let frame = snap.scene(id).unwrap();
    assert!((frame.smoothed - Vec2::new(-0.5, -0.5)).length() < 1e-3);

    let back = translate(&frame.layers[0]);
    let middle = translate(&frame.layers[1]);
    let front = translate(&frame.layers[2]);
    assert!((front - Vec2::new(-40.0, -15.0)).length() < 0.1, "front {front:?}");
    assert!((middle - Vec2::new(-25.0, -10.0)).length() < 0.1, "middle {middle:?}");
    assert!((back - Vec2::new(-10.0, -5.0)).length() < 0.1, "back {back:?}");
    assert!(engine.is_settled(1e-3));
}

#[test]
fn layers_in_one_frame_share_the_same_smoothed_value() {
    let mut engine = MotionEngine::new(11);
    let id = engine.mount_scene(SceneConfig::landscape()).unwrap();
    engine.pointer_move(id, Vec2::new(SURFACE.left + 600.0, SURFACE.top), SURFACE);
    for _ in 0..30 {
        let snap = engine.tick(FRAME);
        let frame = snap.scene(id).unwrap();
        let back = translate(&frame.layers[0]);
        let front = translate(&frame.layers[2]);
        if back.x.abs() > 1e-3 {
            assert!(
                (front.x / back.x - 4.0).abs() < 1e-3,
                "layers read different spring states: {front:?} vs {back:?}"
            );
        }
    }
}

#[test]
fn resting_orientation_leaves_the_scene_flat() {
    let mut engine = MotionEngine::new(3);
    let id = engine.mount_scene(SceneConfig::solar_system()).unwrap();
    assert!(engine.orientation(id, OrientationSample::new(45.0, 0.0)));
    let snap = run(&mut engine, 1.0);
    let (rx, ry) = tilt(&snap.scene(id).unwrap().layers[0]);
    assert!(rx.abs() < 1e-4 && ry.abs() < 1e-4, "tilted to ({rx}, {ry})");
}

#[test]
fn incomplete_orientation_keeps_the_previous_target() {
    let mut engine = MotionEngine::new(3);
    let id = engine.mount_scene(SceneConfig::solar_system()).unwrap();
    engine.orientation(id, OrientationSample::new(75.0, 30.0));
    engine.orientation(
        id,
        OrientationSample {
            beta: Some(45.0),
            gamma: None,
        },
    );
    let snap = run(&mut engine, 3.0);
    let (rx, ry) = tilt(&snap.scene(id).unwrap().layers[0]);
    assert!((ry - 15.0).abs() < 0.05, "rotate_y {ry}");
    assert!((rx + 15.0).abs() < 0.05, "rotate_x {rx}");
}

#[test]
fn alternating_sources_never_jump() {
    let mut engine = MotionEngine::new(5);
    let id = engine.mount_scene(SceneConfig::solar_system()).unwrap();
    let spring = SpringConfig::SCENE_TILT;
    // 15 degrees per half unit of signal
    let deg_per_unit = 30.0;
    let max_step = spring.peak_speed(1.0) * FRAME.as_secs_f32() * deg_per_unit;

    let mut prev = (0.0_f32, 0.0_f32);
    for i in 0..240 {
        if i % 2 == 0 {
            engine.pointer_move(id, Vec2::new(SURFACE.left, SURFACE.top), SURFACE);
        } else {
            engine.orientation(id, OrientationSample::new(75.0, 30.0));
        }
        let snap = engine.tick(FRAME);
        let (rx, ry) = tilt(&snap.scene(id).unwrap().layers[0]);
        assert!(
            (rx - prev.0).abs() <= max_step && (ry - prev.1).abs() <= max_step,
            "frame {i}: jumped from {prev:?} to ({rx}, {ry}), limit {max_step}"
        );
        prev = (rx, ry);
    }
}

#[test]
fn degenerate_bounds_never_reach_the_output() {
    let mut engine = MotionEngine::new(9);
    let scene = engine.mount_scene(SceneConfig::landscape()).unwrap();
    let magnet = engine
        .mount_attractor(Rect::default(), AttractorConfig::default())
        .unwrap();
    let flat = Rect::new(10.0, 10.0, 0.0, 0.0);
    let nan = Rect::new(f32::NAN, 0.0, 100.0, 100.0);

    for i in 0..60 {
        let bounds = if i % 2 == 0 { flat } else { nan };
        engine.pointer_move(scene, Vec2::new(15.0, 15.0), bounds);
        engine.attractor_move(magnet, Vec2::new(15.0, 15.0), bounds);
        let snap = engine.tick(FRAME);
        let frame = snap.scene(scene).unwrap();
        assert!(frame.smoothed.is_finite());
        assert!(frame.layers.iter().all(LayerTransform::is_finite));
        assert!(frame
            .particles
            .iter()
            .all(|p| p.position.is_finite() && p.opacity.is_finite()));
        assert!(snap.attractor(magnet).unwrap().is_finite());
    }
    assert_eq!(engine.scene(scene).unwrap().input().source(), InputSource::None);
}

#[test]
fn attractor_follows_then_decays_monotonically() {
    let mut engine = MotionEngine::new(1);
    let id = engine
        .mount_attractor(BUTTON, AttractorConfig::default())
        .unwrap();
    engine.attractor_move(id, Vec2::new(360.0, 448.0), BUTTON);
    let snap = run(&mut engine, 2.0);
    let held = snap.attractor(id).unwrap();
    assert!((held - Vec2::new(16.0, 4.8)).length() < 1e-2, "held at {held:?}");

    assert!(engine.attractor_leave(id));
    let mut prev = held.length();
    let mut last = held;
    for _ in 0..120 {
        last = engine.tick(FRAME).attractor(id).unwrap();
        let len = last.length();
        assert!(len <= prev + 1e-6, "displacement grew from {prev} to {len}");
        prev = len;
    }
    assert!(last.length() < 1e-2, "still displaced by {last:?}");
    assert_eq!(engine.attractor(id).unwrap().state().displacement, last);
}

#[test]
fn unmount_tears_everything_down() {
    let mut engine = MotionEngine::new(2);
    let scene = engine.mount_scene(SceneConfig::solar_system()).unwrap();
    let magnet = engine
        .mount_attractor(BUTTON, AttractorConfig::default())
        .unwrap();
    engine.tick(FRAME);

    assert!(engine.unmount_scene(scene));
    assert_eq!(engine.springs().len(), 2);
    assert!(!engine.pointer_move(scene, Vec2::ZERO, SURFACE));
    assert!(!engine.orientation(scene, OrientationSample::new(45.0, 0.0)));
    assert!(engine.tick(FRAME).scene(scene).is_none());

    assert!(engine.unmount_attractor(magnet));
    assert!(!engine.unmount_attractor(magnet));
    assert!(!engine.attractor_move(magnet, Vec2::ZERO, BUTTON));
    assert!(engine.is_empty());
    assert!(engine.springs().is_empty());
}

#[test]
fn same_seed_gives_the_same_frames() {
    let drive = |seed| {
        let mut engine = MotionEngine::new(seed);
        let id = engine.mount_scene(SceneConfig::landscape()).unwrap();
        engine.pointer_move(id, Vec2::new(200.0, 300.0), SURFACE);
        run(&mut engine, 0.5)
    };
    assert_eq!(drive(42), drive(42));
    assert_ne!(drive(42), drive(43));
}

#[test]
fn orbit_bodies_follow_elapsed_time() {
    let mut engine = MotionEngine::new(4);
    let id = engine.mount_scene(SceneConfig::solar_system()).unwrap();
    let first = engine.tick(Duration::ZERO);
    let bodies = &first.scene(id).unwrap().particles;
    assert_eq!(bodies.len(), 3);
    assert!((bodies[0].position - Vec2::new(0.0, -60.0)).length() < 1e-4);

    // a quarter of the inner 4 s orbit
    for _ in 0..10 {
        engine.tick(Duration::from_millis(100));
    }
    let later = engine.tick(Duration::ZERO);
    let inner = later.scene(id).unwrap().particles[0];
    assert!((inner.position - Vec2::new(60.0, 0.0)).length() < 1e-2, "{inner:?}");
    assert_eq!(inner.opacity, 1.0);
}
