//! Instance table for every mounted scene and magnetic control, driven one
//! tick at a time by the host's animation loop.

use crate::attractor::{Attractor, AttractorConfig};
use crate::config::{PulseConfig, SceneConfig};
use crate::constants::MAX_FRAME_DT_SEC;
use crate::error::ConfigError;
use crate::mapper::LayerTransform;
use crate::particles::{ParticleField, ParticleFrame};
use crate::signal::{InputNormalizer, InputSource, OrientationSample, Rect};
use crate::spring::{SpringOwner, SpringTable};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttractorId(u32);

impl SceneId {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl AttractorId {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scene#{}", self.0)
    }
}

impl fmt::Display for AttractorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "magnet#{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct Scene {
    config: SceneConfig,
    input: InputNormalizer,
    particles: ParticleField,
    elapsed: f64,
}

impl Scene {
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn input(&self) -> &InputNormalizer {
        &self.input
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    /// Seconds of ambient time since mount. Advances by the capped tick delta.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseFrame {
    pub scale: f32,
    /// `None` when the pulse has no opacity track; leave the element as is.
    pub opacity: Option<f32>,
}

impl PulseFrame {
    fn sample(config: &PulseConfig, elapsed: f64) -> Self {
        Self {
            scale: config
                .scale
                .as_ref()
                .map_or(1.0, |track| track.sample(elapsed, 0.0)),
            opacity: config.opacity.as_ref().map(|track| track.sample(elapsed, 0.0)),
        }
    }
}

/// Everything the composer needs to paint one scene for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneFrame {
    /// Spring output the layers and particles were mapped from.
    pub smoothed: Vec2,
    pub layers: SmallVec<[LayerTransform; 4]>,
    pub particles: Vec<ParticleFrame>,
    pub pulses: SmallVec<[PulseFrame; 2]>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameSnapshot {
    /// Delta actually applied, after capping.
    pub dt: f32,
    pub scenes: Vec<(SceneId, SceneFrame)>,
    /// Smoothed displacement per control, in pixels.
    pub attractors: Vec<(AttractorId, Vec2)>,
}

impl FrameSnapshot {
    pub fn scene(&self, id: SceneId) -> Option<&SceneFrame> {
        self.scenes.iter().find(|(s, _)| *s == id).map(|(_, f)| f)
    }

    pub fn attractor(&self, id: AttractorId) -> Option<Vec2> {
        self.attractors
            .iter()
            .find(|(a, _)| *a == id)
            .map(|(_, d)| *d)
    }
}

/// Owns every scene, attractor and spring on the page.
///
/// Event entry points only write targets; `tick` is the single place springs
/// advance and transforms are read, so each snapshot is consistent.
pub struct MotionEngine {
    scenes: BTreeMap<SceneId, Scene>,
    attractors: BTreeMap<AttractorId, Attractor>,
    springs: SpringTable,
    rng: StdRng,
    next_id: u32,
}

impl MotionEngine {
    pub fn new(seed: u64) -> Self {
        Self {
            scenes: BTreeMap::new(),
            attractors: BTreeMap::new(),
            springs: SpringTable::new(),
            rng: StdRng::seed_from_u64(seed),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    /// Validate `config`, lay out its particles from the engine's seeded
    /// source, and create its springs at rest.
    pub fn mount_scene(&mut self, config: SceneConfig) -> Result<SceneId, ConfigError> {
        let mut rng = StdRng::seed_from_u64(self.rng.gen());
        self.mount_scene_with_rng(config, &mut rng)
    }

    pub fn mount_scene_with_rng<R: Rng + ?Sized>(
        &mut self,
        config: SceneConfig,
        rng: &mut R,
    ) -> Result<SceneId, ConfigError> {
        config.validate()?;
        let id = SceneId(self.allocate_id());
        let particles = ParticleField::generate(&config.particles, config.particle_parallax, rng);
        self.springs.insert_pair(SpringOwner::Scene(id), config.spring);
        log::debug!(
            "[motion] mounted {id}: {} layers, {} particles",
            config.layers.len(),
            particles.len()
        );
        self.scenes.insert(
            id,
            Scene {
                input: InputNormalizer::new(config.orientation),
                config,
                particles,
                elapsed: 0.0,
            },
        );
        Ok(id)
    }

    /// Drops the scene and its springs. Returns false if it was already gone.
    pub fn unmount_scene(&mut self, id: SceneId) -> bool {
        if self.scenes.remove(&id).is_none() {
            return false;
        }
        let removed = self.springs.remove_owner(SpringOwner::Scene(id));
        log::debug!("[motion] unmounted {id} ({removed} springs)");
        true
    }

    pub fn pointer_move(&mut self, id: SceneId, pointer: Vec2, bounds: Rect) -> bool {
        match self.scenes.get_mut(&id) {
            Some(scene) => {
                scene.input.pointer_move(pointer, bounds);
                true
            }
            None => false,
        }
    }

    pub fn pointer_leave(&mut self, id: SceneId) -> bool {
        match self.scenes.get_mut(&id) {
            Some(scene) => {
                scene.input.pointer_leave();
                true
            }
            None => false,
        }
    }

    /// Incomplete samples are dropped; the scene keeps its previous target.
    pub fn orientation(&mut self, id: SceneId, sample: OrientationSample) -> bool {
        let Some(scene) = self.scenes.get_mut(&id) else {
            return false;
        };
        if let Err(err) = scene.input.orientation(sample) {
            log::trace!("[motion] {id}: {err}; sample dropped");
        }
        true
    }

    /// The host found no orientation API. Only resets a scene that was being
    /// driven by orientation.
    pub fn sensor_unavailable(&mut self, id: SceneId) -> bool {
        let Some(scene) = self.scenes.get_mut(&id) else {
            return false;
        };
        if scene.input.source() == InputSource::Orientation {
            scene.input.sensor_unavailable();
        }
        true
    }

    pub fn mount_attractor(
        &mut self,
        bounds: Rect,
        config: AttractorConfig,
    ) -> Result<AttractorId, ConfigError> {
        config.validate()?;
        let id = AttractorId(self.allocate_id());
        self.springs.insert_pair(SpringOwner::Attractor(id), config.spring);
        self.attractors.insert(id, Attractor::new(bounds, config));
        log::debug!("[motion] mounted {id}");
        Ok(id)
    }

    pub fn attractor_move(&mut self, id: AttractorId, pointer: Vec2, bounds: Rect) -> bool {
        match self.attractors.get_mut(&id) {
            Some(a) => {
                a.pointer_move(pointer, bounds);
                true
            }
            None => false,
        }
    }

    pub fn attractor_leave(&mut self, id: AttractorId) -> bool {
        match self.attractors.get_mut(&id) {
            Some(a) => {
                a.pointer_leave();
                true
            }
            None => false,
        }
    }

    pub fn unmount_attractor(&mut self, id: AttractorId) -> bool {
        if self.attractors.remove(&id).is_none() {
            return false;
        }
        let removed = self.springs.remove_owner(SpringOwner::Attractor(id));
        log::debug!("[motion] unmounted {id} ({removed} springs)");
        true
    }

    pub fn scene(&self, id: SceneId) -> Option<&Scene> {
        self.scenes.get(&id)
    }

    pub fn attractor(&self, id: AttractorId) -> Option<&Attractor> {
        self.attractors.get(&id)
    }

    pub fn springs(&self) -> &SpringTable {
        &self.springs
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty() && self.attractors.is_empty()
    }

    /// True when no spring is more than `epsilon` from rest. Ambient
    /// particles still move; this only concerns input-driven motion.
    pub fn is_settled(&self, epsilon: f32) -> bool {
        self.springs.iter().all(|(_, s)| s.is_at_rest(epsilon))
    }

    /// Advance one frame.
    ///
    /// Order matters: targets are pushed from the latest input, then every
    /// spring steps by the same delta, then all outputs are mapped.
    pub fn tick(&mut self, dt: Duration) -> FrameSnapshot {
        let raw = dt.as_secs_f32();
        let dt = raw.min(MAX_FRAME_DT_SEC);
        if raw > MAX_FRAME_DT_SEC {
            log::trace!("[motion] frame delta {raw:.3}s capped to {dt:.3}s");
        }

        for (&id, scene) in &self.scenes {
            self.springs
                .set_target(SpringOwner::Scene(id), scene.input.signal().as_vec2());
        }
        for (&id, attractor) in &self.attractors {
            self.springs
                .set_target(SpringOwner::Attractor(id), attractor.state().target());
        }

        self.springs.step_all(dt);

        let mut snapshot = FrameSnapshot {
            dt,
            scenes: Vec::with_capacity(self.scenes.len()),
            attractors: Vec::with_capacity(self.attractors.len()),
        };
        for (&id, scene) in self.scenes.iter_mut() {
            scene.elapsed += dt as f64;
            let smoothed = self
                .springs
                .value(SpringOwner::Scene(id))
                .unwrap_or(Vec2::ZERO);
            let mut frame = SceneFrame {
                smoothed,
                layers: scene.config.layers.iter().map(|l| l.apply(smoothed)).collect(),
                particles: Vec::with_capacity(scene.particles.len()),
                pulses: scene
                    .config
                    .pulses
                    .iter()
                    .map(|p| PulseFrame::sample(p, scene.elapsed))
                    .collect(),
            };
            scene
                .particles
                .sample_into(scene.elapsed, smoothed, &mut frame.particles);
            snapshot.scenes.push((id, frame));
        }
        for (&id, attractor) in self.attractors.iter_mut() {
            let displacement = self
                .springs
                .value(SpringOwner::Attractor(id))
                .unwrap_or(Vec2::ZERO);
            attractor.set_displacement(displacement);
            snapshot.attractors.push((id, displacement));
        }
        snapshot
    }
}
