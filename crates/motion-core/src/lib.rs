pub mod attractor;
pub mod config;
pub mod constants;
pub mod easing;
pub mod engine;
pub mod error;
pub mod mapper;
pub mod particles;
pub mod signal;
pub mod spring;

pub use attractor::{attraction_target, Attractor, AttractorConfig, AttractorState};
pub use config::{PulseConfig, SceneConfig};
pub use easing::{Easing, KeyframeLoop};
pub use engine::{
    AttractorId, FrameSnapshot, MotionEngine, PulseFrame, Scene, SceneFrame, SceneId,
};
pub use error::{ConfigError, InputError};
pub use mapper::{map, LayerConfig, LayerTransform, MappingRange};
pub use particles::{OrbitRing, ParticleConfig, ParticleField, ParticleFrame, ParticleState};
pub use signal::{
    normalize_orientation, normalize_pointer, InputNormalizer, InputSource, NormalizedSignal,
    OrientationCalibration, OrientationSample, Rect,
};
pub use spring::{Spring, SpringConfig, SpringTable};

pub use glam::Vec2;
