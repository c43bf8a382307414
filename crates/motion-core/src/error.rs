use thiserror::Error;

/// Conditions raised while turning raw input into a normalized signal.
///
/// None of these are fatal. The engine maps each one onto a degraded but
/// well-defined behaviour (no input, keep previous target, pointer only).
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum InputError {
    #[error("device orientation sensor is not available")]
    MissingSensor,
    #[error("orientation sample is missing beta or gamma")]
    IncompleteSample,
    #[error("surface bounds are degenerate ({width}x{height})")]
    DegenerateBounds { width: f32, height: f32 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown scene preset `{0}`")]
    UnknownPreset(String),
    #[error("invalid spring: {0}")]
    InvalidSpring(&'static str),
    #[error("invalid mapping range for {0}: input range is empty or not finite")]
    InvalidRange(String),
    #[error("invalid particle config: {0}")]
    InvalidParticles(&'static str),
    #[error("invalid orientation calibration: max tilt must be positive")]
    InvalidCalibration,
    #[error("failed to parse scene config: {0}")]
    Parse(#[from] serde_json::Error),
}
