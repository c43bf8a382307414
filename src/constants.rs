/// DOM contract and paint tuning for the web front-end.
///
/// Motion tuning (springs, ranges, periods) lives in `motion_core::constants`;
/// this file only covers how the results reach the page.
// Attributes marking the elements a scene paints. Values are optional
// integer indices; untagged order falls back to document order.
pub const LAYER_ATTR: &str = "data-motion-layer";
pub const PARTICLE_ATTR: &str = "data-motion-particle";
pub const PULSE_ATTR: &str = "data-motion-pulse";

// Perspective distance for tilt layers (CSS px)
pub const TILT_PERSPECTIVE_PX: f32 = 1000.0;

// Preset used when `MotionScene` is constructed without one
pub const DEFAULT_PRESET: &str = "solar";

// Decimal places written into style strings
pub const TRANSLATE_DECIMALS: usize = 2;
pub const ROTATE_DECIMALS: usize = 3;
pub const SCALE_DECIMALS: usize = 4;
pub const OPACITY_DECIMALS: usize = 3;
