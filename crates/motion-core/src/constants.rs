//! Default tuning for the motion engine.
//!
//! Presets in `config.rs` are assembled from these values; keeping them here
//! keeps magic numbers out of the code paths that consume them.

// Normalized signal
pub const SIGNAL_HALF_RANGE: f32 = 0.5; // signal lives in [-0.5, 0.5] per axis

// Orientation sensor
pub const ORIENTATION_MAX_TILT_DEG: f32 = 30.0; // usable window either side of rest
pub const ORIENTATION_RESTING_BETA_DEG: f32 = 45.0; // phone held upright, tipped back
pub const LANDSCAPE_RESTING_BETA_DEG: f32 = 30.0;

// Scene tilt spring
pub const TILT_STIFFNESS: f32 = 150.0;
pub const TILT_DAMPING: f32 = 15.0;
pub const TILT_MASS: f32 = 1.0;

// Landscape parallax spring (critically damped)
pub const LANDSCAPE_STIFFNESS: f32 = 100.0;
pub const LANDSCAPE_DAMPING: f32 = 20.0;
pub const LANDSCAPE_MASS: f32 = 1.0;

// Magnetic attraction
pub const MAGNETIC_STIFFNESS: f32 = 150.0;
pub const MAGNETIC_DAMPING: f32 = 15.0;
pub const MAGNETIC_MASS: f32 = 0.1;
pub const MAGNETIC_STRENGTH: f32 = 0.2; // fraction of the center offset the control follows

// Integration
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // longer gaps (hidden tab, debugger) are truncated

// Tilt scene layout
pub const TILT_MAX_DEG: f32 = 15.0;

// Landscape layers, back to front
pub const LANDSCAPE_LAYER_X_PX: [f32; 3] = [10.0, 25.0, 40.0];
pub const LANDSCAPE_LAYER_Y_PX: [f32; 3] = [5.0, 10.0, 15.0];

// Fireflies
pub const FIREFLY_COUNT: usize = 8;
pub const MAX_PARTICLE_COUNT: usize = 256; // per scene, each one is a painted element
pub const FIREFLY_PERIOD_MIN_SEC: f32 = 3.0;
pub const FIREFLY_PERIOD_MAX_SEC: f32 = 7.0;
pub const FIREFLY_SPAWN_HALF_EXTENT_PX: f32 = 150.0;
pub const FIREFLY_PARALLAX_PX: f32 = 20.0;
pub const FIREFLY_WEIGHT_BANDS: usize = 3; // weights cycle 1, 2, 3
pub const FIREFLY_OPACITY_KEYFRAMES: [f32; 3] = [0.0, 1.0, 0.0];

// Orbiting bodies, inner to outer
pub const ORBIT_RADII_PX: [f32; 3] = [60.0, 95.0, 135.0];
pub const ORBIT_PERIODS_SEC: [f32; 3] = [4.0, 8.0, 15.0];
pub const ORBIT_BODY_SIZES_PX: [f32; 3] = [4.0, 6.0, 5.0];
pub const ORBIT_PARALLAX_WEIGHTS: [f32; 3] = [0.25, 0.5, 0.75];
pub const ORBIT_PARALLAX_PX: f32 = 10.0;

// Ambient pulses
pub const SUN_PULSE_SCALE: [f32; 3] = [1.0, 1.05, 1.0];
pub const SUN_PULSE_PERIOD_SEC: f32 = 4.0;
pub const GLOW_PULSE_SCALE: [f32; 3] = [1.0, 1.2, 1.0];
pub const GLOW_PULSE_OPACITY: [f32; 3] = [0.5, 0.8, 0.5];
pub const GLOW_PULSE_PERIOD_SEC: f32 = 6.0;
