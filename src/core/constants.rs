// Particle field tuning constants.
// Distances are in surface pixels, speeds in pixels per reference frame
// (1/60 s). `FieldParams::default()` is built from these.

// Particle count per scent: floor(BASE_COUNT + intensity * INTENSITY_SCALE)
pub const BASE_COUNT: usize = 30;
pub const INTENSITY_SCALE: f32 = 100.0;

// Particle size: base = max(intensity * SIZE_SCALE, MIN_PARTICLE_SIZE)
pub const SIZE_SCALE: f32 = 6.0;
pub const SIZE_VARIANCE: f32 = 0.7; // extra size drawn from U(0, base * variance)
pub const MIN_PARTICLE_SIZE: f32 = 1.0; // keeps zero-intensity glows visible and non-degenerate

// Spawn layout around the surface center
pub const SPAWN_RADIUS: f32 = 50.0; // distance = U(0,1)^2 * radius
pub const SCENT_OFFSET: f32 = 10.0; // per-scent cloud offset, rotated by i * PI / n

// Motion
pub const MAX_DRIFT: f32 = 0.075; // per axis
pub const WOBBLE_AMPLITUDE_MAX: f32 = 0.5;
pub const WOBBLE_FREQUENCY_MIN: f32 = 0.01;
pub const WOBBLE_FREQUENCY_MAX: f32 = 0.03;

// Blending
pub const OPACITY_MIN: f32 = 0.2;
pub const OPACITY_MAX: f32 = 0.6;

// Frame timing
pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;
pub const MAX_FRAME_STEP: f32 = 4.0; // cap catch-up after a stalled tab

// Candle records
pub const MAX_SCENTS_PER_CANDLE: usize = 4;

// Feedback
pub const RECENT_COMMENT_LIMIT: usize = 3;
pub const FEEDBACK_DEFAULT_RATING: f32 = 0.5;
pub const FEEDBACK_RATING_STEP: f32 = 0.1;
pub const VERDICT_TOO_LIGHT_BELOW: f32 = 0.35;
pub const VERDICT_TOO_STRONG_ABOVE: f32 = 0.65;

pub const DEFAULT_SCENT_COLOR: &str = "#000000";
