// Shared tuning constants for the tree scene and gesture pipeline.

// Tree geometry (world units)
pub const TREE_HEIGHT: f32 = 14.0;
pub const TREE_BASE_RADIUS: f32 = 5.5;
pub const SURFACE_OFFSET: f32 = 0.35; // lights/ornaments sit just outside the foliage

// Chaos cloud radii per category
pub const FOLIAGE_CHAOS_RADIUS: f32 = 22.0;
pub const ORNAMENT_CHAOS_RADIUS: f32 = 18.0;
pub const PROP_CHAOS_RADIUS: f32 = 20.0;
pub const LIGHT_CHAOS_RADIUS: f32 = 24.0;

// Damped-approach rates (1/s)
pub const FOLIAGE_DAMPING: f32 = 1.4;
pub const ORNAMENT_DAMPING: f32 = 2.0;
pub const PROP_DAMPING: f32 = 2.5;
pub const LIGHT_DAMPING: f32 = 3.5;
pub const TOPPER_LERP_PER_SEC: f32 = 2.0;

// Ornament inertia spread: weight is sampled in [MIN, MAX)
pub const ORNAMENT_WEIGHT_MIN: f32 = 0.5;
pub const ORNAMENT_WEIGHT_MAX: f32 = 1.5;

// Ornament cross-fade
pub const PHOTO_SHRINK: f32 = 0.8; // photo scale = 1 - PHOTO_SHRINK * progress
pub const GLOW_GROWTH: f32 = 0.6; // glow scale = GLOW_GROWTH * progress
pub const ORNAMENT_WOBBLE: f32 = 0.08; // radians

// Foliage drift and tint
pub const FOLIAGE_JITTER: f32 = 0.08;
pub const FOLIAGE_DIM: [f32; 3] = [0.05, 0.16, 0.09];
pub const FOLIAGE_BRIGHT: [f32; 3] = [0.25, 0.85, 0.45];

// Light intensity
pub const LIGHT_IDLE_INTENSITY: f32 = 0.05;
pub const LIGHT_PULSE_BASE: f32 = 2.0;
pub const LIGHT_PULSE_SPAN: f32 = 1.2;
pub const LIGHT_PULSE_FREQ: f32 = 3.0;

// Topper
pub const TOPPER_SPIN_PER_SEC: f32 = 0.6;
pub const TOPPER_LIFT: f32 = 0.6; // height above the tree apex

// Gesture recognition
pub const PINCH_THRESHOLD: f32 = 0.08; // normalized landmark space
pub const GESTURE_CONFIDENCE_MIN: f32 = 0.4;
pub const ROTATION_SCALE: f32 = 3.0; // wrist offset (0..0.5) -> radians/s
pub const ROTATION_DEADZONE: f32 = 0.01;

// MediaPipe hand landmark indices
pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_TIP: usize = 12;
pub const HAND_LANDMARK_COUNT: usize = 21;

// Camera
pub const AUTO_ROTATE_SPEED: f32 = 0.25; // radians/s
pub const CAMERA_DISTANCE: f32 = 30.0;
pub const CAMERA_HEIGHT: f32 = 2.0;
