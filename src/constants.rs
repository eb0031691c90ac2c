/// Page wiring and asset locations for the web front-end.
///
/// Element ids must match `index.html`.
pub const CANVAS_ID: &str = "app-canvas";
pub const VIDEO_ID: &str = "webcam";
pub const STATUS_ID: &str = "status";

pub const MODE_BUTTON_ID: &str = "btn-mode";
pub const DEBUG_BUTTON_ID: &str = "btn-debug";
pub const QUALITY_BUTTON_ID: &str = "btn-quality";

pub const PHOTO_OVERLAY_ID: &str = "photo-overlay";
pub const PHOTO_IMAGE_ID: &str = "photo-image";
pub const PHOTO_CLOSE_ID: &str = "photo-close";

pub const DEBUG_OVERLAY_ID: &str = "debug-overlay";
pub const DEBUG_LABEL_ID: &str = "debug-label";

pub const HIDDEN_CLASS: &str = "hidden";

// Gesture model and runtime
pub const GESTURE_MODEL_URL: &str = "https://storage.googleapis.com/mediapipe-models/gesture_recognizer/gesture_recognizer/float16/1/gesture_recognizer.task";
pub const VISION_WASM_BASE: &str = "https://cdn.jsdelivr.net/npm/@mediapipe/tasks-vision@0.10.14/wasm";

/// Photos shown on pinch, served next to `index.html`.
pub const PHOTO_URLS: &[&str] = &[
    "photos/01.jpg",
    "photos/02.jpg",
    "photos/03.jpg",
    "photos/04.jpg",
    "photos/05.jpg",
    "photos/06.jpg",
];

// Frame timing
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp after tab switches

// Clear colour (linear)
pub const CLEAR_RGB: [f64; 3] = [0.005, 0.012, 0.01];
