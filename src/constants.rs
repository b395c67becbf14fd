use glam::Vec3;

// Scene-side tuning constants. These express intended behavior and keep
// magic numbers out of the wiring code; the camera values are assembled into
// an explicit `Camera` at startup.

// Camera placement: slightly above and in front of the key, looking at the
// top of the cap.
pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 1.15, 2.4);
pub const CAMERA_TARGET: Vec3 = Vec3::new(0.0, 0.18, 0.0);
pub const CAMERA_FOVY: f32 = std::f32::consts::FRAC_PI_4;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Keycap rest transform (the model is authored sitting on the origin)
pub const KEY_REST_POSITION: Vec3 = Vec3::ZERO;

// Contact shadow at rest: a flattened quad just above the ground plane
pub const SHADOW_REST_POSITION: Vec3 = Vec3::new(0.0, 0.003, 0.0);
pub const SHADOW_REST_SCALE: Vec3 = Vec3::new(1.35, 1.0, 1.35);
pub const SHADOW_REST_OPACITY: f32 = 0.35;

// Picking
pub const PICK_RADIUS_PADDING: f32 = 1.15; // widen the model's bounding sphere
pub const PICK_FALLBACK_RADIUS: f32 = 1.0; // used until the model is measured

// Lighting and backdrop
pub const LIGHT_DIR: Vec3 = Vec3::new(-0.45, -1.0, -0.35);
pub const AMBIENT_LEVEL: f32 = 0.30;
pub const CLEAR_COLOR: [f64; 4] = [0.03, 0.04, 0.08, 1.0];

// Asset locations
pub const KEY_MODEL_URL: &str = "assets/keycap.obj";
pub const CLICK_SOUND_URL: &str = "assets/click.ogg";

// DOM element ids
pub const CANVAS_ID: &str = "app-canvas";
pub const COUNTER_ID: &str = "click-counter";
pub const HINT_ID: &str = "finish-hint";
pub const LOADING_ID: &str = "loading-overlay";
