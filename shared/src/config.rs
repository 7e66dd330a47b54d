// Viewer transforms (map and tour share the same policy)
pub const ZOOM_IN_FACTOR: f64 = 1.2;
pub const ZOOM_OUT_FACTOR: f64 = 0.8;
pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 3.0;
pub const LOOK_SENSITIVITY: f64 = 0.5;
pub const MAX_PITCH_DEG: f64 = 90.0;

// Hotspot overlay placement: percentage offset per degree
pub const HOTSPOT_PITCH_FACTOR: f64 = 0.5;
pub const HOTSPOT_YAW_FACTOR: f64 = 0.3;

// Simulated audio guide
pub const AUDIO_TICK_MS: u32 = 100;
pub const AUDIO_TRACK_SECS: f64 = 30.0;
pub const TRANSCRIPT_WINDOW_SECS: f64 = 5.0;

// Deferred UI work
pub const SCENE_LOAD_DELAY_MS: u32 = 1_000;
pub const NOTIFICATION_DISMISS_MS: u32 = 3_000;
pub const NOTIFICATION_EXIT_MS: u32 = 300;
pub const MODAL_EXIT_MS: u32 = 300;
pub const SIGNUP_DELAY_MS: u32 = 1_500;
pub const SIGNUP_RESET_MS: u32 = 2_000;

/// Scroll offset (px) past which the navbar switches to its compact style.
pub const NAVBAR_COMPACT_SCROLL_Y: f64 = 100.0;
/// Fraction of a section that must be visible before it fades in.
pub const REVEAL_THRESHOLD: f64 = 0.1;

pub const MAP_CONTAINER_ID: &str = "interactive-map";
pub const TOUR_CONTAINER_ID: &str = "tour-viewer";
pub const CALENDAR_CONTAINER_ID: &str = "cultural-calendar";
