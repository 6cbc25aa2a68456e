/// Width of the sidebar panel in pixels.
pub const SIDEBAR_WIDTH: f32 = 200.0;

/// Lowest zoom target reachable from the slider, in pixels per meter.
pub const ZOOM_MIN: f64 = 1.0;

/// Highest zoom target reachable from the slider.
pub const ZOOM_MAX: f64 = 1000.0;

/// Storage key for the persisted layer toggles.
pub const LAYERS_KEY: &str = "layers";

/// Screen-space radius of body center and contact markers.
pub const MARKER_RADIUS: f32 = 3.0;

/// Half-length of an axis tick mark in pixels.
pub const TICK_HALF_LENGTH: f32 = 4.0;

/// Grid lines are skipped when closer together than this many pixels.
pub const GRID_MIN_SPACING: f64 = 8.0;
