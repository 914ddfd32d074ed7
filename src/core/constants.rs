//! Core constants derived from slippy-map conventions.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: f64 = 256.0;

/// Latitude where the Web Mercator tile grid ends (atan(sinh(PI)) in degrees).
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Reference zoom used to derive the absolute projection bounds.
pub const ABSOLUTE_BOUNDS_ZOOM: i32 = 10;

/// Default zoom limits.
pub const DEFAULT_MIN_ZOOM: u8 = 1;
pub const DEFAULT_MAX_ZOOM: u8 = 18;

/// Duration of programmatic and wheel zoom animations.
pub const ANIMATION_TIME_MS: u64 = 300;

/// Do not animate a zoom if the delta exceeds this threshold.
pub const ZOOM_ANIMATION_THRESHOLD: f64 = 4.0;

/// Do not animate a move that travels further than this many screens.
pub const DEFAULT_ANIMATE_MAX_SCREENS: f64 = 5.0;

/// Wheel delta (in pixels) that corresponds to one zoom level.
pub const SCROLL_PIXELS_FOR_ZOOM_LEVEL: f64 = 150.0;

/// Pointer travel (in pixels) still considered a click.
pub const CLICK_TOLERANCE: f64 = 2.0;

/// Longest press still considered a click.
pub const CLICK_TIMEOUT_MS: u64 = 300;

/// Maximum gap between two clicks of a double click.
pub const DOUBLE_CLICK_DELAY_MS: u64 = 300;

/// Maximum distance between two clicks of a double click.
pub const DOUBLE_CLICK_DISTANCE: f64 = 20.0;

/// Only pointer motion within this window feeds the throw velocity.
pub const THROW_SAMPLE_WINDOW_MS: u64 = 100;

/// Minimum pointer travel within the sample window that starts a throw.
pub const MIN_DRAG_FOR_THROW: f64 = 40.0;

/// Time a throw across the full viewport diagonal takes.
pub const DIAGONAL_THROW_TIME_MS: u64 = 1500;

/// Emulated mouse events are ignored for this long after the last touch.
pub const TOUCH_MOUSE_SUPPRESSION_MS: u64 = 500;
