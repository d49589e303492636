//! Configuration and constants for the report generator.

/// Ratio between filmstrip image pixels and viewport coordinates.
///
/// Derived from the "Moto G4" DevTools preset: a 360x640 viewport produces
/// 280x498 screenshots. Traces recorded with another device preset will
/// draw overlays slightly off.
pub const SCREENSHOT_TO_VIEWPORT_SCALE: f64 = 0.778;

// Trace event names we care about. Everything else is ignored.
pub const SCREENSHOT_EVENT: &str = "Screenshot";
pub const LAYOUT_SHIFT_EVENT: &str = "LayoutShift";
pub const NAVIGATION_START_EVENT: &str = "navigationStart";

/// Document URLs must start with this to count as a real page load
/// (rules out `about:blank` and friends).
pub const MAIN_FRAME_URL_PREFIX: &str = "http";

/// Trace timestamps are in microseconds, labels are in milliseconds
pub const MICROS_PER_MILLI: i64 = 1000;

// Envelope keys used when the trace is saved as an object instead of a bare array
pub const TRACE_EVENT_FIELD_NAMES: &[&str] = &["traceEvents"];

/// MIME type used for the inline screenshot data URIs
pub const SCREENSHOT_MIME: &str = "image/png";

/// Scale a viewport coordinate into filmstrip image pixels
///
/// Truncates toward zero, so `scale(100) == 77`.
pub fn scale(value: i64) -> i64 {
    (value as f64 * SCREENSHOT_TO_VIEWPORT_SCALE) as i64
}
