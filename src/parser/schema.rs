//! Typed records extracted from a DevTools performance trace.
//!
//! Everything here is built once by the ingestor and then only read.

use serde::Deserialize;

/// A bounding box in viewport coordinates
///
/// DevTools records boxes as `[x, y, width, height]`. Components may be
/// integers or floats in the JSON; both are truncated to integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "[f64; 4]")]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Rect {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self { x, y, width, height }
    }
}

impl From<[f64; 4]> for Rect {
    fn from(raw: [f64; 4]) -> Self {
        Self::new(raw[0] as i64, raw[1] as i64, raw[2] as i64, raw[3] as i64)
    }
}

/// A DOM element that moved during a layout shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ImpactedNode {
    /// Box immediately before the shift
    pub old_rect: Rect,

    /// Box immediately after the shift
    pub new_rect: Rect,
}

/// Payload of a LayoutShift event (`args.data`)
///
/// Missing fields default so that partial payloads still advance the
/// correlator and contribute to the score summary.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct LayoutShiftData {
    #[serde(default)]
    pub score: f64,

    #[serde(default)]
    pub impacted_nodes: Vec<ImpactedNode>,

    #[serde(default)]
    pub region_rects: Vec<Rect>,
}

/// A filmstrip screenshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screenshot {
    /// Monotonic trace clock, microseconds
    pub ts: i64,

    /// Base64-encoded image, kept opaque
    pub snapshot: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutShift {
    pub ts: i64,
    pub data: LayoutShiftData,
}

/// The navigation every elapsed-time label is measured from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationReference {
    pub ts: i64,

    /// Page URL, absent when no main-frame navigation was recorded
    pub url: Option<String>,
}

/// Output of the ingestor: both streams sorted by timestamp
#[derive(Debug, Clone)]
pub struct IngestedTrace {
    pub screenshots: Vec<Screenshot>,
    pub shifts: Vec<LayoutShift>,
    pub navigation: NavigationReference,
}
