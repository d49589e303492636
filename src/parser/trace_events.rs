//! Trace ingestion.
//!
//! Buckets the flat DevTools event list into screenshots, layout shifts and
//! the navigation reference. Events are dispatched once, by `name`, into
//! [`TraceEvent`]; everything downstream works on the typed records.

use super::schema::{
    IngestedTrace, LayoutShift, LayoutShiftData, NavigationReference, Screenshot,
};
use crate::utils::config::{
    LAYOUT_SHIFT_EVENT, MAIN_FRAME_URL_PREFIX, NAVIGATION_START_EVENT, SCREENSHOT_EVENT,
    TRACE_EVENT_FIELD_NAMES,
};
use crate::utils::error::ParseError;
use log::{debug, info, warn};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A `navigationStart` event, reduced to the fields we inspect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationStart {
    pub ts: i64,
    pub is_loading_main_frame: bool,
    pub document_url: Option<String>,
}

impl NavigationStart {
    /// URL of the page if this navigation loaded the main frame over HTTP(S)
    pub fn main_frame_url(&self) -> Option<&str> {
        main_frame_url(self.is_loading_main_frame, self.document_url.as_deref())
    }
}

fn main_frame_url(is_loading_main_frame: bool, document_url: Option<&str>) -> Option<&str> {
    if !is_loading_main_frame {
        return None;
    }
    document_url.filter(|url| url.starts_with(MAIN_FRAME_URL_PREFIX))
}

/// One trace event, classified by its `name`
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    Screenshot(Screenshot),
    LayoutShift(LayoutShift),
    NavigationStart(NavigationStart),
    /// Anything else, including events without a name
    Other,
}

impl TraceEvent {
    /// Classify a raw JSON event
    ///
    /// # Errors
    /// * `ParseError::MissingField` - a Screenshot without its image, or a
    ///   Screenshot, LayoutShift or main-frame navigationStart without a
    ///   timestamp
    pub fn from_value(raw: &Value) -> Result<Self, ParseError> {
        let Some(name) = raw.get("name").and_then(Value::as_str) else {
            return Ok(TraceEvent::Other);
        };

        match name {
            SCREENSHOT_EVENT => parse_screenshot(raw).map(TraceEvent::Screenshot),
            LAYOUT_SHIFT_EVENT => Ok(parse_layout_shift(raw)?
                .map(TraceEvent::LayoutShift)
                .unwrap_or(TraceEvent::Other)),
            NAVIGATION_START_EVENT => Ok(parse_navigation_start(raw)?
                .map(TraceEvent::NavigationStart)
                .unwrap_or(TraceEvent::Other)),
            _ => Ok(TraceEvent::Other),
        }
    }
}

/// Read and decode a trace file
///
/// # Errors
/// * `ParseError::Io` - file cannot be opened
/// * `ParseError::JsonError` - file is not valid JSON
pub fn read_trace_file(path: impl AsRef<Path>) -> Result<Value, ParseError> {
    let path = path.as_ref();
    debug!("Reading trace from: {}", path.display());

    let file = File::open(path)?;
    let raw = serde_json::from_reader(BufReader::new(file))?;
    Ok(raw)
}

/// Ingest a decoded trace
///
/// **Public** - main entry point for parsing
///
/// Accepts either a bare event array or an object wrapping the array
/// under `traceEvents`.
///
/// # Errors
/// * `ParseError::InvalidFormat` - top level is neither shape
/// * `ParseError::MissingField` - see [`TraceEvent::from_value`]
/// * `ParseError::NoScreenshots` - nothing to build a filmstrip from
pub fn parse_trace(raw_trace: &Value) -> Result<IngestedTrace, ParseError> {
    let events = trace_event_array(raw_trace)?;
    ingest_events(events)
}

/// Locate the event array inside the decoded JSON
///
/// **Private** - internal helper for parse_trace
fn trace_event_array(raw_trace: &Value) -> Result<&[Value], ParseError> {
    match raw_trace {
        Value::Array(events) => Ok(events.as_slice()),
        Value::Object(obj) => {
            debug!("Trace is object format, looking for event array");
            TRACE_EVENT_FIELD_NAMES
                .iter()
                .find_map(|field| obj.get(*field).and_then(Value::as_array))
                .map(Vec::as_slice)
                .ok_or_else(|| {
                    ParseError::InvalidFormat("Trace object has no traceEvents array".to_string())
                })
        }
        _ => Err(ParseError::InvalidFormat(
            "Trace must be a JSON array or an object with traceEvents".to_string(),
        )),
    }
}

/// Bucket events into sorted streams and pick the navigation reference
///
/// **Public** - usable directly when the caller already has the event list
pub fn ingest_events(events: &[Value]) -> Result<IngestedTrace, ParseError> {
    let mut screenshots = Vec::new();
    let mut shifts = Vec::new();
    let mut navigation: Option<NavigationReference> = None;

    for raw in events {
        match TraceEvent::from_value(raw)? {
            TraceEvent::Screenshot(screenshot) => screenshots.push(screenshot),
            TraceEvent::LayoutShift(shift) => shifts.push(shift),
            TraceEvent::NavigationStart(nav) => {
                // Later main-frame navigations replace earlier ones
                if let Some(url) = nav.main_frame_url() {
                    debug!("Main-frame navigation at {} to {}", nav.ts, url);
                    navigation = Some(NavigationReference {
                        ts: nav.ts,
                        url: Some(url.to_string()),
                    });
                }
            }
            TraceEvent::Other => {}
        }
    }

    // Stable: equal timestamps keep trace order
    screenshots.sort_by_key(|s| s.ts);
    shifts.sort_by_key(|s| s.ts);

    let first_screenshot_ts = screenshots
        .first()
        .map(|s| s.ts)
        .ok_or(ParseError::NoScreenshots)?;
    let navigation = navigation.unwrap_or_else(|| {
        debug!("No main-frame navigationStart, using first screenshot as reference");
        NavigationReference {
            ts: first_screenshot_ts,
            url: None,
        }
    });

    info!(
        "Ingested {} screenshots and {} layout shifts from {} events",
        screenshots.len(),
        shifts.len(),
        events.len()
    );

    Ok(IngestedTrace {
        screenshots,
        shifts,
        navigation,
    })
}

/// **Private** - Screenshot payload is mandatory
fn parse_screenshot(raw: &Value) -> Result<Screenshot, ParseError> {
    let ts = required_timestamp(raw, SCREENSHOT_EVENT)?;
    let snapshot = raw
        .get("args")
        .and_then(|args| args.get("snapshot"))
        .and_then(Value::as_str)
        .ok_or_else(|| missing_field(SCREENSHOT_EVENT, "args.snapshot"))?;

    Ok(Screenshot {
        ts,
        snapshot: snapshot.to_string(),
    })
}

/// **Private** - returns `None` for payloads we cannot interpret
fn parse_layout_shift(raw: &Value) -> Result<Option<LayoutShift>, ParseError> {
    let ts = required_timestamp(raw, LAYOUT_SHIFT_EVENT)?;

    let data = match raw.get("args").and_then(|args| args.get("data")) {
        Some(data) => match serde_json::from_value::<LayoutShiftData>(data.clone()) {
            Ok(data) => data,
            Err(e) => {
                warn!("Skipping malformed LayoutShift at {}: {}", ts, e);
                return Ok(None);
            }
        },
        None => LayoutShiftData::default(),
    };

    Ok(Some(LayoutShift { ts, data }))
}

/// **Private** - only main-frame HTTP(S) navigations are kept; anything
/// else is dropped before its timestamp is looked at
fn parse_navigation_start(raw: &Value) -> Result<Option<NavigationStart>, ParseError> {
    let data = raw.get("args").and_then(|args| args.get("data"));

    let is_loading_main_frame = data
        .and_then(|d| d.get("isLoadingMainFrame"))
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let document_url = data
        .and_then(|d| d.get("documentLoaderURL"))
        .and_then(Value::as_str);

    let Some(url) = main_frame_url(is_loading_main_frame, document_url) else {
        return Ok(None);
    };
    let ts = required_timestamp(raw, NAVIGATION_START_EVENT)?;

    Ok(Some(NavigationStart {
        ts,
        is_loading_main_frame,
        document_url: Some(url.to_string()),
    }))
}

/// Read `ts`, accepting integers or floats (truncated)
///
/// **Private** - internal utility
fn required_timestamp(raw: &Value, event: &str) -> Result<i64, ParseError> {
    let ts = raw.get("ts").ok_or_else(|| missing_field(event, "ts"))?;
    ts.as_i64()
        .or_else(|| ts.as_f64().map(|f| f as i64))
        .ok_or_else(|| ParseError::InvalidFormat(format!("{} has non-numeric ts: {}", event, ts)))
}

fn missing_field(event: &str, field: &str) -> ParseError {
    ParseError::MissingField {
        event: event.to_string(),
        field: field.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_without_name_is_other() {
        let event = TraceEvent::from_value(&json!({"ts": 5, "ph": "X"})).unwrap();
        assert_eq!(event, TraceEvent::Other);
    }

    #[test]
    fn test_unknown_event_is_other() {
        let event = TraceEvent::from_value(&json!({"name": "Paint", "ts": 5})).unwrap();
        assert_eq!(event, TraceEvent::Other);
    }

    #[test]
    fn test_screenshot_missing_snapshot_fails() {
        let result = TraceEvent::from_value(&json!({"name": "Screenshot", "ts": 5, "args": {}}));
        assert!(matches!(result, Err(ParseError::MissingField { .. })));
    }

    #[test]
    fn test_float_timestamp_truncates() {
        let event = TraceEvent::from_value(&json!({
            "name": "Screenshot",
            "ts": 1500.75,
            "args": {"snapshot": "AAAA"}
        }))
        .unwrap();

        match event {
            TraceEvent::Screenshot(s) => assert_eq!(s.ts, 1500),
            other => panic!("expected screenshot, got {:?}", other),
        }
    }

    #[test]
    fn test_layout_shift_without_data_defaults() {
        let event = TraceEvent::from_value(&json!({"name": "LayoutShift", "ts": 7})).unwrap();
        match event {
            TraceEvent::LayoutShift(shift) => {
                assert_eq!(shift.ts, 7);
                assert!(shift.data.impacted_nodes.is_empty());
            }
            other => panic!("expected layout shift, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_layout_shift_is_skipped() {
        let event = TraceEvent::from_value(&json!({
            "name": "LayoutShift",
            "ts": 7,
            "args": {"data": {"impacted_nodes": [{"old_rect": [1, 2], "new_rect": [1, 2, 3, 4]}]}}
        }))
        .unwrap();
        assert_eq!(event, TraceEvent::Other);
    }

    #[test]
    fn test_main_frame_url_requires_http_and_main_frame() {
        let nav = NavigationStart {
            ts: 1,
            is_loading_main_frame: true,
            document_url: Some("about:blank".to_string()),
        };
        assert_eq!(nav.main_frame_url(), None);

        let nav = NavigationStart {
            ts: 1,
            is_loading_main_frame: false,
            document_url: Some("https://example.com/".to_string()),
        };
        assert_eq!(nav.main_frame_url(), None);

        let nav = NavigationStart {
            ts: 1,
            is_loading_main_frame: true,
            document_url: Some("https://example.com/".to_string()),
        };
        assert_eq!(nav.main_frame_url(), Some("https://example.com/"));
    }

    #[test]
    fn test_subframe_navigation_without_ts_is_other() {
        let event = TraceEvent::from_value(&json!({
            "name": "navigationStart",
            "args": {"data": {"isLoadingMainFrame": false, "documentLoaderURL": ""}}
        }))
        .unwrap();
        assert_eq!(event, TraceEvent::Other);
    }

    #[test]
    fn test_main_frame_navigation_without_ts_fails() {
        let result = TraceEvent::from_value(&json!({
            "name": "navigationStart",
            "args": {"data": {"isLoadingMainFrame": true, "documentLoaderURL": "https://example.com/"}}
        }));
        assert!(matches!(result, Err(ParseError::MissingField { .. })));
    }

    #[test]
    fn test_trace_event_array_rejects_scalars() {
        let result = parse_trace(&json!(42));
        assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_trace_event_array_rejects_object_without_events() {
        let result = parse_trace(&json!({"metadata": {}}));
        assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_empty_trace_has_no_screenshots() {
        let result = parse_trace(&json!([]));
        assert!(matches!(result, Err(ParseError::NoScreenshots)));
    }
}
