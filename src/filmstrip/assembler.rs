//! Build the annotated frame sequence for one filmstrip.

use crate::correlator::{shifts_through, ShiftFragment, ShiftPass};
use crate::parser::schema::{LayoutShift, Screenshot};
use crate::utils::config::MICROS_PER_MILLI;
use log::debug;

/// Which frames a filmstrip keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilmstripPolicy {
    /// Only frames with at least one shifted element
    Shorten,
    /// Every frame after navigation
    Full,
}

/// A screenshot with the shifts attributed to it
#[derive(Debug, Clone, PartialEq)]
pub struct FilmFrame<'a> {
    pub ts: i64,

    /// Base64 image payload, borrowed from the ingested trace
    pub image: &'a str,

    /// Drawn first, so new overlays end up on top
    pub old: ShiftFragment,
    pub new: ShiftFragment,

    /// Milliseconds since the navigation reference, truncated
    pub elapsed_ms: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filmstrip<'a> {
    pub policy: FilmstripPolicy,
    pub frames: Vec<FilmFrame<'a>>,
}

/// Walk consecutive screenshot pairs and attribute shifts to each
///
/// **Public** - main entry point for the assembler
///
/// For each pair `(current, next)` the old sweep is bounded by `next.ts`
/// and the new sweep by `current.ts`. Screenshots taken before
/// `navigation_ts` are skipped without moving either cursor. The last
/// screenshot never starts an interval, so `n` screenshots give at most
/// `n - 1` frames.
///
/// # Arguments
/// * `screenshots` - Sorted screenshots
/// * `shifts` - Sorted layout shifts
/// * `navigation_ts` - Reference timestamp for elapsed-time labels
/// * `policy` - Which frames to keep
pub fn assemble_filmstrip<'a>(
    screenshots: &'a [Screenshot],
    shifts: &[LayoutShift],
    navigation_ts: i64,
    policy: FilmstripPolicy,
) -> Filmstrip<'a> {
    let mut old_cursor = 0;
    let mut new_cursor = 0;
    let mut frames = Vec::new();

    for pair in screenshots.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        if current.ts < navigation_ts {
            continue;
        }

        let old = shifts_through(shifts, old_cursor, next.ts, ShiftPass::Old);
        let new = shifts_through(shifts, new_cursor, current.ts, ShiftPass::New);
        old_cursor = old.cursor;
        new_cursor = new.cursor;

        if policy == FilmstripPolicy::Shorten && !old.have_data && !new.have_data {
            continue;
        }

        frames.push(FilmFrame {
            ts: current.ts,
            image: &current.snapshot,
            old: old.fragment,
            new: new.fragment,
            elapsed_ms: current.ts.saturating_sub(navigation_ts) / MICROS_PER_MILLI,
        });
    }

    debug!(
        "{:?} filmstrip: {} of {} screenshots kept",
        policy,
        frames.len(),
        screenshots.len()
    );

    Filmstrip { policy, frames }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlator::Overlay;
    use crate::parser::schema::{ImpactedNode, LayoutShiftData, Rect};

    fn screenshot(ts: i64) -> Screenshot {
        Screenshot {
            ts,
            snapshot: format!("IMG{}", ts),
        }
    }

    fn moving_shift(ts: i64) -> LayoutShift {
        LayoutShift {
            ts,
            data: LayoutShiftData {
                score: 0.1,
                impacted_nodes: vec![ImpactedNode {
                    old_rect: Rect::new(0, 0, 100, 50),
                    new_rect: Rect::new(0, 60, 100, 50),
                }],
                region_rects: vec![],
            },
        }
    }

    #[test]
    fn test_elapsed_is_truncated_milliseconds() {
        let screenshots = vec![screenshot(1_000), screenshot(3_999), screenshot(9_000)];
        let strip = assemble_filmstrip(&screenshots, &[], 1_000, FilmstripPolicy::Full);

        let elapsed: Vec<i64> = strip.frames.iter().map(|f| f.elapsed_ms).collect();
        assert_eq!(elapsed, vec![0, 2]);
    }

    #[test]
    fn test_pre_navigation_frames_are_skipped() {
        let screenshots = vec![screenshot(100), screenshot(200), screenshot(300)];
        let strip = assemble_filmstrip(&screenshots, &[], 150, FilmstripPolicy::Full);

        assert_eq!(strip.frames.len(), 1);
        assert_eq!(strip.frames[0].ts, 200);
        assert_eq!(strip.frames[0].image, "IMG200");
    }

    #[test]
    fn test_skipped_frames_do_not_advance_cursors() {
        // The shift at 120 lands before navigation; it is picked up by the
        // first retained frame instead of being dropped
        let screenshots = vec![screenshot(100), screenshot(200), screenshot(300)];
        let shifts = vec![moving_shift(120)];
        let strip = assemble_filmstrip(&screenshots, &shifts, 150, FilmstripPolicy::Shorten);

        assert_eq!(strip.frames.len(), 1);
        assert_eq!(strip.frames[0].old.node_count(), 1);
        assert_eq!(strip.frames[0].new.node_count(), 1);
    }

    #[test]
    fn test_shift_on_screenshot_timestamp_is_new_for_that_frame() {
        let screenshots = vec![screenshot(1000), screenshot(2000), screenshot(3000)];
        let shifts = vec![moving_shift(2000)];
        let strip = assemble_filmstrip(&screenshots, &shifts, 1000, FilmstripPolicy::Full);

        // Old sweep sees it for the (1000, 2000) pair
        assert_eq!(strip.frames[0].old.node_count(), 1);
        assert_eq!(strip.frames[0].new.node_count(), 0);
        // New sweep sees it for the frame stamped 2000
        assert_eq!(strip.frames[1].ts, 2000);
        assert_eq!(strip.frames[1].old.node_count(), 0);
        assert!(matches!(
            strip.frames[1].new.overlays[0],
            Overlay::Node {
                pass: ShiftPass::New,
                ..
            }
        ));
    }

    #[test]
    fn test_elapsed_saturates_on_extreme_timestamps() {
        let screenshots = vec![screenshot(i64::MAX - 1), screenshot(i64::MAX)];
        let strip = assemble_filmstrip(&screenshots, &[], i64::MIN, FilmstripPolicy::Full);

        assert_eq!(strip.frames.len(), 1);
        assert_eq!(strip.frames[0].elapsed_ms, i64::MAX / MICROS_PER_MILLI);
    }

    #[test]
    fn test_single_screenshot_has_no_frames() {
        let screenshots = vec![screenshot(100)];
        let strip = assemble_filmstrip(&screenshots, &[], 100, FilmstripPolicy::Full);
        assert!(strip.frames.is_empty());
    }
}
