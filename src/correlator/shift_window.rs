//! Attribute layout shifts to screenshot intervals.
//!
//! Two sweeps run over the same sorted shift list, one per [`ShiftPass`].
//! Each sweep owns a cursor that only moves forward; callers thread the
//! cursor returned by one call into the next. A whole filmstrip therefore
//! costs O(shifts + screenshots).

use crate::parser::schema::{ImpactedNode, LayoutShift, Rect};
use log::debug;

/// Which side of a shift a sweep draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftPass {
    /// Pre-shift boxes, bounded by the next screenshot
    Old,
    /// Post-shift boxes, region highlights and scores, bounded by the current screenshot
    New,
}

impl ShiftPass {
    /// The box of `node` this pass draws
    pub fn rect_of(self, node: &ImpactedNode) -> Rect {
        match self {
            ShiftPass::Old => node.old_rect,
            ShiftPass::New => node.new_rect,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShiftPass::Old => "old",
            ShiftPass::New => "new",
        }
    }
}

/// One thing to draw on top of a screenshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// Screen area affected by a shift
    Region(Rect),
    /// A moved element; the pass decides which of its boxes is drawn
    Node { pass: ShiftPass, node: ImpactedNode },
}

/// Overlays produced by one window
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShiftFragment {
    /// In shift order; within a shift, regions precede nodes
    pub overlays: Vec<Overlay>,

    /// Score of every consumed shift. Only the new pass carries a summary.
    pub scores: Option<Vec<f64>>,
}

impl ShiftFragment {
    /// Number of element boxes in this fragment
    pub fn node_count(&self) -> usize {
        self.overlays
            .iter()
            .filter(|o| matches!(o, Overlay::Node { .. }))
            .count()
    }
}

/// Result of advancing one sweep
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftWindow {
    /// Index of the first shift not yet consumed
    pub cursor: usize,
    pub fragment: ShiftFragment,
    /// At least one impacted node was drawn
    pub have_data: bool,
}

/// Consume every shift at or before `bound`, starting at `cursor`
///
/// **Public** - core of the correlator
///
/// The comparison is inclusive: a shift stamped exactly at `bound` belongs
/// to this window. Shifts without impacted nodes still advance the cursor
/// and still appear in the score summary, but do not set `have_data`.
///
/// # Arguments
/// * `shifts` - Layout shifts sorted by timestamp
/// * `cursor` - Cursor returned by the previous call of this sweep (0 to start)
/// * `bound` - Inclusive upper timestamp
/// * `pass` - Which side of each shift to draw
pub fn shifts_through(
    shifts: &[LayoutShift],
    cursor: usize,
    bound: i64,
    pass: ShiftPass,
) -> ShiftWindow {
    let mut cursor = cursor;
    let mut overlays = Vec::new();
    let mut scores = Vec::new();
    let mut have_data = false;

    while let Some(shift) = shifts.get(cursor).filter(|s| s.ts <= bound) {
        if pass == ShiftPass::New {
            overlays.extend(shift.data.region_rects.iter().copied().map(Overlay::Region));
        }
        for node in &shift.data.impacted_nodes {
            overlays.push(Overlay::Node { pass, node: *node });
            have_data = true;
        }
        scores.push(shift.data.score);
        cursor += 1;
    }

    if !scores.is_empty() {
        debug!(
            "{} pass consumed {} shifts up to {}",
            pass.label(),
            scores.len(),
            bound
        );
    }

    ShiftWindow {
        cursor,
        fragment: ShiftFragment {
            overlays,
            scores: (pass == ShiftPass::New).then_some(scores),
        },
        have_data,
    }
}
