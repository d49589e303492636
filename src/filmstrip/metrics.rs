//! Summary statistics over the layout shifts of a trace.

use crate::parser::schema::LayoutShift;

/// Shift statistics
///
/// **Public** - returned from calculate_shift_stats
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShiftStats {
    /// Number of LayoutShift events
    pub shift_count: usize,

    /// Impacted nodes across all shifts
    pub impacted_node_count: usize,

    /// Sum of all shift scores
    pub cumulative_score: f64,

    /// Largest single shift score
    pub max_score: f64,

    /// Frames kept in the shifts-only filmstrip
    pub shift_frames: usize,

    /// Frames in the full filmstrip
    pub full_frames: usize,
}

impl ShiftStats {
    /// One-line human readable summary
    pub fn summary(&self) -> String {
        format!(
            "{} shifts, {} impacted nodes, cumulative score {:.6}, max score {:.6}, \
             {} of {} frames with shifts",
            self.shift_count,
            self.impacted_node_count,
            self.cumulative_score,
            self.max_score,
            self.shift_frames,
            self.full_frames
        )
    }
}

/// Calculate statistics over all layout shifts
///
/// Unlike the filmstrips this counts every shift, including ones that
/// happened before the navigation reference. Frame counts are left at zero
/// and filled in by [`super::build_report`].
pub fn calculate_shift_stats(shifts: &[LayoutShift]) -> ShiftStats {
    if shifts.is_empty() {
        return ShiftStats::default();
    }

    ShiftStats {
        shift_count: shifts.len(),
        impacted_node_count: shifts.iter().map(|s| s.data.impacted_nodes.len()).sum(),
        cumulative_score: shifts.iter().map(|s| s.data.score).sum(),
        max_score: shifts.iter().map(|s| s.data.score).fold(0.0, f64::max),
        ..ShiftStats::default()
    }
}
