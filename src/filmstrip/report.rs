//! Assemble the complete report model from an ingested trace.

use super::assembler::{assemble_filmstrip, Filmstrip, FilmstripPolicy};
use super::metrics::{calculate_shift_stats, ShiftStats};
use crate::parser::schema::IngestedTrace;
use chrono::Utc;

/// Everything the renderer needs
#[derive(Debug, Clone)]
pub struct Report<'a> {
    /// Page URL for the title, if a main-frame navigation was recorded
    pub site_url: Option<&'a str>,

    pub stats: ShiftStats,

    /// Frames with shifts only ("Layout shifts" section)
    pub shift_strip: Filmstrip<'a>,

    /// Every frame ("Full Filmstrip" section)
    pub full_strip: Filmstrip<'a>,

    /// RFC 3339 generation time
    pub generated_at: String,
}

/// Build both filmstrips and the statistics for a trace
///
/// The two strips are assembled independently; neither shares cursor
/// state with the other.
pub fn build_report(trace: &IngestedTrace) -> Report<'_> {
    let navigation_ts = trace.navigation.ts;

    let shift_strip = assemble_filmstrip(
        &trace.screenshots,
        &trace.shifts,
        navigation_ts,
        FilmstripPolicy::Shorten,
    );
    let full_strip = assemble_filmstrip(
        &trace.screenshots,
        &trace.shifts,
        navigation_ts,
        FilmstripPolicy::Full,
    );

    let stats = ShiftStats {
        shift_frames: shift_strip.frames.len(),
        full_frames: full_strip.frames.len(),
        ..calculate_shift_stats(&trace.shifts)
    };

    Report {
        site_url: trace.navigation.url.as_deref(),
        stats,
        shift_strip,
        full_strip,
        generated_at: Utc::now().to_rfc3339(),
    }
}
