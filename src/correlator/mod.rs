//! Correlation of layout shifts with screenshot intervals.

pub mod shift_window;

pub use shift_window::{shifts_through, Overlay, ShiftFragment, ShiftPass, ShiftWindow};
