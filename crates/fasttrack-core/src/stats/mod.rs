//! Aggregation engine.
//!
//! Pure read operations over the history ledger plus the in-progress
//! session: summary statistics and a rolling per-day totals series that
//! splits fasts across local midnight boundaries.

mod daily;
mod summary;

pub use daily::{daily_totals, DayTotal};
pub use summary::{summarize, FastStats};

/// Round hours to 2 decimal places, the precision everything user-facing
/// in this crate reports.
pub(crate) fn round2(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}
