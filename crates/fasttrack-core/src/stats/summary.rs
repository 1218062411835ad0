//! Summary statistics over completed fasts.

use serde::{Deserialize, Serialize};

use super::round2;
use crate::history::HistoryEntry;

/// Aggregate statistics for the whole ledger.
///
/// Only completed entries count -- an in-progress fast contributes nothing
/// until it is ended and recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FastStats {
    /// Number of completed fasts.
    pub total_fasts: usize,
    /// Longest realized duration in hours, 0 on an empty ledger.
    pub longest_hours: f64,
    /// Mean realized duration in hours, 0 on an empty ledger.
    pub average_hours: f64,
}

impl FastStats {
    pub fn empty() -> Self {
        Self {
            total_fasts: 0,
            longest_hours: 0.0,
            average_hours: 0.0,
        }
    }
}

/// Compute [`FastStats`] over the ledger. Entry order is irrelevant.
pub fn summarize(history: &[HistoryEntry]) -> FastStats {
    if history.is_empty() {
        return FastStats::empty();
    }
    let total_fasts = history.len();
    let mut longest = 0.0f64;
    let mut sum = 0.0f64;
    for entry in history {
        longest = longest.max(entry.actual_hours);
        sum += entry.actual_hours;
    }
    FastStats {
        total_fasts,
        longest_hours: round2(longest),
        average_hours: round2(sum / total_fasts as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn entry(hours: i64) -> HistoryEntry {
        let start = Utc::now();
        HistoryEntry::close(start, start + Duration::hours(hours), 16.0, start)
    }

    #[test]
    fn empty_ledger_is_all_zeros() {
        assert_eq!(summarize(&[]), FastStats::empty());
    }

    #[test]
    fn longest_and_average_over_two_entries() {
        let stats = summarize(&[entry(10), entry(20)]);
        assert_eq!(stats.total_fasts, 2);
        assert_eq!(stats.longest_hours, 20.0);
        assert_eq!(stats.average_hours, 15.0);
    }

    #[test]
    fn average_rounds_to_two_decimals() {
        let stats = summarize(&[entry(10), entry(11), entry(11)]);
        // 32 / 3 = 10.666..
        assert_eq!(stats.average_hours, 10.67);
    }
}
