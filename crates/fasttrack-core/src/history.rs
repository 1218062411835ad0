//! Completed-fast history.
//!
//! The ledger is append-only and newest-first; entries are never mutated
//! after creation. Order matters for display, not for aggregation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stats::round2;

/// One completed fast.
///
/// Serialized in camelCase because entries live inside the persisted
/// snapshot blob, whose shape predates this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// When the fast actually began.
    pub start: DateTime<Utc>,
    /// When the fast actually ended.
    pub end: DateTime<Utc>,
    /// The window chosen at start; may differ from what was realized.
    pub planned_hours: f64,
    /// Realized duration in hours, clamped to >= 0, 2 decimal places.
    pub actual_hours: f64,
    /// When the entry was recorded.
    pub completed_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Close out a fast into an immutable entry.
    ///
    /// `actual_hours` is derived from the realized bounds; a clock that ran
    /// backwards yields 0, never a negative duration.
    pub fn close(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        planned_hours: f64,
        completed_at: DateTime<Utc>,
    ) -> Self {
        let ms = (end - start).num_milliseconds().max(0);
        Self {
            start,
            end,
            planned_hours,
            actual_hours: round2(ms as f64 / 3_600_000.0),
            completed_at,
        }
    }
}

/// Newest-first ledger of completed fasts.
#[derive(Debug, Clone, Default)]
pub struct HistoryLedger {
    entries: Vec<HistoryEntry>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the ledger from persisted entries, preserving their order.
    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }

    /// Prepend an entry. The only way anything gets in.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
