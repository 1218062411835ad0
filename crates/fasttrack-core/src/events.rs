//! Domain events.
//!
//! Every mutating tracker operation produces an Event. The CLI prints them;
//! a GUI layer would poll or subscribe.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::history::HistoryEntry;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    FastStarted {
        planned_hours: f64,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    FastExtended {
        added_hours: f64,
        end_time: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    FastEnded {
        entry: HistoryEntry,
        at: DateTime<Utc>,
    },
    HistoryCleared {
        at: DateTime<Utc>,
    },
    /// Full wipe: active fast discarded, history emptied, defaults restored.
    TrackerReset {
        at: DateTime<Utc>,
    },
}
