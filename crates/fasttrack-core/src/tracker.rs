//! The tracker facade.
//!
//! Composes the session state machine, the history ledger, and the
//! aggregation engine behind the operations an outer caller invokes. The
//! store and scheduler are injected capabilities; every call into them is
//! best-effort and wrapped, so external failures never corrupt in-memory
//! state or surface to the caller. Order within each operation is fixed:
//! in-memory transition first, then scheduler choreography, then a full
//! snapshot write. Nothing is ever rolled back.

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::history::{HistoryEntry, HistoryLedger};
use crate::notify::{AlertContent, NotificationHandle, NotificationScheduler};
use crate::session::{ActiveFast, Session, DEFAULT_PLANNED_HOURS};
use crate::stats::{daily_totals, round2, summarize, DayTotal, FastStats};
use crate::storage::{Snapshot, SnapshotStore, STATE_KEY};

/// Read-only view of the tracker for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerStatus {
    pub is_fasting: bool,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub planned_hours: f64,
    /// Hours since start, 0 when idle.
    pub elapsed_hours: f64,
    /// Hours until the planned end, 0 when idle or already past it.
    pub remaining_hours: f64,
}

/// Session lifecycle manager and history aggregation engine.
///
/// Single-threaded cooperative model: each operation runs to completion
/// before any other observes state. Wrap in a mutex before sharing --
/// end-then-record is a read-modify-append sequence that is not safe under
/// interleaving.
pub struct FastTracker<S, N> {
    session: Session,
    ledger: HistoryLedger,
    store: S,
    scheduler: N,
    /// Planned hours remembered between fasts; restored to the default
    /// on reset.
    planned_hours: f64,
    default_hours: f64,
    alert: AlertContent,
}

impl<S: SnapshotStore, N: NotificationScheduler> FastTracker<S, N> {
    /// Load persisted state, falling back to an idle tracker with empty
    /// history on a missing, corrupt, or partially-shaped snapshot. Never
    /// errors to the caller.
    pub fn load(store: S, scheduler: N) -> Self {
        Self::load_with(store, scheduler, DEFAULT_PLANNED_HOURS, AlertContent::default())
    }

    /// [`FastTracker::load`] with a configured default window and alert text.
    pub fn load_with(store: S, scheduler: N, default_hours: f64, alert: AlertContent) -> Self {
        let stored = match store.get(STATE_KEY) {
            Ok(Some(blob)) => {
                let parsed = Snapshot::from_json(&blob);
                if parsed.is_none() {
                    warn!("discarding malformed snapshot under '{STATE_KEY}'");
                }
                parsed
            }
            Ok(None) => None,
            Err(e) => {
                warn!("failed to load snapshot: {e}");
                None
            }
        };
        let snap = stored.unwrap_or_else(|| Snapshot {
            planned_hours: default_hours,
            ..Snapshot::default()
        });

        let session = match (snap.is_fasting, snap.start_time, snap.end_time) {
            (true, Some(start_time), Some(end_time)) => Session::resume(ActiveFast {
                start_time,
                end_time,
                planned_hours: snap.planned_hours,
                handle: snap.notification_handle.clone(),
            }),
            _ => Session::idle(),
        };

        Self {
            session,
            ledger: HistoryLedger::from_entries(snap.history),
            store,
            scheduler,
            planned_hours: snap.planned_hours,
            default_hours,
            alert,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a fast of `hours`, at `start_at` or now.
    ///
    /// Starting while already fasting overwrites the unfinished fast without
    /// recording it. No validation of `start_at` happens here; callers
    /// pre-validate backdated or future starts.
    pub fn start_fast(&mut self, hours: f64, start_at: Option<DateTime<Utc>>) -> Event {
        let start_time = start_at.unwrap_or_else(Utc::now);
        let (end_time, displaced) = self.session.begin(hours, start_time);
        self.planned_hours = hours;

        self.cancel_alert(displaced);
        let handle = self.schedule_alert(end_time);
        self.session.set_handle(handle);

        self.persist();
        Event::FastStarted {
            planned_hours: hours,
            start_time,
            end_time,
            at: Utc::now(),
        }
    }

    /// Push the planned end out by `hours`. No-op when idle.
    pub fn extend_fast(&mut self, hours: f64) -> Option<Event> {
        let end_time = self.session.extend(hours)?;

        let displaced = self.session.take_handle();
        self.cancel_alert(displaced);
        let handle = self.schedule_alert(end_time);
        self.session.set_handle(handle);

        self.persist();
        Some(Event::FastExtended {
            added_hours: hours,
            end_time,
            at: Utc::now(),
        })
    }

    /// End the active fast now, recording exactly one history entry.
    /// No-op when idle: nothing recorded, history untouched.
    pub fn end_fast(&mut self) -> Option<Event> {
        self.end_fast_at(Utc::now())
    }

    /// [`FastTracker::end_fast`] with an explicit end instant.
    pub fn end_fast_at(&mut self, end_at: DateTime<Utc>) -> Option<Event> {
        let finished = self.session.finish()?;
        self.cancel_alert(finished.handle);

        let entry = HistoryEntry::close(
            finished.start_time,
            end_at,
            finished.planned_hours,
            Utc::now(),
        );
        self.ledger.record(entry.clone());

        self.persist();
        Some(Event::FastEnded {
            entry,
            at: Utc::now(),
        })
    }

    /// Destructive full wipe: discard any active fast without recording it,
    /// empty the history, restore the default window, cancel any alert, and
    /// remove the stored snapshot.
    pub fn reset_all(&mut self) -> Event {
        let displaced = self.session.clear();
        self.cancel_alert(displaced);
        self.ledger.clear();
        self.planned_hours = self.default_hours;

        if let Err(e) = self.store.delete(STATE_KEY) {
            warn!("failed to delete snapshot: {e}");
        }
        Event::TrackerReset { at: Utc::now() }
    }

    /// Empty the history ledger; the active fast, if any, is untouched.
    pub fn clear_history(&mut self) -> Event {
        self.ledger.clear();
        self.persist();
        Event::HistoryCleared { at: Utc::now() }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_fasting(&self) -> bool {
        self.session.is_fasting()
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.session.active().map(|f| f.start_time)
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.session.active().map(|f| f.end_time)
    }

    /// The current planned window: the active fast's, or the last chosen.
    pub fn duration_hours(&self) -> f64 {
        self.planned_hours
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.ledger.entries()
    }

    /// Summary statistics over completed fasts only.
    pub fn stats(&self) -> FastStats {
        summarize(self.ledger.entries())
    }

    /// Hours fasted per local calendar day for the last `days` days,
    /// counting the active fast up to now.
    pub fn daily_totals(&self, days: u32) -> Vec<DayTotal> {
        let now = Utc::now();
        let active = self.session.active().map(|f| (f.start_time, now));
        daily_totals(self.ledger.entries(), active, days, now)
    }

    /// Display view with elapsed/remaining computed against now.
    pub fn status(&self) -> TrackerStatus {
        let now = Utc::now();
        let (elapsed_hours, remaining_hours) = match self.session.active() {
            Some(fast) => (
                round2((now - fast.start_time).num_milliseconds().max(0) as f64 / 3_600_000.0),
                round2((fast.end_time - now).num_milliseconds().max(0) as f64 / 3_600_000.0),
            ),
            None => (0.0, 0.0),
        };
        TrackerStatus {
            is_fasting: self.is_fasting(),
            start_time: self.start_time(),
            end_time: self.end_time(),
            planned_hours: self.planned_hours,
            elapsed_hours,
            remaining_hours,
        }
    }

    /// Capture the full persisted state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.session, &self.ledger, self.planned_hours)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn scheduler(&self) -> &N {
        &self.scheduler
    }

    // ── Side effects (best-effort) ───────────────────────────────────

    fn schedule_alert(&mut self, fire_at: DateTime<Utc>) -> Option<NotificationHandle> {
        match self.scheduler.schedule(fire_at, &self.alert) {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!("failed to schedule end-of-fast alert: {e}");
                None
            }
        }
    }

    fn cancel_alert(&mut self, handle: Option<NotificationHandle>) {
        let Some(handle) = handle else { return };
        if let Err(e) = self.scheduler.cancel(&handle) {
            warn!("failed to cancel alert '{}': {e}", handle.as_str());
        }
    }

    fn persist(&mut self) {
        match self.snapshot().to_json() {
            Ok(blob) => {
                if let Err(e) = self.store.set(STATE_KEY, &blob) {
                    warn!("failed to persist snapshot: {e}");
                }
            }
            Err(e) => warn!("failed to serialize snapshot: {e}"),
        }
    }
}
