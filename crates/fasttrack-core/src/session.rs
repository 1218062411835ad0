//! Fasting session state machine.
//!
//! Two states, no internal threads or clocks -- the caller supplies every
//! timestamp, which keeps transitions deterministic and testable.
//!
//! ```text
//! Idle -> Fasting -> Idle
//! ```
//!
//! The machine holds at most one [`ActiveFast`] and, through it, at most one
//! outstanding notification handle. Transitions return whatever the caller
//! must clean up (a displaced handle to cancel, finished bounds to record);
//! they never talk to the scheduler or the store themselves.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::notify::NotificationHandle;

/// Fallback fasting window in hours (the classic 16:8 split).
pub const DEFAULT_PLANNED_HOURS: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FastState {
    Idle,
    Fasting,
}

/// The single in-flight fast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveFast {
    /// Immutable once set, except by a fresh `begin` or a reset.
    pub start_time: DateTime<Utc>,
    /// Planned end; the only field `extend` touches.
    pub end_time: DateTime<Utc>,
    /// The window chosen at start. Extending the fast does not change it.
    pub planned_hours: f64,
    /// At most one outstanding alert handle at any time.
    pub handle: Option<NotificationHandle>,
}

/// What `finish` hands back: everything the caller needs to record the fast
/// and cancel its alert.
#[derive(Debug, Clone)]
pub struct FinishedFast {
    pub start_time: DateTime<Utc>,
    pub planned_hours: f64,
    pub handle: Option<NotificationHandle>,
}

/// Holder of the active/idle session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    fast: Option<ActiveFast>,
}

impl Session {
    pub fn idle() -> Self {
        Self::default()
    }

    /// Rebuild a fasting session from a persisted snapshot.
    pub fn resume(fast: ActiveFast) -> Self {
        Self { fast: Some(fast) }
    }

    pub fn state(&self) -> FastState {
        if self.fast.is_some() {
            FastState::Fasting
        } else {
            FastState::Idle
        }
    }

    pub fn is_fasting(&self) -> bool {
        self.fast.is_some()
    }

    pub fn active(&self) -> Option<&ActiveFast> {
        self.fast.as_ref()
    }

    /// Begin a fast of `planned_hours` starting at `start_at`.
    ///
    /// Starting while already fasting force-overwrites: the unfinished fast
    /// is discarded without being recorded. That is deliberate policy, and
    /// callers wanting confirmation must ask before invoking.
    ///
    /// No validation happens here -- a future `start_at`, or one whose end
    /// is already in the past, is the caller's decision to pre-validate.
    /// The contract is "compute end = start + hours and proceed".
    ///
    /// Returns the computed end time and the handle displaced from any
    /// overwritten fast, which the caller must cancel.
    pub fn begin(
        &mut self,
        planned_hours: f64,
        start_at: DateTime<Utc>,
    ) -> (DateTime<Utc>, Option<NotificationHandle>) {
        let displaced = self.fast.take().and_then(|f| f.handle);
        let end = start_at + hours_span(planned_hours);
        self.fast = Some(ActiveFast {
            start_time: start_at,
            end_time: end,
            planned_hours,
            handle: None,
        });
        (end, displaced)
    }

    /// Push the planned end out by `delta_hours`. Only `end_time` moves;
    /// `planned_hours` stays what was chosen at start.
    ///
    /// Returns the new end time, or `None` when idle (a no-op, not an error).
    pub fn extend(&mut self, delta_hours: f64) -> Option<DateTime<Utc>> {
        let fast = self.fast.as_mut()?;
        fast.end_time += hours_span(delta_hours);
        Some(fast.end_time)
    }

    /// End the fast, transitioning to `Idle`.
    ///
    /// Returns the finished bounds for ledger recording, or `None` when idle.
    pub fn finish(&mut self) -> Option<FinishedFast> {
        self.fast.take().map(|f| FinishedFast {
            start_time: f.start_time,
            planned_hours: f.planned_hours,
            handle: f.handle,
        })
    }

    /// Force `Idle`, discarding any fast without recording it.
    /// Returns the outstanding handle for cancellation.
    pub fn clear(&mut self) -> Option<NotificationHandle> {
        self.fast.take().and_then(|f| f.handle)
    }

    /// Replace the outstanding alert handle. The previous one must already
    /// have been taken and cancelled.
    pub fn set_handle(&mut self, handle: Option<NotificationHandle>) {
        if let Some(fast) = self.fast.as_mut() {
            fast.handle = handle;
        }
    }

    /// Take the outstanding handle, leaving none.
    pub fn take_handle(&mut self) -> Option<NotificationHandle> {
        self.fast.as_mut().and_then(|f| f.handle.take())
    }
}

/// Fractional hours as an exact millisecond span.
pub(crate) fn hours_span(hours: f64) -> Duration {
    Duration::milliseconds((hours * 3_600_000.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_computes_end_from_hours() {
        let mut session = Session::idle();
        let start = Utc::now();
        let (end, displaced) = session.begin(16.0, start);
        assert!(displaced.is_none());
        assert_eq!(end - start, Duration::hours(16));
        assert_eq!(session.state(), FastState::Fasting);

        let fast = session.active().unwrap();
        assert_eq!(fast.start_time, start);
        assert_eq!(fast.end_time, end);
        assert_eq!(fast.planned_hours, 16.0);
    }

    #[test]
    fn begin_handles_fractional_hours() {
        let mut session = Session::idle();
        let start = Utc::now();
        let (end, _) = session.begin(0.5, start);
        assert_eq!(end - start, Duration::minutes(30));
    }

    #[test]
    fn begin_while_fasting_overwrites_and_returns_displaced_handle() {
        let mut session = Session::idle();
        session.begin(16.0, Utc::now());
        session.set_handle(Some(NotificationHandle::new("old")));

        let later = Utc::now();
        let (_, displaced) = session.begin(12.0, later);
        assert_eq!(displaced, Some(NotificationHandle::new("old")));

        let fast = session.active().unwrap();
        assert_eq!(fast.planned_hours, 12.0);
        assert_eq!(fast.start_time, later);
        assert!(fast.handle.is_none());
    }

    #[test]
    fn extend_shifts_end_only() {
        let mut session = Session::idle();
        let start = Utc::now();
        let (end, _) = session.begin(16.0, start);

        let new_end = session.extend(2.0).unwrap();
        assert_eq!(new_end, end + Duration::hours(2));

        let fast = session.active().unwrap();
        assert_eq!(fast.start_time, start, "start must not move");
        assert_eq!(fast.planned_hours, 16.0, "planned hours must not move");
    }

    #[test]
    fn extend_while_idle_is_a_noop() {
        let mut session = Session::idle();
        assert!(session.extend(1.0).is_none());
        assert_eq!(session.state(), FastState::Idle);
    }

    #[test]
    fn finish_yields_bounds_and_goes_idle() {
        let mut session = Session::idle();
        let start = Utc::now();
        session.begin(16.0, start);
        session.set_handle(Some(NotificationHandle::new("n1")));

        let finished = session.finish().unwrap();
        assert_eq!(finished.start_time, start);
        assert_eq!(finished.planned_hours, 16.0);
        assert_eq!(finished.handle, Some(NotificationHandle::new("n1")));
        assert_eq!(session.state(), FastState::Idle);

        assert!(session.finish().is_none(), "second finish is a no-op");
    }

    #[test]
    fn clear_discards_without_bounds() {
        let mut session = Session::idle();
        session.begin(16.0, Utc::now());
        session.set_handle(Some(NotificationHandle::new("n1")));

        let handle = session.clear();
        assert_eq!(handle, Some(NotificationHandle::new("n1")));
        assert_eq!(session.state(), FastState::Idle);
        assert!(session.clear().is_none());
    }
}
