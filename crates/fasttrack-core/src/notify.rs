//! Notification scheduler seam.
//!
//! The device notification service is an external collaborator. The core only
//! needs two capabilities from it -- schedule one future alert, cancel it by
//! handle -- so that pair is a trait injected into the tracker rather than a
//! module-level client. Delivery is best-effort: a failed `schedule` leaves
//! the session without an alert, never without a transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::NotifyError;

/// Opaque reference to a scheduled alert, used only to cancel it later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationHandle(String);

impl NotificationHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Title and body of the end-of-fast alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertContent {
    pub title: String,
    pub body: String,
}

impl Default for AlertContent {
    fn default() -> Self {
        Self {
            title: "Fast complete 🎉".into(),
            body: "Time to re-fuel mindfully.".into(),
        }
    }
}

/// Every notification backend implements this trait.
///
/// Implementations must keep `cancel` idempotent: cancelling an unknown,
/// already-fired, or already-cancelled handle returns `Ok`. They must also
/// bound their own calls (report [`NotifyError::Timeout`]) so a hung platform
/// service cannot stall the caller indefinitely.
pub trait NotificationScheduler {
    /// Schedule a single alert at `fire_at`. Returns the handle to cancel it.
    fn schedule(
        &mut self,
        fire_at: DateTime<Utc>,
        content: &AlertContent,
    ) -> Result<NotificationHandle, NotifyError>;

    /// Cancel a previously scheduled alert. Idempotent.
    fn cancel(&mut self, handle: &NotificationHandle) -> Result<(), NotifyError>;
}

/// Scheduler that accepts every request and delivers nothing.
///
/// Used where no platform alert service is wired up (headless CLI runs,
/// notifications disabled by config).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullScheduler;

impl NotificationScheduler for NullScheduler {
    fn schedule(
        &mut self,
        _fire_at: DateTime<Utc>,
        _content: &AlertContent,
    ) -> Result<NotificationHandle, NotifyError> {
        Ok(NotificationHandle::new(Uuid::new_v4().to_string()))
    }

    fn cancel(&mut self, _handle: &NotificationHandle) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// An alert held by [`MemoryScheduler`].
#[derive(Debug, Clone)]
pub struct PendingAlert {
    pub handle: NotificationHandle,
    pub fire_at: DateTime<Utc>,
    pub content: AlertContent,
}

/// In-process scheduler keeping pending alerts in memory.
///
/// Lets callers inspect what would fire and when; also the double used by the
/// tracker tests to assert the cancel-before-replace discipline.
#[derive(Debug, Default)]
pub struct MemoryScheduler {
    pending: Vec<PendingAlert>,
}

impl MemoryScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[PendingAlert] {
        &self.pending
    }
}

impl NotificationScheduler for MemoryScheduler {
    fn schedule(
        &mut self,
        fire_at: DateTime<Utc>,
        content: &AlertContent,
    ) -> Result<NotificationHandle, NotifyError> {
        let handle = NotificationHandle::new(Uuid::new_v4().to_string());
        self.pending.push(PendingAlert {
            handle: handle.clone(),
            fire_at,
            content: content.clone(),
        });
        Ok(handle)
    }

    fn cancel(&mut self, handle: &NotificationHandle) -> Result<(), NotifyError> {
        self.pending.retain(|p| p.handle != *handle);
        Ok(())
    }
}
