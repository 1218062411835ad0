//! The persisted state snapshot and its schema migration.
//!
//! One blob under one key holds the whole tracker state. The shape has
//! evolved: `state_v1` had no history, `state_v2` named the planned window
//! `durationHours` and the alert handle `notifId`. Loading goes through an
//! explicit migration from "any prior shape" to the current one, defaulting
//! absent fields, so old installs upgrade silently instead of drifting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::history::{HistoryEntry, HistoryLedger};
use crate::notify::NotificationHandle;
use crate::session::{Session, DEFAULT_PLANNED_HOURS};

/// Store key for the snapshot blob.
pub const STATE_KEY: &str = "state_v3";

/// The complete serialized tracker state.
///
/// Invariant after [`Snapshot::from_json`]: `is_fasting` is true iff both
/// endpoints are present; when false, both endpoints and the handle are
/// `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub is_fasting: bool,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default = "default_planned_hours")]
    pub planned_hours: f64,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub notification_handle: Option<NotificationHandle>,
}

fn default_planned_hours() -> f64 {
    DEFAULT_PLANNED_HOURS
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            is_fasting: false,
            start_time: None,
            end_time: None,
            planned_hours: DEFAULT_PLANNED_HOURS,
            history: Vec::new(),
            notification_handle: None,
        }
    }
}

impl Snapshot {
    /// Parse a stored blob of any prior shape.
    ///
    /// Malformed input yields `None`; the caller treats that as an absent
    /// snapshot and falls back to defaults.
    pub fn from_json(blob: &str) -> Option<Self> {
        let mut value: serde_json::Value = serde_json::from_str(blob).ok()?;
        migrate(&mut value);
        let mut snap: Snapshot = serde_json::from_value(value).ok()?;
        snap.normalize();
        Some(snap)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Capture the current in-memory state.
    ///
    /// `idle_planned_hours` is what the tracker remembers between fasts (the
    /// last window chosen, or the default after a reset).
    pub fn capture(session: &Session, ledger: &HistoryLedger, idle_planned_hours: f64) -> Self {
        match session.active() {
            Some(fast) => Self {
                is_fasting: true,
                start_time: Some(fast.start_time),
                end_time: Some(fast.end_time),
                planned_hours: fast.planned_hours,
                history: ledger.entries().to_vec(),
                notification_handle: fast.handle.clone(),
            },
            None => Self {
                history: ledger.entries().to_vec(),
                planned_hours: idle_planned_hours,
                ..Self::default()
            },
        }
    }

    /// Enforce the fasting invariant on whatever was loaded. A snapshot that
    /// claims to be fasting without both endpoints (or vice versa) is
    /// contradictory; the conservative reading is idle.
    fn normalize(&mut self) {
        if !(self.is_fasting && self.start_time.is_some() && self.end_time.is_some()) {
            self.is_fasting = false;
            self.start_time = None;
            self.end_time = None;
            self.notification_handle = None;
        }
    }
}

/// Map legacy field names onto the current shape; missing fields are left
/// for `#[serde(default)]` to fill.
fn migrate(value: &mut serde_json::Value) {
    let Some(obj) = value.as_object_mut() else {
        return;
    };
    if !obj.contains_key("plannedHours") {
        if let Some(v) = obj.remove("durationHours") {
            obj.insert("plannedHours".to_string(), v);
        }
    }
    if !obj.contains_key("notificationHandle") {
        if let Some(v) = obj.remove("notifId") {
            obj.insert("notificationHandle".to_string(), v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn round_trips_the_current_shape() {
        let now = Utc::now();
        let snap = Snapshot {
            is_fasting: true,
            start_time: Some(now),
            end_time: Some(now + Duration::hours(16)),
            planned_hours: 16.0,
            history: vec![HistoryEntry::close(
                now - Duration::hours(30),
                now - Duration::hours(14),
                16.0,
                now - Duration::hours(14),
            )],
            notification_handle: Some(NotificationHandle::new("n1")),
        };
        let blob = snap.to_json().unwrap();
        assert_eq!(Snapshot::from_json(&blob).unwrap(), snap);
    }

    #[test]
    fn serializes_with_legacy_camel_case_keys() {
        let blob = Snapshot::default().to_json().unwrap();
        assert!(blob.contains("\"isFasting\""));
        assert!(blob.contains("\"plannedHours\""));
    }

    #[test]
    fn migrates_v2_field_names() {
        let blob = r#"{
            "isFasting": false,
            "startTime": null,
            "endTime": null,
            "durationHours": 18,
            "history": [],
            "notifId": "abc-123"
        }"#;
        let snap = Snapshot::from_json(blob).unwrap();
        assert_eq!(snap.planned_hours, 18.0);
        // Idle, so the orphaned handle is dropped by normalization.
        assert_eq!(snap.notification_handle, None);
    }

    #[test]
    fn migrates_v2_while_fasting() {
        let blob = r#"{
            "isFasting": true,
            "startTime": "2026-07-14T20:00:00Z",
            "endTime": "2026-07-15T12:00:00Z",
            "durationHours": 16,
            "notifId": "abc-123"
        }"#;
        let snap = Snapshot::from_json(blob).unwrap();
        assert!(snap.is_fasting);
        assert_eq!(snap.planned_hours, 16.0);
        assert_eq!(snap.notification_handle, Some(NotificationHandle::new("abc-123")));
        assert!(snap.history.is_empty(), "v1 blobs had no history");
    }

    #[test]
    fn defaults_missing_fields() {
        let snap = Snapshot::from_json("{}").unwrap();
        assert_eq!(snap, Snapshot::default());
        assert_eq!(snap.planned_hours, 16.0);
    }

    #[test]
    fn fasting_flag_without_endpoints_is_read_as_idle() {
        let snap = Snapshot::from_json(r#"{"isFasting": true}"#).unwrap();
        assert!(!snap.is_fasting);
        assert!(snap.start_time.is_none());
    }

    #[test]
    fn endpoints_without_flag_are_read_as_idle() {
        let blob = r#"{
            "isFasting": false,
            "startTime": "2026-07-14T20:00:00Z",
            "endTime": "2026-07-15T12:00:00Z"
        }"#;
        let snap = Snapshot::from_json(blob).unwrap();
        assert!(!snap.is_fasting);
        assert!(snap.start_time.is_none());
        assert!(snap.end_time.is_none());
    }

    #[test]
    fn malformed_blobs_are_treated_as_absent() {
        assert!(Snapshot::from_json("not json").is_none());
        assert!(Snapshot::from_json("[1,2,3]").is_none());
        assert!(Snapshot::from_json(r#"{"plannedHours": "many"}"#).is_none());
    }
}
