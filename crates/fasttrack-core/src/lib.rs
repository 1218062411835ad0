//! # FastTrack Core Library
//!
//! Core business logic for the FastTrack intermittent-fasting tracker: a
//! single active session (or none), a persisted newest-first history of
//! completed fasts, derived statistics, and idempotent scheduling of the
//! end-of-fast alert. CLI-first: everything is available through the
//! standalone CLI binary, and any GUI layer is a thin caller over this
//! same library.
//!
//! ## Architecture
//!
//! - **Session**: a two-state machine (`Idle`/`Fasting`) fed explicit
//!   timestamps by the caller; it owns at most one notification handle
//! - **Tracker**: the facade composing session, history, and stats, with an
//!   injected durable store and notification scheduler; all side effects
//!   are best-effort and never block or roll back a state transition
//! - **Stats**: pure aggregation, including per-day totals that split fasts
//!   across local midnight boundaries
//! - **Storage**: one JSON snapshot blob behind a store trait, with explicit
//!   migration from prior snapshot shapes, plus TOML configuration
//!
//! ## Key Components
//!
//! - [`FastTracker`]: the entry point callers hold
//! - [`Session`]: the state machine core
//! - [`SnapshotStore`] / [`NotificationScheduler`]: the two external seams

pub mod error;
pub mod events;
pub mod history;
pub mod notify;
pub mod session;
pub mod stats;
pub mod storage;
pub mod tracker;

pub use error::{ConfigError, CoreError, NotifyError, StoreError};
pub use events::Event;
pub use history::{HistoryEntry, HistoryLedger};
pub use notify::{
    AlertContent, MemoryScheduler, NotificationHandle, NotificationScheduler, NullScheduler,
};
pub use session::{ActiveFast, FastState, Session, DEFAULT_PLANNED_HOURS};
pub use stats::{daily_totals, summarize, DayTotal, FastStats};
pub use storage::{Config, FileStore, MemoryStore, Snapshot, SnapshotStore, STATE_KEY};
pub use tracker::{FastTracker, TrackerStatus};
