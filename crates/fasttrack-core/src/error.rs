//! Core error types for fasttrack-core.
//!
//! Nothing in this core is fatal: the tracker recovers from store and
//! scheduler failures locally (defaults on load, swallowed-and-logged on
//! write). These types exist so that the "best effort" policy is an explicit,
//! testable contract rather than an empty catch.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for fasttrack-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Durable store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Notification scheduler errors
    #[error("Scheduler error: {0}")]
    Notify(#[from] NotifyError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Durable store errors.
///
/// The key is carried rather than a path because stores are opaque: a key may
/// map to a file, a row, or a platform key-value slot.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading a blob failed for a reason other than absence
    #[error("failed to read '{key}': {source}")]
    ReadFailed {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing a blob failed
    #[error("failed to write '{key}': {source}")]
    WriteFailed {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Deleting a blob failed for a reason other than absence
    #[error("failed to delete '{key}': {source}")]
    DeleteFailed {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The store itself cannot be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Notification scheduler errors.
///
/// All of these are recoverable: a session transition proceeds without an
/// alert when scheduling fails.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The platform refused to schedule (e.g. notifications disabled)
    #[error("notification permission denied")]
    PermissionDenied,

    /// The scheduler call exceeded its internal deadline.
    /// Implementations must bound their own calls so a hung external
    /// service cannot stall a state transition.
    #[error("scheduler call timed out after {0} seconds")]
    Timeout(u64),

    /// Any other backend failure
    #[error("scheduler backend error: {0}")]
    Backend(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
