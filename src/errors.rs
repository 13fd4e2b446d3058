//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`MocapError`] covers every failure mode:
//! - Recording session misuse (double start, stop without start)
//! - Sample timestamp violations inside a recording session
//! - Persistence failures (I/O and JSON)
//!
//! None of these are fatal. The runtime is a real-time loop, so callers such as
//! [`MocapController`](crate::controller::MocapController) log the error and
//! keep the previous valid state.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mocap::errors::{MocapError, Result};
//!
//! fn start() -> Result<()> {
//!     Err(MocapError::RecordingAlreadyActive)
//! }
//! ```

use thiserror::Error;

use crate::rig::TrackedPoint;

/// The main error type for the motion capture runtime.
#[derive(Error, Debug)]
pub enum MocapError {
    // ========================================================================
    // Recording Errors
    // ========================================================================
    /// A recording session was started while another one is running.
    #[error("A recording session is already active")]
    RecordingAlreadyActive,

    /// A stop was requested but no session is running.
    #[error("No recording session is active")]
    RecordingNotActive,

    /// A sample arrived with a timestamp earlier than the last stored one.
    #[error("Non-monotonic timestamp for {point:?}: {timestamp} < {previous}")]
    NonMonotonicTimestamp {
        /// Point the sample belongs to
        point: TrackedPoint,
        /// Timestamp of the last stored sample
        previous: f32,
        /// Rejected timestamp
        timestamp: f32,
    },

    /// A sample arrived with a negative or non-finite timestamp.
    #[error("Invalid timestamp for {point:?}: {timestamp}")]
    InvalidTimestamp {
        /// Point the sample belongs to
        point: TrackedPoint,
        /// Rejected timestamp
        timestamp: f32,
    },

    /// Full-body recording needs a clip to be playing.
    #[error("No clip is playing")]
    PlaybackInactive,

    // ========================================================================
    // Lookup Errors
    // ========================================================================
    /// A tracked point name did not match the rig table.
    #[error("Unknown tracked point: {0}")]
    UnknownTrackedPoint(String),

    /// No clip with the given name is stored.
    #[error("Clip not found: {0}")]
    ClipNotFound(String),

    /// An operation needed a calibration pose that was never captured.
    #[error("No calibration pose available")]
    CalibrationMissing,

    // ========================================================================
    // Persistence Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Alias for `Result<T, MocapError>`.
pub type Result<T> = std::result::Result<T, MocapError>;
