//! Runtime Settings
//!
//! [`MocapSettings`] gathers the tunables of a capture rig: sampling periods,
//! grip anchor placement and how recorded curves are interpolated.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use mocap::settings::MocapSettings;
//!
//! // Defaults: 15 ms tracker sampling, smooth cubic curves
//! let settings = MocapSettings::default();
//!
//! // Partial JSON; missing fields keep their defaults
//! let settings = MocapSettings::from_json_str(r#"{ "tracker_recording_interval": 0.02 }"#)?;
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::animation::InterpolationMode;
use crate::calibration::GripAnchor;
use crate::errors::Result;

/// Configuration for calibration, retargeting and recording.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MocapSettings {
    /// Seconds to wait after each tracker sample.
    pub tracker_recording_interval: f32,
    /// Seconds to wait after each full-body sample.
    pub body_recording_interval: f32,
    /// Optional hard stop for tracker sessions, in seconds.
    pub max_recording_duration: Option<f32>,
    /// Grip point on the left hand tracker.
    pub left_grip: GripAnchor,
    /// Grip point on the right hand tracker.
    pub right_grip: GripAnchor,
    /// Interpolation of synthesized curves.
    pub interpolation: InterpolationMode,
    /// Name of the tracker clip produced by a recording.
    pub clip_name: String,
    /// Name of the clip produced by the full-body recorder.
    pub body_clip_name: String,
    /// Stop retargeting while a tracker recording runs; it resumes once the
    /// clip is published.
    pub suspend_retargeting_while_recording: bool,
}

impl Default for MocapSettings {
    fn default() -> Self {
        Self {
            tracker_recording_interval: 0.015,
            body_recording_interval: 0.2,
            max_recording_duration: None,
            left_grip: GripAnchor::IDENTITY,
            right_grip: GripAnchor::IDENTITY,
            interpolation: InterpolationMode::CubicSpline,
            clip_name: "MotionCapture".to_string(),
            body_clip_name: "MotionCaptureBody".to_string(),
            suspend_retargeting_while_recording: false,
        }
    }
}

impl MocapSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
