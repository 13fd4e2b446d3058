use serde::{Deserialize, Serialize};

use crate::animation::tracks::KeyframeTrack;

/// Channels holding a point's local position, x/y/z.
pub const LOCAL_POSITION_CHANNELS: [&str; 3] = ["localPosition.x", "localPosition.y", "localPosition.z"];

/// Channels holding a point's unwrapped local Euler angles in degrees, x/y/z.
pub const LOCAL_EULER_CHANNELS: [&str; 3] =
    ["localEulerAnglesRaw.x", "localEulerAnglesRaw.y", "localEulerAnglesRaw.z"];

/// A scalar curve bound to `channel` on the node at `path`.
///
/// Full-body clips bind to the root, so their `path` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedCurve {
    pub path: String,
    pub channel: String,
    pub track: KeyframeTrack<f32>,
}

impl NamedCurve {
    #[must_use]
    pub fn new(path: impl Into<String>, channel: impl Into<String>, track: KeyframeTrack<f32>) -> Self {
        Self {
            path: path.into(),
            channel: channel.into(),
            track,
        }
    }
}

/// Replayable set of named curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionClip {
    pub name: String,
    pub duration: f32,
    pub curves: Vec<NamedCurve>,
}

impl MotionClip {
    /// Builds a clip; the duration is the latest key time over all curves.
    #[must_use]
    pub fn new(name: impl Into<String>, curves: Vec<NamedCurve>) -> Self {
        let duration = curves.iter().map(|c| c.track.end_time()).fold(0.0_f32, f32::max);

        Self {
            name: name.into(),
            duration,
            curves,
        }
    }

    #[must_use]
    pub fn curve(&self, path: &str, channel: &str) -> Option<&NamedCurve> {
        self.curves.iter().find(|c| c.path == path && c.channel == channel)
    }

    #[must_use]
    pub fn curve_index(&self, path: &str, channel: &str) -> Option<usize> {
        self.curves.iter().position(|c| c.path == path && c.channel == channel)
    }

    /// Total number of keyframes over all curves.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.curves.iter().map(|c| c.track.len()).sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
