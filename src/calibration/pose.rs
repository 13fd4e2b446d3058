use serde::{Deserialize, Serialize};

use crate::rig::{PerPoint, Pose, TrackedPoint, TrackerFrame};

/// Tracker world poses captured at the calibration instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationPose {
    points: PerPoint<Pose>,
}

impl CalibrationPose {
    #[must_use]
    pub fn new(points: PerPoint<Pose>) -> Self {
        Self { points }
    }

    /// Captures the current frame. An absent tracker is recorded at the
    /// origin with identity rotation instead of failing the capture.
    #[must_use]
    pub fn capture(frame: &TrackerFrame) -> Self {
        let missing = frame.missing();
        if !missing.is_empty() {
            log::warn!("Calibrating without trackers {missing:?}; using origin/identity for them");
        }

        Self {
            points: PerPoint::from_fn(|point| frame.pose_or_identity(point)),
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, point: TrackedPoint) -> Pose {
        self.points[point]
    }

    #[must_use]
    pub fn points(&self) -> &PerPoint<Pose> {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use glam::{Quat, Vec3};

    use super::*;

    #[test]
    fn capture_defaults_missing_points() {
        let frame = TrackerFrame::new().with(
            TrackedPoint::Pelvis,
            Pose::new(Vec3::new(0.0, 1.0, 0.0), Quat::from_rotation_y(0.3)),
        );
        let pose = CalibrationPose::capture(&frame);

        assert_eq!(pose.get(TrackedPoint::Pelvis).position, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(pose.get(TrackedPoint::LeftHand), Pose::IDENTITY);
        assert_eq!(pose.get(TrackedPoint::Head), Pose::IDENTITY);
    }
}
