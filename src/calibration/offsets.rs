use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::calibration::CalibrationPose;
use crate::rig::{HumanBone, PerPoint, Pose, SkeletonPose, TrackedPoint};

/// Fixed grip point attached to a hand tracker, in the tracker's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GripAnchor {
    pub local_position: Vec3,
    pub local_rotation: Quat,
}

impl GripAnchor {
    pub const IDENTITY: Self = Self {
        local_position: Vec3::ZERO,
        local_rotation: Quat::IDENTITY,
    };

    #[must_use]
    pub const fn new(local_position: Vec3, local_rotation: Quat) -> Self {
        Self {
            local_position,
            local_rotation,
        }
    }

    /// World pose of the anchor for a tracker at `tracker`.
    #[inline]
    #[must_use]
    pub fn world_pose(&self, tracker: Pose) -> Pose {
        tracker.child(self.local_position, self.local_rotation)
    }
}

impl Default for GripAnchor {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Tracker-to-bone correction for one tracked point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoneOffset {
    /// Bone-to-tracker vector at calibration time, before rotation.
    pub position: Vec3,
    /// Inverse of the tracker's calibration rotation.
    pub rotation: Quat,
}

impl BoneOffset {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Tracker rotation with the calibration rotation removed.
    #[inline]
    #[must_use]
    pub fn corrected_rotation(&self, tracker_rotation: Quat) -> Quat {
        tracker_rotation * self.rotation
    }

    /// Position offset carried into the tracker's current orientation.
    #[inline]
    #[must_use]
    pub fn rotated_position(&self, tracker_rotation: Quat) -> Vec3 {
        self.corrected_rotation(tracker_rotation) * self.position
    }
}

impl Default for BoneOffset {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One [`BoneOffset`] per tracked point, always replaced as a whole.
pub type BoneOffsets = PerPoint<BoneOffset>;

/// Derives [`BoneOffsets`] from a calibration pose and the skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CalibrationOffsetComputer {
    pub left_grip: GripAnchor,
    pub right_grip: GripAnchor,
}

impl CalibrationOffsetComputer {
    #[must_use]
    pub const fn new(left_grip: GripAnchor, right_grip: GripAnchor) -> Self {
        Self {
            left_grip,
            right_grip,
        }
    }

    /// Computes offsets for all seven points.
    #[must_use]
    pub fn compute(&self, calibration: &CalibrationPose, skeleton: &SkeletonPose) -> BoneOffsets {
        let mut offsets = PerPoint::from_fn(|point| BoneOffset {
            position: Vec3::ZERO,
            rotation: calibration.get(point).rotation.inverse(),
        });

        for point in [TrackedPoint::Pelvis, TrackedPoint::LeftFoot, TrackedPoint::RightFoot] {
            offsets[point].position =
                calibration.get(point).position - skeleton.bone(point.bone()).position;
        }

        let (left, right) = self.hand_corrections(calibration, skeleton);
        offsets[TrackedPoint::LeftHand].position = left;
        offsets[TrackedPoint::RightHand].position = right;

        offsets
    }

    /// Recomputes `offsets` in place when a calibration pose is available.
    ///
    /// Returns `false` and leaves `offsets` untouched otherwise.
    pub fn recompute(
        &self,
        calibration: Option<&CalibrationPose>,
        skeleton: &SkeletonPose,
        offsets: &mut BoneOffsets,
    ) -> bool {
        let Some(calibration) = calibration else {
            log::debug!("No calibration pose; keeping previous offsets");
            return false;
        };
        *offsets = self.compute(calibration, skeleton);
        true
    }

    /// Symmetric span correction for the hands, as `(left, right)`.
    ///
    /// Half the difference between the character's hand span and the tracked
    /// grip span, along the tracked left-to-right direction.
    fn hand_corrections(&self, calibration: &CalibrationPose, skeleton: &SkeletonPose) -> (Vec3, Vec3) {
        let left_grip = self.left_grip.world_pose(calibration.get(TrackedPoint::LeftHand)).position;
        let right_grip = self.right_grip.world_pose(calibration.get(TrackedPoint::RightHand)).position;
        let tracked = right_grip - left_grip;

        let character = skeleton.bone(HumanBone::RightHand).position - skeleton.bone(HumanBone::LeftHand).position;

        let correction = (character.length() - tracked.length()) / 2.0;
        let direction = tracked.normalize_or_zero();

        (-direction * correction, direction * correction)
    }
}
