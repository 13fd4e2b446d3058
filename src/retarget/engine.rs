use crate::calibration::{BoneOffsets, CalibrationOffsetComputer, CalibrationPose, GripAnchor};
use crate::retarget::targets::{BoneRotations, IkGoalSet, IkTarget, RetargetTargets};
use crate::rig::{HumanBone, IkGoal, SkeletonPose, TrackedPoint, TrackerFrame};
use crate::settings::MocapSettings;

/// Maps live tracker poses onto skeleton bone rotations and IK goals.
///
/// The engine exclusively owns the calibration offsets. They start as
/// identity and are replaced wholesale by [`calibrate`](Self::calibrate).
#[derive(Debug, Clone)]
pub struct RetargetingEngine {
    computer: CalibrationOffsetComputer,
    offsets: BoneOffsets,
    enabled: bool,
}

impl RetargetingEngine {
    #[must_use]
    pub fn new(left_grip: GripAnchor, right_grip: GripAnchor) -> Self {
        Self {
            computer: CalibrationOffsetComputer::new(left_grip, right_grip),
            offsets: BoneOffsets::default(),
            enabled: true,
        }
    }

    #[must_use]
    pub fn from_settings(settings: &MocapSettings) -> Self {
        Self::new(settings.left_grip, settings.right_grip)
    }

    #[inline]
    #[must_use]
    pub fn offsets(&self) -> &BoneOffsets {
        &self.offsets
    }

    #[inline]
    #[must_use]
    pub fn grip(&self, point: TrackedPoint) -> Option<GripAnchor> {
        match point {
            TrackedPoint::LeftHand => Some(self.computer.left_grip),
            TrackedPoint::RightHand => Some(self.computer.right_grip),
            _ => None,
        }
    }

    /// Recomputes the offsets from `calibration`.
    ///
    /// Without a calibration pose this is a no-op and returns `false`.
    pub fn calibrate(&mut self, calibration: Option<&CalibrationPose>, skeleton: &SkeletonPose) -> bool {
        let updated = self.computer.recompute(calibration, skeleton, &mut self.offsets);
        if updated {
            log::info!("Retargeting offsets recomputed");
        }
        updated
    }

    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Stops the engine from driving the skeleton until [`resume`](Self::resume).
    pub fn suspend(&mut self) {
        self.enabled = false;
    }

    pub fn resume(&mut self) {
        if !self.enabled {
            log::debug!("Retargeting resumed");
        }
        self.enabled = true;
    }

    /// Compute-targets phase.
    ///
    /// `skeleton` must be the bone state before this frame's IK pass; the hip
    /// displacement is measured against it.
    #[must_use]
    pub fn compute_targets(&self, skeleton: &SkeletonPose, frame: &TrackerFrame) -> RetargetTargets {
        let offsets = &self.offsets;

        let pelvis = frame.pose_or_identity(TrackedPoint::Pelvis);
        let pelvis_offset = offsets[TrackedPoint::Pelvis];
        let hips_rotation = pelvis_offset.corrected_rotation(pelvis.rotation);
        let hip_movement = pelvis.position - skeleton.bone(HumanBone::Hips).position;
        let hips_ik_offset = hip_movement - pelvis_offset.rotated_position(pelvis.rotation);

        let chest_rotation =
            offsets[TrackedPoint::Chest].corrected_rotation(frame.pose_or_identity(TrackedPoint::Chest).rotation);
        let head_rotation =
            offsets[TrackedPoint::Head].corrected_rotation(frame.pose_or_identity(TrackedPoint::Head).rotation);

        let bone_rotations = BoneRotations {
            hips: hips_rotation,
            spine: hips_rotation.inverse() * chest_rotation,
            head: chest_rotation.inverse() * head_rotation,
        };

        let goals = IkGoalSet::from_fn(|goal| {
            let point = goal.tracked_point();
            let tracker = frame.pose_or_identity(point);
            let offset = offsets[point];

            match goal {
                IkGoal::LeftFoot | IkGoal::RightFoot => IkTarget::full(
                    tracker.position - hips_ik_offset - offset.rotated_position(tracker.rotation),
                    offset.corrected_rotation(tracker.rotation),
                ),
                // Hands add the span correction where feet subtract the bone offset.
                IkGoal::LeftHand | IkGoal::RightHand => {
                    let anchor = self.grip(point).unwrap_or_default().world_pose(tracker);
                    IkTarget::full(
                        anchor.position - hips_ik_offset + offset.rotated_position(tracker.rotation),
                        anchor.rotation,
                    )
                }
            }
        });

        RetargetTargets {
            hips_ik_offset,
            bone_rotations,
            goals,
        }
    }
}

impl Default for RetargetingEngine {
    fn default() -> Self {
        Self::new(GripAnchor::IDENTITY, GripAnchor::IDENTITY)
    }
}

