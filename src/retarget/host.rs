use glam::{Quat, Vec3};

use crate::retarget::engine::RetargetingEngine;
use crate::retarget::targets::{IkGoalSet, RetargetTargets};
use crate::rig::{HumanBone, Pose, SkeletonPose, TrackerFrame};

/// Bone access provided by the host animation system.
pub trait Skeleton {
    /// Current world transform of `bone`.
    fn bone_world_pose(&self, bone: HumanBone) -> Pose;

    fn set_bone_local_rotation(&mut self, bone: HumanBone, rotation: Quat);

    fn set_bone_world_position(&mut self, bone: HumanBone, position: Vec3);

    /// Immutable snapshot used as the compute-targets input.
    fn snapshot(&self) -> SkeletonPose {
        SkeletonPose::from_fn(|bone| self.bone_world_pose(bone))
    }
}

/// External IK solver. Reads the goals and poses the limbs of `skeleton`.
pub trait IkSolver {
    fn solve(&mut self, skeleton: &mut dyn Skeleton, goals: &IkGoalSet);
}

impl RetargetingEngine {
    /// Runs one frame of the three-phase protocol against a host skeleton.
    ///
    /// Returns the computed targets, or `None` while the engine is suspended.
    pub fn drive_frame(
        &self,
        skeleton: &mut dyn Skeleton,
        solver: &mut dyn IkSolver,
        frame: &TrackerFrame,
    ) -> Option<RetargetTargets> {
        if !self.is_enabled() {
            return None;
        }

        // Phase 1: targets from the pre-IK bone state.
        let targets = self.compute_targets(&skeleton.snapshot(), frame);
        let rotations = targets.bone_rotations;
        skeleton.set_bone_local_rotation(HumanBone::Hips, rotations.hips);
        skeleton.set_bone_local_rotation(HumanBone::Spine, rotations.spine);
        skeleton.set_bone_local_rotation(HumanBone::Head, rotations.head);

        // Phase 2
        solver.solve(skeleton, &targets.goals);

        // Phase 3: the solver has consumed the uncorrected hips position.
        let hips = skeleton.bone_world_pose(HumanBone::Hips).position;
        skeleton.set_bone_world_position(HumanBone::Hips, targets.root_correction().apply(hips));

        Some(targets)
    }
}
