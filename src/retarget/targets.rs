use std::ops::Index;

use glam::{Quat, Vec3};

use crate::rig::IkGoal;

/// Target pose and blend weights for one IK goal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IkTarget {
    pub position: Vec3,
    pub rotation: Quat,
    /// Position blend weight in `[0, 1]`.
    pub position_weight: f32,
    /// Rotation blend weight in `[0, 1]`.
    pub rotation_weight: f32,
}

impl IkTarget {
    /// Target with full IK authority on both position and rotation.
    #[must_use]
    pub const fn full(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            position_weight: 1.0,
            rotation_weight: 1.0,
        }
    }
}

/// The four limb goals of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IkGoalSet {
    goals: [IkTarget; IkGoal::COUNT],
}

impl IkGoalSet {
    pub fn from_fn(mut f: impl FnMut(IkGoal) -> IkTarget) -> Self {
        Self {
            goals: IkGoal::ALL.map(&mut f),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (IkGoal, &IkTarget)> {
        IkGoal::ALL.into_iter().zip(self.goals.iter())
    }
}

impl Index<IkGoal> for IkGoalSet {
    type Output = IkTarget;

    #[inline]
    fn index(&self, goal: IkGoal) -> &IkTarget {
        &self.goals[goal.index()]
    }
}

/// Local rotations written to the torso bones before the IK pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneRotations {
    pub hips: Quat,
    /// Relative to the hips.
    pub spine: Quat,
    /// Relative to the chest.
    pub head: Quat,
}

/// Output of the compute-targets phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetargetTargets {
    /// Residual translation between the pelvis tracker and the hips bone.
    pub hips_ik_offset: Vec3,
    pub bone_rotations: BoneRotations,
    pub goals: IkGoalSet,
}

impl RetargetTargets {
    /// Hip displacement to apply once the IK solver has read the hips.
    #[must_use]
    pub fn root_correction(&self) -> RootCorrection {
        RootCorrection {
            displacement: self.hips_ik_offset,
        }
    }
}

/// Post-IK hips translation. Consumed on use so it cannot be applied twice.
#[derive(Debug, PartialEq)]
#[must_use]
pub struct RootCorrection {
    displacement: Vec3,
}

impl RootCorrection {
    #[must_use]
    pub fn displacement(&self) -> Vec3 {
        self.displacement
    }

    /// Corrected world position for a hips bone currently at `hips_position`.
    #[must_use]
    pub fn apply(self, hips_position: Vec3) -> Vec3 {
        hips_position + self.displacement
    }
}
