//! Tracker Rig
//!
//! The fixed seven-point tracker rig and the skeleton bones it drives.
//!
//! Every per-point fact (display name, clip path, driven bone) lives in the
//! static [`RIG_POINTS`] table, indexed by [`TrackedPoint::index`]. Code that
//! needs to enumerate the rig iterates the table instead of matching on
//! variants.

pub mod pose;

use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::MocapError;

pub use pose::{Pose, SkeletonPose, TrackerFrame, euler_degrees, from_euler_degrees};

/// One of the seven physical tracking points attached to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackedPoint {
    Head,
    Chest,
    Pelvis,
    LeftHand,
    RightHand,
    LeftFoot,
    RightFoot,
}

/// Skeleton bones read or written by the retargeting pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HumanBone {
    Hips,
    Spine,
    Head,
    LeftFoot,
    RightFoot,
    LeftHand,
    RightHand,
}

/// The four limb goals handed to the external IK solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IkGoal {
    LeftFoot,
    RightFoot,
    LeftHand,
    RightHand,
}

/// Static description of one rig point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RigPointInfo {
    pub point: TrackedPoint,
    /// Name used in logs and settings.
    pub name: &'static str,
    /// Node path the recorded curves bind to on replay.
    pub clip_path: &'static str,
    /// Skeleton bone the point corresponds to at calibration time.
    pub bone: HumanBone,
}

/// Rig table, in [`TrackedPoint`] declaration order.
pub const RIG_POINTS: [RigPointInfo; TrackedPoint::COUNT] = [
    RigPointInfo { point: TrackedPoint::Head, name: "Head", clip_path: "Head", bone: HumanBone::Head },
    RigPointInfo { point: TrackedPoint::Chest, name: "Chest", clip_path: "Shoulders", bone: HumanBone::Spine },
    RigPointInfo { point: TrackedPoint::Pelvis, name: "Pelvis", clip_path: "Pelvis", bone: HumanBone::Hips },
    RigPointInfo { point: TrackedPoint::LeftHand, name: "LeftHand", clip_path: "LeftHand", bone: HumanBone::LeftHand },
    RigPointInfo { point: TrackedPoint::RightHand, name: "RightHand", clip_path: "RightHand", bone: HumanBone::RightHand },
    RigPointInfo { point: TrackedPoint::LeftFoot, name: "LeftFoot", clip_path: "LeftLeg", bone: HumanBone::LeftFoot },
    RigPointInfo { point: TrackedPoint::RightFoot, name: "RightFoot", clip_path: "RightLeg", bone: HumanBone::RightFoot },
];

/// Order in which point curves are written into a synthesized clip.
pub const CLIP_ORDER: [TrackedPoint; TrackedPoint::COUNT] = [
    TrackedPoint::RightHand,
    TrackedPoint::LeftHand,
    TrackedPoint::RightFoot,
    TrackedPoint::LeftFoot,
    TrackedPoint::Pelvis,
    TrackedPoint::Chest,
    TrackedPoint::Head,
];

impl TrackedPoint {
    pub const COUNT: usize = 7;

    pub const ALL: [TrackedPoint; Self::COUNT] = [
        TrackedPoint::Head,
        TrackedPoint::Chest,
        TrackedPoint::Pelvis,
        TrackedPoint::LeftHand,
        TrackedPoint::RightHand,
        TrackedPoint::LeftFoot,
        TrackedPoint::RightFoot,
    ];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    #[must_use]
    pub fn info(self) -> &'static RigPointInfo {
        &RIG_POINTS[self.index()]
    }

    #[inline]
    #[must_use]
    pub fn name(self) -> &'static str {
        self.info().name
    }

    #[inline]
    #[must_use]
    pub fn clip_path(self) -> &'static str {
        self.info().clip_path
    }

    #[inline]
    #[must_use]
    pub fn bone(self) -> HumanBone {
        self.info().bone
    }

    /// Looks a point up by the path its curves are bound to in a clip.
    #[must_use]
    pub fn from_clip_path(path: &str) -> Option<Self> {
        RIG_POINTS.iter().find(|info| info.clip_path == path).map(|info| info.point)
    }
}

impl FromStr for TrackedPoint {
    type Err = MocapError;

    /// Accepts either the point name or its clip path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RIG_POINTS
            .iter()
            .find(|info| info.name == s || info.clip_path == s)
            .map(|info| info.point)
            .ok_or_else(|| MocapError::UnknownTrackedPoint(s.to_string()))
    }
}

impl HumanBone {
    pub const COUNT: usize = 7;

    pub const ALL: [HumanBone; Self::COUNT] = [
        HumanBone::Hips,
        HumanBone::Spine,
        HumanBone::Head,
        HumanBone::LeftFoot,
        HumanBone::RightFoot,
        HumanBone::LeftHand,
        HumanBone::RightHand,
    ];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl IkGoal {
    pub const COUNT: usize = 4;

    pub const ALL: [IkGoal; Self::COUNT] =
        [IkGoal::LeftFoot, IkGoal::RightFoot, IkGoal::LeftHand, IkGoal::RightHand];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Tracker that drives this goal.
    #[must_use]
    pub const fn tracked_point(self) -> TrackedPoint {
        match self {
            IkGoal::LeftFoot => TrackedPoint::LeftFoot,
            IkGoal::RightFoot => TrackedPoint::RightFoot,
            IkGoal::LeftHand => TrackedPoint::LeftHand,
            IkGoal::RightHand => TrackedPoint::RightHand,
        }
    }
}

/// Fixed-size map with one slot per [`TrackedPoint`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerPoint<T>(pub [T; TrackedPoint::COUNT]);

impl<T> PerPoint<T> {
    pub fn from_fn(mut f: impl FnMut(TrackedPoint) -> T) -> Self {
        Self(TrackedPoint::ALL.map(&mut f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (TrackedPoint, &T)> {
        TrackedPoint::ALL.into_iter().zip(self.0.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (TrackedPoint, &mut T)> {
        TrackedPoint::ALL.into_iter().zip(self.0.iter_mut())
    }
}

impl<T: Default> Default for PerPoint<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T> Index<TrackedPoint> for PerPoint<T> {
    type Output = T;

    #[inline]
    fn index(&self, point: TrackedPoint) -> &T {
        &self.0[point.index()]
    }
}

impl<T> IndexMut<TrackedPoint> for PerPoint<T> {
    #[inline]
    fn index_mut(&mut self, point: TrackedPoint) -> &mut T {
        &mut self.0[point.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rig_table_matches_declaration_order() {
        for (i, info) in RIG_POINTS.iter().enumerate() {
            assert_eq!(info.point.index(), i);
            assert_eq!(TrackedPoint::ALL[i], info.point);
        }
    }

    #[test]
    fn clip_order_covers_every_point_once() {
        for point in TrackedPoint::ALL {
            assert_eq!(CLIP_ORDER.iter().filter(|p| **p == point).count(), 1);
        }
    }
}
