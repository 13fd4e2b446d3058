use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::rig::{HumanBone, PerPoint, TrackedPoint};

/// Rigid transform: position plus unit rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    #[inline]
    #[must_use]
    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    #[inline]
    #[must_use]
    pub const fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// World pose of a child attached at `local_position` / `local_rotation`.
    #[inline]
    #[must_use]
    pub fn child(&self, local_position: Vec3, local_rotation: Quat) -> Self {
        Self {
            position: self.position + self.rotation * local_position,
            rotation: self.rotation * local_rotation,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Converts a rotation to Euler angles in degrees, each in `[0, 360)`.
///
/// Uses the Y-X-Z composition (`q = Ry * Rx * Rz`); the returned vector holds
/// the angles as `(x, y, z)`.
#[must_use]
pub fn euler_degrees(rotation: Quat) -> Vec3 {
    let (y, x, z) = rotation.to_euler(EulerRot::YXZ);
    Vec3::new(wrap_degrees(x.to_degrees()), wrap_degrees(y.to_degrees()), wrap_degrees(z.to_degrees()))
}

/// Inverse of [`euler_degrees`]; accepts unwrapped angles of any range.
#[must_use]
pub fn from_euler_degrees(angles: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        angles.y.to_radians(),
        angles.x.to_radians(),
        angles.z.to_radians(),
    )
}

fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0 in f32
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Live tracker poses for one frame. Absent devices are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerFrame {
    poses: PerPoint<Option<Pose>>,
}

impl TrackerFrame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, point: TrackedPoint, pose: Pose) -> Self {
        self.set(point, pose);
        self
    }

    pub fn set(&mut self, point: TrackedPoint, pose: Pose) {
        self.poses[point] = Some(pose);
    }

    pub fn remove(&mut self, point: TrackedPoint) {
        self.poses[point] = None;
    }

    #[inline]
    #[must_use]
    pub fn get(&self, point: TrackedPoint) -> Option<Pose> {
        self.poses[point]
    }

    /// Pose of `point`, or origin/identity when the tracker is absent.
    #[inline]
    #[must_use]
    pub fn pose_or_identity(&self, point: TrackedPoint) -> Pose {
        self.poses[point].unwrap_or(Pose::IDENTITY)
    }

    #[must_use]
    pub fn missing(&self) -> SmallVec<[TrackedPoint; TrackedPoint::COUNT]> {
        self.poses.iter().filter(|(_, pose)| pose.is_none()).map(|(point, _)| point).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TrackedPoint, Pose)> + '_ {
        self.poses.iter().filter_map(|(point, pose)| pose.map(|p| (point, p)))
    }
}

/// Immutable snapshot of the skeleton's bone world transforms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkeletonPose {
    bones: [Pose; HumanBone::COUNT],
}

impl SkeletonPose {
    pub fn from_fn(mut f: impl FnMut(HumanBone) -> Pose) -> Self {
        Self {
            bones: HumanBone::ALL.map(&mut f),
        }
    }

    #[inline]
    #[must_use]
    pub fn bone(&self, bone: HumanBone) -> Pose {
        self.bones[bone.index()]
    }

    pub fn set_bone(&mut self, bone: HumanBone, pose: Pose) {
        self.bones[bone.index()] = pose;
    }

    #[must_use]
    pub fn with_bone(mut self, bone: HumanBone, pose: Pose) -> Self {
        self.set_bone(bone, pose);
        self
    }
}

impl Default for SkeletonPose {
    fn default() -> Self {
        Self::from_fn(|_| Pose::IDENTITY)
    }
}
