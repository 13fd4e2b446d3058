//! Retargeting
//!
//! The per-frame core. Each frame runs in three explicit phases:
//!
//! 1. **Compute targets**: [`RetargetingEngine::compute_targets`] is a pure
//!    function of a [`SkeletonPose`](crate::rig::SkeletonPose) snapshot, the
//!    live [`TrackerFrame`](crate::rig::TrackerFrame) and the stored
//!    calibration offsets. It yields bone rotations, IK goals and the hip
//!    displacement.
//! 2. **Solve IK**: an external [`IkSolver`] consumes the goals.
//! 3. **Root correction**: the [`RootCorrection`] taken from the targets is
//!    applied to the post-IK hips position, exactly once.
//!
//! [`RetargetingEngine::drive_frame`] runs the three phases in order against a
//! host [`Skeleton`].

mod engine;
mod host;
mod targets;

pub use engine::RetargetingEngine;
pub use host::{IkSolver, Skeleton};
pub use targets::{BoneRotations, IkGoalSet, IkTarget, RetargetTargets, RootCorrection};
