//! Calibration
//!
//! A calibration pose is captured once, while the user stands in the
//! skeleton's reference pose. From it, [`CalibrationOffsetComputer`] derives a
//! [`BoneOffset`] per tracked point: the bone-to-tracker vector and the
//! inverse tracker rotation at that instant.
//!
//! Offsets are always recomputed for all seven points together, and only from
//! a complete [`CalibrationPose`]. Without a pose the computer does nothing
//! and the previous offsets stay in force.

mod offsets;
mod pose;

pub use offsets::{BoneOffset, BoneOffsets, CalibrationOffsetComputer, GripAnchor};
pub use pose::CalibrationPose;
