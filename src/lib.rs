//! Full-body avatar animation from sparse VR trackers.
//!
//! Seven tracked points (head, chest, pelvis, both hands, both feet) drive a
//! humanoid skeleton through an external IK solver, and tracker motion can be
//! recorded into replayable curve clips.
//!
//! - [`calibration`]: tracker-to-bone offsets from a one-time reference pose
//! - [`retarget`]: per-frame bone rotations, IK goals and hip correction
//! - [`recording`]: angle unwrapping, sample storage, clip synthesis
//! - [`animation`]: keyframe tracks, clips and replay
//! - [`controller`]: action handling and frame wiring

pub mod animation;
pub mod assets;
pub mod calibration;
pub mod controller;
pub mod errors;
pub mod recording;
pub mod retarget;
pub mod rig;
pub mod settings;

pub use animation::{ClipPlayer, InterpolationMode, LoopMode, MotionClip};
pub use assets::{CalibrationStore, ClipLibrary};
pub use calibration::{BoneOffsets, CalibrationOffsetComputer, CalibrationPose, GripAnchor};
pub use controller::{MocapAction, MocapController};
pub use errors::{MocapError, Result};
pub use recording::{AngleUnwrapper, BodyPoseRecorder, ClipSynthesizer, MotionSampleStore, TrackerRecorder};
pub use retarget::{IkSolver, RetargetTargets, RetargetingEngine, Skeleton};
pub use rig::{HumanBone, IkGoal, Pose, SkeletonPose, TrackedPoint, TrackerFrame};
pub use settings::MocapSettings;
