//! Motion Recording
//!
//! Two recording paths share the same session timing and curve construction:
//!
//! - **Tracker path**: local tracker poses go through [`EulerUnwrapper`] into a
//!   [`MotionSampleStore`]; when the session ends, [`ClipSynthesizer`] turns
//!   the store into six curves per tracked point.
//! - **Full-body path**: [`BodyPoseRecorder`] samples the skeleton's
//!   [`BodyPose`] into one curve per muscle and root channel.
//!
//! Sessions are driven by a sampling tick that runs after the frame's pose
//! update, independently of it. See [`RecordingSession`].

pub mod body;
pub mod session;
pub mod store;
pub mod synth;
pub mod tracker;
pub mod unwrap;

pub use body::{BodyPose, BodyPoseRecorder, BodyPoseSource, MUSCLE_CHANNELS, MUSCLE_COUNT, ROOT_CHANNELS};
pub use session::{RecordingSession, TickOutcome};
pub use store::{MotionSample, MotionSampleStore};
pub use synth::{ClipSynthesizer, TRACKER_CHANNELS};
pub use tracker::TrackerRecorder;
pub use unwrap::{AngleUnwrapper, EulerUnwrapper};
