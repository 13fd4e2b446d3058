//! Animation Curves
//!
//! Keyframe tracks, clips of named curves, and clip replay.
//!
//! - [`KeyframeTrack`]: keys over time with linear, step or cubic interpolation
//! - [`CurveBuilder`]: builds tracks from irregularly timed samples
//! - [`MotionClip`]: named curves keyed by `(path, channel)`
//! - [`ClipPlayer`]: plays a tracker clip back as local tracker poses

pub mod clip;
pub mod curve;
pub mod player;
pub mod tracks;
pub mod values;

pub use clip::{LOCAL_EULER_CHANNELS, LOCAL_POSITION_CHANNELS, MotionClip, NamedCurve};
pub use curve::CurveBuilder;
pub use player::{ClipPlayer, LoopMode};
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
pub use values::Interpolatable;
