//! Full-body recording.
//!
//! Instead of raw tracker poses, this path samples the skeleton's body pose
//! (muscle actuation values plus root translation and rotation) after the
//! retargeting pass of a frame, while a recorded tracker clip is replayed. The
//! session ends when the replayed clip's duration is exceeded.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::animation::{CurveBuilder, InterpolationMode, MotionClip, NamedCurve};
use crate::errors::Result;
use crate::recording::session::{RecordingSession, TickOutcome};

/// Number of muscle values in a full body pose.
pub const MUSCLE_COUNT: usize = 95;

/// A recorded muscle: index into [`BodyPose::muscles`] and channel name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MuscleChannel {
    pub muscle_index: usize,
    pub name: &'static str,
}

const fn muscle(muscle_index: usize, name: &'static str) -> MuscleChannel {
    MuscleChannel { muscle_index, name }
}

/// Muscles written to a body clip, in clip order. Fingers, eyes, jaw and
/// shoulders are not recorded.
pub const MUSCLE_CHANNELS: [MuscleChannel; 37] = [
    muscle(0, "Spine Front-Back"),
    muscle(1, "Spine Left-Right"),
    muscle(2, "Spine Twist Left-Right"),
    muscle(9, "Neck Nod Down-Up"),
    muscle(10, "Neck Tilt Left-Right"),
    muscle(11, "Neck Turn Left-Right"),
    muscle(12, "Head Nod Down-Up"),
    muscle(13, "Head Tilt Left-Right"),
    muscle(14, "Head Turn Left-Right"),
    muscle(39, "Left Arm Down-Up"),
    muscle(40, "Left Arm Front-Back"),
    muscle(41, "Left Arm Twist In-Out"),
    muscle(42, "Left Forearm Stretch"),
    muscle(43, "Left Forearm Twist In-Out"),
    muscle(44, "Left Hand Down-Up"),
    muscle(45, "Left Hand In-Out"),
    muscle(48, "Right Arm Down-Up"),
    muscle(49, "Right Arm Front-Back"),
    muscle(50, "Right Arm Twist In-Out"),
    muscle(51, "Right Forearm Stretch"),
    muscle(52, "Right Forearm Twist In-Out"),
    muscle(53, "Right Hand Down-Up"),
    muscle(54, "Right Hand In-Out"),
    muscle(21, "Left Upper Leg Front-Back"),
    muscle(22, "Left Upper Leg In-Out"),
    muscle(23, "Left Upper Leg Twist In-Out"),
    muscle(24, "Left Lower Leg Stretch"),
    muscle(25, "Left Lower Leg Twist In-Out"),
    muscle(26, "Left Foot Up-Down"),
    muscle(27, "Left Foot Twist In-Out"),
    muscle(29, "Right Upper Leg Front-Back"),
    muscle(30, "Right Upper Leg In-Out"),
    muscle(31, "Right Upper Leg Twist In-Out"),
    muscle(32, "Right Lower Leg Stretch"),
    muscle(33, "Right Lower Leg Twist In-Out"),
    muscle(34, "Right Foot Up-Down"),
    muscle(35, "Right Foot Twist In-Out"),
];

/// A root channel and how to read it from a pose.
#[derive(Debug, Clone, Copy)]
pub struct RootChannel {
    pub name: &'static str,
    pub value: fn(&BodyPose) -> f32,
}

/// Root translation and rotation channels, written after the muscles.
pub const ROOT_CHANNELS: [RootChannel; 7] = [
    RootChannel { name: "RootT.x", value: |p| p.root_position.x },
    RootChannel { name: "RootT.y", value: |p| p.root_position.y },
    RootChannel { name: "RootT.z", value: |p| p.root_position.z },
    RootChannel { name: "RootQ.x", value: |p| p.root_rotation.x },
    RootChannel { name: "RootQ.y", value: |p| p.root_rotation.y },
    RootChannel { name: "RootQ.z", value: |p| p.root_rotation.z },
    RootChannel { name: "RootQ.w", value: |p| p.root_rotation.w },
];

/// Muscle-space description of the whole skeleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPose {
    pub muscles: Vec<f32>,
    pub root_position: Vec3,
    pub root_rotation: Quat,
}

impl BodyPose {
    #[must_use]
    pub fn muscle(&self, index: usize) -> f32 {
        self.muscles.get(index).copied().unwrap_or(0.0)
    }
}

impl Default for BodyPose {
    fn default() -> Self {
        Self {
            muscles: vec![0.0; MUSCLE_COUNT],
            root_position: Vec3::ZERO,
            root_rotation: Quat::IDENTITY,
        }
    }
}

/// Host access to the skeleton's body pose.
pub trait BodyPoseSource {
    fn body_pose(&self) -> BodyPose;
}

/// Samples [`BodyPose`]s on a fixed interval into muscle and root curves.
#[derive(Debug, Clone)]
pub struct BodyPoseRecorder {
    clip_name: String,
    session: RecordingSession,
    interpolation: InterpolationMode,
    muscle_curves: Vec<CurveBuilder>,
    root_curves: Vec<CurveBuilder>,
}

impl BodyPoseRecorder {
    #[must_use]
    pub fn new(clip_name: impl Into<String>, interval: f32, interpolation: InterpolationMode) -> Self {
        Self {
            clip_name: clip_name.into(),
            session: RecordingSession::new(interval),
            interpolation,
            muscle_curves: vec![CurveBuilder::new(); MUSCLE_CHANNELS.len()],
            root_curves: vec![CurveBuilder::new(); ROOT_CHANNELS.len()],
        }
    }

    #[inline]
    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.session.is_active()
    }

    /// Starts a session that ends once `duration` seconds have elapsed.
    pub fn start(&mut self, now: f32, duration: f32) -> Result<()> {
        self.session.start(now)?;
        self.session.set_max_duration(Some(duration));
        for builder in self.muscle_curves.iter_mut().chain(self.root_curves.iter_mut()) {
            builder.clear();
        }
        log::info!("Body recording started ({duration:.3}s)");
        Ok(())
    }

    /// Starts a session that lasts as long as `clip`, the tracker clip being
    /// replayed alongside.
    pub fn start_for_clip(&mut self, now: f32, clip: &MotionClip) -> Result<()> {
        self.start(now, clip.duration)
    }

    pub fn request_stop(&mut self) -> Result<()> {
        self.session.request_stop()
    }

    /// Sampling tick, run after the frame's retargeting and IK pass.
    ///
    /// Returns the clip on the tick that ends the session.
    pub fn tick(&mut self, now: f32, source: &dyn BodyPoseSource) -> Option<MotionClip> {
        match self.session.tick(now) {
            TickOutcome::Idle | TickOutcome::Waiting => None,
            TickOutcome::Sample { timestamp } => {
                self.record(timestamp, &source.body_pose());
                None
            }
            TickOutcome::Finished => {
                log::info!("Body recording ended");
                Some(self.take_clip())
            }
        }
    }

    fn record(&mut self, timestamp: f32, pose: &BodyPose) {
        for (builder, channel) in self.muscle_curves.iter_mut().zip(MUSCLE_CHANNELS.iter()) {
            builder.add_key(timestamp, pose.muscle(channel.muscle_index));
        }
        for (builder, channel) in self.root_curves.iter_mut().zip(ROOT_CHANNELS.iter()) {
            builder.add_key(timestamp, (channel.value)(pose));
        }
    }

    fn take_clip(&mut self) -> MotionClip {
        let interpolation = self.interpolation;
        let names = MUSCLE_CHANNELS.iter().map(|c| c.name).chain(ROOT_CHANNELS.iter().map(|c| c.name));
        let curves = self
            .muscle_curves
            .iter_mut()
            .chain(self.root_curves.iter_mut())
            .zip(names)
            .map(|(builder, name)| NamedCurve::new("", name, builder.take(interpolation)))
            .collect();

        MotionClip::new(self.clip_name.clone(), curves)
    }
}
