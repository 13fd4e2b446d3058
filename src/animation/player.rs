use std::sync::Arc;

use glam::Vec3;

use crate::animation::clip::{LOCAL_EULER_CHANNELS, LOCAL_POSITION_CHANNELS, MotionClip};
use crate::animation::tracks::KeyframeCursor;
use crate::rig::{PerPoint, Pose, TrackedPoint, TrackerFrame, from_euler_degrees};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LoopMode {
    Once,
    Loop,
    PingPong,
}

/// Curve indices for one point: three position channels, then three Euler.
#[derive(Debug, Clone, Copy)]
struct PointBinding {
    channels: [usize; 6],
}

/// Replays a tracker [`MotionClip`] as local tracker poses.
#[derive(Debug, Clone)]
pub struct ClipPlayer {
    clip: Arc<MotionClip>,

    pub time: f32,
    pub time_scale: f32,
    pub loop_mode: LoopMode,
    pub paused: bool,

    /// `PingPong` only: `time` is moving back toward zero.
    reversing: bool,
    bindings: PerPoint<Option<PointBinding>>,
    cursors: Vec<KeyframeCursor>,
}

impl ClipPlayer {
    /// Binds every point whose six channels are all present in `clip`.
    #[must_use]
    pub fn new(clip: Arc<MotionClip>) -> Self {
        let bindings = PerPoint::from_fn(|point| bind_point(&clip, point));
        let cursors = vec![KeyframeCursor::default(); clip.curves.len()];

        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            loop_mode: LoopMode::Loop,
            paused: false,
            reversing: false,
            bindings,
            cursors,
        }
    }

    #[must_use]
    pub fn with_loop_mode(mut self, loop_mode: LoopMode) -> Self {
        self.loop_mode = loop_mode;
        self
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<MotionClip> {
        &self.clip
    }

    #[must_use]
    pub fn is_bound(&self, point: TrackedPoint) -> bool {
        self.bindings[point].is_some()
    }

    /// `true` once a `Once` playback has reached either end.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.loop_mode == LoopMode::Once && self.paused
    }

    /// Advances playback time.
    pub fn update(&mut self, dt: f32) {
        if self.paused {
            return;
        }

        let duration = self.clip.duration;
        if duration <= 0.0 {
            return;
        }

        let advance = dt * self.time_scale;

        match self.loop_mode {
            LoopMode::Once => {
                self.time += advance;
                if self.time >= duration {
                    self.time = duration;
                    self.paused = true;
                } else if self.time < 0.0 {
                    self.time = 0.0;
                    self.paused = true;
                }
            }
            LoopMode::Loop => {
                self.time += advance;
                if self.time >= duration {
                    self.time %= duration;
                } else if self.time < 0.0 {
                    self.time = duration + (self.time % duration);
                }
            }
            LoopMode::PingPong => {
                // The playhead runs over [0, 2 * duration); `time` is its
                // reflection into the clip.
                let double_duration = duration * 2.0;
                let playhead = if self.reversing {
                    double_duration - self.time
                } else {
                    self.time
                };
                let playhead = (playhead + advance).rem_euclid(double_duration);

                self.reversing = playhead > duration;
                self.time = if self.reversing {
                    double_duration - playhead
                } else {
                    playhead
                };
            }
        }
    }

    /// Local pose of `point` at the current time.
    pub fn sample_point(&mut self, point: TrackedPoint) -> Option<Pose> {
        let binding = self.bindings[point]?;

        let mut values = [0.0_f32; 6];
        for (value, &curve_index) in values.iter_mut().zip(binding.channels.iter()) {
            let track = &self.clip.curves[curve_index].track;
            *value = track.sample_with_cursor(self.time, &mut self.cursors[curve_index])?;
        }

        Some(Pose::new(
            Vec3::new(values[0], values[1], values[2]),
            from_euler_degrees(Vec3::new(values[3], values[4], values[5])),
        ))
    }

    /// Samples every bound point into a frame.
    pub fn sample_frame(&mut self) -> TrackerFrame {
        let mut frame = TrackerFrame::new();
        for point in TrackedPoint::ALL {
            if let Some(pose) = self.sample_point(point) {
                frame.set(point, pose);
            }
        }
        frame
    }
}

fn bind_point(clip: &MotionClip, point: TrackedPoint) -> Option<PointBinding> {
    let path = point.clip_path();
    let mut channels = [0usize; 6];
    for (slot, name) in channels
        .iter_mut()
        .zip(LOCAL_POSITION_CHANNELS.iter().chain(LOCAL_EULER_CHANNELS.iter()))
    {
        *slot = clip.curve_index(path, name)?;
    }
    Some(PointBinding { channels })
}
