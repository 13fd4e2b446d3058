use crate::animation::{
    CurveBuilder, InterpolationMode, LOCAL_EULER_CHANNELS, LOCAL_POSITION_CHANNELS, MotionClip, NamedCurve,
};
use crate::recording::store::{MotionSample, MotionSampleStore};
use crate::rig::CLIP_ORDER;

/// One per-point channel and how to read it from a sample.
#[derive(Debug, Clone, Copy)]
pub struct TrackerChannel {
    pub name: &'static str,
    pub value: fn(&MotionSample) -> f32,
}

/// The six channels written for every tracked point.
pub const TRACKER_CHANNELS: [TrackerChannel; 6] = [
    TrackerChannel { name: LOCAL_POSITION_CHANNELS[0], value: |s| s.local_position.x },
    TrackerChannel { name: LOCAL_POSITION_CHANNELS[1], value: |s| s.local_position.y },
    TrackerChannel { name: LOCAL_POSITION_CHANNELS[2], value: |s| s.local_position.z },
    TrackerChannel { name: LOCAL_EULER_CHANNELS[0], value: |s| s.local_euler.x },
    TrackerChannel { name: LOCAL_EULER_CHANNELS[1], value: |s| s.local_euler.y },
    TrackerChannel { name: LOCAL_EULER_CHANNELS[2], value: |s| s.local_euler.z },
];

/// Turns a finished [`MotionSampleStore`] into a [`MotionClip`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipSynthesizer {
    pub interpolation: InterpolationMode,
}

impl ClipSynthesizer {
    #[must_use]
    pub const fn new(interpolation: InterpolationMode) -> Self {
        Self { interpolation }
    }

    /// Six curves per point, in clip order. An empty store yields curves with
    /// no keys.
    #[must_use]
    pub fn synthesize(&self, name: &str, store: &MotionSampleStore) -> MotionClip {
        let mut curves = Vec::with_capacity(CLIP_ORDER.len() * TRACKER_CHANNELS.len());

        for point in CLIP_ORDER {
            let samples = store.samples(point);
            for channel in &TRACKER_CHANNELS {
                let mut builder = CurveBuilder::with_capacity(samples.len());
                for sample in samples {
                    builder.add_key(sample.timestamp, (channel.value)(sample));
                }
                curves.push(NamedCurve::new(point.clip_path(), channel.name, builder.build(self.interpolation)));
            }
        }

        let clip = MotionClip::new(name, curves);
        log::debug!(
            "Synthesized clip '{}': {} curves, {} keys, {:.3}s",
            clip.name,
            clip.curves.len(),
            clip.key_count(),
            clip.duration
        );
        clip
    }
}

impl Default for ClipSynthesizer {
    fn default() -> Self {
        Self::new(InterpolationMode::CubicSpline)
    }
}
