use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::errors::{MocapError, Result};
use crate::recording::unwrap::EulerUnwrapper;
use crate::rig::{PerPoint, TrackedPoint, TrackerFrame, euler_degrees};

/// One recorded tracker sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSample {
    /// Seconds since the session started.
    pub timestamp: f32,
    pub local_position: Vec3,
    /// Local rotation as continuity-adjusted Euler degrees `(x, y, z)`.
    pub local_euler: Vec3,
}

/// Append-only sample sequences, one per tracked point.
#[derive(Debug, Clone, Default)]
pub struct MotionSampleStore {
    sequences: PerPoint<Vec<MotionSample>>,
    unwrappers: PerPoint<EulerUnwrapper>,
}

impl MotionSampleStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sample for `point`, unwrapping its Euler angles against the
    /// previous sample of the same point.
    ///
    /// A negative or non-finite timestamp, or one earlier than the point's
    /// last sample, is rejected.
    pub fn append(
        &mut self,
        point: TrackedPoint,
        timestamp: f32,
        local_position: Vec3,
        local_rotation: Quat,
    ) -> Result<()> {
        if !timestamp.is_finite() || timestamp < 0.0 {
            return Err(MocapError::InvalidTimestamp { point, timestamp });
        }

        let sequence = &mut self.sequences[point];
        if let Some(last) = sequence.last()
            && timestamp < last.timestamp
        {
            return Err(MocapError::NonMonotonicTimestamp {
                point,
                previous: last.timestamp,
                timestamp,
            });
        }

        let local_euler = self.unwrappers[point].unwrap(euler_degrees(local_rotation));
        sequence.push(MotionSample {
            timestamp,
            local_position,
            local_euler,
        });
        Ok(())
    }

    /// Appends every tracker present in `frame`. Returns how many were stored.
    pub fn append_frame(&mut self, timestamp: f32, frame: &TrackerFrame) -> usize {
        let mut stored = 0;
        for (point, pose) in frame.iter() {
            match self.append(point, timestamp, pose.position, pose.rotation) {
                Ok(()) => stored += 1,
                Err(err) => log::warn!("Dropping sample: {err}"),
            }
        }
        stored
    }

    #[inline]
    #[must_use]
    pub fn samples(&self, point: TrackedPoint) -> &[MotionSample] {
        &self.sequences[point]
    }

    #[must_use]
    pub fn total_samples(&self) -> usize {
        self.sequences.0.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_samples() == 0
    }

    /// Discards every sample and the unwrapping history for a fresh session.
    pub fn clear(&mut self) {
        for (_, sequence) in self.sequences.iter_mut() {
            sequence.clear();
        }
        for (_, unwrapper) in self.unwrappers.iter_mut() {
            unwrapper.reset();
        }
    }
}
