//! Curve construction from irregularly timed samples.
//!
//! Recorded samples arrive whenever the sampling tick fires, so key spacing is
//! uneven. Tangents for cubic curves therefore use the actual spacing on each
//! side of a key rather than assuming a fixed frame rate.

use crate::animation::tracks::{InterpolationMode, KeyframeTrack};

/// Accumulates `(time, value)` keys and turns them into a [`KeyframeTrack`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveBuilder {
    times: Vec<f32>,
    values: Vec<f32>,
}

impl CurveBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            times: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Appends a key. Returns `false` and drops it when `time` does not move
    /// past the previous key; the first key at a given time wins.
    pub fn add_key(&mut self, time: f32, value: f32) -> bool {
        if let Some(&last) = self.times.last()
            && time <= last
        {
            log::debug!("Dropping key at {time}: previous key is at {last}");
            return false;
        }
        self.times.push(time);
        self.values.push(value);
        true
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn clear(&mut self) {
        self.times.clear();
        self.values.clear();
    }

    #[must_use]
    pub fn build(&self, interpolation: InterpolationMode) -> KeyframeTrack<f32> {
        let values = match interpolation {
            InterpolationMode::Linear | InterpolationMode::Step => self.values.clone(),
            InterpolationMode::CubicSpline => {
                let mut packed = Vec::with_capacity(self.values.len() * 3);
                for (i, &value) in self.values.iter().enumerate() {
                    let tangent = self.smooth_tangent(i);
                    packed.extend_from_slice(&[tangent, value, tangent]);
                }
                packed
            }
        };

        KeyframeTrack::new(self.times.clone(), values, interpolation)
    }

    /// Builds and resets in one step.
    pub fn take(&mut self, interpolation: InterpolationMode) -> KeyframeTrack<f32> {
        let track = self.build(interpolation);
        self.clear();
        track
    }

    fn slope(&self, from: usize, to: usize) -> f32 {
        (self.values[to] - self.values[from]) / (self.times[to] - self.times[from])
    }

    /// Tangent at key `i`, in value units per second.
    ///
    /// Interior keys blend both neighbouring slopes weighted by the opposite
    /// interval, which is exact for quadratic motion under uneven spacing.
    fn smooth_tangent(&self, i: usize) -> f32 {
        let len = self.times.len();
        if len < 2 {
            return 0.0;
        }
        if i == 0 {
            return self.slope(0, 1);
        }
        if i == len - 1 {
            return self.slope(len - 2, len - 1);
        }

        let h0 = self.times[i] - self.times[i - 1];
        let h1 = self.times[i + 1] - self.times[i];
        (h1 * self.slope(i - 1, i) + h0 * self.slope(i, i + 1)) / (h0 + h1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_time_keeps_first_key() {
        let mut builder = CurveBuilder::new();
        assert!(builder.add_key(0.0, 1.0));
        assert!(!builder.add_key(0.0, 2.0));
        assert!(builder.add_key(0.5, 3.0));
        let track = builder.build(InterpolationMode::Linear);
        assert_eq!(track.values, vec![1.0, 3.0]);
    }

    #[test]
    fn tangent_exact_for_quadratic_on_uneven_spacing() {
        let mut builder = CurveBuilder::new();
        for t in [0.0_f32, 0.1, 0.35, 0.4] {
            builder.add_key(t, t * t);
        }
        // d/dt t^2 = 2t
        assert!((builder.smooth_tangent(1) - 0.2).abs() < 1e-4);
        assert!((builder.smooth_tangent(2) - 0.7).abs() < 1e-4);
    }
}
