use glam::Vec3;

const FULL_TURN: f32 = 360.0;
const HALF_TURN: f32 = 180.0;

/// Continuity filter for one Euler axis.
///
/// Raw angles wrap at the 0/360 boundary. Each emitted value is the raw angle
/// shifted by the multiple of 360° that lands closest to the previous emitted
/// value, so consecutive outputs never differ by more than 180°.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AngleUnwrapper {
    previous: Option<f32>,
}

impl AngleUnwrapper {
    #[must_use]
    pub const fn new() -> Self {
        Self { previous: None }
    }

    #[inline]
    #[must_use]
    pub fn previous(&self) -> Option<f32> {
        self.previous
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// Emits the continuity-corrected value for `raw` degrees.
    pub fn unwrap(&mut self, raw: f32) -> f32 {
        let emitted = match self.previous {
            None => raw,
            Some(previous) if (previous - raw).abs() > HALF_TURN => {
                raw + FULL_TURN * ((previous - raw) / FULL_TURN).round()
            }
            Some(_) => raw,
        };
        self.previous = Some(emitted);
        emitted
    }
}

/// Three independent [`AngleUnwrapper`]s, one per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EulerUnwrapper {
    axes: [AngleUnwrapper; 3],
}

impl EulerUnwrapper {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            axes: [AngleUnwrapper::new(); 3],
        }
    }

    pub fn reset(&mut self) {
        for axis in &mut self.axes {
            axis.reset();
        }
    }

    pub fn unwrap(&mut self, raw: Vec3) -> Vec3 {
        Vec3::new(
            self.axes[0].unwrap(raw.x),
            self.axes[1].unwrap(raw.y),
            self.axes[2].unwrap(raw.z),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unwrap_all(raw: &[f32]) -> Vec<f32> {
        let mut unwrapper = AngleUnwrapper::new();
        raw.iter().map(|&r| unwrapper.unwrap(r)).collect()
    }

    #[test]
    fn wraps_across_zero() {
        assert_eq!(unwrap_all(&[10.0, 350.0, 5.0]), vec![10.0, -10.0, 5.0]);
    }

    #[test]
    fn first_sample_passes_through() {
        assert_eq!(unwrap_all(&[359.0]), vec![359.0]);
    }

    #[test]
    fn exact_half_turn_is_left_alone() {
        assert_eq!(unwrap_all(&[0.0, 180.0]), vec![0.0, 180.0]);
    }

    #[test]
    fn continuous_spin_keeps_accumulating() {
        // Steady 100° steps through several full turns.
        let raw: Vec<f32> = (0..20).map(|i| (i as f32 * 100.0).rem_euclid(360.0)).collect();
        let out = unwrap_all(&raw);
        for (i, value) in out.iter().enumerate() {
            assert!((value - i as f32 * 100.0).abs() < 1e-3, "step {i}: {value}");
        }
    }

    #[test]
    fn axes_are_independent() {
        let mut euler = EulerUnwrapper::new();
        euler.unwrap(Vec3::new(10.0, 10.0, 10.0));
        let out = euler.unwrap(Vec3::new(350.0, 20.0, 190.0));
        assert_eq!(out, Vec3::new(-10.0, 20.0, 190.0));
    }
}
