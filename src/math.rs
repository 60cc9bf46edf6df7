//! Scalar helpers shared by the motion primitives: easing curves and
//! sagittal-plane directions, on top of glam.

pub use glam::{Quat, Vec2, Vec3};

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Small epsilon value for floating-point comparisons
pub const EPSILON: f32 = 1e-6;

/// Unit direction in the sagittal (x-y) plane.
///
/// `theta` is measured from straight up; positive angles tip the direction
/// forward (+x). A limb hanging straight down has `theta = PI`.
#[inline]
pub fn sagittal(theta: f32) -> Vec3 {
    let (sin, cos) = theta.sin_cos();
    Vec3::new(sin, cos, 0.0)
}

/// Linear interpolation between two scalars
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Easing curves used for pose-to-pose blending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ease {
    Linear,
    Smoothstep,
    /// `0.5 - 0.5 cos(pi u)`: zero velocity at both ends.
    #[default]
    Cosine,
    InQuad,
    OutQuad,
    InOutCubic,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        // NaN compares false everywhere, so it lands on 0 here
        let t = if t > 0.0 { t.min(1.0) } else { 0.0 };
        match self {
            Self::Linear => t,
            Self::Smoothstep => t * t * (3.0 - 2.0 * t),
            Self::Cosine => 0.5 - 0.5 * (PI * t).cos(),
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 6] = [
        Ease::Linear,
        Ease::Smoothstep,
        Ease::Cosine,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutCubic,
    ];

    #[test]
    fn test_ease_endpoints() {
        for ease in ALL {
            assert!(ease.apply(0.0).abs() < 1e-6, "{:?} at 0", ease);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6, "{:?} at 1", ease);
        }
    }

    #[test]
    fn test_ease_clamps_out_of_range_input() {
        for ease in ALL {
            assert_eq!(ease.apply(-3.0), ease.apply(0.0));
            assert_eq!(ease.apply(7.5), ease.apply(1.0));
            assert_eq!(ease.apply(f32::NAN), ease.apply(0.0));
        }
    }

    #[test]
    fn test_ease_is_monotonic() {
        for ease in ALL {
            let mut prev = ease.apply(0.0);
            for i in 1..=100 {
                let v = ease.apply(i as f32 / 100.0);
                assert!(v >= prev - 1e-6, "{:?} decreased at step {}", ease, i);
                prev = v;
            }
        }
    }

    #[test]
    fn test_cosine_midpoint() {
        assert!((Ease::Cosine.apply(0.5) - 0.5).abs() < 1e-6);
        // Slower than linear at the start
        assert!(Ease::Cosine.apply(0.1) < 0.1);
    }

    #[test]
    fn test_sagittal_directions() {
        assert!(sagittal(0.0).distance(Vec3::Y) < 1e-6);
        assert!(sagittal(PI).distance(Vec3::NEG_Y) < 1e-6);
        assert!(sagittal(PI / 2.0).distance(Vec3::X) < 1e-6);
        assert!((sagittal(1.234).length() - 1.0).abs() < 1e-6);
    }
}
