//! Alpha curves over an effect's lifetime.

use serde::{Deserialize, Serialize};

/// Linear interpolation between `a` and `b`, with `t` clamped to 0.0 - 1.0.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    a + (b - a) * t
}

/// Maps lifetime progress (0.0 - 1.0) to an alpha value (0.0 - 1.0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FadeCurve {
    /// Fully opaque for the whole lifetime.
    #[default]
    Constant,
    /// Starts opaque, ends transparent.
    FadeOut,
    /// Starts transparent, ends opaque.
    FadeIn,
    /// Rises to opaque at the midpoint, then falls back.
    Triangle,
}

impl FadeCurve {
    /// Alpha at the given progress.
    pub fn alpha(&self, progress: f32) -> f32 {
        let t = progress.clamp(0.0, 1.0);
        match self {
            FadeCurve::Constant => 1.0,
            FadeCurve::FadeOut => lerp(1.0, 0.0, t),
            FadeCurve::FadeIn => lerp(0.0, 1.0, t),
            FadeCurve::Triangle => {
                if t <= 0.5 {
                    lerp(0.0, 1.0, t * 2.0)
                } else {
                    lerp(1.0, 0.0, (t - 0.5) * 2.0)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, -1.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 2.0), 10.0);
    }

    #[test]
    fn test_fade_curves() {
        assert_eq!(FadeCurve::Constant.alpha(0.7), 1.0);
        assert!((FadeCurve::FadeOut.alpha(0.25) - 0.75).abs() < 0.001);
        assert!((FadeCurve::FadeIn.alpha(0.25) - 0.25).abs() < 0.001);
    }

    #[test]
    fn test_triangle_peaks_at_midpoint() {
        assert_eq!(FadeCurve::Triangle.alpha(0.0), 0.0);
        assert_eq!(FadeCurve::Triangle.alpha(0.5), 1.0);
        assert_eq!(FadeCurve::Triangle.alpha(1.0), 0.0);
        assert!((FadeCurve::Triangle.alpha(0.75) - 0.5).abs() < 0.001);
    }
}
