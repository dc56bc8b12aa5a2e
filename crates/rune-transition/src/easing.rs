//! Timing curves for the built-in transition effects.
//!
//! Curves map linear progress in `[0, 1]` to eased progress. The cubic
//! presets follow the CSS definitions; `ExponentialOut` is the fast-start,
//! long-settle curve turnstile effects use.

use serde::{Deserialize, Serialize};

/// Easing curve for effect timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// `cubic-bezier(0.42, 0, 1, 1)`
    EaseIn,
    /// `cubic-bezier(0, 0, 0.58, 1)`
    EaseOut,
    /// `cubic-bezier(0.42, 0, 0.58, 1)`
    EaseInOut,
    /// Exponential decay towards the end value; larger exponents settle sooner.
    ExponentialOut { exponent: f32 },
}

impl Default for Easing {
    fn default() -> Self {
        Self::ExponentialOut { exponent: 6.0 }
    }
}

impl Easing {
    /// Resolve a configured curve name. `exponent` only applies to
    /// `exponential_out`.
    pub fn from_name(name: &str, exponent: f32) -> Option<Self> {
        let easing = match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "linear" => Self::Linear,
            "ease_in" => Self::EaseIn,
            "ease_out" => Self::EaseOut,
            "ease_in_out" => Self::EaseInOut,
            "exponential_out" => Self::ExponentialOut { exponent },
            _ => return None,
        };
        Some(easing)
    }

    /// Evaluate the curve at progress `t` (clamped to `[0, 1]`).
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Self::Linear => t,
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::ExponentialOut { exponent } => exponential_out(exponent, t),
        }
    }
}

fn exponential_out(exponent: f32, t: f32) -> f32 {
    if exponent.abs() < f32::EPSILON {
        return t;
    }
    // ease-in is (e^(k t) - 1) / (e^k - 1); ease-out mirrors it.
    let ease_in = |x: f32| (exponent * x).exp_m1() / exponent.exp_m1();
    1.0 - ease_in(1.0 - t)
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, progress: f32) -> f32 {
    if progress <= 0.0 {
        return 0.0;
    }
    if progress >= 1.0 {
        return 1.0;
    }

    // Newton-Raphson for the curve parameter whose x matches progress.
    let mut t = progress;
    for _ in 0..8 {
        let err = bezier_coord(x1, x2, t) - progress;
        if err.abs() < 1e-6 {
            break;
        }
        let slope = bezier_slope(x1, x2, t);
        if slope.abs() < 1e-6 {
            break;
        }
        t = (t - err / slope).clamp(0.0, 1.0);
    }
    bezier_coord(y1, y2, t)
}

/// One coordinate of a bezier with endpoints 0 and 1: 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_coord(p1: f32, p2: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

#[inline]
fn bezier_slope(p1: f32, p2: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::default(),
        ] {
            assert!(approx_eq(easing.evaluate(0.0), 0.0), "{easing:?} at 0");
            assert!(approx_eq(easing.evaluate(1.0), 1.0), "{easing:?} at 1");
        }
    }

    #[test]
    fn test_curve_shapes() {
        assert!(Easing::EaseIn.evaluate(0.5) < 0.5);
        assert!(Easing::EaseOut.evaluate(0.5) > 0.5);
        assert!(approx_eq(Easing::EaseInOut.evaluate(0.5), 0.5));
        // exponential out covers most of the distance early
        assert!(Easing::default().evaluate(0.25) > 0.75);
    }

    #[test]
    fn test_clamping() {
        assert_eq!(Easing::Linear.evaluate(-1.0), 0.0);
        assert_eq!(Easing::Linear.evaluate(2.0), 1.0);
    }

    #[test]
    fn test_zero_exponent_is_linear() {
        let easing = Easing::ExponentialOut { exponent: 0.0 };
        assert!(approx_eq(easing.evaluate(0.3), 0.3));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Easing::from_name("ease-out", 0.0), Some(Easing::EaseOut));
        assert_eq!(
            Easing::from_name("exponential_out", 4.0),
            Some(Easing::ExponentialOut { exponent: 4.0 })
        );
        assert_eq!(Easing::from_name("bounce", 1.0), None);
    }
}
