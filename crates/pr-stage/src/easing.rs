//! Easing curves for the roller scroll

use serde::{Deserialize, Serialize};

/// CSS-style cubic Bézier easing with fixed end points (0,0) and (1,1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Fast start, long gentle settle
    pub const fn roller() -> Self {
        Self::new(0.2, 0.8, 0.4, 1.0)
    }

    pub const fn linear() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// CSS `cubic-bezier(...)` notation
    pub fn css(&self) -> String {
        format!("cubic-bezier({}, {}, {}, {})", self.x1, self.y1, self.x2, self.y2)
    }

    fn component(t: f64, p1: f64, p2: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    }

    fn component_slope(t: f64, p1: f64, p2: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
    }

    /// Curve parameter whose x equals `x`
    fn solve_t(&self, x: f64) -> f64 {
        // Newton first, bisection if the slope flattens out
        let mut t = x;
        for _ in 0..8 {
            let err = Self::component(t, self.x1, self.x2) - x;
            if err.abs() < 1e-7 {
                return t;
            }
            let slope = Self::component_slope(t, self.x1, self.x2);
            if slope.abs() < 1e-6 {
                break;
            }
            t = (t - err / slope).clamp(0.0, 1.0);
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        while hi - lo > 1e-7 {
            if Self::component(t, self.x1, self.x2) < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }

    /// Eased progress for linear progress `x` in [0, 1]
    pub fn ease(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        Self::component(self.solve_t(x), self.y1, self.y2)
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::roller()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_end_points() {
        let curve = CubicBezier::roller();
        assert_eq!(curve.ease(0.0), 0.0);
        assert_eq!(curve.ease(1.0), 1.0);
        assert_eq!(curve.ease(-3.0), 0.0);
        assert_eq!(curve.ease(7.0), 1.0);
    }

    #[test]
    fn test_linear_is_identity() {
        let curve = CubicBezier::linear();
        for i in 0..=10 {
            let x = i as f64 / 10.0;
            assert_abs_diff_eq!(curve.ease(x), x, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_roller_curve_front_loaded_and_monotonic() {
        let curve = CubicBezier::roller();
        assert!(curve.ease(0.25) > 0.5);

        let mut last = 0.0;
        for i in 1..=100 {
            let y = curve.ease(i as f64 / 100.0);
            assert!(y >= last - 1e-9);
            last = y;
        }
    }

    #[test]
    fn test_css_notation() {
        assert_eq!(CubicBezier::roller().css(), "cubic-bezier(0.2, 0.8, 0.4, 1)");
    }
}
