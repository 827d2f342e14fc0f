use keyframe::EasingFunction;

/// CSS-style cubic Bézier timing curve from (0, 0) to (1, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    pub const FAST_OUT_SLOW_IN: CubicBezier = CubicBezier::new(0.4, 0., 0.2, 1.);
    pub const FRICTION: CubicBezier = CubicBezier::new(0.2, 0., 0.2, 1.);
    pub const SHARP: CubicBezier = CubicBezier::new(0.33, 0., 0.67, 1.);

    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn x_for_t(&self, t: f64) -> f64 {
        let omt = 1. - t;
        3. * omt * omt * t * self.x1 + 3. * omt * t * t * self.x2 + t * t * t
    }

    fn y_for_t(&self, t: f64) -> f64 {
        let omt = 1. - t;
        3. * omt * omt * t * self.y1 + 3. * omt * t * t * self.y2 + t * t * t
    }

    /// Inverts `x_for_t` by bisection, x is monotonic in t for x1, x2 in [0, 1].
    fn t_for_x(&self, x: f64) -> f64 {
        let mut min_t = 0.;
        let mut max_t = 1.;

        for _ in 0..=30 {
            let guess_t = (min_t + max_t) / 2.;
            if x < self.x_for_t(guess_t) {
                max_t = guess_t;
            } else {
                min_t = guess_t;
            }
        }

        (min_t + max_t) / 2.
    }
}

impl EasingFunction for CubicBezier {
    fn y(&self, x: f64) -> f64 {
        match x.clamp(0., 1.) {
            0. => 0.,
            1. => 1.,
            val => self.y_for_t(self.t_for_x(val)),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn endpoints_are_exact() {
        for curve in [
            CubicBezier::FAST_OUT_SLOW_IN,
            CubicBezier::FRICTION,
            CubicBezier::SHARP,
        ] {
            assert_eq!(curve.y(0.), 0.);
            assert_eq!(curve.y(1.), 1.);
            assert_eq!(curve.y(-1.), 0.);
            assert_eq!(curve.y(2.), 1.);
        }
    }

    #[test]
    fn linear_control_points_are_identity() {
        let linear = CubicBezier::new(0.25, 0.25, 0.75, 0.75);
        for x in [0.1, 0.3, 0.5, 0.9] {
            assert_abs_diff_eq!(linear.y(x), x, epsilon = 1e-6);
        }
    }

    #[test]
    fn fast_out_slow_in_is_ahead_at_midpoint() {
        assert!(CubicBezier::FAST_OUT_SLOW_IN.y(0.5) > 0.7);
    }
}
