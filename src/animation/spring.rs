use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub damping: f64,
    pub mass: f64,
    pub stiffness: f64,
    pub epsilon: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct Spring {
    pub from: f64,
    pub to: f64,
    pub initial_velocity: f64,
    pub params: SpringParams,
}

impl SpringParams {
    /// Unit-mass spring described by its damping ratio.
    pub fn new(damping_ratio: f64, stiffness: f64, epsilon: f64) -> Self {
        let damping_ratio = damping_ratio.max(0.);
        let stiffness = stiffness.max(0.);
        let critical_damping = 2. * stiffness.sqrt();

        Self::from_coefficients(1., stiffness, damping_ratio * critical_damping, epsilon)
    }

    /// Spring described by its raw physical coefficients.
    pub fn from_coefficients(mass: f64, stiffness: f64, damping: f64, epsilon: f64) -> Self {
        Self {
            damping: damping.max(0.),
            // Zero mass makes every closed form below divide by zero.
            mass: mass.max(0.001),
            stiffness: stiffness.max(0.),
            epsilon: epsilon.max(0.),
        }
    }
}

impl Spring {
    /// Spring from `from` to `to` whose initial velocity is given in units of the travelled
    /// distance per second.
    pub fn interpolating(from: f64, to: f64, normalized_velocity: f64, params: SpringParams) -> Self {
        Self {
            from,
            to,
            initial_velocity: normalized_velocity * (to - from),
            params,
        }
    }

    pub fn value_at(&self, t: Duration) -> f64 {
        self.oscillate(t.as_secs_f64())
    }

    // Based on libadwaita (LGPL-2.1-or-later):
    // https://gitlab.gnome.org/GNOME/libadwaita/-/blob/1.4.4/src/adw-spring-animation.c,
    // which itself is based on (MIT):
    // https://github.com/robb/RBBAnimation/blob/master/RBBAnimation/RBBSpringAnimation.m
    /// Computes and returns the duration until the spring is at rest.
    pub fn duration(&self) -> Duration {
        const DELTA: f64 = 0.001;

        let beta = self.params.damping / (2. * self.params.mass);

        if beta.abs() <= f64::EPSILON || beta < 0. {
            return Duration::MAX;
        }

        if (self.to - self.from).abs() <= f64::EPSILON {
            return Duration::ZERO;
        }

        let omega0 = (self.params.stiffness / self.params.mass).sqrt();

        // The envelope dropping below epsilon is the estimate for oscillating springs and the
        // first guess for overdamped ones.
        let mut x0 = -self.params.epsilon.ln() / beta;

        // f64::EPSILON is too small for this specific comparison, so we use
        // f32::EPSILON even though it's doubles.
        if (beta - omega0).abs() <= f64::from(f32::EPSILON) || beta < omega0 {
            return Duration::from_secs_f64(x0.max(0.));
        }

        // Overdamped solutions decay slower than the envelope, so refine on the oscillation
        // itself with Newton's method.
        let mut y0 = self.oscillate(x0);
        let m = (self.oscillate(x0 + DELTA) - y0) / DELTA;

        let mut x1 = (self.to - y0 + m * x0) / m;
        let mut y1 = self.oscillate(x1);

        let mut i = 0;
        while (self.to - y1).abs() > self.params.epsilon {
            if i > 1000 {
                return Duration::ZERO;
            }

            x0 = x1;
            y0 = y1;

            let m = (self.oscillate(x0 + DELTA) - y0) / DELTA;

            x1 = (self.to - y0 + m * x0) / m;
            y1 = self.oscillate(x1);

            if !y1.is_finite() {
                return Duration::from_secs_f64(x0.max(0.));
            }

            i += 1;
        }

        if !x1.is_finite() {
            return Duration::ZERO;
        }

        Duration::from_secs_f64(x1.max(0.))
    }

    /// Returns the spring position at a given time in seconds.
    fn oscillate(&self, t: f64) -> f64 {
        let b = self.params.damping;
        let m = self.params.mass;
        let k = self.params.stiffness;
        let v0 = self.initial_velocity;

        let beta = b / (2. * m);
        let omega0 = (k / m).sqrt();

        let x0 = self.from - self.to;

        let envelope = (-beta * t).exp();

        // Solutions of the form C1*e^(lambda1*x) + C2*e^(lambda2*x)
        // for the differential equation m*ẍ+b*ẋ+kx = 0

        // f64::EPSILON is too small for this specific comparison, so we use
        // f32::EPSILON even though it's doubles.
        if (beta - omega0).abs() <= f64::from(f32::EPSILON) {
            // Critically damped.
            self.to + envelope * (x0 + (beta * x0 + v0) * t)
        } else if beta < omega0 {
            // Underdamped.
            let omega1 = ((omega0 * omega0) - (beta * beta)).sqrt();

            self.to
                + envelope
                    * (x0 * (omega1 * t).cos() + ((beta * x0 + v0) / omega1) * (omega1 * t).sin())
        } else {
            // Overdamped.
            let omega2 = ((beta * beta) - (omega0 * omega0)).sqrt();

            self.to
                + envelope
                    * (x0 * (omega2 * t).cosh() + ((beta * x0 + v0) / omega2) * (omega2 * t).sinh())
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn toss_params() -> SpringParams {
        SpringParams::from_coefficients(1., 20., 10., 0.01)
    }

    #[test]
    fn overdamped_spring_equal_from_to_nan() {
        let spring = Spring {
            from: 0.,
            to: 0.,
            initial_velocity: 0.,
            params: SpringParams::new(1.15, 850., 0.0001),
        };
        let _ = spring.duration();
        let _ = spring.value_at(Duration::ZERO);
    }

    #[test]
    fn toss_spring_settles_at_target() {
        let spring = Spring::interpolating(0., 400., 1.5, toss_params());
        let duration = spring.duration();
        assert!(duration > Duration::ZERO);
        assert!(duration < Duration::from_secs(10));

        assert_abs_diff_eq!(spring.value_at(Duration::ZERO), 0., epsilon = 1e-9);
        assert_abs_diff_eq!(spring.value_at(duration), 400., epsilon = 0.02);
    }

    #[test]
    fn initial_velocity_pushes_towards_target() {
        let still = Spring::interpolating(0., 400., 0., toss_params());
        let pushed = Spring::interpolating(0., 400., 3., toss_params());

        let t = Duration::from_millis(50);
        assert!(pushed.value_at(t) > still.value_at(t));
        assert!(pushed.value_at(t) < 400.);
    }

    #[test]
    fn negative_direction_mirrors() {
        let down = Spring::interpolating(0., 300., 2., toss_params());
        let up = Spring::interpolating(0., -300., 2., toss_params());

        for ms in [0, 16, 100, 500, 2000] {
            let t = Duration::from_millis(ms);
            assert_abs_diff_eq!(down.value_at(t), -up.value_at(t), epsilon = 1e-9);
        }
    }
}
