use std::time::Duration;

use rustix::time::{clock_gettime, ClockId};

/// Tolerance for comparing pixel offsets.
pub const EPSILON: f64 = 0.000_001;

pub fn get_monotonic_time() -> Duration {
    let ts = clock_gettime(ClockId::Monotonic);
    Duration::new(ts.tv_sec as u64, ts.tv_nsec as u32)
}

pub fn near_zero(value: f64) -> bool {
    value.abs() <= EPSILON
}

pub fn near_equal(a: f64, b: f64) -> bool {
    near_zero(a - b)
}

/// Rounds to an integer pixel, away from zero.
pub fn round_away_from_zero(value: f64) -> f64 {
    if value > 0. {
        value.ceil()
    } else {
        value.floor()
    }
}

/// Converts a duration to fractional milliseconds.
pub fn to_millis(time: Duration) -> f64 {
    time.as_secs_f64() * 1000.
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_moves_away_from_zero() {
        assert_eq!(round_away_from_zero(2.1), 3.);
        assert_eq!(round_away_from_zero(-2.1), -3.);
        assert_eq!(round_away_from_zero(-0.), 0.);
        assert_eq!(round_away_from_zero(4.), 4.);
    }

    #[test]
    fn near_comparisons() {
        assert!(near_zero(1e-7));
        assert!(!near_zero(1e-3));
        assert!(near_equal(100., 100.000_000_1));
    }
}
