use std::time::Duration;

use spinwheel_config::animations::TossSpring;

use crate::animation::{
    AnimatedProperty, Animation, AnimationToken, Clock, PropertyFrame, Spring, SpringParams,
};
use crate::utils::to_millis;

/// Slowest release speed in px/ms that still starts a toss.
const MIN_SPEED: f64 = 0.25;
/// Shortest gesture in ms that can start a toss.
const MIN_GESTURE_MS: f64 = 1.;
/// Slots travelled by a toss released at the maximum speed.
const MAX_TRAVEL_SLOTS: f64 = 30.;
const SPRING_EPSILON: f64 = 0.01;

/// Middle slot geometry a toss needs at release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TossTarget {
    /// Middle slot `next_distance`, used for downward tosses.
    pub next_distance: f64,
    /// Middle slot `prev_distance`, used for upward tosses.
    pub prev_distance: f64,
    /// Sub-slot offset the column was left at.
    pub offset: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Sample {
    pos: f64,
    time: Duration,
}

/// Inertial motion after a fast release.
///
/// The controller only produces positions, the column applies them.
#[derive(Debug)]
pub struct TossController {
    clock: Clock,
    config: TossSpring,
    start: Option<Sample>,
    end: Option<Sample>,
    property: AnimatedProperty,
    end_position: f64,
}

impl TossController {
    pub fn new(clock: Clock, config: TossSpring) -> Self {
        Self {
            clock,
            config,
            start: None,
            end: None,
            property: AnimatedProperty::new(0.),
            end_position: 0.,
        }
    }

    /// Records the gesture start, stopping a running toss.
    pub fn set_start(&mut self, pos: f64) {
        self.stop();
        self.start = Some(Sample {
            pos,
            time: self.clock.now_unadjusted(),
        });
        self.end = None;
    }

    /// Records the latest gesture position, stopping a running toss.
    pub fn set_end(&mut self, pos: f64) {
        self.stop();
        self.end = Some(Sample {
            pos,
            time: self.clock.now_unadjusted(),
        });
    }

    /// Starts a toss for a release at `velocity` px/s.
    ///
    /// Returns `false` when the gesture was too short or too slow.
    pub fn play(&mut self, velocity: f64, target: TossTarget) -> bool {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            trace!("not tossing: gesture has no start or end");
            return false;
        };

        let time_diff = to_millis(end.time.saturating_sub(start.time));
        if time_diff < MIN_GESTURE_MS {
            trace!("not tossing: gesture lasted {time_diff} ms");
            return false;
        }

        let speed = velocity / 1000.;
        if speed.abs() < MIN_SPEED {
            trace!("not tossing: speed {speed} px/ms is too slow");
            return false;
        }

        self.start_spring_motion(speed, target);
        true
    }

    fn start_spring_motion(&mut self, speed: f64, target: TossTarget) {
        let max_speed = self.config.max_velocity.0;
        let speed = speed.clamp(-max_speed, max_speed);

        let slots = if max_speed > 0. {
            (MAX_TRAVEL_SLOTS * speed.abs() / max_speed).round()
        } else {
            0.
        };
        let shift = if speed > 0. {
            target.next_distance
        } else {
            target.prev_distance
        };
        self.end_position = shift * slots - target.offset;

        let params = SpringParams::from_coefficients(
            self.config.mass.0,
            self.config.stiffness.0,
            self.config.damping.0,
            SPRING_EPSILON,
        );
        let spring = Spring::interpolating(0., self.end_position, speed.abs(), params);

        debug!(
            "tossing over {slots} slots to {} at {speed} px/ms",
            self.end_position
        );
        self.property.set(0.);
        self.property
            .animate(Animation::spring(self.clock.clone(), spring));
    }

    /// Samples the toss, returns `None` when no toss is running.
    pub fn advance(&mut self) -> Option<PropertyFrame> {
        self.property.advance()
    }

    /// Stops a running toss without finishing it, returns the position it stopped at.
    pub fn stop(&mut self) -> Option<f64> {
        self.property.stop()?;
        Some(self.property.value())
    }

    pub fn is_current(&self, token: AnimationToken) -> bool {
        self.property.is_current(token)
    }

    pub fn is_playing(&self) -> bool {
        self.property.is_animating()
    }

    /// Current toss position relative to the release point.
    pub fn position(&self) -> f64 {
        self.property.value()
    }

    pub fn end_position(&self) -> f64 {
        self.end_position
    }
}
