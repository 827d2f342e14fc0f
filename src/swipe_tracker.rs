use std::collections::VecDeque;
use std::time::Duration;

const HISTORY_LIMIT: Duration = Duration::from_millis(150);

/// Tracks recent pointer motion along one axis to estimate the release velocity.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    history: VecDeque<Event>,
    pos: f64,
}

#[derive(Debug, Clone, Copy)]
struct Event {
    delta: f64,
    timestamp: Duration,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the history, starting a new gesture at `pos`.
    pub fn reset(&mut self, pos: f64, timestamp: Duration) {
        self.history.clear();
        self.history.push_back(Event {
            delta: 0.,
            timestamp,
        });
        self.pos = pos;
    }

    /// Pushes a new absolute position into the tracker.
    pub fn push_pos(&mut self, pos: f64, timestamp: Duration) {
        self.push(pos - self.pos, timestamp);
    }

    /// Pushes a new reading into the tracker.
    pub fn push(&mut self, delta: f64, timestamp: Duration) {
        // Timestamps of one pointer stream increase monotonically.
        if let Some(last) = self.history.back() {
            if timestamp < last.timestamp {
                trace!(
                    "ignoring event with timestamp {timestamp:?} earlier than last {:?}",
                    last.timestamp
                );
                return;
            }
        }

        self.history.push_back(Event { delta, timestamp });
        self.pos += delta;

        self.trim_history();
    }

    /// Returns the current gesture position.
    pub fn pos(&self) -> f64 {
        self.pos
    }

    /// Computes the current gesture velocity in px per second.
    pub fn velocity(&self) -> f64 {
        let (Some(first), Some(last)) = (self.history.front(), self.history.back()) else {
            return 0.;
        };

        let total_time = (last.timestamp - first.timestamp).as_secs_f64();
        if total_time == 0. {
            return 0.;
        }

        // The first event only anchors the time window.
        let total_delta = self.history.iter().skip(1).map(|event| event.delta).sum::<f64>();
        total_delta / total_time
    }

    fn trim_history(&mut self) {
        let Some(&Event { timestamp, .. }) = self.history.back() else {
            return;
        };

        while let Some(first) = self.history.front() {
            if timestamp <= first.timestamp + HISTORY_LIMIT {
                break;
            }

            let _ = self.history.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn steady_drag_velocity() {
        let mut tracker = SwipeTracker::new();
        tracker.reset(100., ms(0));
        for i in 1..=5 {
            tracker.push_pos(100. + 10. * i as f64, ms(10 * i));
        }

        assert_eq!(tracker.pos(), 150.);
        assert_abs_diff_eq!(tracker.velocity(), 1000., epsilon = 1e-6);
    }

    #[test]
    fn old_events_fall_out_of_the_window() {
        let mut tracker = SwipeTracker::new();
        tracker.reset(0., ms(0));
        tracker.push(500., ms(10));
        tracker.push(0., ms(400));
        tracker.push(-30., ms(430));

        assert_abs_diff_eq!(tracker.velocity(), -1000., epsilon = 1e-6);
    }

    #[test]
    fn out_of_order_events_are_ignored() {
        let mut tracker = SwipeTracker::new();
        tracker.reset(0., ms(100));
        tracker.push(10., ms(90));
        assert_eq!(tracker.pos(), 0.);
        assert_eq!(tracker.velocity(), 0.);
    }
}
