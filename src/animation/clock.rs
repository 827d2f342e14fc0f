use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::utils::get_monotonic_time;

/// Shareable frame clock that can change rate.
///
/// The time is fetched lazily on first use and only moves when set, so every animated property
/// of a column samples the same instant while a frame is processed.
#[derive(Debug, Default, Clone)]
pub struct Clock {
    inner: Rc<RefCell<AdjustableClock>>,
}

#[derive(Debug)]
struct AdjustableClock {
    /// Unadjusted time of the current frame, `None` until someone asks for it.
    frame_time: Option<Duration>,
    current_time: Duration,
    last_seen_time: Duration,
    rate: f64,
    complete_instantly: bool,
}

impl Clock {
    /// Creates a new clock frozen at the given time.
    pub fn with_time(time: Duration) -> Self {
        Self {
            inner: Rc::new(RefCell::new(AdjustableClock::new(Some(time)))),
        }
    }

    /// Returns the current time, adjusted for the clock rate.
    pub fn now(&self) -> Duration {
        self.inner.borrow_mut().now()
    }

    /// Returns the underlying time not adjusted for rate change.
    pub fn now_unadjusted(&self) -> Duration {
        self.inner.borrow_mut().frame_time()
    }

    /// Sets the unadjusted clock time.
    pub fn set_unadjusted(&mut self, time: Duration) {
        self.inner.borrow_mut().frame_time = Some(time);
    }

    /// Moves the unadjusted clock time forward.
    pub fn advance_unadjusted(&mut self, delta: Duration) {
        let mut inner = self.inner.borrow_mut();
        let time = inner.frame_time();
        inner.frame_time = Some(time.saturating_add(delta));
    }

    pub fn rate(&self) -> f64 {
        self.inner.borrow().rate
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.inner.borrow_mut().rate = rate.clamp(0., 1000.);
    }

    /// Returns whether animations should complete instantly.
    pub fn should_complete_instantly(&self) -> bool {
        self.inner.borrow().complete_instantly
    }

    pub fn set_complete_instantly(&mut self, value: bool) {
        self.inner.borrow_mut().complete_instantly = value;
    }
}

impl PartialEq for Clock {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Clock {}

impl AdjustableClock {
    fn new(frame_time: Option<Duration>) -> Self {
        let mut rv = Self {
            frame_time,
            current_time: Duration::ZERO,
            last_seen_time: Duration::ZERO,
            rate: 1.,
            complete_instantly: false,
        };
        let time = rv.frame_time();
        rv.current_time = time;
        rv.last_seen_time = time;
        rv
    }

    fn frame_time(&mut self) -> Duration {
        *self.frame_time.get_or_insert_with(get_monotonic_time)
    }

    fn now(&mut self) -> Duration {
        let time = self.frame_time();

        if self.last_seen_time == time {
            return self.current_time;
        }

        if self.last_seen_time < time {
            let delta = (time - self.last_seen_time).mul_f64(self.rate);
            self.current_time = self.current_time.saturating_add(delta);
        } else {
            let delta = (self.last_seen_time - time).mul_f64(self.rate);
            self.current_time = self.current_time.saturating_sub(delta);
        }

        self.last_seen_time = time;
        self.current_time
    }
}

impl Default for AdjustableClock {
    fn default() -> Self {
        Self::new(None)
    }
}
