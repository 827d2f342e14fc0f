use super::Animation;

/// Identifies one run of an [`AnimatedProperty`].
///
/// Every start, stop or jump retires the current token, so a completion observed through a
/// stale token must be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationToken(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyFrame {
    pub value: f64,
    /// Set on the frame where the animation reached its target.
    pub finished: Option<AnimationToken>,
}

/// Float property that is at rest or driven by exactly one animation.
#[derive(Debug)]
pub struct AnimatedProperty {
    value: f64,
    anim: Option<(AnimationToken, Animation)>,
    last_token: u64,
}

impl AnimatedProperty {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            anim: None,
            last_token: 0,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_animating(&self) -> bool {
        self.anim.is_some()
    }

    pub fn token(&self) -> Option<AnimationToken> {
        self.anim.as_ref().map(|(token, _)| *token)
    }

    pub fn is_current(&self, token: AnimationToken) -> bool {
        self.token() == Some(token) || (self.anim.is_none() && token.0 == self.last_token)
    }

    /// Starts `anim`, replacing whatever animation currently owns the property.
    pub fn animate(&mut self, anim: Animation) -> AnimationToken {
        if let Some(stopped) = self.stop() {
            trace!("replacing property animation {stopped:?}");
        }

        self.last_token += 1;
        let token = AnimationToken(self.last_token);
        self.value = anim.from();
        self.anim = Some((token, anim));
        token
    }

    /// Stops the running animation, leaving the property at its last sampled value.
    pub fn stop(&mut self) -> Option<AnimationToken> {
        let (token, _) = self.anim.take()?;
        // Retire the token so that a completion sampled earlier in this frame doesn't apply.
        self.last_token += 1;
        Some(token)
    }

    /// Jumps to `value`, stopping any running animation.
    pub fn set(&mut self, value: f64) -> Option<AnimationToken> {
        let stopped = self.stop();
        self.value = value;
        stopped
    }

    /// Samples the running animation at the current clock time.
    pub fn advance(&mut self) -> Option<PropertyFrame> {
        let (token, anim) = self.anim.as_ref()?;
        let token = *token;

        self.value = anim.value();
        let finished = anim.is_done().then_some(token);
        if finished.is_some() {
            self.anim = None;
        }

        Some(PropertyFrame {
            value: self.value,
            finished,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::animation::{Clock, Curve};

    fn linear(clock: &Clock, from: f64, to: f64, ms: u64) -> Animation {
        Animation::ease(clock.clone(), from, to, 0., ms, Curve::Linear)
    }

    #[test]
    fn runs_to_completion_once() {
        let mut clock = Clock::with_time(Duration::ZERO);
        let mut prop = AnimatedProperty::new(0.);
        let token = prop.animate(linear(&clock, 0., 100., 100));

        clock.set_unadjusted(Duration::from_millis(50));
        let frame = prop.advance().unwrap();
        assert_eq!(frame.value, 50.);
        assert_eq!(frame.finished, None);

        clock.set_unadjusted(Duration::from_millis(100));
        let frame = prop.advance().unwrap();
        assert_eq!(frame.value, 100.);
        assert_eq!(frame.finished, Some(token));
        assert!(prop.is_current(token));

        assert_eq!(prop.advance(), None);
        assert!(!prop.is_animating());
    }

    #[test]
    fn replacing_retires_previous_token() {
        let clock = Clock::with_time(Duration::ZERO);
        let mut prop = AnimatedProperty::new(0.);
        let first = prop.animate(linear(&clock, 0., 100., 100));
        let second = prop.animate(linear(&clock, 10., 0., 100));

        assert_ne!(first, second);
        assert!(!prop.is_current(first));
        assert!(prop.is_current(second));
        assert_eq!(prop.value(), 10.);
    }

    #[test]
    fn stop_keeps_sampled_value() {
        let mut clock = Clock::with_time(Duration::ZERO);
        let mut prop = AnimatedProperty::new(0.);
        let token = prop.animate(linear(&clock, 0., 100., 100));

        clock.set_unadjusted(Duration::from_millis(25));
        prop.advance();
        assert_eq!(prop.stop(), Some(token));
        assert_eq!(prop.stop(), None);
        assert_eq!(prop.value(), 25.);
        assert!(!prop.is_current(token));

        assert_eq!(prop.set(0.), None);
        assert_eq!(prop.value(), 0.);
    }
}
