//! Ease-out curves and a frame-driven tween.
//!
//! A [`Tween`] interpolates between two offsets over a fixed duration.  It
//! has no clock of its own: the first frame that samples it pins the start
//! time, so scheduling latency never eats into the animation.

/// Cubic ease-out: fast start, decelerates, reaches `1.0` exactly at `t = 1`.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Sine ease-out, gentler than cubic.  Used for the short settle animation.
pub fn ease_out_sine(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    (t * std::f64::consts::FRAC_PI_2).sin()
}

/// Which easing curve a tween follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    OutCubic,
    OutSine,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::OutCubic => ease_out_cubic(t),
            Easing::OutSine => ease_out_sine(t),
        }
    }
}

/// Time-driven interpolation from `from` to `to`.
#[derive(Debug, Clone)]
pub struct Tween {
    from: f64,
    to: f64,
    duration_ms: f64,
    easing: Easing,
    /// Timestamp of the first sampled frame.
    started_at: Option<f64>,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration_ms: f64, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms.max(0.0),
            easing,
            started_at: None,
        }
    }

    /// Sample the tween at `now_ms`.  Returns the eased value and whether the
    /// tween has reached its end.
    pub fn sample(&mut self, now_ms: f64) -> (f64, bool) {
        let start = *self.started_at.get_or_insert(now_ms);
        if self.duration_ms <= 0.0 {
            return (self.to, true);
        }
        let elapsed = now_ms - start;
        // A clock that runs backwards holds the tween at its start.
        let t = if elapsed.is_finite() {
            (elapsed / self.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };
        if t >= 1.0 {
            return (self.to, true);
        }
        let value = self.from + (self.to - self.from) * self.easing.apply(t);
        (value, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curves_hit_endpoints() {
        for easing in [Easing::OutCubic, Easing::OutSine] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12);
            // Out of range inputs are clamped.
            assert_eq!(easing.apply(-3.0), 0.0);
            assert!((easing.apply(7.0) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn ease_out_is_monotonic_and_decelerating() {
        let mut prev = 0.0;
        let mut prev_step = f64::INFINITY;
        for i in 1..=20 {
            let v = ease_out_cubic(i as f64 / 20.0);
            let step = v - prev;
            assert!(v > prev);
            assert!(step <= prev_step + 1e-12);
            prev = v;
            prev_step = step;
        }
    }

    #[test]
    fn tween_starts_on_first_sample() {
        let mut tween = Tween::new(0.0, 100.0, 300.0, Easing::OutCubic);
        assert_eq!(tween.sample(5_000.0), (0.0, false));
        let (mid, done) = tween.sample(5_150.0);
        assert!(!done);
        assert!(mid > 50.0 && mid < 100.0);
        assert_eq!(tween.sample(5_300.0), (100.0, true));
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let mut tween = Tween::new(10.0, -20.0, 0.0, Easing::OutSine);
        assert_eq!(tween.sample(1.0), (-20.0, true));
    }

    #[test]
    fn backwards_clock_holds_start() {
        let mut tween = Tween::new(0.0, 60.0, 200.0, Easing::OutCubic);
        tween.sample(1_000.0);
        assert_eq!(tween.sample(900.0), (0.0, false));
    }
}
