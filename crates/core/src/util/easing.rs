use serde::{Deserialize, Serialize};

use super::numbers::lerp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map progress `t` in `0..=1` (clamped) to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// A value animated from `from` to `to` over a fixed time window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub start: f64,
    pub duration: f64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f64, to: f64, start: f64, duration: f64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing,
        }
    }

    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start) / self.duration).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, now: f64) -> f64 {
        lerp(self.from, self.to, self.easing.apply(self.progress(now)))
    }

    pub fn is_done(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curves_hit_endpoints() {
        for easing in [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12);
            assert_eq!(easing.apply(-3.0), 0.0);
        }
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-12);
        assert!(Easing::EaseIn.apply(0.5) < 0.5);
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
    }

    #[test]
    fn tween_progresses_over_time() {
        let tween = Tween::new(100.0, 300.0, 1000.0, 400.0, Easing::Linear);
        assert_eq!(tween.value_at(900.0), 100.0);
        assert!((tween.value_at(1200.0) - 200.0).abs() < 1e-9);
        assert_eq!(tween.value_at(5000.0), 300.0);
        assert!(!tween.is_done(1399.0));
        assert!(tween.is_done(1400.0));
    }

    #[test]
    fn zero_duration_is_immediately_done() {
        let tween = Tween::new(0.0, 1.0, 0.0, 0.0, Easing::EaseInOut);
        assert!(tween.is_done(0.0));
        assert_eq!(tween.value_at(0.0), 1.0);
    }
}
