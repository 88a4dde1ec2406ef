//! Clock-driven throttle and debounce.
//!
//! Both take the current time as an argument instead of owning a timer,
//! so a caller decides when to check and tests can step time by hand.
//! Times are milliseconds on any monotonic clock.

/// Lets one call through, then refuses until `limit_ms` has elapsed.
#[derive(Debug, Clone)]
pub struct Throttle {
    limit_ms: f64,
    reopens_at: Option<f64>,
}

impl Throttle {
    pub fn new(limit_ms: f64) -> Self {
        Self {
            limit_ms,
            reopens_at: None,
        }
    }

    /// Whether a call at `now` may run. A `true` closes the gate.
    pub fn try_acquire(&mut self, now: f64) -> bool {
        if self.reopens_at.is_some_and(|t| now < t) {
            return false;
        }
        self.reopens_at = Some(now + self.limit_ms);
        true
    }
}

/// Collapses a burst of calls into one.
///
/// Trailing mode (`leading = false`) fires once `wait_ms` after the last
/// call of a burst, observed through [`Debounce::poll`]. Leading mode fires
/// on the first call of a burst, reported by [`Debounce::call`], and
/// ignores the rest until the burst has been quiet for `wait_ms`.
#[derive(Debug, Clone)]
pub struct Debounce {
    wait_ms: f64,
    leading: bool,
    deadline: Option<f64>,
}

impl Debounce {
    pub fn trailing(wait_ms: f64) -> Self {
        Self {
            wait_ms,
            leading: false,
            deadline: None,
        }
    }

    pub fn leading(wait_ms: f64) -> Self {
        Self {
            wait_ms,
            leading: true,
            deadline: None,
        }
    }

    /// Register a call. Returns `true` when the call should run right now
    /// (leading mode, first call of a burst).
    pub fn call(&mut self, now: f64) -> bool {
        let starts_burst = self.deadline.is_none_or(|d| now >= d);
        self.deadline = Some(now + self.wait_ms);
        self.leading && starts_burst
    }

    /// When the pending burst settles, if any.
    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }

    /// Returns `true` once per burst when its quiet period has elapsed
    /// (trailing mode only).
    pub fn poll(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(d) if now >= d => {
                self.deadline = None;
                !self.leading
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttle_gates_by_time() {
        let mut t = Throttle::new(10.0);
        assert!(t.try_acquire(0.0));
        assert!(!t.try_acquire(5.0));
        assert!(!t.try_acquire(9.9));
        assert!(t.try_acquire(10.0));
        assert!(!t.try_acquire(15.0));
    }

    #[test]
    fn trailing_debounce_fires_after_quiet_period() {
        let mut d = Debounce::trailing(100.0);
        assert!(!d.call(0.0));
        assert!(!d.call(50.0));
        assert!(!d.poll(120.0));
        assert!(d.poll(150.0));
        assert!(!d.poll(200.0));
        assert_eq!(d.deadline(), None);
    }

    #[test]
    fn leading_debounce_fires_first_call_only() {
        let mut d = Debounce::leading(100.0);
        assert!(d.call(0.0));
        assert!(!d.call(50.0));
        assert!(!d.call(120.0));
        assert!(!d.poll(200.0));
        assert!(d.call(300.0));
    }
}
