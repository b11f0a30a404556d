//! Repeating interval timers driven by frame time
//!
//! egui never calls back on its own: every frame the app measures how long it
//! has been since the last one and pushes that delta through whatever is
//! waiting on time.  `IntervalTimer` is the owned handle for a repeating tick.
//! It only counts while armed, so stopping it drops any partial period and a
//! later `start()` begins a fresh one.

use std::time::Duration;

/// Shortest period a timer will accept.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A repeating timer that fires once per `period` while armed.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    /// Time accumulated in the current period. `None` when disarmed.
    elapsed: Option<Duration>,
}

impl IntervalTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            elapsed: None,
        }
    }

    /// Arm the timer. Does nothing if it is already running, so there is
    /// never more than one tick source per handle.
    pub fn start(&mut self) {
        if self.elapsed.is_none() {
            self.elapsed = Some(Duration::ZERO);
        }
    }

    /// Disarm the timer. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.elapsed = None;
    }

    pub fn is_running(&self) -> bool {
        self.elapsed.is_some()
    }

    /// Time left until the next fire, or `None` when disarmed.
    pub fn until_next(&self) -> Option<Duration> {
        self.elapsed.map(|e| self.period.saturating_sub(e))
    }

    /// Fraction of the current period already elapsed, in `[0, 1)`.
    pub fn progress(&self) -> f32 {
        match self.elapsed {
            Some(e) => (e.as_secs_f32() / self.period.as_secs_f32()).clamp(0.0, 1.0),
            None => 0.0,
        }
    }

    /// Move the timer forward by `dt` and return how many periods completed.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        let Some(elapsed) = self.elapsed.as_mut() else {
            return 0;
        };
        *elapsed += dt;
        let mut fired = 0;
        while *elapsed >= self.period {
            *elapsed -= self.period;
            fired += 1;
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_disarmed_never_fires() {
        let mut t = IntervalTimer::new(ms(1000));
        assert_eq!(t.advance(ms(10_000)), 0);
        assert!(t.until_next().is_none());
    }

    #[test]
    fn test_fires_once_per_period() {
        let mut t = IntervalTimer::new(ms(1000));
        t.start();
        assert_eq!(t.advance(ms(999)), 0);
        assert_eq!(t.advance(ms(1)), 1);
        assert_eq!(t.advance(ms(2500)), 2);
        assert_eq!(t.until_next(), Some(ms(500)));
    }

    #[test]
    fn test_double_start_keeps_phase() {
        let mut t = IntervalTimer::new(ms(1000));
        t.start();
        t.advance(ms(600));
        t.start();
        assert_eq!(t.advance(ms(400)), 1);
    }

    #[test]
    fn test_stop_discards_partial_period() {
        let mut t = IntervalTimer::new(ms(5000));
        t.start();
        t.advance(ms(4000));
        t.stop();
        t.stop();
        assert!(!t.is_running());
        t.start();
        assert_eq!(t.advance(ms(4000)), 0);
        assert_eq!(t.advance(ms(1000)), 1);
    }

    #[test]
    fn test_progress() {
        let mut t = IntervalTimer::new(ms(1000));
        assert_eq!(t.progress(), 0.0);
        t.start();
        t.advance(ms(250));
        assert!((t.progress() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_zero_period_clamped() {
        let mut t = IntervalTimer::new(Duration::ZERO);
        t.start();
        assert_eq!(t.until_next(), Some(ms(1)));
        assert_eq!(t.advance(ms(3)), 3);
    }
}
