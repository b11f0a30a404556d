//! Breath-phase ticker
//!
//! Counts elapsed breath intervals. Each tick is one inhale/exhale flip; the
//! session decides what a flip means on screen.

use breathcore::timer::IntervalTimer;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct BreathTicker {
    count: u64,
    timer: IntervalTimer,
}

impl BreathTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            count: 0,
            timer: IntervalTimer::new(interval),
        }
    }

    /// Number of intervals elapsed since this ticker was created.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Begin ticking. A second call while running changes nothing.
    pub fn start(&mut self) {
        self.timer.start();
    }

    pub fn stop(&mut self) {
        self.timer.stop();
    }

    pub fn until_next(&self) -> Option<Duration> {
        self.timer.until_next()
    }

    pub(crate) fn advance_timer(&mut self, dt: Duration) -> u32 {
        self.timer.advance(dt)
    }

    /// Record one elapsed interval and return the new count.
    pub fn on_tick(&mut self) -> u64 {
        self.count += 1;
        self.count
    }
}
