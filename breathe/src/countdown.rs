//! Session countdown

use breathcore::timer::IntervalTimer;
use std::time::Duration;

/// What a single countdown tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Time went down and there is some left.
    Running(u64),
    /// Time reached zero; the countdown has already stopped itself.
    Ended,
}

/// Counts a session down from its starting length, one step per tick.
#[derive(Debug, Clone)]
pub struct Countdown {
    remaining_ms: u64,
    step_ms: u64,
    timer: IntervalTimer,
}

impl Countdown {
    pub fn new(start_ms: u64, tick: Duration) -> Self {
        Self {
            remaining_ms: start_ms,
            step_ms: tick.as_millis() as u64,
            timer: IntervalTimer::new(tick),
        }
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn has_ended(&self) -> bool {
        self.remaining_ms == 0
    }

    /// Begin ticking. Ignored when already running or out of time.
    pub fn start(&mut self) {
        if self.has_ended() || self.is_running() {
            return;
        }
        self.timer.start();
    }

    pub fn stop(&mut self) {
        self.timer.stop();
    }

    /// Replace the remaining time, whether or not the countdown is running.
    pub fn set_start(&mut self, start_ms: u64) {
        self.remaining_ms = start_ms;
    }

    pub fn until_next(&self) -> Option<Duration> {
        self.timer.until_next()
    }

    /// Share of the current step already elapsed; 0 when stopped.
    pub fn fraction_elapsed_in_tick(&self) -> f32 {
        self.timer.progress()
    }

    pub fn step_ms(&self) -> u64 {
        self.step_ms
    }

    /// Advance the underlying timer by `dt`; returns the number of ticks due.
    pub(crate) fn advance_timer(&mut self, dt: Duration) -> u32 {
        self.timer.advance(dt)
    }

    /// Apply one tick.
    pub fn on_tick(&mut self) -> Tick {
        self.remaining_ms = self.remaining_ms.saturating_sub(self.step_ms);
        if self.has_ended() {
            self.timer.stop();
            Tick::Ended
        } else {
            Tick::Running(self.remaining_ms)
        }
    }
}
