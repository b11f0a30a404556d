//! Repaint scheduling
//!
//! egui only redraws when something asks it to. While a session is running
//! (or the logo is still easing in or out) the screen has to keep moving
//! even with no input, so the app flips the controller into continuous mode.
//! When everything is at rest the controller schedules nothing and egui
//! sleeps until the next input event.
//!
//! Call [`RepaintController::begin_frame`] at the top of `update()` and
//! [`RepaintController::end_frame`] at the bottom.

use std::time::Duration;

/// Frame interval while animating (~30 fps).
const CONTINUOUS_INTERVAL: Duration = Duration::from_millis(33);

pub struct RepaintController {
    continuous: bool,
    needs_repaint: bool,
    interval: Duration,
}

impl Default for RepaintController {
    fn default() -> Self {
        Self::new()
    }
}

impl RepaintController {
    pub fn new() -> Self {
        Self::with_interval(CONTINUOUS_INTERVAL)
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            continuous: false,
            needs_repaint: false,
            interval,
        }
    }

    /// Keep repainting at the configured interval until switched off.
    pub fn set_continuous(&mut self, continuous: bool) {
        self.continuous = continuous;
    }

    /// Request a single repaint on the next opportunity.
    pub fn mark_needs_repaint(&mut self) {
        self.needs_repaint = true;
    }

    /// Drop any one-shot request left over from the previous frame; this
    /// frame is that repaint.
    pub fn begin_frame(&mut self) {
        self.needs_repaint = false;
    }

    pub fn end_frame(&mut self, ctx: &egui::Context) {
        if let Some(delay) = self.next_delay() {
            ctx.request_repaint_after(delay);
        }
    }

    /// How long until the next frame should be requested, if at all.
    fn next_delay(&self) -> Option<Duration> {
        if self.continuous {
            Some(self.interval)
        } else if self.needs_repaint {
            Some(Duration::ZERO)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_schedules_nothing() {
        let rc = RepaintController::new();
        assert_eq!(rc.next_delay(), None);
    }

    #[test]
    fn test_continuous_uses_interval() {
        let mut rc = RepaintController::with_interval(Duration::from_millis(50));
        rc.set_continuous(true);
        assert_eq!(rc.next_delay(), Some(Duration::from_millis(50)));
        rc.set_continuous(false);
        assert_eq!(rc.next_delay(), None);
    }

    #[test]
    fn test_one_shot_is_immediate() {
        let mut rc = RepaintController::new();
        rc.mark_needs_repaint();
        assert_eq!(rc.next_delay(), Some(Duration::ZERO));
    }

    #[test]
    fn test_begin_frame_consumes_one_shot() {
        let mut rc = RepaintController::new();
        rc.mark_needs_repaint();
        rc.begin_frame();
        assert_eq!(rc.next_delay(), None);
    }
}
