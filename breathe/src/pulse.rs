//! Logo pulse: opacity fade plus a scale swell

use breathcore::animation::{interpolate, Tween};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Pulse {
    fade: Tween,
    progress: Tween,
    duration: Duration,
    scale_max: f32,
}

impl Pulse {
    pub fn new(duration: Duration, scale_max: f32) -> Self {
        Self {
            fade: Tween::new(0.0),
            progress: Tween::new(0.0),
            duration,
            scale_max,
        }
    }

    /// Fade in and grow (entrance, inhale).
    pub fn expand(&mut self) {
        self.fade.animate_to(1.0, self.duration);
        self.progress.animate_to(1.0, self.duration);
    }

    /// Fade out and shrink (exit, exhale).
    pub fn contract(&mut self) {
        self.fade.animate_to(0.0, self.duration);
        self.progress.animate_to(0.0, self.duration);
    }

    pub fn cancel(&mut self) {
        self.fade.cancel();
        self.progress.cancel();
    }

    pub fn advance(&mut self, dt: Duration) {
        self.fade.advance(dt);
        self.progress.advance(dt);
    }

    pub fn opacity(&self) -> f32 {
        self.fade.value()
    }

    pub fn scale(&self) -> f32 {
        interpolate(self.progress.value(), 1.0, self.scale_max)
    }

    pub fn is_animating(&self) -> bool {
        self.fade.is_animating() || self.progress.is_animating()
    }

    /// True when the last request was `expand`.
    #[cfg(test)]
    pub fn is_expanding(&self) -> bool {
        self.progress.target() >= 1.0
    }
}
