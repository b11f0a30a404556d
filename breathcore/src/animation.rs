//! Tweened values
//!
//! A `Tween` moves a single `f32` towards a target over a fixed duration.
//! Retargeting starts from wherever the value currently is, so the most
//! recent `animate_to` always wins and there is no jump when two callers
//! race for the same value.

use std::time::Duration;

/// An animated scalar. Moves along an ease-in-out curve: slow start and
/// slow finish.
#[derive(Debug, Clone)]
pub struct Tween {
    from: f32,
    to: f32,
    current: f32,
    elapsed: Duration,
    duration: Duration,
    active: bool,
}

impl Tween {
    /// A tween resting at `value`.
    pub fn new(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            current: value,
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
            active: false,
        }
    }

    /// Start moving towards `target`, superseding any animation in flight.
    pub fn animate_to(&mut self, target: f32, duration: Duration) {
        self.from = self.current;
        self.to = target;
        self.elapsed = Duration::ZERO;
        self.duration = duration;
        if duration.is_zero() {
            self.current = target;
            self.active = false;
        } else {
            self.active = true;
        }
    }

    /// Freeze at the current value.
    pub fn cancel(&mut self) {
        self.from = self.current;
        self.to = self.current;
        self.active = false;
    }

    pub fn advance(&mut self, dt: Duration) {
        if !self.active {
            return;
        }
        self.elapsed += dt;
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        if t >= 1.0 {
            self.current = self.to;
            self.active = false;
        } else {
            self.current = lerp(self.from, self.to, ease_in_out_quad(t));
        }
    }

    pub fn value(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_animating(&self) -> bool {
        self.active
    }
}

/// Linear interpolation between two values
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Map `t` in `[0, 1]` onto the output range `[lo, hi]`.
pub fn interpolate(t: f32, lo: f32, hi: f32) -> f32 {
    lerp(lo, hi, t.clamp(0.0, 1.0))
}

/// Quadratic ease-in-out
fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}
