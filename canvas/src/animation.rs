//! Tick-driven animation drivers.
//!
//! The core owns no clock. A host scheduler calls [`AnimationDriver::advance`]
//! once per frame with the elapsed time, and feeds the returned value to the
//! gesture coordinator.

#[cfg(test)]
#[path = "animation_test.rs"]
mod animation_test;

use std::f64::consts::PI;

use crate::consts::{FLING_DECAY_RATE, FLING_FRICTION, FLING_MIN_VELOCITY};

/// A 1-D value stream advanced by an external scheduler.
pub trait AnimationDriver {
    /// Advance by `elapsed_ms` and return the new value.
    ///
    /// Returns `None` once the animation has finished or been cancelled. The
    /// call that reaches the end still returns the final value.
    fn advance(&mut self, elapsed_ms: f64) -> Option<f64>;

    fn is_running(&self) -> bool;

    /// Stop immediately. The last produced value stands.
    fn cancel(&mut self);
}

/// Momentum decay bounded to `[min, max]`.
///
/// Velocity decays exponentially; the fling ends when its speed drops below
/// [`FLING_MIN_VELOCITY`] or the value reaches a bound.
#[derive(Debug, Clone, Default)]
pub struct FlingAnimation {
    value: f64,
    velocity: f64,
    min: f64,
    max: f64,
    running: bool,
}

impl FlingAnimation {
    /// Start a fling at `start` with `velocity` units per second.
    ///
    /// Returns `None` when the bounds are inverted or `start` lies outside
    /// them; an axis in that state has nothing to animate.
    #[must_use]
    pub fn start(start: f64, velocity: f64, min: f64, max: f64) -> Option<Self> {
        if max <= min || start < min || start > max || !start.is_finite() {
            return None;
        }
        Some(Self { value: start, velocity, min, max, running: true })
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

impl AnimationDriver for FlingAnimation {
    fn advance(&mut self, elapsed_ms: f64) -> Option<f64> {
        if !self.running {
            return None;
        }
        let dt = elapsed_ms.max(0.0) / 1000.0;
        let rate = -FLING_DECAY_RATE * FLING_FRICTION;
        let decay = (rate * dt).exp();

        // Closed-form integral of v0 * e^(rate * t) over [0, dt].
        let travelled = self.velocity / rate * (decay - 1.0);
        self.velocity *= decay;
        self.value = (self.value + travelled).clamp(self.min, self.max);

        #[allow(clippy::float_cmp)]
        let at_bound = self.value == self.min || self.value == self.max;
        if at_bound || self.velocity.abs() < FLING_MIN_VELOCITY {
            self.running = false;
            self.velocity = 0.0;
        }
        Some(self.value)
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn cancel(&mut self) {
        self.running = false;
        self.velocity = 0.0;
    }
}

/// Eased interpolation from one value to another over a fixed duration.
#[derive(Debug, Clone, Default)]
pub struct ValueAnimation {
    from: f64,
    to: f64,
    duration_ms: f64,
    elapsed_ms: f64,
    running: bool,
}

impl ValueAnimation {
    #[must_use]
    pub fn start(from: f64, to: f64, duration_ms: f64) -> Self {
        Self { from, to, duration_ms: duration_ms.max(0.0), elapsed_ms: 0.0, running: true }
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Progress through the animation in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.duration_ms > 0.0 { (self.elapsed_ms / self.duration_ms).min(1.0) } else { 1.0 }
    }
}

impl AnimationDriver for ValueAnimation {
    fn advance(&mut self, elapsed_ms: f64) -> Option<f64> {
        if !self.running {
            return None;
        }
        self.elapsed_ms += elapsed_ms.max(0.0);
        let t = self.fraction();
        if t >= 1.0 {
            self.running = false;
            return Some(self.to);
        }
        Some(self.from + (self.to - self.from) * accelerate_decelerate(t))
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn cancel(&mut self) {
        self.running = false;
    }
}

/// Cosine ease: slow start, fast middle, slow end. Maps 0 to 0 and 1 to 1.
#[must_use]
pub fn accelerate_decelerate(t: f64) -> f64 {
    ((t + 1.0) * PI).cos() * 0.5 + 0.5
}
