//! Gesture coordinator: turns classified gesture events into viewport calls
//! and owns the transient animation state between them.
//!
//! The coordinator never stores the viewport. Every entry point borrows it
//! for the duration of the call, so the engine is created first and outlives
//! any single gesture without shared ownership.
//!
//! Two fling streams (x and y) run independently. The double-tap zoom stream
//! is exclusive with both: starting either kind cancels the other.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use crate::animation::{AnimationDriver, FlingAnimation, ValueAnimation};
use crate::config::ZoomableConfig;
use crate::consts::ZOOM_STOP_EPSILON;
use crate::geometry::Point;
use crate::viewport::ViewportObserver;

/// One axis of a fling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Double-tap zoom in flight: the eased scale plus the fixed focus point.
#[derive(Debug, Clone)]
struct ZoomInFlight {
    animation: ValueAnimation,
    focus: Point,
}

/// Routes gesture events to a [`ViewportObserver`].
#[derive(Debug, Clone)]
pub struct GestureCoordinator {
    config: ZoomableConfig,
    fling_x: Option<FlingAnimation>,
    fling_y: Option<FlingAnimation>,
    zoom: Option<ZoomInFlight>,
}

impl GestureCoordinator {
    #[must_use]
    pub fn new(config: ZoomableConfig) -> Self {
        Self { config, fling_x: None, fling_y: None, zoom: None }
    }

    // --- Discrete events ---

    /// Pinch update. `factor` is relative to the current scale.
    pub fn on_scale_update<V: ViewportObserver>(&mut self, viewport: &mut V, focus_x: f64, focus_y: f64, factor: f64) {
        let target = factor * viewport.scale();
        viewport.zoom_to(focus_x, focus_y, target);
    }

    /// Drag by a canvas-space delta.
    pub fn on_translate<V: ViewportObserver>(&mut self, viewport: &mut V, dx: f64, dy: f64) {
        if !self.config.can_pan {
            return;
        }
        let canvas = viewport.canvas_bounds();
        let vp = viewport.viewport_bounds();
        let left = vp.left + scale_delta(dx, vp.width(), canvas.width());
        let top = vp.top + scale_delta(dy, vp.height(), canvas.height());
        viewport.pan_to(left, top);
    }

    /// Release with velocity (canvas units per second). Returns whether at
    /// least one axis started flinging.
    pub fn on_fling_start<V: ViewportObserver>(&mut self, viewport: &mut V, velocity_x: f64, velocity_y: f64) -> bool {
        #[allow(clippy::float_cmp)]
        let zoomed_out = viewport.scale() == viewport.min_scale();
        let canvas = viewport.canvas_bounds();
        let vp = viewport.viewport_bounds();
        if !self.config.can_fling || zoomed_out || canvas.is_empty() || vp.is_empty() {
            return false;
        }

        self.cancel();

        let constraint = viewport.constraint_bounds();
        let (x_min, x_max) = constraint.map_or((f64::NEG_INFINITY, f64::INFINITY), |c| (c.left, c.right - vp.width()));
        let (y_min, y_max) = constraint.map_or((f64::NEG_INFINITY, f64::INFINITY), |c| (c.top, c.bottom - vp.height()));

        self.fling_x = FlingAnimation::start(vp.left, -velocity_x * vp.width() / canvas.width(), x_min, x_max);
        self.fling_y = FlingAnimation::start(vp.top, -velocity_y * vp.height() / canvas.height(), y_min, y_max);

        tracing::debug!(
            velocity_x,
            velocity_y,
            x = self.fling_x.is_some(),
            y = self.fling_y.is_some(),
            "fling started"
        );
        self.is_flinging()
    }

    /// Step to the next zoom stop about `(x, y)`. Returns whether a zoom was
    /// started or applied.
    pub fn on_double_tap<V: ViewportObserver>(&mut self, viewport: &mut V, x: f64, y: f64) -> bool {
        if !self.config.can_double_tap_to_zoom {
            return false;
        }
        self.cancel();

        let from = viewport.scale();
        let to = next_zoom_stop(from, viewport.min_scale(), viewport.max_scale());
        let focus = Point::new(x, y);
        tracing::debug!(from, to, x, y, "double tap zoom");

        #[allow(clippy::cast_precision_loss)]
        let duration_ms = self.config.double_tap_zoom_duration_ms as f64;
        if duration_ms <= 0.0 {
            viewport.zoom_to(x, y, to);
            return true;
        }
        self.zoom = Some(ZoomInFlight { animation: ValueAnimation::start(from, to, duration_ms), focus });
        true
    }

    /// A new touch interrupts momentum and any running zoom.
    pub fn on_down(&mut self) {
        self.cancel();
    }

    /// Stop every animation. The viewport keeps its last clamped position.
    pub fn cancel(&mut self) {
        if self.is_animating() {
            tracing::trace!("animations cancelled");
        }
        self.fling_x = None;
        self.fling_y = None;
        self.zoom = None;
    }

    // --- Per-frame ---

    /// Pan one axis to `value`, holding the other at its current position.
    pub fn advance_fling<V: ViewportObserver>(&mut self, viewport: &mut V, axis: Axis, value: f64) {
        let vp = viewport.viewport_bounds();
        match axis {
            Axis::X => viewport.pan_to(value, vp.top),
            Axis::Y => viewport.pan_to(vp.left, value),
        };
    }

    /// Zoom to `scale` about the focus captured when the double tap started.
    /// Does nothing when no double-tap zoom is in flight.
    pub fn advance_zoom<V: ViewportObserver>(&mut self, viewport: &mut V, scale: f64) {
        if let Some(zoom) = &self.zoom {
            viewport.zoom_to(zoom.focus.x, zoom.focus.y, scale);
        }
    }

    /// Advance every running animation by `elapsed_ms` and apply the results.
    /// Returns whether anything is still animating afterwards.
    pub fn tick<V: ViewportObserver>(&mut self, viewport: &mut V, elapsed_ms: f64) -> bool {
        if let Some(value) = self.fling_x.as_mut().and_then(|f| f.advance(elapsed_ms)) {
            self.advance_fling(viewport, Axis::X, value);
        }
        if let Some(value) = self.fling_y.as_mut().and_then(|f| f.advance(elapsed_ms)) {
            self.advance_fling(viewport, Axis::Y, value);
        }
        if let Some(value) = self.zoom.as_mut().and_then(|z| z.animation.advance(elapsed_ms)) {
            self.advance_zoom(viewport, value);
        }

        self.fling_x = self.fling_x.take().filter(|f| f.is_running());
        self.fling_y = self.fling_y.take().filter(|f| f.is_running());
        self.zoom = self.zoom.take().filter(|z| z.animation.is_running());
        self.is_animating()
    }

    // --- Queries ---

    #[must_use]
    pub fn is_flinging(&self) -> bool {
        self.fling_x.is_some() || self.fling_y.is_some()
    }

    #[must_use]
    pub fn is_flinging_axis(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.fling_x.is_some(),
            Axis::Y => self.fling_y.is_some(),
        }
    }

    #[must_use]
    pub fn is_zooming(&self) -> bool {
        self.zoom.is_some()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.is_flinging() || self.is_zooming()
    }

    /// Scale the running double-tap zoom is heading for.
    #[must_use]
    pub fn zoom_target(&self) -> Option<f64> {
        self.zoom.as_ref().map(|z| z.animation.target())
    }
}

/// Next stop on the power-of-two zoom ladder, wrapping to `min_scale` once
/// the stop would exceed `max_scale`.
///
/// A stop equal to `max_scale` is kept rather than wrapped, so an 800×800
/// canvas with `max_scale = 4` steps 2 → 4 instead of 2 → 1.
#[must_use]
pub fn next_zoom_stop(current: f64, min_scale: f64, max_scale: f64) -> f64 {
    let candidate = ((current * 2.0).log2() + ZOOM_STOP_EPSILON).floor().exp2();
    if candidate > max_scale || !candidate.is_finite() { min_scale } else { candidate }
}

/// Convert a canvas-space delta into viewport space.
fn scale_delta(delta: f64, viewport_extent: f64, canvas_extent: f64) -> f64 {
    if canvas_extent > 0.0 { delta * viewport_extent / canvas_extent } else { 0.0 }
}
