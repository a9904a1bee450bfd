//! Viewport engine: the window into the content surface and the transform
//! that stretches it over the canvas.
//!
//! All mutation funnels through [`ViewportEngine::pan_to`] and
//! [`ViewportEngine::zoom_to`]. Both clamp their inputs rather than reject
//! them, and both leave the invalidation token alone when the resulting
//! viewport is identical to the current one.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::Serialize;

use crate::config::{ConfigError, ResizeAnchor, ZoomableConfig};
use crate::geometry::{Point, Rect, Transform};

/// Monotonic marker bumped whenever the rendered output goes stale.
///
/// Only ordering is meaningful; the numeric value carries no semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct InvalidationToken(u64);

impl InvalidationToken {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

/// Overlay rectangles for a mini-map, already scaled down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MiniMap {
    pub canvas: Rect,
    pub viewport: Rect,
    pub constraint: Option<Rect>,
}

/// The engine surface the gesture coordinator drives.
pub trait ViewportObserver {
    fn canvas_bounds(&self) -> Rect;
    fn viewport_bounds(&self) -> Rect;
    fn constraint_bounds(&self) -> Option<Rect>;
    fn scale(&self) -> f64;
    fn min_scale(&self) -> f64;
    fn max_scale(&self) -> f64;

    /// Move the viewport's top-left corner, clamped. Returns whether anything changed.
    fn pan_to(&mut self, left: f64, top: f64) -> bool;

    /// Zoom about a canvas-space focus point, clamped. Returns whether anything changed.
    fn zoom_to(&mut self, focus_x: f64, focus_y: f64, new_scale: f64) -> bool;

    /// Force a redraw without changing state.
    fn invalidate(&mut self);
}

/// Holds canvas, viewport and constraint bounds plus the current scale.
#[derive(Debug, Clone)]
pub struct ViewportEngine {
    config: ZoomableConfig,
    canvas: Rect,
    viewport: Rect,
    constraint: Option<Rect>,
    scale: f64,
    transform: Transform,
    token: InvalidationToken,
}

impl ViewportEngine {
    /// Build an engine at minimum scale with empty bounds.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the scale limits are invalid.
    pub fn new(config: ZoomableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            scale: config.min_scale,
            config,
            canvas: Rect::default(),
            viewport: Rect::default(),
            constraint: None,
            transform: Transform::IDENTITY,
            token: InvalidationToken::default(),
        })
    }

    // --- Layout ---

    /// Replace the canvas size and constraint, then re-clamp the viewport.
    ///
    /// Negative or NaN sizes are treated as zero. The scale is untouched; which
    /// viewport point survives the resize is chosen by
    /// [`ZoomableConfig::resize_anchor`].
    pub fn set_canvas_bounds(&mut self, width: f64, height: f64, constraint: Option<Rect>) {
        let previous = self.viewport;
        self.canvas = Rect::from_size(width.max(0.0), height.max(0.0));
        self.constraint = if self.config.constrain_to_content_bounds { constraint } else { None };
        tracing::debug!(width = self.canvas.width(), height = self.canvas.height(), constrained = self.constraint.is_some(), "canvas bounds set");

        match self.config.resize_anchor {
            ResizeAnchor::TopLeft => {
                self.pan_to(previous.left, previous.top);
            }
            ResizeAnchor::Center => {
                let (width, height) = self.viewport_size();
                self.pan_to(previous.center_x() - width * 0.5, previous.center_y() - height * 0.5);
            }
        }
    }

    // --- Mutation ---

    /// Move the viewport so its top-left corner is as close to `(left, top)`
    /// as the canvas and constraint bounds allow.
    ///
    /// Returns `false`, without touching state or the invalidation token, when
    /// the clamped result equals the current viewport.
    pub fn pan_to(&mut self, left: f64, top: f64) -> bool {
        let (width, height) = self.viewport_size();
        let mut left = left.min(self.canvas.width() - width).max(0.0);
        let mut top = top.min(self.canvas.height() - height).max(0.0);

        if let Some(c) = self.constraint {
            left = constrain_axis(left, width, c.left, c.right);
            top = constrain_axis(top, height, c.top, c.bottom);
        }

        let next = Rect::from_origin_size(left, top, width, height);
        if next == self.viewport {
            return false;
        }

        self.viewport = next;
        self.transform = Transform::fill(&self.viewport, &self.canvas);
        self.token.bump();
        tracing::trace!(left, top, width, height, token = self.token.value(), "viewport moved");
        true
    }

    /// Re-apply the clamp rules at the current position.
    pub fn reclamp(&mut self) -> bool {
        self.pan_to(self.viewport.left, self.viewport.top)
    }

    /// Set the scale to `new_scale` (clamped) while keeping the content under
    /// the canvas-space point `(focus_x, focus_y)` in place.
    ///
    /// Bounds clamping after the zoom may still shift the focus point.
    pub fn zoom_to(&mut self, focus_x: f64, focus_y: f64, new_scale: f64) -> bool {
        let fraction_x = ratio(focus_x, self.canvas.width());
        let fraction_y = ratio(focus_y, self.canvas.height());
        let content_x = self.viewport.left + self.viewport.width() * fraction_x;
        let content_y = self.viewport.top + self.viewport.height() * fraction_y;

        self.set_scale(new_scale);

        let (width, height) = self.viewport_size();
        tracing::trace!(focus_x, focus_y, scale = self.scale, "zooming");
        self.pan_to(content_x - width * fraction_x, content_y - height * fraction_y)
    }

    /// Zoom all the way out and re-clamp.
    pub fn reset(&mut self) -> bool {
        self.scale = self.config.min_scale;
        self.reclamp()
    }

    /// Bump the invalidation token without changing state.
    pub fn invalidate(&mut self) {
        self.token.bump();
    }

    // --- Queries ---

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    #[must_use]
    pub fn viewport_bounds(&self) -> Rect {
        self.viewport
    }

    #[must_use]
    pub fn canvas_bounds(&self) -> Rect {
        self.canvas
    }

    #[must_use]
    pub fn constraint_bounds(&self) -> Option<Rect> {
        self.constraint
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.config.min_scale
    }

    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.config.max_scale
    }

    #[must_use]
    pub fn config(&self) -> &ZoomableConfig {
        &self.config
    }

    #[must_use]
    pub fn invalidation_token(&self) -> InvalidationToken {
        self.token
    }

    /// Fully zoomed out. Hosts use this to decide whether a horizontal drag
    /// belongs to this widget or to an enclosing scroll container.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn can_pan(&self) -> bool {
        self.scale == self.config.min_scale
    }

    /// Zoomed in far enough that there is something to scroll.
    #[must_use]
    pub fn can_scroll(&self) -> bool {
        !self.can_pan()
    }

    /// Map a canvas-space touch point into content coordinates.
    #[must_use]
    pub fn map_touch_point(&self, x: f64, y: f64) -> Point {
        Point {
            x: self.viewport.left + self.viewport.width() * ratio(x, self.canvas.width()),
            y: self.viewport.top + self.viewport.height() * ratio(y, self.canvas.height()),
        }
    }

    /// Canvas, viewport and constraint rectangles scaled by `factor`, or
    /// `None` when the mini-map is disabled.
    #[must_use]
    pub fn mini_map(&self, factor: f64) -> Option<MiniMap> {
        if !self.config.enable_mini_map {
            return None;
        }
        Some(MiniMap {
            canvas: self.canvas.scaled(factor),
            viewport: self.viewport.scaled(factor),
            constraint: self.constraint.map(|c| c.scaled(factor)),
        })
    }

    // --- Internals ---

    fn set_scale(&mut self, scale: f64) {
        if scale.is_nan() {
            return;
        }
        self.scale = scale.clamp(self.config.min_scale, self.config.max_scale);
    }

    fn viewport_size(&self) -> (f64, f64) {
        (self.canvas.width() / self.scale, self.canvas.height() / self.scale)
    }
}

impl ViewportObserver for ViewportEngine {
    fn canvas_bounds(&self) -> Rect {
        self.canvas
    }

    fn viewport_bounds(&self) -> Rect {
        self.viewport
    }

    fn constraint_bounds(&self) -> Option<Rect> {
        self.constraint
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn min_scale(&self) -> f64 {
        self.config.min_scale
    }

    fn max_scale(&self) -> f64 {
        self.config.max_scale
    }

    fn pan_to(&mut self, left: f64, top: f64) -> bool {
        ViewportEngine::pan_to(self, left, top)
    }

    fn zoom_to(&mut self, focus_x: f64, focus_y: f64, new_scale: f64) -> bool {
        ViewportEngine::zoom_to(self, focus_x, focus_y, new_scale)
    }

    fn invalidate(&mut self) {
        ViewportEngine::invalidate(self);
    }
}

/// Clamp `start` so `[start, start + size]` sits inside `[low, high]`, or
/// centre it on that range when it does not fit.
fn constrain_axis(start: f64, size: f64, low: f64, high: f64) -> f64 {
    if size > high - low {
        (low + high) * 0.5 - size * 0.5
    } else {
        start.min(high - size).max(low)
    }
}

/// `value / total`, or zero when `total` has no extent.
fn ratio(value: f64, total: f64) -> f64 {
    if total > 0.0 { value / total } else { 0.0 }
}
