#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point in either canvas-output or viewport/content space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle stored as edges.
///
/// A rectangle whose `right <= left` or `bottom <= top` is *empty*; empty
/// rectangles are legal values and show up before the first layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    /// Rectangle anchored at the origin with the given size.
    #[must_use]
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Rectangle with its top-left corner at `(left, top)` and the given size.
    #[must_use]
    pub fn from_origin_size(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn center_x(&self) -> f64 {
        (self.left + self.right) * 0.5
    }

    #[must_use]
    pub fn center_y(&self) -> f64 {
        (self.top + self.bottom) * 0.5
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    /// Whether the rectangle has no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.left < self.right && self.top < self.bottom)
    }

    /// Same size, moved so the top-left corner sits at `(left, top)`.
    #[must_use]
    pub fn offset_to(&self, left: f64, top: f64) -> Self {
        Self::from_origin_size(left, top, self.width(), self.height())
    }

    /// Every edge multiplied by `factor` (scaling about the origin).
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.left * factor, self.top * factor, self.right * factor, self.bottom * factor)
    }

    /// Whether `other` lies inside `self`, allowing `tolerance` of slack per edge.
    #[must_use]
    pub fn contains_rect(&self, other: &Rect, tolerance: f64) -> bool {
        other.left >= self.left - tolerance
            && other.top >= self.top - tolerance
            && other.right <= self.right + tolerance
            && other.bottom <= self.bottom + tolerance
    }
}

/// Axis-aligned affine transform: independent scale on each axis plus a
/// translation. Rotation is not supported.
///
/// Maps a point `p` to `(p.x * scale_x + translate_x, p.y * scale_y + translate_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self { scale_x: 1.0, scale_y: 1.0, translate_x: 0.0, translate_y: 0.0 };

    /// Stretch `src` to exactly cover `dst`, ignoring aspect ratio.
    ///
    /// Falls back to the identity when either rectangle is empty.
    #[must_use]
    pub fn fill(src: &Rect, dst: &Rect) -> Self {
        if src.is_empty() || dst.is_empty() {
            return Self::IDENTITY;
        }
        let scale_x = dst.width() / src.width();
        let scale_y = dst.height() / src.height();
        Self {
            scale_x,
            scale_y,
            translate_x: dst.left - src.left * scale_x,
            translate_y: dst.top - src.top * scale_y,
        }
    }

    /// Map a source-space point into destination space.
    #[must_use]
    pub fn map_point(&self, p: Point) -> Point {
        Point {
            x: p.x * self.scale_x + self.translate_x,
            y: p.y * self.scale_y + self.translate_y,
        }
    }

    /// Map a source-space rectangle into destination space.
    #[must_use]
    pub fn map_rect(&self, r: &Rect) -> Rect {
        let a = self.map_point(Point::new(r.left, r.top));
        let b = self.map_point(Point::new(r.right, r.bottom));
        Rect::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    /// The inverse mapping, or `None` when either scale is zero or not finite.
    #[must_use]
    pub fn invert(&self) -> Option<Self> {
        let invertible = |s: f64| s != 0.0 && s.is_finite();
        if !invertible(self.scale_x) || !invertible(self.scale_y) {
            return None;
        }
        Some(Self {
            scale_x: 1.0 / self.scale_x,
            scale_y: 1.0 / self.scale_y,
            translate_x: -self.translate_x / self.scale_x,
            translate_y: -self.translate_y / self.scale_y,
        })
    }

    /// Row-major 2x3 matrix `[a, b, c, d, e, f]` as consumed by 2D canvas APIs
    /// (`x' = a*x + c*y + e`, `y' = b*x + d*y + f`).
    #[must_use]
    pub fn to_matrix(&self) -> [f64; 6] {
        [self.scale_x, 0.0, 0.0, self.scale_y, self.translate_x, self.translate_y]
    }
}
