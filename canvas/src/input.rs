//! Input model: the gesture phase machine that sorts pre-decoded touch
//! callbacks into drawing, transforming and long-press gestures.
//!
//! Raw touch decoding stays with the host. `GestureClassifier` only sees the
//! scalar events a platform recognizer already produces (down, scroll, scale,
//! long press, up) and decides which of them reach the viewport. The phase is
//! reset on every pointer-down and chosen by the first movement after it.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geometry::Point;

/// Which kind of gesture is in progress between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// Finger down, nothing classified yet.
    #[default]
    Idle,
    /// Single-pointer movement handed to the host for content drawing.
    Drawing,
    /// Multi-pointer pan and pinch. Sticky until pointer-up.
    Transforming,
    /// Long press fired; later movement is ignored.
    LongPressing,
}

/// A classified event for the coordinator or the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// A new touch sequence started.
    Down,
    /// Pan by a canvas-space distance (previous minus current position).
    Translate { dx: f64, dy: f64 },
    /// Pinch about `focus` by a factor relative to the current scale.
    Scale { focus: Point, factor: f64 },
    /// Single-pointer drag for the host to draw with. `last` is `None` on the
    /// first movement of the gesture.
    Draw { last: Option<Point>, current: Point },
    LongPress(Point),
    /// Pointer lifted without any movement. `pointers` is the most pointers
    /// seen during the gesture.
    Tap { point: Point, pointers: u32 },
    /// The gesture ended.
    Done,
}

/// Gesture phase machine.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    phase: GesturePhase,
    pointers: u32,
    last: Option<Point>,
    can_long_press: bool,
}

impl GestureClassifier {
    #[must_use]
    pub fn new(can_long_press: bool) -> Self {
        Self { phase: GesturePhase::Idle, pointers: 0, last: None, can_long_press }
    }

    /// Start a new touch sequence.
    pub fn pointer_down(&mut self, _point: Point, pointers: u32) -> GestureEvent {
        self.phase = GesturePhase::Idle;
        self.pointers = pointers;
        self.last = None;
        GestureEvent::Down
    }

    /// Another pointer joined or left. Only the maximum is remembered.
    pub fn pointer_count_changed(&mut self, pointers: u32) {
        self.pointers = self.pointers.max(pointers);
    }

    /// Movement to `point` with a `(dx, dy)` distance since the last scroll.
    pub fn scroll(&mut self, point: Point, dx: f64, dy: f64, pointers: u32) -> Option<GestureEvent> {
        self.pointer_count_changed(pointers);

        self.phase = match self.phase {
            GesturePhase::Idle if pointers <= 1 => GesturePhase::Drawing,
            GesturePhase::Idle | GesturePhase::Drawing if pointers >= 2 => GesturePhase::Transforming,
            phase => phase,
        };

        let event = match self.phase {
            GesturePhase::Drawing => Some(GestureEvent::Draw { last: self.last, current: point }),
            GesturePhase::Transforming => Some(GestureEvent::Translate { dx, dy }),
            GesturePhase::Idle | GesturePhase::LongPressing => None,
        };
        self.last = Some(point);
        event
    }

    /// Pinch update. Ignored unless transforming.
    pub fn scale(&mut self, focus: Point, factor: f64) -> Option<GestureEvent> {
        (self.phase == GesturePhase::Transforming).then_some(GestureEvent::Scale { focus, factor })
    }

    /// Long-press timeout. Only honoured before any movement.
    pub fn long_press(&mut self, point: Point) -> Option<GestureEvent> {
        if !self.can_long_press || self.phase != GesturePhase::Idle {
            return None;
        }
        tracing::debug!(x = point.x, y = point.y, "long press");
        self.phase = GesturePhase::LongPressing;
        Some(GestureEvent::LongPress(point))
    }

    /// End the touch sequence. A gesture that never moved reports a tap first.
    pub fn pointer_up(&mut self, point: Point) -> Vec<GestureEvent> {
        let mut events = Vec::with_capacity(2);
        if self.phase == GesturePhase::Idle {
            events.push(GestureEvent::Tap { point, pointers: self.pointers });
        }
        events.push(GestureEvent::Done);

        self.phase = GesturePhase::Idle;
        self.last = None;
        events
    }

    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Most pointers seen since the last pointer-down.
    #[must_use]
    pub fn pointer_count(&self) -> u32 {
        self.pointers
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(true)
    }
}
