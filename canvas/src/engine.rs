use crate::config::{ConfigError, ZoomableConfig};
use crate::geometry::{Point, Rect, Transform};
use crate::gesture::GestureCoordinator;
use crate::input::{GestureClassifier, GestureEvent};
use crate::viewport::{InvalidationToken, MiniMap, ViewportEngine};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// The transform or viewport changed since the call started.
    RenderNeeded,
    /// Single-pointer drag for content drawing, in canvas coordinates.
    Draw { last: Option<Point>, current: Point },
    LongPress(Point),
    Tap { point: Point, pointers: u32 },
    GestureDone,
}

/// Core widget state: the viewport, the gesture coordinator that drives it
/// and the classifier in front of both.
///
/// Every entry point mirrors one host callback and returns the actions the
/// host should perform. The core never draws and owns no clock; hosts call
/// [`ZoomableCore::tick`] once per frame while [`ZoomableCore::is_animating`].
#[derive(Debug, Clone)]
pub struct ZoomableCore {
    pub viewport: ViewportEngine,
    pub gestures: GestureCoordinator,
    pub input: GestureClassifier,
}

impl ZoomableCore {
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the scale limits are invalid.
    pub fn new(config: ZoomableConfig) -> Result<Self, ConfigError> {
        let input = GestureClassifier::new(config.can_long_press);
        let gestures = GestureCoordinator::new(config.clone());
        let viewport = ViewportEngine::new(config)?;
        Ok(Self { viewport, gestures, input })
    }

    // --- Layout ---

    /// Host layout pass: new canvas size plus optional content constraint.
    ///
    /// Running animations are stopped; their bounds belong to the old layout.
    pub fn set_canvas_bounds(&mut self, width: f64, height: f64, constraint: Option<Rect>) -> Vec<Action> {
        let before = self.viewport.invalidation_token();
        self.gestures.cancel();
        self.viewport.set_canvas_bounds(width, height, constraint);
        self.finish(before, Vec::new())
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, x: f64, y: f64, pointers: u32) -> Vec<Action> {
        let before = self.viewport.invalidation_token();
        let event = self.input.pointer_down(Point::new(x, y), pointers);
        let mut actions = Vec::new();
        self.dispatch(event, &mut actions);
        self.finish(before, actions)
    }

    pub fn on_pointer_count_changed(&mut self, pointers: u32) {
        self.input.pointer_count_changed(pointers);
    }

    /// Movement with the distance travelled since the previous scroll
    /// (previous minus current).
    pub fn on_scroll(&mut self, x: f64, y: f64, dx: f64, dy: f64, pointers: u32) -> Vec<Action> {
        let before = self.viewport.invalidation_token();
        let mut actions = Vec::new();
        if let Some(event) = self.input.scroll(Point::new(x, y), dx, dy, pointers) {
            self.dispatch(event, &mut actions);
        }
        self.finish(before, actions)
    }

    pub fn on_scale(&mut self, focus_x: f64, focus_y: f64, factor: f64) -> Vec<Action> {
        let before = self.viewport.invalidation_token();
        let mut actions = Vec::new();
        if let Some(event) = self.input.scale(Point::new(focus_x, focus_y), factor) {
            self.dispatch(event, &mut actions);
        }
        self.finish(before, actions)
    }

    pub fn on_long_press(&mut self, x: f64, y: f64) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(event) = self.input.long_press(Point::new(x, y)) {
            self.dispatch(event, &mut actions);
        }
        actions
    }

    pub fn on_pointer_up(&mut self, x: f64, y: f64) -> Vec<Action> {
        let mut actions = Vec::new();
        for event in self.input.pointer_up(Point::new(x, y)) {
            self.dispatch(event, &mut actions);
        }
        actions
    }

    /// Release velocity from the platform recognizer. Nothing moves until the
    /// next [`tick`](Self::tick).
    pub fn on_fling(&mut self, velocity_x: f64, velocity_y: f64) -> Vec<Action> {
        self.gestures.on_fling_start(&mut self.viewport, velocity_x, velocity_y);
        Vec::new()
    }

    pub fn on_double_tap(&mut self, x: f64, y: f64) -> Vec<Action> {
        let before = self.viewport.invalidation_token();
        self.gestures.on_double_tap(&mut self.viewport, x, y);
        self.finish(before, Vec::new())
    }

    // --- Frames ---

    /// Advance running animations by one frame.
    pub fn tick(&mut self, elapsed_ms: f64) -> Vec<Action> {
        let before = self.viewport.invalidation_token();
        self.gestures.tick(&mut self.viewport, elapsed_ms);
        self.finish(before, Vec::new())
    }

    /// Stop every animation where it is.
    pub fn cancel(&mut self) {
        self.gestures.cancel();
    }

    // --- Queries ---

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.gestures.is_animating()
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.viewport.transform()
    }

    #[must_use]
    pub fn viewport_bounds(&self) -> Rect {
        self.viewport.viewport_bounds()
    }

    #[must_use]
    pub fn canvas_bounds(&self) -> Rect {
        self.viewport.canvas_bounds()
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.viewport.scale()
    }

    #[must_use]
    pub fn invalidation_token(&self) -> InvalidationToken {
        self.viewport.invalidation_token()
    }

    #[must_use]
    pub fn can_pan(&self) -> bool {
        self.viewport.can_pan()
    }

    #[must_use]
    pub fn mini_map(&self, factor: f64) -> Option<MiniMap> {
        self.viewport.mini_map(factor)
    }

    // --- Internal helpers ---

    fn dispatch(&mut self, event: GestureEvent, actions: &mut Vec<Action>) {
        match event {
            GestureEvent::Down => self.gestures.on_down(),
            GestureEvent::Translate { dx, dy } => self.gestures.on_translate(&mut self.viewport, dx, dy),
            GestureEvent::Scale { focus, factor } => {
                self.gestures.on_scale_update(&mut self.viewport, focus.x, focus.y, factor);
            }
            GestureEvent::Draw { last, current } => actions.push(Action::Draw { last, current }),
            GestureEvent::LongPress(point) => actions.push(Action::LongPress(point)),
            GestureEvent::Tap { point, pointers } => actions.push(Action::Tap { point, pointers }),
            GestureEvent::Done => actions.push(Action::GestureDone),
        }
    }

    /// Prepend `RenderNeeded` when the token moved since `before`.
    fn finish(&self, before: InvalidationToken, mut actions: Vec<Action>) -> Vec<Action> {
        if self.viewport.invalidation_token() != before {
            actions.insert(0, Action::RenderNeeded);
        }
        actions
    }
}
