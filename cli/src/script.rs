//! Replay scripts: a canvas layout plus a list of host callbacks, applied to
//! a [`ZoomableCore`] in order.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use serde::{Deserialize, Serialize};
use zoomable::{Rect, Transform, ZoomableConfig, ZoomableCore};

use crate::ReplayError;

/// Upper bound on frames a single `settle` may run before giving up.
const MAX_SETTLE_FRAMES: usize = 100_000;

fn one_pointer() -> u32 {
    1
}

fn default_frame_ms() -> f64 {
    16.0
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CanvasLayout {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub constraint: Option<Rect>,
}

/// One host callback.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default = "one_pointer")]
        pointers: u32,
    },
    PointerCount {
        pointers: u32,
    },
    Scroll {
        x: f64,
        y: f64,
        dx: f64,
        dy: f64,
        #[serde(default = "one_pointer")]
        pointers: u32,
    },
    Scale {
        x: f64,
        y: f64,
        factor: f64,
    },
    LongPress {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
    },
    Fling {
        vx: f64,
        vy: f64,
    },
    DoubleTap {
        x: f64,
        y: f64,
    },
    Tick {
        ms: f64,
    },
    /// Tick at `frame_ms` until every animation has finished.
    Settle {
        #[serde(default = "default_frame_ms")]
        frame_ms: f64,
    },
    Resize {
        width: f64,
        height: f64,
        #[serde(default)]
        constraint: Option<Rect>,
    },
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    pub canvas: CanvasLayout,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Script {
    /// # Errors
    ///
    /// Returns [`ReplayError::Json`] when the script is malformed.
    pub fn from_json(raw: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Engine state after a step, as printed by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateLine {
    /// Number of events applied so far.
    pub step: usize,
    pub scale: f64,
    pub viewport: Rect,
    pub canvas: Rect,
    pub transform: Transform,
    pub token: u64,
}

impl StateLine {
    fn capture(step: usize, core: &ZoomableCore) -> Self {
        Self {
            step,
            scale: core.scale(),
            viewport: core.viewport_bounds(),
            canvas: core.canvas_bounds(),
            transform: core.transform(),
            token: core.invalidation_token().value(),
        }
    }
}

/// Apply `script` to a fresh core built from `config`.
///
/// Returns the final state, preceded by the state after every event when
/// `trace` is set.
///
/// # Errors
///
/// Returns [`ReplayError::Config`] for an invalid configuration and
/// [`ReplayError::Unsettled`] when a `settle` event never finishes.
pub fn replay(script: &Script, config: ZoomableConfig, trace: bool) -> Result<Vec<StateLine>, ReplayError> {
    let mut core = ZoomableCore::new(config)?;
    let layout = &script.canvas;
    core.set_canvas_bounds(layout.width, layout.height, layout.constraint);
    tracing::info!(width = layout.width, height = layout.height, events = script.events.len(), "replaying script");

    let mut states = Vec::new();
    for (index, event) in script.events.iter().enumerate() {
        apply(&mut core, event)?;
        tracing::debug!(step = index + 1, ?event, scale = core.scale(), "event applied");
        if trace {
            states.push(StateLine::capture(index + 1, &core));
        }
    }
    if !trace || script.events.is_empty() {
        states.push(StateLine::capture(script.events.len(), &core));
    }
    Ok(states)
}

fn apply(core: &mut ZoomableCore, event: &Event) -> Result<(), ReplayError> {
    let actions = match *event {
        Event::PointerDown { x, y, pointers } => core.on_pointer_down(x, y, pointers),
        Event::PointerCount { pointers } => {
            core.on_pointer_count_changed(pointers);
            Vec::new()
        }
        Event::Scroll { x, y, dx, dy, pointers } => core.on_scroll(x, y, dx, dy, pointers),
        Event::Scale { x, y, factor } => core.on_scale(x, y, factor),
        Event::LongPress { x, y } => core.on_long_press(x, y),
        Event::PointerUp { x, y } => core.on_pointer_up(x, y),
        Event::Fling { vx, vy } => core.on_fling(vx, vy),
        Event::DoubleTap { x, y } => core.on_double_tap(x, y),
        Event::Tick { ms } => core.tick(ms),
        Event::Settle { frame_ms } => {
            settle(core, frame_ms)?;
            Vec::new()
        }
        Event::Resize { width, height, constraint } => core.set_canvas_bounds(width, height, constraint),
        Event::Cancel => {
            core.cancel();
            Vec::new()
        }
    };
    if !actions.is_empty() {
        tracing::trace!(?actions, "host actions");
    }
    Ok(())
}

fn settle(core: &mut ZoomableCore, frame_ms: f64) -> Result<(), ReplayError> {
    let mut frames = 0;
    while core.is_animating() {
        if frames == MAX_SETTLE_FRAMES {
            core.cancel();
            return Err(ReplayError::Unsettled { frames });
        }
        core.tick(frame_ms);
        frames += 1;
    }
    tracing::debug!(frames, "settled");
    Ok(())
}
