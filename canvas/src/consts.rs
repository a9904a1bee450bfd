//! Shared numeric constants for the zoomable crate.

// ── Scale ───────────────────────────────────────────────────────

/// Default lower scale bound. At this scale the viewport matches the canvas.
pub const DEFAULT_MIN_SCALE: f64 = 1.0;

/// Default upper scale bound.
pub const DEFAULT_MAX_SCALE: f64 = 13.0;

// ── Double-tap zoom ─────────────────────────────────────────────

/// Default duration of the double-tap zoom animation, in milliseconds.
pub const DEFAULT_DOUBLE_TAP_ZOOM_DURATION_MS: u64 = 300;

/// Slack added to `log2` when picking the next zoom stop, so a scale that sits
/// on a power of two after float rounding still lands on that stop.
pub const ZOOM_STOP_EPSILON: f64 = 1e-9;

// ── Fling ───────────────────────────────────────────────────────

/// Friction applied to fling decay. Higher values stop sooner.
pub const FLING_FRICTION: f64 = 1.0;

/// Exponential decay rate per second at unit friction.
pub const FLING_DECAY_RATE: f64 = 4.2;

/// Fling speed (viewport units per second) below which the fling ends.
pub const FLING_MIN_VELOCITY: f64 = 62.5;

// ── Mini-map ────────────────────────────────────────────────────

/// Reference scale-down factor for the mini-map overlay.
pub const MINI_MAP_SCALE: f64 = 0.3;
