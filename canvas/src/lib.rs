//! Viewport pan/zoom engine for a zoomable canvas widget.
//!
//! The crate keeps a rectangular window (the viewport) into a content
//! surface, clamps it to the canvas and an optional content constraint, and
//! produces the fill-to-bounds transform a renderer needs. Gesture callbacks
//! from a platform recognizer flow through a classifier and a coordinator
//! into the engine; animations are advanced by the host one frame at a time.
//! Nothing here draws, owns a clock or decodes raw touches.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::ZoomableCore`] façade and the host [`engine::Action`]s |
//! | [`viewport`] | Viewport engine, invalidation token and mini-map rectangles |
//! | [`gesture`] | Gesture coordinator and the double-tap zoom ladder |
//! | [`input`] | Gesture phase machine in front of the coordinator |
//! | [`animation`] | Tick-driven fling and eased value animations |
//! | [`geometry`] | Points, rectangles and the fill-to-bounds transform |
//! | [`config`] | Widget configuration and its validation errors |
//! | [`consts`] | Shared numeric constants (scale limits, fling tuning, etc.) |

pub mod animation;
pub mod config;
pub mod consts;
pub mod engine;
pub mod geometry;
pub mod gesture;
pub mod input;
pub mod viewport;

pub use config::{ConfigError, ResizeAnchor, ZoomableConfig};
pub use engine::{Action, ZoomableCore};
pub use geometry::{Point, Rect, Transform};
pub use viewport::{ViewportEngine, ViewportObserver};
