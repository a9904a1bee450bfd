//! Widget configuration: feature flags and scale limits, validated once at
//! construction and immutable afterwards.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_DOUBLE_TAP_ZOOM_DURATION_MS, DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE};

/// Errors produced while building a [`ZoomableConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A scale bound is zero, negative, NaN or infinite.
    #[error("{name} must be a finite value greater than zero, got {value}")]
    InvalidScale { name: &'static str, value: f64 },

    /// `min_scale` below 1 would make the zoomed-out viewport larger than the canvas.
    #[error("min_scale must be at least 1, got {value}")]
    MinScaleBelowOne { value: f64 },

    /// `min_scale` is larger than `max_scale`.
    #[error("min_scale ({min}) must not exceed max_scale ({max})")]
    InvertedScaleRange { min: f64, max: f64 },

    /// The JSON document could not be parsed.
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Which point of the viewport is held in place when the canvas is resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeAnchor {
    /// Keep the viewport's raw left/top coordinates.
    #[default]
    TopLeft,
    /// Keep the viewport's centre point.
    Center,
}

/// Options recognised by the viewport engine and gesture coordinator.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomableConfig {
    /// Two-finger translate gestures move the viewport.
    pub can_pan: bool,
    /// Release velocity starts a fling.
    pub can_fling: bool,
    /// Double tap steps through the zoom ladder.
    pub can_double_tap_to_zoom: bool,
    /// Long presses from an idle gesture are reported to the host.
    pub can_long_press: bool,
    /// Fully zoomed-out scale; the viewport equals the canvas here.
    pub min_scale: f64,
    /// Tightest zoom.
    pub max_scale: f64,
    /// Duration of the double-tap zoom animation.
    pub double_tap_zoom_duration_ms: u64,
    /// Honour constraint bounds supplied with the canvas size.
    pub constrain_to_content_bounds: bool,
    /// Expose mini-map overlay rectangles.
    pub enable_mini_map: bool,
    /// What stays put when the canvas is resized.
    pub resize_anchor: ResizeAnchor,
}

impl Default for ZoomableConfig {
    fn default() -> Self {
        Self {
            can_pan: true,
            can_fling: true,
            can_double_tap_to_zoom: true,
            can_long_press: true,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            double_tap_zoom_duration_ms: DEFAULT_DOUBLE_TAP_ZOOM_DURATION_MS,
            constrain_to_content_bounds: true,
            enable_mini_map: true,
            resize_anchor: ResizeAnchor::TopLeft,
        }
    }
}

impl ZoomableConfig {
    /// Parse a JSON document and validate it. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or a validation
    /// error from [`ZoomableConfig::validate`].
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the scale limits.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidScale`] for non-positive or non-finite
    /// bounds, [`ConfigError::MinScaleBelowOne`] when the zoomed-out viewport
    /// would overflow the canvas and [`ConfigError::InvertedScaleRange`] when
    /// `min_scale > max_scale`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_scale("min_scale", self.min_scale)?;
        check_scale("max_scale", self.max_scale)?;
        if self.min_scale < 1.0 {
            return Err(ConfigError::MinScaleBelowOne { value: self.min_scale });
        }
        if self.min_scale > self.max_scale {
            return Err(ConfigError::InvertedScaleRange { min: self.min_scale, max: self.max_scale });
        }
        Ok(())
    }
}

fn check_scale(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidScale { name, value })
    }
}
