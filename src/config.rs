//! Configuration for chat event items.
//!
//! Use the builder methods to customize behavior, or load the whole thing
//! from JSON. Missing fields fall back to their defaults.
//!
//! # Example
//!
//! ```ignore
//! use chat_event::config::{ItemConfig, LayoutMetrics};
//!
//! let config = ItemConfig::default()
//!     .with_metrics(LayoutMetrics::compact())
//!     .with_show_message_ids(true);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChatEventResult;

/// Geometry constants used by the layout engine.
///
/// Values are in unscaled units; [`LayoutMetrics::scaled`] applies `scale`
/// the way a DPI scaler would.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    /// Minimum container width that reserves room for five read-receipt heads
    pub five_heads_width: u16,
    pub four_heads_width: u16,
    pub three_heads_width: u16,
    pub margin_five_heads: u16,
    pub margin_four_heads: u16,
    pub margin_three_heads: u16,
    /// Side margin below the three-heads tier
    pub margin_narrow: u16,
    pub text_hor_padding: u16,
    pub text_top_padding: u16,
    pub text_bottom_padding: u16,
    pub buttons_height: u16,
    pub buttons_radius: u16,
    pub buttons_spacing: u16,
    /// Horizontal padding around a button caption
    pub button_text_padding: u16,
    /// Distance from the item top to the bubble
    pub top_margin: u16,
    /// Space kept under the bubble in every item
    pub bottom_margin: u16,
    pub last_read_avatar_size: u16,
    pub last_read_avatar_offset: u16,
    /// Press/release distance below which a release counts as a click
    pub drag_tolerance: u16,
    pub scale: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            five_heads_width: 800,
            four_heads_width: 680,
            three_heads_width: 560,
            margin_five_heads: 136,
            margin_four_heads: 116,
            margin_three_heads: 96,
            margin_narrow: 32,
            text_hor_padding: 8,
            text_top_padding: 4,
            text_bottom_padding: 5,
            buttons_height: 40,
            buttons_radius: 12,
            buttons_spacing: 8,
            button_text_padding: 12,
            top_margin: 8,
            bottom_margin: 2,
            last_read_avatar_size: 16,
            last_read_avatar_offset: 4,
            drag_tolerance: 10,
            scale: 1.0,
        }
    }
}

impl LayoutMetrics {
    /// Metrics for a terminal cell grid.
    pub fn compact() -> Self {
        Self {
            five_heads_width: 100,
            four_heads_width: 80,
            three_heads_width: 60,
            margin_five_heads: 12,
            margin_four_heads: 10,
            margin_three_heads: 8,
            margin_narrow: 2,
            text_hor_padding: 2,
            text_top_padding: 1,
            text_bottom_padding: 1,
            buttons_height: 3,
            buttons_radius: 1,
            buttons_spacing: 1,
            button_text_padding: 1,
            top_margin: 1,
            bottom_margin: 0,
            last_read_avatar_size: 1,
            last_read_avatar_offset: 0,
            drag_tolerance: 2,
            scale: 1.0,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Scale a single base value.
    pub fn scale_value(&self, value: u16) -> u16 {
        let scaled = (f32::from(value) * self.scale).round();
        scaled.clamp(0.0, f32::from(u16::MAX)) as u16
    }

    /// A copy with `scale` folded into every value.
    pub fn scaled(&self) -> Self {
        let s = |v: u16| self.scale_value(v);
        Self {
            five_heads_width: s(self.five_heads_width),
            four_heads_width: s(self.four_heads_width),
            three_heads_width: s(self.three_heads_width),
            margin_five_heads: s(self.margin_five_heads),
            margin_four_heads: s(self.margin_four_heads),
            margin_three_heads: s(self.margin_three_heads),
            margin_narrow: s(self.margin_narrow),
            text_hor_padding: s(self.text_hor_padding),
            text_top_padding: s(self.text_top_padding),
            text_bottom_padding: s(self.text_bottom_padding),
            buttons_height: s(self.buttons_height),
            buttons_radius: s(self.buttons_radius),
            buttons_spacing: s(self.buttons_spacing),
            button_text_padding: s(self.button_text_padding),
            top_margin: s(self.top_margin),
            bottom_margin: s(self.bottom_margin),
            last_read_avatar_size: s(self.last_read_avatar_size),
            last_read_avatar_offset: s(self.last_read_avatar_offset),
            drag_tolerance: s(self.drag_tolerance),
            scale: 1.0,
        }
    }
}

/// Button captions. Translation happens before they reach the item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Captions {
    pub add_avatar: String,
    pub add_description: String,
}

impl Default for Captions {
    fn default() -> Self {
        Self {
            add_avatar: "Add avatar".to_string(),
            add_description: "Add description".to_string(),
        }
    }
}

/// Per-timeline configuration shared by all chat event items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemConfig {
    pub metrics: LayoutMetrics,
    pub captions: Captions,
    /// Draw each item's id under its bubble (debug aid)
    pub show_message_ids: bool,
}

impl ItemConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metrics(mut self, metrics: LayoutMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_captions(mut self, captions: Captions) -> Self {
        self.captions = captions;
        self
    }

    pub fn with_show_message_ids(mut self, show: bool) -> Self {
        self.show_message_ids = show;
        self
    }

    pub fn from_json_str(json: &str) -> ChatEventResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> ChatEventResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&contents)?;
        tracing::debug!("Loaded item config from {}", path.as_ref().display());
        Ok(config)
    }
}
