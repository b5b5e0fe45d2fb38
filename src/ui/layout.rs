//! Bubble layout engine.
//!
//! Fits a chat event bubble to its text and optional button panel inside a
//! container of a given width:
//!
//! ```text
//!  ┌──────────────────────── container ────────────────────────┐
//!  │ margin │        ╭──────── bubble ────────╮        │ margin │  <- top_margin
//!  │        │        │  centered wrapped text │        │        │
//!  │        │        │ [ button ] [ button ]  │        │        │
//!  │        │        ╰────────────────────────╯        │        │
//!  │                  read receipts (optional)                  │  <- bottom_offset
//!  └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Side margins step down through four width tiers; wider containers keep
//! room for a longer row of read-receipt heads.

use ratatui::layout::{Position, Rect, Size};

use crate::config::LayoutMetrics;
use crate::traits::{TextBlock, TextMetrics};

// ============================================================================
// Margin Tiers
// ============================================================================

/// Container width class used for side margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarginTier {
    /// Room for five read-receipt heads
    FiveHeads,
    FourHeads,
    ThreeHeads,
    /// Narrow container, minimal margin
    Narrow,
}

/// Read-receipt row state of the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadHeads {
    /// The item lives in a multi-party chat
    pub is_chat: bool,
    /// Someone has read up to this item
    pub has_heads: bool,
    /// Heads are drawn under the bubble rather than beside it
    pub heads_at_bottom: bool,
}

impl ReadHeads {
    pub fn below_bubble(&self) -> bool {
        self.is_chat && self.has_heads && self.heads_at_bottom
    }
}

/// Result of a layout pass. Never persisted across items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BubbleGeometry {
    /// Bubble rectangle in item-local coordinates
    pub bubble: Rect,
    /// Total item height
    pub height: u16,
    /// Height of the area reserved for the text above the panel
    pub text_area_height: u16,
    /// Where the text block draws, item-local
    pub text_offset: Position,
    /// Button panel area, present only while the panel is shown
    pub panel: Option<Rect>,
    /// Text width plus horizontal padding
    pub content_width: u16,
    pub text: TextMetrics,
}

/// Move an item-local rectangle to absolute buffer coordinates.
pub fn offset_rect(rect: Rect, origin: Position) -> Rect {
    Rect::new(
        origin.x.saturating_add(rect.x),
        origin.y.saturating_add(rect.y),
        rect.width,
        rect.height,
    )
}

// ============================================================================
// Layout Engine
// ============================================================================

/// Geometry computation for chat event bubbles.
///
/// The engine is stateless apart from its (pre-scaled) metrics, so repeated
/// calls with identical inputs produce identical geometry.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    metrics: LayoutMetrics,
}

impl LayoutEngine {
    pub fn new(metrics: &LayoutMetrics) -> Self {
        Self {
            metrics: metrics.scaled(),
        }
    }

    /// The scaled metrics in use.
    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    pub fn margin_tier(&self, container_width: u16) -> MarginTier {
        let m = &self.metrics;
        if container_width >= m.five_heads_width {
            MarginTier::FiveHeads
        } else if container_width >= m.four_heads_width {
            MarginTier::FourHeads
        } else if container_width >= m.three_heads_width {
            MarginTier::ThreeHeads
        } else {
            MarginTier::Narrow
        }
    }

    pub fn horizontal_margin(&self, container_width: u16) -> u16 {
        let m = &self.metrics;
        match self.margin_tier(container_width) {
            MarginTier::FiveHeads => m.margin_five_heads,
            MarginTier::FourHeads => m.margin_four_heads,
            MarginTier::ThreeHeads => m.margin_three_heads,
            MarginTier::Narrow => m.margin_narrow,
        }
    }

    /// Maximum width available to the wrapped text.
    ///
    /// # Panics
    ///
    /// Panics if `container_width` is zero.
    pub fn evaluate_text_width(&self, container_width: u16) -> u16 {
        assert!(container_width > 0, "container width must be positive");

        let margin = self.horizontal_margin(container_width);
        let max_bubble_width = container_width.saturating_sub(margin.saturating_mul(2));
        max_bubble_width.saturating_sub(self.metrics.text_hor_padding.saturating_mul(2))
    }

    /// Space kept below the bubble.
    pub fn bottom_offset(&self, heads: ReadHeads) -> u16 {
        let m = &self.metrics;
        let mut margin = m.bottom_margin;
        if heads.below_bubble() {
            margin += m.last_read_avatar_size + m.last_read_avatar_offset;
        }
        margin
    }

    /// Width the panel needs to show `visible_widths` side by side.
    pub fn buttons_desired_width(&self, visible_widths: &[u16]) -> u16 {
        let spacing = self.metrics.buttons_spacing;
        let count = visible_widths.len() as u16;
        let buttons: u16 = visible_widths
            .iter()
            .fold(0u16, |acc, w| acc.saturating_add(*w));
        buttons.saturating_add(spacing.saturating_mul(count + 1))
    }

    /// Lay out the bubble for a container.
    ///
    /// `buttons` carries the intrinsic widths of the visible buttons while the
    /// panel is shown, and is `None` otherwise.
    ///
    /// # Panics
    ///
    /// Panics if `container.width` is zero.
    pub fn compute_bubble(
        &self,
        container: Size,
        text: &mut dyn TextBlock,
        buttons: Option<&[u16]>,
        heads: ReadHeads,
    ) -> BubbleGeometry {
        let m = &self.metrics;

        let max_text_width = self.evaluate_text_width(container.width);
        let text_metrics = text.measure(max_text_width);

        let content_width = text_metrics
            .max_line_width
            .saturating_add(m.text_hor_padding.saturating_mul(2));
        let bubble_width = match buttons {
            Some(widths) => content_width.max(self.buttons_desired_width(widths)),
            None => content_width,
        };

        let bottom_offset = self.bottom_offset(heads);
        let text_bubble_height = text_metrics
            .height
            .saturating_add(m.text_top_padding + m.text_bottom_padding);
        let bubble_height = if buttons.is_some() {
            let panel_extra = m
                .buttons_height
                .saturating_sub(m.top_margin)
                .saturating_sub(bottom_offset);
            text_bubble_height.saturating_add(panel_extra)
        } else {
            text_bubble_height
        };

        let bubble_x = container.width.saturating_sub(bubble_width) / 2;
        let bubble = Rect::new(bubble_x, m.top_margin, bubble_width, bubble_height);

        let height = bubble_height
            .saturating_add(m.top_margin)
            .saturating_add(bottom_offset);

        let (text_area_height, panel) = match buttons {
            Some(_) => (
                text_bubble_height,
                Some(Rect::new(
                    bubble_x,
                    text_bubble_height,
                    bubble_width,
                    m.buttons_height,
                )),
            ),
            None => (height, None),
        };

        // Without a panel the text sits in the vertical middle of the bubble
        let text_y = match buttons {
            Some(_) => bubble.y + m.text_top_padding,
            None => bubble.y + bubble_height.saturating_sub(text_metrics.height) / 2,
        };
        let text_offset = Position::new(
            container.width.saturating_sub(text.cached_size().width) / 2,
            text_y,
        );

        tracing::trace!(
            container_width = container.width,
            bubble_width,
            bubble_height,
            height,
            "Computed chat event bubble"
        );

        BubbleGeometry {
            bubble,
            height,
            text_area_height,
            text_offset,
            panel,
            content_width,
            text: text_metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::FixedTextBlock;

    fn engine() -> LayoutEngine {
        LayoutEngine::new(&LayoutMetrics::default())
    }

    #[test]
    fn test_margin_tiers() {
        let e = engine();
        assert_eq!(e.margin_tier(1200), MarginTier::FiveHeads);
        assert_eq!(e.margin_tier(800), MarginTier::FiveHeads);
        assert_eq!(e.margin_tier(799), MarginTier::FourHeads);
        assert_eq!(e.margin_tier(680), MarginTier::FourHeads);
        assert_eq!(e.margin_tier(600), MarginTier::ThreeHeads);
        assert_eq!(e.margin_tier(559), MarginTier::Narrow);
        assert_eq!(e.margin_tier(1), MarginTier::Narrow);
    }

    #[test]
    fn test_evaluate_text_width_per_tier() {
        let e = engine();
        assert_eq!(e.evaluate_text_width(1000), 1000 - 2 * 136 - 16);
        assert_eq!(e.evaluate_text_width(700), 700 - 2 * 116 - 16);
        assert_eq!(e.evaluate_text_width(600), 600 - 2 * 96 - 16);
        assert_eq!(e.evaluate_text_width(400), 400 - 2 * 32 - 16);
    }

    #[test]
    fn test_evaluate_text_width_saturates_for_tiny_containers() {
        assert_eq!(engine().evaluate_text_width(10), 0);
    }

    #[test]
    #[should_panic(expected = "container width must be positive")]
    fn test_evaluate_text_width_rejects_zero() {
        engine().evaluate_text_width(0);
    }

    #[test]
    fn test_bottom_offset_adds_heads_only_below_bubble_in_chats() {
        let e = engine();
        assert_eq!(e.bottom_offset(ReadHeads::default()), 2);

        let heads = ReadHeads {
            is_chat: true,
            has_heads: true,
            heads_at_bottom: true,
        };
        assert_eq!(e.bottom_offset(heads), 2 + 16 + 4);

        let dialog = ReadHeads {
            is_chat: false,
            ..heads
        };
        assert_eq!(e.bottom_offset(dialog), 2);
    }

    #[test]
    fn test_text_only_bubble() {
        let e = engine();
        let mut text = FixedTextBlock::single_line(200, 15);
        let geometry = e.compute_bubble(
            Size::new(1000, 0),
            &mut text,
            None,
            ReadHeads::default(),
        );

        assert_eq!(geometry.content_width, 216);
        assert_eq!(geometry.bubble.width, 216);
        assert_eq!(geometry.bubble.height, 15 + 4 + 5);
        assert_eq!(geometry.bubble.x, (1000 - 216) / 2);
        assert_eq!(geometry.bubble.y, 8);
        assert_eq!(geometry.height, 24 + 8 + 2);
        assert_eq!(geometry.text_area_height, geometry.height);
        assert_eq!(geometry.panel, None);
        assert_eq!(geometry.text_offset, Position::new((1000 - 200) / 2, 12));
    }

    #[test]
    fn test_panel_adds_height_and_widens_bubble() {
        let e = engine();
        let mut text = FixedTextBlock::single_line(40, 15);
        let geometry = e.compute_bubble(
            Size::new(1000, 0),
            &mut text,
            Some(&[100, 120]),
            ReadHeads::default(),
        );

        // 100 + 120 + 8 * 3
        assert_eq!(geometry.bubble.width, 244);
        assert_eq!(geometry.text_area_height, 24);
        assert_eq!(geometry.bubble.height, 24 + 40 - 8 - 2);
        assert_eq!(geometry.height, geometry.bubble.height + 8 + 2);
        assert_eq!(
            geometry.panel,
            Some(Rect::new(geometry.bubble.x, 24, 244, 40))
        );
    }

    #[test]
    fn test_text_is_centered_vertically_without_panel() {
        let metrics = LayoutMetrics {
            text_top_padding: 0,
            text_bottom_padding: 10,
            ..LayoutMetrics::default()
        };
        let e = LayoutEngine::new(&metrics);
        let mut text = FixedTextBlock::single_line(200, 15);

        let plain = e.compute_bubble(Size::new(1000, 0), &mut text, None, ReadHeads::default());
        assert_eq!(plain.bubble.height, 25);
        assert_eq!(plain.text_offset.y, 8 + 5);

        let with_panel = e.compute_bubble(
            Size::new(1000, 0),
            &mut text,
            Some(&[90]),
            ReadHeads::default(),
        );
        assert_eq!(with_panel.text_offset.y, 8);
    }

    #[test]
    fn test_layout_is_idempotent() {
        let e = engine();
        let mut text = FixedTextBlock::single_line(300, 30);
        let first = e.compute_bubble(
            Size::new(640, 0),
            &mut text,
            Some(&[90]),
            ReadHeads::default(),
        );
        let second = e.compute_bubble(
            Size::new(640, 0),
            &mut text,
            Some(&[90]),
            ReadHeads::default(),
        );
        assert_eq!(first, second);
    }
}
