//! Text engine abstraction.
//!
//! The item never wraps or shapes text itself; it asks a [`TextBlock`] for its
//! wrapped size at a given width and tells it where to draw.

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Size};
use ratatui::style::Color;

/// Identifier reported when a link is clicked.
pub type LinkId = String;

/// Result of wrapping text at a maximum width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextMetrics {
    pub height: u16,
    /// Width of the widest wrapped line
    pub max_line_width: u16,
}

/// Wrapped, link-aware text owned by a timeline item.
///
/// Coordinates passed in and out are local to the owning item.
pub trait TextBlock {
    /// Wrap at `max_width` and cache the result.
    fn measure(&mut self, max_width: u16) -> TextMetrics;

    /// Size computed by the last [`measure`](TextBlock::measure).
    fn cached_size(&self) -> Size;

    fn set_offsets(&mut self, offset: Position);

    fn offsets(&self) -> Position;

    /// Paint at the configured offsets, with `origin` being the item's
    /// top-left corner in `buf`.
    fn render(&self, buf: &mut Buffer, origin: Position);

    /// Link under `point`, if any.
    fn hit_test_link(&self, point: Position) -> Option<LinkId>;

    fn clear_selection(&mut self);

    fn set_color(&mut self, color: Color);

    fn set_link_color(&mut self, color: Color);

    fn color(&self) -> Color;

    fn plain_text(&self) -> &str;
}

/// Single-line caption measurement.
pub trait TextMeasurer: Send + Sync {
    fn text_width(&self, text: &str) -> u16;
}
