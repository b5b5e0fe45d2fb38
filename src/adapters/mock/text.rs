//! Text blocks and measurers with scripted metrics.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Style};

use crate::traits::{LinkId, TextBlock, TextMeasurer, TextMetrics};

/// A text block whose wrapped size follows a simple formula.
///
/// Text of `natural_width` columns wraps into `ceil(natural / max)` lines of
/// `line_height` each when it does not fit.
#[derive(Debug, Clone)]
pub struct FixedTextBlock {
    text: String,
    natural_width: u16,
    line_height: u16,
    size: Size,
    offsets: Position,
    color: Color,
    link_color: Color,
    /// Link rectangles relative to the offsets
    links: Vec<(Rect, LinkId)>,
    measure_calls: Arc<AtomicUsize>,
    clear_selection_calls: Arc<AtomicUsize>,
}

impl FixedTextBlock {
    pub fn single_line(natural_width: u16, line_height: u16) -> Self {
        Self {
            text: String::new(),
            natural_width,
            line_height,
            size: Size::default(),
            offsets: Position::default(),
            color: Color::Reset,
            link_color: Color::Reset,
            links: Vec::new(),
            measure_calls: Arc::new(AtomicUsize::new(0)),
            clear_selection_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Add a link covering `rect`, given relative to the text offsets.
    pub fn with_link(mut self, rect: Rect, id: impl Into<LinkId>) -> Self {
        self.links.push((rect, id.into()));
        self
    }

    pub fn measure_calls(&self) -> usize {
        self.measure_calls.load(Ordering::SeqCst)
    }

    pub fn clear_selection_calls(&self) -> usize {
        self.clear_selection_calls.load(Ordering::SeqCst)
    }

    /// Shared counters, readable after the block is boxed into an item.
    pub fn counters(&self) -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
        (
            Arc::clone(&self.measure_calls),
            Arc::clone(&self.clear_selection_calls),
        )
    }

    pub fn link_color(&self) -> Color {
        self.link_color
    }
}

impl TextBlock for FixedTextBlock {
    fn measure(&mut self, max_width: u16) -> TextMetrics {
        self.measure_calls.fetch_add(1, Ordering::SeqCst);
        let lines = if max_width > 0 && self.natural_width > max_width {
            self.natural_width.div_ceil(max_width)
        } else {
            1
        };
        let width = self.natural_width.min(max_width.max(1));
        let height = lines.saturating_mul(self.line_height);
        self.size = Size::new(width, height);
        TextMetrics {
            height,
            max_line_width: width,
        }
    }

    fn cached_size(&self) -> Size {
        self.size
    }

    fn set_offsets(&mut self, offset: Position) {
        self.offsets = offset;
    }

    fn offsets(&self) -> Position {
        self.offsets
    }

    fn render(&self, buf: &mut Buffer, origin: Position) {
        let x = origin.x.saturating_add(self.offsets.x);
        let y = origin.y.saturating_add(self.offsets.y);
        if buf.area.contains(Position::new(x, y)) {
            let room = buf.area.right().saturating_sub(x) as usize;
            buf.set_stringn(x, y, &self.text, room, Style::default().fg(self.color));
        }
    }

    fn hit_test_link(&self, point: Position) -> Option<LinkId> {
        let local = Position::new(
            point.x.checked_sub(self.offsets.x)?,
            point.y.checked_sub(self.offsets.y)?,
        );
        self.links
            .iter()
            .find(|(rect, _)| rect.contains(local))
            .map(|(_, id)| id.clone())
    }

    fn clear_selection(&mut self) {
        self.clear_selection_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn set_link_color(&mut self, color: Color) {
        self.link_color = color;
    }

    fn color(&self) -> Color {
        self.color
    }

    fn plain_text(&self) -> &str {
        &self.text
    }
}

/// Caption measurer returning a fixed width, with per-caption overrides.
#[derive(Debug, Clone, Default)]
pub struct FixedMeasurer {
    default_width: u16,
    overrides: HashMap<String, u16>,
}

impl FixedMeasurer {
    pub fn new(default_width: u16) -> Self {
        Self {
            default_width,
            overrides: HashMap::new(),
        }
    }

    pub fn with_width(mut self, caption: &str, width: u16) -> Self {
        self.overrides.insert(caption.to_string(), width);
        self
    }
}

impl TextMeasurer for FixedMeasurer {
    fn text_width(&self, text: &str) -> u16 {
        self.overrides
            .get(text)
            .copied()
            .unwrap_or(self.default_width)
    }
}
