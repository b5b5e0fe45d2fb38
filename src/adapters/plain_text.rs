//! Terminal-cell text block.
//!
//! Greedy word wrapping measured with `unicode-width`, centered lines, and
//! link spans for member mentions (plus auto-detected URLs when enabled).
//! Words wider than the wrap width are split at character boundaries.

use std::ops::Range;

use once_cell::sync::Lazy;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Size};
use ratatui::style::{Color, Modifier, Style};
use regex::Regex;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::models::{EventInfo, MemberLink};
use crate::traits::{LinkId, TextBlock, TextMeasurer, TextMetrics};

static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s<>\[\]]+").expect("Invalid URL regex pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
struct LinkSpan {
    range: Range<usize>,
    target: LinkId,
}

/// One wrapped line as a byte range into the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WrappedLine {
    start: usize,
    end: usize,
    width: u16,
}

fn str_width(s: &str) -> u16 {
    u16::try_from(s.width()).unwrap_or(u16::MAX)
}

/// Wrapped text for a cell grid.
#[derive(Debug, Clone)]
pub struct PlainTextBlock {
    text: String,
    links: Vec<LinkSpan>,
    lines: Vec<WrappedLine>,
    size: Size,
    offsets: Position,
    color: Color,
    link_color: Color,
    selection: Option<Range<usize>>,
}

impl PlainTextBlock {
    /// `show_links` turns on URL detection.
    pub fn new(text: impl Into<String>, show_links: bool) -> Self {
        let text = text.into();
        let links = if show_links {
            URL_REGEX
                .find_iter(&text)
                .map(|m| LinkSpan {
                    range: m.range(),
                    target: m.as_str().to_string(),
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            text,
            links,
            lines: Vec::new(),
            size: Size::default(),
            offsets: Position::default(),
            color: Color::Reset,
            link_color: Color::Reset,
            selection: None,
        }
    }

    /// Text block for a system event: URLs are live only on captcha events,
    /// member mentions always are.
    pub fn from_event(info: &EventInfo) -> Self {
        let mut block = Self::new(info.format_event_text(), info.captcha_present);
        block.apply_links(&info.member_links);
        block
    }

    /// Turn every occurrence of each mention text into a link.
    pub fn apply_links(&mut self, links: &[MemberLink]) {
        for link in links.iter().filter(|l| !l.text.is_empty()) {
            for (start, matched) in self.text.match_indices(link.text.as_str()) {
                let range = start..start + matched.len();
                let overlaps = self
                    .links
                    .iter()
                    .any(|l| l.range.start < range.end && range.start < l.range.end);
                if !overlaps {
                    self.links.push(LinkSpan {
                        range,
                        target: link.target.clone(),
                    });
                }
            }
        }
        self.links.sort_by_key(|l| l.range.start);
    }

    /// Select a byte range of the text (highlighted until cleared).
    pub fn select(&mut self, range: Range<usize>) {
        self.selection = Some(range);
    }

    pub fn has_selection(&self) -> bool {
        self.selection.is_some()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn link_at(&self, byte: usize) -> Option<&LinkSpan> {
        self.links.iter().find(|l| l.range.contains(&byte))
    }

    fn line_x(&self, line: &WrappedLine) -> u16 {
        self.size.width.saturating_sub(line.width) / 2
    }

    fn wrap(&self, max_width: u16) -> Vec<WrappedLine> {
        let max_width = max_width.max(1);
        let mut lines = Vec::new();
        let mut paragraph_start = 0;

        for paragraph in self.text.split('\n') {
            self.wrap_paragraph(paragraph, paragraph_start, max_width, &mut lines);
            paragraph_start += paragraph.len() + 1;
        }
        lines
    }

    fn wrap_paragraph(
        &self,
        paragraph: &str,
        base: usize,
        max_width: u16,
        lines: &mut Vec<WrappedLine>,
    ) {
        let mut current: Option<WrappedLine> = None;
        let mut words = paragraph
            .split_whitespace()
            .map(|word| {
                // split_whitespace yields subslices, so the offset is exact
                let start = word.as_ptr() as usize - paragraph.as_ptr() as usize;
                (base + start, base + start + word.len())
            })
            .peekable();

        if words.peek().is_none() {
            lines.push(WrappedLine {
                start: base,
                end: base,
                width: 0,
            });
            return;
        }

        for (start, end) in words {
            let word_width = str_width(&self.text[start..end]);

            if word_width > max_width {
                if let Some(line) = current.take() {
                    lines.push(line);
                }
                current = Some(self.split_long_word(start, end, max_width, lines));
                continue;
            }

            current = match current {
                None => Some(WrappedLine {
                    start,
                    end,
                    width: word_width,
                }),
                Some(line) => {
                    let joined = str_width(&self.text[line.start..end]);
                    if joined <= max_width {
                        Some(WrappedLine {
                            end,
                            width: joined,
                            ..line
                        })
                    } else {
                        lines.push(line);
                        Some(WrappedLine {
                            start,
                            end,
                            width: word_width,
                        })
                    }
                }
            };
        }

        if let Some(line) = current {
            lines.push(line);
        }
    }

    /// Push full-width chunks of an over-long word; returns the trailing chunk.
    fn split_long_word(
        &self,
        start: usize,
        end: usize,
        max_width: u16,
        lines: &mut Vec<WrappedLine>,
    ) -> WrappedLine {
        let mut chunk = WrappedLine {
            start,
            end: start,
            width: 0,
        };
        for (offset, ch) in self.text[start..end].char_indices() {
            let ch_width = ch.width().unwrap_or(0) as u16;
            if chunk.width + ch_width > max_width && chunk.end > chunk.start {
                lines.push(chunk);
                chunk = WrappedLine {
                    start: start + offset,
                    end: start + offset,
                    width: 0,
                };
            }
            chunk.end = start + offset + ch.len_utf8();
            chunk.width += ch_width;
        }
        chunk
    }
}

impl TextBlock for PlainTextBlock {
    fn measure(&mut self, max_width: u16) -> TextMetrics {
        self.lines = self.wrap(max_width);
        let width = self.lines.iter().map(|l| l.width).max().unwrap_or(0);
        let height = u16::try_from(self.lines.len()).unwrap_or(u16::MAX);
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
        let base_style = Style::default().fg(self.color);
        let link_style = Style::default()
            .fg(self.link_color)
            .add_modifier(Modifier::BOLD);

        for (row, line) in self.lines.iter().enumerate() {
            let y = origin
                .y
                .saturating_add(self.offsets.y)
                .saturating_add(row as u16);
            let mut x = origin
                .x
                .saturating_add(self.offsets.x)
                .saturating_add(self.line_x(line));

            for (offset, ch) in self.text[line.start..line.end].char_indices() {
                let byte = line.start + offset;
                let ch_width = ch.width().unwrap_or(0) as u16;
                if ch_width == 0 {
                    continue;
                }
                if buf.area.contains(Position::new(x, y)) {
                    let mut style = if self.link_at(byte).is_some() {
                        link_style
                    } else {
                        base_style
                    };
                    if self.selection.as_ref().is_some_and(|s| s.contains(&byte)) {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    let mut utf8 = [0u8; 4];
                    buf.set_stringn(x, y, ch.encode_utf8(&mut utf8), ch_width as usize, style);
                }
                x = x.saturating_add(ch_width);
            }
        }
    }

    fn hit_test_link(&self, point: Position) -> Option<LinkId> {
        let row = point.y.checked_sub(self.offsets.y)? as usize;
        let line = self.lines.get(row)?;
        let line_left = self.offsets.x.saturating_add(self.line_x(line));
        let mut col = point.x.checked_sub(line_left)?;

        for (offset, ch) in self.text[line.start..line.end].char_indices() {
            let ch_width = ch.width().unwrap_or(0) as u16;
            if col < ch_width {
                return self
                    .link_at(line.start + offset)
                    .map(|link| link.target.clone());
            }
            col -= ch_width;
        }
        None
    }

    fn clear_selection(&mut self) {
        self.selection = None;
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

/// Caption width in terminal cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeMeasurer;

impl TextMeasurer for UnicodeMeasurer {
    fn text_width(&self, text: &str) -> u16 {
        str_width(text)
    }
}
