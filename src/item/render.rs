use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, BorderType, Widget};

use crate::ui::layout::offset_rect;
use crate::ui::theme::ColorKey;

use super::ChatEventItem;

impl Widget for &ChatEventItem {
    /// `area` is the item's slot in the timeline; its top-left corner is the
    /// origin of the item-local geometry.
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.container.is_none() || area.is_empty() {
            return;
        }
        let origin = area.as_position();
        let theme = &self.services.theme;

        let bubble = offset_rect(self.geometry.bubble, origin).intersection(area);
        if !bubble.is_empty() {
            let background = theme.color_for(ColorKey::ChatEventBackground, &self.contact);
            let edge = theme.color_for(ColorKey::ChatEventText, &self.contact);
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(edge))
                .style(Style::default().bg(background))
                .render(bubble, buf);
        }

        self.text.render(buf, origin);

        if let Some(panel) = self.panel.panel().filter(|p| p.is_visible()) {
            panel.render(buf, origin);
        }

        if self.config.show_message_ids {
            self.render_message_id(area, buf);
        }
    }
}

impl ChatEventItem {
    /// Draw the id right-aligned under the bubble's bottom-right corner, or on
    /// its bottom edge when the item leaves no room below.
    fn render_message_id(&self, area: Rect, buf: &mut Buffer) {
        let bubble = offset_rect(self.geometry.bubble, area.as_position());
        let label = self.id.to_string();
        let width = label.len() as u16;

        let end = bubble
            .right()
            .saturating_sub(self.engine.metrics().buttons_radius);
        let x = end.saturating_sub(width).max(area.x);
        let y = bubble.bottom().min(area.bottom().saturating_sub(1));
        if y < area.y || x >= area.right() {
            return;
        }

        let color = self
            .services
            .theme
            .color_for(ColorKey::ChatEventText, &self.contact);
        let room = (area.right() - x).min(width) as usize;
        buf.set_stringn(x, y, label, room, Style::default().fg(color));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratatui::layout::Size;

    use super::*;
    use crate::adapters::mock::{
        FixedMeasurer, FixedTextBlock, InMemoryAvatars, InMemoryDirectory, RecordingChannel,
    };
    use crate::config::{ItemConfig, LayoutMetrics};
    use crate::events::NotificationBus;
    use crate::item::Services;
    use crate::models::{ChatEventType, EventInfo};
    use crate::ui::theme::Theme;

    fn item(config: ItemConfig) -> ChatEventItem {
        let services = Services {
            directory: Arc::new(InMemoryDirectory::new()),
            avatars: Arc::new(InMemoryAvatars::new()),
            channel: Arc::new(RecordingChannel::new()),
            measurer: Arc::new(FixedMeasurer::new(6)),
            theme: Arc::new(Theme::default()),
            bus: NotificationBus::new(),
        };
        let text = FixedTextBlock::single_line(11, 1).with_text("Bob joined.");
        ChatEventItem::with_text(
            7,
            6,
            "g@chat",
            EventInfo::new(ChatEventType::AddMembers, "Bob joined."),
            Box::new(text),
            services,
            config.with_metrics(LayoutMetrics::compact()),
        )
    }

    #[test]
    fn test_render_before_resize_draws_nothing() {
        let item = item(ItemConfig::default());
        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        (&item).render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }

    #[test]
    fn test_render_draws_rounded_bubble_and_text() {
        let mut item = item(ItemConfig::default());
        item.resize(Size::new(40, 0));
        let area = Rect::new(0, 0, 40, item.height());
        let mut buf = Buffer::empty(area);
        (&item).render(area, &mut buf);

        let bubble = item.bubble_rect();
        assert_eq!(buf[(bubble.x, bubble.y)].symbol(), "╭");
        assert_eq!(buf[(bubble.right() - 1, bubble.bottom() - 1)].symbol(), "╯");

        let offset = item.text().offsets();
        let row: String = (offset.x..offset.x + 11)
            .map(|x| buf[(x, offset.y)].symbol().to_string())
            .collect();
        assert_eq!(row, "Bob joined.");
    }

    #[test]
    fn test_render_message_id_at_bubble_corner() {
        let mut item = item(ItemConfig::default().with_show_message_ids(true));
        item.resize(Size::new(40, 0));
        let area = Rect::new(0, 0, 40, item.height());
        let mut buf = Buffer::empty(area);
        (&item).render(area, &mut buf);

        // Compact items have no bottom margin, so the id lands on the border
        let bubble = item.bubble_rect();
        let row = bubble.bottom() - 1;
        assert_eq!(buf[(bubble.right() - 2, row)].symbol(), "7");
        assert_eq!(buf[(bubble.right() - 1, row)].symbol(), "╯");
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }

    #[test]
    fn test_render_message_id_below_bubble_when_there_is_room() {
        let mut item = item(ItemConfig::default().with_show_message_ids(true));
        item.resize(Size::new(40, 0));
        let area = Rect::new(0, 0, 40, item.height() + 1);
        let mut buf = Buffer::empty(area);
        (&item).render(area, &mut buf);

        let bubble = item.bubble_rect();
        assert_eq!(buf[(bubble.right() - 2, bubble.bottom())].symbol(), "7");
        assert_eq!(
            buf[(bubble.right() - 2, bubble.bottom() - 1)].symbol(),
            "─"
        );
    }
}
