//! Common test utilities for integration tests.
//!
//! # Example
//!
//! ```ignore
//! let mut fx = ItemBuilder::group_invite().admin().build();
//! fx.item.resize(Size::new(1000, 0));
//! assert!(fx.item.panel().has_buttons());
//! ```

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chat_event::adapters::mock::{
    ChatRecord, FixedMeasurer, FixedTextBlock, InMemoryAvatars, InMemoryDirectory,
    RecordingChannel,
};
use chat_event::config::{ItemConfig, LayoutMetrics};
use chat_event::events::NotificationBus;
use chat_event::models::{ChatEventType, EventInfo};
use chat_event::traits::TextMeasurer;
use chat_event::ui::theme::Theme;
use chat_event::{ChatEventItem, Services};

pub const CONTACT: &str = "hikers@chat.agent";

/// Caption widths that give the 80 / 90 intrinsic button widths of the
/// worked layout example (captions are padded by 12 on each side).
pub const AVATAR_CAPTION_WIDTH: u16 = 56;
pub const DESCRIPTION_CAPTION_WIDTH: u16 = 66;

/// Measurer that counts calls, to prove the panel is built only once.
#[derive(Debug, Clone)]
pub struct CountingMeasurer {
    inner: FixedMeasurer,
    calls: Arc<AtomicUsize>,
}

impl CountingMeasurer {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextMeasurer for CountingMeasurer {
    fn text_width(&self, text: &str) -> u16 {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.text_width(text)
    }
}

/// Handles on every fake an item was built with.
pub struct Fixture {
    pub item: ChatEventItem,
    pub directory: InMemoryDirectory,
    pub avatars: InMemoryAvatars,
    pub channel: RecordingChannel,
    pub measurer: CountingMeasurer,
    pub bus: NotificationBus,
    pub services: Services,
}

/// Fluent builder for items wired to fakes.
pub struct ItemBuilder {
    event_type: ChatEventType,
    contact: String,
    record: ChatRecord,
    custom_avatar: bool,
    line_height: u16,
    text: FixedTextBlock,
    metrics: LayoutMetrics,
    bus_capacity: Option<usize>,
}

impl ItemBuilder {
    pub fn new(event_type: ChatEventType) -> Self {
        Self {
            event_type,
            contact: CONTACT.to_string(),
            record: ChatRecord {
                name: "Hikers".to_string(),
                ..ChatRecord::default()
            },
            custom_avatar: false,
            line_height: 15,
            text: FixedTextBlock::single_line(200, 15),
            metrics: LayoutMetrics::default(),
            bus_capacity: None,
        }
    }

    pub fn group_invite() -> Self {
        Self::new(ChatEventType::GroupInvite)
    }

    pub fn admin(mut self) -> Self {
        self.record.is_admin = true;
        self
    }

    pub fn contact(mut self, contact: &str) -> Self {
        self.contact = contact.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.record.description = description.to_string();
        self
    }

    pub fn rules(mut self, rules: &str) -> Self {
        self.record.rules = rules.to_string();
        self
    }

    pub fn stamp(mut self, stamp: &str) -> Self {
        self.record.stamp = stamp.to_string();
        self
    }

    pub fn custom_avatar(mut self) -> Self {
        self.custom_avatar = true;
        self
    }

    /// Single-line text of `width` columns.
    pub fn text_width(mut self, width: u16) -> Self {
        self.text = FixedTextBlock::single_line(width, self.line_height);
        self
    }

    pub fn text_block(mut self, text: FixedTextBlock) -> Self {
        self.text = text;
        self
    }

    pub fn metrics(mut self, metrics: LayoutMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn bus_capacity(mut self, capacity: usize) -> Self {
        self.bus_capacity = Some(capacity);
        self
    }

    pub fn build(self) -> Fixture {
        let bus = match self.bus_capacity {
            Some(capacity) => NotificationBus::with_capacity(capacity),
            None => NotificationBus::new(),
        };
        let directory = InMemoryDirectory::new().with_chat(&self.contact, self.record);
        let avatars = InMemoryAvatars::new();
        avatars.set_custom(&self.contact, self.custom_avatar);
        let channel = RecordingChannel::new().with_bus(bus.clone());
        let measurer = CountingMeasurer {
            inner: FixedMeasurer::new(50)
                .with_width("Add avatar", AVATAR_CAPTION_WIDTH)
                .with_width("Add description", DESCRIPTION_CAPTION_WIDTH),
            calls: Arc::new(AtomicUsize::new(0)),
        };

        let services = Services {
            directory: Arc::new(directory.clone()),
            avatars: Arc::new(avatars.clone()),
            channel: Arc::new(channel.clone()),
            measurer: Arc::new(measurer.clone()),
            theme: Arc::new(Theme::default()),
            bus: bus.clone(),
        };

        let info = EventInfo::new(self.event_type, "You created the group");
        let item = ChatEventItem::with_text(
            42,
            41,
            self.contact.as_str(),
            info,
            Box::new(self.text),
            services.clone(),
            ItemConfig::default().with_metrics(self.metrics),
        );

        Fixture {
            item,
            directory,
            avatars,
            channel,
            measurer,
            bus,
            services,
        }
    }
}
