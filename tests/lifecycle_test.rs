//! Construction, subscription lifetime and the fixed item properties.

mod common;

use std::sync::Arc;

use chat_event::adapters::mock::FixedTextBlock;
use chat_event::config::ItemConfig;
use chat_event::events::Notification;
use chat_event::models::{ChatEventType, EventInfo, LastStatus, MediaType};
use chat_event::ui::panel::PanelState;
use chat_event::ui::theme::{ColorKey, Theme, COLOR_CHATEVENT_TEXT};
use chat_event::ChatEventItem;
use common::{ItemBuilder, CONTACT};
use ratatui::layout::Size;
use ratatui::style::Color;

#[test]
fn test_subscription_lives_as_long_as_the_item() {
    let fx = ItemBuilder::group_invite().build();
    assert_eq!(fx.bus.subscriber_count(), 1);

    let second = ChatEventItem::from_text_block(
        CONTACT,
        Box::new(FixedTextBlock::single_line(10, 1)),
        fx.services.clone(),
        ItemConfig::default(),
    );
    assert_eq!(fx.bus.subscriber_count(), 2);

    drop(second);
    assert_eq!(fx.bus.subscriber_count(), 1);

    let bus = fx.bus.clone();
    drop(fx);
    assert_eq!(bus.subscriber_count(), 0);
    // Publishing to an empty timeline is fine
    assert_eq!(
        bus.publish(Notification::AvatarChanged {
            contact: CONTACT.to_string()
        }),
        0
    );
}

#[test]
fn test_identity_and_fixed_properties() {
    let fx = ItemBuilder::group_invite().build();
    let item = &fx.item;
    assert_eq!(item.id(), 42);
    assert_eq!(item.prev_id(), 41);
    assert_eq!(item.contact(), CONTACT);
    assert_eq!(item.event_type(), Some(ChatEventType::GroupInvite));
    assert_eq!(item.last_status(), LastStatus::None);
    assert_eq!(item.media_type(), MediaType::NoMedia);
    assert!(!item.is_outgoing());
    assert_eq!(item.time(), 0);
    assert!(!item.multiselect_enabled());
}

#[test]
fn test_item_without_event_info() {
    let fx = ItemBuilder::group_invite().admin().build();
    let mut item = ChatEventItem::from_text_block(
        CONTACT,
        Box::new(FixedTextBlock::single_line(30, 15).with_text("Messages are encrypted")),
        fx.services.clone(),
        ItemConfig::default(),
    );
    item.resize(Size::new(1000, 0));

    assert_eq!(item.id(), -1);
    assert_eq!(item.prev_id(), -1);
    assert_eq!(item.event_type(), None);
    assert_eq!(item.panel_state(), PanelState::NoPanelNeeded);
    assert_eq!(item.format_recents_text(), "Messages are encrypted");
}

#[test]
fn test_recents_text_comes_from_event() {
    let fx = ItemBuilder::group_invite().build();
    assert_eq!(fx.item.format_recents_text(), "You created the group");
}

#[test]
fn test_setting_none_status_is_allowed() {
    let mut fx = ItemBuilder::group_invite().build();
    fx.item.set_last_status(LastStatus::None);
    assert_eq!(fx.item.last_status(), LastStatus::None);
}

#[test]
#[should_panic(expected = "only support LastStatus::None")]
fn test_setting_other_status_panics() {
    let mut fx = ItemBuilder::group_invite().build();
    fx.item.set_last_status(LastStatus::Delivered);
}

#[test]
fn test_style_follows_theme() {
    let mut fx = ItemBuilder::group_invite().build();
    assert_eq!(fx.item.text().color(), COLOR_CHATEVENT_TEXT);

    let theme = Theme::new()
        .with_color(ColorKey::ChatEventText, Color::Yellow)
        .with_contact_color(CONTACT, ColorKey::TextPrimary, Color::Cyan);
    fx.item.set_theme(Arc::new(theme));
    assert_eq!(fx.item.text().color(), Color::Yellow);
}

#[test]
fn test_text_color_uses_contact_override() {
    let fx = ItemBuilder::group_invite().build();
    let mut services = fx.services.clone();
    services.theme = Arc::new(Theme::new().with_contact_color(
        "other@chat",
        ColorKey::ChatEventText,
        Color::Magenta,
    ));

    let other = ChatEventItem::with_text(
        1,
        0,
        "other@chat",
        EventInfo::new(ChatEventType::Generic, "x"),
        Box::new(FixedTextBlock::single_line(10, 1)),
        services.clone(),
        ItemConfig::default(),
    );
    assert_eq!(other.text().color(), Color::Magenta);

    let unaffected = ChatEventItem::with_text(
        2,
        1,
        CONTACT,
        EventInfo::new(ChatEventType::Generic, "y"),
        Box::new(FixedTextBlock::single_line(10, 1)),
        services,
        ItemConfig::default(),
    );
    assert_eq!(unaffected.text().color(), COLOR_CHATEVENT_TEXT);
}

#[test]
fn test_update_fonts_remeasures() {
    let text = FixedTextBlock::single_line(100, 15);
    let (measure_calls, _) = text.counters();
    let mut fx = ItemBuilder::group_invite().text_block(text).build();
    fx.item.resize(Size::new(1000, 0));
    let before = measure_calls.load(std::sync::atomic::Ordering::SeqCst);

    fx.item.update_fonts();
    assert_eq!(
        measure_calls.load(std::sync::atomic::Ordering::SeqCst),
        before + 1
    );
}

#[test]
fn test_clear_selection_reaches_text() {
    let text = FixedTextBlock::single_line(100, 15);
    let (_, clear_calls) = text.counters();
    let mut fx = ItemBuilder::group_invite().text_block(text).build();

    fx.item.clear_selection();
    assert_eq!(clear_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[test]
fn test_event_info_deserializes_from_history_json() {
    let info: EventInfo = serde_json::from_str(
        r#"{"event_type": "group_invite", "text": "You created the group",
            "member_links": [{"text": "Alice", "target": "alice@uin"}]}"#,
    )
    .unwrap();
    assert_eq!(info.event_type, ChatEventType::GroupInvite);
    assert!(!info.captcha_present);
    assert_eq!(info.member_links.len(), 1);

    let unknown: EventInfo =
        serde_json::from_str(r#"{"event_type": "chat_pinned", "text": "Pinned"}"#).unwrap();
    assert_eq!(unknown.event_type, ChatEventType::Generic);
}
