//! Color theme for chat event bubbles.
//!
//! Colors are looked up by [`ColorKey`]. A chat can override any key (custom
//! wallpapers ship their own bubble colors), falling back to the base palette.

use std::collections::HashMap;

use ratatui::style::Color;

// ============================================================================
// Base Palette
// ============================================================================

/// Event text - muted gray so system notices recede behind messages
pub const COLOR_CHATEVENT_TEXT: Color = Color::Rgb(130, 140, 150);

/// Event bubble background
pub const COLOR_CHATEVENT_BACKGROUND: Color = Color::Rgb(34, 38, 46);

/// Primary text, also used for links inside events
pub const COLOR_TEXT_PRIMARY: Color = Color::Rgb(0, 168, 92); // green #00A85C

/// Button background
pub const COLOR_CHAT_PRIMARY: Color = Color::Rgb(46, 52, 62);

/// Button background while hovered
pub const COLOR_CHAT_PRIMARY_HOVER: Color = Color::Rgb(56, 64, 76);

/// Button background while pressed
pub const COLOR_CHAT_PRIMARY_ACTIVE: Color = Color::Rgb(28, 32, 38);

/// Style variables used by chat event items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorKey {
    ChatEventText,
    ChatEventBackground,
    TextPrimary,
    ChatPrimary,
    ChatPrimaryHover,
    ChatPrimaryActive,
}

impl ColorKey {
    fn base(self) -> Color {
        match self {
            ColorKey::ChatEventText => COLOR_CHATEVENT_TEXT,
            ColorKey::ChatEventBackground => COLOR_CHATEVENT_BACKGROUND,
            ColorKey::TextPrimary => COLOR_TEXT_PRIMARY,
            ColorKey::ChatPrimary => COLOR_CHAT_PRIMARY,
            ColorKey::ChatPrimaryHover => COLOR_CHAT_PRIMARY_HOVER,
            ColorKey::ChatPrimaryActive => COLOR_CHAT_PRIMARY_ACTIVE,
        }
    }
}

/// Base palette plus per-chat overrides.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    base: HashMap<ColorKey, Color>,
    per_contact: HashMap<String, HashMap<ColorKey, Color>>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a base palette color.
    pub fn with_color(mut self, key: ColorKey, color: Color) -> Self {
        self.base.insert(key, color);
        self
    }

    /// Override a color for one chat only.
    pub fn with_contact_color(mut self, contact: &str, key: ColorKey, color: Color) -> Self {
        self.per_contact
            .entry(contact.to_string())
            .or_default()
            .insert(key, color);
        self
    }

    /// Base palette color, ignoring chat overrides.
    pub fn color(&self, key: ColorKey) -> Color {
        self.base.get(&key).copied().unwrap_or_else(|| key.base())
    }

    /// Color for `key` as seen in `contact`'s chat.
    pub fn color_for(&self, key: ColorKey, contact: &str) -> Color {
        self.per_contact
            .get(contact)
            .and_then(|colors| colors.get(&key))
            .copied()
            .unwrap_or_else(|| self.color(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_come_from_palette() {
        let theme = Theme::new();
        assert_eq!(theme.color(ColorKey::ChatEventText), COLOR_CHATEVENT_TEXT);
        assert_eq!(
            theme.color_for(ColorKey::ChatPrimaryHover, "any"),
            COLOR_CHAT_PRIMARY_HOVER
        );
    }

    #[test]
    fn test_contact_override_wins_only_for_that_contact() {
        let theme = Theme::new()
            .with_color(ColorKey::ChatEventBackground, Color::Black)
            .with_contact_color("wallpaper@chat", ColorKey::ChatEventBackground, Color::Blue);

        assert_eq!(
            theme.color_for(ColorKey::ChatEventBackground, "wallpaper@chat"),
            Color::Blue
        );
        assert_eq!(
            theme.color_for(ColorKey::ChatEventBackground, "plain@chat"),
            Color::Black
        );
    }
}
