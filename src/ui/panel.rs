//! Action panel state machine.
//!
//! Group-invite events offer up to two quick fixes when the current user
//! administers the group and it is still missing an avatar or a description:
//!
//! ```text
//! NoPanelNeeded                       (event kind without actions, permanent)
//! PanelHidden  <──────────────┐       (not admin, or nothing missing)
//!      │ admin && missing     │ admin lost / everything set
//!      ▼                      │
//! PanelVisible(avatar, description)
//! ```
//!
//! The [`ButtonPanel`] itself is built the first time the panel must be
//! shown and then kept for the lifetime of the item; later transitions only
//! flip visibility flags.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Paragraph, Widget};

use crate::config::{Captions, LayoutMetrics};
use crate::models::ChatEventType;
use crate::traits::TextMeasurer;
use crate::ui::interaction::HitAreaRegistry;
use crate::ui::layout::offset_rect;
use crate::ui::theme::{ColorKey, Theme};

/// The two quick-fix buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelButton {
    AddAvatar,
    AddDescription,
}

/// Where the decision function left the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    /// The event kind never offers actions
    NoPanelNeeded,
    /// Not an admin, or the group already has an avatar and a description
    PanelHidden,
    PanelVisible { avatar: bool, description: bool },
}

/// Inputs of the decision function, read fresh on every trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelInputs {
    pub is_admin: bool,
    pub avatar_missing: bool,
    pub description_missing: bool,
}

/// Decide panel visibility for an event kind that supports actions.
pub fn decide(inputs: PanelInputs) -> PanelState {
    if inputs.is_admin && (inputs.avatar_missing || inputs.description_missing) {
        PanelState::PanelVisible {
            avatar: inputs.avatar_missing,
            description: inputs.description_missing,
        }
    } else {
        PanelState::PanelHidden
    }
}

// ============================================================================
// Button Panel
// ============================================================================

/// Button colors, resolved once when the panel is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonColors {
    pub normal: Color,
    pub hover: Color,
    pub active: Color,
    pub text: Color,
}

impl ButtonColors {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            normal: theme.color(ColorKey::ChatPrimary),
            hover: theme.color(ColorKey::ChatPrimaryHover),
            active: theme.color(ColorKey::ChatPrimaryActive),
            text: theme.color(ColorKey::TextPrimary),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActionButton {
    caption: String,
    visible: bool,
    intrinsic_width: u16,
    /// Item-local rectangle from the last arrange pass
    rect: Rect,
}

impl ActionButton {
    fn new(caption: &str, measurer: &dyn TextMeasurer, text_padding: u16) -> Self {
        Self {
            caption: caption.to_string(),
            visible: false,
            intrinsic_width: measurer
                .text_width(caption)
                .saturating_add(text_padding.saturating_mul(2)),
            rect: Rect::default(),
        }
    }
}

/// A row of up to two buttons stretched to the bubble width.
#[derive(Debug, Clone)]
pub struct ButtonPanel {
    avatar: ActionButton,
    description: ActionButton,
    visible: bool,
    area: Rect,
    spacing: u16,
    colors: ButtonColors,
    hit_areas: HitAreaRegistry,
    pressed: Option<PanelButton>,
}

impl ButtonPanel {
    /// Build the panel. `metrics` must already be scaled.
    pub fn build(
        captions: &Captions,
        measurer: &dyn TextMeasurer,
        theme: &Theme,
        metrics: &LayoutMetrics,
    ) -> Self {
        Self {
            avatar: ActionButton::new(&captions.add_avatar, measurer, metrics.button_text_padding),
            description: ActionButton::new(
                &captions.add_description,
                measurer,
                metrics.button_text_padding,
            ),
            visible: false,
            area: Rect::default(),
            spacing: metrics.buttons_spacing,
            colors: ButtonColors::from_theme(theme),
            hit_areas: HitAreaRegistry::new(),
            pressed: None,
        }
    }

    fn button(&self, button: PanelButton) -> &ActionButton {
        match button {
            PanelButton::AddAvatar => &self.avatar,
            PanelButton::AddDescription => &self.description,
        }
    }

    fn button_mut(&mut self, button: PanelButton) -> &mut ActionButton {
        match button {
            PanelButton::AddAvatar => &mut self.avatar,
            PanelButton::AddDescription => &mut self.description,
        }
    }

    fn buttons(&self) -> impl Iterator<Item = (PanelButton, &ActionButton)> {
        [
            (PanelButton::AddAvatar, &self.avatar),
            (PanelButton::AddDescription, &self.description),
        ]
        .into_iter()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.pressed = None;
            self.hit_areas.clear();
        }
    }

    pub fn is_button_visible(&self, button: PanelButton) -> bool {
        self.button(button).visible
    }

    pub fn set_button_visible(&mut self, button: PanelButton, visible: bool) {
        self.button_mut(button).visible = visible;
    }

    pub fn caption(&self, button: PanelButton) -> &str {
        &self.button(button).caption
    }

    pub fn intrinsic_width(&self, button: PanelButton) -> u16 {
        self.button(button).intrinsic_width
    }

    /// Intrinsic widths of the visible buttons, left to right.
    pub fn visible_widths(&self) -> Vec<u16> {
        self.buttons()
            .filter(|(_, b)| b.visible)
            .map(|(_, b)| b.intrinsic_width)
            .collect()
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Item-local rectangle of a visible button.
    pub fn button_rect(&self, button: PanelButton) -> Option<Rect> {
        let b = self.button(button);
        (self.visible && b.visible).then_some(b.rect)
    }

    pub fn colors(&self) -> ButtonColors {
        self.colors
    }

    /// Stretch the panel over `area` and share the width among the visible
    /// buttons, keeping `spacing` around and between them.
    pub fn arrange(&mut self, area: Rect) {
        self.area = area;
        self.hit_areas.clear();

        let visible: Vec<PanelButton> = self
            .buttons()
            .filter(|(_, b)| b.visible)
            .map(|(id, _)| id)
            .collect();
        if visible.is_empty() {
            return;
        }

        let count = visible.len() as u16;
        let spacing = self.spacing;
        let inner = area
            .width
            .saturating_sub(spacing.saturating_mul(count + 1));
        let share = inner / count;
        let remainder = inner % count;

        let mut x = area.x.saturating_add(spacing);
        for (i, id) in visible.into_iter().enumerate() {
            let width = if i as u16 == count - 1 {
                share + remainder
            } else {
                share
            };
            let rect = Rect::new(x, area.y, width, area.height);
            self.button_mut(id).rect = rect;
            self.hit_areas.register(rect, id);
            x = x.saturating_add(width).saturating_add(spacing);
        }
    }

    /// Background of a button given hover/press state.
    pub fn background(&self, button: PanelButton) -> Color {
        if self.pressed == Some(button) {
            self.colors.active
        } else if self.hit_areas.hovered() == Some(button) {
            self.colors.hover
        } else {
            self.colors.normal
        }
    }

    /// Button under an item-local position.
    pub fn button_at(&self, position: Position) -> Option<PanelButton> {
        if !self.visible {
            return None;
        }
        self.hit_areas.hit_test(position)
    }

    /// Returns true if the press landed on a button.
    pub fn on_press(&mut self, position: Position) -> bool {
        self.pressed = self.button_at(position);
        self.pressed.is_some()
    }

    /// A click is a press and release on the same visible button.
    pub fn on_release(&mut self, position: Position) -> Option<PanelButton> {
        let pressed = self.pressed.take()?;
        (self.button_at(position) == Some(pressed)).then_some(pressed)
    }

    /// Track hover; returns true if a redraw is needed.
    pub fn on_hover(&mut self, position: Position) -> bool {
        if !self.visible {
            return false;
        }
        self.hit_areas.update_hover(position)
    }

    pub fn render(&self, buf: &mut Buffer, origin: Position) {
        if !self.visible {
            return;
        }
        for (id, button) in self.buttons().filter(|(_, b)| b.visible) {
            let rect = offset_rect(button.rect, origin).intersection(buf.area);
            if rect.is_empty() {
                continue;
            }
            let style = Style::default()
                .bg(self.background(id))
                .fg(self.colors.text);
            buf.set_style(rect, style);

            let caption_row = Rect::new(rect.x, rect.y + rect.height / 2, rect.width, 1)
                .intersection(buf.area);
            Paragraph::new(button.caption.as_str())
                .alignment(Alignment::Center)
                .style(style)
                .render(caption_row, buf);
        }
    }
}

// ============================================================================
// State Machine
// ============================================================================

/// Visibility state plus the lazily built panel.
#[derive(Debug, Clone)]
pub struct ActionPanel {
    supports_actions: bool,
    state: PanelState,
    /// Built on first need, never dropped afterwards
    slot: Option<ButtonPanel>,
}

impl ActionPanel {
    /// `event_type` is `None` for items built without event info.
    pub fn new(event_type: Option<ChatEventType>) -> Self {
        let supports_actions = event_type.is_some_and(ChatEventType::supports_actions);
        Self {
            supports_actions,
            state: if supports_actions {
                PanelState::PanelHidden
            } else {
                PanelState::NoPanelNeeded
            },
            slot: None,
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_built(&self) -> bool {
        self.slot.is_some()
    }

    pub fn panel(&self) -> Option<&ButtonPanel> {
        self.slot.as_ref()
    }

    pub fn panel_mut(&mut self) -> Option<&mut ButtonPanel> {
        self.slot.as_mut()
    }

    /// Panel built and currently shown.
    pub fn has_buttons(&self) -> bool {
        self.slot.as_ref().is_some_and(ButtonPanel::is_visible)
    }

    /// Re-run the decision function.
    ///
    /// `build` is only called the first time the panel has to be shown.
    pub fn update(
        &mut self,
        inputs: PanelInputs,
        build: impl FnOnce() -> ButtonPanel,
    ) -> PanelState {
        if !self.supports_actions {
            return self.state;
        }

        let state = decide(inputs);
        let visible = matches!(state, PanelState::PanelVisible { .. });

        if visible && self.slot.is_none() {
            tracing::debug!("Building chat event action panel");
            self.slot = Some(build());
        }

        if let Some(panel) = self.slot.as_mut() {
            // A non-admin keeps whatever per-button flags it had; only the
            // panel as a whole is hidden.
            if inputs.is_admin {
                panel.set_button_visible(PanelButton::AddAvatar, inputs.avatar_missing);
                panel.set_button_visible(PanelButton::AddDescription, inputs.description_missing);
            }
            panel.set_visible(visible);
        }

        if state != self.state {
            tracing::debug!(from = ?self.state, to = ?state, "Action panel transition");
        }
        self.state = state;
        state
    }
}
