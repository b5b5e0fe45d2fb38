//! The chat event timeline item.
//!
//! A [`ChatEventItem`] owns the event text, the lazily built action panel and
//! the pending description-update token, and keeps its geometry in sync with
//! the container and with external state changes:
//!
//! - [`reactor`] - Notification handling and the correlated info refresh
//! - [`actions`] - Button activation and pointer routing
//! - [`render`] - Painting into a ratatui buffer

mod actions;
mod reactor;
mod render;

pub use actions::{Click, Dialogs};
pub use reactor::Reaction;

use std::fmt;
use std::sync::Arc;

use ratatui::layout::{Rect, Size};
use tokio::sync::broadcast;

use crate::adapters::PlainTextBlock;
use crate::config::ItemConfig;
use crate::events::{Notification, NotificationBus};
use crate::models::{ChatEventType, EventInfo, LastStatus, MediaType, Seq};
use crate::traits::{AvatarStore, ContactDirectory, MessageChannel, TextBlock, TextMeasurer};
use crate::ui::interaction::{CursorShape, PointerTracker};
use crate::ui::layout::{BubbleGeometry, LayoutEngine, ReadHeads};
use crate::ui::panel::{ActionPanel, ButtonPanel, PanelInputs, PanelState};
use crate::ui::theme::{ColorKey, Theme};

/// Shared collaborators injected into every item of a timeline.
#[derive(Clone)]
pub struct Services {
    pub directory: Arc<dyn ContactDirectory>,
    pub avatars: Arc<dyn AvatarStore>,
    pub channel: Arc<dyn MessageChannel>,
    pub measurer: Arc<dyn TextMeasurer>,
    pub theme: Arc<Theme>,
    pub bus: NotificationBus,
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services")
            .field("theme", &self.theme)
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}

/// A system event bubble in a chat timeline.
pub struct ChatEventItem {
    id: i64,
    prev_id: i64,
    contact: String,
    event_info: Option<EventInfo>,
    text: Box<dyn TextBlock>,
    panel: ActionPanel,
    /// Token of the outstanding `chats/mod/about` request
    pending_modify: Option<Seq>,
    last_status: LastStatus,
    heads: ReadHeads,
    /// Unknown until the timeline first resizes the item
    container: Option<Size>,
    geometry: BubbleGeometry,
    pointer: PointerTracker,
    cursor: CursorShape,
    notifications: broadcast::Receiver<Notification>,
    engine: LayoutEngine,
    config: ItemConfig,
    services: Services,
}

impl ChatEventItem {
    /// Create an item for an event, rendering its text with [`PlainTextBlock`].
    pub fn new(
        id: i64,
        prev_id: i64,
        contact: impl Into<String>,
        info: EventInfo,
        services: Services,
        config: ItemConfig,
    ) -> Self {
        let text = Box::new(PlainTextBlock::from_event(&info));
        Self::with_text(id, prev_id, contact, info, text, services, config)
    }

    /// Create an item for an event with a caller-supplied text block.
    pub fn with_text(
        id: i64,
        prev_id: i64,
        contact: impl Into<String>,
        info: EventInfo,
        text: Box<dyn TextBlock>,
        services: Services,
        config: ItemConfig,
    ) -> Self {
        let panel = ActionPanel::new(Some(info.event_type));
        Self::assemble(id, prev_id, contact.into(), Some(info), text, panel, services, config)
    }

    /// Create an item around a ready text block, with no event behind it.
    pub fn from_text_block(
        contact: impl Into<String>,
        text: Box<dyn TextBlock>,
        services: Services,
        config: ItemConfig,
    ) -> Self {
        Self::assemble(
            -1,
            -1,
            contact.into(),
            None,
            text,
            ActionPanel::new(None),
            services,
            config,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        id: i64,
        prev_id: i64,
        contact: String,
        event_info: Option<EventInfo>,
        text: Box<dyn TextBlock>,
        panel: ActionPanel,
        services: Services,
        config: ItemConfig,
    ) -> Self {
        let engine = LayoutEngine::new(&config.metrics);
        let pointer = PointerTracker::new(engine.metrics().drag_tolerance);
        let notifications = services.bus.subscribe();

        let mut item = Self {
            id,
            prev_id,
            contact,
            event_info,
            text,
            panel,
            pending_modify: None,
            last_status: LastStatus::None,
            heads: ReadHeads::default(),
            container: None,
            geometry: BubbleGeometry::default(),
            pointer,
            cursor: CursorShape::Default,
            notifications,
            engine,
            config,
            services,
        };
        item.update_style();
        item.update_panel();
        tracing::debug!(
            id = item.id,
            contact = %item.contact,
            state = ?item.panel.state(),
            "Created chat event item"
        );
        item
    }

    // ------------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------------

    /// Fit the item to a new container size.
    pub fn resize(&mut self, container: Size) {
        self.container = Some(container);
        self.relayout();
    }

    /// Re-run the panel decision and recompute geometry.
    ///
    /// Before the first [`resize`](Self::resize) only the panel decision runs.
    pub fn relayout(&mut self) {
        self.update_panel();

        let Some(container) = self.container else {
            return;
        };

        let widths = self
            .panel
            .panel()
            .filter(|p| p.is_visible())
            .map(ButtonPanel::visible_widths);
        let geometry = self.engine.compute_bubble(
            container,
            self.text.as_mut(),
            widths.as_deref(),
            self.heads,
        );

        self.text.set_offsets(geometry.text_offset);
        if let (Some(area), Some(panel)) = (geometry.panel, self.panel.panel_mut()) {
            panel.arrange(area);
        }

        if geometry != self.geometry {
            tracing::debug!(
                id = self.id,
                width = geometry.bubble.width,
                height = geometry.height,
                "Chat event geometry changed"
            );
        }
        self.geometry = geometry;
    }

    fn update_panel(&mut self) -> PanelState {
        let contact = self.contact.as_str();
        let inputs = PanelInputs {
            is_admin: self.services.directory.is_admin(contact),
            avatar_missing: self.services.avatars.is_default_avatar(contact),
            description_missing: self.services.directory.chat_description(contact).is_empty(),
        };

        let captions = &self.config.captions;
        let measurer = self.services.measurer.as_ref();
        let theme = self.services.theme.as_ref();
        let metrics = self.engine.metrics();
        self.panel.update(inputs, || {
            ButtonPanel::build(captions, measurer, theme, metrics)
        })
    }

    /// Maximum text width for a container, see [`LayoutEngine::evaluate_text_width`].
    pub fn evaluate_text_width(&self, container_width: u16) -> u16 {
        self.engine.evaluate_text_width(container_width)
    }

    pub fn geometry(&self) -> &BubbleGeometry {
        &self.geometry
    }

    pub fn bubble_rect(&self) -> Rect {
        self.geometry.bubble
    }

    pub fn height(&self) -> u16 {
        self.geometry.height
    }

    /// Preferred size: full container width, computed height.
    pub fn size_hint(&self) -> Size {
        let width = self.container.map_or(0, |c| c.width);
        Size::new(width, self.geometry.height)
    }

    pub fn set_heads(&mut self, heads: ReadHeads) {
        if self.heads != heads {
            self.heads = heads;
            self.relayout();
        }
    }

    pub fn heads(&self) -> ReadHeads {
        self.heads
    }

    // ------------------------------------------------------------------------
    // Style
    // ------------------------------------------------------------------------

    /// Re-read text colors from the theme.
    pub fn update_style(&mut self) {
        let theme = &self.services.theme;
        self.text
            .set_color(theme.color_for(ColorKey::ChatEventText, &self.contact));
        self.text
            .set_link_color(theme.color_for(ColorKey::TextPrimary, &self.contact));
    }

    /// Swap the theme and recolor.
    pub fn set_theme(&mut self, theme: Arc<Theme>) {
        self.services.theme = theme;
        self.update_style();
    }

    /// Fonts changed: the text must be re-measured.
    pub fn update_fonts(&mut self) {
        self.update_style();
        self.relayout();
    }

    pub fn clear_selection(&mut self) {
        self.text.clear_selection();
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn prev_id(&self) -> i64 {
        self.prev_id
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    pub fn event_info(&self) -> Option<&EventInfo> {
        self.event_info.as_ref()
    }

    pub fn event_type(&self) -> Option<ChatEventType> {
        self.event_info.as_ref().map(|info| info.event_type)
    }

    pub fn text(&self) -> &dyn TextBlock {
        self.text.as_ref()
    }

    pub fn panel(&self) -> &ActionPanel {
        &self.panel
    }

    pub fn panel_state(&self) -> PanelState {
        self.panel.state()
    }

    pub fn pending_modify(&self) -> Option<Seq> {
        self.pending_modify
    }

    pub fn config(&self) -> &ItemConfig {
        &self.config
    }

    pub fn cursor(&self) -> CursorShape {
        self.cursor
    }

    /// Text shown for this item in the recents list.
    pub fn format_recents_text(&self) -> String {
        match &self.event_info {
            Some(info) => info.format_event_text().to_string(),
            None => self.text.plain_text().to_string(),
        }
    }

    /// Status of the item. Always [`LastStatus::None`].
    pub fn last_status(&self) -> LastStatus {
        self.last_status
    }

    /// # Panics
    ///
    /// Panics on any status other than [`LastStatus::None`]: system events
    /// are never sent, delivered or read.
    pub fn set_last_status(&mut self, status: LastStatus) {
        assert!(
            status == LastStatus::None,
            "chat event items only support LastStatus::None, got {status:?}"
        );
        self.last_status = status;
    }

    pub fn media_type(&self) -> MediaType {
        MediaType::NoMedia
    }

    pub fn is_outgoing(&self) -> bool {
        false
    }

    pub fn time(&self) -> i64 {
        0
    }

    pub fn multiselect_enabled(&self) -> bool {
        false
    }
}

impl fmt::Debug for ChatEventItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatEventItem")
            .field("id", &self.id)
            .field("prev_id", &self.prev_id)
            .field("contact", &self.contact)
            .field("event_type", &self.event_type())
            .field("panel", &self.panel.state())
            .field("pending_modify", &self.pending_modify)
            .field("geometry", &self.geometry)
            .finish_non_exhaustive()
    }
}
