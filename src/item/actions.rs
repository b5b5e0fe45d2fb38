//! Button activation and pointer routing.

use ratatui::layout::Position;

use crate::error::{ChatEventError, ChatEventResult};
use crate::models::{Payload, RequestKind, Seq};
use crate::traits::{AvatarEditor, AvatarImage, GroupEditor, GroupFields, LinkId};
use crate::ui::interaction::CursorShape;
use crate::ui::panel::PanelButton;

use super::ChatEventItem;

/// The modal dialogs a button may open.
pub struct Dialogs<'a> {
    pub avatar: &'a mut dyn AvatarEditor,
    pub group: &'a mut dyn GroupEditor,
}

/// A completed click on the item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Click {
    Link(LinkId),
    Button(PanelButton),
}

impl ChatEventItem {
    /// Run the flow behind a panel button.
    ///
    /// Returns the tokens of the requests that were posted.
    pub fn activate(
        &mut self,
        button: PanelButton,
        dialogs: Dialogs<'_>,
    ) -> ChatEventResult<Vec<(RequestKind, Seq)>> {
        tracing::debug!(id = self.id, ?button, "Action button activated");
        match button {
            PanelButton::AddAvatar => Ok(self
                .on_add_avatar_clicked(dialogs.avatar)?
                .map(|seq| (RequestKind::SetAvatar, seq))
                .into_iter()
                .collect()),
            PanelButton::AddDescription => self.on_add_description_clicked(dialogs.group),
        }
    }

    /// Pick and crop an avatar, then upload it. Cancelling posts nothing.
    pub fn on_add_avatar_clicked(
        &mut self,
        editor: &mut dyn AvatarEditor,
    ) -> ChatEventResult<Option<Seq>> {
        editor.select_file(&self.contact);
        let image = editor.cropped_image();
        if image.is_empty() {
            tracing::debug!(id = self.id, "Avatar selection cancelled");
            return Ok(None);
        }
        self.post_avatar(&image)
    }

    /// Open the group editor and post one request per changed field.
    ///
    /// The description request becomes the pending token, replacing any
    /// earlier one. The other requests are not tracked. A failed description
    /// post does not stop the other requests; its error is returned after
    /// they are sent.
    pub fn on_add_description_clicked(
        &mut self,
        editor: &mut dyn GroupEditor,
    ) -> ChatEventResult<Vec<(RequestKind, Seq)>> {
        let Some(outcome) = editor.edit(&self.contact, self.current_fields()) else {
            tracing::debug!(id = self.id, "Group editor cancelled");
            return Ok(Vec::new());
        };

        // The directory may have moved on while the dialog was open
        let current = self.current_fields();
        let edited = outcome.fields;
        let mut posted = Vec::new();

        if edited.name != current.name {
            if let Some(seq) = self.post_untracked(RequestKind::ModName, "name", &edited.name) {
                posted.push((RequestKind::ModName, seq));
            }
        }

        let mut description_error = None;
        if edited.description != current.description {
            let kind = RequestKind::ModAbout;
            let payload = Payload::new()
                .with_str("aimid", self.contact.as_str())
                .with_str("about", edited.description.as_str());
            match self.services.channel.post(kind, payload) {
                Ok(seq) => {
                    if let Some(stale) = self.pending_modify.replace(seq) {
                        tracing::debug!(id = self.id, %stale, "Dropping stale description token");
                    }
                    tracing::info!(id = self.id, %seq, "Posted {}", kind);
                    posted.push((kind, seq));
                }
                // Reported once the remaining fields have been sent
                Err(e) => description_error = Some(ChatEventError::channel(kind.as_str(), e)),
            }
        }

        if edited.rules != current.rules {
            if let Some(seq) = self.post_untracked(RequestKind::ModRules, "rules", &edited.rules) {
                posted.push((RequestKind::ModRules, seq));
            }
        }

        if let Some(avatar) = outcome.avatar {
            if let Some(seq) = self.post_avatar(&avatar)? {
                posted.push((RequestKind::SetAvatar, seq));
            }
        }

        match description_error {
            Some(e) => Err(e),
            None => Ok(posted),
        }
    }

    fn current_fields(&self) -> GroupFields {
        let directory = &self.services.directory;
        GroupFields {
            name: directory.chat_name(&self.contact),
            description: directory.chat_description(&self.contact),
            rules: directory.chat_rules(&self.contact),
        }
    }

    /// Post a `chats/mod/*` request nobody waits for. Failures are logged.
    fn post_untracked(&self, kind: RequestKind, field: &str, value: &str) -> Option<Seq> {
        let payload = Payload::new()
            .with_str("aimid", self.contact.as_str())
            .with_str(field, value);
        match self.services.channel.post(kind, payload) {
            Ok(seq) => {
                tracing::info!(id = self.id, %seq, "Posted {}", kind);
                Some(seq)
            }
            Err(e) => {
                tracing::warn!(id = self.id, "Failed to post {}: {}", kind, e);
                None
            }
        }
    }

    /// Upload an avatar. Encoding errors propagate; send failures are logged.
    fn post_avatar(&self, image: &AvatarImage) -> ChatEventResult<Option<Seq>> {
        let bytes = image.to_png_bytes()?;
        let kind = RequestKind::SetAvatar;
        let payload = Payload::new()
            .with_stream("avatar", bytes)
            .with_str("aimid", self.contact.as_str());
        match self.services.channel.post(kind, payload) {
            Ok(seq) => {
                tracing::info!(id = self.id, %seq, "Posted {}", kind);
                Ok(Some(seq))
            }
            Err(e) => {
                tracing::warn!(id = self.id, "Failed to post {}: {}", kind, e);
                Ok(None)
            }
        }
    }

    // ------------------------------------------------------------------------
    // Pointer
    // ------------------------------------------------------------------------

    /// Pointer went down at an item-local position.
    pub fn on_pointer_press(&mut self, position: Position) {
        if let Some(panel) = self.panel.panel_mut() {
            if panel.on_press(position) {
                return;
            }
        }
        self.pointer.press(position);
    }

    /// Pointer went up at an item-local position.
    ///
    /// A panel button clicks when pressed and released on the same button.
    /// Otherwise a release close enough to its press is checked for a link.
    pub fn on_pointer_release(&mut self, position: Position) -> Option<Click> {
        if let Some(panel) = self.panel.panel_mut() {
            if let Some(button) = panel.on_release(position) {
                return Some(Click::Button(button));
            }
        }

        if !self.pointer.release(position) {
            return None;
        }
        let link = self.text.hit_test_link(position)?;
        tracing::debug!(id = self.id, link = %link, "Link clicked");
        Some(Click::Link(link))
    }

    /// Pointer moved without a button held.
    ///
    /// Returns true if the item needs a redraw.
    pub fn on_pointer_move(&mut self, position: Position) -> bool {
        let cursor = if self.text.hit_test_link(position).is_some() {
            CursorShape::PointingHand
        } else {
            CursorShape::Default
        };
        let cursor_changed = cursor != self.cursor;
        self.cursor = cursor;

        let hover_changed = self
            .panel
            .panel_mut()
            .is_some_and(|panel| panel.on_hover(position));
        cursor_changed || hover_changed
    }
}
