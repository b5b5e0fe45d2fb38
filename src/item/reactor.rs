//! Notification handling.
//!
//! Chat info and avatar broadcasts simply trigger a relayout (the panel
//! decision reads the directory fresh). A `chats/mod/about` reply is matched
//! against the pending token; on a match the item asks the backend for fresh
//! chat info so the description lands in the directory.

use tokio::sync::broadcast::error::TryRecvError;

use crate::error::{ChatEventError, ChatEventResult};
use crate::events::Notification;
use crate::models::{Payload, RequestKind, Seq};

use super::ChatEventItem;

/// What an item did in response to a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Geometry and panel state were recomputed
    Relayout,
    /// The pending token matched and chat info was re-requested
    Requeried(Seq),
    /// The pending token matched but there was nothing to re-request with
    RefreshSkipped,
    /// Stale or foreign reply, nothing changed
    Ignored,
}

impl ChatEventItem {
    /// React to a single notification.
    pub fn handle_notification(
        &mut self,
        notification: &Notification,
    ) -> ChatEventResult<Reaction> {
        match notification {
            Notification::ChatInfoChanged { .. } | Notification::AvatarChanged { .. } => {
                self.relayout();
                Ok(Reaction::Relayout)
            }
            Notification::ModChatAboutResult { seq, error } => {
                if self.pending_modify != Some(*seq) {
                    tracing::trace!(id = self.id, %seq, "Ignoring unrelated mod/about reply");
                    return Ok(Reaction::Ignored);
                }
                self.pending_modify = None;
                tracing::debug!(id = self.id, %seq, error, "Description update confirmed");

                Ok(match self.request_info_refresh()? {
                    Some(requery) => Reaction::Requeried(requery),
                    None => Reaction::RefreshSkipped,
                })
            }
        }
    }

    /// Drain every queued notification.
    ///
    /// A lagged subscription lost some notifications; since every reaction
    /// ends in an idempotent relayout, one relayout stands in for them.
    pub fn pump_notifications(&mut self) -> ChatEventResult<Vec<Reaction>> {
        let mut reactions = Vec::new();
        loop {
            match self.notifications.try_recv() {
                Ok(notification) => reactions.push(self.handle_notification(&notification)?),
                Err(TryRecvError::Lagged(missed)) => {
                    tracing::warn!(id = self.id, missed, "Notification subscription lagged");
                    self.relayout();
                    reactions.push(Reaction::Relayout);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        Ok(reactions)
    }

    /// Ask the backend to refresh chat info for this item's contact.
    ///
    /// The request always carries `aimid` and `limit: 0`. Without a contact
    /// id the chat stamp is added too, and a missing stamp aborts the refresh.
    pub(crate) fn request_info_refresh(&mut self) -> ChatEventResult<Option<Seq>> {
        let mut payload = Payload::new().with_str("aimid", self.contact.as_str());
        if self.contact.is_empty() {
            let stamp = self.services.directory.chat_stamp(&self.contact);
            if stamp.is_empty() {
                tracing::debug!(id = self.id, "No chat stamp, skipping info refresh");
                return Ok(None);
            }
            payload = payload.with_str("stamp", stamp);
        }
        let payload = payload.with_int("limit", 0);

        let kind = RequestKind::ChatInfoGet;
        let seq = self
            .services
            .channel
            .post(kind, payload)
            .map_err(|e| ChatEventError::channel(kind.as_str(), e))?;
        tracing::info!(id = self.id, %seq, "Posted {}", kind);
        Ok(Some(seq))
    }
}
