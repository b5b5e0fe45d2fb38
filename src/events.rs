//! Change notifications delivered to timeline items.
//!
//! The backend, the contact directory and the avatar store publish
//! [`Notification`]s on a [`NotificationBus`]. Each item takes its own
//! subscription when it is created; dropping the item drops the receiver and
//! thereby deregisters it.

use tokio::sync::broadcast;

use crate::models::Seq;

/// Default buffer for undelivered notifications per subscriber.
pub const DEFAULT_BUS_CAPACITY: usize = 256;

/// External state changes an item may react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Contact list / chat info was refreshed somewhere
    ChatInfoChanged { contact: String },
    /// Backend reply to a `chats/mod/about` request
    ModChatAboutResult { seq: Seq, error: i32 },
    /// An avatar changed (not scoped to the item's contact)
    AvatarChanged { contact: String },
}

impl Notification {
    /// Short name for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::ChatInfoChanged { .. } => "chat_info",
            Notification::ModChatAboutResult { .. } => "mod_chat_about_result",
            Notification::AvatarChanged { .. } => "avatar_changed",
        }
    }
}

/// Broadcast hub for [`Notification`]s.
///
/// Cloning the bus shares the same underlying channel.
#[derive(Debug, Clone)]
pub struct NotificationBus {
    tx: broadcast::Sender<Notification>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUS_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish a notification to every live subscriber.
    ///
    /// Returns the number of subscribers that received it.
    pub fn publish(&self, notification: Notification) -> usize {
        tracing::trace!("Publishing {} notification", notification.kind());
        // No subscribers is not an error: the timeline may be empty
        self.tx.send(notification).unwrap_or(0)
    }

    /// Register a new subscriber.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}
