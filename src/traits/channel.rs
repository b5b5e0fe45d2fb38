//! Messaging channel trait abstraction.
//!
//! Requests are fire-and-forget from the caller's point of view: `post`
//! returns as soon as the request is queued, and the backend's reply (if any)
//! arrives later on the [`NotificationBus`](crate::events::NotificationBus)
//! tagged with the returned [`Seq`].

use crate::error::ChannelError;
use crate::models::{Payload, RequestKind, Seq};

/// Trait for posting requests to the messaging backend.
///
/// # Example
///
/// ```ignore
/// use chat_event::models::{Payload, RequestKind};
/// use chat_event::traits::MessageChannel;
///
/// fn rename<C: MessageChannel>(channel: &C, aimid: &str, name: &str) {
///     let payload = Payload::new().with_str("aimid", aimid).with_str("name", name);
///     let seq = channel.post(RequestKind::ModName, payload)?;
/// }
/// ```
pub trait MessageChannel: Send + Sync {
    /// Queue a request and return its correlation token.
    fn post(&self, kind: RequestKind, payload: Payload) -> Result<Seq, ChannelError>;
}
