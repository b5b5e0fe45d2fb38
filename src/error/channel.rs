//! Messaging channel errors.

use thiserror::Error;

/// Failures reported by a [`MessageChannel`](crate::traits::MessageChannel).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// The backend side of the channel has gone away
    #[error("Messaging channel closed")]
    Closed,
    /// The transport rejected the request
    #[error("Request {kind} rejected: {message}")]
    Rejected { kind: String, message: String },
}
