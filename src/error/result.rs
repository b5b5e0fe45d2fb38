//! Result type alias for chat event operations.

use super::chat_event_error::ChatEventError;

/// Type alias for Results using [`ChatEventError`].
pub type ChatEventResult<T> = Result<T, ChatEventError>;
