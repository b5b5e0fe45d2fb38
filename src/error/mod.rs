//! Error handling for chat event items.
//!
//! Contract violations (a zero-width container, an unsupported delivery
//! status) are programming errors and panic. Everything that can fail at
//! runtime goes through [`ChatEventError`]:
//!
//! | Variant | Source | Recoverable |
//! |---------|--------|-------------|
//! | Channel | Messaging transport refused a request | No |
//! | AvatarEncode | Avatar image could not be encoded | Yes |
//! | Config | Configuration file is malformed | No |
//! | Io | Configuration file could not be read | No |

mod channel;
mod chat_event_error;
mod result;

pub use channel::ChannelError;
pub use chat_event_error::ChatEventError;
pub use result::ChatEventResult;
