//! Trait abstractions for the collaborators of a chat event item.
//!
//! Every external dependency is injected through one of these traits so the
//! item can be driven by fakes in tests.
//!
//! # Traits
//!
//! - [`TextBlock`] - Wrapped, link-aware text measurement and painting
//! - [`TextMeasurer`] - Caption width for button sizing
//! - [`ContactDirectory`] - Chat metadata and admin rights
//! - [`AvatarStore`] - Default-avatar lookup
//! - [`MessageChannel`] - Outbound backend requests
//! - [`AvatarEditor`] / [`GroupEditor`] - Modal dialogs opened by the buttons

pub mod channel;
pub mod dialogs;
pub mod directory;
pub mod text;

pub use channel::MessageChannel;
pub use dialogs::{AvatarEditor, AvatarImage, GroupEditOutcome, GroupEditor, GroupFields};
pub use directory::{AvatarStore, ContactDirectory};
pub use text::{LinkId, TextBlock, TextMeasurer, TextMetrics};
