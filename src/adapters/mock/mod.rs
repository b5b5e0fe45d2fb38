//! Mock implementations for testing.
//!
//! This module provides fakes for every collaborator trait so items can be
//! exercised without a real text engine, backend or dialogs. The demo binary
//! uses the same fakes as its in-process "backend".
//!
//! # Available Mocks
//!
//! - [`RecordingChannel`] - Records outbound requests, can inject replies
//! - [`InMemoryDirectory`] / [`InMemoryAvatars`] - Mutable contact state
//! - [`FixedTextBlock`] / [`FixedMeasurer`] - Text with scripted metrics
//! - [`ScriptedAvatarEditor`] / [`ScriptedGroupEditor`] - Canned dialog results

pub mod channel;
pub mod dialogs;
pub mod directory;
pub mod text;

pub use channel::RecordingChannel;
pub use dialogs::{ScriptedAvatarEditor, ScriptedGroupEditor};
pub use directory::{ChatRecord, InMemoryAvatars, InMemoryDirectory};
pub use text::{FixedMeasurer, FixedTextBlock};
