//! Concrete implementations of trait abstractions.
//!
//! These adapters implement the traits defined in `crate::traits` so the item
//! can be wired to real collaborators in the demo and to fakes in tests.
//!
//! # Adapters
//!
//! - [`DispatcherChannel`] - Queues outbound requests for an async transport task
//! - [`PlainTextBlock`] - Word-wrapping, link-aware text block
//! - [`UnicodeMeasurer`] - Caption measurement by display width
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles for every collaborator:
//! - [`mock::RecordingChannel`] - Records requests, injects replies
//! - [`mock::InMemoryDirectory`] - Mutable chat attributes
//! - [`mock::FixedTextBlock`] - Text with scripted metrics

pub mod dispatcher;
pub mod mock;
pub mod plain_text;

pub use dispatcher::DispatcherChannel;
pub use plain_text::{PlainTextBlock, UnicodeMeasurer};
