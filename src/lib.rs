//! chat-event - System event bubbles for a chat timeline
//!
//! This library exposes modules for use in integration tests and the demo.

pub mod adapters;
pub mod config;
pub mod error;
pub mod events;
pub mod item;
pub mod models;
pub mod terminal;
pub mod traits;
pub mod ui;

pub use item::{ChatEventItem, Click, Dialogs, Reaction, Services};
