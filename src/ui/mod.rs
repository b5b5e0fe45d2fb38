//! Geometry, state and painting helpers for chat event bubbles.
//!
//! - [`layout`] - Bubble sizing against container width tiers
//! - [`panel`] - Action panel state machine and button row
//! - [`interaction`] - Hit areas and click detection
//! - [`theme`] - Color lookup by key

pub mod interaction;
pub mod layout;
pub mod panel;
pub mod theme;

pub use layout::{BubbleGeometry, LayoutEngine, MarginTier, ReadHeads};
pub use panel::{ActionPanel, ButtonPanel, PanelButton, PanelInputs, PanelState};
pub use theme::{ColorKey, Theme};
