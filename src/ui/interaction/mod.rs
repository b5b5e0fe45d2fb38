//! Pointer interaction for chat event items.
//!
//! - [`hit_area`] routes pointer positions to action panel buttons
//! - [`pointer`] turns press/release pairs into link clicks

pub mod hit_area;
pub mod pointer;

pub use hit_area::{HitArea, HitAreaRegistry};
pub use pointer::{is_click, CursorShape, PointerTracker};
