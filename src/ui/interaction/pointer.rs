//! Pointer press/release tracking for link clicks.
//!
//! A release only counts as a click when it lands close to the matching
//! press; anything further is a drag (usually a text selection) and is
//! swallowed.

use ratatui::layout::Position;

/// Cursor shape the host should display over the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorShape {
    #[default]
    Default,
    /// Pointing hand, shown over links
    PointingHand,
}

/// Whether a press at `press` followed by a release at `release` is a click.
///
/// The Manhattan distance between the two must stay below `tolerance`.
pub fn is_click(press: Position, release: Position, tolerance: u16) -> bool {
    let dx = u32::from(press.x.abs_diff(release.x));
    let dy = u32::from(press.y.abs_diff(release.y));
    dx + dy < u32::from(tolerance)
}

/// Remembers where the pointer went down.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    press: Option<Position>,
    tolerance: u16,
}

impl PointerTracker {
    pub fn new(tolerance: u16) -> Self {
        Self {
            press: None,
            tolerance,
        }
    }

    pub fn press(&mut self, position: Position) {
        self.press = Some(position);
    }

    /// Consume the recorded press and report whether this release is a click.
    pub fn release(&mut self, position: Position) -> bool {
        match self.press.take() {
            Some(press) => is_click(press, position, self.tolerance),
            None => false,
        }
    }

    pub fn pressed_at(&self) -> Option<Position> {
        self.press
    }

    pub fn tolerance(&self) -> u16 {
        self.tolerance
    }
}
