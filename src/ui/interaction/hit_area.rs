//! Hit areas for the action panel buttons.
//!
//! The panel registers one area per visible button every time it is laid
//! out, then routes pointer positions through the registry to find the button
//! under the pointer.

use ratatui::layout::{Position, Rect};

use crate::ui::panel::PanelButton;

/// A clickable region bound to a panel button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitArea {
    /// The rectangular region that responds to clicks
    pub rect: Rect,
    /// The button this region activates
    pub button: PanelButton,
}

impl HitArea {
    pub fn new(rect: Rect, button: PanelButton) -> Self {
        Self { rect, button }
    }

    /// Check if a point is within this hit area.
    #[inline]
    pub fn contains(&self, position: Position) -> bool {
        self.rect.contains(position)
    }
}

/// Registry of button hit areas.
///
/// Areas are replaced on each layout pass. Later registrations win where
/// areas overlap (z-order: later = on top).
#[derive(Debug, Default, Clone)]
pub struct HitAreaRegistry {
    areas: Vec<HitArea>,
    /// Index of the currently hovered area (if any)
    hovered: Option<usize>,
}

impl HitAreaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all registered areas and reset hover state.
    pub fn clear(&mut self) {
        self.areas.clear();
        self.hovered = None;
    }

    pub fn register(&mut self, rect: Rect, button: PanelButton) {
        self.areas.push(HitArea::new(rect, button));
    }

    /// Button under `position`, topmost first.
    pub fn hit_test(&self, position: Position) -> Option<PanelButton> {
        self.find_index(position).map(|i| self.areas[i].button)
    }

    /// Update the hover state based on pointer position.
    ///
    /// Returns true if the hovered button changed (requiring a redraw).
    pub fn update_hover(&mut self, position: Position) -> bool {
        let new_hovered = self.find_index(position);
        let changed = new_hovered != self.hovered;
        self.hovered = new_hovered;
        changed
    }

    /// The button currently under the pointer.
    pub fn hovered(&self) -> Option<PanelButton> {
        self.hovered
            .and_then(|idx| self.areas.get(idx))
            .map(|area| area.button)
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    fn find_index(&self, position: Position) -> Option<usize> {
        self.areas
            .iter()
            .enumerate()
            .rev()
            .find(|(_, area)| area.contains(position))
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_rect(x: u16, y: u16, width: u16, height: u16) -> Rect {
        Rect::new(x, y, width, height)
    }

    #[test]
    fn test_hit_area_contains() {
        let area = HitArea::new(make_rect(10, 10, 20, 10), PanelButton::AddAvatar);

        assert!(area.contains(Position::new(10, 10))); // Top-left corner
        assert!(area.contains(Position::new(29, 19))); // Bottom-right corner
        assert!(!area.contains(Position::new(30, 10))); // x + width is exclusive
        assert!(!area.contains(Position::new(10, 20))); // y + height is exclusive
        assert!(!area.contains(Position::new(0, 0)));
    }

    #[test]
    fn test_hit_area_zero_size() {
        let area = HitArea::new(make_rect(5, 5, 0, 0), PanelButton::AddDescription);
        assert!(!area.contains(Position::new(5, 5)));
    }

    #[test]
    fn test_hit_test_basic() {
        let mut registry = HitAreaRegistry::new();
        registry.register(make_rect(0, 0, 10, 3), PanelButton::AddAvatar);
        registry.register(make_rect(12, 0, 10, 3), PanelButton::AddDescription);

        assert_eq!(
            registry.hit_test(Position::new(5, 1)),
            Some(PanelButton::AddAvatar)
        );
        assert_eq!(
            registry.hit_test(Position::new(15, 2)),
            Some(PanelButton::AddDescription)
        );
        // Gap between buttons
        assert_eq!(registry.hit_test(Position::new(11, 1)), None);
    }

    #[test]
    fn test_hit_test_overlapping_areas() {
        let mut registry = HitAreaRegistry::new();
        registry.register(make_rect(0, 0, 20, 20), PanelButton::AddAvatar);
        registry.register(make_rect(5, 5, 10, 10), PanelButton::AddDescription);

        assert_eq!(
            registry.hit_test(Position::new(10, 10)),
            Some(PanelButton::AddDescription)
        );
        assert_eq!(
            registry.hit_test(Position::new(2, 2)),
            Some(PanelButton::AddAvatar)
        );
    }

    #[test]
    fn test_update_hover_returns_changed() {
        let mut registry = HitAreaRegistry::new();
        registry.register(make_rect(0, 0, 10, 10), PanelButton::AddAvatar);
        registry.register(make_rect(20, 0, 10, 10), PanelButton::AddDescription);

        assert!(registry.update_hover(Position::new(5, 5)));
        assert!(!registry.update_hover(Position::new(8, 8)));
        assert_eq!(registry.hovered(), Some(PanelButton::AddAvatar));

        assert!(registry.update_hover(Position::new(25, 5)));
        assert_eq!(registry.hovered(), Some(PanelButton::AddDescription));

        assert!(registry.update_hover(Position::new(100, 100)));
        assert!(!registry.update_hover(Position::new(200, 200)));
        assert_eq!(registry.hovered(), None);
    }

    #[test]
    fn test_registry_clear() {
        let mut registry = HitAreaRegistry::new();
        registry.register(make_rect(0, 0, 10, 10), PanelButton::AddAvatar);
        registry.update_hover(Position::new(5, 5));

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.hovered(), None);
    }
}
