//! Mouse Module - Hit testing and pointer routing
//!
//! The painter records a [`HitRegion`] for every card and link it draws.
//! [`HitMap`] turns those regions into an O(1) cell lookup, and
//! [`PointerRouter`] turns a stream of raw pointer moves into per-card
//! enter/move/leave events.
//!
//! # API
//!
//! - `HitGrid` - cell to region index
//! - `HitMap::rebuild(width, height, regions)` - refresh after painting
//! - `HitMap::card_at(x, y)` / `link_at(x, y)` - lookups
//! - `PointerRouter::route(card)` - enter/leave bookkeeping
//!
//! # Example
//!
//! ```
//! use spark_folio::state::mouse::{HitMap, HitRegion, PointerEvent, PointerRouter};
//! use spark_folio::types::ClipRect;
//!
//! let mut map = HitMap::default();
//! map.rebuild(20, 10, vec![HitRegion::card(ClipRect::new(0, 0, 10, 5), 0)]);
//!
//! let mut router = PointerRouter::default();
//! assert_eq!(router.route(map.card_at(2, 2)), vec![PointerEvent::Move(0)]);
//! assert_eq!(router.route(map.card_at(15, 8)), vec![PointerEvent::Leave(0)]);
//! ```

use super::keyboard::Modifiers;
use crate::types::ClipRect;

// =============================================================================
// TYPES
// =============================================================================

/// Mouse action type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    Down,
    Up,
    Move,
    Drag,
    Scroll,
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    #[default]
    None,
}

/// Scroll direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Mouse event in terminal cells
#[derive(Debug, Clone, PartialEq)]
pub struct MouseEvent {
    pub action: MouseAction,
    pub button: MouseButton,
    /// Column (0-indexed)
    pub x: u16,
    /// Row (0-indexed)
    pub y: u16,
    pub modifiers: Modifiers,
    /// Only set for scroll events
    pub scroll: Option<ScrollDirection>,
}

impl MouseEvent {
    /// Create a new mouse event
    pub fn new(action: MouseAction, button: MouseButton, x: u16, y: u16) -> Self {
        Self {
            action,
            button,
            x,
            y,
            modifiers: Modifiers::default(),
            scroll: None,
        }
    }

    /// Create a scroll event
    pub fn scroll(x: u16, y: u16, direction: ScrollDirection) -> Self {
        Self {
            scroll: Some(direction),
            ..Self::new(MouseAction::Scroll, MouseButton::None, x, y)
        }
    }

    /// Create a mouse down event
    pub fn down(button: MouseButton, x: u16, y: u16) -> Self {
        Self::new(MouseAction::Down, button, x, y)
    }

    /// Create a mouse move event
    pub fn move_to(x: u16, y: u16) -> Self {
        Self::new(MouseAction::Move, MouseButton::None, x, y)
    }
}

// =============================================================================
// HIT GRID - O(1) Coordinate to Region Lookup
// =============================================================================

/// A grid for O(1) mouse hit detection.
///
/// Each cell holds the index of the last region painted over it.
#[derive(Debug, Clone, Default)]
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<usize>,
}

impl HitGrid {
    const EMPTY: usize = usize::MAX;

    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Self::EMPTY; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the grid, clearing all contents.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.resize(width as usize * height as usize, Self::EMPTY);
        self.clear();
    }

    pub fn clear(&mut self) {
        self.cells.fill(Self::EMPTY);
    }

    /// Fill a rectangle with a region index, clipped to the grid.
    pub fn fill_rect(&mut self, rect: ClipRect, index: usize) {
        let x_end = (rect.x as u32 + rect.width as u32).min(self.width as u32) as usize;
        let y_end = (rect.y as u32 + rect.height as u32).min(self.height as u32) as usize;
        for y in rect.y as usize..y_end {
            let row = y * self.width as usize;
            for x in rect.x as usize..x_end {
                self.cells[row + x] = index;
            }
        }
    }

    /// Region index at a position.
    pub fn get(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let value = self.cells[y as usize * self.width as usize + x as usize];
        (value != Self::EMPTY).then_some(value)
    }
}

// =============================================================================
// HIT REGIONS
// =============================================================================

/// Something the pointer can land on.
#[derive(Debug, Clone, PartialEq)]
pub struct HitRegion {
    /// Visible screen rectangle.
    pub rect: ClipRect,
    /// Holographic card this region belongs to (itself or an ancestor).
    pub card: Option<usize>,
    /// Link target, if clicking activates something.
    pub href: Option<String>,
}

impl HitRegion {
    pub fn card(rect: ClipRect, card: usize) -> Self {
        Self {
            rect,
            card: Some(card),
            href: None,
        }
    }

    pub fn link(rect: ClipRect, href: impl Into<String>, card: Option<usize>) -> Self {
        Self {
            rect,
            card,
            href: Some(href.into()),
        }
    }
}

/// Regions painted in the last frame plus their lookup grid.
///
/// Later regions win, so children (painted after parents) take precedence.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    grid: HitGrid,
    regions: Vec<HitRegion>,
}

impl HitMap {
    pub fn rebuild(&mut self, width: u16, height: u16, regions: Vec<HitRegion>) {
        if self.grid.width() != width || self.grid.height() != height {
            self.grid.resize(width, height);
        } else {
            self.grid.clear();
        }
        for (index, region) in regions.iter().enumerate() {
            self.grid.fill_rect(region.rect, index);
        }
        self.regions = regions;
    }

    pub fn region_at(&self, x: u16, y: u16) -> Option<&HitRegion> {
        self.grid.get(x, y).and_then(|i| self.regions.get(i))
    }

    /// Card under the pointer, including cards under one of their links.
    pub fn card_at(&self, x: u16, y: u16) -> Option<usize> {
        self.region_at(x, y).and_then(|r| r.card)
    }

    pub fn link_at(&self, x: u16, y: u16) -> Option<&str> {
        self.region_at(x, y).and_then(|r| r.href.as_deref())
    }

    /// Screen rectangle of a card, if it was painted this frame.
    pub fn card_rect(&self, card: usize) -> Option<ClipRect> {
        self.regions
            .iter()
            .find(|r| r.card == Some(card) && r.href.is_none())
            .map(|r| r.rect)
    }

    pub fn regions(&self) -> &[HitRegion] {
        &self.regions
    }
}

// =============================================================================
// POINTER ROUTER
// =============================================================================

/// Per-card pointer notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Pointer moved inside this card (first move doubles as enter).
    Move(usize),
    /// Pointer left this card.
    Leave(usize),
}

/// Tracks which card currently has the pointer.
#[derive(Debug, Clone, Default)]
pub struct PointerRouter {
    hovered: Option<usize>,
}

impl PointerRouter {
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Route a pointer move that landed on `card` (or on nothing).
    pub fn route(&mut self, card: Option<usize>) -> Vec<PointerEvent> {
        let mut events = Vec::with_capacity(2);
        if let Some(previous) = self.hovered {
            if card != Some(previous) {
                events.push(PointerEvent::Leave(previous));
            }
        }
        if let Some(current) = card {
            events.push(PointerEvent::Move(current));
        }
        self.hovered = card;
        events
    }

    /// Pointer left the terminal (or the page was rebuilt).
    pub fn reset(&mut self) -> Option<PointerEvent> {
        self.hovered.take().map(PointerEvent::Leave)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> HitMap {
        let mut map = HitMap::default();
        map.rebuild(
            40,
            20,
            vec![
                HitRegion::card(ClipRect::new(0, 0, 20, 10), 0),
                HitRegion::link(ClipRect::new(2, 2, 6, 1), "#contact", Some(0)),
                HitRegion::card(ClipRect::new(20, 0, 20, 10), 1),
                HitRegion::link(ClipRect::new(0, 15, 10, 1), "https://github.com", None),
            ],
        );
        map
    }

    #[test]
    fn test_hit_grid_bounds() {
        let mut grid = HitGrid::new(4, 4);
        grid.fill_rect(ClipRect::new(2, 2, 10, 10), 7);
        assert_eq!(grid.get(3, 3), Some(7));
        assert_eq!(grid.get(1, 1), None);
        assert_eq!(grid.get(9, 9), None);
    }

    #[test]
    fn test_link_inside_card_keeps_card() {
        let map = setup();
        assert_eq!(map.link_at(3, 2), Some("#contact"));
        assert_eq!(map.card_at(3, 2), Some(0));
        assert_eq!(map.link_at(3, 5), None);
    }

    #[test]
    fn test_card_rect_skips_links() {
        let map = setup();
        assert_eq!(map.card_rect(0), Some(ClipRect::new(0, 0, 20, 10)));
        assert_eq!(map.card_rect(5), None);
    }

    #[test]
    fn test_router_enter_move_leave() {
        let map = setup();
        let mut router = PointerRouter::default();

        assert_eq!(router.route(map.card_at(1, 1)), vec![PointerEvent::Move(0)]);
        assert_eq!(router.route(map.card_at(2, 1)), vec![PointerEvent::Move(0)]);
        assert_eq!(
            router.route(map.card_at(25, 1)),
            vec![PointerEvent::Leave(0), PointerEvent::Move(1)]
        );
        assert_eq!(router.route(map.card_at(5, 15)), vec![PointerEvent::Leave(1)]);
        assert_eq!(router.route(None), vec![]);
        assert_eq!(router.hovered(), None);
    }

    #[test]
    fn test_router_reset() {
        let mut router = PointerRouter::default();
        router.route(Some(3));
        assert_eq!(router.reset(), Some(PointerEvent::Leave(3)));
        assert_eq!(router.reset(), None);
    }

    #[test]
    fn test_rebuild_clears_old_regions() {
        let mut map = setup();
        map.rebuild(40, 20, Vec::new());
        assert_eq!(map.card_at(1, 1), None);
        assert!(map.regions().is_empty());
    }
}
