//! Scroll State Module
//!
//! The page scrolls as a whole: one vertical offset clamped to
//! `[0, content_height - viewport_height]`. Bounds come from the computed
//! layout; anchor jumps read anchor rows from it too.

use std::collections::HashMap;

use tracing::debug;

// =============================================================================
// SCROLL CONSTANTS
// =============================================================================

/// Default scroll amount for arrow keys (lines).
pub const LINE_SCROLL: i32 = 1;

/// Default scroll amount for mouse wheel.
pub const WHEEL_SCROLL: i32 = 3;

/// Default scroll amount for Page Up/Down (90% of viewport).
pub const PAGE_SCROLL_FACTOR: f32 = 0.9;

// =============================================================================
// PAGE SCROLL
// =============================================================================

/// Vertical scroll state of the page.
#[derive(Debug, Clone, Default)]
pub struct PageScroll {
    offset: u16,
    content_height: u16,
    viewport_height: u16,
}

impl PageScroll {
    pub fn new(content_height: u16, viewport_height: u16) -> Self {
        Self {
            offset: 0,
            content_height,
            viewport_height,
        }
    }

    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Update bounds after a relayout or resize, keeping the offset valid.
    pub fn set_bounds(&mut self, content_height: u16, viewport_height: u16) {
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Set the offset (clamped). Returns true if it changed.
    pub fn scroll_to(&mut self, row: i32) -> bool {
        let clamped = row.clamp(0, self.max_offset() as i32) as u16;
        let changed = clamped != self.offset;
        self.offset = clamped;
        changed
    }

    /// Scroll by a delta (negative = up). Returns true if the offset moved.
    pub fn scroll_by(&mut self, delta: i32) -> bool {
        self.scroll_to(self.offset as i32 + delta)
    }

    fn page(&self) -> i32 {
        ((self.viewport_height as f32 * PAGE_SCROLL_FACTOR) as i32).max(1)
    }

    pub fn page_down(&mut self) -> bool {
        self.scroll_by(self.page())
    }

    pub fn page_up(&mut self) -> bool {
        self.scroll_by(-self.page())
    }

    pub fn scroll_to_top(&mut self) -> bool {
        self.scroll_to(0)
    }

    pub fn scroll_to_bottom(&mut self) -> bool {
        self.scroll_to(self.max_offset() as i32)
    }

    /// Bring a named anchor to the top of the viewport (or as close as the
    /// bounds allow). Returns false for unknown anchors.
    pub fn scroll_to_anchor(&mut self, anchors: &HashMap<String, u16>, name: &str) -> bool {
        let name = name.trim_start_matches('#');
        match anchors.get(name) {
            Some(&row) => {
                debug!(anchor = name, row, "anchor jump");
                self.scroll_to(row as i32);
                true
            }
            None => false,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
