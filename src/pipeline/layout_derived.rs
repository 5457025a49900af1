//! Layout Derived - Reactive page layout.
//!
//! Creates a Derived that rebuilds the page and lays it out whenever the
//! terminal size changes. The hero is as tall as the viewport, so height
//! is a real dependency, not just width.

use std::rc::Rc;

use spark_signals::{Derived, derived};
use tracing::debug;

use crate::content::Content;
use crate::layout::{ComputedLayout, compute_layout};
use crate::theme::Theme;
use crate::views::{Page, build_page};

use super::terminal::TerminalSize;

/// A built page with both of its layers laid out.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub page: Page,
    /// Scrolling content.
    pub root: ComputedLayout,
    /// Fixed navigation.
    pub overlay: ComputedLayout,
}

/// Layout failures are carried as text so the value stays comparable.
pub type LayoutResult = Result<Rc<PageLayout>, String>;

/// Lay out `page` for a terminal `width` columns wide.
pub fn layout_page(page: Page, width: u16) -> crate::error::Result<PageLayout> {
    let root = compute_layout(&page.root, width)?;
    let overlay = compute_layout(&page.overlay, width)?;
    debug!(
        width,
        content_height = root.content_height,
        nodes = root.rects.len(),
        "page laid out"
    );
    Ok(PageLayout {
        page,
        root,
        overlay,
    })
}

/// Create the layout derived.
///
/// Re-runs when either terminal dimension changes.
pub fn create_layout_derived(
    content: Rc<Content>,
    theme: Rc<Theme>,
    size: &TerminalSize,
) -> Derived<LayoutResult> {
    let width_signal = size.width_signal();
    let height_signal = size.height_signal();

    derived(move || {
        let width = width_signal.get();
        let height = height_signal.get();

        let page = build_page(&content, &theme, height);
        layout_page(page, width)
            .map(Rc::new)
            .map_err(|err| err.to_string())
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Rc<Content>, Rc<Theme>, TerminalSize) {
        (
            Rc::new(Content::embedded().unwrap()),
            Rc::new(Theme::default()),
            TerminalSize::new(100, 30),
        )
    }

    #[test]
    fn test_layout_derived_fills_width() {
        let (content, theme, size) = setup();
        let layout_derived = create_layout_derived(content, theme, &size);
        let layout = layout_derived.get().unwrap();
        assert_eq!(layout.root.rects[0].width, 100);
        assert_eq!(layout.overlay.rects[0].width, 100);
        assert!(layout.root.content_height > 30);
    }

    #[test]
    fn test_layout_derived_reacts_to_terminal_resize() {
        let (content, theme, size) = setup();
        let layout_derived = create_layout_derived(content, theme, &size);

        let before = layout_derived.get().unwrap();
        size.set(140, 50);
        let after = layout_derived.get().unwrap();

        assert_eq!(after.root.rects[0].width, 140);
        // The hero follows the viewport height.
        assert!(after.root.rects[1].height >= 50);
        assert!(before.root.rects[1].height >= 30);
    }

    #[test]
    fn test_preorder_ids_stable_across_resize() {
        let (content, theme, size) = setup();
        let layout_derived = create_layout_derived(content, theme, &size);
        let narrow = layout_derived.get().unwrap();
        size.set(60, 20);
        let wide = layout_derived.get().unwrap();
        assert_eq!(narrow.root.rects.len(), wide.root.rects.len());
        assert_eq!(narrow.page.hologram_count, wide.page.hologram_count);
    }
}
