//! Views - The portfolio page composed from content records.
//!
//! Each section is a function from its content record and the theme to a
//! node subtree. [`build_page`] stacks them in page order:
//!
//! ```text
//! hero → stack (#stack) → featured (#work) → projects (#projects) → footer (#contact)
//! ```
//!
//! The navigation bar is a separate fixed overlay, and the grid background
//! is painted in screen space by [`background`].

pub mod background;
mod featured;
mod footer;
mod hero;
mod nav;
mod projects;
mod stack;

use crate::content::Content;
use crate::primitives::{BoxProps, Edges, Node, box_node, span, text_node};
use crate::theme::Theme;
use crate::types::{AlignItems, Attr, Dimension, FlexDirection, JustifyContent, Rgba};

/// Widest content column (max-w-7xl).
pub(crate) const CONTENT_MAX: u16 = 160;
/// Page gutter (px-6).
pub(crate) const GUTTER: u16 = 3;

// =============================================================================
// Page
// =============================================================================

/// A built page, ready for layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Scrolling content.
    pub root: Node,
    /// Fixed navigation, laid out and painted over the content.
    pub overlay: Node,
    /// Number of holographic cards; slots are `0..hologram_count`.
    pub hologram_count: usize,
    /// Full text the hero typewriter reveals.
    pub typewriter_text: String,
}

/// Hands out hologram slots in paint order.
#[derive(Debug, Default)]
pub(crate) struct Slots(usize);

impl Slots {
    pub(crate) fn next(&mut self) -> usize {
        let slot = self.0;
        self.0 += 1;
        slot
    }
}

/// Compose the page for a viewport `viewport_height` rows tall.
pub fn build_page(content: &Content, theme: &Theme, viewport_height: u16) -> Page {
    let mut slots = Slots::default();

    let root = box_node(
        BoxProps {
            width: Dimension::Percent(100.0),
            ..Default::default()
        },
        vec![
            hero::hero(&content.hero, theme, viewport_height),
            stack::stack(&content.stack, theme),
            featured::featured(&content.featured, theme, &mut slots),
            projects::projects(&content.projects, theme, &mut slots),
            footer::footer(&content.footer, theme),
        ],
    );

    Page {
        root,
        overlay: nav::nav(&content.nav, theme),
        hologram_count: slots.0,
        typewriter_text: content.hero.terminal.clone(),
    }
}

// =============================================================================
// Shared pieces
// =============================================================================

/// A full-width section with a centered content column.
pub(crate) fn section(
    anchor: Option<&str>,
    outer: BoxProps,
    max_width: u16,
    children: Vec<Node>,
) -> Node {
    let column = box_node(
        BoxProps {
            width: Dimension::Percent(100.0),
            max_width: Dimension::Cells(max_width),
            ..Default::default()
        },
        children,
    );
    let node = box_node(
        BoxProps {
            align_items: AlignItems::Center,
            padding: Edges {
                left: GUTTER,
                right: GUTTER,
                ..outer.padding
            },
            ..outer
        },
        vec![column],
    );
    match anchor {
        Some(name) => node.with_anchor(name),
        None => node,
    }
}

/// Section title on the left, index label on the right.
pub(crate) fn heading_row(heading: &str, index_label: &str, theme: &Theme) -> Node {
    box_node(
        BoxProps {
            flex_direction: FlexDirection::Row,
            justify_content: JustifyContent::SpaceBetween,
            align_items: AlignItems::FlexEnd,
            margin: Edges::bottom(3),
            gap: 2,
            ..Default::default()
        },
        vec![
            text_node(vec![span(heading, theme.text).attrs(Attr::BOLD)]),
            text_node(vec![span(index_label, theme.text_subtle)]).nowrap(),
        ],
    )
}

/// A one-row pill: padded label on a background.
pub(crate) fn pill(label: &str, background: Rgba, fg: Rgba, attrs: Attr) -> Node {
    box_node(
        BoxProps {
            padding: Edges::xy(0, 2),
            background: Some(background),
            ..Default::default()
        },
        vec![text_node(vec![span(label, fg).attrs(attrs)]).nowrap()],
    )
}

// =============================================================================
// Tests
// =============================================================================
