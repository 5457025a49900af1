//! Tech stack: an eyebrow and a wrapping grid of categories.

use crate::content::{Category, Stack};
use crate::primitives::{BoxProps, Edges, Node, box_node, span, text_node};
use crate::theme::Theme;
use crate::types::{Attr, BorderStyle, Dimension, FlexDirection, FlexWrap};

use super::{CONTENT_MAX, section};

/// Narrowest a category column gets before the grid wraps.
const CATEGORY_MIN: u16 = 24;

pub(super) fn stack(stack: &Stack, theme: &Theme) -> Node {
    let eyebrow = box_node(
        BoxProps {
            margin: Edges::bottom(2),
            ..Default::default()
        },
        vec![text_node(vec![
            span(stack.eyebrow.to_uppercase(), theme.text_subtle),
        ])],
    );

    let grid = box_node(
        BoxProps {
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::Wrap,
            gap: 4,
            row_gap: Some(2),
            ..Default::default()
        },
        stack.categories.iter().map(|c| category(c, theme)).collect(),
    );

    section(
        Some("stack"),
        BoxProps {
            padding: Edges::xy(4, 0),
            border: BorderStyle::TopRule,
            border_color: theme.border_faint,
            background: Some(theme.surface),
            ..Default::default()
        },
        CONTENT_MAX,
        vec![eyebrow, grid],
    )
}

fn category(category: &Category, theme: &Theme) -> Node {
    let title = box_node(
        BoxProps {
            margin: Edges::bottom(1),
            ..Default::default()
        },
        vec![text_node(vec![
            span("# ", theme.text_faint),
            span(&category.name, theme.text).attrs(Attr::BOLD),
        ])],
    );

    let mut children = vec![title];
    children.extend(category.items.iter().map(|item| {
        box_node(
            BoxProps {
                border: BorderStyle::LeftRule,
                border_color: theme.border,
                padding: Edges {
                    left: 2,
                    ..Edges::ZERO
                },
                ..Default::default()
            },
            vec![text_node(vec![span(item, theme.text_muted)])],
        )
    }));

    box_node(
        BoxProps {
            grow: 1.0,
            flex_basis: Dimension::Cells(CATEGORY_MIN),
            min_width: Dimension::Cells(CATEGORY_MIN),
            ..Default::default()
        },
        children,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Content;
    use crate::layout::compute_layout;

    #[test]
    fn test_categories_share_a_row_when_wide() {
        let content = Content::embedded().unwrap();
        let node = stack(&content.stack, &Theme::default());
        let layout = compute_layout(&node, 160).unwrap();

        let mut tops = Vec::new();
        node.walk(&mut |id, n| {
            if n.box_props().is_some_and(|p| p.flex_basis == Dimension::Cells(CATEGORY_MIN)) {
                tops.push(layout.rects[id].y);
            }
        });
        assert_eq!(tops.len(), 4);
        assert!(tops.iter().all(|&y| y == tops[0]));
    }

    #[test]
    fn test_categories_wrap_when_narrow() {
        let content = Content::embedded().unwrap();
        let node = stack(&content.stack, &Theme::default());
        let layout = compute_layout(&node, 40).unwrap();

        let mut tops = Vec::new();
        node.walk(&mut |id, n| {
            if n.box_props().is_some_and(|p| p.flex_basis == Dimension::Cells(CATEGORY_MIN)) {
                tops.push(layout.rects[id].y);
            }
        });
        assert!(tops.windows(2).all(|w| w[0] < w[1]));
    }
}
