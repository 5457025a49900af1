//! Floating navigation pill.

use crate::content::Nav;
use crate::motion::{MotionDescriptor, Spring};
use crate::primitives::{BoxProps, Edges, Node, box_node, span, text_node};
use crate::theme::Theme;
use crate::types::{AlignItems, Attr, BorderStyle, Dimension, FlexDirection};

use super::pill;

/// Rows the bar starts above its resting place (100 px).
const SLIDE_ROWS: f32 = 6.0;

pub(super) fn nav(nav: &Nav, theme: &Theme) -> Node {
    let mut items = vec![
        box_node(
            BoxProps {
                margin: Edges {
                    right: 1,
                    ..Edges::ZERO
                },
                ..Default::default()
            },
            vec![pill(&nav.brand, theme.inverse, theme.on_inverse, Attr::BOLD)],
        ),
    ];

    items.extend(nav.links.iter().map(|link| {
        box_node(
            BoxProps {
                padding: Edges::xy(0, 2),
                ..Default::default()
            },
            vec![text_node(vec![span(&link.label, theme.text_muted)]).nowrap()],
        )
        .with_href(&link.href)
    }));

    items.push(
        box_node(
            BoxProps {
                margin: Edges {
                    left: 1,
                    ..Edges::ZERO
                },
                ..Default::default()
            },
            vec![pill(&nav.cta.label, theme.surface_raised, theme.text, Attr::BOLD)],
        )
        .with_href(&nav.cta.href),
    );

    let bar = box_node(
        BoxProps {
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Center,
            padding: Edges::xy(0, 1),
            border: BorderStyle::Rounded,
            border_color: theme.border,
            background: Some(theme.surface),
            ..Default::default()
        },
        items,
    )
    .with_motion(MotionDescriptor::slide_from_top(SLIDE_ROWS, Spring::new(100.0, 20.0)));

    box_node(
        BoxProps {
            width: Dimension::Percent(100.0),
            align_items: AlignItems::Center,
            padding: Edges::top(1),
            ..Default::default()
        },
        vec![bar],
    )
}
