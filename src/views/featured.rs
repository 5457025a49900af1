//! Featured role: heading row and one holographic card.

use crate::content::{Featured, Highlight, Metric};
use crate::primitives::{BoxProps, Edges, Node, box_node, span, text_node};
use crate::theme::Theme;
use crate::types::{AlignItems, Attr, BorderStyle, Dimension, FlexDirection, FlexWrap, JustifyContent};

use super::{CONTENT_MAX, Slots, heading_row, section};

/// Basis of each card column; below twice this the columns stack.
const COLUMN_BASIS: u16 = 40;

pub(super) fn featured(featured: &Featured, theme: &Theme, slots: &mut Slots) -> Node {
    let card = box_node(
        BoxProps {
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::Wrap,
            gap: 6,
            row_gap: Some(2),
            padding: Edges::xy(2, 4),
            border: BorderStyle::Rounded,
            border_color: theme.border,
            background: Some(theme.surface),
            ..Default::default()
        },
        vec![summary(featured, theme), highlights(&featured.highlights, theme)],
    )
    .with_hologram(slots.next());

    section(
        Some("work"),
        BoxProps {
            padding: Edges::xy(6, 0),
            ..Default::default()
        },
        CONTENT_MAX,
        vec![heading_row(&featured.heading, &featured.index_label, theme), card],
    )
}

fn column() -> BoxProps {
    BoxProps {
        grow: 1.0,
        flex_basis: Dimension::Cells(COLUMN_BASIS),
        ..Default::default()
    }
}

fn summary(featured: &Featured, theme: &Theme) -> Node {
    let status = box_node(
        BoxProps {
            flex_direction: FlexDirection::Row,
            align_self: Some(AlignItems::FlexStart),
            gap: 1,
            padding: Edges::xy(0, 2),
            margin: Edges::bottom(1),
            background: Some(theme.accent_green.fade(0.1)),
            ..Default::default()
        },
        vec![
            text_node(vec![span("●", theme.accent_green)]).nowrap().pulsing(),
            text_node(vec![span(&featured.status, theme.accent_green).attrs(Attr::BOLD)]).nowrap(),
        ],
    );

    let metrics = box_node(
        BoxProps {
            flex_direction: FlexDirection::Row,
            gap: 6,
            margin: Edges::top(1),
            ..Default::default()
        },
        featured.metrics.iter().map(|m| metric(m, theme)).collect(),
    );

    let children = vec![
        status,
        text_node(vec![span(&featured.company, theme.text).attrs(Attr::BOLD)]),
        text_node(vec![span(&featured.role, theme.text_muted)]),
        box_node(
            BoxProps {
                margin: Edges::top(1),
                ..Default::default()
            },
            vec![text_node(vec![span(&featured.summary, theme.text_body)])],
        ),
        metrics,
    ];
    box_node(column(), children)
}

fn metric(metric: &Metric, theme: &Theme) -> Node {
    box_node(
        BoxProps::default(),
        vec![
            text_node(vec![span(&metric.value, theme.text).attrs(Attr::BOLD)]),
            text_node(vec![span(metric.label.to_uppercase(), theme.text_subtle)]),
        ],
    )
}

fn highlights(highlights: &[Highlight], theme: &Theme) -> Node {
    box_node(
        BoxProps {
            justify_content: JustifyContent::Center,
            gap: 1,
            ..column()
        },
        highlights
            .iter()
            .map(|h| {
                box_node(
                    BoxProps {
                        padding: Edges::xy(0, 2),
                        border: BorderStyle::Rounded,
                        border_color: theme.border_faint,
                        background: Some(theme.surface_raised),
                        ..Default::default()
                    },
                    vec![
                        text_node(vec![span(&h.title, theme.text).attrs(Attr::BOLD)]),
                        text_node(vec![span(&h.description, theme.text_muted)]),
                    ],
                )
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Content;
    use crate::primitives::NodeKind;

    fn setup() -> (Node, usize) {
        let content = Content::embedded().unwrap();
        let mut slots = Slots::default();
        let node = featured(&content.featured, &Theme::default(), &mut slots);
        (node, slots.next())
    }

    #[test]
    fn test_claims_one_slot() {
        let (node, next) = setup();
        assert_eq!(next, 1);
        let mut holograms = Vec::new();
        node.walk(&mut |_, n| holograms.extend(n.hologram));
        assert_eq!(holograms, vec![0]);
    }

    #[test]
    fn test_status_dot_pulses() {
        let (node, _) = setup();
        let mut pulsing = Vec::new();
        node.walk(&mut |_, n| {
            if let NodeKind::Text(props) = &n.kind {
                if props.pulse {
                    pulsing.push(props.plain());
                }
            }
        });
        assert_eq!(pulsing, vec!["●"]);
    }
}
