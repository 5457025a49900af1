//! Contact footer.

use crate::content::Footer;
use crate::primitives::{BoxProps, Edges, Node, box_node, span, text_node};
use crate::theme::Theme;
use crate::types::{AlignItems, Attr, BorderStyle, FlexDirection, FlexWrap, JustifyContent, TextAlign};

use super::{pill, section};

/// Footer column width (max-w-4xl).
const FOOTER_MAX: u16 = 112;

pub(super) fn footer(footer: &Footer, theme: &Theme) -> Node {
    let headline = box_node(
        BoxProps {
            margin: Edges::bottom(2),
            ..Default::default()
        },
        footer
            .headline
            .iter()
            .map(|line| {
                text_node(vec![span(line, theme.text).attrs(Attr::BOLD)]).align(TextAlign::Center)
            })
            .collect(),
    );

    let blurb = box_node(
        BoxProps {
            margin: Edges::bottom(2),
            ..Default::default()
        },
        vec![text_node(vec![span(&footer.blurb, theme.text_muted)]).align(TextAlign::Center)],
    );

    let contacts = box_node(
        BoxProps {
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::Wrap,
            justify_content: JustifyContent::Center,
            gap: 3,
            row_gap: Some(1),
            margin: Edges::bottom(4),
            ..Default::default()
        },
        footer
            .contacts
            .iter()
            .enumerate()
            .map(|(i, link)| {
                let node = if i == 0 {
                    pill(&link.label, theme.inverse, theme.on_inverse, Attr::BOLD)
                } else {
                    pill(&link.label, theme.surface_raised, theme.text, Attr::NONE)
                };
                node.with_href(&link.href)
            })
            .collect(),
    );

    let meta = box_node(
        BoxProps {
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::Wrap,
            justify_content: JustifyContent::SpaceBetween,
            gap: 2,
            ..Default::default()
        },
        footer
            .meta
            .iter()
            .map(|m| text_node(vec![span(m.to_uppercase(), theme.text_faint)]).nowrap())
            .collect(),
    );

    section(
        Some("contact"),
        BoxProps {
            padding: Edges::xy(6, 0),
            border: BorderStyle::TopRule,
            border_color: theme.border,
            align_items: AlignItems::Center,
            ..Default::default()
        },
        FOOTER_MAX,
        vec![headline, blurb, contacts, meta],
    )
}
