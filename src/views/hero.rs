//! Hero: the typewriter terminal, badge, headline, intro and calls to action.

use crate::content::{CallToAction, Hero};
use crate::motion::MotionDescriptor;
use crate::primitives::{
    BoxProps, Edges, Node, Span, box_node, span, terminal_node, text_node,
};
use crate::theme::Theme;
use crate::types::{AlignItems, Attr, BorderStyle, Dimension, FlexDirection, FlexWrap, JustifyContent, TextAlign};

use super::{GUTTER, pill};

/// Badge fade/scale-in.
const BADGE_SCALE: f32 = 0.9;
const BADGE_MS: u64 = 1_000;
/// Intro paragraph width (max-w-2xl).
const INTRO_MAX: u16 = 84;

pub(super) fn hero(hero: &Hero, theme: &Theme, viewport_height: u16) -> Node {
    let terminal = box_node(
        BoxProps {
            align_self: Some(AlignItems::FlexStart),
            margin: Edges {
                left: 4,
                bottom: 2,
                ..Edges::ZERO
            },
            ..Default::default()
        },
        vec![terminal_node(&hero.terminal, theme.terminal_text)],
    );

    let badge = box_node(
        BoxProps {
            padding: Edges::xy(0, 2),
            margin: Edges::bottom(2),
            border: BorderStyle::Rounded,
            border_color: theme.border,
            background: Some(theme.surface_raised),
            ..Default::default()
        },
        vec![text_node(vec![span(&hero.badge, theme.text_muted)]).nowrap()],
    )
    .with_motion(MotionDescriptor::fade_scale(BADGE_SCALE, BADGE_MS));

    let headline = box_node(
        BoxProps {
            align_items: AlignItems::Center,
            margin: Edges::bottom(2),
            ..Default::default()
        },
        vec![
            text_node(vec![span(&hero.headline, theme.text).attrs(Attr::BOLD)])
                .align(TextAlign::Center),
            text_node(vec![
                Span::gradient(&hero.headline_accent, &theme.headline_gradient).attrs(Attr::BOLD),
            ])
            .align(TextAlign::Center),
        ],
    );

    let intro = box_node(
        BoxProps {
            width: Dimension::Percent(100.0),
            max_width: Dimension::Cells(INTRO_MAX),
            margin: Edges::bottom(3),
            ..Default::default()
        },
        vec![
            text_node(
                hero.intro
                    .iter()
                    .map(|run| {
                        if run.emphasis {
                            span(&run.text, theme.text)
                        } else {
                            span(&run.text, theme.text_muted)
                        }
                    })
                    .collect(),
            )
            .align(TextAlign::Center),
        ],
    );

    let ctas = box_node(
        BoxProps {
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::Wrap,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            gap: 4,
            row_gap: Some(1),
            ..Default::default()
        },
        hero.ctas.iter().map(|cta| call_to_action(cta, theme)).collect(),
    );

    let headline_block = box_node(
        BoxProps {
            align_items: AlignItems::Center,
            width: Dimension::Percent(100.0),
            ..Default::default()
        },
        vec![badge, headline, intro, ctas],
    );

    box_node(
        BoxProps {
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Center,
            min_height: Dimension::Cells(viewport_height),
            padding: Edges {
                top: 5,
                bottom: 2,
                left: GUTTER,
                right: GUTTER,
            },
            ..Default::default()
        },
        vec![terminal, headline_block],
    )
}

fn call_to_action(cta: &CallToAction, theme: &Theme) -> Node {
    let node = if cta.primary {
        pill(&cta.label, theme.inverse, theme.on_inverse, Attr::BOLD)
    } else {
        box_node(
            BoxProps {
                padding: Edges::xy(0, 2),
                ..Default::default()
            },
            vec![text_node(vec![span(format!("› {}", cta.label), theme.text)]).nowrap()],
        )
    };
    node.with_href(&cta.href)
}
