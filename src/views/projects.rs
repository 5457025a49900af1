//! Projects: sticky blocks that fade up as they scroll into view.

use crate::content::{Project, Projects};
use crate::motion::MotionDescriptor;
use crate::primitives::{BoxProps, Edges, Node, box_node, span, text_node};
use crate::theme::Theme;
use crate::types::{AlignItems, Attr, BorderStyle, Dimension, FlexDirection, FlexWrap, JustifyContent, TextAlign};

use super::{CONTENT_MAX, Slots, heading_row, pill, section};

/// Rows below the viewport top where a block sticks (top-24).
const STICKY_TOP: u16 = 6;
/// Reveal: rise one row over half a second, viewport shrunk by 6 rows.
const RISE_ROWS: f32 = 1.0;
const REVEAL_MS: u64 = 500;
const REVEAL_MARGIN: i16 = -6;
/// 16:9 in pixels is about 3.5:1 in 8x16 cells.
const ARTIFACT_ASPECT: f32 = 3.5;

pub(super) fn projects(projects: &Projects, theme: &Theme, slots: &mut Slots) -> Node {
    let list = box_node(
        BoxProps {
            gap: 6,
            ..Default::default()
        },
        projects
            .items
            .iter()
            .enumerate()
            .map(|(index, project)| block(index, project, &projects.artifact_label, theme, slots))
            .collect(),
    );

    section(
        Some("projects"),
        BoxProps {
            padding: Edges::xy(6, 0),
            ..Default::default()
        },
        CONTENT_MAX,
        vec![heading_row(&projects.heading, &projects.index_label, theme), list],
    )
}

fn block(index: usize, project: &Project, artifact_label: &str, theme: &Theme, slots: &mut Slots) -> Node {
    let number = box_node(
        BoxProps {
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Center,
            gap: 2,
            margin: Edges::bottom(1),
            ..Default::default()
        },
        vec![
            text_node(vec![span(format!("{:02}", index + 1), theme.text_ghost).attrs(Attr::BOLD)]).nowrap(),
            box_node(
                BoxProps {
                    grow: 1.0,
                    border: BorderStyle::TopRule,
                    border_color: theme.border,
                    ..Default::default()
                },
                vec![],
            ),
        ],
    );

    let mut title = span(&project.title, theme.text).attrs(Attr::BOLD);
    if project.featured {
        title = title.attrs(Attr::UNDERLINE);
    }

    let chips = box_node(
        BoxProps {
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::Wrap,
            gap: 1,
            row_gap: Some(1),
            margin: Edges::xy(1, 0),
            ..Default::default()
        },
        project
            .tech
            .iter()
            .map(|t| pill(t, theme.surface_raised, theme.text_muted, Attr::NONE))
            .collect(),
    );

    let links = box_node(
        BoxProps {
            flex_direction: FlexDirection::Row,
            gap: 4,
            ..Default::default()
        },
        vec![
            text_node(vec![span("Live Demo ↗", theme.text).attrs(Attr::BOLD | Attr::UNDERLINE)])
                .nowrap()
                .with_href(&project.link),
            text_node(vec![span("‹/› Code", theme.text_subtle)])
                .nowrap()
                .with_href(&project.code_link),
        ],
    );

    let details = box_node(
        BoxProps {
            grow: 5.0,
            flex_basis: Dimension::Cells(30),
            justify_content: JustifyContent::Center,
            ..Default::default()
        },
        vec![
            number,
            text_node(vec![title]),
            text_node(vec![span(&project.role, theme.accent_cyan)]),
            box_node(
                BoxProps {
                    margin: Edges::top(1),
                    ..Default::default()
                },
                vec![text_node(vec![span(&project.description, theme.text_muted)])],
            ),
            chips,
            links,
        ],
    );

    let artifact = box_node(
        BoxProps {
            grow: 7.0,
            flex_basis: Dimension::Cells(30),
            aspect_ratio: Some(ARTIFACT_ASPECT),
            min_height: Dimension::Cells(7),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            border: BorderStyle::Rounded,
            border_color: theme.border,
            background: Some(theme.surface_raised),
            gap: 1,
            ..Default::default()
        },
        vec![
            pill("↗", theme.surface_raised, theme.text, Attr::BOLD),
            text_node(vec![span(artifact_label, theme.text_subtle)]).align(TextAlign::Center),
        ],
    )
    .with_hologram(slots.next());

    box_node(
        BoxProps {
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::Wrap,
            gap: 8,
            row_gap: Some(2),
            padding: Edges::top(2),
            border: BorderStyle::TopRule,
            border_color: theme.border,
            background: Some(theme.background),
            ..Default::default()
        },
        vec![details, artifact],
    )
    .with_sticky_top(STICKY_TOP)
    .with_motion(MotionDescriptor::reveal_on_scroll(RISE_ROWS, REVEAL_MS, REVEAL_MARGIN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Content;
    use crate::motion::Trigger;

    fn setup() -> Node {
        let content = Content::embedded().unwrap();
        projects(&content.projects, &Theme::default(), &mut Slots::default())
    }

    #[test]
    fn test_every_block_sticks_and_reveals() {
        let node = setup();
        let mut blocks = 0;
        node.walk(&mut |_, n| {
            if let Some(motion) = &n.motion {
                blocks += 1;
                assert_eq!(n.sticky_top, Some(STICKY_TOP));
                assert_eq!(motion.trigger, Trigger::InView { margin: -6, once: false });
            }
        });
        assert_eq!(blocks, 5);
    }

    #[test]
    fn test_numbers_are_zero_padded() {
        let node = setup();
        let mut numbers = Vec::new();
        node.walk(&mut |_, n| {
            if let crate::primitives::NodeKind::Text(props) = &n.kind {
                let text = props.plain();
                if text.len() == 2 && text.chars().all(|c| c.is_ascii_digit()) {
                    numbers.push(text);
                }
            }
        });
        assert_eq!(numbers, vec!["01", "02", "03", "04", "05"]);
    }
}
