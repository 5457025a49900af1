//! Taffy Bridge - Integration with Taffy layout engine
//!
//! Converts node props to Taffy styles, runs layout computation, and
//! extracts absolute rectangles back into a [`ComputedLayout`] indexed by
//! preorder node id.

use std::collections::HashMap;

use taffy::{
    AlignItems as TaffyAlignItems, AlignSelf as TaffyAlignSelf, AvailableSpace,
    Dimension as TaffyDimension, Display, FlexDirection as TaffyFlexDirection,
    FlexWrap as TaffyFlexWrap, JustifyContent as TaffyJustifyContent, LengthPercentage,
    LengthPercentageAuto, NodeId, Rect, Size, Style, TaffyTree,
};
use tracing::trace;

use crate::error::Result;
use crate::primitives::{BoxProps, Node, NodeKind, Span, span};
use crate::types::{AlignItems, Dimension, FlexDirection, FlexWrap, JustifyContent};

use super::text_measure::{longest_word, measure_spans};

// =============================================================================
// RESULT
// =============================================================================

/// Absolute position and size of one node, in cells.
///
/// `x`/`y` are signed so content scrolled or animated off-screen keeps its
/// true position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl LayoutRect {
    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Layout of a whole tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComputedLayout {
    /// One rect per node, by preorder id.
    pub rects: Vec<LayoutRect>,
    /// Anchor name to the row its node starts on.
    pub anchors: HashMap<String, u16>,
    pub content_width: u16,
    pub content_height: u16,
}

impl ComputedLayout {
    pub fn rect(&self, id: usize) -> Option<LayoutRect> {
        self.rects.get(id).copied()
    }
}

// =============================================================================
// DIMENSION CONVERSION
// =============================================================================

fn to_taffy_dimension(dim: Dimension) -> TaffyDimension {
    match dim {
        Dimension::Auto => TaffyDimension::Auto,
        Dimension::Cells(n) => TaffyDimension::Length(n as f32),
        Dimension::Percent(p) => TaffyDimension::Percent(p / 100.0),
    }
}

fn length(n: u16) -> LengthPercentage {
    LengthPercentage::Length(n as f32)
}

// =============================================================================
// ENUM CONVERSIONS
// =============================================================================

fn to_taffy_flex_direction(dir: FlexDirection) -> TaffyFlexDirection {
    match dir {
        FlexDirection::Column => TaffyFlexDirection::Column,
        FlexDirection::Row => TaffyFlexDirection::Row,
    }
}

fn to_taffy_flex_wrap(wrap: FlexWrap) -> TaffyFlexWrap {
    match wrap {
        FlexWrap::NoWrap => TaffyFlexWrap::NoWrap,
        FlexWrap::Wrap => TaffyFlexWrap::Wrap,
    }
}

fn to_taffy_justify_content(justify: JustifyContent) -> Option<TaffyJustifyContent> {
    Some(match justify {
        JustifyContent::FlexStart => TaffyJustifyContent::FlexStart,
        JustifyContent::Center => TaffyJustifyContent::Center,
        JustifyContent::FlexEnd => TaffyJustifyContent::FlexEnd,
        JustifyContent::SpaceBetween => TaffyJustifyContent::SpaceBetween,
    })
}

fn to_taffy_align_items(align: AlignItems) -> Option<TaffyAlignItems> {
    Some(match align {
        AlignItems::Stretch => TaffyAlignItems::Stretch,
        AlignItems::FlexStart => TaffyAlignItems::FlexStart,
        AlignItems::Center => TaffyAlignItems::Center,
        AlignItems::FlexEnd => TaffyAlignItems::FlexEnd,
    })
}

fn to_taffy_align_self(align: Option<AlignItems>) -> Option<TaffyAlignSelf> {
    align.and_then(to_taffy_align_items)
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

fn box_style(props: &BoxProps) -> Style {
    let (bt, br, bb, bl) = props.border.insets();
    let row_gap = props.row_gap.unwrap_or(props.gap);

    Style {
        display: Display::Flex,

        // Flex container properties
        flex_direction: to_taffy_flex_direction(props.flex_direction),
        flex_wrap: to_taffy_flex_wrap(props.flex_wrap),
        justify_content: to_taffy_justify_content(props.justify_content),
        align_items: to_taffy_align_items(props.align_items),

        // Flex item properties
        flex_grow: props.grow,
        flex_shrink: props.shrink,
        flex_basis: to_taffy_dimension(props.flex_basis),
        align_self: to_taffy_align_self(props.align_self),

        // Dimensions
        size: Size {
            width: to_taffy_dimension(props.width),
            height: to_taffy_dimension(props.height),
        },
        min_size: Size {
            width: to_taffy_dimension(props.min_width),
            height: to_taffy_dimension(props.min_height),
        },
        max_size: Size {
            width: to_taffy_dimension(props.max_width),
            height: TaffyDimension::Auto,
        },
        aspect_ratio: props.aspect_ratio,

        margin: Rect {
            top: LengthPercentageAuto::Length(props.margin.top as f32),
            right: LengthPercentageAuto::Length(props.margin.right as f32),
            bottom: LengthPercentageAuto::Length(props.margin.bottom as f32),
            left: LengthPercentageAuto::Length(props.margin.left as f32),
        },
        padding: Rect {
            top: length(props.padding.top),
            right: length(props.padding.right),
            bottom: length(props.padding.bottom),
            left: length(props.padding.left),
        },
        // Border width only; style and color are painted.
        border: Rect {
            top: length(bt),
            right: length(br),
            bottom: length(bb),
            left: length(bl),
        },
        gap: Size {
            width: length(props.gap),
            height: length(row_gap),
        },

        ..Default::default()
    }
}

/// Text leaves size themselves through the measure function. They may
/// shrink to their longest word.
fn leaf_style() -> Style {
    Style {
        display: Display::Flex,
        flex_shrink: 1.0,
        ..Default::default()
    }
}

// =============================================================================
// TEXT MEASUREMENT
// =============================================================================

/// What a leaf measures: its spans and whether they wrap.
struct Measured {
    spans: Vec<Span>,
    wrap: bool,
}

fn measured(node: &Node) -> Option<Measured> {
    match &node.kind {
        NodeKind::Box(_) => None,
        NodeKind::Text(props) => Some(Measured {
            spans: props.spans.clone(),
            wrap: props.wrap,
        }),
        // Reserve room for the whole text plus the caret.
        NodeKind::Terminal(props) => Some(Measured {
            spans: vec![span(format!("{}{}", props.full_text, props.caret), props.color)],
            wrap: true,
        }),
    }
}

fn measure_leaf(
    leaf: &Measured,
    known_dimensions: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
) -> Size<f32> {
    let max_width = match (known_dimensions.width, available_space.width) {
        _ if !leaf.wrap => None,
        (Some(w), _) => Some(w as u16),
        (None, AvailableSpace::Definite(w)) => Some(w as u16),
        (None, AvailableSpace::MinContent) => Some(longest_word(&leaf.spans)),
        (None, AvailableSpace::MaxContent) => None,
    };

    let (width, height) = measure_spans(&leaf.spans, max_width);

    Size {
        width: known_dimensions.width.unwrap_or(width as f32),
        height: known_dimensions.height.unwrap_or(height as f32),
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

fn build(
    tree: &mut TaffyTree<usize>,
    node: &Node,
    leaves: &mut Vec<Option<Measured>>,
    ids: &mut Vec<NodeId>,
) -> Result<NodeId> {
    let id = leaves.len();
    let leaf = measured(node);

    let taffy_node = match (&node.kind, leaf.is_some()) {
        (NodeKind::Box(props), _) => tree.new_leaf(box_style(props))?,
        (_, true) => tree.new_leaf_with_context(leaf_style(), id)?,
        (_, false) => tree.new_leaf(leaf_style())?,
    };
    leaves.push(leaf);
    ids.push(taffy_node);

    for child in &node.children {
        let child_node = build(tree, child, leaves, ids)?;
        tree.add_child(taffy_node, child_node)?;
    }
    Ok(taffy_node)
}

/// Compute layout for a node tree at the given viewport width.
///
/// Height is unconstrained; the page is as tall as its content.
pub fn compute_layout(root: &Node, width: u16) -> Result<ComputedLayout> {
    let mut tree: TaffyTree<usize> = TaffyTree::new();
    let mut leaves = Vec::new();
    let mut ids = Vec::new();
    let root_node = build(&mut tree, root, &mut leaves, &mut ids)?;

    // An auto-width root fills the viewport.
    let mut root_style = tree.style(root_node)?.clone();
    if root_style.size.width == TaffyDimension::Auto {
        root_style.size.width = TaffyDimension::Length(width as f32);
        tree.set_style(root_node, root_style)?;
    }

    let available = Size {
        width: AvailableSpace::Definite(width as f32),
        height: AvailableSpace::MaxContent,
    };

    tree.compute_layout_with_measure(
        root_node,
        available,
        |known_dimensions: Size<Option<f32>>,
         available_space: Size<AvailableSpace>,
         _node_id: NodeId,
         context: Option<&mut usize>,
         _style: &Style| {
            match context.and_then(|&mut id| leaves.get(id)).and_then(Option::as_ref) {
                Some(leaf) => measure_leaf(leaf, known_dimensions, available_space),
                None => Size::ZERO,
            }
        },
    )?;

    // Extract results: taffy locations are parent-relative.
    let mut result = ComputedLayout {
        rects: vec![LayoutRect::default(); ids.len()],
        ..Default::default()
    };
    let mut origins: Vec<(i32, i32)> = vec![(0, 0); ids.len()];
    let mut parents: Vec<Option<usize>> = vec![None; ids.len()];

    // Parents precede children in preorder, so one pass suffices.
    let mut stack: Vec<(usize, usize)> = Vec::new();
    let mut next = 0;
    root.walk(&mut |id, node| {
        while stack.last().is_some_and(|&(_, remaining)| remaining == 0) {
            stack.pop();
        }
        if let Some((parent, remaining)) = stack.last_mut() {
            parents[id] = Some(*parent);
            *remaining -= 1;
        }
        if !node.children.is_empty() {
            stack.push((id, node.children.len()));
        }
        next = id + 1;
    });
    debug_assert_eq!(next, ids.len());

    for (id, &taffy_node) in ids.iter().enumerate() {
        let layout = tree.layout(taffy_node)?;
        let (px, py) = parents[id].map(|p| origins[p]).unwrap_or((0, 0));
        let x = px + layout.location.x.round() as i32;
        let y = py + layout.location.y.round() as i32;
        origins[id] = (x, y);
        result.rects[id] = LayoutRect {
            x,
            y,
            width: layout.size.width.round() as u16,
            height: layout.size.height.round() as u16,
        };
    }

    root.walk(&mut |id, node| {
        if let Some(anchor) = &node.anchor {
            let row = result.rects[id].y.max(0) as u16;
            result.anchors.insert(anchor.clone(), row);
        }
    });

    if let Some(root_rect) = result.rects.first() {
        result.content_width = root_rect.width;
        result.content_height = root_rect.height;
    }

    trace!(
        nodes = result.rects.len(),
        width,
        height = result.content_height,
        "layout computed"
    );
    Ok(result)
}

// =============================================================================
// Tests
// =============================================================================
