//! Primitive types - Props for boxes, text and the terminal block.
//!
//! Props are plain data. A view builds them once; layout and painting read
//! them every frame.

use crate::types::{
    AlignItems, Attr, BorderStyle, Dimension, FlexDirection, FlexWrap, JustifyContent, Rgba,
    TextAlign,
};

// =============================================================================
// Edges
// =============================================================================

/// Per-side spacing in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Edges {
    pub const ZERO: Self = Self::all(0);

    pub const fn all(n: u16) -> Self {
        Self {
            top: n,
            right: n,
            bottom: n,
            left: n,
        }
    }

    /// Vertical and horizontal spacing, CSS shorthand order.
    pub const fn xy(vertical: u16, horizontal: u16) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub const fn top(n: u16) -> Self {
        Self { top: n, ..Self::ZERO }
    }

    pub const fn bottom(n: u16) -> Self {
        Self {
            bottom: n,
            ..Self::ZERO
        }
    }
}

// =============================================================================
// Box Props
// =============================================================================

/// Properties for box containers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxProps {
    // =========================================================================
    // Layout - Container
    // =========================================================================

    pub flex_direction: FlexDirection,
    pub flex_wrap: FlexWrap,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,

    // =========================================================================
    // Layout - Item
    // =========================================================================

    pub grow: f32,
    pub shrink: f32,
    pub flex_basis: Dimension,
    /// Override of the parent's `align_items` for this box.
    pub align_self: Option<AlignItems>,

    // =========================================================================
    // Dimensions
    // =========================================================================

    pub width: Dimension,
    pub height: Dimension,
    pub min_width: Dimension,
    pub max_width: Dimension,
    pub min_height: Dimension,
    /// Width over height, in cells.
    pub aspect_ratio: Option<f32>,

    // =========================================================================
    // Spacing
    // =========================================================================

    pub margin: Edges,
    pub padding: Edges,
    /// Gap between children along both axes.
    pub gap: u16,
    /// Gap between wrapped rows, when it differs from `gap`.
    pub row_gap: Option<u16>,

    // =========================================================================
    // Visual
    // =========================================================================

    pub border: BorderStyle,
    pub border_color: Rgba,
    /// Fill painted before children. Translucent fills blend.
    pub background: Option<Rgba>,
}

impl Default for BoxProps {
    fn default() -> Self {
        Self {
            flex_direction: FlexDirection::Column,
            flex_wrap: FlexWrap::NoWrap,
            justify_content: JustifyContent::FlexStart,
            align_items: AlignItems::Stretch,
            grow: 0.0,
            shrink: 1.0,
            flex_basis: Dimension::Auto,
            align_self: None,
            width: Dimension::Auto,
            height: Dimension::Auto,
            min_width: Dimension::Auto,
            max_width: Dimension::Auto,
            min_height: Dimension::Auto,
            aspect_ratio: None,
            margin: Edges::ZERO,
            padding: Edges::ZERO,
            gap: 0,
            row_gap: None,
            border: BorderStyle::None,
            border_color: Rgba::TRANSPARENT,
            background: None,
        }
    }
}

// =============================================================================
// Text Props
// =============================================================================

/// How a span is colored.
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(Rgba),
    /// Horizontal gradient across the span's width on each line.
    Gradient(Vec<Rgba>),
}

impl Fill {
    /// Color at column `col` of a run `width` columns wide.
    pub fn color_at(&self, col: u16, width: u16) -> Rgba {
        match self {
            Self::Solid(color) => *color,
            Self::Gradient(stops) => {
                let t = if width <= 1 {
                    0.0
                } else {
                    col as f32 / (width - 1) as f32
                };
                Rgba::gradient(stops, t)
            }
        }
    }
}

/// A run of styled text.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub fill: Fill,
    pub attrs: Attr,
}

/// Properties for text display.
#[derive(Debug, Clone, PartialEq)]
pub struct TextProps {
    /// Styled runs; `\n` inside a run forces a line break.
    pub spans: Vec<Span>,
    pub align: TextAlign,
    /// Word-wrap to the box width (otherwise lines are clipped).
    pub wrap: bool,
    /// Breathe with the pulse animation.
    pub pulse: bool,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            spans: Vec::new(),
            align: TextAlign::Left,
            wrap: true,
            pulse: false,
        }
    }
}

impl TextProps {
    /// All span text concatenated.
    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

// =============================================================================
// Terminal Props
// =============================================================================

/// The typewriter block. Text comes from the running typewriter at paint
/// time; the full text only sizes the block so layout never jumps.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalProps {
    pub full_text: String,
    pub color: Rgba,
    pub caret: char,
    pub attrs: Attr,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_shorthand() {
        assert_eq!(Edges::xy(1, 2), Edges { top: 1, right: 2, bottom: 1, left: 2 });
        assert_eq!(Edges::top(3).bottom, 0);
    }

    #[test]
    fn test_gradient_fill_endpoints() {
        let fill = Fill::Gradient(vec![Rgba::WHITE, Rgba::BLACK]);
        assert_eq!(fill.color_at(0, 5), Rgba::WHITE);
        assert_eq!(fill.color_at(4, 5), Rgba::BLACK);
        assert_eq!(fill.color_at(0, 1), Rgba::WHITE);
    }

    #[test]
    fn test_plain_concatenates() {
        let props = TextProps {
            spans: vec![
                Span { text: "a".into(), fill: Fill::Solid(Rgba::WHITE), attrs: Attr::NONE },
                Span { text: "b".into(), fill: Fill::Solid(Rgba::WHITE), attrs: Attr::BOLD },
            ],
            ..Default::default()
        };
        assert_eq!(props.plain(), "ab");
    }
}
