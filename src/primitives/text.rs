//! Text Primitive - Styled text and the typewriter block.
//!
//! Text nodes are leaves. Their intrinsic size comes from wrapping the
//! concatenated spans to the width layout offers them.

use crate::types::{Attr, Rgba, TextAlign};

use super::types::{Fill, Span, TerminalProps, TextProps};
use super::{Node, NodeKind};

/// A solid-colored span with no attributes.
pub fn span(text: impl Into<String>, color: Rgba) -> Span {
    Span {
        text: text.into(),
        fill: Fill::Solid(color),
        attrs: Attr::NONE,
    }
}

impl Span {
    pub fn attrs(mut self, attrs: Attr) -> Self {
        self.attrs |= attrs;
        self
    }

    pub fn gradient(text: impl Into<String>, stops: &[Rgba]) -> Self {
        Self {
            text: text.into(),
            fill: Fill::Gradient(stops.to_vec()),
            attrs: Attr::NONE,
        }
    }
}

/// Create a wrapped, left-aligned text node.
pub fn text_node(spans: Vec<Span>) -> Node {
    Node::new(NodeKind::Text(TextProps {
        spans,
        ..Default::default()
    }))
}

impl Node {
    /// Set text alignment. No-op on non-text nodes.
    pub fn align(mut self, align: TextAlign) -> Self {
        if let NodeKind::Text(props) = &mut self.kind {
            props.align = align;
        }
        self
    }

    /// Pulse the text's opacity. No-op on non-text nodes.
    pub fn pulsing(mut self) -> Self {
        if let NodeKind::Text(props) = &mut self.kind {
            props.pulse = true;
        }
        self
    }

    /// Disable wrapping. No-op on non-text nodes.
    pub fn nowrap(mut self) -> Self {
        if let NodeKind::Text(props) = &mut self.kind {
            props.wrap = false;
        }
        self
    }
}

/// Create the typewriter block, sized for `full_text`.
pub fn terminal_node(full_text: impl Into<String>, color: Rgba) -> Node {
    Node::new(NodeKind::Terminal(TerminalProps {
        full_text: full_text.into(),
        color,
        caret: '_',
        attrs: Attr::NONE,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_attrs_accumulate() {
        let s = span("x", Rgba::WHITE).attrs(Attr::BOLD).attrs(Attr::ITALIC);
        assert!(s.attrs.contains(Attr::BOLD | Attr::ITALIC));
    }

    #[test]
    fn test_align_and_nowrap() {
        let node = text_node(vec![span("x", Rgba::WHITE)])
            .align(TextAlign::Center)
            .nowrap();
        let NodeKind::Text(props) = &node.kind else {
            panic!("expected text");
        };
        assert_eq!(props.align, TextAlign::Center);
        assert!(!props.wrap);
    }

    #[test]
    fn test_terminal_node_caret() {
        let node = terminal_node("> hi", Rgba::WHITE);
        let NodeKind::Terminal(props) = &node.kind else {
            panic!("expected terminal");
        };
        assert_eq!(props.caret, '_');
        assert_eq!(props.full_text, "> hi");
    }
}
