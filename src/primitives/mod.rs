//! Primitives - The node tree views are built from.
//!
//! - [`box_node`] - flex container with optional border and background
//! - [`text_node`] - styled, wrapped text
//! - [`terminal_node`] - the typewriter block
//!
//! Every node can carry a motion descriptor, a hologram slot, an anchor
//! name, a link target and a sticky offset. Nodes are identified by their
//! preorder position, which is how layout results and painting line up.

mod box_primitive;
mod text;
mod types;

pub use box_primitive::box_node;
pub use text::{span, terminal_node, text_node};
pub use types::*;

use crate::motion::MotionDescriptor;

// =============================================================================
// Node
// =============================================================================

/// What a node draws.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Box(BoxProps),
    Text(TextProps),
    Terminal(TerminalProps),
}

/// A node in the page tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
    /// Entrance animation.
    pub motion: Option<MotionDescriptor>,
    /// Holographic card slot; the host owns the card state.
    pub hologram: Option<usize>,
    /// Section name for `#anchor` links.
    pub anchor: Option<String>,
    /// Link target activated by clicking the node.
    pub href: Option<String>,
    /// Sticks this many rows below the viewport top while its parent scrolls past.
    pub sticky_top: Option<u16>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            motion: None,
            hologram: None,
            anchor: None,
            href: None,
            sticky_top: None,
        }
    }

    pub fn with_motion(mut self, motion: MotionDescriptor) -> Self {
        self.motion = Some(motion);
        self
    }

    pub fn with_hologram(mut self, slot: usize) -> Self {
        self.hologram = Some(slot);
        self
    }

    pub fn with_anchor(mut self, name: impl Into<String>) -> Self {
        self.anchor = Some(name.into());
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn with_sticky_top(mut self, rows: u16) -> Self {
        self.sticky_top = Some(rows);
        self
    }

    /// Number of nodes in this subtree, itself included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }

    /// Visit every node in preorder with its id.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(usize, &'a Node)) {
        fn go<'a>(node: &'a Node, next: &mut usize, visit: &mut impl FnMut(usize, &'a Node)) {
            visit(*next, node);
            *next += 1;
            for child in &node.children {
                go(child, next, visit);
            }
        }
        let mut next = 0;
        go(self, &mut next, visit);
    }

    /// Box props, if this is a box.
    pub fn box_props(&self) -> Option<&BoxProps> {
        match &self.kind {
            NodeKind::Box(props) => Some(props),
            _ => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
