//! Box Primitive - Container node with flexbox layout.
//!
//! Boxes are the building blocks of every section. They can:
//! - Have borders and translucent backgrounds
//! - Lay out children in a row or column, wrapping when asked
//! - Host a holographic card or a link target
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::primitives::{box_node, text_node, span, BoxProps, Edges};
//!
//! let card = box_node(
//!     BoxProps {
//!         padding: Edges::xy(1, 2),
//!         border: BorderStyle::Rounded,
//!         ..Default::default()
//!     },
//!     vec![text_node(vec![span("Hello!", Rgba::WHITE)])],
//! )
//! .with_hologram(0);
//! ```

use super::types::BoxProps;
use super::{Node, NodeKind};

/// Create a box container node.
pub fn box_node(props: BoxProps, children: Vec<Node>) -> Node {
    let mut node = Node::new(NodeKind::Box(props));
    node.children = children;
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{span, text_node};
    use crate::types::Rgba;

    #[test]
    fn test_box_keeps_children_in_order() {
        let node = box_node(
            BoxProps::default(),
            vec![
                text_node(vec![span("one", Rgba::WHITE)]),
                text_node(vec![span("two", Rgba::WHITE)]),
            ],
        );
        assert_eq!(node.children.len(), 2);
        match &node.children[1].kind {
            NodeKind::Text(props) => assert_eq!(props.plain(), "two"),
            other => panic!("unexpected kind {other:?}"),
        }
    }
}
