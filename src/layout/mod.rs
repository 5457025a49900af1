//! Layout Module
//!
//! Flexbox layout computation for the page using Taffy.
//!
//! # Architecture
//!
//! The bridge:
//!
//! 1. Converts node props to Taffy styles
//! 2. Builds a Taffy tree mirroring the node tree
//! 3. Provides measure functions for text intrinsic sizing
//! 4. Extracts absolute rectangles, keyed by preorder node id
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::layout::compute_layout;
//!
//! let layout = compute_layout(&page.root, 120)?;
//! let work_row = layout.anchors["work"];
//! ```

mod taffy_bridge;
mod text_measure;

pub use taffy_bridge::{ComputedLayout, LayoutRect, compute_layout};
pub use text_measure::*;
