//! Terminal renderer.
//!
//! - [`FrameBuffer`] - the grid every frame is painted into
//! - [`OutputBuffer`] / [`StatefulCellRenderer`] - minimal escape output
//! - [`DiffRenderer`] - writes only what changed since the last frame

mod buffer;
mod diff;
mod output;

pub use buffer::{FrameBuffer, to_plain_text};
pub use diff::DiffRenderer;
pub use output::{OutputBuffer, StatefulCellRenderer, to_crossterm_color};
