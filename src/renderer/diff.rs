//! Differential renderer for fullscreen mode.
//!
//! The DiffRenderer compares the current frame to the previous frame and only
//! outputs cells that have changed.
//!
//! # Algorithm
//!
//! 1. Wrap output in a synchronized update
//! 2. For each cell in the new frame:
//!    - If the previous frame has the same size and the cell is unchanged: skip
//!    - Otherwise: render the cell with StatefulCellRenderer
//! 3. Flush the output buffer (single write)
//! 4. Keep the frame for the next comparison

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, SetAttribute};
use crossterm::terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate};

use super::buffer::FrameBuffer;
use super::output::{OutputBuffer, StatefulCellRenderer};

/// Differential renderer for fullscreen mode.
pub struct DiffRenderer {
    output: OutputBuffer,
    cell_renderer: StatefulCellRenderer,
    previous: Option<FrameBuffer>,
}

impl DiffRenderer {
    pub fn new() -> Self {
        Self {
            output: OutputBuffer::new(),
            cell_renderer: StatefulCellRenderer::new(),
            previous: None,
        }
    }

    /// Render a frame to `writer`, outputting only changed cells.
    ///
    /// Returns the number of cells written.
    pub fn render_to<W: Write>(&mut self, buffer: &FrameBuffer, writer: &mut W) -> io::Result<usize> {
        let previous = self
            .previous
            .take()
            .filter(|p| p.width() == buffer.width() && p.height() == buffer.height());

        queue!(self.output, BeginSynchronizedUpdate)?;
        self.cell_renderer.reset();

        let mut changed = 0;
        for (x, y, cell) in buffer.iter() {
            if previous.as_ref().and_then(|p| p.get(x, y)) == Some(cell) {
                continue;
            }
            self.cell_renderer.render_cell(&mut self.output, x, y, cell)?;
            changed += 1;
        }

        queue!(self.output, SetAttribute(Attribute::Reset), EndSynchronizedUpdate)?;
        self.output.flush_to(writer)?;

        self.previous = Some(buffer.clone());
        Ok(changed)
    }

    /// Render a frame to stdout.
    pub fn render(&mut self, buffer: &FrameBuffer) -> io::Result<usize> {
        let mut stdout = io::stdout().lock();
        self.render_to(buffer, &mut stdout)
    }

    /// Forget the previous frame. The next render redraws everything.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

impl Default for DiffRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
