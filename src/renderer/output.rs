//! Output buffering and stateful cell rendering.
//!
//! These components keep terminal output small:
//! - Batching writes into a single syscall
//! - Tracking terminal state to avoid redundant escape codes
//! - Only emitting changes (colors, attributes, cursor position)
//!
//! Escape sequences come from crossterm's queueable commands.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};

use crate::types::{Attr, Cell, Rgba};

// =============================================================================
// OutputBuffer
// =============================================================================

/// A buffer that accumulates output for batch writing.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(16384)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Clear the buffer without deallocating.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Write everything to `writer` in one call and empty the buffer.
    pub fn flush_to<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        if self.data.is_empty() {
            return Ok(());
        }
        writer.write_all(&self.data)?;
        writer.flush()?;
        self.data.clear();
        Ok(())
    }

    /// Accumulated data as a string (lossy).
    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Buffering only; the real flush is `flush_to`.
        Ok(())
    }
}

// =============================================================================
// Color & attribute conversion
// =============================================================================

/// Map a color onto crossterm's color type.
pub fn to_crossterm_color(color: Rgba) -> Color {
    if color.is_terminal_default() {
        Color::Reset
    } else {
        Color::Rgb {
            r: color.r.clamp(0, 255) as u8,
            g: color.g.clamp(0, 255) as u8,
            b: color.b.clamp(0, 255) as u8,
        }
    }
}

fn queue_attrs(output: &mut OutputBuffer, attrs: Attr) -> io::Result<()> {
    const MAP: [(Attr, Attribute); 6] = [
        (Attr::BOLD, Attribute::Bold),
        (Attr::DIM, Attribute::Dim),
        (Attr::ITALIC, Attribute::Italic),
        (Attr::UNDERLINE, Attribute::Underlined),
        (Attr::INVERSE, Attribute::Reverse),
        (Attr::STRIKETHROUGH, Attribute::CrossedOut),
    ];
    for (flag, attribute) in MAP {
        if attrs.contains(flag) {
            queue!(output, SetAttribute(attribute))?;
        }
    }
    Ok(())
}

// =============================================================================
// StatefulCellRenderer
// =============================================================================

/// Renders cells while tracking terminal state to minimize output.
///
/// Tracks the last cursor position, colors and attributes; a cell only
/// emits escape codes for state that differs.
#[derive(Debug)]
pub struct StatefulCellRenderer {
    last_x: i32,
    last_y: i32,
    last_fg: Option<Rgba>,
    last_bg: Option<Rgba>,
    last_attrs: Attr,
}

impl StatefulCellRenderer {
    pub fn new() -> Self {
        Self {
            last_x: -1,
            last_y: -1,
            last_fg: None,
            last_bg: None,
            last_attrs: Attr::NONE,
        }
    }

    /// Forget all tracked state. Call at the start of each frame.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Render a single cell into the output buffer.
    pub fn render_cell(&mut self, output: &mut OutputBuffer, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        // Wide character placeholder: the terminal already advanced past it.
        if cell.char == 0 {
            self.last_x = x as i32;
            self.last_y = y as i32;
            return Ok(());
        }

        if y as i32 != self.last_y || x as i32 != self.last_x + 1 {
            queue!(output, MoveTo(x, y))?;
        }

        if cell.attrs != self.last_attrs {
            queue!(output, SetAttribute(Attribute::Reset))?;
            queue_attrs(output, cell.attrs)?;
            // A reset drops colors too.
            self.last_fg = None;
            self.last_bg = None;
            self.last_attrs = cell.attrs;
        }

        if self.last_fg != Some(cell.fg) {
            queue!(output, SetForegroundColor(to_crossterm_color(cell.fg)))?;
            self.last_fg = Some(cell.fg);
        }
        if self.last_bg != Some(cell.bg) {
            queue!(output, SetBackgroundColor(to_crossterm_color(cell.bg)))?;
            self.last_bg = Some(cell.bg);
        }

        let ch = char::from_u32(cell.char).unwrap_or(' ');
        queue!(output, Print(ch))?;

        self.last_x = x as i32;
        self.last_y = y as i32;
        Ok(())
    }
}

impl Default for StatefulCellRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (StatefulCellRenderer, OutputBuffer) {
        (StatefulCellRenderer::new(), OutputBuffer::new())
    }

    fn cell(ch: char, fg: Rgba, bg: Rgba) -> Cell {
        Cell {
            char: ch as u32,
            fg,
            bg,
            attrs: Attr::NONE,
        }
    }

    #[test]
    fn test_output_buffer_flush() {
        let mut buf = OutputBuffer::new();
        buf.write_all(b"hello").unwrap();
        let mut sink = Vec::new();
        buf.flush_to(&mut sink).unwrap();
        assert_eq!(sink, b"hello");
        assert!(buf.is_empty());
    }

    #[test]
    fn test_stateful_renderer_skips_sequential() {
        let (mut renderer, mut output) = setup();
        let a = cell('A', Rgba::WHITE, Rgba::BLACK);

        renderer.render_cell(&mut output, 0, 0, &a).unwrap();
        let first_len = output.len();
        output.clear();
        renderer.render_cell(&mut output, 1, 0, &a).unwrap();

        assert_eq!(output.as_str(), "A");
        assert!(output.len() < first_len);
    }

    #[test]
    fn test_stateful_renderer_moves_on_gap() {
        let (mut renderer, mut output) = setup();
        let a = cell('A', Rgba::WHITE, Rgba::BLACK);

        renderer.render_cell(&mut output, 0, 0, &a).unwrap();
        output.clear();
        renderer.render_cell(&mut output, 5, 2, &a).unwrap();

        // MoveTo is 1-based on the wire.
        assert!(output.as_str().starts_with("\x1b[3;6H"));
    }

    #[test]
    fn test_continuation_cell_skipped() {
        let (mut renderer, mut output) = setup();
        renderer.render_cell(&mut output, 0, 0, &cell('\0', Rgba::WHITE, Rgba::BLACK)).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_color_conversion() {
        assert_eq!(to_crossterm_color(Rgba::TERMINAL_DEFAULT), Color::Reset);
        assert_eq!(to_crossterm_color(Rgba::rgb(1, 2, 3)), Color::Rgb { r: 1, g: 2, b: 3 });
    }
}
