//! FrameBuffer and drawing primitives.
//!
//! The FrameBuffer is a 2D grid of Cells that represents what should be displayed
//! on the terminal. All drawing operations work on this buffer.
//!
//! # Design Decisions
//!
//! - **Flat storage**: `Vec<Cell>` with row-major indexing.
//! - **Signed origins**: page content scrolls above the viewport, so drawing
//!   calls take `i32` positions and clip everything off-screen.
//! - **Layering**: translucent backgrounds blend with what is already there;
//!   text keeps the background it lands on and blends translucent glyphs
//!   into it.
//! - **Wide characters**: the cell after a wide grapheme is a continuation
//!   (`char == 0`).

use unicode_segmentation::UnicodeSegmentation;

use crate::layout::grapheme_width;
use crate::types::{Attr, BorderStyle, Cell, ClipRect, Rgba};

// =============================================================================
// FrameBuffer
// =============================================================================

/// A 2D buffer of terminal cells.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a new buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_background(width, height, Rgba::TERMINAL_DEFAULT)
    }

    /// Create a new buffer with a specific background color.
    pub fn with_background(width: u16, height: u16, bg: Rgba) -> Self {
        let cell = Cell {
            bg,
            ..Cell::default()
        };
        Self {
            width,
            height,
            cells: vec![cell; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The full buffer bounds as a ClipRect.
    #[inline]
    pub fn bounds(&self) -> ClipRect {
        ClipRect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Get a cell reference (None if out of bounds).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.in_bounds(x, y).then(|| &self.cells[self.index(x, y)])
    }

    /// Get a mutable cell reference (None if out of bounds).
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Raw cells, row-major.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate over cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, &Cell)> {
        let width = self.width.max(1) as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| ((i % width) as u16, (i / width) as u16, cell))
    }

    /// Reset every cell to a blank with the given background.
    pub fn clear_with_bg(&mut self, bg: Rgba) {
        self.cells.fill(Cell {
            bg,
            ..Cell::default()
        });
    }

    /// Resize the buffer (clears content).
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::default(); width as usize * height as usize];
    }

    /// Visible part of a signed rectangle, limited to the buffer and `clip`.
    fn visible(&self, x: i32, y: i32, width: i32, height: i32, clip: Option<&ClipRect>) -> Option<ClipRect> {
        let rect = ClipRect::from_signed(x, y, width, height)?.intersect(&self.bounds())?;
        match clip {
            Some(clip) => rect.intersect(clip),
            None => Some(rect),
        }
    }

    // =========================================================================
    // Drawing Primitives
    // =========================================================================

    /// Set a single cell's glyph, keeping its background.
    ///
    /// Translucent `fg` is blended over the existing background.
    /// Returns true if the cell was set.
    pub fn set_glyph(&mut self, x: i32, y: i32, char: u32, fg: Rgba, attrs: Attr, clip: Option<&ClipRect>) -> bool {
        if x < 0 || y < 0 || x > u16::MAX as i32 || y > u16::MAX as i32 {
            return false;
        }
        let (x, y) = (x as u16, y as u16);
        if !self.in_bounds(x, y) || clip.is_some_and(|c| !c.contains(x, y)) {
            return false;
        }

        let idx = self.index(x, y);
        let cell = &mut self.cells[idx];
        cell.char = char;
        cell.fg = if fg.is_opaque() || fg.is_terminal_default() {
            fg
        } else {
            Rgba::blend(fg, cell.bg)
        };
        cell.attrs = attrs;
        true
    }

    /// Fill a rectangle with a background color, erasing glyphs.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u16, height: u16, bg: Rgba, clip: Option<&ClipRect>) {
        let Some(rect) = self.visible(x, y, width as i32, height as i32, clip) else {
            return;
        };
        let opaque = bg.is_opaque() || bg.is_terminal_default();

        for row in rect.y..rect.y + rect.height {
            let start = self.index(rect.x, row);
            for cell in &mut self.cells[start..start + rect.width as usize] {
                cell.bg = if opaque { bg } else { Rgba::blend(bg, cell.bg) };
                cell.char = b' ' as u32;
                cell.attrs = Attr::NONE;
            }
        }
    }

    /// Blend a per-cell color into the background of a rectangle.
    ///
    /// Glyphs are untouched. `color_at` receives absolute screen coordinates.
    pub fn tint_bg<F>(&mut self, x: i32, y: i32, width: u16, height: u16, clip: Option<&ClipRect>, mut color_at: F)
    where
        F: FnMut(u16, u16) -> Rgba,
    {
        let Some(rect) = self.visible(x, y, width as i32, height as i32, clip) else {
            return;
        };
        for row in rect.y..rect.y + rect.height {
            for col in rect.x..rect.x + rect.width {
                let tint = color_at(col, row);
                if tint.is_transparent() {
                    continue;
                }
                let idx = self.index(col, row);
                let cell = &mut self.cells[idx];
                cell.bg = Rgba::blend(tint, cell.bg);
            }
        }
    }

    /// Draw text at a position.
    ///
    /// `fill` picks the color of each column (relative to `x`), which is how
    /// gradient text is drawn. Returns the number of columns advanced.
    pub fn draw_text_with<F>(&mut self, x: i32, y: i32, text: &str, attrs: Attr, clip: Option<&ClipRect>, mut fill: F) -> u16
    where
        F: FnMut(u16) -> Rgba,
    {
        let mut col = 0u16;
        for grapheme in text.graphemes(true) {
            let width = grapheme_width(grapheme) as u16;
            if width == 0 {
                continue;
            }
            let ch = grapheme.chars().next().map_or(b' ' as u32, |c| c as u32);
            let fg = fill(col);
            let cx = x + col as i32;
            if self.set_glyph(cx, y, ch, fg, attrs, clip) && width == 2 {
                self.set_glyph(cx + 1, y, 0, fg, attrs, clip);
            }
            col = col.saturating_add(width);
        }
        col
    }

    /// Draw single-color text.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, fg: Rgba, attrs: Attr, clip: Option<&ClipRect>) -> u16 {
        self.draw_text_with(x, y, text, attrs, clip, |_| fg)
    }

    /// Draw a horizontal rule.
    pub fn draw_hline(&mut self, x: i32, y: i32, length: u16, ch: char, fg: Rgba, clip: Option<&ClipRect>) {
        for i in 0..length as i32 {
            self.set_glyph(x + i, y, ch as u32, fg, Attr::NONE, clip);
        }
    }

    /// Draw a vertical rule.
    pub fn draw_vline(&mut self, x: i32, y: i32, length: u16, ch: char, fg: Rgba, clip: Option<&ClipRect>) {
        for i in 0..length as i32 {
            self.set_glyph(x, y + i, ch as u32, fg, Attr::NONE, clip);
        }
    }

    /// Draw a border inside a rectangle.
    pub fn draw_border(&mut self, x: i32, y: i32, width: u16, height: u16, style: BorderStyle, color: Rgba, clip: Option<&ClipRect>) {
        match style {
            BorderStyle::None => {}
            BorderStyle::LeftRule => self.draw_vline(x, y, height, '│', color, clip),
            BorderStyle::TopRule => self.draw_hline(x, y, width, '─', color, clip),
            _ => {
                let Some((tl, tr, bl, br, horiz, vert)) = style.chars() else {
                    return;
                };
                if width < 2 || height < 2 {
                    return;
                }
                let x2 = x + width as i32 - 1;
                let y2 = y + height as i32 - 1;

                self.draw_hline(x + 1, y, width - 2, horiz, color, clip);
                self.draw_hline(x + 1, y2, width - 2, horiz, color, clip);
                self.draw_vline(x, y + 1, height - 2, vert, color, clip);
                self.draw_vline(x2, y + 1, height - 2, vert, color, clip);

                for (cx, cy, ch) in [(x, y, tl), (x2, y, tr), (x, y2, bl), (x2, y2, br)] {
                    self.set_glyph(cx, cy, ch as u32, color, Attr::NONE, clip);
                }
            }
        }
    }
}

// =============================================================================
// Plain text export
// =============================================================================

/// The buffer's glyphs as text, one line per row, trailing blanks trimmed.
///
/// Used for headless snapshots and tests.
pub fn to_plain_text(buffer: &FrameBuffer) -> String {
    let width = buffer.width() as usize;
    if width == 0 {
        return String::new();
    }
    let mut out = String::with_capacity(buffer.cells().len() + buffer.height() as usize);
    for row in buffer.cells().chunks(width) {
        let line: String = row
            .iter()
            .filter(|cell| cell.char != 0)
            .map(|cell| char::from_u32(cell.char).unwrap_or(' '))
            .collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> FrameBuffer {
        FrameBuffer::with_background(20, 6, Rgba::BLACK)
    }

    #[test]
    fn test_framebuffer_creation() {
        let buffer = FrameBuffer::new(80, 24);
        assert_eq!(buffer.width(), 80);
        assert_eq!(buffer.height(), 24);
        assert!(buffer.get(0, 0).unwrap().bg.is_terminal_default());
        assert!(buffer.get(80, 0).is_none());
    }

    #[test]
    fn test_fill_rect_clips_negative_origin() {
        let mut buffer = setup();
        buffer.fill_rect(-2, -1, 5, 3, Rgba::WHITE, None);
        assert_eq!(buffer.get(0, 0).unwrap().bg, Rgba::WHITE);
        assert_eq!(buffer.get(2, 1).unwrap().bg, Rgba::WHITE);
        assert_eq!(buffer.get(3, 0).unwrap().bg, Rgba::BLACK);
        assert_eq!(buffer.get(0, 2).unwrap().bg, Rgba::BLACK);
    }

    #[test]
    fn test_fill_rect_blends_translucent() {
        let mut buffer = setup();
        buffer.fill_rect(0, 0, 4, 1, Rgba::new(255, 255, 255, 26), None);
        let bg = buffer.get(0, 0).unwrap().bg;
        assert!(bg.r > 0 && bg.r < 40);
        assert!(bg.is_opaque());
    }

    #[test]
    fn test_draw_text_keeps_background() {
        let mut buffer = setup();
        buffer.fill_rect(0, 0, 20, 1, Rgba::GRAY, None);
        let used = buffer.draw_text(1, 0, "Hello", Rgba::WHITE, Attr::BOLD, None);

        assert_eq!(used, 5);
        let cell = buffer.get(1, 0).unwrap();
        assert_eq!(cell.char, 'H' as u32);
        assert_eq!(cell.bg, Rgba::GRAY);
        assert_eq!(cell.attrs, Attr::BOLD);
    }

    #[test]
    fn test_draw_text_translucent_fg() {
        let mut buffer = setup();
        buffer.draw_text(0, 0, "x", Rgba::new(255, 255, 255, 128), Attr::NONE, None);
        let fg = buffer.get(0, 0).unwrap().fg;
        assert!(fg.is_opaque());
        assert!(fg.r > 120 && fg.r < 136);
    }

    #[test]
    fn test_draw_text_respects_clip() {
        let mut buffer = setup();
        let clip = ClipRect::new(0, 0, 3, 1);
        buffer.draw_text(-1, 0, "abcdef", Rgba::WHITE, Attr::NONE, Some(&clip));
        assert_eq!(to_plain_text(&buffer).lines().next(), Some("bcd"));
    }

    #[test]
    fn test_draw_wide_text() {
        let mut buffer = setup();
        let used = buffer.draw_text(0, 0, "中a", Rgba::WHITE, Attr::NONE, None);
        assert_eq!(used, 3);
        assert_eq!(buffer.get(1, 0).unwrap().char, 0);
        assert_eq!(buffer.get(2, 0).unwrap().char, 'a' as u32);
    }

    #[test]
    fn test_gradient_text() {
        let mut buffer = setup();
        buffer.draw_text_with(0, 0, "ab", Attr::NONE, None, |col| {
            if col == 0 { Rgba::WHITE } else { Rgba::GRAY }
        });
        assert_eq!(buffer.get(0, 0).unwrap().fg, Rgba::WHITE);
        assert_eq!(buffer.get(1, 0).unwrap().fg, Rgba::GRAY);
    }

    #[test]
    fn test_tint_bg_leaves_glyphs() {
        let mut buffer = setup();
        buffer.draw_text(0, 0, "z", Rgba::WHITE, Attr::NONE, None);
        buffer.tint_bg(0, 0, 2, 1, None, |_, _| Rgba::new(255, 255, 255, 128));
        let cell = buffer.get(0, 0).unwrap();
        assert_eq!(cell.char, 'z' as u32);
        assert!(cell.bg.r > 100);
    }

    #[test]
    fn test_draw_border_rounded() {
        let mut buffer = setup();
        buffer.draw_border(0, 0, 4, 3, BorderStyle::Rounded, Rgba::WHITE, None);
        let text = to_plain_text(&buffer);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "╭──╮");
        assert_eq!(lines[1], "│  │");
        assert_eq!(lines[2], "╰──╯");
    }

    #[test]
    fn test_left_rule() {
        let mut buffer = setup();
        buffer.draw_border(2, 0, 5, 2, BorderStyle::LeftRule, Rgba::WHITE, None);
        assert_eq!(buffer.get(2, 1).unwrap().char, '│' as u32);
        assert_eq!(buffer.get(3, 0).unwrap().char, ' ' as u32);
    }
}
