//! Fixed backdrop: a faint micro-grid and two blurred color orbs.
//!
//! Painted in screen space before the page, so it never scrolls.

use crate::renderer::FrameBuffer;
use crate::theme::Theme;
use crate::types::Rgba;

/// Orb opacity (opacity-20).
const ORB_OPACITY: f32 = 0.2;
/// Orb reach including blur, in cells (about 255 px at 8x16).
const ORB_RADIUS_COLS: f32 = 32.0;
const ORB_RADIUS_ROWS: f32 = 16.0;

/// Spacing between grid lines, in cells. Zero on either axis hides the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub cols: u16,
    pub rows: u16,
}

struct Orb {
    x: f32,
    y: f32,
    color: Rgba,
}

impl Orb {
    /// Blurred falloff: full at the center, gone at the radius.
    fn tint(&self, col: u16, row: u16) -> Rgba {
        let dx = (col as f32 + 0.5 - self.x) / ORB_RADIUS_COLS;
        let dy = (row as f32 + 0.5 - self.y) / ORB_RADIUS_ROWS;
        let d = dx.hypot(dy);
        if d >= 1.0 {
            return Rgba::TRANSPARENT;
        }
        let strength = (1.0 - d) * (1.0 - d);
        self.color.fade(ORB_OPACITY * strength)
    }
}

/// Paint the backdrop over the whole buffer.
pub fn paint_background(buffer: &mut FrameBuffer, theme: &Theme, grid: Grid) {
    buffer.clear_with_bg(theme.background);
    let (width, height) = (buffer.width(), buffer.height());

    let orbs = [
        Orb {
            x: width as f32 / 2.0,
            y: ORB_RADIUS_ROWS / 1.6,
            color: theme.accent_fuchsia,
        },
        Orb {
            x: width as f32 - ORB_RADIUS_COLS / 1.6,
            y: height as f32 - ORB_RADIUS_ROWS / 1.6,
            color: theme.accent_cyan,
        },
    ];

    for orb in &orbs {
        buffer.tint_bg(0, 0, width, height, None, |col, row| orb.tint(col, row));
    }

    if grid.cols == 0 || grid.rows == 0 {
        return;
    }
    buffer.tint_bg(0, 0, width, height, None, |col, row| {
        if col % grid.cols == 0 || row % grid.rows == 0 {
            theme.grid
        } else {
            Rgba::TRANSPARENT
        }
    });
}
