//! Core types for spark-folio.
//!
//! Colors, cells and the small layout enums that flow from the view tree
//! through layout into the frame buffer.

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels stored as i16.
///
/// Alpha 255 = fully opaque, 0 = fully transparent.
/// Special value: r=-1 means "terminal default" (let terminal pick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as i16,
            g: g as i16,
            b: b as i16,
            a: a as i16,
        }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Terminal default color (let terminal decide).
    pub const TERMINAL_DEFAULT: Self = Self {
        r: -1,
        g: -1,
        b: -1,
        a: -1,
    };

    /// Transparent color.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);

    /// Check if this is the terminal default color.
    #[inline]
    pub const fn is_terminal_default(&self) -> bool {
        self.r == -1
    }

    /// Check if color is fully opaque.
    #[inline]
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Check if color is fully transparent.
    #[inline]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Same color with alpha scaled by `factor` (0.0..=1.0).
    pub fn fade(self, factor: f32) -> Self {
        if self.is_terminal_default() {
            return self;
        }
        let a = (self.a as f32 * factor.clamp(0.0, 1.0)).round() as i16;
        Self { a, ..self }
    }

    /// Same color with an explicit alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self {
            a: a as i16,
            ..self
        }
    }

    /// Alpha blend src over dst (Porter-Duff "over").
    ///
    /// A terminal-default destination is treated as opaque black, which is
    /// the page background.
    pub fn blend(src: Self, dst: Self) -> Self {
        if src.is_opaque() || src.is_terminal_default() {
            return src;
        }
        if src.is_transparent() {
            return dst;
        }

        let (dr, dg, db, da) = if dst.is_terminal_default() {
            (0i32, 0i32, 0i32, 255i32)
        } else {
            (dst.r as i32, dst.g as i32, dst.b as i32, dst.a as i32)
        };

        let sa = src.a as i32;
        let inv_sa = 255 - sa;
        let out_a = sa + da * inv_sa / 255;
        if out_a == 0 {
            return Self::TRANSPARENT;
        }

        let channel = |s: i16, d: i32| -> i16 {
            ((s as i32 * sa + d * da * inv_sa / 255) / out_a).clamp(0, 255) as i16
        };

        Self {
            r: channel(src.r, dr),
            g: channel(src.g, dg),
            b: channel(src.b, db),
            a: out_a.clamp(0, 255) as i16,
        }
    }

    /// Linear interpolation between two colors.
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        let a = if a.is_terminal_default() { Self::BLACK } else { a };
        let b = if b.is_terminal_default() { Self::BLACK } else { b };
        let t = t.clamp(0.0, 1.0);
        let mix = |x: i16, y: i16| (x as f32 + (y as f32 - x as f32) * t).round() as i16;

        Self {
            r: mix(a.r, b.r),
            g: mix(a.g, b.g),
            b: mix(a.b, b.b),
            a: mix(a.a, b.a),
        }
    }

    /// Sample a multi-stop horizontal gradient at `t` (0.0..=1.0).
    pub fn gradient(stops: &[Self], t: f32) -> Self {
        match stops {
            [] => Self::TERMINAL_DEFAULT,
            [only] => *only,
            _ => {
                let t = t.clamp(0.0, 1.0) * (stops.len() - 1) as f32;
                let i = (t.floor() as usize).min(stops.len() - 2);
                Self::lerp(stops[i], stops[i + 1], t - i as f32)
            }
        }
    }

    /// Create from 0xRRGGBB integer format.
    pub const fn from_rgb_int(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
        )
    }

    /// Parse hex color string (#RGB, #RRGGBB, #RRGGBBAA).
    ///
    /// # Examples
    ///
    /// ```
    /// use spark_folio::types::Rgba;
    ///
    /// assert_eq!(Rgba::from_hex("#fff"), Some(Rgba::WHITE));
    /// assert_eq!(Rgba::from_hex("80808012"), Some(Rgba::new(128, 128, 128, 0x12)));
    /// assert!(Rgba::from_hex("#gg0000").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|n| n << 4 | n);

        match hex.len() {
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Parse `rgba(r, g, b, a)` / `rgb(r, g, b)` with a 0.0..=1.0 alpha.
    pub fn from_css_rgba(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        let inner = s
            .strip_prefix("rgba(")
            .or_else(|| s.strip_prefix("rgb("))?
            .strip_suffix(')')?;
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        let channel = |p: &str| p.parse::<u8>().ok();

        match parts.as_slice() {
            [r, g, b] => Some(Self::rgb(channel(r)?, channel(g)?, channel(b)?)),
            [r, g, b, a] => {
                let alpha = a.parse::<f32>().ok()?.clamp(0.0, 1.0);
                Some(Self::new(
                    channel(r)?,
                    channel(g)?,
                    channel(b)?,
                    (alpha * 255.0).round() as u8,
                ))
            }
            _ => None,
        }
    }

    /// Parse any supported color format.
    ///
    /// Supports hex, `rgb()`/`rgba()`, `transparent` and `default`.
    ///
    /// # Examples
    ///
    /// ```
    /// use spark_folio::types::Rgba;
    ///
    /// assert_eq!(Rgba::parse("transparent"), Some(Rgba::TRANSPARENT));
    /// assert_eq!(Rgba::parse("rgba(255, 255, 255, 0.1)"), Some(Rgba::new(255, 255, 255, 26)));
    /// assert!(Rgba::parse("default").unwrap().is_terminal_default());
    /// assert!(Rgba::parse("chartreuse-ish").is_none());
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        match input.to_lowercase().as_str() {
            "transparent" => return Some(Self::TRANSPARENT),
            "default" | "inherit" => return Some(Self::TERMINAL_DEFAULT),
            lower if lower.starts_with("rgb") => return Self::from_css_rgba(lower),
            _ => {}
        }

        Self::from_hex(input)
    }
}

// =============================================================================
// Dimension
// =============================================================================

/// A dimension value: auto, absolute cells or percentage of the parent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    /// Content-determined.
    #[default]
    Auto,
    /// Absolute size in terminal cells.
    Cells(u16),
    /// Percentage of parent size (0-100).
    Percent(f32),
}

impl From<u16> for Dimension {
    fn from(value: u16) -> Self {
        if value == 0 { Self::Auto } else { Self::Cells(value) }
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield for efficient storage and comparison.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::ITALIC`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const INVERSE = 1 << 4;
        const STRIKETHROUGH = 1 << 5;
    }
}

// =============================================================================
// Cell - The atomic unit of terminal rendering
// =============================================================================

/// A single terminal cell.
///
/// `char == 0` marks the continuation half of a wide character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Unicode codepoint (32 for space).
    pub char: u32,
    pub fg: Rgba,
    pub bg: Rgba,
    pub attrs: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: b' ' as u32,
            fg: Rgba::TERMINAL_DEFAULT,
            bg: Rgba::TERMINAL_DEFAULT,
            attrs: Attr::NONE,
        }
    }
}

// =============================================================================
// ClipRect
// =============================================================================

/// A screen-space clipping rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl ClipRect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Clip a signed rectangle (page rows can sit above the viewport) to the
    /// positive quadrant. Returns None when nothing remains visible.
    pub fn from_signed(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        let x1 = x.max(0);
        let y1 = y.max(0);
        let x2 = (x + width).min(u16::MAX as i32);
        let y2 = (y + height).min(u16::MAX as i32);
        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some(Self::new(x1 as u16, y1 as u16, (x2 - x1) as u16, (y2 - y1) as u16))
    }

    /// Check if a point is inside this rect.
    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && (x as u32) < self.x as u32 + self.width as u32
            && y >= self.y
            && (y as u32) < self.y as u32 + self.height as u32
    }

    /// Compute intersection of two rects.
    pub fn intersect(&self, other: &ClipRect) -> Option<ClipRect> {
        let x1 = self.x.max(other.x) as u32;
        let y1 = self.y.max(other.y) as u32;
        let x2 = (self.x as u32 + self.width as u32).min(other.x as u32 + other.width as u32);
        let y2 = (self.y as u32 + self.height as u32).min(other.y as u32 + other.height as u32);

        if x2 > x1 && y2 > y1 {
            Some(ClipRect::new(x1 as u16, y1 as u16, (x2 - x1) as u16, (y2 - y1) as u16))
        } else {
            None
        }
    }
}

// =============================================================================
// Border Styles
// =============================================================================

/// Border drawing style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    #[default]
    None,
    Single,
    Rounded,
    Heavy,
    /// Only a left rule, as used by list items (`border-l`).
    LeftRule,
    /// Only a top rule (`border-t`).
    TopRule,
}

impl BorderStyle {
    /// Corner and edge characters: (tl, tr, bl, br, horizontal, vertical).
    pub fn chars(self) -> Option<(char, char, char, char, char, char)> {
        match self {
            Self::None | Self::LeftRule | Self::TopRule => None,
            Self::Single => Some(('┌', '┐', '└', '┘', '─', '│')),
            Self::Rounded => Some(('╭', '╮', '╰', '╯', '─', '│')),
            Self::Heavy => Some(('┏', '┓', '┗', '┛', '━', '┃')),
        }
    }

    /// Cells taken from each edge: (top, right, bottom, left).
    pub fn insets(self) -> (u16, u16, u16, u16) {
        match self {
            Self::None => (0, 0, 0, 0),
            Self::LeftRule => (0, 0, 0, 1),
            Self::TopRule => (1, 0, 0, 0),
            Self::Single | Self::Rounded | Self::Heavy => (1, 1, 1, 1),
        }
    }
}

// =============================================================================
// Flexbox enums
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    #[default]
    Column,
    Row,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexWrap {
    #[default]
    NoWrap,
    Wrap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JustifyContent {
    #[default]
    FlexStart,
    Center,
    FlexEnd,
    SpaceBetween,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignItems {
    #[default]
    Stretch,
    FlexStart,
    Center,
    FlexEnd,
}

/// Horizontal alignment of text lines inside their box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

// =============================================================================
// Tests
// =============================================================================
