//! Theme System for spark-folio.
//!
//! Semantic colors for the page. Views never hard-code a color; they pick a
//! slot from [`Theme`]. Presets live in [`presets`], and individual slots can
//! be overridden from the settings file with any color [`Rgba::parse`]
//! understands.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use spark_folio::theme::{get_preset, Theme};
//!
//! let mut theme = get_preset("midnight").unwrap();
//! let overrides = BTreeMap::from([("accent_cyan".to_string(), "#00ffcc".to_string())]);
//! theme.apply_overrides(&overrides).unwrap();
//! ```

use std::collections::BTreeMap;

use crate::error::{FolioError, Result};
use crate::types::Rgba;

pub mod presets;

pub use presets::*;

// =============================================================================
// Theme - All semantic colors
// =============================================================================

/// Theme definition with all semantic colors.
///
/// Translucent slots (alpha < 255) are blended over whatever sits beneath
/// them, the way the page layers white-tinted glass over black.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Theme name (e.g., "midnight").
    pub name: String,

    // =========================================================================
    // Surfaces
    // =========================================================================

    /// Page background.
    pub background: Rgba,
    /// Glass panels (nav pill, cards).
    pub surface: Rgba,
    /// Raised glass (highlight panels, chips, artifact tiles).
    pub surface_raised: Rgba,
    /// Solid light pill (brand, primary button).
    pub inverse: Rgba,
    /// Text drawn on `inverse`.
    pub on_inverse: Rgba,

    // =========================================================================
    // Borders
    // =========================================================================

    pub border: Rgba,
    pub border_faint: Rgba,

    // =========================================================================
    // Text
    // =========================================================================

    /// Headlines and emphasis.
    pub text: Rgba,
    /// Body copy.
    pub text_body: Rgba,
    /// Secondary copy.
    pub text_muted: Rgba,
    /// Labels and eyebrows.
    pub text_subtle: Rgba,
    /// Footer fine print.
    pub text_faint: Rgba,
    /// Oversized project numerals.
    pub text_ghost: Rgba,

    // =========================================================================
    // Accents
    // =========================================================================

    pub accent_cyan: Rgba,
    pub accent_fuchsia: Rgba,
    pub accent_green: Rgba,
    pub accent_indigo: Rgba,
    /// Typewriter output.
    pub terminal_text: Rgba,

    // =========================================================================
    // Effects
    // =========================================================================

    /// Background micro-grid lines.
    pub grid: Rgba,
    /// Hover highlight color (alpha comes from the glow settings).
    pub glow: Rgba,
    /// Second headline line, left to right.
    pub headline_gradient: [Rgba; 3],
}

impl Default for Theme {
    fn default() -> Self {
        midnight()
    }
}

impl Theme {
    /// Mutable access to a color slot by its settings key.
    fn slot_mut(&mut self, key: &str) -> Option<&mut Rgba> {
        let slot = match key {
            "background" => &mut self.background,
            "surface" => &mut self.surface,
            "surface_raised" => &mut self.surface_raised,
            "inverse" => &mut self.inverse,
            "on_inverse" => &mut self.on_inverse,
            "border" => &mut self.border,
            "border_faint" => &mut self.border_faint,
            "text" => &mut self.text,
            "text_body" => &mut self.text_body,
            "text_muted" => &mut self.text_muted,
            "text_subtle" => &mut self.text_subtle,
            "text_faint" => &mut self.text_faint,
            "text_ghost" => &mut self.text_ghost,
            "accent_cyan" => &mut self.accent_cyan,
            "accent_fuchsia" => &mut self.accent_fuchsia,
            "accent_green" => &mut self.accent_green,
            "accent_indigo" => &mut self.accent_indigo,
            "terminal_text" => &mut self.terminal_text,
            "grid" => &mut self.grid,
            "glow" => &mut self.glow,
            _ => return None,
        };
        Some(slot)
    }

    /// Apply `key = "color"` overrides from the settings file.
    ///
    /// Unknown keys and unparseable colors are errors; nothing is applied
    /// past the first bad entry.
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, String>) -> Result<()> {
        for (key, value) in overrides {
            let invalid = || FolioError::InvalidColor {
                key: key.clone(),
                value: value.clone(),
            };
            let color = Rgba::parse(value).ok_or_else(invalid)?;
            let slot = self.slot_mut(key).ok_or_else(invalid)?;
            *slot = color;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Theme {
        midnight()
    }

    #[test]
    fn test_default_is_midnight() {
        assert_eq!(Theme::default().name, "midnight");
    }

    #[test]
    fn test_override_applies() {
        let mut theme = setup();
        let overrides = BTreeMap::from([("grid".to_string(), "#ff000080".to_string())]);
        theme.apply_overrides(&overrides).unwrap();
        assert_eq!(theme.grid, Rgba::new(255, 0, 0, 128));
    }

    #[test]
    fn test_override_bad_color() {
        let mut theme = setup();
        let overrides = BTreeMap::from([("text".to_string(), "not-a-color".to_string())]);
        let err = theme.apply_overrides(&overrides).unwrap_err();
        assert!(matches!(err, FolioError::InvalidColor { ref key, .. } if key == "text"));
    }

    #[test]
    fn test_override_unknown_key() {
        let mut theme = setup();
        let overrides = BTreeMap::from([("sparkle".to_string(), "#fff".to_string())]);
        assert!(theme.apply_overrides(&overrides).is_err());
    }
}
