//! Theme presets for spark-folio.
//!
//! - midnight (default) - pure black page, white glass, neon accents
//! - terminal - same accents, but leaves the background to the terminal

use super::Theme;
use crate::types::Rgba;

// =============================================================================
// Midnight Theme (Default)
// =============================================================================

/// Midnight - black page with translucent white layers.
pub fn midnight() -> Theme {
    Theme {
        name: "midnight".to_string(),
        // Surfaces
        background: Rgba::BLACK,
        surface: Rgba::new(0, 0, 0, 128),
        surface_raised: Rgba::new(255, 255, 255, 13),
        inverse: Rgba::WHITE,
        on_inverse: Rgba::BLACK,
        // Borders
        border: Rgba::new(255, 255, 255, 26),
        border_faint: Rgba::new(255, 255, 255, 13),
        // Text
        text: Rgba::WHITE,
        text_body: Rgba::from_rgb_int(0xd1d5db),   // gray-300
        text_muted: Rgba::from_rgb_int(0x9ca3af),  // gray-400
        text_subtle: Rgba::from_rgb_int(0x6b7280), // gray-500
        text_faint: Rgba::from_rgb_int(0x4b5563),  // gray-600
        text_ghost: Rgba::new(255, 255, 255, 26),
        // Accents
        accent_cyan: Rgba::from_rgb_int(0x22d3ee),
        accent_fuchsia: Rgba::from_rgb_int(0xe879f9),
        accent_green: Rgba::from_rgb_int(0x4ade80),
        accent_indigo: Rgba::from_rgb_int(0x6366f1),
        terminal_text: Rgba::new(0x22, 0xc5, 0x5e, 128),
        // Effects
        grid: Rgba::new(128, 128, 128, 0x12),
        glow: Rgba::WHITE,
        headline_gradient: [
            Rgba::WHITE,
            Rgba::from_rgb_int(0x9ca3af),
            Rgba::from_rgb_int(0x4b5563),
        ],
    }
}

// =============================================================================
// Terminal Theme
// =============================================================================

/// Terminal - midnight colors on the terminal's own background.
pub fn terminal() -> Theme {
    Theme {
        name: "terminal".to_string(),
        background: Rgba::TERMINAL_DEFAULT,
        ..midnight()
    }
}

/// Look up a preset by name.
pub fn get_preset(name: &str) -> Option<Theme> {
    match name {
        "midnight" => Some(midnight()),
        "terminal" => Some(terminal()),
        _ => None,
    }
}

/// Names of all presets.
pub fn preset_names() -> &'static [&'static str] {
    &["midnight", "terminal"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_resolve() {
        for name in preset_names() {
            assert_eq!(get_preset(name).unwrap().name, *name);
        }
        assert!(get_preset("dracula").is_none());
    }

    #[test]
    fn test_terminal_keeps_accents() {
        let theme = terminal();
        assert!(theme.background.is_terminal_default());
        assert_eq!(theme.accent_cyan, midnight().accent_cyan);
    }
}
