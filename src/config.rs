//! Settings loading and defaults.
//!
//! Every section is optional; a missing file or section means defaults.
//! Command-line flags are applied on top after loading.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{FolioError, Result};
use crate::motion::Easing;
use crate::state::hologram::{CellMetrics, GlowStyle};
use crate::state::typewriter::DEFAULT_INTERVAL_MS;
use crate::theme::{Theme, get_preset};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub motion: MotionConfig,

    #[serde(default)]
    pub glow: GlowConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Snap every animation to its final state
    #[serde(default)]
    pub reduced: bool,

    /// Milliseconds between typewriter ticks
    #[serde(default = "default_typing_interval")]
    pub typing_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlowConfig {
    /// Pixel size of one terminal cell, used to place the glow
    #[serde(default = "default_cell_width")]
    pub cell_width_px: f32,

    #[serde(default = "default_cell_height")]
    pub cell_height_px: f32,

    /// Alpha at the pointer (0.0 - 1.0)
    #[serde(default = "default_peak_alpha")]
    pub peak_alpha: f32,

    /// Gradient circle radius in pixels
    #[serde(default = "default_glow_radius")]
    pub radius_px: f32,

    /// Hover fade duration
    #[serde(default = "default_transition")]
    pub transition_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Frame rate cap while something animates
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Rows between grid lines; 0 hides the grid
    #[serde(default = "default_grid_rows")]
    pub grid_rows: u16,

    /// Columns between grid lines; 0 hides the grid
    #[serde(default = "default_grid_cols")]
    pub grid_cols: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Preset name: "midnight" or "terminal"
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Per-slot color overrides, e.g. `accent_cyan = "#00ffcc"`
    #[serde(default)]
    pub overrides: BTreeMap<String, String>,
}

// Default value functions
fn default_typing_interval() -> u64 {
    DEFAULT_INTERVAL_MS
}
fn default_cell_width() -> f32 {
    CellMetrics::default().width
}
fn default_cell_height() -> f32 {
    CellMetrics::default().height
}
fn default_peak_alpha() -> f32 {
    GlowStyle::default().peak_alpha
}
fn default_glow_radius() -> f32 {
    GlowStyle::default().radius_px
}
fn default_transition() -> u64 {
    GlowStyle::default().transition_ms
}
fn default_fps() -> u32 {
    60
}
fn default_grid_rows() -> u16 {
    3
}
fn default_grid_cols() -> u16 {
    6
}
fn default_preset() -> String {
    "midnight".to_string()
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reduced: false,
            typing_interval_ms: default_typing_interval(),
        }
    }
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            cell_width_px: default_cell_width(),
            cell_height_px: default_cell_height(),
            peak_alpha: default_peak_alpha(),
            radius_px: default_glow_radius(),
            transition_ms: default_transition(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            grid_rows: default_grid_rows(),
            grid_cols: default_grid_cols(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            overrides: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML; `origin` names the source in errors.
    pub fn from_toml_str(source: &str, origin: &Path) -> Result<Self> {
        toml::from_str(source).map_err(|source| FolioError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load settings from file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let source = std::fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&source, path)?;
        debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// The resolved theme: preset plus overrides.
    ///
    /// An unknown preset falls back to the default one.
    pub fn theme(&self) -> Result<Theme> {
        let mut theme = get_preset(&self.theme.preset).unwrap_or_else(|| {
            warn!(preset = %self.theme.preset, "unknown theme preset, using midnight");
            Theme::default()
        });
        theme.apply_overrides(&self.theme.overrides)?;
        Ok(theme)
    }

    pub fn cell_metrics(&self) -> CellMetrics {
        CellMetrics {
            width: self.glow.cell_width_px.max(1.0),
            height: self.glow.cell_height_px.max(1.0),
        }
    }

    pub fn glow_style(&self, theme: &Theme) -> GlowStyle {
        GlowStyle {
            color: theme.glow,
            peak_alpha: self.glow.peak_alpha.clamp(0.0, 1.0),
            radius_px: self.glow.radius_px.max(1.0),
            transition_ms: self.glow.transition_ms,
            easing: Easing::STANDARD,
            ..GlowStyle::default()
        }
    }

    /// Milliseconds between frames.
    pub fn frame_interval_ms(&self) -> u64 {
        1000 / u64::from(self.render.fps.clamp(1, 240))
    }
}

// =============================================================================
// Snapshot geometry
// =============================================================================

/// Clock value used when `--snapshot` gives no `@ms`: long enough for the
/// typewriter and the entrance animations to settle.
pub const SETTLED_MS: u64 = 5_000;

/// Headless render request, written `WIDTHxHEIGHT[@MS]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub width: u16,
    pub height: u16,
    pub at_ms: u64,
}

impl FromStr for Snapshot {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || FolioError::InvalidSnapshot(s.to_string());
        let (size, at_ms) = match s.split_once('@') {
            Some((size, ms)) => (size, ms.trim().parse().map_err(|_| invalid())?),
            None => (s, SETTLED_MS),
        };
        let (width, height) = size.split_once(['x', 'X']).ok_or_else(invalid)?;
        let width: u16 = width.trim().parse().map_err(|_| invalid())?;
        let height: u16 = height.trim().parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self {
            width,
            height,
            at_ms,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
