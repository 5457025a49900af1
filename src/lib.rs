//! # spark-folio
//!
//! A personal portfolio page rendered in the terminal.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! reactivity and [Taffy](https://github.com/DioxusLabs/taffy) for flexbox layout.
//!
//! ## Architecture
//!
//! The page is a tree of plain [`primitives::Node`] values built from
//! [`content::Content`] records. Layout is a derived of the terminal size;
//! frames are painted from the layout plus clock-driven state:
//! ```text
//! Content → views::build_page → layoutDerived → paint_frame(now) → DiffRenderer
//! ```
//!
//! Two pieces of state carry real behavior:
//!
//! - [`state::typewriter`] - reveals the hero text one grapheme per tick
//! - [`state::hologram`] - a radial glow that follows the pointer over a card
//!
//! ## Modules
//!
//! - [`types`] - Core types (Rgba, Dimension, Attr, Cell, ClipRect, etc.)
//! - [`primitives`] - Box, text and terminal nodes
//! - [`layout`] - Taffy layout and text measurement
//! - [`views`] - Page sections
//! - [`motion`] - Entrance animation descriptors and presences
//! - [`state`] - Timers, typewriter, cards, input, scroll
//! - [`renderer`] - Frame buffer and diff rendering
//! - [`pipeline`] - Layout derived, frame painting, mount and event loop

pub mod config;
pub mod content;
pub mod error;
pub mod layout;
pub mod motion;
pub mod pipeline;
pub mod primitives;
pub mod renderer;
pub mod state;
pub mod theme;
pub mod types;
pub mod views;

// Re-export commonly used items
pub use types::*;

pub use config::Settings;
pub use content::Content;
pub use error::{FolioError, Result};

pub use layout::{ComputedLayout, LayoutRect, compute_layout, string_width, wrap_spans};

pub use renderer::{DiffRenderer, FrameBuffer, to_plain_text};

pub use pipeline::{Portfolio, TerminalSize, paint_frame, render_snapshot, run};

pub use state::hologram::{Bounds, CellMetrics, GlowStyle, HolographicCard, PointerPosition};
pub use state::timers::{IntervalHandle, TimerQueue};
pub use state::typewriter::Typewriter;

pub use theme::Theme;
pub use views::{Page, build_page};
