//! Reactive Pipeline
//!
//! Connects the page model to the terminal.
//!
//! # Pipeline Architecture
//!
//! ```text
//! TerminalSize signals → layoutDerived → paint_frame(now) → DiffRenderer
//! ```
//!
//! ## Data Flow
//!
//! 1. **layoutDerived** - Reads the size signals, builds the page, calls Taffy
//! 2. **paint_frame** - Reads layout plus clock-driven state, fills a FrameBuffer
//! 3. **mount** - Applies hit regions and in-view updates, renders the diff
//!
//! ## Key Design Principles
//!
//! - **Pure Derived**: layoutDerived only computes; it never touches the terminal
//! - **Side Effects in the Host**: only `mount` mutates state (hit map, presences, terminal I/O)
//! - **Painting as Data**: the painter returns hit regions instead of registering them

pub mod frame;
pub mod layout_derived;
pub mod mount;
pub mod terminal;

// Re-exports
pub use frame::{FrameInputs, FrameResult, paint_frame};
pub use layout_derived::{LayoutResult, PageLayout, create_layout_derived, layout_page};
pub use mount::{Portfolio, render_snapshot, run};
pub use terminal::{TerminalGuard, TerminalSize};
