//! State Module - Runtime state of the page
//!
//! - **Timers** - Clock-driven interval queue the event loop advances
//! - **Typewriter** - Character-by-character reveal of the hero text
//! - **Hologram** - Pointer-tracked glow, one instance per card
//! - **Mouse** - Hit regions and per-card pointer routing
//! - **Keyboard** - Key events and the page keymap
//! - **Scroll** - Page scroll offset and anchor jumps
//! - **Input** - crossterm event conversion and polling

pub mod hologram;
pub mod input;
pub mod keyboard;
pub mod mouse;
pub mod scroll;
pub mod timers;
pub mod typewriter;
