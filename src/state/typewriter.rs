//! Typewriter - Reveals a fixed text one character per tick
//!
//! The hero terminal block types its boot log out character by character.
//! Characters are extended grapheme clusters, so a reveal step never splits
//! an emoji or a combining sequence.
//!
//! # Lifecycle
//!
//! - [`Typewriter::start`] registers one interval on the [`TimerQueue`]
//! - Each tick reveals one more character
//! - The tick that reveals the last character cancels the interval
//! - [`Typewriter::stop`] or dropping the typewriter cancels it early
//!
//! # Example
//!
//! ```
//! use spark_folio::state::timers::TimerQueue;
//! use spark_folio::state::typewriter::Typewriter;
//!
//! let timers = TimerQueue::new();
//! let typewriter = Typewriter::start(&timers, "AB", 30);
//!
//! timers.advance_to(30);
//! assert_eq!(typewriter.displayed(), "A");
//! timers.advance_to(60);
//! assert_eq!(typewriter.displayed(), "AB");
//! assert!(!typewriter.is_ticking());
//! ```

use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;

use spark_signals::{Signal, signal};
use tracing::{debug, info};
use unicode_segmentation::UnicodeSegmentation;

use super::timers::{IntervalHandle, TimerQueue};

/// Reference tick period for the hero block.
pub const DEFAULT_INTERVAL_MS: u64 = 30;

// =============================================================================
// STATE
// =============================================================================

struct TypeState {
    full_text: String,
    /// Byte offset just past each character.
    ends: Vec<usize>,
    revealed_count: usize,
    mutations: usize,
}

impl TypeState {
    fn new(full_text: String) -> Self {
        let ends = full_text
            .grapheme_indices(true)
            .map(|(start, g)| start + g.len())
            .collect();
        Self {
            full_text,
            ends,
            revealed_count: 0,
            mutations: 0,
        }
    }

    fn len(&self) -> usize {
        self.ends.len()
    }

    fn prefix(&self) -> &str {
        match self.revealed_count {
            0 => "",
            n => &self.full_text[..self.ends[n - 1]],
        }
    }

    /// Reveal one more character. Returns true once everything is shown.
    fn tick(&mut self) -> bool {
        if self.revealed_count < self.len() {
            self.revealed_count += 1;
            self.mutations += 1;
        }
        self.revealed_count == self.len()
    }
}

// =============================================================================
// TYPEWRITER
// =============================================================================

/// A running (or finished) typewriter.
///
/// Owns its interval: dropping the typewriter cancels any pending tick.
pub struct Typewriter {
    state: Rc<RefCell<TypeState>>,
    revealed: Signal<usize>,
    handle: Option<IntervalHandle>,
}

impl Typewriter {
    /// Start revealing `text`, one character every `interval_ms`.
    ///
    /// Empty text completes immediately and registers no interval.
    pub fn start(timers: &TimerQueue, text: impl Into<String>, interval_ms: u64) -> Self {
        let state = Rc::new(RefCell::new(TypeState::new(text.into())));
        let revealed = signal(0usize);

        let len = state.borrow().len();
        let handle = if len == 0 {
            debug!("typewriter started with empty text");
            None
        } else {
            debug!(len, interval_ms, "typewriter started");
            let weak = Rc::downgrade(&state);
            let revealed = revealed.clone();
            Some(timers.set_interval(interval_ms, move || {
                // Gone means torn down: end quietly without touching anything.
                let Some(state) = weak.upgrade() else {
                    return ControlFlow::Break(());
                };
                let (done, count) = {
                    let mut state = state.borrow_mut();
                    let done = state.tick();
                    (done, state.revealed_count)
                };
                revealed.set(count);
                if done {
                    info!(chars = count, "typewriter complete");
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            }))
        };

        Self {
            state,
            revealed,
            handle,
        }
    }

    /// Cancel the interval. Safe to call any number of times.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.is_active() {
                debug!(revealed = self.revealed_count(), "typewriter stopped early");
            }
            handle.cancel();
        }
    }

    /// The currently displayed prefix.
    pub fn displayed(&self) -> String {
        self.state.borrow().prefix().to_owned()
    }

    /// The displayed prefix split on embedded newlines (`\n` or `\r\n`).
    ///
    /// Always at least one line, so the caret has somewhere to sit.
    pub fn lines(&self) -> Vec<String> {
        self.state
            .borrow()
            .prefix()
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_owned())
            .collect()
    }

    pub fn full_text(&self) -> String {
        self.state.borrow().full_text.clone()
    }

    pub fn revealed_count(&self) -> usize {
        self.state.borrow().revealed_count
    }

    /// Total number of characters.
    pub fn len(&self) -> usize {
        self.state.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_complete(&self) -> bool {
        let state = self.state.borrow();
        state.revealed_count == state.len()
    }

    /// Whether an interval is still registered.
    pub fn is_ticking(&self) -> bool {
        self.handle.as_ref().is_some_and(IntervalHandle::is_active)
    }

    /// Reactive view of `revealed_count`.
    pub fn revealed_signal(&self) -> Signal<usize> {
        self.revealed.clone()
    }

    /// Number of state updates so far.
    pub fn mutations(&self) -> usize {
        self.state.borrow().mutations
    }
}

impl Drop for Typewriter {
    fn drop(&mut self) {
        self.stop();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(text: &str) -> (TimerQueue, Typewriter) {
        let timers = TimerQueue::new();
        let typewriter = Typewriter::start(&timers, text, DEFAULT_INTERVAL_MS);
        (timers, typewriter)
    }

    #[test]
    fn test_ab_scenario() {
        let (timers, tw) = setup("AB");
        assert_eq!(tw.displayed(), "");
        assert!(tw.is_ticking());

        timers.advance_to(30);
        assert_eq!(tw.displayed(), "A");

        timers.advance_to(60);
        assert_eq!(tw.displayed(), "AB");
        assert!(!tw.is_ticking());
        assert_eq!(timers.active_count(), 0);

        timers.advance_to(90);
        assert_eq!(tw.displayed(), "AB");
        assert_eq!(tw.mutations(), 2);
    }

    #[test]
    fn test_prefix_after_n_ticks() {
        let text = "> BOOT\n> OK";
        let (timers, tw) = setup(text);
        for n in 1..=text.len() {
            timers.advance_to(n as u64 * 30);
            assert_eq!(tw.displayed(), &text[..n]);
            assert_eq!(tw.revealed_count(), n);
        }
        assert!(tw.is_complete());
    }

    #[test]
    fn test_no_ticks_after_completion() {
        let (timers, tw) = setup("hey");
        assert_eq!(timers.advance_to(10_000), 3);
        assert_eq!(timers.advance_to(20_000), 0);
        assert_eq!(tw.mutations(), 3);
    }

    #[test]
    fn test_empty_text_completes_immediately() {
        let (timers, tw) = setup("");
        assert!(tw.is_complete());
        assert!(tw.is_empty());
        assert!(!tw.is_ticking());
        assert_eq!(timers.active_count(), 0);
        assert_eq!(tw.lines(), vec![String::new()]);
    }

    #[test]
    fn test_teardown_stops_mutation() {
        let (timers, mut tw) = setup("abcdef");
        timers.advance_to(60);
        tw.stop();
        tw.stop();

        timers.advance_to(1_000);
        assert_eq!(tw.mutations(), 2);
        assert_eq!(tw.displayed(), "ab");
    }

    #[test]
    fn test_drop_cancels_interval() {
        let (timers, tw) = setup("abcdef");
        timers.advance_to(30);
        drop(tw);

        assert_eq!(timers.active_count(), 0);
        assert_eq!(timers.advance_to(1_000), 0);
    }

    #[test]
    fn test_graphemes_not_split() {
        let (timers, tw) = setup("e\u{301}x");
        assert_eq!(tw.len(), 2);
        timers.advance_to(30);
        assert_eq!(tw.displayed(), "e\u{301}");
    }

    #[test]
    fn test_lines_preserve_newlines() {
        let (timers, tw) = setup("ab\ncd");
        timers.advance_to(120);
        assert_eq!(tw.lines(), vec!["ab".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_lines_drop_carriage_returns() {
        let (timers, tw) = setup("ab\r\ncd\r\n");
        // "\r\n" is one grapheme, so it arrives in a single tick.
        timers.advance_to(90);
        assert_eq!(tw.lines(), vec!["ab".to_string(), String::new()]);
        timers.advance_to(1_000);
        assert_eq!(tw.len(), 6);
        assert_eq!(tw.lines(), vec!["ab".to_string(), "cd".to_string(), String::new()]);
    }

    #[test]
    fn test_revealed_signal_tracks_count() {
        let (timers, tw) = setup("abc");
        let revealed = tw.revealed_signal();
        timers.advance_to(60);
        assert_eq!(revealed.get(), 2);
    }
}
