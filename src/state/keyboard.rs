//! Keyboard Module - Key events and page bindings
//!
//! The page has a fixed keymap, so there is no handler registry: a key
//! event resolves to at most one [`KeyAction`].
//!
//! # Bindings
//!
//! - `q`, `Esc`, `Ctrl+C` - quit
//! - `j`/`k`, arrows - scroll one row
//! - `PgUp`/`PgDn`/`Space` - scroll one page
//! - `g`/`Home`, `G`/`End` - top / bottom
//! - `1`-`4` or `w`/`p`/`s`/`c` - jump to Work / Projects / Stack / Contact

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "a", "Enter", "ArrowUp")
    pub key: String,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Create a simple key press event
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            modifiers,
            ..Self::new(key)
        }
    }
}

/// What a key press asks the page to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    /// Scroll by rows (negative = up).
    ScrollBy(i32),
    PageUp,
    PageDown,
    Top,
    Bottom,
    /// Jump to a named section anchor.
    Jump(&'static str),
}

// =============================================================================
// BINDINGS
// =============================================================================

/// Anchors reachable from the keyboard, in nav order.
pub const SECTION_KEYS: [(&str, &str, &str); 4] = [
    ("1", "w", "work"),
    ("2", "p", "projects"),
    ("3", "s", "stack"),
    ("4", "c", "contact"),
];

/// Resolve a key event against the page keymap.
///
/// Releases never act; repeats do (holding `j` keeps scrolling).
pub fn resolve(event: &KeyboardEvent) -> Option<KeyAction> {
    if event.state == KeyState::Release {
        return None;
    }
    if event.modifiers.ctrl {
        return (event.key == "c").then_some(KeyAction::Quit);
    }

    let action = match event.key.as_str() {
        "q" | "Escape" => KeyAction::Quit,
        "j" | "ArrowDown" => KeyAction::ScrollBy(1),
        "k" | "ArrowUp" => KeyAction::ScrollBy(-1),
        "PageDown" | " " => KeyAction::PageDown,
        "PageUp" => KeyAction::PageUp,
        "g" | "Home" => KeyAction::Top,
        "G" | "End" => KeyAction::Bottom,
        key => {
            let (_, _, anchor) = SECTION_KEYS
                .iter()
                .find(|(digit, letter, _)| key == *digit || key == *letter)?;
            KeyAction::Jump(*anchor)
        }
    };
    Some(action)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_keys() {
        assert_eq!(resolve(&KeyboardEvent::new("q")), Some(KeyAction::Quit));
        assert_eq!(resolve(&KeyboardEvent::new("Escape")), Some(KeyAction::Quit));
        assert_eq!(
            resolve(&KeyboardEvent::with_modifiers("c", Modifiers::ctrl())),
            Some(KeyAction::Quit)
        );
    }

    #[test]
    fn test_ctrl_other_keys_ignored() {
        assert_eq!(resolve(&KeyboardEvent::with_modifiers("j", Modifiers::ctrl())), None);
    }

    #[test]
    fn test_plain_c_jumps_to_contact() {
        assert_eq!(resolve(&KeyboardEvent::new("c")), Some(KeyAction::Jump("contact")));
        assert_eq!(resolve(&KeyboardEvent::new("2")), Some(KeyAction::Jump("projects")));
    }

    #[test]
    fn test_scroll_keys() {
        assert_eq!(resolve(&KeyboardEvent::new("j")), Some(KeyAction::ScrollBy(1)));
        assert_eq!(resolve(&KeyboardEvent::new("ArrowUp")), Some(KeyAction::ScrollBy(-1)));
        assert_eq!(resolve(&KeyboardEvent::new(" ")), Some(KeyAction::PageDown));
        assert_eq!(resolve(&KeyboardEvent::new("G")), Some(KeyAction::Bottom));
    }

    #[test]
    fn test_release_ignored() {
        let mut event = KeyboardEvent::new("q");
        event.state = KeyState::Release;
        assert_eq!(resolve(&event), None);
        assert_eq!(resolve(&KeyboardEvent::new("x")), None);
    }
}
