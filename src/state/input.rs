//! Input Module - Event conversion and polling
//!
//! Bridges crossterm's event system with our mouse and keyboard types.
//!
//! # API
//!
//! - `convert_mouse_event` - Convert crossterm MouseEvent to our MouseEvent
//! - `convert_key_event` - Convert crossterm KeyEvent to our KeyboardEvent
//! - `convert_event` - Convert any crossterm event
//! - `poll_event` - Wait up to a timeout for the next event

use std::time::Duration;

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers,
    MouseButton as CrosstermMouseButton, MouseEvent as CrosstermMouseEvent, MouseEventKind, poll,
    read,
};

use super::keyboard::{KeyState, KeyboardEvent, Modifiers};
use super::mouse::{MouseAction, MouseButton, MouseEvent, ScrollDirection};

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Unified event type for the page
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Mouse(MouseEvent),
    Key(KeyboardEvent),
    /// Terminal resize (new width, height)
    Resize(u16, u16),
    /// Terminal lost focus; the pointer is gone as far as we can tell.
    FocusLost,
    /// Anything the page ignores
    None,
}

// =============================================================================
// MOUSE EVENT CONVERSION
// =============================================================================

/// Convert crossterm MouseEvent to our MouseEvent
pub fn convert_mouse_event(event: CrosstermMouseEvent) -> MouseEvent {
    let (action, button) = match event.kind {
        MouseEventKind::Down(btn) => (MouseAction::Down, convert_mouse_button(btn)),
        MouseEventKind::Up(btn) => (MouseAction::Up, convert_mouse_button(btn)),
        MouseEventKind::Drag(btn) => (MouseAction::Drag, convert_mouse_button(btn)),
        MouseEventKind::Moved => (MouseAction::Move, MouseButton::None),
        MouseEventKind::ScrollUp
        | MouseEventKind::ScrollDown
        | MouseEventKind::ScrollLeft
        | MouseEventKind::ScrollRight => (MouseAction::Scroll, MouseButton::None),
    };

    let scroll = match event.kind {
        MouseEventKind::ScrollUp => Some(ScrollDirection::Up),
        MouseEventKind::ScrollDown => Some(ScrollDirection::Down),
        _ => None,
    };

    MouseEvent {
        action,
        button,
        x: event.column,
        y: event.row,
        modifiers: convert_modifiers(event.modifiers),
        scroll,
    }
}

/// Convert crossterm MouseButton to our MouseButton
fn convert_mouse_button(btn: CrosstermMouseButton) -> MouseButton {
    match btn {
        CrosstermMouseButton::Left => MouseButton::Left,
        CrosstermMouseButton::Right => MouseButton::Right,
        CrosstermMouseButton::Middle => MouseButton::Middle,
    }
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert crossterm KeyEvent to our KeyboardEvent
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyboardEvent {
    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        _ => String::new(),
    };

    let state = match event.kind {
        KeyEventKind::Press => KeyState::Press,
        KeyEventKind::Repeat => KeyState::Repeat,
        KeyEventKind::Release => KeyState::Release,
    };

    KeyboardEvent {
        key,
        modifiers: convert_modifiers(event.modifiers),
        state,
    }
}

/// Convert crossterm KeyModifiers to our Modifiers
fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        shift: mods.contains(KeyModifiers::SHIFT),
    }
}

/// Convert any crossterm event.
pub fn convert_event(event: CrosstermEvent) -> InputEvent {
    match event {
        CrosstermEvent::Mouse(mouse) => InputEvent::Mouse(convert_mouse_event(mouse)),
        CrosstermEvent::Key(key) => InputEvent::Key(convert_key_event(key)),
        CrosstermEvent::Resize(w, h) => InputEvent::Resize(w, h),
        CrosstermEvent::FocusLost => InputEvent::FocusLost,
        _ => InputEvent::None,
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(convert_event(read()?)))
    } else {
        Ok(None)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn mouse(kind: MouseEventKind, modifiers: KeyModifiers) -> CrosstermMouseEvent {
        CrosstermMouseEvent {
            kind,
            column: 10,
            row: 5,
            modifiers,
        }
    }

    #[test]
    fn test_convert_mouse_move() {
        let event = convert_mouse_event(mouse(MouseEventKind::Moved, KeyModifiers::NONE));
        assert_eq!(event.action, MouseAction::Move);
        assert_eq!((event.x, event.y), (10, 5));
        assert_eq!(event.scroll, None);
    }

    #[test]
    fn test_convert_mouse_down_with_modifiers() {
        let event = convert_mouse_event(mouse(
            MouseEventKind::Down(CrosstermMouseButton::Left),
            KeyModifiers::SHIFT,
        ));
        assert_eq!(event.action, MouseAction::Down);
        assert_eq!(event.button, MouseButton::Left);
        assert!(event.modifiers.shift);
    }

    #[test]
    fn test_convert_mouse_scroll() {
        let up = convert_mouse_event(mouse(MouseEventKind::ScrollUp, KeyModifiers::NONE));
        let down = convert_mouse_event(mouse(MouseEventKind::ScrollDown, KeyModifiers::NONE));
        let left = convert_mouse_event(mouse(MouseEventKind::ScrollLeft, KeyModifiers::NONE));
        assert_eq!(up.scroll, Some(ScrollDirection::Up));
        assert_eq!(down.scroll, Some(ScrollDirection::Down));
        assert_eq!(left.action, MouseAction::Scroll);
        assert_eq!(left.scroll, None);
    }

    #[test]
    fn test_convert_key_event() {
        let event = convert_key_event(CrosstermKeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        });
        assert_eq!(event.key, "c");
        assert!(event.modifiers.ctrl);
        assert_eq!(event.state, KeyState::Press);
    }

    #[test]
    fn test_convert_special_keys() {
        let event = convert_key_event(CrosstermKeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE));
        assert_eq!(event.key, "PageDown");
        let event = convert_key_event(CrosstermKeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(event.key, "Escape");
    }

    #[test]
    fn test_convert_resize() {
        assert_eq!(convert_event(CrosstermEvent::Resize(80, 24)), InputEvent::Resize(80, 24));
        assert_eq!(convert_event(CrosstermEvent::FocusGained), InputEvent::None);
    }
}
