//! Keyboard event handling.
//!
//! Key bindings:
//! - printable characters: type into the code field
//! - `Backspace`: delete the last character
//! - `Enter`: decipher the codes
//! - `Esc`: reset (clear input, panels and board)
//! - `F1`: toggle help
//! - `F2` / `F3`: play / pause the ambient audio
//! - `Ctrl+C` or `Ctrl+Q`: quit

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::model::AppState;

/// Actions that can be triggered by keyboard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action (key not recognized)
    None,
    /// Quit the application
    Quit,
    /// Add character to the code field
    InputChar(char),
    /// Backspace in the code field
    InputBackspace,
    /// Decode the field and start the planchette
    Decipher,
    /// Clear everything
    Reset,
    /// Toggle the help overlay
    ToggleHelp,
    /// Dismiss the help overlay
    DismissHelp,
    /// Play the ambient audio
    PlayAudio,
    /// Pause the ambient audio
    PauseAudio,
    /// Resize event (terminal resized)
    Resize(u16, u16),
}

/// Polls for keyboard events with a timeout.
///
/// Returns `None` if no event occurred within the timeout.
pub fn poll_event(timeout: Duration) -> Option<Event> {
    if event::poll(timeout).ok()? {
        event::read().ok()
    } else {
        None
    }
}

/// Converts a crossterm event to an Action.
pub fn handle_event(event: Event, show_help: bool) -> Action {
    match event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            handle_key_event(key_event, show_help)
        }
        Event::Resize(width, height) => Action::Resize(width, height),
        _ => Action::None,
    }
}

/// Handles a key event.
fn handle_key_event(key: KeyEvent, show_help: bool) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        };
    }

    // If help is shown, any other key dismisses it
    if show_help {
        return Action::DismissHelp;
    }

    match key.code {
        KeyCode::Enter => Action::Decipher,
        KeyCode::Esc => Action::Reset,
        KeyCode::Backspace => Action::InputBackspace,
        KeyCode::F(1) => Action::ToggleHelp,
        KeyCode::F(2) => Action::PlayAudio,
        KeyCode::F(3) => Action::PauseAudio,
        KeyCode::Tab => Action::InputChar(' '),
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}

/// Applies an action to the application state.
///
/// Returns `true` if the application should continue, `false` if it should quit.
pub fn apply_action(state: &mut AppState, action: Action) -> bool {
    match action {
        Action::None => {}
        Action::Quit => {
            state.should_quit = true;
        }
        Action::InputChar(c) => {
            state.input_char(c);
        }
        Action::InputBackspace => {
            state.input_backspace();
        }
        Action::Decipher => {
            state.decipher();
        }
        Action::Reset => {
            state.reset();
        }
        Action::ToggleHelp => {
            state.toggle_help();
        }
        Action::DismissHelp => {
            state.dismiss_help();
        }
        Action::PlayAudio => {
            state.play_audio();
        }
        Action::PauseAudio => {
            state.pause_audio();
        }
        Action::Resize(_, _) => {
            // Layout is recomputed from the frame size on every draw
        }
    }

    !state.should_quit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::session::{Session, SessionPhase};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Char('7')), false), Action::InputChar('7'));
        assert_eq!(handle_key_event(key(KeyCode::Char(' ')), false), Action::InputChar(' '));
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), false), Action::InputChar('q'));
        assert_eq!(handle_key_event(key(KeyCode::Backspace), false), Action::InputBackspace);
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Enter), false), Action::Decipher);
        assert_eq!(handle_key_event(key(KeyCode::Esc), false), Action::Reset);
        assert_eq!(handle_key_event(key(KeyCode::F(1)), false), Action::ToggleHelp);
        assert_eq!(handle_key_event(key(KeyCode::F(2)), false), Action::PlayAudio);
        assert_eq!(handle_key_event(key(KeyCode::F(3)), false), Action::PauseAudio);
    }

    #[test]
    fn test_ctrl_quit() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c, false), Action::Quit);
        let ctrl_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_q, true), Action::Quit);
    }

    #[test]
    fn test_dismiss_help() {
        // Any key when help is shown should dismiss help
        assert_eq!(handle_key_event(key(KeyCode::Char('x')), true), Action::DismissHelp);
        assert_eq!(handle_key_event(key(KeyCode::Enter), true), Action::DismissHelp);
    }

    #[test]
    fn test_apply_actions() {
        let mut state = AppState::new(Session::default(), Box::new(ManualClock::new()));
        for c in "65".chars() {
            assert!(apply_action(&mut state, Action::InputChar(c)));
        }
        apply_action(&mut state, Action::Decipher);
        assert_eq!(state.session.phase(), SessionPhase::Animating);

        apply_action(&mut state, Action::Reset);
        assert_eq!(state.session.phase(), SessionPhase::Idle);
        assert!(state.input.is_empty());

        assert!(!apply_action(&mut state, Action::Quit));
    }
}
