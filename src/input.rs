//! Terminal input mapping.
//!
//! Translates crossterm key and mouse events into controller intents. The
//! mapping depends on the current state and on whether the name prompt is
//! open, since the prompt captures every printable key.

use crate::game::{GameState, Intent};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// What the main loop should do with an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Intent(Intent),
    Quit,
    Ignore,
}

pub fn map_key(key: KeyEvent, state: GameState, naming: bool) -> InputAction {
    if key.kind == KeyEventKind::Release {
        return InputAction::Ignore;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputAction::Quit;
    }

    if naming {
        return match key.code {
            KeyCode::Enter => InputAction::Intent(Intent::NameSubmit),
            KeyCode::Esc => InputAction::Intent(Intent::NameCancel),
            KeyCode::Backspace => InputAction::Intent(Intent::NameBackspace),
            KeyCode::Char(c) => InputAction::Intent(Intent::NameInput(c)),
            _ => InputAction::Ignore,
        };
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => InputAction::Intent(primary(state)),
        KeyCode::Char('m') | KeyCode::Char('M') => InputAction::Intent(Intent::ToggleMute),
        KeyCode::Char('n') | KeyCode::Char('N') if state == GameState::Menu => {
            InputAction::Intent(Intent::Rename)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputAction::Quit,
        _ => InputAction::Ignore,
    }
}

/// A left click acts like Space.
pub fn map_mouse(event: MouseEvent, state: GameState, naming: bool) -> InputAction {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) if !naming => InputAction::Intent(primary(state)),
        _ => InputAction::Ignore,
    }
}

fn primary(state: GameState) -> Intent {
    match state {
        GameState::Menu => Intent::Start,
        _ => Intent::Flap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_space_starts_in_menu_and_flaps_elsewhere() {
        let space = key(KeyCode::Char(' '));
        assert_eq!(
            map_key(space, GameState::Menu, false),
            InputAction::Intent(Intent::Start)
        );
        for state in [GameState::Ready, GameState::Playing, GameState::GameOver] {
            assert_eq!(map_key(space, state, false), InputAction::Intent(Intent::Flap));
        }
        assert_eq!(
            map_key(key(KeyCode::Up), GameState::Playing, false),
            InputAction::Intent(Intent::Flap)
        );
    }

    #[test]
    fn test_name_prompt_captures_letters() {
        assert_eq!(
            map_key(key(KeyCode::Char('q')), GameState::Menu, true),
            InputAction::Intent(Intent::NameInput('q'))
        );
        assert_eq!(
            map_key(key(KeyCode::Char(' ')), GameState::Menu, true),
            InputAction::Intent(Intent::NameInput(' '))
        );
        assert_eq!(
            map_key(key(KeyCode::Enter), GameState::Menu, true),
            InputAction::Intent(Intent::NameSubmit)
        );
        assert_eq!(
            map_key(key(KeyCode::Esc), GameState::Menu, true),
            InputAction::Intent(Intent::NameCancel)
        );
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, GameState::Playing, false), InputAction::Quit);
        assert_eq!(map_key(ctrl_c, GameState::Menu, true), InputAction::Quit);
    }

    #[test]
    fn test_rename_only_in_menu() {
        assert_eq!(
            map_key(key(KeyCode::Char('n')), GameState::Menu, false),
            InputAction::Intent(Intent::Rename)
        );
        assert_eq!(
            map_key(key(KeyCode::Char('n')), GameState::Ready, false),
            InputAction::Ignore
        );
    }

    #[test]
    fn test_left_click_is_primary() {
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            map_mouse(click, GameState::Menu, false),
            InputAction::Intent(Intent::Start)
        );
        assert_eq!(
            map_mouse(click, GameState::GameOver, false),
            InputAction::Intent(Intent::Flap)
        );
        assert_eq!(map_mouse(click, GameState::Menu, true), InputAction::Ignore);
    }
}
