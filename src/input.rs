//! Terminal events to player commands

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// The one gameplay input: start, restart or flap
    Activate,
    ToggleMute,
    Quit,
}

pub fn map_event(event: &Event) -> Option<Command> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Command::Activate),
            _ => None,
        },
        _ => None,
    }
}

fn map_key(key: &KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => Some(Command::Activate),
        KeyCode::Char('m') => Some(Command::ToggleMute),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent};

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 10,
            row: 5,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn activate_keys() {
        for code in [KeyCode::Char(' '), KeyCode::Up, KeyCode::Enter] {
            assert_eq!(map_event(&key(code, KeyEventKind::Press)), Some(Command::Activate));
        }
    }

    #[test]
    fn release_is_ignored() {
        assert_eq!(map_event(&key(KeyCode::Char(' '), KeyEventKind::Release)), None);
    }

    #[test]
    fn left_click_activates() {
        assert_eq!(
            map_event(&mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(Command::Activate)
        );
        assert_eq!(map_event(&mouse(MouseEventKind::Down(MouseButton::Right))), None);
        assert_eq!(map_event(&mouse(MouseEventKind::Up(MouseButton::Left))), None);
        assert_eq!(map_event(&mouse(MouseEventKind::Moved)), None);
    }

    #[test]
    fn quit_and_mute() {
        assert_eq!(map_event(&key(KeyCode::Char('q'), KeyEventKind::Press)), Some(Command::Quit));
        assert_eq!(map_event(&key(KeyCode::Esc, KeyEventKind::Press)), Some(Command::Quit));
        assert_eq!(
            map_event(&Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))),
            Some(Command::Quit)
        );
        assert_eq!(
            map_event(&key(KeyCode::Char('m'), KeyEventKind::Press)),
            Some(Command::ToggleMute)
        );
        assert_eq!(map_event(&key(KeyCode::Char('x'), KeyEventKind::Press)), None);
        assert_eq!(map_event(&Event::Resize(80, 24)), None);
    }
}
