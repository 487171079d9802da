//! Translates terminal key events into driver intents.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tower_climb_core::{Command, Direction};

/// Something the player asked the driver to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Intent {
    /// Forward a command to the reducer.
    Dispatch(Command),
    /// Leave the game.
    Quit,
}

/// Maps a key press to an intent; unbound keys map to `None`.
///
/// `s` starts or restarts a run, the arrow keys and `k`/`l`/`j`/`h` move
/// the hero, and Ctrl+C or Ctrl+Q quits.
pub(crate) fn intent_for(key: &KeyEvent) -> Option<Intent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Intent::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('s') => Some(Intent::Dispatch(Command::StartOrRestart)),
        KeyCode::Up | KeyCode::Char('k') => walk(Direction::Up),
        KeyCode::Right | KeyCode::Char('l') => walk(Direction::Right),
        KeyCode::Down | KeyCode::Char('j') => walk(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') => walk(Direction::Left),
        _ => None,
    }
}

fn walk(direction: Direction) -> Option<Intent> {
    Some(Intent::Dispatch(Command::WalkHero { direction }))
}

#[cfg(test)]
mod tests {
    use super::{intent_for, Intent};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tower_climb_core::{Command, Direction};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn movement_keys_walk_the_hero() {
        let cases = [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Char('k'), Direction::Up),
            (KeyCode::Right, Direction::Right),
            (KeyCode::Char('l'), Direction::Right),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Char('j'), Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Char('h'), Direction::Left),
        ];
        for (code, direction) in cases {
            assert_eq!(
                intent_for(&press(code)),
                Some(Intent::Dispatch(Command::WalkHero { direction })),
                "{code:?}"
            );
        }
    }

    #[test]
    fn s_starts_or_restarts() {
        assert_eq!(
            intent_for(&press(KeyCode::Char('s'))),
            Some(Intent::Dispatch(Command::StartOrRestart))
        );
    }

    #[test]
    fn control_c_and_control_q_quit() {
        for code in [KeyCode::Char('c'), KeyCode::Char('q')] {
            let key = KeyEvent::new(code, KeyModifiers::CONTROL);
            assert_eq!(intent_for(&key), Some(Intent::Quit), "{code:?}");
        }
    }

    #[test]
    fn unbound_keys_do_nothing() {
        assert_eq!(intent_for(&press(KeyCode::Char('x'))), None);
        assert_eq!(intent_for(&press(KeyCode::Enter)), None);
        let modified = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(intent_for(&modified), None);
    }
}
