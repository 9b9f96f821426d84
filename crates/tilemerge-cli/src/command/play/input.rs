use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tilemerge_engine::{Action, InputContext};

/// What a key press means to the play loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum KeyInput {
    Action(Action),
    /// The player asked to leave the terminal (Ctrl-C).
    Interrupt,
    Ignored,
}

/// Maps a key press to an action: arrow keys and the letter keys understood by
/// [`Action::from_key_char`].
pub(super) fn decode_key(key: KeyEvent, context: InputContext) -> KeyInput {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | 'C') => KeyInput::Interrupt,
            _ => KeyInput::Ignored,
        };
    }
    let action = match key.code {
        KeyCode::Up => Some(Action::UP),
        KeyCode::Down => Some(Action::DOWN),
        KeyCode::Left => Some(Action::LEFT),
        KeyCode::Right => Some(Action::RIGHT),
        KeyCode::Char(ch) => Action::from_key_char(ch, context),
        _ => None,
    };
    action.map_or(KeyInput::Ignored, KeyInput::Action)
}
