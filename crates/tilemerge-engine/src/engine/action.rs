use crate::Direction;

/// A player command consumed by the [`Session`](super::Session).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant, derive_more::Display)]
pub enum Action {
    #[display("move {_0}")]
    Move(Direction),
    #[display("restart")]
    Restart,
    #[display("exit")]
    Exit,
    #[display("continue")]
    Continue,
}

/// Which keys are meaningful for the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum InputContext {
    /// Regular play: movement keys, restart and exit.
    Play,
    /// The win / game over prompt: additionally accepts yes (continue) and no (exit).
    Prompt,
}

impl Action {
    pub const UP: Self = Self::Move(Direction::Up);
    pub const DOWN: Self = Self::Move(Direction::Down);
    pub const LEFT: Self = Self::Move(Direction::Left);
    pub const RIGHT: Self = Self::Move(Direction::Right);

    /// Decodes a character key, ignoring case.
    ///
    /// Returns `None` for keys without a meaning in `context`; callers treat that as a no-op.
    ///
    /// ```
    /// use tilemerge_engine::{Action, InputContext};
    ///
    /// assert_eq!(Action::from_key_char('w', InputContext::Play), Some(Action::UP));
    /// assert_eq!(Action::from_key_char('Q', InputContext::Play), Some(Action::Exit));
    /// assert_eq!(Action::from_key_char('y', InputContext::Play), None);
    /// assert_eq!(Action::from_key_char('Y', InputContext::Prompt), Some(Action::Continue));
    /// ```
    #[must_use]
    pub fn from_key_char(ch: char, context: InputContext) -> Option<Self> {
        let action = match (ch.to_ascii_lowercase(), context) {
            ('w', _) => Self::UP,
            ('s', _) => Self::DOWN,
            ('a', _) => Self::LEFT,
            ('d', _) => Self::RIGHT,
            ('r', _) => Self::Restart,
            ('q', _) => Self::Exit,
            ('y', InputContext::Prompt) => Self::Continue,
            ('n', InputContext::Prompt) => Self::Exit,
            _ => return None,
        };
        Some(action)
    }

    #[must_use]
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Move(direction) => Some(direction),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys_in_both_contexts() {
        for context in [InputContext::Play, InputContext::Prompt] {
            assert_eq!(Action::from_key_char('W', context), Some(Action::UP));
            assert_eq!(Action::from_key_char('s', context), Some(Action::DOWN));
            assert_eq!(Action::from_key_char('A', context), Some(Action::LEFT));
            assert_eq!(Action::from_key_char('d', context), Some(Action::RIGHT));
            assert_eq!(Action::from_key_char('r', context), Some(Action::Restart));
            assert_eq!(Action::from_key_char('q', context), Some(Action::Exit));
        }
    }

    #[test]
    fn test_prompt_only_keys() {
        assert_eq!(Action::from_key_char('n', InputContext::Play), None);
        assert_eq!(Action::from_key_char('y', InputContext::Prompt), Some(Action::Continue));
        assert_eq!(Action::from_key_char('N', InputContext::Prompt), Some(Action::Exit));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        for ch in ['x', '1', ' ', 'é', '\n'] {
            assert_eq!(Action::from_key_char(ch, InputContext::Play), None);
            assert_eq!(Action::from_key_char(ch, InputContext::Prompt), None);
        }
    }

    #[test]
    fn test_direction() {
        assert_eq!(Action::LEFT.direction(), Some(Direction::Left));
        assert_eq!(Action::Restart.direction(), None);
        assert!(Action::UP.is_move());
    }
}
