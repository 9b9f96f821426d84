use std::{convert::Infallible, vec};

use tilemerge_engine::{Action, ActionSource, SessionView};

use crate::{command::SessionArg, logging};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ScriptArg {
    /// Keys to play, e.g. "wasdwasd" (same letters as in interactive play, y/n at prompts)
    keys: String,
    #[clap(flatten)]
    pub(crate) session: SessionArg,
}

/// Feeds the characters of a string as key presses.
///
/// Characters without a meaning in the current state are skipped.
#[derive(Debug)]
struct KeyScript {
    keys: vec::IntoIter<char>,
    played: usize,
}

impl KeyScript {
    fn new(keys: &str) -> Self {
        Self {
            keys: keys.chars().collect::<Vec<_>>().into_iter(),
            played: 0,
        }
    }
}

impl ActionSource for KeyScript {
    type Error = Infallible;

    fn next_action(&mut self, view: &SessionView<'_>) -> Result<Option<Action>, Infallible> {
        let context = view.input_context();
        let action = self
            .keys
            .by_ref()
            .find_map(|ch| Action::from_key_char(ch, context));
        if action.is_some() {
            self.played += 1;
        }
        Ok(action)
    }
}

pub(crate) fn run(arg: &ScriptArg) -> anyhow::Result<()> {
    let ScriptArg { keys, session } = arg;

    logging::init_stderr();
    let mut session = session.build_session()?;
    let mut script = KeyScript::new(keys);
    let Ok(_) = session.run(&mut script);

    print!("{}", session.grid());
    println!(
        "SCORE: {}   BEST SCORE: {}",
        session.score(),
        session.best_score()
    );
    println!("WIN SCORE: {}", session.win_threshold());
    println!("ACTIONS: {}   STATE: {}", script.played, describe(&session.view()));
    if let Some(err) = session.store_error() {
        eprintln!("warning: {err}");
    }
    Ok(())
}

/// Describes how the script ended. The session always ends in `Exit`, so the outcome is
/// derived from the grid itself.
fn describe(view: &SessionView<'_>) -> &'static str {
    if view.grid.max_value() >= view.win_threshold {
        "won"
    } else if !view.grid.has_any_move() {
        "game over"
    } else {
        "exited"
    }
}

#[cfg(test)]
mod tests {
    use tilemerge_engine::{
        Grid, MemoryStore, ScriptedTiles, Session, SessionConfig, SessionState,
    };

    use super::*;

    fn session() -> Session<MemoryStore, ScriptedTiles> {
        Session::new(
            SessionConfig::default(),
            MemoryStore::new(),
            ScriptedTiles::new(vec![0], vec![2]),
        )
        .unwrap()
    }

    #[test]
    fn test_skips_unknown_keys() {
        let mut s = session();
        let mut script = KeyScript::new("x?a!d");
        let Ok(state) = s.run(&mut script);
        assert_eq!(state, SessionState::Exit);
        assert_eq!(script.played, 2);
    }

    #[test]
    fn test_quit_stops_reading() {
        let mut s = session();
        let mut script = KeyScript::new("aqdddd");
        let Ok(_) = s.run(&mut script);
        assert_eq!(script.played, 2);
    }

    #[test]
    fn test_describe() {
        let grid = Grid::from_rows(vec![vec![2, 4], vec![4, 2]]).unwrap();
        let view = SessionView {
            grid: &grid,
            state: SessionState::Exit,
            best_score: 0,
            win_threshold: 32,
            store_error: None,
        };
        assert_eq!(describe(&view), "game over");
        let won = SessionView {
            win_threshold: 4,
            ..view
        };
        assert_eq!(describe(&won), "won");
    }
}
