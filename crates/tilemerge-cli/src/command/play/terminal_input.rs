use std::io;

use crossterm::event::{self, Event};
use ratatui::DefaultTerminal;
use tilemerge_engine::{Action, ActionSource, SessionView};
use tracing::debug;

use crate::view::SessionScreen;

use super::input::{KeyInput, decode_key};

/// Reads actions from the keyboard, redrawing the session before each read.
///
/// Blocks until a key with a meaning in the current state is pressed.
pub(super) struct TerminalInput<'a> {
    terminal: &'a mut DefaultTerminal,
}

impl<'a> TerminalInput<'a> {
    pub(super) fn new(terminal: &'a mut DefaultTerminal) -> Self {
        Self { terminal }
    }

    fn draw(&mut self, view: &SessionView<'_>) -> io::Result<()> {
        self.terminal
            .draw(|frame| frame.render_widget(SessionScreen::new(*view), frame.area()))?;
        Ok(())
    }
}

impl ActionSource for TerminalInput<'_> {
    type Error = io::Error;

    fn next_action(&mut self, view: &SessionView<'_>) -> io::Result<Option<Action>> {
        self.draw(view)?;
        loop {
            let event = event::read()?;
            if let Event::Resize(..) = event {
                self.draw(view)?;
                continue;
            }
            let Some(key) = event.as_key_press_event() else {
                continue;
            };
            match decode_key(key, view.input_context()) {
                KeyInput::Action(action) => return Ok(Some(action)),
                KeyInput::Interrupt => {
                    debug!("interrupted from keyboard");
                    return Ok(None);
                }
                KeyInput::Ignored => {}
            }
        }
    }
}
