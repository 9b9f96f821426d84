use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};
use tilemerge_engine::{InputContext, SessionState, SessionView};

use crate::view::widgets::{GridDisplay, KeyBinding, KeyBindingDisplay, ScoreDisplay, style};

const PLAY_BINDINGS: &[KeyBinding] = &[
    (&["W", "↑"], "Up"),
    (&["S", "↓"], "Down"),
    (&["A", "←"], "Left"),
    (&["D", "→"], "Right"),
    (&["R"], "Restart"),
    (&["Q"], "Exit"),
];

const PROMPT_BINDINGS: &[KeyBinding] = &[
    (&["Y"], "Continue"),
    (&["R"], "Restart"),
    (&["N", "Q"], "Exit"),
];

/// The whole game screen: grid, score panel, prompts and key help.
#[derive(Debug)]
pub(crate) struct SessionScreen<'a> {
    view: SessionView<'a>,
}

impl<'a> SessionScreen<'a> {
    pub(crate) fn new(view: SessionView<'a>) -> Self {
        Self { view }
    }

    fn border_style(&self) -> Style {
        match self.view.state {
            SessionState::Win => style::WIN,
            SessionState::Over => style::GAME_OVER,
            SessionState::Init | SessionState::Playing | SessionState::Exit => style::DEFAULT,
        }
    }

    fn popup(&self) -> Option<(String, Style)> {
        match self.view.state {
            SessionState::Win => Some((
                format!("{} REACHED!\nKEEP GOING? (Y/N)", self.view.win_threshold),
                style::WIN,
            )),
            SessionState::Over => Some((
                "GAME OVER!!\nCONTINUE? (Y/N)".to_owned(),
                style::GAME_OVER,
            )),
            SessionState::Init | SessionState::Playing | SessionState::Exit => None,
        }
    }

    fn bindings(&self) -> &'static [KeyBinding<'static>] {
        match self.view.input_context() {
            InputContext::Play => PLAY_BINDINGS,
            InputContext::Prompt => PROMPT_BINDINGS,
        }
    }
}

impl Widget for SessionScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let border_style = self.border_style();

        let grid = GridDisplay::new(self.view.grid).block(
            Block::bordered()
                .title(Line::from("TILEMERGE").centered())
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let scores = ScoreDisplay::new(self.view).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(Padding::horizontal(1))
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let [main_area, help_area, warning_area] = Layout::vertical([
            Constraint::Length(u16::max(grid.height(), scores.height())),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [grid_column, scores_column] = Layout::horizontal([
            Constraint::Length(grid.width()),
            Constraint::Length(scores.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(main_area);
        let [grid_area] = Layout::vertical([Constraint::Length(grid.height())]).areas(grid_column);
        let [scores_area] =
            Layout::vertical([Constraint::Length(scores.height())]).areas(scores_column);

        let grid_width = grid.width();
        grid.render(grid_area, buf);
        scores.render(scores_area, buf);
        KeyBindingDisplay::new(self.bindings()).render(help_area, buf);

        if let Some(err) = self.view.store_error {
            Line::styled(format!("warning: {err}"), style::WARNING)
                .centered()
                .render(warning_area, buf);
        }

        if let Some((text, style)) = self.popup() {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area = grid_area.centered(Constraint::Length(grid_width), Constraint::Length(4));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(2)), buf);
        }
    }
}
