use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tilemerge_engine::SessionView;

use crate::view::widgets::style;

pub struct ScoreDisplay<'a> {
    view: SessionView<'a>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> ScoreDisplay<'a> {
    pub fn new(view: SessionView<'a>) -> Self {
        Self { view, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(ROWS.len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(fn(&SessionView<'_>) -> String),
    LabelValue(&'static str, fn(&SessionView<'_>) -> String),
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(|view| view.score().to_string()),
    Row::FullLabel("BEST SCORE:"),
    Row::FullValue(|view| view.best_score.to_string()),
    Row::Empty,
    Row::LabelValue("WIN AT:", |view| view.win_threshold.to_string()),
    Row::LabelValue("MAX TILE:", |view| view.grid.max_value().to_string()),
    Row::Empty,
    Row::LabelValue("MOVES:", |view| view.grid.score().moves().to_string()),
    Row::LabelValue("MERGES:", |view| view.grid.score().merges().to_string()),
    Row::LabelValue("BIGGEST:", |view| {
        view.grid.score().largest_merge().to_string()
    }),
];

impl Widget for ScoreDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(&self.view), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(&self.view), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
