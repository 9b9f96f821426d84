use ratatui::{
    layout::Constraint,
    prelude::{Buffer, Rect},
    style::Style,
    text::Line,
    widgets::{Block as BlockWidget, Widget},
};

use crate::view::widgets::style;

/// A single cell of the grid, drawn as a colored box with its value centered.
#[derive(Debug, Clone, Copy)]
pub struct TileDisplay {
    value: u32,
    style: Style,
}

impl TileDisplay {
    pub const fn new(value: u32) -> Self {
        Self {
            value,
            style: style::tile(value),
        }
    }

    pub fn width() -> u16 {
        7
    }

    pub fn height() -> u16 {
        3
    }
}

impl Widget for TileDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &TileDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = BlockWidget::new().style(self.style);
        block.render(area, buf);
        if self.value != 0 {
            Line::styled(self.value.to_string(), self.style)
                .centered()
                .render(area.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
