use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};
use tilemerge_engine::Grid;

use crate::view::widgets::TileDisplay;

const TILE_SPACING: u16 = 1;

#[derive(Debug)]
pub struct GridDisplay<'a> {
    grid: &'a Grid,
    block: Option<BlockWidget<'a>>,
}

impl<'a> GridDisplay<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn tiles(&self) -> u16 {
        u16::try_from(self.grid.size()).unwrap_or(u16::MAX)
    }

    fn span(&self, tile: u16) -> u16 {
        let n = self.tiles();
        n.saturating_mul(tile)
            .saturating_add(n.saturating_sub(1).saturating_mul(TILE_SPACING))
    }

    pub fn width(&self) -> u16 {
        self.span(TileDisplay::width()) + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        self.span(TileDisplay::height()) + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let size = self.grid.size();
        let col_constraints = (0..size).map(|_| Constraint::Length(TileDisplay::width()));
        let row_constraints = (0..size).map(|_| Constraint::Length(TileDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints)
            .flex(Flex::Center)
            .spacing(TILE_SPACING);
        let vertical = Layout::vertical(row_constraints)
            .flex(Flex::Center)
            .spacing(TILE_SPACING);

        for (grid_row, row) in iter::zip(vertical.split(area).iter(), self.grid.rows()) {
            let grid_cells = horizontal.split(*grid_row);
            for (grid_cell, value) in iter::zip(grid_cells.iter(), row) {
                TileDisplay::new(*value).render(*grid_cell, buf);
            }
        }
    }
}
