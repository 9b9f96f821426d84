use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{grid_display::*, key_binding_display::*, score_display::*, tile_display::*};

mod grid_display;
mod key_binding_display;
mod score_display;
mod tile_display;

mod color {
    use ratatui::style::Color;

    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const DARK_GRAY: Color = Color::Rgb(80, 80, 80);
    pub const DARK: Color = Color::Rgb(119, 110, 101);
    pub const RED: Color = Color::Rgb(255, 80, 80);
    pub const GREEN: Color = Color::Rgb(80, 220, 120);
    pub const YELLOW: Color = Color::Rgb(255, 220, 0);
    pub const CYAN: Color = Color::Rgb(0, 255, 255);

    pub const TILE_EMPTY: Color = Color::Rgb(60, 58, 50);
    pub const TILE_2: Color = Color::Rgb(238, 228, 218);
    pub const TILE_4: Color = Color::Rgb(237, 224, 200);
    pub const TILE_8: Color = Color::Rgb(242, 177, 121);
    pub const TILE_16: Color = Color::Rgb(245, 149, 99);
    pub const TILE_32: Color = Color::Rgb(246, 124, 95);
    pub const TILE_64: Color = Color::Rgb(246, 94, 59);
    pub const TILE_128: Color = Color::Rgb(237, 207, 114);
    pub const TILE_256: Color = Color::Rgb(237, 204, 97);
    pub const TILE_512: Color = Color::Rgb(237, 200, 80);
    pub const TILE_1024: Color = Color::Rgb(237, 197, 63);
    pub const TILE_2048: Color = Color::Rgb(237, 194, 46);
    pub const TILE_SUPER: Color = Color::Rgb(60, 58, 50);
}

pub mod style {
    use ratatui::style::{Color, Modifier, Style};

    use crate::view::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const KEY: Style = Style::new().fg(color::CYAN);
    pub const SEPARATOR: Style = Style::new().fg(color::DARK_GRAY);
    pub const DESCRIPTION: Style = Style::new().fg(color::WHITE);
    pub const GAME_OVER: Style = Style::new().fg(color::RED).add_modifier(Modifier::BOLD);
    pub const WIN: Style = Style::new().fg(color::GREEN).add_modifier(Modifier::BOLD);
    pub const WARNING: Style = Style::new().fg(color::YELLOW);

    /// Style of a tile holding `value` (0 for an empty cell).
    #[must_use]
    pub const fn tile(value: u32) -> Style {
        let bg = match value {
            0 => color::TILE_EMPTY,
            2 => color::TILE_2,
            4 => color::TILE_4,
            8 => color::TILE_8,
            16 => color::TILE_16,
            32 => color::TILE_32,
            64 => color::TILE_64,
            128 => color::TILE_128,
            256 => color::TILE_256,
            512 => color::TILE_512,
            1024 => color::TILE_1024,
            2048 => color::TILE_2048,
            _ => color::TILE_SUPER,
        };
        let fg = if value <= 4 { color::DARK } else { color::WHITE };
        fg_bg(fg, bg).add_modifier(Modifier::BOLD)
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
