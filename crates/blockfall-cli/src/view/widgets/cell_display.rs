use blockfall_engine::PieceKind;
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use super::style;

/// One board cell, two terminal columns wide.
#[derive(Debug)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const WIDTH: u16 = 2;
    pub const HEIGHT: u16 = 1;

    pub const fn empty(show_dots: bool) -> Self {
        if show_dots {
            Self {
                style: style::EMPTY_DOT,
                symbol: ".",
            }
        } else {
            Self {
                style: style::EMPTY,
                symbol: "",
            }
        }
    }

    pub const fn filled(kind: PieceKind) -> Self {
        Self {
            style: style::piece(kind),
            symbol: "",
        }
    }

    pub const fn from_cell(cell: Option<PieceKind>, show_dots: bool) -> Self {
        match cell {
            Some(kind) => Self::filled(kind),
            None => Self::empty(show_dots),
        }
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // A Paragraph fills the whole area, not just the symbol cells.
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
