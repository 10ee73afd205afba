use blockfall_engine::NextPieceView;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::CellDisplay;

/// Preview box for the upcoming piece.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<&'a NextPieceView>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new(piece: Option<&'a NextPieceView>) -> Self {
        Self { piece, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    // Every first rotation state fits in 4×2.
    pub fn width(&self) -> u16 {
        4 * CellDisplay::WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * CellDisplay::HEIGHT + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(piece) = self.piece else {
            return;
        };
        let rows = &piece.preview;
        let height = u16::try_from(rows.len()).unwrap_or(0);
        let width = rows
            .first()
            .map_or(0, |row| u16::try_from(row.len()).unwrap_or(0));

        let piece_area = area.centered(
            Constraint::Length(width * CellDisplay::WIDTH),
            Constraint::Length(height * CellDisplay::HEIGHT),
        );
        let horizontal =
            Layout::horizontal((0..width).map(|_| Constraint::Length(CellDisplay::WIDTH)))
                .flex(Flex::Center);
        let vertical = Layout::vertical((0..height).map(|_| Constraint::Length(CellDisplay::HEIGHT)));

        let filled = CellDisplay::filled(piece.kind);
        let empty = CellDisplay::empty(false);
        for (row, row_area) in rows.iter().zip(piece_area.layout_vec(&vertical)) {
            for (ch, cell_area) in row.chars().zip(row_area.layout_vec(&horizontal)) {
                let cell = if ch == '#' { &filled } else { &empty };
                cell.render(cell_area, buf);
            }
        }
    }
}
