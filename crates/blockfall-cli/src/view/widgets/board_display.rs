use std::iter;

use blockfall_engine::{BOARD_HEIGHT, BOARD_WIDTH, GameSnapshot, PieceKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::CellDisplay;

type CellGrid = [[Option<PieceKind>; BOARD_WIDTH]; BOARD_HEIGHT];

/// The playfield: locked cells plus the falling piece.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    snapshot: &'a GameSnapshot,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(snapshot: &'a GameSnapshot) -> Self {
        Self {
            snapshot,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        BOARD_WIDTH as u16 * CellDisplay::WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        BOARD_HEIGHT as u16 * CellDisplay::HEIGHT + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Merges the locked board rows with the falling piece's cells.
fn cell_grid(snapshot: &GameSnapshot) -> CellGrid {
    let mut grid = [[None; BOARD_WIDTH]; BOARD_HEIGHT];
    for (grid_row, row) in iter::zip(&mut grid, &snapshot.board) {
        for (cell, ch) in iter::zip(grid_row, row.chars()) {
            *cell = PieceKind::from_char(ch);
        }
    }
    if let Some(piece) = &snapshot.current {
        for &(col, row) in &piece.cells {
            if let (Ok(col), Ok(row)) = (usize::try_from(col), usize::try_from(row))
                && let Some(cell) = grid.get_mut(row).and_then(|r| r.get_mut(col))
            {
                *cell = Some(piece.kind);
            }
        }
    }
    grid
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..BOARD_WIDTH).map(|_| Constraint::Length(CellDisplay::WIDTH));
        let row_constraints = (0..BOARD_HEIGHT).map(|_| Constraint::Length(CellDisplay::HEIGHT));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<BOARD_HEIGHT>(&vertical)
            .into_iter()
            .map(|row| row.layout::<BOARD_WIDTH>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, cell_grid(self.snapshot)) {
            for (grid_cell, cell) in iter::zip(grid_row, row) {
                CellDisplay::from_cell(cell, true).render(grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{GameConfig, GameSession, PieceSeed};

    use super::*;

    #[test]
    fn test_grid_overlays_falling_piece() {
        let seed = PieceSeed::from_bytes([3; 16]);
        let mut session = GameSession::with_seed(GameConfig::default(), seed);
        session.start();
        let snapshot = session.snapshot();
        let piece = snapshot.current.as_ref().unwrap();

        let grid = cell_grid(&snapshot);
        let filled: Vec<_> = grid
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| c.is_some())
                    .map(move |(col, _)| (col, row))
            })
            .collect();
        assert_eq!(filled.len(), 4);
        for (col, row) in filled {
            assert_eq!(grid[row][col], Some(piece.kind));
        }
    }
}
