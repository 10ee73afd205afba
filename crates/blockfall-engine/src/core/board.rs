use super::{
    BOARD_HEIGHT, BOARD_WIDTH,
    piece::Piece,
    shape::PieceKind,
};

/// A single cell of the board.
///
/// Once a piece locks, only its kind survives in the cells it covered; the
/// kind doubles as the cell's color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub enum Cell {
    /// Empty cell (no piece).
    #[default]
    Empty,
    /// Locked piece of a specific type.
    Filled(PieceKind),
}

impl Cell {
    /// Returns the piece kind that filled this cell, if any.
    #[must_use]
    pub fn kind(self) -> Option<PieceKind> {
        match self {
            Cell::Empty => None,
            Cell::Filled(kind) => Some(kind),
        }
    }
}

/// One row of cells, leftmost column first.
pub type BoardRow = [Cell; BOARD_WIDTH];

const EMPTY_ROW: BoardRow = [Cell::Empty; BOARD_WIDTH];

/// The 10×20 grid of locked cells.
///
/// Row 0 is the top of the board. The board only holds locked pieces; the
/// falling piece lives in the session and is overlaid by renderers.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Piece, PieceKind};
///
/// let mut board = Board::EMPTY;
/// board.lock_piece(&Piece::new(PieceKind::O));
/// assert_eq!(board.filled_count(), 4);
/// assert_eq!(board.clear_full_lines(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [BoardRow; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; BOARD_HEIGHT],
    };

    /// Returns an iterator over the rows, top row first.
    pub fn rows(&self) -> impl Iterator<Item = &BoardRow> {
        self.rows.iter()
    }

    /// Returns the cell at `(col, row)`, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, col: i32, row: i32) -> Option<Cell> {
        let col = usize::try_from(col).ok()?;
        let row = usize::try_from(row).ok()?;
        self.rows.get(row)?.get(col).copied()
    }

    /// Returns whether `(col, row)` lies inside the board and is filled.
    #[must_use]
    pub fn is_filled(&self, col: i32, row: i32) -> bool {
        self.cell(col, row).is_some_and(|cell| cell.is_filled())
    }

    /// Overwrites one cell. Positions outside the board are ignored.
    pub fn set_cell(&mut self, col: usize, row: usize, cell: Cell) {
        if let Some(slot) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *slot = cell;
        }
    }

    /// Returns whether every cell of `row` is filled.
    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|cells| cells.iter().all(|cell| cell.is_filled()))
    }

    /// Number of filled cells on the whole board.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| cell.is_filled())
            .count()
    }

    /// Writes the piece's kind into every cell it covers.
    ///
    /// Cells above the top row are dropped; a piece that still sticks out
    /// of the board when it locks means the stack has reached the spawn
    /// area, which the session detects on the following spawn check.
    pub fn lock_piece(&mut self, piece: &Piece) {
        for (col, row) in piece.occupied_cells() {
            let (Ok(col), Ok(row)) = (usize::try_from(col), usize::try_from(row)) else {
                continue;
            };
            self.set_cell(col, row, Cell::Filled(piece.kind()));
        }
    }

    /// Clears filled lines and returns the number of lines cleared.
    ///
    /// Rows are scanned from the bottom up. A full row is removed, every row
    /// above it moves down by one, and an empty row enters at the top. The
    /// same row index is then tested again, since the row that moved into it
    /// may be full too. Rows below a cleared row are untouched.
    pub fn clear_full_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = BOARD_HEIGHT;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.rows.copy_within(0..row, 1);
                self.rows[0] = EMPTY_ROW;
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }
}
