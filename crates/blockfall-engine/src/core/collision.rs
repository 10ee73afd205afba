//! Move and rotation legality.
//!
//! Every candidate placement (sideways move, descent, rotation, spawn) goes
//! through [`check_move`] before the session commits it.

use super::{
    BOARD_HEIGHT, BOARD_WIDTH,
    board::Board,
    piece::{self, Piece, PieceRotation},
    shape::PieceKind,
    to_i32,
};

/// Reason a candidate placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PieceCollisionError {
    /// A cell would leave the board sideways or through the floor.
    #[display("piece outside the board")]
    OutOfBounds,
    /// A cell would cover an already filled cell.
    #[display("piece overlapping locked cells")]
    Overlap,
}

/// Checks whether `piece`, displaced by `(dx, dy)` and optionally turned to
/// `new_rotation`, is a legal placement on `board`.
///
/// Cells above the top row are legal; cells left, right, or below the
/// board are not, and neither are cells on filled board cells.
///
/// When the bar changes rotation the origin column is corrected so that the
/// bar turns in place: one column right going from horizontal to vertical,
/// one column left going back.
///
/// On success the returned piece carries the (corrected) origin and the new
/// rotation, ready to be committed as a whole.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Piece, PieceKind, check_move};
///
/// let board = Board::EMPTY;
/// let bar = Piece::new(PieceKind::I);
/// assert_eq!(bar.position().col(), 3);
///
/// let turned = check_move(&board, &bar, 0, 0, Some(bar.next_rotation())).unwrap();
/// assert_eq!(turned.position().col(), 4);
/// ```
pub fn check_move(
    board: &Board,
    piece: &Piece,
    dx: i32,
    dy: i32,
    new_rotation: Option<PieceRotation>,
) -> Result<Piece, PieceCollisionError> {
    let kind = piece.kind();
    let rotation = new_rotation.unwrap_or(piece.rotation());
    let mut origin = piece.position().offset(dx, dy);

    if let Some(new_rotation) = new_rotation {
        origin = origin.offset(bar_recentering(kind, piece.rotation(), new_rotation), 0);
    }

    let grid = kind.grid(rotation.index());
    for (col, row) in piece::cells_at(grid, origin) {
        if !(0..to_i32(BOARD_WIDTH)).contains(&col) || row >= to_i32(BOARD_HEIGHT) {
            return Err(PieceCollisionError::OutOfBounds);
        }
        if row >= 0 && board.is_filled(col, row) {
            return Err(PieceCollisionError::Overlap);
        }
    }

    Ok(piece.with_rotation(rotation).with_position(origin))
}

/// Column correction for turning the bar from `from` to `to`.
fn bar_recentering(kind: PieceKind, from: PieceRotation, to: PieceRotation) -> i32 {
    if kind != PieceKind::I {
        return 0;
    }
    match (from.normalized(kind), to.normalized(kind)) {
        (0, 1) => 1,
        (1, 0) => -1,
        _ => 0,
    }
}
