use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::{
    BOARD_WIDTH,
    shape::{PieceKind, ShapeGrid},
    to_i32,
};

/// A falling piece: kind, rotation, and board-relative origin.
///
/// Pieces are plain values. Movement and rotation return new `Piece`
/// instances, and the session commits one only after
/// [`check_move`](super::collision::check_move) accepts it.
///
/// # Coordinate System
///
/// - The origin is the top-left corner of the current rotation grid
/// - Columns grow rightward, rows grow downward, row 0 is the top board row
/// - Coordinates are signed; cells above the board have negative rows
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceKind};
///
/// let piece = Piece::new(PieceKind::T);
/// assert_eq!(piece.position().col(), 4);
///
/// let moved = piece.shifted(-1, 1);
/// assert_eq!((moved.position().col(), moved.position().row()), (3, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    position: PiecePosition,
    rotation: PieceRotation,
    kind: PieceKind,
}

impl Piece {
    /// Creates a piece of `kind` at its spawn position.
    ///
    /// The piece starts in rotation state 0 on row 0, horizontally centered:
    /// column `width / 2 - 1`, or `width / 2 - 2` for the bar, whose first
    /// state is four cells wide.
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        Self {
            position: PiecePosition::spawn(kind),
            rotation: PieceRotation::default(),
            kind,
        }
    }

    /// Creates a piece at an arbitrary placement.
    ///
    /// No legality check is done here.
    #[must_use]
    pub const fn with_placement(
        kind: PieceKind,
        rotation: PieceRotation,
        position: PiecePosition,
    ) -> Self {
        Self {
            position,
            rotation,
            kind,
        }
    }

    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the grid of the current rotation state.
    #[must_use]
    pub fn grid(&self) -> ShapeGrid {
        self.kind.grid(self.rotation.index())
    }

    /// Returns the absolute `(col, row)` of every filled cell.
    #[must_use]
    pub fn occupied_cells(&self) -> ArrayVec<(i32, i32), 4> {
        cells_at(self.grid(), self.position)
    }

    /// Returns the rotation index that a clockwise turn would reach.
    #[must_use]
    pub fn next_rotation(&self) -> PieceRotation {
        self.rotation.rotated_right(self.kind)
    }

    #[must_use]
    pub fn shifted(self, dx: i32, dy: i32) -> Self {
        Self {
            position: self.position.offset(dx, dy),
            ..self
        }
    }

    #[must_use]
    pub fn with_rotation(self, rotation: PieceRotation) -> Self {
        Self { rotation, ..self }
    }

    #[must_use]
    pub fn with_position(self, position: PiecePosition) -> Self {
        Self { position, ..self }
    }
}

pub(crate) fn cells_at(grid: ShapeGrid, origin: PiecePosition) -> ArrayVec<(i32, i32), 4> {
    grid.occupied_offsets()
        .map(|(dx, dy)| (origin.col + to_i32(dx), origin.row + to_i32(dy)))
        .collect()
}

/// Origin of a piece on the board.
///
/// Signed so that candidate positions left of the board or above it can be
/// represented and then rejected (or, for rows above, accepted) by the
/// collision check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PiecePosition {
    col: i32,
    row: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Spawn origin of `kind`.
    #[must_use]
    pub const fn spawn(kind: PieceKind) -> Self {
        let center = to_i32(BOARD_WIDTH / 2);
        let col = match kind {
            PieceKind::I => center - 2,
            _ => center - 1,
        };
        Self::new(col, 0)
    }

    #[must_use]
    pub const fn col(self) -> i32 {
        self.col
    }

    #[must_use]
    pub const fn row(self) -> i32 {
        self.row
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.col + dx, self.row + dy)
    }
}

/// Rotation state index of a piece.
///
/// Stored as given; every lookup takes it modulo the kind's state count, so
/// an index past the end wraps instead of failing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PieceRotation(u8);

impl PieceRotation {
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The index reduced modulo the state count of `kind`.
    #[must_use]
    pub const fn normalized(self, kind: PieceKind) -> usize {
        self.index() % kind.rotation_count()
    }

    /// Next state clockwise, wrapping to 0 after the last state of `kind`.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn rotated_right(self, kind: PieceKind) -> Self {
        Self(((self.index() + 1) % kind.rotation_count()) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_columns() {
        for kind in PieceKind::ALL {
            let piece = Piece::new(kind);
            let expected = if kind == PieceKind::I { 3 } else { 4 };
            assert_eq!(piece.position(), PiecePosition::new(expected, 0), "{kind:?}");
            assert_eq!(piece.rotation().index(), 0);
        }
    }

    #[test]
    fn test_spawned_bar_is_centered() {
        let cols: Vec<_> = Piece::new(PieceKind::I)
            .occupied_cells()
            .iter()
            .map(|&(col, _)| col)
            .collect();
        assert_eq!(cols, vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_occupied_cells_follow_origin() {
        let piece = Piece::with_placement(
            PieceKind::S,
            PieceRotation::new(0),
            PiecePosition::new(2, 5),
        );
        let cells = piece.occupied_cells();
        assert_eq!(cells.as_slice(), &[(3, 5), (4, 5), (2, 6), (3, 6)]);
    }

    #[test]
    fn test_rotation_wraps_per_kind() {
        let mut rotation = PieceRotation::default();
        for expected in [1, 2, 3, 0, 1] {
            rotation = rotation.rotated_right(PieceKind::T);
            assert_eq!(rotation.index(), expected);
        }

        let o = PieceRotation::default().rotated_right(PieceKind::O);
        assert_eq!(o.index(), 0);

        let i = PieceRotation::new(1).rotated_right(PieceKind::I);
        assert_eq!(i.index(), 0);
    }

    #[test]
    fn test_out_of_range_rotation_uses_modulo() {
        let piece = Piece::with_placement(
            PieceKind::Z,
            PieceRotation::new(3),
            PiecePosition::new(0, 0),
        );
        assert_eq!(piece.grid(), PieceKind::Z.grid(1));
        assert_eq!(piece.rotation().normalized(PieceKind::Z), 1);
    }
}
