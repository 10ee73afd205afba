pub use self::{board::*, collision::*, piece::*, shape::*};

pub(crate) mod board;
pub(crate) mod collision;
pub(crate) mod piece;
pub(crate) mod shape;

/// Board width in cells.
pub const BOARD_WIDTH: usize = 10;
/// Board height in cells.
pub const BOARD_HEIGHT: usize = 20;

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub(crate) const fn to_i32(v: usize) -> i32 {
    v as i32
}
