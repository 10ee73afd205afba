use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Enum representing the type of piece.
///
/// The discriminant order is also the catalog order used by
/// [`PieceKind::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// Long bar, four cells in a row.
    I = 0,
    /// 2×2 square.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds in catalog order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Returns the ordered rotation states of this kind.
    ///
    /// The square has a single state, the bar and the S/Z pieces have two,
    /// and T/J/L have four.
    #[must_use]
    pub const fn rotations(self) -> &'static [ShapeGrid] {
        SHAPE_CATALOG[self as usize]
    }

    /// Number of distinct rotation states.
    #[must_use]
    pub const fn rotation_count(self) -> usize {
        self.rotations().len()
    }

    /// Returns the grid for `index`, wrapping modulo the state count.
    #[must_use]
    pub const fn grid(self, index: usize) -> ShapeGrid {
        let rotations = self.rotations();
        rotations[index % rotations.len()]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('Z'), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Display color as a `#rrggbb` string.
    #[must_use]
    pub const fn color_hex(self) -> &'static str {
        match self {
            PieceKind::I => "#3b82f6",
            PieceKind::O => "#fbbf24",
            PieceKind::T => "#a855f7",
            PieceKind::S => "#10b981",
            PieceKind::Z => "#ef4444",
            PieceKind::J => "#1e3a8a",
            PieceKind::L => "#f97316",
        }
    }

    /// Display color as an `(r, g, b)` triple, matching [`Self::color_hex`].
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (0x3b, 0x82, 0xf6),
            PieceKind::O => (0xfb, 0xbf, 0x24),
            PieceKind::T => (0xa8, 0x55, 0xf7),
            PieceKind::S => (0x10, 0xb9, 0x81),
            PieceKind::Z => (0xef, 0x44, 0x44),
            PieceKind::J => (0x1e, 0x3a, 0x8a),
            PieceKind::L => (0xf9, 0x73, 0x16),
        }
    }
}

/// One rotation state of a piece: a row-major boolean grid, origin top-left.
///
/// Grids are tight (no empty border), so the bar's horizontal state is
/// 4×1 and its vertical state 1×4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeGrid {
    rows: &'static [&'static [bool]],
}

impl ShapeGrid {
    const fn new(rows: &'static [&'static [bool]]) -> Self {
        Self { rows }
    }

    #[must_use]
    pub const fn width(self) -> usize {
        self.rows[0].len()
    }

    #[must_use]
    pub const fn height(self) -> usize {
        self.rows.len()
    }

    /// Returns whether the cell at `(x, y)` within the grid is filled.
    ///
    /// Positions outside the grid are reported as empty.
    #[must_use]
    pub fn is_occupied(self, x: usize, y: usize) -> bool {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    pub fn rows(self) -> impl Iterator<Item = &'static [bool]> {
        self.rows.iter().copied()
    }

    /// Returns the `(dx, dy)` offsets of every filled cell, row by row.
    pub fn occupied_offsets(self) -> impl Iterator<Item = (usize, usize)> {
        self.rows.iter().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, filled)| **filled)
                .map(move |(dx, _)| (dx, dy))
        })
    }
}

const C: bool = true;
const E: bool = false;

const SHAPE_CATALOG: [&[ShapeGrid]; PieceKind::LEN] = [
    // I-piece
    &[
        ShapeGrid::new(&[&[C, C, C, C]]),
        ShapeGrid::new(&[&[C], &[C], &[C], &[C]]),
    ],
    // O-piece
    &[ShapeGrid::new(&[&[C, C], &[C, C]])],
    // T-piece
    &[
        ShapeGrid::new(&[&[E, C, E], &[C, C, C]]),
        ShapeGrid::new(&[&[C, E], &[C, C], &[C, E]]),
        ShapeGrid::new(&[&[C, C, C], &[E, C, E]]),
        ShapeGrid::new(&[&[E, C], &[C, C], &[E, C]]),
    ],
    // S-piece
    &[
        ShapeGrid::new(&[&[E, C, C], &[C, C, E]]),
        ShapeGrid::new(&[&[C, E], &[C, C], &[E, C]]),
    ],
    // Z-piece
    &[
        ShapeGrid::new(&[&[C, C, E], &[E, C, C]]),
        ShapeGrid::new(&[&[E, C], &[C, C], &[C, E]]),
    ],
    // J-piece
    &[
        ShapeGrid::new(&[&[C, E, E], &[C, C, C]]),
        ShapeGrid::new(&[&[C, C], &[C, E], &[C, E]]),
        ShapeGrid::new(&[&[C, C, C], &[E, E, C]]),
        ShapeGrid::new(&[&[E, C], &[E, C], &[C, C]]),
    ],
    // L-piece
    &[
        ShapeGrid::new(&[&[E, E, C], &[C, C, C]]),
        ShapeGrid::new(&[&[C, E], &[C, E], &[C, C]]),
        ShapeGrid::new(&[&[C, C, C], &[C, E, E]]),
        ShapeGrid::new(&[&[C, C], &[E, C], &[E, C]]),
    ],
];
