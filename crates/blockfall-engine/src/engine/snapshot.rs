use std::time::Duration;

use serde::Serialize;

use crate::core::{Board, Cell, Piece, PieceKind};

use super::{GameSession, SessionState};

/// Read-only copy of everything a renderer or UI needs for one frame.
///
/// Serializes to JSON as plain data: board rows are strings with one
/// character per cell (`.` for empty, the piece letter otherwise).
///
/// `running` is true while a session is in progress, paused or not, so a
/// paused session reports `running && paused`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub board: Vec<String>,
    pub current: Option<PieceView>,
    pub next: Option<NextPieceView>,
    pub score: usize,
    pub lines: usize,
    pub level: usize,
    pub drop_interval_ms: u64,
    pub play_time_ms: u64,
    pub running: bool,
    pub paused: bool,
    pub game_over: bool,
}

/// The falling piece as seen by a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceView {
    pub kind: PieceKind,
    pub rotation: usize,
    pub col: i32,
    pub row: i32,
    pub cells: Vec<(i32, i32)>,
    pub color: &'static str,
}

/// The upcoming piece, with its first rotation state for a preview box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextPieceView {
    pub kind: PieceKind,
    pub color: &'static str,
    pub preview: Vec<String>,
}

impl From<&Piece> for PieceView {
    fn from(piece: &Piece) -> Self {
        Self {
            kind: piece.kind(),
            rotation: piece.rotation().normalized(piece.kind()),
            col: piece.position().col(),
            row: piece.position().row(),
            cells: piece.occupied_cells().to_vec(),
            color: piece.kind().color_hex(),
        }
    }
}

impl From<&Piece> for NextPieceView {
    fn from(piece: &Piece) -> Self {
        let kind = piece.kind();
        let preview = kind
            .grid(0)
            .rows()
            .map(|row| row.iter().map(|&c| if c { '#' } else { '.' }).collect())
            .collect();
        Self {
            kind,
            color: kind.color_hex(),
            preview,
        }
    }
}

impl From<&GameSession> for GameSnapshot {
    fn from(session: &GameSession) -> Self {
        let state = session.state();
        Self {
            board: board_rows(session.board()),
            current: session.current_piece().map(PieceView::from),
            next: session.next_piece().map(NextPieceView::from),
            score: session.stats().score(),
            lines: session.stats().total_cleared_lines(),
            level: session.stats().level(),
            drop_interval_ms: as_millis(session.drop_interval()),
            play_time_ms: as_millis(session.play_time()),
            running: matches!(state, SessionState::Running | SessionState::Paused),
            paused: state.is_paused(),
            game_over: state.is_game_over(),
        }
    }
}

fn as_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn board_rows(board: &Board) -> Vec<String> {
    board
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Cell::Empty => '.',
                    Cell::Filled(kind) => kind.as_char(),
                })
                .collect()
        })
        .collect()
}
