use std::{mem, time::Duration};

use crate::core::{Board, Piece, check_move};

use super::{
    config::GameConfig,
    event::GameEvent,
    piece_generator::{PieceGenerator, PieceSeed},
    snapshot::GameSnapshot,
    stats::GameStats,
};

/// Lifecycle of a session.
///
/// `Idle → Running ⇄ Paused`, `Running → GameOver`, and
/// [`GameSession::reset`] goes back to `Idle` from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// No active piece: before the first start or after a reset.
    Idle,
    Running,
    Paused,
    /// A new piece could not spawn. Only `reset` leaves this state.
    GameOver,
}

/// One game: board, current and next piece, statistics, and drop timing.
///
/// The session is driven from outside. A driver pumps
/// [`advance_time`](Self::advance_time) with the elapsed wall time and
/// forwards player input to the command methods. Commands issued while the
/// session is idle, paused, or over are ignored.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::{GameConfig, GameSession};
///
/// let mut session = GameSession::new(GameConfig::default());
/// session.start();
///
/// let row = session.current_piece().unwrap().position().row();
/// session.advance_time(Duration::from_millis(1000));
/// assert_eq!(session.current_piece().unwrap().position().row(), row + 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    generator: PieceGenerator,
    board: Board,
    current: Option<Piece>,
    next: Option<Piece>,
    stats: GameStats,
    state: SessionState,
    drop_interval: Duration,
    drop_elapsed: Duration,
    play_time: Duration,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Creates an idle session drawing pieces from a random seed.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_generator(config, PieceGenerator::new())
    }

    /// Like [`Self::new`], with a fixed piece sequence.
    #[must_use]
    pub fn with_seed(config: GameConfig, seed: PieceSeed) -> Self {
        Self::with_generator(config, PieceGenerator::with_seed(seed))
    }

    fn with_generator(config: GameConfig, generator: PieceGenerator) -> Self {
        let drop_interval = config.drop_interval(1);
        Self {
            config,
            generator,
            board: Board::EMPTY,
            current: None,
            next: None,
            stats: GameStats::new(),
            state: SessionState::Idle,
            drop_interval,
            drop_elapsed: Duration::ZERO,
            play_time: Duration::ZERO,
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn current_piece(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn next_piece(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns whether commands currently take effect (running, not paused).
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Time a piece takes to fall one row at the current level.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        self.drop_interval
    }

    /// Total time pumped through [`Self::advance_time`] while running.
    #[must_use]
    pub fn play_time(&self) -> Duration {
        self.play_time
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(self)
    }

    /// Takes the queued notifications, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    /// Starts a new game from `Idle`, or resumes a paused one.
    ///
    /// Starting spawns a random current and next piece on an empty board and
    /// sets score 0, lines 0, level 1. A running or finished session is left
    /// as is.
    pub fn start(&mut self) {
        match self.state {
            SessionState::Idle => {
                self.clear_progress();
                self.current = Some(self.generator.next_piece());
                self.next = Some(self.generator.next_piece());
                self.state = SessionState::Running;
            }
            SessionState::Paused => self.state = SessionState::Running,
            SessionState::Running | SessionState::GameOver => {}
        }
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            SessionState::Running => SessionState::Paused,
            SessionState::Paused => SessionState::Running,
            state @ (SessionState::Idle | SessionState::GameOver) => state,
        };
    }

    /// Abandons the current game and returns to `Idle`.
    pub fn reset(&mut self) {
        self.clear_progress();
        self.current = None;
        self.next = None;
        self.events.clear();
        self.state = SessionState::Idle;
    }

    fn clear_progress(&mut self) {
        self.board = Board::EMPTY;
        self.stats = GameStats::new();
        self.drop_interval = self.config.drop_interval(1);
        self.drop_elapsed = Duration::ZERO;
        self.play_time = Duration::ZERO;
    }

    /// Advances the drop timer by `delta`.
    ///
    /// Once the accumulated time reaches the drop interval the piece falls
    /// one row (or locks) and the timer restarts from zero. At most one row
    /// falls per call.
    pub fn advance_time(&mut self, delta: Duration) {
        if !self.is_running() {
            return;
        }
        self.play_time = self.play_time.saturating_add(delta);
        self.drop_elapsed = self.drop_elapsed.saturating_add(delta);
        if self.drop_elapsed >= self.drop_interval {
            self.drop_elapsed = Duration::ZERO;
            self.soft_drop();
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.move_by(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.move_by(1, 0)
    }

    /// Moves the current piece by `(dx, dy)` if the target is free.
    ///
    /// Returns whether the piece moved.
    pub fn move_by(&mut self, dx: i32, dy: i32) -> bool {
        let Some(piece) = self.active_piece() else {
            return false;
        };
        let succeeded = match check_move(&self.board, &piece, dx, dy, None) {
            Ok(moved) => {
                self.current = Some(moved);
                true
            }
            Err(_) => false,
        };
        if dx != 0 {
            self.events.push(GameEvent::Moved { succeeded });
        }
        succeeded
    }

    /// Turns the current piece to its next rotation state if it fits.
    ///
    /// Returns whether the piece turned. Kinds with a single state always
    /// succeed without changing anything.
    pub fn rotate(&mut self) -> bool {
        let Some(piece) = self.active_piece() else {
            return false;
        };
        let succeeded =
            match check_move(&self.board, &piece, 0, 0, Some(piece.next_rotation())) {
                Ok(turned) => {
                    self.current = Some(turned);
                    true
                }
                Err(_) => false,
            };
        self.events.push(GameEvent::Rotated { succeeded });
        succeeded
    }

    /// Moves the current piece down one row, or locks it if it cannot move.
    ///
    /// Locking fills the board, clears full rows, updates the score, and
    /// brings in the next piece. If that piece does not fit at its spawn
    /// position the game is over.
    ///
    /// Returns whether the piece moved down.
    pub fn soft_drop(&mut self) -> bool {
        let Some(piece) = self.active_piece() else {
            return false;
        };
        if let Ok(moved) = check_move(&self.board, &piece, 0, 1, None) {
            self.current = Some(moved);
            return true;
        }
        self.lock_and_spawn(piece);
        false
    }

    fn active_piece(&self) -> Option<Piece> {
        if self.is_running() { self.current } else { None }
    }

    fn lock_and_spawn(&mut self, piece: Piece) {
        self.board.lock_piece(&piece);
        let cleared_lines = self.board.clear_full_lines();
        let outcome = self.stats.complete_piece_drop(cleared_lines, &self.config);

        if cleared_lines > 0 {
            self.events.push(GameEvent::LinesCleared {
                count: cleared_lines,
            });
            self.events.push(GameEvent::ScoreChanged {
                score: self.stats.score(),
            });
            if outcome.level_changed {
                self.events.push(GameEvent::LevelChanged {
                    level: self.stats.level(),
                });
            }
            self.drop_interval = self.config.drop_interval(self.stats.level());
        }

        let spawned = self.next.take().unwrap_or_else(|| self.generator.next_piece());
        self.current = Some(spawned);
        self.next = Some(self.generator.next_piece());

        if check_move(&self.board, &spawned, 0, 0, None).is_err() {
            self.state = SessionState::GameOver;
            self.events.push(GameEvent::GameOver {
                final_score: self.stats.score(),
                final_level: self.stats.level(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BOARD_HEIGHT, BOARD_WIDTH, Cell, PieceKind, PiecePosition, PieceRotation};

    const SEED: PieceSeed = PieceSeed::from_bytes([7; 16]);

    fn started() -> GameSession {
        let mut session = GameSession::with_seed(GameConfig::default(), SEED);
        session.start();
        session
    }

    fn place(session: &mut GameSession, piece: Piece) {
        session.current = Some(piece);
    }

    fn piece_at(kind: PieceKind, rotation: u8, col: i32, row: i32) -> Piece {
        Piece::with_placement(
            kind,
            PieceRotation::new(rotation),
            PiecePosition::new(col, row),
        )
    }

    /// Fills the bottom `rows` rows except column `gap`.
    fn fill_with_gap(session: &mut GameSession, rows: usize, gap: usize) {
        for row in BOARD_HEIGHT - rows..BOARD_HEIGHT {
            for col in (0..BOARD_WIDTH).filter(|c| *c != gap) {
                session.board.set_cell(col, row, Cell::Filled(PieceKind::O));
            }
        }
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = GameSession::with_seed(GameConfig::default(), SEED);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.current_piece().is_none());
        assert!(session.next_piece().is_none());
        assert_eq!(session.stats().level(), 1);
        assert_eq!(session.drop_interval(), Duration::from_millis(1000));
    }

    #[test]
    fn test_start_spawns_pieces() {
        let session = started();
        assert!(session.is_running());
        let current = session.current_piece().unwrap();
        assert_eq!(*current, Piece::new(current.kind()));
        assert!(session.next_piece().is_some());
        assert_eq!(session.board(), &Board::EMPTY);
    }

    #[test]
    fn test_commands_ignored_unless_running() {
        let mut session = GameSession::with_seed(GameConfig::default(), SEED);
        assert!(!session.move_left());
        assert!(!session.rotate());
        assert!(!session.soft_drop());
        session.advance_time(Duration::from_secs(5));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.drain_events().is_empty());

        session.start();
        session.toggle_pause();
        let before = *session.current_piece().unwrap();
        assert!(!session.move_left());
        assert!(!session.soft_drop());
        session.advance_time(Duration::from_secs(5));
        assert_eq!(*session.current_piece().unwrap(), before);
        assert_eq!(session.play_time(), Duration::ZERO);
    }

    #[test]
    fn test_start_resumes_pause_without_reset() {
        let mut session = started();
        assert!(session.soft_drop());
        let piece = *session.current_piece().unwrap();
        session.toggle_pause();
        assert!(session.is_paused());

        session.start();
        assert!(session.is_running());
        assert_eq!(*session.current_piece().unwrap(), piece);
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut session = started();
        assert!(session.soft_drop());
        let piece = *session.current_piece().unwrap();
        session.start();
        assert_eq!(*session.current_piece().unwrap(), piece);
    }

    #[test]
    fn test_toggle_pause_only_while_active() {
        let mut session = GameSession::with_seed(GameConfig::default(), SEED);
        session.toggle_pause();
        assert_eq!(session.state(), SessionState::Idle);

        session.start();
        session.toggle_pause();
        assert_eq!(session.state(), SessionState::Paused);
        session.toggle_pause();
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn test_advance_time_drops_once_per_interval() {
        let mut session = started();
        let row = session.current_piece().unwrap().position().row();

        session.advance_time(Duration::from_millis(600));
        assert_eq!(session.current_piece().unwrap().position().row(), row);

        session.advance_time(Duration::from_millis(400));
        assert_eq!(session.current_piece().unwrap().position().row(), row + 1);

        // Excess time is discarded: one row per call at most.
        session.advance_time(Duration::from_millis(5000));
        assert_eq!(session.current_piece().unwrap().position().row(), row + 2);
        session.advance_time(Duration::from_millis(999));
        assert_eq!(session.current_piece().unwrap().position().row(), row + 2);

        assert_eq!(session.play_time(), Duration::from_millis(6999));
    }

    #[test]
    fn test_move_emits_event_for_sideways_moves() {
        let mut session = started();
        place(&mut session, piece_at(PieceKind::O, 0, 0, 5));

        assert!(!session.move_left());
        assert!(session.move_right());
        assert!(session.move_by(0, 1));
        assert_eq!(
            session.drain_events(),
            vec![
                GameEvent::Moved { succeeded: false },
                GameEvent::Moved { succeeded: true },
            ]
        );
        assert_eq!(
            session.current_piece().unwrap().position(),
            PiecePosition::new(1, 6)
        );
    }

    #[test]
    fn test_rotate_bar_recenters() {
        let mut session = started();
        place(&mut session, piece_at(PieceKind::I, 0, 3, 5));

        assert!(session.rotate());
        let piece = session.current_piece().unwrap();
        assert_eq!(piece.rotation().index(), 1);
        assert_eq!(piece.position(), PiecePosition::new(4, 5));

        assert!(session.rotate());
        let piece = session.current_piece().unwrap();
        assert_eq!(piece.rotation().index(), 0);
        assert_eq!(piece.position(), PiecePosition::new(3, 5));

        assert_eq!(
            session.drain_events(),
            vec![GameEvent::Rotated { succeeded: true }; 2]
        );
    }

    #[test]
    fn test_rotate_square_is_valid_noop() {
        let mut session = started();
        let square = piece_at(PieceKind::O, 0, 4, 5);
        place(&mut session, square);
        assert!(session.rotate());
        assert_eq!(*session.current_piece().unwrap(), square);
    }

    #[test]
    fn test_rotate_blocked() {
        let mut session = started();
        // Vertical bar against the right wall cannot turn flat.
        place(&mut session, piece_at(PieceKind::I, 1, 9, 5));
        assert!(!session.rotate());
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::Rotated { succeeded: false }]
        );
        assert_eq!(session.current_piece().unwrap().rotation().index(), 1);
    }

    #[test]
    fn test_lock_promotes_next_piece() {
        let mut session = started();
        let next = *session.next_piece().unwrap();
        place(&mut session, piece_at(PieceKind::O, 0, 0, 18));

        assert!(!session.soft_drop());
        assert_eq!(session.board().filled_count(), 4);
        assert_eq!(*session.current_piece().unwrap(), next);
        assert!(session.next_piece().is_some());
        assert_eq!(session.stats().completed_pieces(), 1);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_quad_clear_scores_800_at_level_1() {
        let mut session = started();
        fill_with_gap(&mut session, 4, 0);
        place(&mut session, piece_at(PieceKind::I, 1, 0, 16));

        assert!(!session.soft_drop());
        assert_eq!(session.stats().score(), 800);
        assert_eq!(session.stats().total_cleared_lines(), 4);
        assert_eq!(session.board().filled_count(), 0);

        let events = session.drain_events();
        assert_eq!(
            events,
            vec![
                GameEvent::LinesCleared { count: 4 },
                GameEvent::ScoreChanged { score: 800 },
            ]
        );
        assert!(events[0].is_quad());
    }

    #[test]
    fn test_single_clear_at_level_3() {
        let mut session = started();
        session.stats = {
            let mut stats = GameStats::new();
            for _ in 0..5 {
                stats.complete_piece_drop(4, &session.config);
            }
            stats
        };
        assert_eq!(session.stats().level(), 3);
        let before = session.stats().score();

        fill_with_gap(&mut session, 1, 9);
        place(&mut session, piece_at(PieceKind::I, 1, 9, 16));
        assert!(!session.soft_drop());

        assert_eq!(session.stats().score() - before, 300);
    }

    #[test]
    fn test_ten_lines_reach_level_2() {
        let mut session = started();
        for _ in 0..2 {
            fill_with_gap(&mut session, 4, 0);
            place(&mut session, piece_at(PieceKind::I, 1, 0, 16));
            assert!(!session.soft_drop());
        }
        assert_eq!(session.stats().level(), 1);
        session.drain_events();

        fill_with_gap(&mut session, 2, 0);
        // Vertical bar in the gap column, two cells in the full rows.
        place(&mut session, piece_at(PieceKind::I, 1, 0, 16));
        assert!(!session.soft_drop());

        assert_eq!(session.stats().total_cleared_lines(), 10);
        assert_eq!(session.stats().level(), 2);
        assert_eq!(session.drop_interval(), Duration::from_millis(850));
        assert_eq!(
            session.drain_events(),
            vec![
                GameEvent::LinesCleared { count: 2 },
                GameEvent::ScoreChanged { score: 1900 },
                GameEvent::LevelChanged { level: 2 },
            ]
        );
    }

    #[test]
    fn test_huge_time_steps_saturate() {
        let mut session = started();
        session.advance_time(Duration::MAX);
        session.advance_time(Duration::MAX);
        assert_eq!(session.play_time(), Duration::MAX);
        assert!(session.is_running());
    }

    #[test]
    fn test_lock_above_top_then_blocked_spawn() {
        let mut session = started();
        for row in 1..BOARD_HEIGHT {
            for col in 4..6 {
                session.board.set_cell(col, row, Cell::Filled(PieceKind::S));
            }
        }
        // Top half of the square sticks out above the board.
        place(&mut session, piece_at(PieceKind::O, 0, 4, -1));

        assert!(!session.soft_drop());
        assert_eq!(session.board().filled_count(), 2 * (BOARD_HEIGHT - 1) + 2);
        assert!(session.is_game_over());
        assert!(session.drain_events().last().unwrap().is_game_over());
    }

    #[test]
    fn test_spawn_collision_ends_game() {
        let mut session = started();
        // Block the whole spawn area.
        for row in 0..2 {
            for col in 3..7 {
                session.board.set_cell(col, row, Cell::Filled(PieceKind::T));
            }
        }
        place(&mut session, piece_at(PieceKind::O, 0, 0, 18));

        assert!(!session.soft_drop());
        assert!(session.is_game_over());
        assert_eq!(
            session.drain_events().last(),
            Some(&GameEvent::GameOver {
                final_score: 0,
                final_level: 1,
            })
        );

        let frozen = session.snapshot();
        assert!(!session.move_left());
        assert!(!session.soft_drop());
        session.advance_time(Duration::from_secs(10));
        session.start();
        session.toggle_pause();
        assert_eq!(session.snapshot(), frozen);
        assert!(session.is_game_over());
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut session = started();
        fill_with_gap(&mut session, 1, 0);
        session.advance_time(Duration::from_millis(1500));
        session.reset();

        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.board(), &Board::EMPTY);
        assert!(session.current_piece().is_none());
        assert!(session.next_piece().is_none());
        assert_eq!(session.stats(), &GameStats::new());
        assert_eq!(session.drop_interval(), Duration::from_millis(1000));
        assert_eq!(session.play_time(), Duration::ZERO);

        let once = session.snapshot();
        session.reset();
        assert_eq!(session.snapshot(), once);
    }

    #[test]
    fn test_start_after_reset_begins_fresh() {
        let mut session = started();
        fill_with_gap(&mut session, 1, 0);
        session.reset();
        session.start();
        assert!(session.is_running());
        assert_eq!(session.board(), &Board::EMPTY);
        assert!(session.current_piece().is_some());
    }
}
