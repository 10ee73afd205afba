use super::config::GameConfig;

/// Game statistics tracking score, lines, and level.
///
/// - **Score**: line clear points, multiplied by the level at the time of
///   the clear
/// - **Level**: starts at 1, one more per `lines_per_level` lines, never
///   decreases
/// - **Completed pieces**: total number of pieces locked
/// - **Line clear distribution**: how many locks cleared 0, 1, 2, 3, or 4
///   lines
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameConfig, GameStats};
///
/// let config = GameConfig::default();
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4, &config); // four lines at level 1
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    level: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

/// What a single lock changed in the statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropOutcome {
    pub cleared_lines: usize,
    pub points: usize,
    pub level_changed: bool,
}

impl GameStats {
    /// Creates a new tracker: score 0, no lines, level 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by number of lines cleared.
    ///
    /// Index `n` counts the locks that cleared `n` lines; counts above four
    /// are recorded at index 4.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece locks and `cleared_lines` rows were
    /// removed.
    ///
    /// Points use the level in effect before this clear; the level is then
    /// recomputed from the new line total.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize, config: &GameConfig) -> DropOutcome {
        self.completed_pieces += 1;
        let bucket = cleared_lines.min(self.line_cleared_counter.len() - 1);
        self.line_cleared_counter[bucket] += 1;

        if cleared_lines == 0 {
            return DropOutcome {
                cleared_lines,
                points: 0,
                level_changed: false,
            };
        }

        let points = config.points_for(cleared_lines, self.level);
        self.score = self.score.saturating_add(points);
        self.total_cleared_lines += cleared_lines;

        let new_level = config.level_for_lines(self.total_cleared_lines);
        let level_changed = new_level > self.level;
        if level_changed {
            self.level = new_level;
        }

        DropOutcome {
            cleared_lines,
            points,
            level_changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_stats() {
        let stats = GameStats::new();
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.total_cleared_lines(), 0);
        assert_eq!(stats.completed_pieces(), 0);
    }

    #[test]
    fn test_no_clear_scores_nothing() {
        let config = GameConfig::default();
        let mut stats = GameStats::new();
        let outcome = stats.complete_piece_drop(0, &config);
        assert_eq!(outcome.points, 0);
        assert!(!outcome.level_changed);
        assert_eq!(stats.completed_pieces(), 1);
        assert_eq!(stats.line_cleared_counter()[0], 1);
    }

    #[test]
    fn test_score_multiplied_by_level() {
        let config = GameConfig::default();
        let mut stats = GameStats::new();
        // Reach level 3 with 20 lines.
        for _ in 0..5 {
            stats.complete_piece_drop(4, &config);
        }
        assert_eq!(stats.level(), 3);

        let before = stats.score();
        let outcome = stats.complete_piece_drop(1, &config);
        assert_eq!(outcome.points, 300);
        assert_eq!(stats.score() - before, 300);
    }

    #[test]
    fn test_level_up_at_ten_lines() {
        let config = GameConfig::default();
        let mut stats = GameStats::new();
        for _ in 0..9 {
            let outcome = stats.complete_piece_drop(1, &config);
            assert!(!outcome.level_changed);
        }
        assert_eq!(stats.level(), 1);

        let outcome = stats.complete_piece_drop(1, &config);
        assert!(outcome.level_changed);
        assert_eq!(stats.level(), 2);
        assert_eq!(stats.total_cleared_lines(), 10);
    }

    #[test]
    fn test_points_use_level_before_update() {
        let config = GameConfig::default();
        let mut stats = GameStats::new();
        for _ in 0..2 {
            stats.complete_piece_drop(4, &config);
        }
        assert_eq!(stats.score(), 1600);
        assert_eq!(stats.level(), 1);
        // 8 → 12 lines: scored at level 1, then level 2.
        let outcome = stats.complete_piece_drop(4, &config);
        assert_eq!(outcome.points, 800);
        assert!(outcome.level_changed);
        assert_eq!(stats.level(), 2);
    }

    #[test]
    fn test_huge_points_saturate() {
        let config = GameConfig {
            line_clear_points: [0, usize::MAX, usize::MAX, usize::MAX, usize::MAX],
            ..GameConfig::default()
        };
        assert_eq!(config.points_for(1, 3), usize::MAX);

        let mut stats = GameStats::new();
        stats.complete_piece_drop(1, &config);
        stats.complete_piece_drop(4, &config);
        assert_eq!(stats.score(), usize::MAX);
    }
}
