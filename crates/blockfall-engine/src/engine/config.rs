use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing and scoring constants of a session.
///
/// The defaults are the standard rules: 1000 ms per row at level 1, 15%
/// faster per level with a 50 ms floor, a level every 10 lines, and
/// 100/300/500/800 points for 1–4 lines (times the level).
///
/// Every field is optional when deserializing; missing fields take their
/// default value.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameConfig;
///
/// let config: GameConfig = serde_json::from_str(r#"{ "lines_per_level": 5 }"#).unwrap();
/// assert_eq!(config.lines_per_level, 5);
/// assert_eq!(config.base_drop_interval_ms, 1000.0);
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Drop interval at level 1, in milliseconds.
    pub base_drop_interval_ms: f64,
    /// Factor applied to the drop interval per level above 1.
    pub drop_interval_decay: f64,
    /// Lower bound of the drop interval, in milliseconds.
    pub min_drop_interval_ms: f64,
    /// Lines needed per level.
    pub lines_per_level: usize,
    /// Points for clearing 0, 1, 2, 3, and 4 lines at once, before the
    /// level multiplier.
    pub line_clear_points: [usize; 5],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_drop_interval_ms: 1000.0,
            drop_interval_decay: 0.85,
            min_drop_interval_ms: 50.0,
            lines_per_level: 10,
            line_clear_points: [0, 100, 300, 500, 800],
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("base_drop_interval_ms must be positive, got {_0}")]
    NonPositiveBaseInterval(#[error(not(source))] f64),
    #[display("min_drop_interval_ms must be positive, got {_0}")]
    NonPositiveMinInterval(#[error(not(source))] f64),
    #[display("min_drop_interval_ms ({min}) exceeds base_drop_interval_ms ({base})")]
    MinAboveBase { min: f64, base: f64 },
    #[display("drop_interval_decay must be in (0, 1], got {_0}")]
    DecayOutOfRange(#[error(not(source))] f64),
    #[display("lines_per_level must be at least 1")]
    ZeroLinesPerLevel,
}

impl GameConfig {
    /// Checks that the constants describe a playable progression.
    #[expect(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.base_drop_interval_ms;
        let min = self.min_drop_interval_ms;
        // NaN must fail every check below.
        if !(base > 0.0) {
            return Err(ConfigError::NonPositiveBaseInterval(base));
        }
        if !(min > 0.0) {
            return Err(ConfigError::NonPositiveMinInterval(min));
        }
        if min > base {
            return Err(ConfigError::MinAboveBase { min, base });
        }
        if !(self.drop_interval_decay > 0.0 && self.drop_interval_decay <= 1.0) {
            return Err(ConfigError::DecayOutOfRange(self.drop_interval_decay));
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        Ok(())
    }

    /// Level reached after clearing `total_lines` lines (1-based).
    #[must_use]
    pub fn level_for_lines(&self, total_lines: usize) -> usize {
        total_lines / self.lines_per_level.max(1) + 1
    }

    /// Points for clearing `lines` lines at once at `level`.
    ///
    /// Counts above four are scored as four. Saturates at `usize::MAX`.
    #[must_use]
    pub fn points_for(&self, lines: usize, level: usize) -> usize {
        let index = lines.min(self.line_clear_points.len() - 1);
        self.line_clear_points[index].saturating_mul(level)
    }

    /// Drop interval at `level`: `max(min, base * decay^(level - 1))`.
    #[must_use]
    pub fn drop_interval(&self, level: usize) -> Duration {
        let exponent = i32::try_from(level.saturating_sub(1)).unwrap_or(i32::MAX);
        let millis = (self.base_drop_interval_ms * self.drop_interval_decay.powi(exponent))
            .max(self.min_drop_interval_ms);
        millis_to_duration(millis)
    }
}

/// Converts fractional milliseconds to a `Duration`, rounded to the
/// microsecond.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn millis_to_duration(millis: f64) -> Duration {
    Duration::from_micros((millis * 1000.0).round().max(0.0) as u64)
}
