use serde::Serialize;

/// Notifications queued by [`GameSession`](super::GameSession) for
/// collaborators such as a sound layer or a status line.
///
/// The session never acts on these itself; drivers collect them with
/// [`GameSession::drain_events`](super::GameSession::drain_events).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A sideways move was attempted.
    Moved { succeeded: bool },
    /// A rotation was attempted.
    Rotated { succeeded: bool },
    /// A lock removed `count` full rows.
    LinesCleared { count: usize },
    /// The score changed to `score`.
    ScoreChanged { score: usize },
    /// The level rose to `level`.
    LevelChanged { level: usize },
    /// The next piece could not spawn; the session is over.
    GameOver {
        final_score: usize,
        final_level: usize,
    },
}

impl GameEvent {
    /// Returns whether this is a four-line clear.
    #[must_use]
    pub fn is_quad(&self) -> bool {
        matches!(self, GameEvent::LinesCleared { count } if *count >= 4)
    }
}
