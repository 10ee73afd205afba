use std::time::Duration;

use crossterm::event::Event as CrosstermEvent;

/// Events processed by TUI applications.
#[derive(Debug, Clone, derive_more::From)]
pub(super) enum TuiEvent {
    /// Tick carrying the wall time elapsed since the previous tick.
    #[from(skip)]
    Tick(Duration),
    /// Screen render timing.
    #[from(skip)]
    Render,
    /// Terminal events such as key input, mouse, and resize.
    Crossterm(CrosstermEvent),
}
