use std::time::Duration;

use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// Trait for TUI applications.
///
/// Applications executed by `Tui::run()` must implement this trait.
pub trait App {
    /// Initializes the application.
    ///
    /// Called at the start of `Tui::run()`. Use this to configure the tick rate and render mode.
    fn init(&mut self, tui: &mut Tui);

    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, mouse, resize, etc.).
    fn handle_event(&mut self, tui: &mut Tui, event: Event);

    /// Draws the screen (called on each render event).
    fn draw(&self, frame: &mut Frame);

    /// Advances application state by the wall time since the previous tick.
    fn update(&mut self, tui: &mut Tui, elapsed: Duration);
}
