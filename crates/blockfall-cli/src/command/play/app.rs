use std::time::Duration;

use blockfall_engine::{GameSession, GameStats};
use crossterm::event::Event;
use ratatui::Frame;

use crate::{
    command::play::screen::PlayScreen,
    tui::{App, RenderMode, Tui},
};

#[derive(Debug)]
pub struct PlayApp {
    screen: PlayScreen,
    frame_interval: Duration,
}

impl PlayApp {
    pub fn new(session: GameSession, frame_interval: Duration) -> Self {
        Self {
            screen: PlayScreen::new(session),
            frame_interval,
        }
    }

    /// Statistics of the last game played.
    pub fn summary(&self) -> &GameStats {
        self.screen.session().stats()
    }

    pub fn play_time(&self) -> Duration {
        self.screen.session().play_time()
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_interval(Some(self.frame_interval));
        tui.set_render_mode(RenderMode::Throttled(self.frame_interval));
    }

    fn should_exit(&self) -> bool {
        self.screen.is_exiting()
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        self.screen.handle_event(&event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, _tui: &mut Tui, elapsed: Duration) {
        self.screen.update(elapsed);
    }
}
