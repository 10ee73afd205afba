use std::time::Duration;

use blockfall_engine::{GameEvent, GameSession, SessionState};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::view::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay};

const MESSAGE_DURATION: Duration = Duration::from_secs(2);

const IDLE_KEYS: &[KeyBinding] = &[(&["Enter", "S"], "Start"), (&["Q"], "Quit")];
const RUNNING_KEYS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["↑", "Space"], "Rotate"),
    (&["P"], "Pause"),
    (&["R"], "Reset"),
    (&["Q"], "Quit"),
];
const PAUSED_KEYS: &[KeyBinding] = &[
    (&["P", "Enter"], "Resume"),
    (&["R"], "Reset"),
    (&["Q"], "Quit"),
];
const GAME_OVER_KEYS: &[KeyBinding] = &[(&["R"], "Reset"), (&["Q"], "Quit")];

#[derive(Debug)]
pub struct PlayScreen {
    session: GameSession,
    message: Option<(String, Duration)>,
    is_exiting: bool,
}

impl PlayScreen {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            message: None,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let snapshot = self.session.snapshot();
        let message = self.message.as_ref().map(|(text, _)| text.as_str());
        let session_display = SessionDisplay::new(&snapshot).message(message);

        let bindings = match self.session.state() {
            SessionState::Idle => IDLE_KEYS,
            SessionState::Running => RUNNING_KEYS,
            SessionState::Paused => PAUSED_KEYS,
            SessionState::GameOver => GAME_OVER_KEYS,
        };

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(23), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }

    pub fn handle_event(&mut self, event: &Event) {
        let Event::Key(key_event) = event else {
            return;
        };
        if key_event.kind != KeyEventKind::Press {
            return;
        }
        match key_event.code {
            KeyCode::Left => _ = self.session.move_left(),
            KeyCode::Right => _ = self.session.move_right(),
            KeyCode::Down => _ = self.session.soft_drop(),
            KeyCode::Up | KeyCode::Char(' ') => _ = self.session.rotate(),
            KeyCode::Enter | KeyCode::Char('s' | 'S') => self.session.start(),
            KeyCode::Char('p' | 'P') => self.session.toggle_pause(),
            KeyCode::Char('r' | 'R') => {
                self.session.reset();
                self.message = None;
            }
            KeyCode::Char('q' | 'Q') => self.is_exiting = true,
            _ => {}
        }
        self.collect_events();
    }

    pub fn update(&mut self, elapsed: Duration) {
        self.session.advance_time(elapsed);
        if let Some((_, remaining)) = &mut self.message {
            *remaining = remaining.saturating_sub(elapsed);
            if remaining.is_zero() {
                self.message = None;
            }
        }
        self.collect_events();
    }

    fn collect_events(&mut self) {
        for event in self.session.drain_events() {
            let text = match event {
                GameEvent::LinesCleared { .. } if event.is_quad() => "QUAD!".to_owned(),
                GameEvent::LinesCleared { count: 1 } => "1 LINE".to_owned(),
                GameEvent::LinesCleared { count } => format!("{count} LINES"),
                GameEvent::LevelChanged { level } => format!("LEVEL {level}"),
                GameEvent::Moved { .. }
                | GameEvent::Rotated { .. }
                | GameEvent::ScoreChanged { .. }
                | GameEvent::GameOver { .. } => continue,
            };
            self.message = Some((text, MESSAGE_DURATION));
        }
    }
}
