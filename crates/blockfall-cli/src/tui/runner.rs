use std::{io, time::Duration};

use crate::tui::{
    App,
    event::TuiEvent,
    event_loop::{EventLoop, RenderMode},
};

/// TUI application runtime.
///
/// Owns the event loop and the terminal, and drives an [`App`] until it asks
/// to exit.
#[derive(Default, Debug)]
pub struct Tui {
    events: EventLoop,
}

impl Tui {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tick interval; `None` disables ticks.
    pub fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.events.set_tick_interval(interval);
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Runs the application.
    ///
    /// 1. Calls `app.init()` for initialization
    /// 2. Runs the event loop until `app.should_exit()` returns true
    ///    - `Tick`: calls `app.update()` with the elapsed time
    ///    - `Render`: calls `app.draw()`
    ///    - `Crossterm`: calls `app.handle_event()`
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick(elapsed) => {
                        app.update(&mut self, elapsed);
                    }
                    TuiEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    TuiEvent::Crossterm(event) => {
                        app.handle_event(&mut self, event);
                    }
                }
            }
            Ok(())
        })
    }
}
