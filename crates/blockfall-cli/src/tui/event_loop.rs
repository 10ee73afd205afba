use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Rendering trigger mode.
#[derive(Debug, Clone, Copy, Default)]
pub enum RenderMode {
    /// Render after state changes (tick or crossterm event).
    #[default]
    OnDirty,
    /// Render after state changes, but at most once per interval.
    Throttled(Duration),
}

/// Event loop state management.
///
/// Manages tick/render intervals and returns the next event via `next()`.
/// If the tick interval is not set, no tick events are generated.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub fn new() -> Self {
        let now = Instant::now();
        // Render right away; ticks measure from startup.
        let past_time = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            last_tick: now,
            last_render: past_time,
            dirty: true,
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
        self.last_tick = Instant::now();
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Returns the next event.
    ///
    /// Blocks until a tick/render time is reached or a crossterm event occurs.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(tick_interval) = self.tick_interval
                && now.duration_since(self.last_tick) >= tick_interval
            {
                let elapsed = now.duration_since(self.last_tick);
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick(elapsed));
            }

            let do_render = match self.render_mode {
                RenderMode::OnDirty => self.dirty,
                RenderMode::Throttled(interval) => {
                    self.dirty && now.duration_since(self.last_render) >= interval
                }
            };
            if do_render {
                self.last_render = now;
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.tick_interval.map(|interval| self.last_tick + interval);
        let next_render_at = match self.render_mode {
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let next_timeout_at = [next_tick_at, next_render_at].into_iter().flatten().min()?;
        Some(next_timeout_at.saturating_duration_since(now))
    }
}
