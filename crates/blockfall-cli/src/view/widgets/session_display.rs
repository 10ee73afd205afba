use blockfall_engine::GameSnapshot;
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use super::{BoardDisplay, PieceDisplay, SessionStatsDisplay, color, style};

/// Whole game screen: stats on the left, board in the middle, next piece on
/// the right, and a banner over the board when not running.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    snapshot: &'a GameSnapshot,
    message: Option<&'a str>,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(snapshot: &'a GameSnapshot) -> Self {
        Self {
            snapshot,
            message: None,
        }
    }

    /// Sets a short status message shown under the next piece.
    pub fn message(self, message: Option<&'a str>) -> Self {
        Self { message, ..self }
    }

    fn border_color(&self) -> Color {
        let snapshot = self.snapshot;
        if snapshot.game_over {
            color::RED
        } else if snapshot.paused {
            color::YELLOW
        } else if snapshot.running {
            color::WHITE
        } else {
            color::GRAY
        }
    }

    fn banner(&self) -> Option<(&'static str, Style)> {
        let snapshot = self.snapshot;
        if snapshot.game_over {
            Some(("GAME OVER!!", Style::new().fg(color::WHITE).bg(color::RED)))
        } else if snapshot.paused {
            Some(("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW)))
        } else if snapshot.running {
            None
        } else {
            Some(("PRESS ENTER", Style::new().fg(color::BLACK).bg(color::WHITE)))
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = self.border_color();
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(Padding::horizontal(1))
                .border_style(border_color)
                .style(style::DEFAULT)
        };

        let game_board = BoardDisplay::new(self.snapshot).block(
            Block::bordered()
                .border_style(border_color)
                .style(style::DEFAULT),
        );
        let next_panel = PieceDisplay::new(self.snapshot.next.as_ref()).block(panel("NEXT"));
        let session_stats = SessionStatsDisplay::new(self.snapshot).block(panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area, message_area] = Layout::vertical([
            Constraint::Length(next_panel.height()),
            Constraint::Length(1),
        ])
        .spacing(1)
        .areas(right_column);

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        if let Some(message) = self.message {
            Line::styled(message, Style::new().fg(color::YELLOW))
                .centered()
                .render(message_area, buf);
        }

        if let Some((text, style)) = self.banner() {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
