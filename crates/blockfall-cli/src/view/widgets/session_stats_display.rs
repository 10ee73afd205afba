use std::iter;

use blockfall_engine::GameSnapshot;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::style;

pub struct SessionStatsDisplay<'a> {
    snapshot: &'a GameSnapshot,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub fn new(snapshot: &'a GameSnapshot) -> Self {
        Self {
            snapshot,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        ROWS.len() as u16 + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(fn(&GameSnapshot) -> String),
    LabelValue(&'static str, fn(&GameSnapshot) -> String),
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(|snapshot| snapshot.score.to_string()),
    Row::FullLabel("TIME:"),
    Row::FullValue(|snapshot| format_play_time(snapshot.play_time_ms)),
    Row::Empty,
    Row::LabelValue("LEVEL:", |snapshot| snapshot.level.to_string()),
    Row::LabelValue("LINES:", |snapshot| snapshot.lines.to_string()),
    Row::LabelValue("SPEED:", |snapshot| {
        format!("{}ms", snapshot.drop_interval_ms)
    }),
];

fn format_play_time(millis: u64) -> String {
    let secs = millis / 1000;
    format!("{}:{:0>2}.{:0>2}", secs / 60, secs % 60, (millis % 1000) / 10)
}

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.snapshot), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.snapshot), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_play_time() {
        assert_eq!(format_play_time(0), "0:00.00");
        assert_eq!(format_play_time(61_230), "1:01.23");
        assert_eq!(format_play_time(600_009), "10:00.00");
    }
}
