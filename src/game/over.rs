use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// The pop-up shown when a run ends, until the player dismisses it
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct GameOver {
    pub(super) score: u32,
    pub(super) high_score: u32,
    /// Did this run set a new high score?
    pub(super) new_record: bool,
}

impl GameOver {
    pub(super) const SIZE: Size = Size {
        width: 24,
        height: 7,
    };

    const LABEL_WIDTH: usize = 12;
    const VALUE_WIDTH: usize = 8;
}

impl Widget for GameOver {
    /*
     * ┌───── GAME OVER ──────┐
     * │ Score:            30 │
     * │ High Score:       30 │
     * │   New high score!    │
     * │                      │
     * │     [OK (Enter)]     │
     * └──────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" GAME OVER ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        let mut rows = inner.rows();
        for (label, value) in [("Score:", self.score), ("High Score:", self.high_score)] {
            if let Some(row) = rows.next() {
                Line::raw(format!(
                    "{label:lwidth$}{value:>vwidth$}",
                    lwidth = Self::LABEL_WIDTH,
                    vwidth = Self::VALUE_WIDTH,
                ))
                .render(row, buf);
            }
        }
        if let Some(row) = rows.next() {
            if self.new_record {
                Line::styled("New high score!", consts::KEY_STYLE)
                    .centered()
                    .render(row, buf);
            }
        }
        if let Some(row) = rows.nth(1) {
            Line::from_iter([
                Span::raw("[OK ("),
                Span::styled("Enter", consts::KEY_STYLE),
                Span::raw(")]"),
            ])
            .centered()
            .render(row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_new_record() {
        let area = Rect::new(0, 0, 24, 7);
        let mut buffer = Buffer::empty(area);
        GameOver {
            score: 30,
            high_score: 30,
            new_record: true,
        }
        .render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "┌───── GAME OVER ──────┐",
            "│ Score:            30 │",
            "│ High Score:       30 │",
            "│   New high score!    │",
            "│                      │",
            "│     [OK (Enter)]     │",
            "└──────────────────────┘",
        ]);
        expected.set_style(Rect::new(2, 3, 20, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(11, 5, 5, 1), consts::KEY_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn render_no_record() {
        let area = Rect::new(0, 0, 24, 7);
        let mut buffer = Buffer::empty(area);
        GameOver {
            score: 120,
            high_score: 4750,
            new_record: false,
        }
        .render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "┌───── GAME OVER ──────┐",
            "│ Score:           120 │",
            "│ High Score:     4750 │",
            "│                      │",
            "│                      │",
            "│     [OK (Enter)]     │",
            "└──────────────────────┘",
        ]);
        expected.set_style(Rect::new(11, 5, 5, 1), consts::KEY_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }
}
