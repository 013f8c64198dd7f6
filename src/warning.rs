use crate::command::Command;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect, Size},
    text::{Line, Text},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};
use std::borrow::Cow;

/// A pop-up describing an error and its causes, shown on top of whatever
/// else is on screen until the user dismisses it
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Warning {
    lines: Vec<String>,
}

impl Warning {
    const MAX_LINES: u16 = 16;
    const TEXT_WIDTH: u16 = 48;
    const WIDTH: u16 = Self::TEXT_WIDTH + 4;

    pub(crate) fn handle_command(cmd: Command) -> Option<WarningOutcome> {
        match cmd {
            Command::Enter | Command::Esc => Some(WarningOutcome::Dismissed),
            Command::Quit => Some(WarningOutcome::Quit),
            _ => None,
        }
    }

    fn from_error_messages(msgs: Vec<String>) -> Self {
        let mut lines = Vec::new();
        let mut msgs = msgs.into_iter();
        if let Some(first) = msgs.next() {
            let opts = textwrap::Options::new(usize::from(Warning::TEXT_WIDTH)).break_words(true);
            lines.extend(textwrap::wrap(&first, opts).into_iter().map(Cow::into_owned));
        }
        let causes = msgs.collect::<Vec<_>>();
        if !causes.is_empty() {
            lines.push(String::new());
            lines.push(String::from("Caused by:"));
            for m in causes {
                let opts = textwrap::Options::new(usize::from(Warning::TEXT_WIDTH))
                    .break_words(true)
                    .initial_indent("    ")
                    .subsequent_indent("    ");
                lines.extend(textwrap::wrap(&m, opts).into_iter().map(Cow::into_owned));
            }
        }
        if lines.len() > usize::from(Warning::MAX_LINES) {
            lines.truncate(usize::from(Warning::MAX_LINES) - 1);
            lines.push(String::from("…"));
        }
        Warning { lines }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WarningOutcome {
    Dismissed,
    Quit,
}

impl<E: std::error::Error> From<E> for Warning {
    fn from(e: E) -> Warning {
        Warning::from_error_messages(error_chain(&e))
    }
}

/// Return the messages for an error and each of its sources in turn
pub(crate) fn error_chain(e: &dyn std::error::Error) -> Vec<String> {
    let mut msgs = vec![e.to_string()];
    let mut source = e.source();
    while let Some(src) = source {
        msgs.push(src.to_string());
        source = src.source();
    }
    msgs
}

impl Widget for &Warning {
    // `area` is here the area of the entire display in which the program is
    // drawing, not the area for just the widget proper.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = u16::try_from(self.lines.len())
            .unwrap_or(u16::MAX)
            .saturating_add(4);
        let block_area = center_rect(
            area,
            Size {
                width: Warning::WIDTH,
                height,
            },
        );
        let block = Block::bordered()
            .title(" WARNING ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let [text_area, ok_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
            .flex(Flex::Start)
            .spacing(1)
            .areas(block.inner(block_area));
        Clear.render(block_area, buf);
        block.render(block_area, buf);
        Text::from_iter(self.lines.iter().map(String::as_str)).render(text_area, buf);
        Line::from("[OK]").centered().render(ok_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("Failed to save high score")]
    struct Outer(#[source] Inner);

    #[derive(Debug, Error)]
    #[error("failed to write scores file")]
    struct Inner(#[source] std::io::Error);

    #[test]
    fn chain_follows_sources() {
        let e = Outer(Inner(std::io::Error::other("disk full")));
        assert_eq!(
            error_chain(&e),
            [
                "Failed to save high score",
                "failed to write scores file",
                "disk full"
            ]
        );
    }

    #[test]
    fn render_no_cause() {
        let warning = Warning::from_error_messages(vec![String::from("Terminal broke")]);
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        warning.render(area, &mut buffer);
        let mut expected = Buffer::empty(area);
        for (y, line) in (9..).zip([
            "┌──────────────────── WARNING ─────────────────────┐",
            "│ Terminal broke                                   │",
            "│                                                  │",
            "│                       [OK]                       │",
            "└──────────────────────────────────────────────────┘",
        ]) {
            expected.set_string(14, y, line, ratatui::style::Style::new());
        }
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn render_with_causes() {
        let e = Outer(Inner(std::io::Error::other("disk full")));
        let warning = Warning::from(e);
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        warning.render(area, &mut buffer);
        let mut expected = Buffer::empty(area);
        for (y, line) in (7..).zip([
            "┌──────────────────── WARNING ─────────────────────┐",
            "│ Failed to save high score                        │",
            "│                                                  │",
            "│ Caused by:                                       │",
            "│     failed to write scores file                  │",
            "│     disk full                                    │",
            "│                                                  │",
            "│                       [OK]                       │",
            "└──────────────────────────────────────────────────┘",
        ]) {
            expected.set_string(14, y, line, ratatui::style::Style::new());
        }
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn long_messages_truncated() {
        let msgs = (0..30).map(|i| format!("cause {i}")).collect::<Vec<_>>();
        let warning = Warning::from_error_messages(msgs);
        assert_eq!(warning.lines.len(), usize::from(Warning::MAX_LINES));
        assert_eq!(warning.lines.last().map(String::as_str), Some("…"));
    }

    #[test]
    fn commands() {
        assert_eq!(
            Warning::handle_command(Command::Enter),
            Some(WarningOutcome::Dismissed)
        );
        assert_eq!(
            Warning::handle_command(Command::Quit),
            Some(WarningOutcome::Quit)
        );
        assert_eq!(Warning::handle_command(Command::Up), None);
    }
}
