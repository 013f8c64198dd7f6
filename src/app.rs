use crate::command::Command;
use crate::game::Game;
use crate::util::get_display_area;
use crate::warning::{Warning, WarningOutcome};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{backend::Backend, buffer::Buffer, layout::Rect, widgets::Widget, Terminal};
use std::collections::VecDeque;
use std::io;
use std::ops::ControlFlow;
use std::time::Instant;

/// The terminal interface: draws the game, feeds it key presses and timer
/// ticks, and shows any warnings on top of it one at a time
#[derive(Clone, Debug)]
pub(crate) struct App<R = rand::rngs::ThreadRng> {
    game: Game<R>,
    warnings: VecDeque<Warning>,
    quitting: bool,
}

impl<R: Rng> App<R> {
    pub(crate) fn new(game: Game<R>) -> App<R> {
        App {
            game,
            warnings: VecDeque::new(),
            quitting: false,
        }
    }

    /// Queue a warning to show before anything else
    pub(crate) fn warn(&mut self, warning: Warning) {
        self.warnings.push_back(warning);
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting {
            terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
            self.process_input()?;
        }
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        if let Some(when) = self.game.deadline() {
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.game.on_timer(Instant::now());
                self.collect_warnings();
                return Ok(());
            }
        }
        let event = read()?;
        self.handle_event(event, Instant::now());
        Ok(())
    }

    fn handle_event(&mut self, event: Event, now: Instant) {
        if !self.warnings.is_empty() {
            if event == Event::FocusLost {
                let _ = self.game.handle_event(event, now);
                return;
            }
            match event
                .as_key_press_event()
                .and_then(Command::from_key_event)
                .and_then(Warning::handle_command)
            {
                Some(WarningOutcome::Dismissed) => {
                    let _ = self.warnings.pop_front();
                }
                Some(WarningOutcome::Quit) => self.quitting = true,
                None => (),
            }
        } else if self.game.handle_event(event, now) == ControlFlow::Break(()) {
            self.quitting = true;
        } else {
            self.collect_warnings();
        }
    }

    fn collect_warnings(&mut self) {
        self.warnings.extend(self.game.take_warnings());
    }
}

impl<R> Widget for &App<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.game.render(area, buf);
        if let Some(warning) = self.warnings.front() {
            warning.render(get_display_area(area), buf);
        }
    }
}
