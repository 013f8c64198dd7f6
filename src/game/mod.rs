mod direction;
mod food;
mod grid;
mod input;
mod over;
mod paused;
mod snake;
mod state;
mod ticker;
pub(crate) use self::grid::Grid;
use self::grid::Cell;
use self::input::Intent;
use self::over::GameOver;
use self::paused::{PauseOpt, Paused};
use self::state::{Crash, GameState, Sprite, Step};
use self::ticker::Ticker;
use crate::command::Command;
use crate::consts;
use crate::highscore::ScoreFile;
use crate::util::{center_rect, get_display_area};
use crate::warning::Warning;
use crossterm::event::Event;
use log::{debug, info, warn};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};
use std::ops::ControlFlow;
use std::time::Instant;

/// The game controller: owns the state of the current run, the tick timer,
/// and the high score, and turns player commands and timer ticks into state
/// transitions.
#[derive(Clone, Debug)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    grid: Grid,
    state: GameState,
    run: RunState,
    ticker: Ticker,
    high_score: u32,
    /// Where to persist the high score; `None` if it's kept in memory only
    scores: Option<ScoreFile>,
    /// Problems that the interface should show to the player
    warnings: Vec<Warning>,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(scores: Option<ScoreFile>, high_score: u32) -> Self {
        Game::new_with_rng(Grid::default(), scores, high_score, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(
        grid: Grid,
        scores: Option<ScoreFile>,
        high_score: u32,
        mut rng: R,
    ) -> Game<R> {
        let state = GameState::new(grid, &mut rng);
        Game {
            ticker: Ticker::new(state.speed()),
            rng,
            grid,
            state,
            run: RunState::Idle,
            high_score,
            scores,
            warnings: Vec::new(),
        }
    }

    /// Begin a run.  From a fresh game this just starts the clock; from a
    /// finished game whose summary has been dismissed, a new run is set up
    /// first.  Otherwise this does nothing.
    pub(crate) fn start(&mut self, now: Instant) {
        match self.run {
            RunState::Idle => {
                info!("Starting run");
                self.run = RunState::Running;
                self.ticker.reschedule(self.state.speed(), now);
            }
            RunState::Ended(None) => {
                self.reset();
                self.start(now);
            }
            _ => (),
        }
    }

    /// Throw away the current run and set up a fresh one, waiting to be
    /// started
    pub(crate) fn reset(&mut self) {
        info!("Resetting game");
        self.ticker.cancel();
        self.state = GameState::new(self.grid, &mut self.rng);
        self.run = RunState::Idle;
    }

    /// Advance the run by one tick.  Does nothing unless the game is running.
    pub(crate) fn tick(&mut self, now: Instant) {
        if !self.running() {
            return;
        }
        match self.state.step(self.grid, &mut self.rng) {
            Step::Moved => (),
            Step::Ate { level_up } => {
                debug!(
                    "Food eaten at {}; score is now {}",
                    self.state.snake.head(),
                    self.state.score()
                );
                if level_up {
                    debug!(
                        "Reached level {}; ticking every {:?}",
                        self.state.level(),
                        self.state.speed()
                    );
                    self.ticker.reschedule(self.state.speed(), now);
                }
            }
            Step::Crashed(crash) => self.end(crash),
        }
    }

    /// Deliver a tick if one is due at `now`
    pub(crate) fn on_timer(&mut self, now: Instant) {
        if self.ticker.fire(now) {
            self.tick(now);
        }
    }

    pub(crate) fn handle_event(&mut self, event: Event, now: Instant) -> ControlFlow<()> {
        if event == Event::FocusLost {
            self.pause();
            return ControlFlow::Continue(());
        }
        event
            .as_key_press_event()
            .and_then(Command::from_key_event)
            .map_or(ControlFlow::Continue(()), |cmd| self.handle_command(cmd, now))
    }

    fn handle_command(&mut self, cmd: Command, now: Instant) -> ControlFlow<()> {
        match self.run {
            RunState::Paused(ref mut menu) => match menu.handle_command(cmd) {
                Some(PauseOpt::Resume) => self.toggle_pause(now),
                Some(PauseOpt::Reset) => self.reset(),
                Some(PauseOpt::Quit) => return ControlFlow::Break(()),
                None => (),
            },
            RunState::Ended(Some(_)) => match cmd {
                Command::Enter | Command::Esc => self.acknowledge_game_over(),
                Command::Quit | Command::Q => return ControlFlow::Break(()),
                _ => (),
            },
            RunState::Idle | RunState::Running | RunState::Ended(None) => match cmd {
                Command::Quit | Command::Q => return ControlFlow::Break(()),
                Command::Enter => self.start(now),
                Command::R => self.reset(),
                cmd => {
                    if let Some(intent) = Intent::from_command(cmd) {
                        self.apply(intent, now);
                    }
                }
            },
        }
        ControlFlow::Continue(())
    }

    fn apply(&mut self, intent: Intent, now: Instant) {
        match intent {
            Intent::Turn(direction) => {
                if matches!(self.run, RunState::Idle | RunState::Running)
                    && !self.state.steer(direction)
                {
                    debug!("Ignoring turn {direction:?} along the current axis");
                }
            }
            Intent::TogglePause => self.toggle_pause(now),
        }
    }

    fn end(&mut self, crash: Crash) {
        self.ticker.cancel();
        let score = self.state.score();
        info!(
            "Run over: snake {crash} at {} with length {} and score {score}",
            self.state.snake.head(),
            self.state.snake.len(),
        );
        let new_record = score > self.high_score;
        if new_record {
            info!("New high score: {score}");
            self.high_score = score;
            if let Some(ref scores) = self.scores {
                if let Err(e) = scores.save(score) {
                    warn!("Failed to save high score: {e}");
                    self.warnings.push(Warning::from(e));
                }
            }
        }
        self.run = RunState::Ended(Some(GameOver {
            score,
            high_score: self.high_score,
            new_record,
        }));
    }
}

impl<R> Game<R> {
    /// Pause a running game or resume a paused one
    pub(crate) fn toggle_pause(&mut self, now: Instant) {
        match self.run {
            RunState::Running => self.pause(),
            RunState::Paused(_) => {
                info!("Resuming run");
                self.run = RunState::Running;
                self.ticker.reschedule(self.state.speed(), now);
            }
            _ => (),
        }
    }

    fn pause(&mut self) {
        if self.running() {
            info!("Pausing run");
            self.ticker.cancel();
            self.run = RunState::Paused(Paused::new());
        }
    }

    /// Dismiss the end-of-run summary.  The finished run stays on screen
    /// until the next one is started.
    pub(crate) fn acknowledge_game_over(&mut self) {
        if matches!(self.run, RunState::Ended(Some(_))) {
            self.run = RunState::Ended(None);
        }
    }

    /// When the next tick is due, if the game is running
    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.ticker.deadline()
    }

    pub(crate) fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    fn running(&self) -> bool {
        self.run == RunState::Running
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, board_area, controls_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(
            format!(
                " Score: {}  Level: {}  High Score: {}",
                self.state.score(),
                self.state.level(),
                self.high_score
            ),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let side = self.grid.size();
        let block_size = Size {
            width: side.saturating_mul(consts::CELL_WIDTH).saturating_add(2),
            height: side.saturating_add(2),
        };
        let block_area = center_rect(board_area, block_size);
        Block::bordered().render(block_area, buf);
        let mut canvas = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        let crashed = matches!(self.run, RunState::Ended(_));
        for sprite in self.state.sprites(self.grid) {
            match sprite {
                Sprite::Empty(cell) => {
                    canvas.draw_cell(cell, consts::GRID_SYMBOL, consts::GRID_STYLE);
                }
                Sprite::Head(cell) if crashed => {
                    canvas.draw_cell(cell, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
                }
                Sprite::Head(cell) => {
                    canvas.draw_cell(cell, self.state.current.head_symbol(), consts::HEAD_STYLE);
                }
                Sprite::Body(cell) => {
                    canvas.draw_cell(cell, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
                }
                Sprite::Food(cell) => {
                    canvas.draw_cell(cell, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
                }
            }
        }

        Line::from_iter([
            Span::raw(" Start ("),
            Span::styled("Enter", consts::KEY_STYLE),
            Span::raw(") — Pause ("),
            Span::styled("Space", consts::KEY_STYLE),
            Span::raw(") — Reset ("),
            Span::styled("r", consts::KEY_STYLE),
            Span::raw(") — Quit ("),
            Span::styled("q", consts::KEY_STYLE),
            Span::raw(")"),
        ])
        .render(controls_area, buf);

        match self.run {
            RunState::Paused(menu) => menu.render(center_rect(display, Paused::SIZE), buf),
            RunState::Ended(Some(over)) => over.render(center_rect(display, GameOver::SIZE), buf),
            _ => (),
        }
    }
}

/// Draws grid cells into a buffer, each cell taking up
/// [`consts::CELL_WIDTH`] columns
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, cell: Cell, symbol: char, style: Style) {
        let Ok(cx) = u16::try_from(cell.x) else {
            return;
        };
        let Ok(cy) = u16::try_from(cell.y) else {
            return;
        };
        let Some(x) = cx
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|dx| self.area.x.checked_add(dx))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(cy) else {
            return;
        };
        let style = Style::reset().patch(style);
        for (i, ch) in std::iter::once(symbol)
            .chain(std::iter::repeat(' '))
            .take(usize::from(consts::CELL_WIDTH))
            .enumerate()
        {
            let Some(x) = u16::try_from(i).ok().and_then(|i| x.checked_add(i)) else {
                return;
            };
            if x >= self.area.right() || y >= self.area.bottom() {
                return;
            }
            if let Some(c) = self.buf.cell_mut((x, y)) {
                c.set_char(ch);
                c.set_style(style);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum RunState {
    /// A fresh run is set up and waiting for the player to start it
    Idle,
    Running,
    Paused(Paused),
    /// The run is over.  Holds the end-of-run summary until the player
    /// dismisses it.
    Ended(Option<GameOver>),
}
