use super::direction::Direction;
use super::food;
use super::grid::{Cell, Grid};
use super::snake::Snake;
use crate::consts;
use rand::Rng;
use std::fmt;
use std::time::Duration;

/// Everything that makes up a single run of the game: the snake, the food,
/// and the scoring.  Only [`GameState::step()`] and [`GameState::steer()`]
/// change it once it's been created.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GameState {
    pub(super) snake: Snake,
    pub(super) food: Cell,
    /// The direction applied on the most recent tick
    pub(super) current: Direction,
    /// The direction to apply on the next tick
    pub(super) pending: Direction,
    pub(super) score: u32,
    pub(super) level: u32,
    /// Time between ticks
    pub(super) speed: Duration,
}

impl GameState {
    /// Create the initial state for a fresh run: a one-cell snake in the
    /// middle of the grid heading east, with food somewhere else.
    pub(crate) fn new<R: Rng>(grid: Grid, rng: &mut R) -> GameState {
        let snake = Snake::new(grid.center());
        let food = food::place(rng, grid, &snake);
        GameState {
            snake,
            food,
            current: Direction::East,
            pending: Direction::East,
            score: 0,
            level: 1,
            speed: consts::INITIAL_SPEED,
        }
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn level(&self) -> u32 {
        self.level
    }

    pub(crate) fn speed(&self) -> Duration {
        self.speed
    }

    /// Queue a change of direction for the next tick.  Turns along the axis
    /// the snake is currently moving on are ignored, as reversing would send
    /// the head straight into the neck.  Returns whether the turn was
    /// accepted.
    pub(crate) fn steer(&mut self, direction: Direction) -> bool {
        if direction.same_axis(self.current) {
            false
        } else {
            self.pending = direction;
            true
        }
    }

    /// Advance the snake by one cell.
    ///
    /// Collisions are checked against the whole snake as it was before
    /// moving, tail included.  On a collision nothing but the direction is
    /// updated.
    pub(crate) fn step<R: Rng>(&mut self, grid: Grid, rng: &mut R) -> Step {
        self.current = self.pending;
        let new_head = self.current.advance(self.snake.head());
        if !grid.in_bounds(new_head) {
            return Step::Crashed(Crash::Wall);
        }
        if self.snake.contains(new_head) {
            return Step::Crashed(Crash::Snake);
        }
        self.snake.push_head(new_head);
        if new_head == self.food {
            self.score += consts::POINTS_PER_FOOD * self.level;
            let level_up = self.score % consts::LEVEL_UP_SCORE == 0;
            if level_up {
                self.level += 1;
                self.speed = self
                    .speed
                    .saturating_sub(consts::SPEED_STEP)
                    .max(consts::MIN_SPEED);
            }
            self.food = food::place(rng, grid, &self.snake);
            Step::Ate { level_up }
        } else {
            self.snake.pop_tail();
            Step::Moved
        }
    }

    /// Enumerate what needs to be drawn, in drawing order: every cell of the
    /// grid, then the snake from head to tail, then the food.
    pub(crate) fn sprites(&self, grid: Grid) -> impl Iterator<Item = Sprite> + '_ {
        grid.cells()
            .map(Sprite::Empty)
            .chain(std::iter::once(Sprite::Head(self.snake.head())))
            .chain(self.snake.body().map(Sprite::Body))
            .chain(std::iter::once(Sprite::Food(self.food)))
    }
}

/// The result of a single tick
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Step {
    /// The snake moved without eating anything
    Moved,
    /// The snake ate the food and grew by one cell
    Ate { level_up: bool },
    /// The snake tried to move somewhere it can't go; the run is over
    Crashed(Crash),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Crash {
    Wall,
    Snake,
}

impl fmt::Display for Crash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Crash::Wall => write!(f, "hit a wall"),
            Crash::Snake => write!(f, "bit itself"),
        }
    }
}

/// One thing to draw on a cell of the grid
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Sprite {
    Empty(Cell),
    Head(Cell),
    Body(Cell),
    Food(Cell),
}
