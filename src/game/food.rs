use super::grid::{Cell, Grid};
use super::snake::Snake;
use rand::Rng;

/// Choose a random cell of `grid` that the snake does not occupy.
///
/// Cells are sampled uniformly until a free one turns up.  If the snake fills
/// the entire grid, this never returns.
pub(crate) fn place<R: Rng>(rng: &mut R, grid: Grid, snake: &Snake) -> Cell {
    loop {
        let candidate = grid.random_cell(rng);
        if !snake.contains(candidate) {
            return candidate;
        }
    }
}
