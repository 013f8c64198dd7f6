use crate::consts;
use rand::Rng;
use std::fmt;

/// A position on the playing field.  `(0, 0)` is the top-left corner.
///
/// Coordinates are signed so that a step off the edge of the field can be
/// represented and then rejected with [`Grid::in_bounds()`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct Cell {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Cell {
    pub(crate) const fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }

    /// Vector addition
    pub(crate) fn offset(self, (dx, dy): (i32, i32)) -> Cell {
        Cell {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The square playing field
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    size: u16,
}

impl Grid {
    pub(crate) fn new(size: u16) -> Grid {
        Grid { size }
    }

    /// Number of cells along each side
    pub(crate) fn size(self) -> u16 {
        self.size
    }

    pub(crate) fn in_bounds(self, cell: Cell) -> bool {
        let range = 0..i32::from(self.size);
        range.contains(&cell.x) && range.contains(&cell.y)
    }

    pub(crate) fn center(self) -> Cell {
        let mid = i32::from(self.size / 2);
        Cell::new(mid, mid)
    }

    /// Iterate over every cell of the grid in row-major order
    pub(crate) fn cells(self) -> impl Iterator<Item = Cell> {
        let side = i32::from(self.size);
        (0..side).flat_map(move |y| (0..side).map(move |x| Cell::new(x, y)))
    }

    /// Return a uniformly random cell of the grid
    pub(crate) fn random_cell<R: Rng>(self, rng: &mut R) -> Cell {
        let side = i32::from(self.size);
        Cell::new(rng.random_range(0..side), rng.random_range(0..side))
    }
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::new(consts::GRID_SIZE)
    }
}

/// Returns true iff any element of `cells` equals `cell`
pub(crate) fn occupied_by<I: IntoIterator<Item = Cell>>(cells: I, cell: Cell) -> bool {
    cells.into_iter().any(|c| c == cell)
}
