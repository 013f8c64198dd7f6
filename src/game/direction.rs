use super::grid::Cell;
use crate::consts;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// The unit vector for a single step in this direction
    pub(crate) fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Return the cell one step from `cell` in this direction.  The result may
    /// lie outside the grid.
    pub(crate) fn advance(self, cell: Cell) -> Cell {
        cell.offset(self.delta())
    }

    pub(crate) fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }

    /// True if both directions lie along the same axis, regardless of sign
    pub(crate) fn same_axis(self, other: Direction) -> bool {
        self.is_horizontal() == other.is_horizontal()
    }

    /// Return the glyph to use for drawing a snake head moving this way
    pub(crate) fn head_symbol(self) -> char {
        match self {
            Direction::North => consts::SNAKE_HEAD_NORTH_SYMBOL,
            Direction::South => consts::SNAKE_HEAD_SOUTH_SYMBOL,
            Direction::East => consts::SNAKE_HEAD_EAST_SYMBOL,
            Direction::West => consts::SNAKE_HEAD_WEST_SYMBOL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Direction::North, Cell::new(2, 7), Cell::new(2, 6))]
    #[case(Direction::South, Cell::new(2, 7), Cell::new(2, 8))]
    #[case(Direction::East, Cell::new(2, 7), Cell::new(3, 7))]
    #[case(Direction::West, Cell::new(2, 7), Cell::new(1, 7))]
    #[case(Direction::North, Cell::new(2, 0), Cell::new(2, -1))]
    #[case(Direction::West, Cell::new(0, 7), Cell::new(-1, 7))]
    #[case(Direction::East, Cell::new(19, 10), Cell::new(20, 10))]
    fn test_direction_advance(#[case] d: Direction, #[case] cell: Cell, #[case] r: Cell) {
        assert_eq!(d.advance(cell), r);
    }

    #[rstest]
    #[case(Direction::North, Direction::South, true)]
    #[case(Direction::North, Direction::North, true)]
    #[case(Direction::East, Direction::West, true)]
    #[case(Direction::North, Direction::East, false)]
    #[case(Direction::West, Direction::South, false)]
    fn test_same_axis(#[case] a: Direction, #[case] b: Direction, #[case] r: bool) {
        assert_eq!(a.same_axis(b), r);
        assert_eq!(b.same_axis(a), r);
    }

    #[rstest]
    #[case(Direction::North)]
    #[case(Direction::East)]
    #[case(Direction::South)]
    #[case(Direction::West)]
    fn delta_is_unit_vector(#[case] d: Direction) {
        let (dx, dy) = d.delta();
        assert_eq!(dx.abs() + dy.abs(), 1);
        assert_eq!(dx != 0, d.is_horizontal());
    }
}
