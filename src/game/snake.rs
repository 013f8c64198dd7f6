use super::grid::{occupied_by, Cell};
use std::collections::VecDeque;

/// The snake, head first.
///
/// The head is stored apart from the rest of the body so that the snake can
/// never be empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The position of the snake's head
    head: Cell,

    /// The positions of the rest of the snake, from the neck to the tail
    body: VecDeque<Cell>,
}

impl Snake {
    /// Create a new snake consisting of just a head at `head`
    pub(crate) fn new(head: Cell) -> Snake {
        Snake {
            head,
            body: VecDeque::new(),
        }
    }

    /// Create a snake from its segments, head first
    #[cfg(test)]
    pub(crate) fn from_segments<I: IntoIterator<Item = Cell>>(segments: I) -> Snake {
        let mut iter = segments.into_iter();
        let head = iter.next().expect("a snake needs at least a head");
        Snake {
            head,
            body: iter.collect(),
        }
    }

    pub(crate) fn head(&self) -> Cell {
        self.head
    }

    /// Iterate over all of the snake's cells, head first
    pub(crate) fn segments(&self) -> impl Iterator<Item = Cell> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    /// Iterate over the snake's cells other than the head, neck first
    pub(crate) fn body(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len() + 1
    }

    pub(crate) fn contains(&self, cell: Cell) -> bool {
        occupied_by(self.segments(), cell)
    }

    /// Make `cell` the new head; the old head becomes the neck
    pub(crate) fn push_head(&mut self, cell: Cell) {
        self.body.push_front(self.head);
        self.head = cell;
    }

    /// Remove the last segment, unless the snake is only a head
    pub(crate) fn pop_tail(&mut self) {
        let _ = self.body.pop_back();
    }
}
