use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in (row, column) cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub row: u16,
    pub col: u16,
}

impl Position {
    #[must_use]
    pub fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.row < bounds.height && self.col < bounds.width
    }

    /// Returns true when the position is on the outermost ring of the grid.
    #[must_use]
    pub fn is_on_border(self, bounds: GridSize) -> bool {
        self.row == 0
            || self.col == 0
            || self.row + 1 == bounds.height
            || self.col + 1 == bounds.width
    }

    /// Returns the neighbouring cell one unit towards `direction`.
    ///
    /// `None` when the step would leave the non-negative coordinate space.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (row, col) = match direction {
            Direction::Up => (self.row.checked_sub(1)?, self.col),
            Direction::Down => (self.row.checked_add(1)?, self.col),
            Direction::Left => (self.row, self.col.checked_sub(1)?),
            Direction::Right => (self.row, self.col.checked_add(1)?),
        };
        Some(Self { row, col })
    }
}

/// Head plus a sliding window of trailing body cells.
///
/// The body holds at most `size - 1` positions, oldest first.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Actor {
    head: Position,
    body: VecDeque<Position>,
    size: u32,
}

impl Actor {
    /// Creates a one-cell actor at `start`.
    #[must_use]
    pub fn new(start: Position) -> Self {
        Self {
            head: start,
            body: VecDeque::new(),
            size: 1,
        }
    }

    /// Shifts the trail forward ahead of a head move.
    ///
    /// Returns the cell the actor no longer occupies, if any: the evicted
    /// oldest segment, or the head itself for a one-cell actor.
    pub fn advance_trail(&mut self) -> Option<Position> {
        if self.size == 1 {
            return Some(self.head);
        }

        self.body.push_back(self.head);
        if self.body.len() >= self.size as usize {
            return self.body.pop_front();
        }
        None
    }

    pub fn move_head(&mut self, position: Position) {
        self.head = position;
    }

    /// Adds `growth` to the size. The trail fills in over the next ticks.
    pub fn grow(&mut self, growth: u32) {
        self.size = self.size.saturating_add(growth);
    }

    /// Puts the head back at `start` with an empty trail, keeping the size.
    pub fn relocate(&mut self, start: Position) {
        self.head = start;
        self.body.clear();
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.head
    }

    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Iterates over trailing body segments from oldest to newest.
    pub fn body(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.len()
    }
}
