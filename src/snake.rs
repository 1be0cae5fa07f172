use std::collections::{HashSet, VecDeque};

use crate::error::ConfigError;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
///
/// Cells are plain values: moving produces a new cell, never mutates one.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.unit_vector();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Ordered snake segments, head first, plus the pending growth credit.
#[derive(Debug, Clone)]
pub struct SnakeBody {
    body: VecDeque<Cell>,
    grow: bool,
}

impl SnakeBody {
    /// Creates a straight snake whose head is at `head`, travelling in
    /// `direction`, with the rest of the body trailing behind it.
    pub fn straight(head: Cell, direction: Direction, length: u16) -> Result<Self, ConfigError> {
        if length == 0 {
            return Err(ConfigError::ZeroLength);
        }

        let behind = direction.opposite();
        let mut body = VecDeque::with_capacity(usize::from(length));
        let mut segment = head;
        for _ in 0..length {
            body.push_back(segment);
            segment = segment.offset(behind);
        }

        Ok(Self { body, grow: false })
    }

    /// Creates a snake from explicit body segments (front is head).
    pub fn from_segments(segments: Vec<Cell>) -> Result<Self, ConfigError> {
        if segments.is_empty() {
            return Err(ConfigError::EmptyBody);
        }

        Ok(Self {
            body: VecDeque::from(segments),
            grow: false,
        })
    }

    /// Sets the one-shot growth credit consumed by the next move.
    pub fn grow(&mut self) {
        self.grow = true;
    }

    /// Returns the head position the next move in `direction` would produce.
    #[must_use]
    pub fn next_head(&self, direction: Direction) -> Cell {
        self.head().offset(direction)
    }

    /// Advances one cell in `direction` and returns the new head.
    ///
    /// The new head is pushed before the tail is considered; the tail is kept
    /// when a growth credit is pending, so length grows by exactly one.
    pub fn move_toward(&mut self, direction: Direction) -> Cell {
        let new_head = self.next_head(direction);

        self.body.push_front(new_head);
        if !self.grow {
            let _ = self.body.pop_back();
        }
        self.grow = false;

        new_head
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_collides_with_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a constructed snake; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    /// Returns the set of occupied cells.
    #[must_use]
    pub fn cell_set(&self) -> HashSet<Cell> {
        self.body.iter().copied().collect()
    }
}
