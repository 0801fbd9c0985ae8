use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::GridSize;
use crate::direction::Direction;

/// Grid position in logical cell coordinates.
///
/// Coordinates are signed so a head that left the board is still
/// representable.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the adjacent position one step in `direction`.
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns true when the two positions differ by one step on exactly one axis.
    #[must_use]
    pub fn is_adjacent_to(self, other: Position) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

/// Result of a single snake movement.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct MoveOutcome {
    pub food_eaten: bool,
    pub eaten_itself: bool,
}

/// Ordered snake body, head first.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a straight snake of `length` cells with its body trailing
    /// behind `head`, opposite to `direction`.
    #[must_use]
    pub fn straight(head: Position, direction: Direction, length: usize) -> Self {
        let behind = direction.opposite();
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut segment = head;
        body.push_back(segment);

        for _ in 1..length {
            segment = segment.neighbor(behind);
            body.push_back(segment);
        }

        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");
        Self {
            body: VecDeque::from(segments),
        }
    }

    /// Moves one cell in `direction`, growing first when the new head lands on
    /// `food`.
    ///
    /// Growth duplicates the tail before the body shifts, so the snake keeps
    /// its old tail cell. Direction is not validated here.
    pub fn move_towards(&mut self, direction: Direction, food: Option<Position>) -> MoveOutcome {
        let next_head = self.head().neighbor(direction);
        let food_eaten = food == Some(next_head);

        if food_eaten {
            let tail = self.tail();
            self.body.push_back(tail);
        }

        self.body.push_front(next_head);
        let _ = self.body.pop_back();

        MoveOutcome {
            food_eaten,
            eaten_itself: self.head_overlaps_body(),
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Returns the last segment.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least one segment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }
}
