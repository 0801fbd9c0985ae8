//! Hamiltonian circuit over a rectangular board.
//!
//! Every cell gets a ring index in `0..width * height`. Cells with
//! consecutive indices are adjacent, and so are the last and the first cell,
//! so a snake that keeps moving to the next index never leaves the board and
//! never meets its own tail.

use crate::config::GridSize;
use crate::error::CircuitError;
use crate::snake::Position;

/// Ring numbering of every cell plus its inverse. Immutable once built.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Circuit {
    grid: GridSize,
    /// Ring index per cell, row-major (`y * width + x`).
    numbers: Vec<usize>,
    /// Cell per ring index.
    positions: Vec<Position>,
}

impl Circuit {
    /// Builds the circuit for `grid`.
    ///
    /// Column 0 is walked bottom to top as a return lane, then the remaining
    /// columns are covered row by row in serpentine order. When the height is
    /// odd the same walk runs with the axes swapped, which needs an even width.
    pub fn build(grid: GridSize) -> Result<Self, CircuitError> {
        if grid.width < 2 || grid.height < 2 {
            return Err(CircuitError::BoardTooSmall {
                width: grid.width,
                height: grid.height,
            });
        }

        let width = i32::from(grid.width);
        let height = i32::from(grid.height);
        let mut order = Vec::with_capacity(grid.total_cells());

        if height % 2 == 0 {
            order.extend((0..height).rev().map(|y| Position::new(0, y)));
            for y in 0..height {
                for step in 1..width {
                    let x = if y % 2 == 0 { step } else { width - step };
                    order.push(Position::new(x, y));
                }
            }
        } else if width % 2 == 0 {
            order.extend((0..width).rev().map(|x| Position::new(x, 0)));
            for x in 0..width {
                for step in 1..height {
                    let y = if x % 2 == 0 { step } else { height - step };
                    order.push(Position::new(x, y));
                }
            }
        } else {
            return Err(CircuitError::NoEvenSide {
                width: grid.width,
                height: grid.height,
            });
        }

        Ok(Self::from_order(grid, order))
    }

    fn from_order(grid: GridSize, positions: Vec<Position>) -> Self {
        let mut numbers = vec![0; positions.len()];
        let width = usize::from(grid.width);

        for (number, position) in positions.iter().enumerate() {
            numbers[position.y as usize * width + position.x as usize] = number;
        }

        Self {
            grid,
            numbers,
            positions,
        }
    }

    /// Returns the ring index of `position`, or `None` when it is off the board.
    #[must_use]
    pub fn number_at(&self, position: Position) -> Option<usize> {
        if !position.is_within_bounds(self.grid) {
            return None;
        }

        let index = position.y as usize * usize::from(self.grid.width) + position.x as usize;
        Some(self.numbers[index])
    }

    /// Returns the cell carrying ring index `number`.
    #[must_use]
    pub fn position_of(&self, number: usize) -> Option<Position> {
        self.positions.get(number).copied()
    }

    /// Returns the ring index that follows `number`, wrapping to 0.
    #[must_use]
    pub fn next_number(&self, number: usize) -> usize {
        (number + 1) % self.len()
    }

    /// Number of cells on the ring.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Iterates over cells in ring order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions.iter().copied()
    }

    /// Returns the numbering as columns, indexed `[x][y]`.
    #[must_use]
    pub fn columns(&self) -> Vec<Vec<usize>> {
        let width = usize::from(self.grid.width);
        (0..width)
            .map(|x| {
                self.numbers
                    .iter()
                    .skip(x)
                    .step_by(width)
                    .copied()
                    .collect()
            })
            .collect()
    }
}
