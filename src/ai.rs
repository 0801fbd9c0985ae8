//! Controller that steers the snake along the board's circuit and cuts
//! across it towards food when that cannot run into the body.

use log::debug;

use crate::circuit::Circuit;
use crate::config::GridSize;
use crate::direction::Direction;
use crate::error::CircuitError;
use crate::game::{GameSnapshot, TickResult};
use crate::snake::Position;

/// Direction the controller wants applied on the next tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct DirectionChange {
    pub new_direction: Option<Direction>,
}

impl DirectionChange {
    fn to(direction: Direction) -> Self {
        Self {
            new_direction: Some(direction),
        }
    }
}

/// A jump ahead on the circuit that later shortcuts must not cut into.
///
/// `required_moves` counts the ticks left until the tail has moved past the
/// skipped cells.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Shortcut {
    pub circuit_number: usize,
    pub required_moves: usize,
    pub position: Position,
}

/// Shortcut-aware circuit follower.
#[derive(Debug, Clone)]
pub struct SnakeAi {
    circuit: Circuit,
    shortcuts: Vec<Shortcut>,
    shortcuts_taken: u64,
}

impl SnakeAi {
    /// Builds the controller and its circuit for `grid`.
    pub fn new(grid: GridSize) -> Result<Self, CircuitError> {
        Ok(Self {
            circuit: Circuit::build(grid)?,
            shortcuts: Vec::new(),
            shortcuts_taken: 0,
        })
    }

    /// Decides the direction for the next tick.
    pub fn next_direction_change(&mut self, snapshot: &GameSnapshot) -> DirectionChange {
        match self.take_shortcut(snapshot) {
            Some(direction) => DirectionChange::to(direction),
            None => self.follow_circuit(snapshot),
        }
    }

    /// Ages outstanding shortcuts after a tick.
    ///
    /// Ticks that ate food leave every shortcut untouched: the tail stood
    /// still on those ticks.
    pub fn game_changed(&mut self, result: &TickResult) {
        if result.food_eaten {
            return;
        }

        for shortcut in &mut self.shortcuts {
            shortcut.required_moves = shortcut.required_moves.saturating_sub(1);
        }
        self.shortcuts.retain(|shortcut| shortcut.required_moves > 0);
    }

    #[must_use]
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Shortcuts whose skipped cells may still hold the body.
    #[must_use]
    pub fn shortcuts(&self) -> &[Shortcut] {
        &self.shortcuts
    }

    /// Total number of shortcuts recorded since construction.
    #[must_use]
    pub fn shortcuts_taken(&self) -> u64 {
        self.shortcuts_taken
    }

    /// Neighbors of the head that are on the board, excluding the cell
    /// directly behind it.
    fn neighbor_numbers(&self, snapshot: &GameSnapshot) -> Vec<(Direction, usize)> {
        let behind = snapshot.direction.opposite();
        Direction::ALL
            .into_iter()
            .filter(|direction| *direction != behind)
            .filter_map(|direction| {
                self.circuit
                    .number_at(snapshot.head.neighbor(direction))
                    .map(|number| (direction, number))
            })
            .collect()
    }

    /// Picks the neighbor furthest ahead on the ring that stays short of the
    /// food and clears every outstanding shortcut.
    fn take_shortcut(&mut self, snapshot: &GameSnapshot) -> Option<Direction> {
        let food = snapshot.food?;
        let current = self.circuit.number_at(snapshot.head)?;
        let ring = self.circuit.len();
        let unwrap = |number: usize| {
            if number < current {
                number + ring
            } else {
                number
            }
        };
        let food_number = unwrap(self.circuit.number_at(food)?);

        let mut best: Option<(Direction, usize)> = None;
        let mut best_distance = 0;

        for (direction, number) in self.neighbor_numbers(snapshot) {
            let next = unwrap(number);
            if next <= current || next >= food_number {
                continue;
            }

            let distance = next - current;
            if distance <= best_distance {
                continue;
            }

            let clear = self.shortcuts.iter().all(|shortcut| {
                let skipped = unwrap(shortcut.circuit_number);
                skipped > next && skipped - next > shortcut.required_moves
            });
            if clear {
                best_distance = distance;
                best = Some((direction, distance));
            }
        }

        let (direction, distance) = best?;
        if distance > 1 {
            self.shortcuts.push(Shortcut {
                circuit_number: current,
                required_moves: snapshot.snake_length,
                position: snapshot.head,
            });
            self.shortcuts_taken += 1;
            debug!(
                "shortcut {direction:?} from {current} skipping {} cells (length {})",
                distance - 1,
                snapshot.snake_length
            );
        }

        Some(direction)
    }

    fn follow_circuit(&self, snapshot: &GameSnapshot) -> DirectionChange {
        let Some(current) = self.circuit.number_at(snapshot.head) else {
            return DirectionChange::default();
        };
        let target = self.circuit.next_number(current);

        let Some(direction) = Direction::ALL.into_iter().find(|direction| {
            self.circuit.number_at(snapshot.head.neighbor(*direction)) == Some(target)
        }) else {
            return DirectionChange::default();
        };

        if direction == snapshot.direction.opposite() {
            return DirectionChange::to(turn_aside(direction));
        }

        DirectionChange::to(direction)
    }
}

/// Turn taken instead of reversing onto the neck.
fn turn_aside(reversal: Direction) -> Direction {
    match reversal {
        Direction::Left => Direction::Up,
        Direction::Right => Direction::Down,
        Direction::Up => Direction::Left,
        Direction::Down => Direction::Right,
    }
}
