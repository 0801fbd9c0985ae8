use serde::{Deserialize, Serialize};

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Settings needed to start one game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pub grid: GridSize,
    /// Seed for food placement; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl GameConfig {
    #[must_use]
    pub fn new(grid: GridSize) -> Self {
        Self { grid, seed: None }
    }

    /// Creates a reproducible configuration for tests and simulations.
    #[must_use]
    pub fn seeded(grid: GridSize, seed: u64) -> Self {
        Self {
            grid,
            seed: Some(seed),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(GridSize::new(DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT))
    }
}

/// Default board width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 32;

/// Default board height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 18;

/// Upper bound on the starting snake length.
pub const INITIAL_SNAKE_LENGTH: usize = 4;

/// Tick budget per cell squared; a circuit-following snake fills any board
/// well inside `cells * cells * TICKS_PER_CELL_SQUARED` ticks.
pub const TICKS_PER_CELL_SQUARED: u64 = 4;

/// Returns the default tick limit for a simulation on `grid`.
#[must_use]
pub fn default_tick_limit(grid: GridSize) -> u64 {
    let cells = grid.total_cells() as u64;
    cells * cells * TICKS_PER_CELL_SQUARED
}
