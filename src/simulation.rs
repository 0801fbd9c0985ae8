//! Tick loop that lets the controller play a game on its own.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::ai::SnakeAi;
use crate::config::GameConfig;
use crate::error::CircuitError;
use crate::game::{Game, GameStatus, TickResult};

/// How a simulated game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    BoardFull,
    RuleViolated,
    TickLimit,
}

/// Summary of one simulated game.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub width: u16,
    pub height: u16,
    pub seed: Option<u64>,
    pub ticks: u64,
    pub final_length: usize,
    pub food_eaten: u64,
    pub shortcuts_taken: u64,
    pub outcome: Outcome,
}

/// A game driven tick by tick by a [`SnakeAi`].
#[derive(Debug, Clone)]
pub struct Simulation {
    game: Game,
    ai: SnakeAi,
    seed: Option<u64>,
    food_eaten: u64,
}

impl Simulation {
    /// Builds the controller first so an unsupported board fails before a
    /// game is started.
    pub fn new(config: GameConfig) -> Result<Self, CircuitError> {
        let ai = SnakeAi::new(config.grid)?;

        Ok(Self {
            game: Game::new(config),
            ai,
            seed: config.seed,
            food_eaten: 0,
        })
    }

    /// Runs one decide, apply, tick, notify cycle.
    pub fn step(&mut self) -> TickResult {
        let change = self.ai.next_direction_change(&self.game.snapshot());
        if let Some(direction) = change.new_direction {
            self.game.set_direction(direction);
        }

        let result = self.game.tick();
        if result.food_eaten {
            self.food_eaten += 1;
        }
        self.ai.game_changed(&result);

        result
    }

    /// Steps until the game ends or `tick_limit` ticks have run.
    pub fn run(&mut self, tick_limit: u64) -> SimulationReport {
        while self.game.tick_count() < tick_limit {
            if self.step().is_terminal() {
                break;
            }
        }

        let report = self.report();
        debug!(
            "{}x{} finished after {} ticks: {:?}",
            report.width, report.height, report.ticks, report.outcome
        );
        report
    }

    /// Summarizes the game as it stands.
    #[must_use]
    pub fn report(&self) -> SimulationReport {
        let grid = self.game.grid();
        let outcome = match self.game.status() {
            GameStatus::BoardFull => Outcome::BoardFull,
            GameStatus::RuleViolated => Outcome::RuleViolated,
            GameStatus::Running => Outcome::TickLimit,
        };

        SimulationReport {
            width: grid.width,
            height: grid.height,
            seed: self.seed,
            ticks: self.game.tick_count(),
            final_length: self.game.snake().len(),
            food_eaten: self.food_eaten,
            shortcuts_taken: self.ai.shortcuts_taken(),
            outcome,
        }
    }

    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    #[must_use]
    pub fn ai(&self) -> &SnakeAi {
        &self.ai
    }
}
