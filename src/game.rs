use log::{debug, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, GridSize, INITIAL_SNAKE_LENGTH};
use crate::direction::{Direction, direction_change_is_valid};
use crate::food::spawn_position;
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum GameStatus {
    Running,
    RuleViolated,
    BoardFull,
}

/// Outcome of one tick, reported to the host and the controller.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct TickResult {
    /// The head left the board or ran into the body.
    pub rule_violation: bool,
    /// Food was eaten and the snake now covers every cell.
    pub no_space_for_food: bool,
    pub food_eaten: bool,
}

impl TickResult {
    /// Returns true when no further tick can change the game.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self.rule_violation || self.no_space_for_food
    }
}

/// Read-only view of the game handed to controllers each tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameSnapshot {
    pub grid: GridSize,
    pub head: Position,
    pub direction: Direction,
    pub food: Option<Position>,
    pub snake_length: usize,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct Game {
    snake: Snake,
    food: Option<Position>,
    direction: Direction,
    pending_direction: Direction,
    status: GameStatus,
    tick_count: u64,
    grid: GridSize,
    rng: StdRng,
}

impl Game {
    /// Starts a game with the snake laid along the first cells of the board's
    /// circuit and food at a random free cell.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (head, direction, length) = start_layout(config.grid);
        let snake = Snake::straight(head, direction, length);

        Self::assemble(config.grid, snake, direction, rng)
    }

    /// Builds a game from explicit parts for tests and reproducible setups.
    ///
    /// When `food` is `None` a food cell is drawn from the seeded generator.
    #[must_use]
    pub fn from_parts(
        grid: GridSize,
        snake: Snake,
        direction: Direction,
        food: Option<Position>,
        seed: u64,
    ) -> Self {
        let mut game = Self::assemble(grid, snake, direction, StdRng::seed_from_u64(seed));
        if food.is_some() {
            game.food = food;
            game.status = GameStatus::Running;
        }
        game
    }

    fn assemble(grid: GridSize, snake: Snake, direction: Direction, mut rng: StdRng) -> Self {
        let food = spawn_position(&mut rng, grid, &snake);
        let status = if food.is_some() {
            GameStatus::Running
        } else {
            GameStatus::BoardFull
        };

        Self {
            snake,
            food,
            direction,
            pending_direction: direction,
            status,
            tick_count: 0,
            grid,
            rng,
        }
    }

    /// Advances the simulation by one tick.
    ///
    /// A terminated game does not move; the result repeats its terminal flags.
    pub fn tick(&mut self) -> TickResult {
        if self.status != GameStatus::Running {
            return TickResult {
                rule_violation: self.status == GameStatus::RuleViolated,
                no_space_for_food: self.status == GameStatus::BoardFull,
                food_eaten: false,
            };
        }

        self.tick_count += 1;
        let direction = self.pending_direction;
        let outcome = self.snake.move_towards(direction, self.food);

        let mut no_space_for_food = false;
        if outcome.food_eaten {
            self.food = spawn_position(&mut self.rng, self.grid, &self.snake);
            no_space_for_food = self.food.is_none();
        }

        self.direction = direction;

        let head = self.snake.head();
        let rule_violation = outcome.eaten_itself || !head.is_within_bounds(self.grid);

        if rule_violation {
            self.status = GameStatus::RuleViolated;
            debug!(
                "tick {}: rule violated at ({}, {}) with length {}",
                self.tick_count,
                head.x,
                head.y,
                self.snake.len()
            );
        } else if no_space_for_food {
            self.status = GameStatus::BoardFull;
            debug!("tick {}: board full", self.tick_count);
        } else {
            trace!(
                "tick {}: head ({}, {}) heading {:?}, food eaten: {}",
                self.tick_count, head.x, head.y, direction, outcome.food_eaten
            );
        }

        TickResult {
            rule_violation,
            no_space_for_food,
            food_eaten: outcome.food_eaten,
        }
    }

    /// Requests a direction for the next tick; reversals of the current
    /// direction are ignored.
    pub fn set_direction(&mut self, direction: Direction) {
        if direction_change_is_valid(self.direction, direction) {
            self.pending_direction = direction;
        }
    }

    /// Returns the view a controller needs to decide the next move.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self.grid,
            head: self.snake.head(),
            direction: self.direction,
            food: self.food,
            snake_length: self.snake.len(),
        }
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Iterates over snake segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.snake.segments()
    }

    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    /// Returns the direction applied on the last tick.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

/// Chooses the starting head, heading and length.
///
/// The snake lies along the even axis with its tail in the top-left corner,
/// which is where the circuit for that board starts its serpentine.
fn start_layout(grid: GridSize) -> (Position, Direction, usize) {
    if grid.height % 2 == 0 || grid.width % 2 != 0 {
        let length = usize::from(grid.width).clamp(1, INITIAL_SNAKE_LENGTH);
        (Position::new(length as i32 - 1, 0), Direction::Right, length)
    } else {
        let length = usize::from(grid.height).clamp(1, INITIAL_SNAKE_LENGTH);
        (Position::new(0, length as i32 - 1), Direction::Down, length)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{GameConfig, GridSize};
    use crate::direction::Direction;
    use crate::snake::{Position, Snake};

    use super::{Game, GameStatus, TickResult};

    #[test]
    fn even_height_board_starts_on_top_row_heading_right() {
        let game = Game::new(GameConfig::seeded(GridSize::new(10, 6), 1));

        let segments: Vec<_> = game.segments().collect();
        assert_eq!(segments.first(), Some(&Position::new(3, 0)));
        assert_eq!(segments.last(), Some(&Position::new(0, 0)));
        assert_eq!(game.direction(), Direction::Right);
        assert_eq!(game.status(), GameStatus::Running);
    }

    #[test]
    fn odd_height_board_starts_in_left_column_heading_down() {
        let game = Game::new(GameConfig::seeded(GridSize::new(4, 3), 1));

        let segments: Vec<_> = game.segments().collect();
        assert_eq!(
            segments,
            vec![Position::new(0, 2), Position::new(0, 1), Position::new(0, 0)]
        );
        assert_eq!(game.direction(), Direction::Down);
    }

    #[test]
    fn initial_food_is_free_and_on_board() {
        let game = Game::new(GameConfig::seeded(GridSize::new(5, 4), 9));

        let food = game.food().expect("food should be placed");
        assert!(food.is_within_bounds(game.grid()));
        assert!(!game.snake().occupies(food));
    }

    #[test]
    fn snake_grows_after_eating_food() {
        let snake = Snake::straight(Position::new(1, 1), Direction::Right, 1);
        let mut game = Game::from_parts(
            GridSize::new(10, 10),
            snake,
            Direction::Right,
            Some(Position::new(2, 1)),
            1,
        );

        let result = game.tick();

        assert_eq!(
            result,
            TickResult {
                rule_violation: false,
                no_space_for_food: false,
                food_eaten: true,
            }
        );
        assert_eq!(game.snake().len(), 2);
        assert_ne!(game.food(), Some(Position::new(2, 1)));
    }

    #[test]
    fn leaving_the_board_is_a_rule_violation() {
        let snake = Snake::straight(Position::new(3, 1), Direction::Right, 2);
        let mut game = Game::from_parts(
            GridSize::new(4, 4),
            snake,
            Direction::Right,
            Some(Position::new(0, 3)),
            2,
        );

        let result = game.tick();

        assert!(result.rule_violation);
        assert!(result.is_terminal());
        assert_eq!(game.status(), GameStatus::RuleViolated);
    }

    #[test]
    fn running_into_body_is_a_rule_violation() {
        let snake = Snake::from_segments(vec![
            Position::new(2, 2),
            Position::new(1, 2),
            Position::new(1, 3),
            Position::new(2, 3),
            Position::new(3, 3),
            Position::new(3, 2),
        ]);
        let mut game = Game::from_parts(
            GridSize::new(6, 6),
            snake,
            Direction::Up,
            Some(Position::new(5, 5)),
            3,
        );
        game.set_direction(Direction::Left);

        let result = game.tick();

        assert!(result.rule_violation);
        assert_eq!(game.status(), GameStatus::RuleViolated);
    }

    #[test]
    fn reversal_request_is_ignored() {
        let snake = Snake::straight(Position::new(2, 2), Direction::Right, 3);
        let mut game = Game::from_parts(
            GridSize::new(8, 8),
            snake,
            Direction::Right,
            Some(Position::new(7, 7)),
            4,
        );

        game.set_direction(Direction::Left);
        let result = game.tick();

        assert!(!result.rule_violation);
        assert_eq!(game.direction(), Direction::Right);
        assert_eq!(game.snake().head(), Position::new(3, 2));
    }

    #[test]
    fn later_request_replaces_pending_direction() {
        let snake = Snake::straight(Position::new(2, 2), Direction::Right, 3);
        let mut game = Game::from_parts(
            GridSize::new(8, 8),
            snake,
            Direction::Right,
            Some(Position::new(7, 7)),
            5,
        );

        game.set_direction(Direction::Up);
        game.set_direction(Direction::Down);
        game.tick();

        assert_eq!(game.direction(), Direction::Down);
        assert_eq!(game.snake().head(), Position::new(2, 3));
    }

    #[test]
    fn eating_the_last_free_cell_fills_the_board() {
        let snake = Snake::from_segments(vec![
            Position::new(0, 1),
            Position::new(0, 0),
            Position::new(1, 0),
        ]);
        let mut game = Game::from_parts(
            GridSize::new(2, 2),
            snake,
            Direction::Down,
            Some(Position::new(1, 1)),
            6,
        );
        game.set_direction(Direction::Right);

        let result = game.tick();

        assert!(result.food_eaten);
        assert!(result.no_space_for_food);
        assert!(!result.rule_violation);
        assert_eq!(game.food(), None);
        assert_eq!(game.status(), GameStatus::BoardFull);
    }

    #[test]
    fn terminated_game_does_not_move() {
        let snake = Snake::straight(Position::new(3, 1), Direction::Right, 2);
        let mut game = Game::from_parts(
            GridSize::new(4, 4),
            snake,
            Direction::Right,
            Some(Position::new(0, 3)),
            7,
        );
        game.tick();
        let head = game.snake().head();

        let result = game.tick();

        assert!(result.rule_violation);
        assert!(!result.food_eaten);
        assert_eq!(game.snake().head(), head);
        assert_eq!(game.tick_count(), 1);
    }

    #[test]
    fn snapshot_mirrors_game_state() {
        let game = Game::new(GameConfig::seeded(GridSize::new(6, 4), 8));

        let snapshot = game.snapshot();

        assert_eq!(snapshot.grid, game.grid());
        assert_eq!(snapshot.head, game.snake().head());
        assert_eq!(snapshot.direction, game.direction());
        assert_eq!(snapshot.food, game.food());
        assert_eq!(snapshot.snake_length, 4);
    }
}
