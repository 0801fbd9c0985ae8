use circuit_snake::ai::SnakeAi;
use circuit_snake::config::{GameConfig, GridSize, default_tick_limit};
use circuit_snake::game::{Game, GameStatus};
use circuit_snake::simulation::{Outcome, Simulation};

/// Drives a game purely from the controller, the way a host would.
fn play(grid: GridSize, seed: u64) -> Game {
    let mut game = Game::new(GameConfig::seeded(grid, seed));
    let mut ai = SnakeAi::new(grid).expect("board supports a circuit");

    for _ in 0..default_tick_limit(grid) {
        let change = ai.next_direction_change(&game.snapshot());
        if let Some(direction) = change.new_direction {
            game.set_direction(direction);
        }

        let result = game.tick();
        assert!(
            !result.rule_violation,
            "{}x{} seed {seed}: rule violated on tick {}",
            grid.width,
            grid.height,
            game.tick_count()
        );
        ai.game_changed(&result);

        if result.no_space_for_food {
            break;
        }
    }

    game
}

#[test]
fn ai_fills_4x4_board_without_violation() {
    let grid = GridSize::new(4, 4);

    for seed in 0..50 {
        let game = play(grid, seed);

        assert_eq!(game.status(), GameStatus::BoardFull, "seed {seed}");
        assert_eq!(game.snake().len(), grid.total_cells());
        assert_eq!(game.food(), None);
    }
}

#[test]
fn ai_fills_boards_of_every_supported_shape() {
    let shapes = [(2, 2), (3, 2), (2, 3), (4, 3), (3, 4), (5, 4), (4, 5), (6, 6), (8, 6), (6, 7)];

    for (width, height) in shapes {
        let grid = GridSize::new(width, height);
        for seed in 0..10 {
            let game = play(grid, seed);
            assert_eq!(
                game.status(),
                GameStatus::BoardFull,
                "{width}x{height} seed {seed}"
            );
        }
    }
}

#[test]
fn shortcuts_speed_up_a_larger_board() {
    let grid = GridSize::new(10, 10);
    let mut simulation =
        Simulation::new(GameConfig::seeded(grid, 99)).expect("10x10 has a circuit");

    let report = simulation.run(default_tick_limit(grid));

    assert_eq!(report.outcome, Outcome::BoardFull);
    assert_eq!(report.final_length, 100);
    assert!(report.shortcuts_taken > 0);
    assert!(simulation.ai().shortcuts().len() <= report.shortcuts_taken as usize);
}

#[test]
fn odd_board_fails_at_construction() {
    assert!(SnakeAi::new(GridSize::new(3, 3)).is_err());
    assert!(SnakeAi::new(GridSize::new(1, 8)).is_err());
    assert!(Simulation::new(GameConfig::seeded(GridSize::new(7, 9), 0)).is_err());
}
