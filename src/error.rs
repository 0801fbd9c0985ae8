use thiserror::Error;

/// Configuration failures when building a circuit for a board.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum CircuitError {
    #[error("board {width}x{height} is too small: both sides must be at least 2")]
    BoardTooSmall { width: u16, height: u16 },
    #[error("board {width}x{height} has no even side, so no circuit can be built")]
    NoEvenSide { width: u16, height: u16 },
}
