use thiserror::Error;

/// Errors raised by the simulation core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Every cell of the board is covered by the snake, so food has nowhere to go
    #[error("board is full: no free cell left on the {width}x{height} grid")]
    BoardFull { width: usize, height: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type GameResult<T> = Result<T, GameError>;
