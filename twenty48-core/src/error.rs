//! Error types for board construction, direction parsing and game configuration.

use thiserror::Error;

/// A grid that cannot be a 2048 board.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("board size must be at least 1")]
    ZeroSize,
    #[error("row {row} has {len} cells, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },
    #[error("cell ({row}, {col}) holds {value}, expected 0 or a power of two from 2 to 2^30")]
    InvalidTile { row: usize, col: usize, value: u32 },
}

/// Input that does not name one of the four directions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown direction {0:?} (expected left, right, up, down or one of w/a/s/d)")]
pub struct ParseDirectionError(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid board: {0}")]
    Board(#[from] BoardError),
    #[error("win tile {0} is not a power of two from 4 to 2^30")]
    WinTile(u32),
    #[error("board is {found}x{found} but the game is configured for {expected}x{expected}")]
    SizeMismatch { expected: usize, found: usize },
}
