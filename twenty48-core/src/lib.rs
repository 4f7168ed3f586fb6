//! 2048 board engine.
//!
//! # Board Representation
//!
//! ```text
//! rows[r][c], row-major, N x N, N >= 1
//!
//!   0 = empty cell
//!   2, 4, 8, ... = tile value (power of two >= 2, at most MAX_TILE)
//! ```
//!
//! # Moves
//!
//! There is exactly one merge rule, [`merge_line`], which slides a line toward
//! index 0. The four directions are derived from it:
//!
//! ```text
//! left  = merge every row
//! right = reverse rows, left, reverse rows
//! up    = transpose, left, transpose
//! down  = transpose, right, transpose
//! ```
//!
//! Boards are values. Every transform returns a new [`Board`] and leaves its
//! input untouched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod config;
pub mod error;
pub mod random;
pub mod session;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::GameConfig;
pub use error::{BoardError, ConfigError, ParseDirectionError};
pub use random::{RandomSource, RngSource};
pub use session::{Game, Status, Turn};

#[cfg(feature = "thread-rng")]
pub use random::thread_source;

/// Tile value that wins the game.
pub const WIN_TILE: u32 = 2048;

/// Draws below this threshold spawn a 2, draws at or above it spawn a 4.
pub const TWO_PROBABILITY: f64 = 0.9;

/// Largest tile a board may hold. Two `MAX_TILE` tiles never merge, so every
/// merge result fits in a `u32` and no move can produce a tile above this.
pub const MAX_TILE: u32 = 1 << 30;

/// Two adjacent tiles merge iff they are equal, non-empty and below [`MAX_TILE`].
#[inline]
fn merges_with(a: u32, b: u32) -> bool {
    a == b && a != 0 && a < MAX_TILE
}

/// Move direction.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" => Ok(Direction::Up),
            "down" | "s" => Ok(Direction::Down),
            "left" | "a" => Ok(Direction::Left),
            "right" | "d" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// Result of merging a single line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineMerge {
    /// Merged line, zero-padded to the input length.
    pub line: Vec<u32>,
    /// Sum of the tiles created by merges.
    pub score_gain: u64,
}

/// Slide and merge one line toward index 0.
///
/// Zeros are dropped, then equal neighbours are merged left to right. A tile
/// produced by a merge is never merged again in the same pass, so `[2, 2, 2]`
/// becomes `[4, 2, 0]` and `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]`. Tiles at
/// [`MAX_TILE`] stay where they slide.
pub fn merge_line(line: &[u32]) -> LineMerge {
    let tiles: Vec<u32> = line.iter().copied().filter(|&v| v != 0).collect();
    let mut merged = Vec::with_capacity(line.len());
    let mut score_gain = 0u64;
    let mut i = 0;

    while i < tiles.len() {
        if i + 1 < tiles.len() && merges_with(tiles[i], tiles[i + 1]) {
            let value = tiles[i] * 2;
            merged.push(value);
            score_gain += u64::from(value);
            i += 2;
        } else {
            merged.push(tiles[i]);
            i += 1;
        }
    }

    merged.resize(line.len(), 0);
    LineMerge { line: merged, score_gain }
}

/// Draw a new tile value: 2 when the draw is below [`TWO_PROBABILITY`], else 4.
///
/// Consumes exactly one draw.
#[inline]
pub fn random_tile_value<R: RandomSource + ?Sized>(rng: &mut R) -> u32 {
    if rng.next_unit() < TWO_PROBABILITY { 2 } else { 4 }
}

/// Result of a directional move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The board after sliding and merging (no tile spawned).
    pub board: Board,
    /// True iff `board` differs from the input in at least one cell.
    pub moved: bool,
    /// Sum of the tiles created by merges.
    pub score_gain: u64,
}

impl MoveOutcome {
    fn map_board(self, f: impl FnOnce(&Board) -> Board) -> MoveOutcome {
        MoveOutcome {
            board: f(&self.board),
            moved: self.moved,
            score_gain: self.score_gain,
        }
    }
}

/// An N x N 2048 board.
///
/// Construction validates shape and tile values, so every `Board` is square,
/// non-empty and holds only zeros and powers of two from 2 to [`MAX_TILE`].
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")]
pub struct Board {
    rows: Vec<Vec<u32>>,
}

impl Board {
    /// Create a `size x size` board with every cell empty.
    pub fn empty(size: usize) -> Result<Board, BoardError> {
        if size == 0 {
            return Err(BoardError::ZeroSize);
        }
        Ok(Board::zeros(size))
    }

    /// Build a board from rows, rejecting anything that is not a valid grid.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Board, BoardError> {
        let size = rows.len();
        if size == 0 {
            return Err(BoardError::ZeroSize);
        }
        for (r, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(BoardError::NotSquare { row: r, len: row.len(), size });
            }
            for (c, &value) in row.iter().enumerate() {
                if value != 0 && (value == 1 || value > MAX_TILE || !value.is_power_of_two()) {
                    return Err(BoardError::InvalidTile { row: r, col: c, value });
                }
            }
        }
        Ok(Board { rows })
    }

    /// Opening position: an empty board with two spawned tiles.
    ///
    /// The second tile is spawned onto the board already holding the first.
    pub fn init<R: RandomSource + ?Sized>(size: usize, rng: &mut R) -> Result<Board, BoardError> {
        if size == 0 {
            return Err(BoardError::ZeroSize);
        }
        Ok(Board::opening(size, rng))
    }

    /// [`Board::init`] with the thread-local generator.
    #[cfg(feature = "thread-rng")]
    pub fn init_default(size: usize) -> Result<Board, BoardError> {
        Board::init(size, &mut thread_source())
    }

    pub(crate) fn zeros(size: usize) -> Board {
        Board { rows: vec![vec![0; size]; size] }
    }

    /// [`Board::init`] for a size that is already known to be non-zero.
    pub(crate) fn opening<R: RandomSource + ?Sized>(size: usize, rng: &mut R) -> Board {
        Board::zeros(size).spawn_random_tile(rng).spawn_random_tile(rng)
    }

    /// Grid dimension.
    #[inline]
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<u32>> {
        self.rows
    }

    /// Coordinates of empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for (r, row) in self.rows.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value == 0 {
                    cells.push((r, c));
                }
            }
        }
        cells
    }

    pub fn max_tile(&self) -> u32 {
        self.rows.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Sum of all tiles. Moves never change it.
    pub fn sum(&self) -> u64 {
        self.rows.iter().flatten().map(|&v| u64::from(v)).sum()
    }

    /// Place one random tile on a random empty cell.
    ///
    /// A full board is returned as is and consumes no draws. Otherwise the
    /// first draw picks the cell (`floor(draw * empty_count)`) and the second
    /// picks the value via [`random_tile_value`].
    pub fn spawn_random_tile<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Board {
        let empties = self.empty_cells();
        if empties.is_empty() {
            return self.clone();
        }

        // Draws outside [0, 1) are clamped onto the list.
        let idx = ((rng.next_unit() * empties.len() as f64).floor().max(0.0) as usize)
            .min(empties.len() - 1);
        let (r, c) = empties[idx];

        let mut board = self.clone();
        board.rows[r][c] = random_tile_value(rng);
        board
    }

    /// [`Board::spawn_random_tile`] with the thread-local generator.
    #[cfg(feature = "thread-rng")]
    pub fn spawn_random_tile_default(&self) -> Board {
        self.spawn_random_tile(&mut thread_source())
    }

    /// Slide toward column 0.
    pub fn move_left(&self) -> MoveOutcome {
        let mut score_gain = 0;
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let merged = merge_line(row);
                score_gain += merged.score_gain;
                merged.line
            })
            .collect();
        let board = Board { rows };
        let moved = board != *self;
        MoveOutcome { board, moved, score_gain }
    }

    /// Slide toward the last column.
    pub fn move_right(&self) -> MoveOutcome {
        self.reverse_rows().move_left().map_board(Board::reverse_rows)
    }

    /// Slide toward row 0.
    pub fn move_up(&self) -> MoveOutcome {
        self.transpose().move_left().map_board(Board::transpose)
    }

    /// Slide toward the last row.
    pub fn move_down(&self) -> MoveOutcome {
        self.transpose().move_right().map_board(Board::transpose)
    }

    pub fn shift(&self, direction: Direction) -> MoveOutcome {
        match direction {
            Direction::Up => self.move_up(),
            Direction::Down => self.move_down(),
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
        }
    }

    fn reverse_rows(&self) -> Board {
        let rows = self
            .rows
            .iter()
            .map(|row| row.iter().rev().copied().collect())
            .collect();
        Board { rows }
    }

    fn transpose(&self) -> Board {
        let n = self.size();
        let rows = (0..n)
            .map(|c| (0..n).map(|r| self.rows[r][c]).collect())
            .collect();
        Board { rows }
    }

    pub fn has_tile_at_least(&self, threshold: u32) -> bool {
        self.rows.iter().flatten().any(|&v| v >= threshold)
    }

    /// True iff some tile is at least [`WIN_TILE`].
    pub fn has_won(&self) -> bool {
        self.has_tile_at_least(WIN_TILE)
    }

    /// True iff the board is full and no two orthogonal neighbours can merge.
    pub fn no_moves_available(&self) -> bool {
        let n = self.size();
        for r in 0..n {
            for c in 0..n {
                let value = self.rows[r][c];
                if value == 0 {
                    return false;
                }
                if c + 1 < n && merges_with(value, self.rows[r][c + 1]) {
                    return false;
                }
                if r + 1 < n && merges_with(value, self.rows[r + 1][c]) {
                    return false;
                }
            }
        }
        true
    }

    #[inline]
    pub fn can_move(&self) -> bool {
        !self.no_moves_available()
    }
}

/// Structural equality: same dimensions and every cell equal.
pub fn boards_equal(a: &Board, b: &Board) -> bool {
    a == b
}

impl TryFrom<Vec<Vec<u32>>> for Board {
    type Error = BoardError;

    fn try_from(rows: Vec<Vec<u32>>) -> Result<Self, Self::Error> {
        Board::from_rows(rows)
    }
}

impl From<Board> for Vec<Vec<u32>> {
    fn from(board: Board) -> Self {
        board.rows
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows.iter()).finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.max_tile().to_string().len().max(1);
        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .map(|&v| {
                    if v == 0 {
                        format!("{:>width$}", ".")
                    } else {
                        format!("{:>width$}", v)
                    }
                })
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}
