//! Game session: the board plus score and status, advanced one input at a time.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::random::RandomSource;
use crate::{Board, Direction};

/// Session status.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Playing,
    Won,
    Lost,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Playing => "playing",
            Status::Won => "won",
            Status::Lost => "lost",
        }
    }

    #[inline]
    pub fn is_over(self) -> bool {
        self != Status::Playing
    }
}

/// What one directional input did to the session.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Turn {
    /// The game is already over; nothing changed.
    Ignored,
    /// The direction does not move any tile; nothing changed.
    NoChange,
    /// Tiles moved, a tile was spawned and the score advanced.
    Moved { score_gain: u64, status: Status },
}

/// A single game of 2048.
///
/// Inputs are applied strictly in order through [`Game::play`]; the session
/// never changes on its own.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Game {
    config: GameConfig,
    board: Board,
    score: u64,
    status: Status,
}

impl Game {
    /// Start a game with a fresh two-tile board.
    pub fn new<R: RandomSource + ?Sized>(
        config: GameConfig,
        rng: &mut R,
    ) -> Result<Game, ConfigError> {
        config.validate()?;
        let board = Board::opening(config.size, rng);
        debug!("new {}x{} game, win tile {}", config.size, config.size, config.win_tile);
        Ok(Game { config, board, score: 0, status: Status::Playing })
    }

    /// Resume from an existing board. The status starts as playing and is
    /// re-evaluated after the next accepted move.
    pub fn with_board(config: GameConfig, board: Board, score: u64) -> Result<Game, ConfigError> {
        config.validate()?;
        if board.size() != config.size {
            return Err(ConfigError::SizeMismatch { expected: config.size, found: board.size() });
        }
        Ok(Game { config, board, score, status: Status::Playing })
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Apply one directional input.
    ///
    /// When the board moves: spawn a tile on the result, add the merge gain to
    /// the score, then check for a win before checking for a loss.
    pub fn play<R: RandomSource + ?Sized>(&mut self, direction: Direction, rng: &mut R) -> Turn {
        if self.status.is_over() {
            trace!("ignoring {} after game ended ({})", direction, self.status.as_str());
            return Turn::Ignored;
        }

        let outcome = self.board.shift(direction);
        if !outcome.moved {
            trace!("{} does not move any tile", direction);
            return Turn::NoChange;
        }

        self.board = outcome.board.spawn_random_tile(rng);
        self.score += outcome.score_gain;
        self.status = if self.board.has_tile_at_least(self.config.win_tile) {
            Status::Won
        } else if self.board.no_moves_available() {
            Status::Lost
        } else {
            Status::Playing
        };

        if self.status.is_over() {
            debug!(
                "game {} with score {}, max tile {}",
                self.status.as_str(),
                self.score,
                self.board.max_tile()
            );
        }

        Turn::Moved { score_gain: outcome.score_gain, status: self.status }
    }

    /// Throw away the current game and deal a fresh board.
    pub fn restart<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        debug!("restart after score {}", self.score);
        self.board = Board::opening(self.config.size, rng);
        self.score = 0;
        self.status = Status::Playing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&[u32]]) -> Board {
        Board::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    fn game(rows: &[&[u32]]) -> Game {
        let b = board(rows);
        Game::with_board(GameConfig::with_size(b.size()), b, 0).unwrap()
    }

    #[test]
    fn test_new_game() {
        let g = Game::new(GameConfig::default(), &mut || 0.0).unwrap();
        assert_eq!(g.score(), 0);
        assert_eq!(g.status(), Status::Playing);
        assert_eq!(g.board().size(), 4);
        assert_eq!(g.board().empty_cells().len(), 14);
    }

    #[test]
    fn test_new_game_rejects_bad_config() {
        assert!(Game::new(GameConfig::with_size(0), &mut || 0.0).is_err());
        let config = GameConfig { win_tile: 100, ..GameConfig::default() };
        assert_eq!(Game::new(config, &mut || 0.0), Err(ConfigError::WinTile(100)));
    }

    #[test]
    fn test_with_board_size_mismatch() {
        let err =
            Game::with_board(GameConfig::default(), board(&[&[2, 0], &[0, 0]]), 0).unwrap_err();
        assert_eq!(err, ConfigError::SizeMismatch { expected: 4, found: 2 });
    }

    #[test]
    fn test_play_moves_spawns_and_scores() {
        let mut g = game(&[&[2, 2, 0], &[0, 0, 0], &[0, 0, 0]]);
        let turn = g.play(Direction::Left, &mut || 0.0);
        assert_eq!(turn, Turn::Moved { score_gain: 4, status: Status::Playing });
        assert_eq!(g.score(), 4);
        // spawn lands on the first empty cell after the merge
        assert_eq!(g.board(), &board(&[&[4, 2, 0], &[0, 0, 0], &[0, 0, 0]]));
    }

    #[test]
    fn test_play_no_change_leaves_state() {
        let mut g = game(&[&[2, 4], &[0, 0]]);
        let before = g.clone();
        let mut draws = 0;
        let turn = g.play(Direction::Left, &mut || {
            draws += 1;
            0.0
        });
        assert_eq!(turn, Turn::NoChange);
        assert_eq!(draws, 0);
        assert_eq!(g, before);
    }

    #[test]
    fn test_play_detects_win() {
        let mut g = game(&[&[1024, 1024], &[0, 0]]);
        let turn = g.play(Direction::Left, &mut || 0.0);
        assert_eq!(turn, Turn::Moved { score_gain: 2048, status: Status::Won });
        assert_eq!(g.status(), Status::Won);
        assert_eq!(g.play(Direction::Down, &mut || 0.0), Turn::Ignored);
    }

    #[test]
    fn test_play_detects_loss() {
        // After moving right the spawn fills the last hole with a 2 that has no equal neighbour.
        let mut g = game(&[&[4, 0], &[8, 16]]);
        let turn = g.play(Direction::Right, &mut || 0.0);
        assert_eq!(g.board(), &board(&[&[2, 4], &[8, 16]]));
        assert_eq!(turn, Turn::Moved { score_gain: 0, status: Status::Lost });
        assert_eq!(g.play(Direction::Left, &mut || 0.0), Turn::Ignored);
    }

    #[test]
    fn test_win_takes_precedence_over_loss() {
        // 2048 is created and the board ends up full with no merges left
        let mut g = game(&[&[1024, 1024, 4], &[4, 8, 16], &[32, 64, 128]]);
        let turn = g.play(Direction::Left, &mut || 0.0);
        assert_eq!(g.board(), &board(&[&[2048, 4, 2], &[4, 8, 16], &[32, 64, 128]]));
        assert!(g.board().no_moves_available());
        assert_eq!(turn, Turn::Moved { score_gain: 2048, status: Status::Won });
    }

    #[test]
    fn test_custom_win_tile() {
        let b = board(&[&[8, 8], &[0, 0]]);
        let config = GameConfig { size: 2, win_tile: 16 };
        let mut g = Game::with_board(config, b, 10).unwrap();
        let turn = g.play(Direction::Left, &mut || 0.0);
        assert_eq!(turn, Turn::Moved { score_gain: 16, status: Status::Won });
        assert_eq!(g.score(), 26);
    }

    #[test]
    fn test_restart() {
        let mut g = game(&[&[1024, 1024], &[0, 0]]);
        g.play(Direction::Left, &mut || 0.0);
        assert!(g.status().is_over());

        g.restart(&mut || 0.0);
        assert_eq!(g.score(), 0);
        assert_eq!(g.status(), Status::Playing);
        assert_eq!(g.board(), &board(&[&[2, 2], &[0, 0]]));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Won).unwrap(), "\"won\"");
        let status: Status = serde_json::from_str("\"lost\"").unwrap();
        assert_eq!(status, Status::Lost);
    }
}
