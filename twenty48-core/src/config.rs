use serde::{Deserialize, Serialize};

use crate::error::{BoardError, ConfigError};
use crate::MAX_TILE;

/// Game parameters a front-end may override.
///
/// Every field has a default, so an empty TOML table or `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board dimension (rows = columns).
    #[serde(default = "defaults::size")]
    pub size: usize,
    /// Smallest tile that counts as a win.
    #[serde(default = "defaults::win_tile")]
    pub win_tile: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { size: defaults::size(), win_tile: defaults::win_tile() }
    }
}

impl GameConfig {
    pub fn with_size(size: usize) -> Self {
        Self { size, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(BoardError::ZeroSize.into());
        }
        if self.win_tile < 4 || self.win_tile > MAX_TILE || !self.win_tile.is_power_of_two() {
            return Err(ConfigError::WinTile(self.win_tile));
        }
        Ok(())
    }
}

mod defaults {
    pub fn size() -> usize { 4 }
    pub fn win_tile() -> u32 { crate::WIN_TILE }
}
