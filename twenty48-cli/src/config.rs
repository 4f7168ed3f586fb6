use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use twenty48_core::GameConfig;

/// Contents of the optional TOML config file.
///
/// ```toml
/// seed = 42
///
/// [game]
/// size = 5
/// win_tile = 4096
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl FileConfig {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}
