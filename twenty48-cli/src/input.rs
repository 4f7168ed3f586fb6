//! Parsing of player commands, typed interactively or given as a move script.

use std::str::FromStr;

use anyhow::Result;
use twenty48_core::Direction;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Move(Direction),
    Restart,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "q" | "quit" | "exit" => Ok(Command::Quit),
            "n" | "new" | "restart" => Ok(Command::Restart),
            other => Ok(Command::Move(other.parse()?)),
        }
    }
}

/// Split a move script like `"left, up up right"` into directions.
pub fn parse_script(script: &str) -> Result<Vec<Direction>> {
    script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| token.parse::<Direction>().map_err(anyhow::Error::from))
        .collect()
}
