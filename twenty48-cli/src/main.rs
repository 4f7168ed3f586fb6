//! Play 2048 in the terminal.
//!
//! Usage:
//!   # Interactive: one command per line (left/right/up/down, w/a/s/d, restart, quit)
//!   cargo run --release -- --size 4
//!
//!   # Scripted: apply a move list and print the final position
//!   cargo run --release -- --seed 42 --moves "left up right down"
//!
//!   # From a config file, with flags overriding it
//!   cargo run --release -- --config twenty48.toml --win-tile 4096

mod config;
mod input;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::Rng;

use twenty48_core::{Direction, Game, RngSource, Status, Turn};

use crate::config::FileConfig;
use crate::input::{parse_script, Command};

#[derive(Parser, Debug)]
#[command(name = "twenty48", about = "Play 2048 in the terminal")]
struct Args {
    /// TOML file with `seed` and a `[game]` table (`size`, `win_tile`)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Board dimension
    #[arg(long)]
    size: Option<usize>,

    /// Tile value that wins the game
    #[arg(long)]
    win_tile: Option<u32>,

    /// Seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Apply these moves non-interactively (e.g. "left up right" or "a,w,d")
    #[arg(long, value_name = "SCRIPT")]
    moves: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut file_config = match &args.config {
        Some(path) => FileConfig::from_toml(path)?,
        None => FileConfig::default(),
    };
    if let Some(size) = args.size {
        file_config.game.size = size;
    }
    if let Some(win_tile) = args.win_tile {
        file_config.game.win_tile = win_tile;
    }

    let seed = args
        .seed
        .or(file_config.seed)
        .unwrap_or_else(|| rand::rng().random());
    info!("seed {}", seed);

    let mut rng = RngSource::seeded(seed);
    let mut game = Game::new(file_config.game, &mut rng).context("invalid game configuration")?;

    match &args.moves {
        Some(script) => run_script(&mut game, &mut rng, script),
        None => run_interactive(&mut game, &mut rng),
    }
}

fn print_game(game: &Game) {
    print!("{}", game.board());
    println!("score: {}  status: {}", game.score(), game.status().as_str());
}

fn run_script(game: &mut Game, rng: &mut RngSource<StdRng>, script: &str) -> Result<()> {
    let moves = parse_script(script)?;
    let mut applied = 0;

    for direction in moves {
        match game.play(direction, rng) {
            Turn::Moved { .. } => applied += 1,
            Turn::NoChange => info!("{} did not move", direction),
            Turn::Ignored => break,
        }
        if game.status().is_over() {
            break;
        }
    }

    println!("moves applied: {}", applied);
    print_game(game);
    Ok(())
}

fn run_interactive(game: &mut Game, rng: &mut RngSource<StdRng>) -> Result<()> {
    println!("2048");
    println!("======");
    println!("Commands: left/right/up/down (or w/a/s/d), restart, quit");
    println!();
    print_game(game);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Restart => {
                game.restart(rng);
                print_game(game);
            }
            Command::Move(direction) => play_one(game, rng, direction),
        }
    }

    println!("Final score: {}", game.score());
    Ok(())
}

fn play_one(game: &mut Game, rng: &mut RngSource<StdRng>, direction: Direction) {
    match game.play(direction, rng) {
        Turn::Ignored => println!("Game is over. Type `restart` for a new game."),
        Turn::NoChange => println!("Nothing moves {}.", direction),
        Turn::Moved { score_gain, status } => {
            if score_gain > 0 {
                info!("+{}", score_gain);
            }
            print_game(game);
            match status {
                Status::Won => println!("You win!"),
                Status::Lost => println!("Game over."),
                Status::Playing => {}
            }
        }
    }
}
