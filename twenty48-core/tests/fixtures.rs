//! Move fixtures
//!
//! Loads hand-checked boards from `tests/data/moves.json` and verifies each
//! directional move produces the recorded board, moved flag and score gain.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use twenty48_core::{Board, Direction};

#[derive(Debug, Deserialize)]
struct FixtureFile {
    version: String,
    cases: Vec<Case>,
}

#[derive(Debug, Deserialize)]
struct Case {
    description: String,
    board: Board,
    direction: Direction,
    expected: Board,
    moved: bool,
    score_gain: u64,
}

fn load_fixtures(path: &Path) -> FixtureFile {
    let file = File::open(path).expect("Failed to open move fixtures");
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).expect("Failed to parse move fixtures")
}

#[test]
fn test_move_fixtures() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/moves.json");
    let data = load_fixtures(&path);
    assert_eq!(data.version, "1");
    assert!(!data.cases.is_empty());

    let mut failures: Vec<String> = Vec::new();

    for case in &data.cases {
        let snapshot = case.board.clone();
        let out = case.board.shift(case.direction);
        let mut errors: Vec<String> = Vec::new();

        if out.board != case.expected {
            errors.push(format!(
                "board: expected {:?}, got {:?}",
                case.expected, out.board
            ));
        }
        if out.moved != case.moved {
            errors.push(format!("moved: expected {}, got {}", case.moved, out.moved));
        }
        if out.score_gain != case.score_gain {
            errors.push(format!(
                "score_gain: expected {}, got {}",
                case.score_gain, out.score_gain
            ));
        }
        if case.board != snapshot {
            errors.push("input board was modified".to_string());
        }

        if !errors.is_empty() {
            failures.push(format!(
                "{} ({}): {}",
                case.description,
                case.direction,
                errors.join("; ")
            ));
        }
    }

    assert!(
        failures.is_empty(),
        "{} fixture(s) failed:\n{}",
        failures.len(),
        failures.join("\n")
    );
}

#[test]
fn test_board_json_round_trip_shape() {
    let board: Board = serde_json::from_str("[[2, 0], [0, 4]]").unwrap();
    assert_eq!(board.get(1, 1), Some(4));
    assert_eq!(serde_json::to_string(&board).unwrap(), "[[2,0],[0,4]]");
}

#[test]
fn test_malformed_board_json_is_rejected() {
    for json in ["[]", "[[2, 0], [0]]", "[[3, 0], [0, 0]]", "[[2, 0, 0], [0, 0, 0]]"] {
        let result: Result<Board, _> = serde_json::from_str(json);
        assert!(result.is_err(), "{json} should not deserialize");
    }
}
