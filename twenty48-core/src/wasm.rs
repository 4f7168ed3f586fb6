//! WASM bindings for twenty48-core
//!
//! Provides a JavaScript-friendly API for a browser front-end. Build with
//! `--no-default-features --features wasm`; randomness comes from a seed the
//! page supplies (e.g. `Math.random() * 2 ** 32`).

use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;

use crate::{Direction, Game, GameConfig, RngSource};

/// WASM-friendly wrapper around a game session
#[wasm_bindgen]
pub struct WasmGame {
    inner: Game,
    rng: RngSource<StdRng>,
}

#[wasm_bindgen]
impl WasmGame {
    /// Start a new game on a `size x size` board
    #[wasm_bindgen(constructor)]
    pub fn new(size: usize, seed: u64) -> Result<WasmGame, JsError> {
        let mut rng = RngSource::seeded(seed);
        let inner = Game::new(GameConfig::with_size(size), &mut rng)?;
        Ok(WasmGame { inner, rng })
    }

    /// Board as nested arrays, row-major, 0 = empty
    pub fn board(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(self.inner.board())?)
    }

    pub fn score(&self) -> u64 {
        self.inner.score()
    }

    /// "playing", "won" or "lost"
    pub fn status(&self) -> String {
        self.inner.status().as_str().to_string()
    }

    /// Apply "left", "right", "up" or "down". Returns true if tiles moved.
    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(&mut self, direction: &str) -> Result<bool, JsError> {
        let direction: Direction = direction.parse()?;
        Ok(matches!(
            self.inner.play(direction, &mut self.rng),
            crate::Turn::Moved { .. }
        ))
    }

    /// Deal a fresh board and reset score and status
    pub fn restart(&mut self) {
        self.inner.restart(&mut self.rng);
    }

    #[wasm_bindgen(js_name = canMove)]
    pub fn can_move(&self) -> bool {
        self.inner.board().can_move()
    }

    #[wasm_bindgen(js_name = hasWon)]
    pub fn has_won(&self) -> bool {
        self.inner.board().has_tile_at_least(self.inner.config().win_tile)
    }
}
