//! WebAssembly bindings for the Connect Four engine.
//!
//! This module exposes the game engine to JavaScript through wasm-bindgen,
//! so a browser can host a game without the server.

use wasm_bindgen::prelude::*;

use crate::game::{Difficulty, Game, GameConfig, GameMode};

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a new game. `mode` is "pvp" or "ai"; `difficulty` is "easy",
    /// "medium" or "hard".
    #[wasm_bindgen(constructor)]
    pub fn new(
        mode: &str,
        player1: &str,
        player2: &str,
        difficulty: &str,
    ) -> Result<WasmGame, JsValue> {
        let mode: GameMode = mode
            .parse()
            .map_err(|e| JsValue::from_str(&format!("{}", e)))?;
        let difficulty: Difficulty = difficulty
            .parse()
            .map_err(|e| JsValue::from_str(&format!("{}", e)))?;

        Ok(WasmGame {
            game: Game::new(GameConfig {
                mode,
                player1: player1.to_string(),
                player2: player2.to_string(),
                difficulty,
            }),
        })
    }

    /// Get the current game state as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        serde_json::to_string(&self.game.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Drop the current player's piece, returns the move outcome as JSON
    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(&mut self, column: usize) -> Result<String, JsValue> {
        match self.game.apply_move(column) {
            Ok(outcome) => Ok(serde_json::to_string(&outcome).unwrap_or_else(|_| "{}".to_string())),
            Err(e) => Err(JsValue::from_str(&e.to_string())),
        }
    }

    /// Let the computer play, returns the move outcome as JSON
    #[wasm_bindgen(js_name = computerMove)]
    pub fn computer_move(&mut self) -> Result<String, JsValue> {
        match self.game.computer_move() {
            Ok(outcome) => Ok(serde_json::to_string(&outcome).unwrap_or_else(|_| "{}".to_string())),
            Err(e) => Err(JsValue::from_str(&e.to_string())),
        }
    }

    /// Check if the game is finished
    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.game.is_game_over()
    }

    /// Check if the computer should move next
    #[wasm_bindgen(js_name = isComputerTurn)]
    pub fn is_computer_turn(&self) -> bool {
        self.game.is_computer_turn()
    }

    /// Get the current player ID
    #[wasm_bindgen(js_name = getCurrentPlayer)]
    pub fn get_current_player(&self) -> u8 {
        self.game.current_player()
    }

    /// Get the winner (if any)
    #[wasm_bindgen(js_name = getWinner)]
    pub fn get_winner(&self) -> Option<u8> {
        self.game.winner()
    }

    /// Columns that can still take a piece
    #[wasm_bindgen(js_name = getValidColumns)]
    pub fn get_valid_columns(&self) -> Vec<u32> {
        self.game
            .valid_columns()
            .into_iter()
            .map(|col| col as u32)
            .collect()
    }
}
