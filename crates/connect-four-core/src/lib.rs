//! Connect Four - a gravity-bound four-in-a-row game engine
//!
//! This crate provides the core game logic, including:
//! - A fixed 6x7 board with gravity placement and win detection
//! - Player identities, marks and move timing
//! - Game state machine with full rule enforcement
//! - A computer opponent with easy, medium and hard difficulty levels
//!
//! # Architecture
//!
//! The game engine is designed to be platform-agnostic. It can be compiled to:
//! - Native Rust for server-side game hosting
//! - WebAssembly for client-side single-player or local multiplayer
//!
//! # Modules
//!
//! - [`board`]: Grid representation, gravity and four-in-a-row detection
//! - [`player`]: Player identities and marks
//! - [`clock`]: Wall-clock move timing
//! - [`game`]: Game state machine and state snapshots
//! - [`bot`]: Computer opponent strategies
//! - [`search`]: Position scoring and minimax search

pub mod board;
pub mod bot;
pub mod clock;
pub mod game;
pub mod player;
pub mod search;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use board::{Board, Cell, CENTER_COLUMN, COLS, CONNECT, ROWS};
pub use bot::Bot;
pub use clock::MoveClock;
pub use game::{
    Difficulty, Game, GameConfig, GameError, GameMode, GameResult, GameSnapshot, GameStatus,
    MoveOutcome, ParseSettingError,
};
pub use player::{Player, PlayerId, COMPUTER_NAME};
