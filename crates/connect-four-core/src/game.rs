//! Core game state machine.
//!
//! This module contains the main `Game` struct, its configuration and the
//! read-only `GameSnapshot` handed out to callers.

use crate::board::{Board, Cell, COLS, ROWS};
use crate::bot::Bot;
use crate::clock::{round_secs, MoveClock};
use crate::player::{Player, PlayerId, COMPUTER_NAME};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Player 1 always moves first
const FIRST_PLAYER: PlayerId = 0;

/// Seat taken by the computer in single-player games
const COMPUTER_SEAT: PlayerId = 1;

/// Who is playing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Two humans sharing the board
    #[default]
    Pvp,
    /// A human against the computer
    Ai,
}

/// Strength of the computer opponent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
}

/// Error parsing a mode or difficulty name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseSettingError {
    kind: &'static str,
    value: String,
}

impl FromStr for GameMode {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pvp" => Ok(GameMode::Pvp),
            "ai" => Ok(GameMode::Ai),
            _ => Err(ParseSettingError {
                kind: "mode",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseSettingError {
                kind: "difficulty",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// Errors that can occur when playing a move
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Invalid column")]
    InvalidColumn,

    #[error("Column full")]
    ColumnFull,

    #[error("Game already over")]
    GameOver,

    #[error("Not AI turn")]
    NotComputerTurn,

    #[error("No valid moves")]
    NoValidMoves,
}

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Win(PlayerId),
    Draw,
}

/// Game status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Finished(GameResult),
}

impl GameStatus {
    pub fn result(&self) -> Option<GameResult> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::Finished(result) => Some(*result),
        }
    }
}

/// Settings for a new game.
///
/// Every field is optional on the wire; missing ones take the defaults
/// (`pvp`, "Player 1", "Player 2", `hard`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: GameMode,
    pub player1: String,
    /// Ignored in `ai` mode, where player 2 is always the computer
    pub player2: String,
    pub difficulty: Difficulty,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Pvp,
            player1: "Player 1".to_string(),
            player2: "Player 2".to_string(),
            difficulty: Difficulty::Hard,
        }
    }
}

impl GameConfig {
    /// Two human players
    pub fn pvp(player1: impl Into<String>, player2: impl Into<String>) -> Self {
        Self {
            mode: GameMode::Pvp,
            player1: player1.into(),
            player2: player2.into(),
            ..Self::default()
        }
    }

    /// A human against the computer
    pub fn vs_computer(player1: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            mode: GameMode::Ai,
            player1: player1.into(),
            player2: COMPUTER_NAME.to_string(),
            difficulty,
        }
    }
}

/// An accepted move and what it led to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub player: PlayerId,
    pub row: usize,
    pub column: usize,
    /// Set when this move ended the game
    pub result: Option<GameResult>,
}

/// Read-only copy of a game's state, suitable for sending to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Grid rows, top first
    pub board: [[Cell; COLS]; ROWS],
    pub mode: GameMode,
    pub difficulty: Difficulty,
    /// Both players, with move times rounded to hundredths of a second
    pub players: [Player; 2],
    pub current_player: PlayerId,
    pub winner: Option<PlayerId>,
    pub game_over: bool,
    pub winning_cells: Vec<(usize, usize)>,
}

impl GameSnapshot {
    pub fn current_player_name(&self) -> Option<&str> {
        self.player_name(self.current_player)
    }

    pub fn winner_name(&self) -> Option<&str> {
        self.winner.and_then(|id| self.player_name(id))
    }

    fn player_name(&self, id: PlayerId) -> Option<&str> {
        self.players.get(id as usize).map(|p| p.name.as_str())
    }
}

/// One game of Connect Four
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    mode: GameMode,
    difficulty: Difficulty,
    players: [Player; 2],
    current_player: PlayerId,
    status: GameStatus,
    /// The line that won the game, empty otherwise
    winning_cells: Vec<(usize, usize)>,
    clock: MoveClock,
    /// Present only in `ai` mode
    bot: Option<Bot>,
}

impl Game {
    /// Create a new game
    pub fn new(config: GameConfig) -> Self {
        let bot = match config.mode {
            GameMode::Pvp => None,
            GameMode::Ai => Some(Bot::new(
                Player::mark_for(COMPUTER_SEAT),
                config.difficulty,
            )),
        };
        Self::build(config, bot)
    }

    /// Create a new game whose computer opponent draws from a seeded RNG
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        let bot = match config.mode {
            GameMode::Pvp => None,
            GameMode::Ai => Some(Bot::with_seed(
                Player::mark_for(COMPUTER_SEAT),
                config.difficulty,
                seed,
            )),
        };
        Self::build(config, bot)
    }

    fn build(config: GameConfig, bot: Option<Bot>) -> Self {
        let player2 = match config.mode {
            GameMode::Pvp => config.player2,
            GameMode::Ai => COMPUTER_NAME.to_string(),
        };

        Self {
            board: Board::new(),
            mode: config.mode,
            difficulty: config.difficulty,
            players: [Player::new(0, config.player1), Player::new(1, player2)],
            current_player: FIRST_PLAYER,
            status: GameStatus::InProgress,
            winning_cells: Vec::new(),
            clock: MoveClock::start(),
            bot,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id as usize)
    }

    pub fn is_game_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Finished(GameResult::Win(id)) => Some(id),
            _ => None,
        }
    }

    pub fn winning_cells(&self) -> &[(usize, usize)] {
        &self.winning_cells
    }

    /// Columns that can still take a piece
    pub fn valid_columns(&self) -> Vec<usize> {
        self.board.valid_columns()
    }

    /// Whether the next move belongs to the computer
    pub fn is_computer_turn(&self) -> bool {
        self.bot.is_some() && self.current_player == COMPUTER_SEAT && !self.is_game_over()
    }

    /// Drop the current player's piece into `column`.
    ///
    /// The game is left untouched unless the move is accepted.
    pub fn apply_move(&mut self, column: usize) -> Result<MoveOutcome, GameError> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }

        let player = self.current_player;
        let row = self
            .board
            .drop_piece(column, self.players[player as usize].mark)?;

        self.players[player as usize].move_time += self.clock.lap();

        if let Some(cells) = self.board.winning_run(row, column) {
            self.winning_cells = cells;
            self.status = GameStatus::Finished(GameResult::Win(player));
        } else if self.board.is_full() {
            self.status = GameStatus::Finished(GameResult::Draw);
        } else {
            self.current_player = Player::opponent_of(player);
        }

        Ok(MoveOutcome {
            player,
            row,
            column,
            result: self.status.result(),
        })
    }

    /// Let the computer choose and play a column.
    pub fn computer_move(&mut self) -> Result<MoveOutcome, GameError> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }

        let column = match self.bot.as_mut() {
            Some(bot) if self.current_player == COMPUTER_SEAT => bot.choose_column(&self.board),
            _ => return Err(GameError::NotComputerTurn),
        };

        let column = column.ok_or(GameError::NoValidMoves)?;
        self.apply_move(column)
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> GameSnapshot {
        let mut players = self.players.clone();
        for player in &mut players {
            player.move_time = round_secs(player.move_time);
        }

        GameSnapshot {
            board: *self.board.rows(),
            mode: self.mode,
            difficulty: self.difficulty,
            players,
            current_player: self.current_player,
            winner: self.winner(),
            game_over: self.is_game_over(),
            winning_cells: self.winning_cells.clone(),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
