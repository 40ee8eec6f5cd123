//! WebSocket protocol messages for Connect Four.

use connect_four_core::{GameConfig, GameSnapshot};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Result text sent back for an accepted move
pub const MOVE_ACCEPTED: &str = "Move accepted";

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    /// Start a new game; missing settings take their defaults
    StartGame(GameConfig),

    /// Drop a piece for the human whose turn it is. The column may be sent
    /// as a number or as a numeric string.
    Move {
        game_id: Uuid,
        #[serde(deserialize_with = "column_from_number_or_text")]
        column: i64,
    },

    /// Ask the computer to play its turn
    ComputerMove { game_id: Uuid },

    /// Fetch the current state of a game
    GetState { game_id: Uuid },

    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ServerMessage {
    /// Game created
    GameStarted { game_id: Uuid, state: GameSnapshot },

    /// Outcome of a human or computer move: `MOVE_ACCEPTED` or the reason
    /// it was refused, plus the state afterwards
    MoveResult {
        game_id: Uuid,
        result: String,
        state: GameSnapshot,
    },

    /// Current game state
    GameState { game_id: Uuid, state: GameSnapshot },

    /// Request could not be served
    Error { code: ErrorCode, message: String },

    /// Pong response
    Pong,
}

/// Error categories reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed message, unknown game id or out-of-range column
    BadRequest,
}

impl ServerMessage {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            code: ErrorCode::BadRequest,
            message: message.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawColumn {
    Number(i64),
    Text(String),
}

fn column_from_number_or_text<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawColumn::deserialize(deserializer)? {
        RawColumn::Number(column) => Ok(column),
        RawColumn::Text(text) => text.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("column '{}' is not an integer", text))
        }),
    }
}
