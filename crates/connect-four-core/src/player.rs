//! Player identities.
//!
//! Each game has exactly two players. Player 1 always moves first and plays
//! `X`; player 2 plays `O` and is the computer in single-player games.

use crate::board::Cell;
use serde::{Deserialize, Serialize};

/// Player identifier (0 for player 1, 1 for player 2)
pub type PlayerId = u8;

/// Name given to player 2 in games against the computer
pub const COMPUTER_NAME: &str = "Computer";

/// A player taking part in a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Mark this player drops into the grid
    pub mark: Cell,
    /// Accumulated wall-clock time spent on this player's moves, in seconds
    pub move_time: f64,
}

impl Player {
    pub fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            mark: Self::mark_for(id),
            move_time: 0.0,
        }
    }

    /// Mark assigned to a player id
    pub fn mark_for(id: PlayerId) -> Cell {
        match id {
            0 => Cell::X,
            _ => Cell::O,
        }
    }

    /// The id of the other player
    pub fn opponent_of(id: PlayerId) -> PlayerId {
        1 - id.min(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_by_seat() {
        let p1 = Player::new(0, "Ana".into());
        let p2 = Player::new(1, "Ben".into());
        assert_eq!(p1.mark, Cell::X);
        assert_eq!(p2.mark, Cell::O);
        assert_eq!(p1.move_time, 0.0);
    }

    #[test]
    fn test_opponent_of() {
        assert_eq!(Player::opponent_of(0), 1);
        assert_eq!(Player::opponent_of(1), 0);
    }
}
