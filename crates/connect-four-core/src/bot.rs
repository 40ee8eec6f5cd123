//! Computer opponent.
//!
//! This module provides the three difficulty levels of the computer player:
//! - Easy: Random valid column
//! - Medium: Win if possible, otherwise block, otherwise take the centre
//! - Hard: Minimax with alpha-beta pruning over a windowed heuristic

use crate::board::{Board, Cell, CENTER_COLUMN};
use crate::game::Difficulty;
use crate::search::Minimax;
use rand::prelude::*;

/// A computer player that picks columns for one mark
#[derive(Debug, Clone)]
pub struct Bot {
    pub mark: Cell,
    pub difficulty: Difficulty,
    rng: StdRng,
}

impl Bot {
    pub fn new(mark: Cell, difficulty: Difficulty) -> Self {
        Self {
            mark,
            difficulty,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(mark: Cell, difficulty: Difficulty, seed: u64) -> Self {
        Self {
            mark,
            difficulty,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose a column to play, or `None` when the board is full
    pub fn choose_column(&mut self, board: &Board) -> Option<usize> {
        let valid = board.valid_columns();
        if valid.is_empty() {
            return None;
        }

        match self.difficulty {
            Difficulty::Easy => self.choose_easy(&valid),
            Difficulty::Medium => self.choose_medium(board, &valid),
            Difficulty::Hard => self.choose_hard(board, &valid),
        }
    }

    /// Easy: any open column
    fn choose_easy(&mut self, valid: &[usize]) -> Option<usize> {
        valid.choose(&mut self.rng).copied()
    }

    /// Medium: greedy one-ply lookahead
    fn choose_medium(&mut self, board: &Board, valid: &[usize]) -> Option<usize> {
        // Win now
        if let Some(&col) = valid.iter().find(|&&c| board.is_winning_drop(c, self.mark)) {
            return Some(col);
        }

        // Block the opponent's win
        let opponent = self.mark.opponent();
        if let Some(&col) = valid.iter().find(|&&c| board.is_winning_drop(c, opponent)) {
            return Some(col);
        }

        if valid.contains(&CENTER_COLUMN) {
            return Some(CENTER_COLUMN);
        }

        self.choose_easy(valid)
    }

    /// Hard: minimax search, falling back to a random column if the search
    /// comes back without a playable one
    fn choose_hard(&mut self, board: &Board, valid: &[usize]) -> Option<usize> {
        let (_, best) = Minimax::new(self.mark, &mut self.rng).best_move(board);
        match best {
            Some(col) if !board.is_column_full(col) => Some(col),
            _ => self.choose_easy(valid),
        }
    }
}
