//! Game board representation.
//!
//! This module contains:
//! - Cell contents (empty or one of the two player marks)
//! - The fixed 6x7 grid with gravity placement
//! - Four-in-a-row detection through a placed cell and across the whole grid
//! - Window iteration used by the position heuristic

use crate::game::GameError;
use serde::{Deserialize, Serialize};

/// Number of rows on the board (row 0 is the top)
pub const ROWS: usize = 6;

/// Number of columns on the board
pub const COLS: usize = 7;

/// The middle column, favoured by both the medium and hard opponents
pub const CENTER_COLUMN: usize = COLS / 2;

/// Length of a winning line
pub const CONNECT: usize = 4;

/// Line directions as (row step, column step), in win-scan order:
/// horizontal, vertical, diagonal down-right, diagonal up-right.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// Contents of a single board cell.
///
/// Serialized as `" "`, `"X"` and `"O"` so clients can render the grid
/// directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    #[serde(rename = " ")]
    Empty,
    /// Player 1's mark
    X,
    /// Player 2's mark
    O,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// The other player's mark. `Empty` maps to itself.
    pub fn opponent(self) -> Cell {
        match self {
            Cell::X => Cell::O,
            Cell::O => Cell::X,
            Cell::Empty => Cell::Empty,
        }
    }
}

/// The game grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Cell at a position. Row 0 is the top, row 5 the bottom.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// All rows, top first
    pub fn rows(&self) -> &[[Cell; COLS]; ROWS] {
        &self.cells
    }

    /// A column is full when its top cell is occupied. Out-of-range columns
    /// count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        col >= COLS || !self.cells[0][col].is_empty()
    }

    /// Row a piece dropped into `col` would land in, if any.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col].is_empty())
    }

    /// Drop a piece into a column, returning the row it landed in.
    pub fn drop_piece(&mut self, col: usize, mark: Cell) -> Result<usize, GameError> {
        if col >= COLS {
            return Err(GameError::InvalidColumn);
        }
        let row = self.landing_row(col).ok_or(GameError::ColumnFull)?;
        self.cells[row][col] = mark;
        Ok(row)
    }

    /// Columns that can still take a piece, left to right
    pub fn valid_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// The board is full when the whole top row is occupied
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// The first line of four or more through `(row, col)` that shares the
    /// mark found there.
    ///
    /// Directions are tried in order (horizontal, vertical, down-right,
    /// up-right). Along each, up to three cells are collected walking in the
    /// positive direction and then up to three walking in the negative one,
    /// so the run starts with `(row, col)` itself.
    pub fn winning_run(&self, row: usize, col: usize) -> Option<Vec<(usize, usize)>> {
        let mark = self.get(row, col);
        if mark.is_empty() {
            return None;
        }

        DIRECTIONS.iter().find_map(|&(dr, dc)| {
            let mut run = vec![(row, col)];
            for sign in [1, -1] {
                let (mut r, mut c) = (row, col);
                for _ in 1..CONNECT {
                    match step(r, c, dr * sign, dc * sign) {
                        Some((nr, nc)) if self.cells[nr][nc] == mark => {
                            run.push((nr, nc));
                            r = nr;
                            c = nc;
                        }
                        _ => break,
                    }
                }
            }
            (run.len() >= CONNECT).then_some(run)
        })
    }

    /// Whether dropping `mark` into `col` would complete a line of four.
    pub fn is_winning_drop(&self, col: usize, mark: Cell) -> bool {
        let mut next = *self;
        match next.drop_piece(col, mark) {
            Ok(row) => next.winning_run(row, col).is_some(),
            Err(_) => false,
        }
    }

    /// Whether `mark` has four in a row anywhere on the board
    pub fn has_four(&self, mark: Cell) -> bool {
        !mark.is_empty() && self.windows().any(|w| w.iter().all(|&c| c == mark))
    }

    /// Every run of [`CONNECT`] cells on the board: horizontal, vertical and
    /// both diagonals.
    pub fn windows(&self) -> impl Iterator<Item = [Cell; CONNECT]> + '_ {
        DIRECTIONS.into_iter().flat_map(move |(dr, dc)| {
            (0..ROWS).flat_map(move |row| {
                (0..COLS).filter_map(move |col| self.window_at(row, col, dr, dc))
            })
        })
    }

    /// Pieces of `mark` in the given column
    pub fn count_in_column(&self, col: usize, mark: Cell) -> usize {
        (0..ROWS).filter(|&row| self.cells[row][col] == mark).count()
    }

    /// Build a board from rows of text, top row first. `.` is empty.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: [&str; ROWS]) -> Board {
        let mut board = Board::new();
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                board.cells[r][c] = match ch {
                    'X' => Cell::X,
                    'O' => Cell::O,
                    _ => Cell::Empty,
                };
            }
        }
        board
    }

    fn window_at(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<[Cell; CONNECT]> {
        let mut window = [Cell::Empty; CONNECT];
        for (i, slot) in window.iter_mut().enumerate() {
            let (r, c) = step(row, col, dr * i as isize, dc * i as isize)?;
            *slot = self.cells[r][c];
        }
        Some(window)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Offset a position, staying on the board
fn step(row: usize, col: usize, dr: isize, dc: isize) -> Option<(usize, usize)> {
    let r = row.checked_add_signed(dr)?;
    let c = col.checked_add_signed(dc)?;
    (r < ROWS && c < COLS).then_some((r, c))
}
