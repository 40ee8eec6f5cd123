//! Integration tests for the Connect Four engine.
//!
//! These tests drive complete games through the public API, from an empty
//! board to a win or a draw.

use connect_four_core::*;
use pretty_assertions::assert_eq;

/// Play a list of columns, alternating players, expecting every move to be
/// accepted
fn play(game: &mut Game, columns: &[usize]) {
    for &col in columns {
        game.apply_move(col)
            .unwrap_or_else(|e| panic!("move in column {} rejected: {}", col, e));
    }
}

/// A 42-move sequence that fills the board without anyone connecting four
fn drawn_game_moves() -> Vec<usize> {
    let mut moves = Vec::new();
    for _ in 0..3 {
        moves.extend([2, 0, 0, 2]);
    }
    for _ in 0..3 {
        moves.extend([3, 1, 1, 3]);
    }
    for _ in 0..3 {
        moves.extend([6, 4, 4, 5, 5, 6]);
    }
    moves
}

/// Human always takes the leftmost open column; the computer answers until
/// the game ends
fn play_against_computer(game: &mut Game) {
    let mut turns = 0;
    while !game.is_game_over() {
        if game.is_computer_turn() {
            game.computer_move().expect("computer should find a move");
        } else {
            let col = game.valid_columns()[0];
            game.apply_move(col).unwrap();
        }
        turns += 1;
        assert!(turns <= ROWS * COLS, "game should end once the board is full");
    }
}

#[test]
fn test_gravity_fills_every_column_bottom_up() {
    let mut game = Game::default();
    for col in 0..COLS {
        for expected_row in (1..ROWS).rev() {
            let outcome = game.apply_move(col).unwrap();
            assert_eq!(outcome.row, expected_row);
            assert_ne!(game.board().get(expected_row, col), Cell::Empty);
            if game.is_game_over() {
                return;
            }
        }
    }
}

#[test]
fn test_column_three_vertical_win() {
    let mut game = Game::new(GameConfig::pvp("Ana", "Ben"));
    play(&mut game, &[3, 2, 3, 2, 3, 2, 3]);

    let state = game.snapshot();
    assert!(state.game_over);
    assert_eq!(state.winner, Some(0));
    assert_eq!(state.winner_name(), Some("Ana"));
    assert_eq!(state.winning_cells, vec![(2, 3), (3, 3), (4, 3), (5, 3)]);
}

#[test]
fn test_diagonal_win_reports_full_line() {
    let mut game = Game::default();
    // X builds the up-right diagonal (5,0) (4,1) (3,2) (2,3)
    play(&mut game, &[0, 1, 1, 2, 2, 3, 2, 3, 3, 6]);
    let outcome = game.apply_move(3).unwrap();

    assert_eq!(outcome.result, Some(GameResult::Win(0)));
    assert_eq!(game.winning_cells(), &[(2, 3), (3, 2), (4, 1), (5, 0)]);
}

#[test]
fn test_full_board_is_a_draw() {
    let mut game = Game::default();
    let moves = drawn_game_moves();
    assert_eq!(moves.len(), ROWS * COLS);

    let (last, rest) = moves.split_last().unwrap();
    play(&mut game, rest);
    assert!(!game.is_game_over());

    let outcome = game.apply_move(*last).unwrap();
    assert_eq!(outcome.result, Some(GameResult::Draw));
    assert_eq!(game.status(), GameStatus::Finished(GameResult::Draw));

    let state = game.snapshot();
    assert!(state.game_over);
    assert_eq!(state.winner, None);
    assert!(state.winning_cells.is_empty());
    assert_eq!(game.apply_move(0), Err(GameError::GameOver));
}

#[test]
fn test_finished_game_is_frozen() {
    let mut game = Game::with_seed(GameConfig::vs_computer("Ana", Difficulty::Easy), 11);
    play_against_computer(&mut game);

    let before = game.snapshot();
    assert_eq!(game.apply_move(3), Err(GameError::GameOver));
    assert_eq!(game.computer_move(), Err(GameError::GameOver));
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_every_difficulty_finishes_a_game() {
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        for seed in 0..3 {
            let mut game = Game::with_seed(GameConfig::vs_computer("Ana", difficulty), seed);
            play_against_computer(&mut game);

            let state = game.snapshot();
            assert!(state.game_over);
            if let Some(winner) = state.winner {
                let mark = state.players[winner as usize].mark;
                assert!(state.winning_cells.len() >= CONNECT);
                for &(row, col) in &state.winning_cells {
                    assert_eq!(state.board[row][col], mark);
                }
            }
        }
    }
}

#[test]
fn test_stronger_computers_beat_leftmost_play() {
    // Stacking the leftmost column is trivially blocked and then outplayed
    for difficulty in [Difficulty::Medium, Difficulty::Hard] {
        let mut game = Game::with_seed(GameConfig::vs_computer("Ana", difficulty), 5);
        play_against_computer(&mut game);
        assert_ne!(game.winner(), Some(0), "{} computer lost", difficulty);
    }
}

#[test]
fn test_hard_computer_blocks_vertical_threat() {
    let mut game = Game::with_seed(GameConfig::vs_computer("Ana", Difficulty::Hard), 9);
    for _ in 0..3 {
        let col = if game.board().is_column_full(0) { 6 } else { 0 };
        game.apply_move(col).unwrap();
        game.computer_move().unwrap();
        assert!(!game.board().is_winning_drop(0, Cell::X));
    }
    assert_eq!(game.winner(), None);
}

#[test]
fn test_medium_computer_opens_in_centre() {
    let mut game = Game::with_seed(GameConfig::vs_computer("Ana", Difficulty::Medium), 2);
    game.apply_move(0).unwrap();
    // Centre first when nothing is urgent
    assert_eq!(game.computer_move().unwrap().column, CENTER_COLUMN);
    game.apply_move(1).unwrap();
    game.computer_move().unwrap();
    game.apply_move(2).unwrap();

    // The bottom row reads X X X O, so there is nothing to block
    assert_eq!(game.computer_move().unwrap().column, CENTER_COLUMN);
    for col in game.valid_columns() {
        assert!(!game.board().is_winning_drop(col, Cell::X));
    }
}

#[test]
fn test_fresh_snapshot() {
    let game = Game::new(GameConfig::vs_computer("Ana", Difficulty::Medium));
    let state = game.snapshot();

    assert_eq!(state.board, [[Cell::Empty; COLS]; ROWS]);
    assert!(!state.game_over);
    assert_eq!(state.winner, None);
    assert_eq!(state.current_player, 0);
    assert_eq!(state.players[0].move_time, 0.0);
    assert_eq!(state.players[1].move_time, 0.0);
    assert_eq!(state.players[1].name, COMPUTER_NAME);
    assert_eq!(state.mode, GameMode::Ai);
    assert_eq!(state.difficulty, Difficulty::Medium);
}

#[test]
fn test_snapshot_json_shape() {
    let mut game = Game::default();
    game.apply_move(3).unwrap();

    let json = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(json["board"][5][3], "X");
    assert_eq!(json["board"][0][0], " ");
    assert_eq!(json["mode"], "pvp");
    assert_eq!(json["difficulty"], "hard");
    assert_eq!(json["current_player"], 1);
    assert_eq!(json["game_over"], false);
    assert!(json["players"][0]["move_time"].as_f64().unwrap() >= 0.0);

    let back: GameSnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(back.board[5][3], Cell::X);
}
