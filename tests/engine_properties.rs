//! Property tests for the engine's turn, counting and terminal invariants.
//!
//! Move sequences are drawn from `0..COLS + 3` so that out-of-range columns
//! and full columns show up alongside legal moves.
use proptest::prelude::*;

use connect_four_rl::game::{Board, Cell, Connect4Engine, Player, COLS, CONNECT, ROWS};

fn occupied(board: &Board) -> usize {
    let mut count = 0;
    for row in 0..ROWS {
        for col in 0..COLS {
            if board.get(row, col) != Cell::Empty {
                count += 1;
            }
        }
    }
    count
}

fn has_floating_piece(board: &Board) -> bool {
    (0..COLS).any(|col| {
        (1..ROWS).any(|row| {
            board.get(row - 1, col) != Cell::Empty && board.get(row, col) == Cell::Empty
        })
    })
}

/// Brute-force line search used as the reference for `check_win`.
fn has_line(board: &Board, player: Player) -> bool {
    let target = player.to_cell();
    let directions: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];
    for row in 0..ROWS as isize {
        for col in 0..COLS as isize {
            for (dr, dc) in directions {
                let run = (0..CONNECT as isize).all(|k| {
                    let r = row + dr * k;
                    let c = col + dc * k;
                    (0..ROWS as isize).contains(&r)
                        && (0..COLS as isize).contains(&c)
                        && board.get(r as usize, c as usize) == target
                });
                if run {
                    return true;
                }
            }
        }
    }
    false
}

fn arb_board() -> impl Strategy<Value = Board> {
    prop::array::uniform6(prop::array::uniform7(0u8..3))
        .prop_map(|rows| Board::try_from_rows(rows).expect("cell ids are in range"))
}

proptest! {
    #[test]
    fn test_current_player_alternates_on_valid_moves(
        moves in prop::collection::vec(0usize..COLS + 3, 0..80),
    ) {
        let mut engine = Connect4Engine::new();
        for col in moves {
            let before = engine.current_player();
            let result = engine.step(col);
            if result.valid && !result.done {
                prop_assert_eq!(engine.current_player(), before.other());
            } else {
                prop_assert_eq!(engine.current_player(), before);
            }
        }
    }

    #[test]
    fn test_moves_left_tracks_empty_cells(
        moves in prop::collection::vec(0usize..COLS + 3, 0..80),
    ) {
        let mut engine = Connect4Engine::new();
        for col in moves {
            engine.step(col);
            let board = engine.board();
            prop_assert_eq!(engine.moves_left() + occupied(&board), ROWS * COLS);
            prop_assert_eq!(engine.moves_left(), board.empty_cells());
            prop_assert!(!has_floating_piece(&board));
            prop_assert_eq!(engine.is_game_over(), engine.winner().is_some());
        }
    }

    #[test]
    fn test_rejected_moves_leave_engine_untouched(
        moves in prop::collection::vec(0usize..COLS + 3, 0..80),
    ) {
        let mut engine = Connect4Engine::new();
        for col in moves {
            let before = engine.clone();
            let result = engine.step(col);
            if !result.valid {
                prop_assert_eq!(&engine, &before);
            } else {
                prop_assert_eq!(engine.moves_left(), before.moves_left() - 1);
            }
        }
    }

    #[test]
    fn test_finished_games_stay_finished(
        moves in prop::collection::vec(0usize..COLS, 0..120),
        column in 0usize..COLS + 3,
    ) {
        let mut engine = Connect4Engine::new();
        for col in moves {
            engine.step(col);
        }
        if engine.is_game_over() {
            let winner = engine.winner();
            let frozen = engine.clone();
            let result = engine.step(column);
            prop_assert!(!result.valid);
            prop_assert!(result.done);
            prop_assert_eq!(result.winner, winner);
            prop_assert_eq!(&engine, &frozen);
        }
    }

    #[test]
    fn test_check_win_matches_line_search(board in arb_board()) {
        for player in [Player::One, Player::Two] {
            prop_assert_eq!(Connect4Engine::check_win(&board, player), has_line(&board, player));
        }
    }

    #[test]
    fn test_accepted_presets_always_have_a_move(board in arb_board(), second in any::<bool>()) {
        let to_move = if second { Player::Two } else { Player::One };
        if let Ok(engine) = Connect4Engine::from_board(board, to_move) {
            prop_assert!(!has_floating_piece(&board));
            prop_assert!(engine.is_game_over() || !engine.valid_actions().is_empty());
            prop_assert_eq!(engine.moves_left(), board.empty_cells());
        }
    }

    #[test]
    fn test_win_belongs_to_the_last_mover(
        moves in prop::collection::vec(0usize..COLS, 0..120),
    ) {
        let mut engine = Connect4Engine::new();
        for col in moves {
            let mover = engine.current_player();
            let result = engine.step(col);
            if result.valid && result.done {
                let board = engine.board();
                match result.winner.and_then(|w| w.player()) {
                    Some(winner) => {
                        prop_assert_eq!(winner, mover);
                        prop_assert!(Connect4Engine::check_win(&board, mover));
                        prop_assert!(!Connect4Engine::check_win(&board, mover.other()));
                    }
                    None => {
                        prop_assert!(board.is_full());
                        prop_assert!(!Connect4Engine::check_win(&board, Player::One));
                        prop_assert!(!Connect4Engine::check_win(&board, Player::Two));
                    }
                }
            }
        }
    }
}
