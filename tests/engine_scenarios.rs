use connect_four_rl::game::{Board, Cell, Connect4Engine, Player, Winner, COLS, ROWS};

fn play(engine: &mut Connect4Engine, columns: &[usize]) {
    for &col in columns {
        assert!(engine.step(col).valid, "move in column {col} rejected");
    }
}

#[test]
fn test_fresh_engine() {
    let engine = Connect4Engine::new();
    assert_eq!(engine.valid_actions(), vec![0, 1, 2, 3, 4, 5, 6]);
    assert_eq!(engine.current_player(), Player::One);
    assert_eq!(engine.moves_left(), ROWS * COLS);
    assert!(!engine.is_game_over());
    assert_eq!(engine.winner(), None);
}

#[test]
fn test_filling_a_column_closes_it() {
    let mut engine = Connect4Engine::new();
    play(&mut engine, &[0, 0, 0, 0, 0]);

    let result = engine.step(0);
    assert!(result.valid);
    assert!(!result.done);
    // Sixth piece lands in the top row
    assert_eq!(engine.board().get(0, 0), Cell::Player2);

    let before = engine.clone();
    let result = engine.step(0);
    assert!(!result.valid);
    assert!(!result.done);
    assert!(!engine.valid_actions().contains(&0));
    assert_eq!(engine, before);
}

#[test]
fn test_horizontal_win_on_bottom_row() {
    let mut engine = Connect4Engine::new();
    play(&mut engine, &[0, 0, 1, 1, 2, 2]);

    let result = engine.step(3);
    assert!(result.valid);
    assert!(result.done);
    assert_eq!(result.winner, Some(Winner::Player(Player::One)));
    for col in 0..4 {
        assert_eq!(engine.board().get(ROWS - 1, col), Cell::Player1);
    }
}

#[test]
fn test_vertical_win() {
    let mut engine = Connect4Engine::new();
    play(&mut engine, &[0, 1, 0, 1, 0, 1]);

    let result = engine.step(0);
    assert!(result.valid);
    assert!(result.done);
    assert_eq!(result.winner, Some(Winner::Player(Player::One)));
}

#[test]
fn test_last_empty_cell_draws() {
    let board = Board::try_from_rows([
        [0, 2, 1, 2, 1, 2, 1],
        [1, 1, 1, 2, 1, 2, 1],
        [2, 1, 2, 1, 2, 1, 2],
        [1, 2, 1, 2, 1, 2, 1],
        [1, 2, 1, 2, 2, 2, 1],
        [1, 1, 2, 1, 2, 1, 2],
    ])
    .unwrap();
    let mut engine = Connect4Engine::from_board(board, Player::One).unwrap();
    assert_eq!(engine.moves_left(), 1);
    assert_eq!(engine.valid_actions(), vec![0]);

    let result = engine.step(0);
    assert!(result.valid);
    assert!(result.done);
    assert_eq!(result.winner, Some(Winner::Draw));
    assert_eq!(engine.moves_left(), 0);
}

#[test]
fn test_step_after_game_over_echoes_winner() {
    let mut engine = Connect4Engine::new();
    play(&mut engine, &[0, 1, 0, 1, 0, 1, 0]);
    assert!(engine.is_game_over());
    let moves_left = engine.moves_left();

    for col in 0..COLS {
        let result = engine.step(col);
        assert!(!result.valid);
        assert!(result.done);
        assert_eq!(result.winner, Some(Winner::Player(Player::One)));
        assert_eq!(engine.moves_left(), moves_left);
    }
}

#[test]
fn test_diagonal_wins_in_both_directions() {
    // Rising diagonal for player 1 from (5,0) to (2,3)
    let mut engine = Connect4Engine::new();
    play(&mut engine, &[0, 1, 1, 2, 2, 3, 2, 3, 3, 6]);
    let result = engine.step(3);
    assert_eq!(result.winner, Some(Winner::Player(Player::One)));

    // Falling diagonal for player 1 from (2,0) to (5,3)
    let mut engine = Connect4Engine::new();
    play(&mut engine, &[3, 2, 2, 1, 1, 0, 1, 0, 0, 6]);
    let result = engine.step(0);
    assert_eq!(result.winner, Some(Winner::Player(Player::One)));
}

#[test]
fn test_reset_after_finished_game() {
    let mut engine = Connect4Engine::new();
    play(&mut engine, &[0, 1, 0, 1, 0, 1, 0]);
    engine.reset();
    assert_eq!(engine, Connect4Engine::new());
}
