use searchkit::adversarial::tictactoe::{Board, Cell, Coord};
use searchkit::adversarial::{alpha_beta, best_move, minimax, GameState};
use searchkit::search::{SearchError, SearchLimits, SearchOptions};

use Cell::{Empty as E, Max as X, Min as O};

#[test]
fn perfect_play_from_the_empty_board_is_a_draw() {
    let board = Board::new();
    let opts = SearchOptions::default();

    assert_eq!(minimax(&board, true, &opts).unwrap(), 0);
    assert_eq!(
        alpha_beta(&board, true, i32::MIN, i32::MAX, &opts).unwrap(),
        0
    );
}

#[test]
fn alpha_beta_matches_minimax_on_mid_game_boards() {
    let boards = [
        Board::from_cells([[X, E, E], [E, O, E], [E, E, E]], true),
        Board::from_cells([[X, O, E], [E, X, E], [E, E, E]], false),
        Board::from_cells([[X, O, X], [O, X, E], [E, E, O]], true),
        Board::from_cells([[O, E, E], [E, X, E], [X, E, O]], true),
    ];
    let opts = SearchOptions::default();

    for board in boards {
        let maximizing = board.maximizer_to_move();
        assert_eq!(
            minimax(&board, maximizing, &opts).unwrap(),
            alpha_beta(&board, maximizing, i32::MIN, i32::MAX, &opts).unwrap(),
        );
    }
}

#[test]
fn the_maximizer_takes_the_winning_cell() {
    let board = Board::from_cells([[X, X, E], [O, O, E], [E, E, E]], true);
    let best = best_move(&board, true, &SearchOptions::default())
        .unwrap()
        .unwrap();

    assert_eq!(best.mv, Coord { row: 0, col: 2 });
    assert_eq!(best.score, 1);
}

#[test]
fn the_minimizer_takes_its_winning_cell() {
    let board = Board::from_cells([[O, O, E], [X, X, E], [X, E, E]], false);
    let best = best_move(&board, false, &SearchOptions::default())
        .unwrap()
        .unwrap();

    assert_eq!(best.mv, Coord { row: 0, col: 2 });
    assert_eq!(best.score, -1);
}

#[test]
fn ties_keep_the_first_move_in_row_major_order() {
    // Every opening move of tic-tac-toe draws under perfect play.
    let best = best_move(&Board::new(), true, &SearchOptions::default())
        .unwrap()
        .unwrap();

    assert_eq!(best.mv, Coord { row: 0, col: 0 });
    assert_eq!(best.score, 0);
}

#[test]
fn best_move_is_never_worse_than_any_alternative() {
    let board = Board::from_cells([[X, E, E], [E, O, E], [E, E, E]], true);
    let opts = SearchOptions::default();

    let best = best_move(&board, true, &opts).unwrap().unwrap();
    let alternatives: Vec<i32> = board
        .legal_moves()
        .into_iter()
        .map(|mv| minimax(&board.apply(mv), false, &opts).unwrap())
        .collect();

    assert_eq!(best.score, alternatives.iter().copied().max().unwrap());
}

#[test]
fn a_full_drawn_board_scores_zero_and_has_no_moves() {
    let board = Board::from_cells([[X, O, X], [X, O, O], [O, X, X]], true);
    let opts = SearchOptions::default();

    assert!(board.winner().is_none());
    assert!(board.is_full());
    assert_eq!(minimax(&board, true, &opts).unwrap(), 0);
    assert_eq!(best_move(&board, true, &opts).unwrap(), None);
}

#[test]
fn a_decided_board_has_no_legal_moves() {
    let board = Board::from_cells([[X, X, X], [O, O, E], [E, E, E]], false);
    assert!(board.legal_moves().is_empty());
    assert_eq!(minimax(&board, false, &SearchOptions::default()).unwrap(), 1);
}

#[test]
fn the_depth_guard_stops_deep_recursion() {
    let opts = SearchOptions::new(SearchLimits {
        max_depth: 2,
        ..SearchLimits::default()
    });

    let err = minimax(&Board::new(), true, &opts).unwrap_err();
    assert!(matches!(err, SearchError::DepthLimitExceeded { limit: 2 }));
}

#[test]
fn apply_produces_a_new_board_value() {
    let board = Board::new();
    let next = board.apply(Coord { row: 1, col: 1 });

    assert_eq!(board.get(1, 1), E);
    assert_eq!(next.get(1, 1), X);
    assert!(board.maximizer_to_move());
    assert!(!next.maximizer_to_move());
}
