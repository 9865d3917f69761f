use connect4_bots::board::{Board, BoardShape, Piece};
use connect4_bots::heuristic::{EvalConfig, Evaluation, WindowWeights};

use crate::ai::{full_board, immediate_win};
use crate::util::board;

fn eval(piece: Piece) -> Evaluation {
    Evaluation::new(piece, EvalConfig::default())
}

#[test]
fn empty_board_is_neutral() {
    let board = Board::default();
    assert_eq!(eval(Piece::PlayerOne).score_position(&board), 0);
    assert_eq!(eval(Piece::PlayerTwo).score_position(&board), 0);
}

#[test]
fn center_bonus() {
    let board = board("......./......./......./......./......./...X...");
    assert_eq!(eval(Piece::PlayerOne).score_position(&board), 3);
    assert_eq!(eval(Piece::PlayerTwo).score_position(&board), 0);
}

#[test]
fn runs() {
    let two = board("......./......./......./......./......./XX.....");
    assert_eq!(eval(Piece::PlayerOne).score_position(&two), 2);
    assert_eq!(eval(Piece::PlayerTwo).score_position(&two), -2);

    // one window with three and one with two
    let three = board("......./......./......./......./......./XXX....");
    assert_eq!(eval(Piece::PlayerOne).score_position(&three), 5 + 2);
    assert_eq!(eval(Piece::PlayerTwo).score_position(&three), -8 - 2);
}

#[test]
fn mixed_windows_score_nothing() {
    let e = eval(Piece::PlayerOne);
    assert_eq!(e.score_window(&[Some(Piece::PlayerOne), Some(Piece::PlayerTwo), None, None]), 0);
    assert_eq!(e.score_window(&[Some(Piece::PlayerOne); 4]), 100);
    assert_eq!(e.score_window(&[Some(Piece::PlayerTwo); 4]), -100);
    assert_eq!(e.score_window(&[None; 4]), 0);
}

#[test]
fn terminal_values() {
    let config = EvalConfig::default();
    let x = eval(Piece::PlayerOne);
    let o = eval(Piece::PlayerTwo);

    let mut won = immediate_win();
    assert_eq!(x.terminal_value(&won, 0), None);
    assert!(!x.is_terminal_node(&won));
    won.drop_piece(3, Piece::PlayerOne).unwrap();

    assert!(x.is_terminal_node(&won));
    assert_eq!(x.terminal_value(&won, 0), Some(config.scores.win));
    assert_eq!(x.terminal_value(&won, 2), Some(config.scores.win + 2));
    assert_eq!(o.terminal_value(&won, 2), Some(config.scores.loss - 2));
    assert_eq!(x.leaf_value(&won, 0), config.scores.win);

    let full = full_board();
    assert!(x.is_terminal_node(&full));
    assert_eq!(x.terminal_value(&full, 3), Some(config.scores.draw));
}

#[test]
fn flipped() {
    let x = eval(Piece::PlayerOne);
    assert_eq!(x.flipped().piece(), Piece::PlayerTwo);
    assert_eq!(x.flipped().opponent(), Piece::PlayerOne);
}

#[test]
fn validation() {
    let shape = BoardShape::default();
    EvalConfig::default().validate(shape).unwrap();

    let mut config = EvalConfig::default();
    config.weights.three = 200;
    assert!(config.validate(shape).is_err());

    let mut config = EvalConfig::default();
    config.scores.win = 1000;
    assert!(config.validate(shape).is_err());

    let mut config = EvalConfig::default();
    config.scores.draw = config.scores.win;
    assert!(config.validate(shape).is_err());

    let weights = WindowWeights::default();
    assert!(weights.max_abs_score(shape) < EvalConfig::default().scores.win);
}
