use connect4_bots::ai::expectimax::{expectimax, ExpectiMaxBot, ExpectimaxConfig};
use connect4_bots::ai::minimax::minimax;
use connect4_bots::ai::Bot;
use connect4_bots::board::Piece;
use connect4_bots::heuristic::{EvalConfig, Evaluation};

use crate::ai::{check_forced_moves, immediate_win, single_reply};

fn bot(piece: Piece, depth: u32) -> ExpectiMaxBot {
    ExpectiMaxBot::new(
        piece,
        ExpectimaxConfig {
            depth,
            eval: EvalConfig::default(),
        },
    )
}

#[test]
fn matches_minimax_with_single_reply() {
    let board = single_reply();
    let eval = Evaluation::new(Piece::PlayerTwo, EvalConfig::default());

    for depth in 2..=3 {
        let expected = minimax(&eval, &board, depth, true);
        let actual = expectimax(&eval, &board, depth);

        assert_eq!(actual.best_move, Some(3));
        assert_eq!(actual.best_move, expected.best_move);
        assert_eq!(actual.value, expected.value as f64, "depth {}", depth);
    }
}

#[test]
fn averages_over_replies() {
    // X to move on an empty board, at depth 2 every reply of O is weighted equally
    let board = connect4_bots::board::Board::default();
    let eval = Evaluation::new(Piece::PlayerOne, EvalConfig::default());

    let result = expectimax(&eval, &board, 2);
    let best = result.best_move.unwrap();

    let after = board.clone_and_play(best, Piece::PlayerOne);
    let average = after
        .valid_columns()
        .iter()
        .map(|&col| eval.score_position(&after.clone_and_play(col, Piece::PlayerTwo)) as f64)
        .sum::<f64>()
        / after.valid_columns().len() as f64;
    assert_eq!(result.value, average);
}

#[test]
fn takes_immediate_win() {
    let board = immediate_win();
    for depth in 1..=3 {
        assert_eq!(bot(Piece::PlayerOne, depth).select_move(&board), Some(3));
    }
}

#[test]
fn forced_moves() {
    check_forced_moves(|piece| Box::new(bot(piece, 3)));
}
