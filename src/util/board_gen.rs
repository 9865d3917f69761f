//! Utilities to generate a `Board` in a given or random state.
use rand::Rng;

use crate::board::Board;
use crate::error::InvalidMoveError;

/// Play the given columns starting from `start`, alternating pieces starting with `start.next_piece()`.
///
/// Moves played after the game is won are still dropped, the caller is responsible for stopping in time.
pub fn board_with_moves(start: Board, moves: &[u8]) -> Result<Board, InvalidMoveError> {
    let mut curr = start;
    for &col in moves {
        let piece = curr.next_piece();
        curr.drop_piece(col, piece)?;
    }
    Ok(curr)
}

/// Generate a `Board` by playing `n` random moves on `start`, none of which end the game.
///
/// Panics if `start` is already done. For large `n` this can take many attempts or never finish,
/// since every attempt that ends the game early is thrown away.
pub fn random_board_with_moves(start: &Board, n: u32, rng: &mut impl Rng) -> Board {
    assert!(!start.is_terminal(), "start board is already done: {:?}", start);

    'new_try: loop {
        let mut board = start.clone();
        for _ in 0..n {
            let piece = board.next_piece();
            match board.random_available_move(rng) {
                Some(col) => board.play(col, piece),
                None => continue 'new_try,
            }
            if board.is_terminal() {
                continue 'new_try;
            }
        }
        return board;
    }
}

/// Generate a `Board` by playing random moves until `cond(&board)` returns true.
pub fn random_board_with_condition(start: &Board, rng: &mut impl Rng, mut cond: impl FnMut(&Board) -> bool) -> Board {
    if cond(start) {
        return start.clone();
    }
    assert!(
        !start.is_terminal(),
        "start board is done and does not match condition, so we won't find anything that does"
    );

    loop {
        let mut board = start.clone();
        while !board.is_terminal() {
            let piece = board.next_piece();
            match board.random_available_move(rng) {
                Some(col) => board.play(col, piece),
                None => break,
            }
            if cond(&board) {
                return board;
            }
        }
    }
}
