//! Two simple bots: `RandomBot` and `OneStepBot`.
use std::fmt::{Debug, Formatter};

use internal_iterator::InternalIterator;
use rand::Rng;

use crate::ai::Bot;
use crate::board::{Board, Piece};
use crate::heuristic::{EvalConfig, Evaluation};

/// Bot that chooses moves randomly uniformly among possible moves.
pub struct RandomBot<R: Rng> {
    piece: Piece,
    rng: R,
}

impl<R: Rng> Debug for RandomBot<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "RandomBot {{ piece: {:?} }}", self.piece)
    }
}

impl<R: Rng> RandomBot<R> {
    pub fn new(piece: Piece, rng: R) -> Self {
        RandomBot { piece, rng }
    }
}

impl<R: Rng> Bot for RandomBot<R> {
    fn piece(&self) -> Piece {
        self.piece
    }

    fn select_move(&mut self, board: &Board) -> Option<u8> {
        board.random_available_move(&mut self.rng)
    }
}

/// Bot that looks a single move ahead: it plays an immediate win if there is one,
/// and otherwise the move with the best heuristic value. Ties are broken randomly.
pub struct OneStepBot<R: Rng> {
    eval: Evaluation,
    rng: R,
}

impl<R: Rng> Debug for OneStepBot<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "OneStepBot {{ piece: {:?} }}", self.eval.piece())
    }
}

impl<R: Rng> OneStepBot<R> {
    pub fn new(piece: Piece, eval: EvalConfig, rng: R) -> Self {
        OneStepBot {
            eval: Evaluation::new(piece, eval),
            rng,
        }
    }
}

impl<R: Rng> Bot for OneStepBot<R> {
    fn piece(&self) -> Piece {
        self.eval.piece()
    }

    fn select_move(&mut self, board: &Board) -> Option<u8> {
        let piece = self.eval.piece();
        let eval = &self.eval;
        let rng = &mut self.rng;

        let mut best: Option<(u8, i64)> = None;
        let mut count = 0;

        board.available_moves().for_each(|col| {
            let child = board.clone_and_play(col, piece);
            let value = eval.leaf_value(&child, 0);

            match best {
                Some((_, best_value)) if value < best_value => {}
                Some((_, best_value)) if value == best_value => {
                    // reservoir sampling among equal moves
                    count += 1;
                    if rng.gen_range(0..count) == 0 {
                        best = Some((col, value));
                    }
                }
                _ => {
                    count = 1;
                    best = Some((col, value));
                }
            }
        });

        best.map(|(col, _)| col)
    }
}
