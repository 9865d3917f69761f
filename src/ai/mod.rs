use std::fmt::Debug;

use crate::board::{Board, Piece};

pub mod annealing;
pub mod expectimax;
pub mod genetic;
pub mod mcts;
pub mod minimax;
pub mod simple;

/// A strategy bound to a single piece.
pub trait Bot: Debug {
    /// The piece this bot plays with.
    fn piece(&self) -> Piece;

    /// Pick a column to drop our piece into, `None` only if no column is playable.
    ///
    /// `self` is mutable to allow for random state, this method is not supposed to
    /// modify `self` in any other significant way.
    fn select_move(&mut self, board: &Board) -> Option<u8>;
}

impl<B: Bot + ?Sized> Bot for Box<B> {
    fn piece(&self) -> Piece {
        (**self).piece()
    }

    fn select_move(&mut self, board: &Board) -> Option<u8> {
        (**self).select_move(board)
    }
}
