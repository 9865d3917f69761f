//! Expectimax: like minimax, but the opponent is modelled as playing uniformly at random
//! instead of adversarially, so its plies take the average over all replies.
//!
//! Alpha-beta bounds don't hold for averages, so this search doesn't prune.
use internal_iterator::InternalIterator;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ai::Bot;
use crate::board::{Board, Piece};
use crate::heuristic::{EvalConfig, Evaluation};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ExpectimaxResult {
    /// The expected value of this board, from the POV of the searching piece.
    pub value: f64,
    pub best_move: Option<u8>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectimaxConfig {
    pub depth: u32,
    pub eval: EvalConfig,
}

impl Default for ExpectimaxConfig {
    fn default() -> Self {
        ExpectimaxConfig {
            depth: 3,
            eval: EvalConfig::default(),
        }
    }
}

/// Evaluate `board` with `eval.piece()` to move, maximizing on our plies and averaging on opponent plies.
pub fn expectimax(eval: &Evaluation, board: &Board, depth: u32) -> ExpectimaxResult {
    expectimax_recurse(eval, board, depth, true)
}

fn expectimax_recurse(eval: &Evaluation, board: &Board, depth_left: u32, maximizing: bool) -> ExpectimaxResult {
    if let Some(value) = eval.terminal_value(board, depth_left) {
        return ExpectimaxResult {
            value: value as f64,
            best_move: None,
        };
    }
    if depth_left == 0 {
        return ExpectimaxResult {
            value: eval.score_position(board) as f64,
            best_move: None,
        };
    }

    if maximizing {
        let mut best: Option<(f64, u8)> = None;
        board.available_moves().for_each(|col| {
            let child = board.clone_and_play(col, eval.piece());
            let value = expectimax_recurse(eval, &child, depth_left - 1, false).value;
            if best.map_or(true, |(best_value, _)| value > best_value) {
                best = Some((value, col));
            }
        });

        let (value, col) = best.unwrap_or_else(|| unreachable!("no available moves on non-terminal board {:?}", board));
        ExpectimaxResult {
            value,
            best_move: Some(col),
        }
    } else {
        let mut total = 0.0;
        let mut count = 0;
        board.available_moves().for_each(|col| {
            let child = board.clone_and_play(col, eval.opponent());
            total += expectimax_recurse(eval, &child, depth_left - 1, true).value;
            count += 1;
        });

        ExpectimaxResult {
            value: total / count as f64,
            best_move: None,
        }
    }
}

#[derive(Debug)]
pub struct ExpectiMaxBot {
    eval: Evaluation,
    config: ExpectimaxConfig,
}

impl ExpectiMaxBot {
    pub fn new(piece: Piece, config: ExpectimaxConfig) -> Self {
        assert!(config.depth > 0, "requires depth>0 to find the best move");
        ExpectiMaxBot {
            eval: Evaluation::new(piece, config.eval),
            config,
        }
    }
}

impl Bot for ExpectiMaxBot {
    fn piece(&self) -> Piece {
        self.eval.piece()
    }

    fn select_move(&mut self, board: &Board) -> Option<u8> {
        let result = expectimax(&self.eval, board, self.config.depth);
        debug!(
            piece = ?self.eval.piece(),
            column = ?result.best_move,
            value = result.value,
            depth = self.config.depth,
            "expectimax selected move"
        );
        result.best_move.or_else(|| board.valid_columns().first().copied())
    }
}
