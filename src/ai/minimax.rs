use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ai::Bot;
use crate::board::{Board, Piece};
use crate::heuristic::{EvalConfig, Evaluation};
use crate::util::internal_ext::InternalIteratorExt;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MinimaxResult {
    /// The value of this board, from the POV of the searching piece.
    pub value: i64,

    /// The best move to play, `None` if the board is done or the search depth was 0.
    pub best_move: Option<u8>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimaxConfig {
    pub depth: u32,
    /// Disabling pruning gives the plain minimax search, which returns the same result but slower.
    pub pruning: bool,
    pub eval: EvalConfig,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        MinimaxConfig {
            depth: 4,
            pruning: true,
            eval: EvalConfig::default(),
        }
    }
}

/// Evaluate the board with minimax up to the given depth, with `eval.piece()` as the maximizing player
/// that is about to move.
///
/// Moves are tried in ascending column order and ties are broken in favour of the first one.
pub fn minimax(eval: &Evaluation, board: &Board, depth: u32, pruning: bool) -> MinimaxResult {
    minimax_recurse(eval, board, depth, i64::MIN, i64::MAX, true, pruning)
}

/// The core minimax implementation, alpha-beta pruning is based on
/// <https://en.wikipedia.org/wiki/Alpha%E2%80%93beta_pruning>.
fn minimax_recurse(
    eval: &Evaluation,
    board: &Board,
    depth_left: u32,
    mut alpha: i64,
    mut beta: i64,
    maximizing: bool,
    pruning: bool,
) -> MinimaxResult {
    if let Some(value) = eval.terminal_value(board, depth_left) {
        return MinimaxResult { value, best_move: None };
    }
    if depth_left == 0 {
        return MinimaxResult {
            value: eval.score_position(board),
            best_move: None,
        };
    }

    let piece = if maximizing { eval.piece() } else { eval.opponent() };
    let mut best: Option<(i64, u8)> = None;

    board.available_moves().for_each_while(|col| {
        let child = board.clone_and_play(col, piece);
        let value = minimax_recurse(eval, &child, depth_left - 1, alpha, beta, !maximizing, pruning).value;

        let best_value = match best {
            Some((best_value, _)) if !improves(maximizing, value, best_value) => best_value,
            _ => {
                best = Some((value, col));
                value
            }
        };

        if maximizing {
            alpha = alpha.max(best_value);
        } else {
            beta = beta.min(best_value);
        }

        !(pruning && alpha >= beta)
    });

    match best {
        Some((value, col)) => MinimaxResult {
            value,
            best_move: Some(col),
        },
        // not terminal, so there is at least one available move
        None => unreachable!("no available moves on non-terminal board {:?}", board),
    }
}

fn improves(maximizing: bool, value: i64, best: i64) -> bool {
    if maximizing {
        value > best
    } else {
        value < best
    }
}

#[derive(Debug)]
pub struct MiniMaxBot {
    eval: Evaluation,
    config: MinimaxConfig,
}

impl MiniMaxBot {
    pub fn new(piece: Piece, config: MinimaxConfig) -> Self {
        assert!(config.depth > 0, "requires depth>0 to find the best move");
        MiniMaxBot {
            eval: Evaluation::new(piece, config.eval),
            config,
        }
    }

    pub fn with_depth(piece: Piece, depth: u32) -> Self {
        MiniMaxBot::new(
            piece,
            MinimaxConfig {
                depth,
                ..MinimaxConfig::default()
            },
        )
    }
}

impl Bot for MiniMaxBot {
    fn piece(&self) -> Piece {
        self.eval.piece()
    }

    fn select_move(&mut self, board: &Board) -> Option<u8> {
        let result = minimax(&self.eval, board, self.config.depth, self.config.pruning);
        debug!(
            piece = ?self.eval.piece(),
            column = ?result.best_move,
            value = result.value,
            depth = self.config.depth,
            "minimax selected move"
        );

        // the search returns no move on boards that are already won, fall back to any legal column
        result.best_move.or_else(|| board.valid_columns().first().copied())
    }
}
