//! Alpha-beta search with simulated-annealing move acceptance.
//!
//! At every ply a move that is worse than the current best can still be accepted with probability
//! `exp(-|delta| / temperature)`, provided that probability exceeds an acceptance threshold.
//! The temperature only depends on how full the board is and drops to zero once a configured fraction of
//! the board is filled, from then on the search behaves exactly like [minimax](crate::ai::minimax::minimax).
use std::fmt::{Debug, Formatter};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::ai::Bot;
use crate::board::{Board, Piece};
use crate::heuristic::{EvalConfig, Evaluation};
use crate::util::internal_ext::InternalIteratorExt;

/// Which value is used to tighten the alpha-beta window after a candidate move.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundTracking {
    /// The currently accepted value, which may be worse than a value seen before.
    Accepted,
    /// The best value seen so far, regardless of what was accepted.
    BestEver,
}

impl BoundTracking {
    /// The alpha-beta window for the next child of a node that was entered with `window`.
    ///
    /// The window is rebuilt from the one the node received, so with [BoundTracking::Accepted] accepting an
    /// inferior move widens it again.
    fn window(self, window: (i64, i64), maximizing: bool, accepted: i64, best_ever: i64) -> (i64, i64) {
        let bound = match self {
            BoundTracking::Accepted => accepted,
            BoundTracking::BestEver => best_ever,
        };
        let (alpha, beta) = window;
        if maximizing {
            (alpha.max(bound), beta)
        } else {
            (alpha, beta.min(bound))
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealingConfig {
    pub depth: u32,
    /// Inferior moves are only considered if their acceptance probability exceeds this.
    pub acceptance_threshold: f64,
    /// The fraction of filled slots at which the temperature reaches zero.
    pub fill_threshold: f64,
    pub temperature_constant: f64,
    pub bound_tracking: BoundTracking,
    pub eval: EvalConfig,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        AnnealingConfig {
            depth: 4,
            acceptance_threshold: 0.3,
            fill_threshold: 0.7,
            temperature_constant: 10.0,
            bound_tracking: BoundTracking::Accepted,
            eval: EvalConfig::default(),
        }
    }
}

impl AnnealingConfig {
    /// The temperature for `board`, zero or negative means plain greedy selection.
    pub fn temperature(&self, board: &Board) -> f64 {
        let cells = board.shape().cells() as f64;
        let filled = board.count_filled_slots() as f64;
        self.temperature_constant * (cells * self.fill_threshold - filled) / cells
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AnnealingResult {
    pub value: i64,
    pub best_move: Option<u8>,
}

struct Search<'a, R: Rng> {
    eval: &'a Evaluation,
    config: &'a AnnealingConfig,
    rng: &'a mut R,
}

/// Run the annealing search on `board` with `eval.piece()` to move.
pub fn annealing_search(
    eval: &Evaluation,
    config: &AnnealingConfig,
    board: &Board,
    rng: &mut impl Rng,
) -> AnnealingResult {
    let mut search = Search { eval, config, rng };
    search.recurse(board, config.depth, i64::MIN, i64::MAX, true)
}

impl<R: Rng> Search<'_, R> {
    fn recurse(&mut self, board: &Board, depth_left: u32, alpha: i64, beta: i64, maximizing: bool) -> AnnealingResult {
        if let Some(value) = self.eval.terminal_value(board, depth_left) {
            return AnnealingResult { value, best_move: None };
        }
        if depth_left == 0 {
            return AnnealingResult {
                value: self.eval.score_position(board),
                best_move: None,
            };
        }

        let temperature = self.config.temperature(board);
        let piece = if maximizing {
            self.eval.piece()
        } else {
            self.eval.opponent()
        };

        let window = (alpha, beta);
        let (mut alpha, mut beta) = window;
        let mut accepted: Option<(i64, u8)> = None;
        let mut best_ever: Option<i64> = None;

        board.available_moves().for_each_while(|col| {
            let child = board.clone_and_play(col, piece);
            let value = self.recurse(&child, depth_left - 1, alpha, beta, !maximizing).value;

            match accepted {
                None => accepted = Some((value, col)),
                Some((current, _)) => {
                    let at_least_as_good = if maximizing { value >= current } else { value <= current };
                    if at_least_as_good || self.accept_inferior(current, value, temperature) {
                        accepted = Some((value, col));
                    }
                }
            }

            best_ever = Some(match best_ever {
                None => value,
                Some(best) if maximizing => best.max(value),
                Some(best) => best.min(value),
            });

            if let (Some((accepted_value, _)), Some(best_value)) = (accepted, best_ever) {
                (alpha, beta) = self.config.bound_tracking.window(window, maximizing, accepted_value, best_value);
            }

            alpha < beta
        });

        match accepted {
            Some((value, col)) => AnnealingResult {
                value,
                best_move: Some(col),
            },
            None => unreachable!("no available moves on non-terminal board {:?}", board),
        }
    }

    /// Metropolis acceptance of a candidate that is worse than the current value.
    fn accept_inferior(&mut self, current: i64, candidate: i64, temperature: f64) -> bool {
        if temperature <= 0.0 {
            return false;
        }

        let delta = (candidate - current).abs() as f64;
        let probability = (-delta / temperature).exp();
        if probability <= self.config.acceptance_threshold {
            return false;
        }

        let accept = self.rng.gen::<f64>() < probability;
        trace!(current, candidate, temperature, probability, accept, "annealing acceptance");
        accept
    }
}

pub struct AnnealingBot<R: Rng> {
    eval: Evaluation,
    config: AnnealingConfig,
    rng: R,
}

impl<R: Rng> Debug for AnnealingBot<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AnnealingBot {{ piece: {:?}, depth: {}, bound_tracking: {:?} }}",
            self.eval.piece(),
            self.config.depth,
            self.config.bound_tracking
        )
    }
}

impl<R: Rng> AnnealingBot<R> {
    pub fn new(piece: Piece, config: AnnealingConfig, rng: R) -> Self {
        assert!(config.depth > 0, "requires depth>0 to find the best move");
        AnnealingBot {
            eval: Evaluation::new(piece, config.eval),
            config,
            rng,
        }
    }
}

impl<R: Rng> Bot for AnnealingBot<R> {
    fn piece(&self) -> Piece {
        self.eval.piece()
    }

    fn select_move(&mut self, board: &Board) -> Option<u8> {
        let result = annealing_search(&self.eval, &self.config, board, &mut self.rng);
        debug!(
            piece = ?self.eval.piece(),
            column = ?result.best_move,
            value = result.value,
            temperature = self.config.temperature(board),
            "annealing selected move"
        );
        result.best_move.or_else(|| board.valid_columns().first().copied())
    }
}
