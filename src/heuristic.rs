//! The positional heuristic shared by the search-based bots and the genetic fitness function.
use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardShape, Piece, Window, WINDOW};
use crate::error::ConfigError;

/// Per-window scores. A window only scores if it doesn't contain pieces of both sides.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowWeights {
    pub four: i64,
    pub three: i64,
    pub two: i64,
    pub opp_four: i64,
    pub opp_three: i64,
    pub opp_two: i64,
    /// Bonus for each own piece in the center column.
    pub center: i64,
}

impl Default for WindowWeights {
    fn default() -> Self {
        WindowWeights {
            four: 100,
            three: 5,
            two: 2,
            opp_four: -100,
            opp_three: -8,
            opp_two: -2,
            center: 3,
        }
    }
}

/// The values of finished games, these must dominate any heuristic value.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scores {
    pub win: i64,
    pub loss: i64,
    pub draw: i64,
}

impl Default for Scores {
    fn default() -> Self {
        Scores {
            win: 100_000_000_000_000,
            loss: -10_000_000_000_000,
            draw: 0,
        }
    }
}

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    pub weights: WindowWeights,
    pub scores: Scores,
}

impl WindowWeights {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = 0 < self.two
            && self.two < self.three
            && self.three < self.four
            && self.opp_two < 0
            && self.opp_three < -self.three
            && self.opp_four <= -self.four
            && self.center >= 0;

        if ok {
            Ok(())
        } else {
            Err(ConfigError::Validation(format!(
                "window weights must increase with run length and penalize opponent threats harder, got {:?}",
                self
            )))
        }
    }

    /// An upper bound on the absolute heuristic value of any board with the given shape.
    pub fn max_abs_score(&self, shape: BoardShape) -> i64 {
        let rows = shape.rows as i64;
        let cols = shape.columns as i64;
        let span = WINDOW as i64 - 1;
        let windows = rows * (cols - span) + (rows - span) * cols + 2 * (rows - span) * (cols - span);

        let per_window = (self.four.max(self.three).max(self.two))
            .max(-self.opp_four.min(self.opp_three).min(self.opp_two));
        windows * per_window + rows * self.center
    }
}

impl EvalConfig {
    pub fn validate(&self, shape: BoardShape) -> Result<(), ConfigError> {
        self.weights.validate()?;

        let bound = self.weights.max_abs_score(shape);
        let scores = &self.scores;
        if scores.win <= bound || scores.loss >= -bound {
            return Err(ConfigError::Validation(format!(
                "win/loss scores must exceed the heuristic bound {}, got {:?}",
                bound, scores
            )));
        }
        if scores.draw <= scores.loss || scores.draw >= scores.win {
            return Err(ConfigError::Validation(format!(
                "draw score {} must lie strictly between the loss and win scores",
                scores.draw
            )));
        }
        Ok(())
    }
}

/// The heuristic from the point of view of a single piece.
#[derive(Debug, Clone)]
pub struct Evaluation {
    piece: Piece,
    config: EvalConfig,
}

impl Evaluation {
    pub fn new(piece: Piece, config: EvalConfig) -> Self {
        Evaluation { piece, config }
    }

    pub fn piece(&self) -> Piece {
        self.piece
    }

    pub fn opponent(&self) -> Piece {
        self.piece.other()
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn scores(&self) -> &Scores {
        &self.config.scores
    }

    /// The same heuristic from the opponent's point of view.
    pub fn flipped(&self) -> Evaluation {
        Evaluation::new(self.opponent(), self.config)
    }

    pub fn score_window(&self, window: &Window) -> i64 {
        let weights = &self.config.weights;
        let mine = window.iter().filter(|&&c| c == Some(self.piece)).count();
        let theirs = window.iter().filter(|&&c| c == Some(self.opponent())).count();
        let empty = WINDOW - mine - theirs;

        let own = match (mine, empty) {
            (4, _) => weights.four,
            (3, 1) => weights.three,
            (2, 2) => weights.two,
            _ => 0,
        };
        let opp = match (theirs, empty) {
            (4, _) => weights.opp_four,
            (3, 1) => weights.opp_three,
            (2, 2) => weights.opp_two,
            _ => 0,
        };

        own + opp
    }

    /// Heuristic value of `board` for our piece, higher is better.
    pub fn score_position(&self, board: &Board) -> i64 {
        let center_col = board.columns() / 2;
        let center_count = (0..board.rows())
            .filter(|&row| board.cell(row, center_col) == Some(self.piece))
            .count() as i64;

        let windows: i64 = board.windows().map(|window| self.score_window(&window)).sum();
        center_count * self.config.weights.center + windows
    }

    /// Whether the game is over: either piece has won or the board is full.
    pub fn is_terminal_node(&self, board: &Board) -> bool {
        board.winning_move(self.piece) || board.winning_move(self.opponent()) || board.valid_columns().is_empty()
    }

    /// The value of a finished game, `None` if `board` is not terminal.
    ///
    /// `depth_left` is the remaining search depth, it is used to prefer faster wins and slower losses.
    pub fn terminal_value(&self, board: &Board, depth_left: u32) -> Option<i64> {
        let scores = &self.config.scores;
        if board.winning_move(self.piece) {
            Some(scores.win + depth_left as i64)
        } else if board.winning_move(self.opponent()) {
            Some(scores.loss - depth_left as i64)
        } else if board.valid_columns().is_empty() {
            Some(scores.draw)
        } else {
            None
        }
    }

    /// The value a depth-limited search assigns to a leaf: the terminal value if the game is over,
    /// the heuristic otherwise.
    pub fn leaf_value(&self, board: &Board, depth_left: u32) -> i64 {
        self.terminal_value(board, depth_left)
            .unwrap_or_else(|| self.score_position(board))
    }
}
