use std::fmt::{Debug, Display, Formatter};
use std::ops::ControlFlow;

use internal_iterator::InternalIterator;
use itertools::iproduct;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, InvalidMoveError};

pub mod io;

/// The number of cells in a window, both for win detection and heuristic scoring.
pub const WINDOW: usize = 4;

/// The (row, column) steps of the four window orientations:
/// horizontal, vertical, rising diagonal and falling diagonal.
const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// One of the two pieces. `PlayerOne` always moves first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Piece {
    PlayerOne,
    PlayerTwo,
}

/// The absolute outcome for a game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Outcome {
    WonBy(Piece),
    Draw,
}

/// The content of a single cell, `None` is an empty cell.
pub type Cell = Option<Piece>;

/// A contiguous run of [WINDOW] cells in one of the four orientations.
pub type Window = [Cell; WINDOW];

/// The dimensions of a board, fixed for the lifetime of a [Board].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardShape {
    pub rows: u8,
    pub columns: u8,
}

impl Default for BoardShape {
    fn default() -> Self {
        BoardShape { rows: 6, columns: 7 }
    }
}

impl BoardShape {
    pub fn cells(self) -> usize {
        self.rows as usize * self.columns as usize
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if (self.rows as usize) < WINDOW || (self.columns as usize) < WINDOW {
            return Err(ConfigError::Validation(format!(
                "board must be at least {}x{}, got {}x{}",
                WINDOW, WINDOW, self.rows, self.columns
            )));
        }
        if self.columns > 64 {
            return Err(ConfigError::Validation(format!(
                "board can have at most 64 columns, got {}",
                self.columns
            )));
        }
        Ok(())
    }
}

/// A gravity-fed grid. Row 0 is the bottom row, pieces dropped into a column land on the lowest empty cell.
///
/// Cloning is a full copy of the grid, so a clone can be mutated freely while simulating future moves.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    shape: BoardShape,
    cells: Vec<Cell>,
    filled: u32,
}

impl Default for Board {
    fn default() -> Self {
        Board::new(BoardShape::default())
    }
}

impl Board {
    /// Create an empty board. Panics if the shape is invalid, see [BoardShape::validate].
    pub fn new(shape: BoardShape) -> Self {
        if let Err(e) = shape.validate() {
            panic!("{}", e);
        }
        Board {
            shape,
            cells: vec![None; shape.cells()],
            filled: 0,
        }
    }

    pub fn shape(&self) -> BoardShape {
        self.shape
    }

    pub fn rows(&self) -> u8 {
        self.shape.rows
    }

    pub fn columns(&self) -> u8 {
        self.shape.columns
    }

    /// The piece in the given cell. Panics if the coordinates are out of range.
    pub fn cell(&self, row: u8, col: u8) -> Cell {
        assert!(row < self.rows() && col < self.columns());
        self.cells[self.index(row, col)]
    }

    fn index(&self, row: u8, col: u8) -> usize {
        row as usize * self.columns() as usize + col as usize
    }

    /// The number of pieces in the given column.
    pub fn column_height(&self, col: u8) -> u8 {
        (0..self.rows())
            .find(|&row| self.cell(row, col).is_none())
            .unwrap_or(self.rows())
    }

    /// Whether a piece can be dropped in `col`: it is in range and its top cell is empty.
    pub fn is_valid_column(&self, col: u8) -> bool {
        col < self.columns() && self.cell(self.rows() - 1, col).is_none()
    }

    /// Drop `piece` into `col`, returning the row it landed on.
    pub fn drop_piece(&mut self, col: u8, piece: Piece) -> Result<u8, InvalidMoveError> {
        if col >= self.columns() {
            return Err(InvalidMoveError::OutOfRange {
                column: col,
                columns: self.columns(),
            });
        }

        let row = self.column_height(col);
        if row == self.rows() {
            return Err(InvalidMoveError::ColumnFull(col));
        }

        let index = self.index(row, col);
        self.cells[index] = Some(piece);
        self.filled += 1;
        Ok(row)
    }

    /// Drop `piece` into `col`, for callers that got `col` from [Board::available_moves].
    /// Panics if `col` is not playable, see [Board::drop_piece] for the fallible version.
    pub fn play(&mut self, col: u8, piece: Piece) {
        if let Err(e) = self.drop_piece(col, piece) {
            panic!("{} on {:?}", e, self);
        }
    }

    /// Clone this board, play `col` on it and return the new board.
    /// Panics if `col` is not playable.
    pub fn clone_and_play(&self, col: u8, piece: Piece) -> Board {
        let mut next = self.clone();
        next.play(col, piece);
        next
    }

    /// Clone this board, drop `piece` in `col` on it and return the new board.
    pub fn clone_and_drop(&self, col: u8, piece: Piece) -> Result<Board, InvalidMoveError> {
        let mut next = self.clone();
        next.drop_piece(col, piece)?;
        Ok(next)
    }

    /// Iterate over the playable columns in ascending order.
    /// This does not check whether the game is already won.
    pub fn available_moves(&self) -> AvailableColumns<'_> {
        AvailableColumns { board: self }
    }

    /// The playable columns in ascending order.
    pub fn valid_columns(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.columns() as usize);
        self.available_moves().for_each(|col| result.push(col));
        result
    }

    /// Pick a random playable column, `None` if the board is full.
    pub fn random_available_move(&self, rng: &mut impl Rng) -> Option<u8> {
        self.valid_columns().choose(rng).copied()
    }

    /// Iterate over all windows of the board, in all four orientations.
    pub fn windows(&self) -> impl Iterator<Item = Window> + '_ {
        let rows = self.rows() as i32;
        let cols = self.columns() as i32;
        let span = WINDOW as i32 - 1;

        iproduct!(DIRECTIONS.into_iter(), 0..rows, 0..cols).filter_map(move |((dr, dc), row, col)| {
            let end_row = row + dr * span;
            let end_col = col + dc * span;
            if !(0..rows).contains(&end_row) || !(0..cols).contains(&end_col) {
                return None;
            }

            let mut window = [None; WINDOW];
            for (i, cell) in window.iter_mut().enumerate() {
                let i = i as i32;
                *cell = self.cell((row + dr * i) as u8, (col + dc * i) as u8);
            }
            Some(window)
        })
    }

    /// Whether `piece` owns a complete window anywhere on the board.
    pub fn winning_move(&self, piece: Piece) -> bool {
        self.windows()
            .any(|window| window.iter().all(|&cell| cell == Some(piece)))
    }

    pub fn count_filled_slots(&self) -> u32 {
        self.filled
    }

    pub fn is_full(&self) -> bool {
        self.filled as usize == self.shape.cells()
    }

    /// The outcome of this board, `None` when the game is not done yet.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.winning_move(Piece::PlayerOne) {
            Some(Outcome::WonBy(Piece::PlayerOne))
        } else if self.winning_move(Piece::PlayerTwo) {
            Some(Outcome::WonBy(Piece::PlayerTwo))
        } else if self.is_full() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }

    /// Whether either piece has won or no playable column remains.
    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    /// The piece that moves next, assuming both sides alternate starting with [Piece::PlayerOne].
    pub fn next_piece(&self) -> Piece {
        if self.filled % 2 == 0 {
            Piece::PlayerOne
        } else {
            Piece::PlayerTwo
        }
    }
}

/// The [InternalIterator] returned by [Board::available_moves].
#[derive(Debug)]
pub struct AvailableColumns<'a> {
    board: &'a Board,
}

impl<'a> InternalIterator for AvailableColumns<'a> {
    type Item = u8;

    fn try_for_each<R, F>(self, mut f: F) -> ControlFlow<R>
    where
        F: FnMut(Self::Item) -> ControlFlow<R>,
    {
        let board = self.board;
        (0..board.columns()).try_for_each(|col| {
            if board.is_valid_column(col) {
                f(col)
            } else {
                ControlFlow::Continue(())
            }
        })
    }
}

impl Piece {
    pub const BOTH: [Piece; 2] = [Piece::PlayerOne, Piece::PlayerTwo];

    pub fn other(self) -> Piece {
        match self {
            Piece::PlayerOne => Piece::PlayerTwo,
            Piece::PlayerTwo => Piece::PlayerOne,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Piece::PlayerOne => 0,
            Piece::PlayerTwo => 1,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Piece::PlayerOne => 'X',
            Piece::PlayerTwo => 'O',
        }
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (sep, line) = if f.alternate() { ("\n    ", "\n") } else { (" ", "") };

        write!(
            f,
            "Board {{{}shape: {}x{},{}filled: {},{}next_piece: {:?},{}outcome: {:?},{}cells: {:?}{}}}",
            sep,
            self.rows(),
            self.columns(),
            sep,
            self.filled,
            sep,
            self.next_piece(),
            sep,
            self.outcome(),
            sep,
            self.to_string().trim_end().replace('\n', "/"),
            line,
        )
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in (0..self.rows()).rev() {
            for col in 0..self.columns() {
                let c = match self.cell(row, col) {
                    None => '.',
                    Some(piece) => piece.to_char(),
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
