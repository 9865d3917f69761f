//! Text diagrams for [Board], the format written by its `Display` implementation.
//!
//! Rows are listed top to bottom, separated by newlines or `/`.
//! Each cell is `.` (empty), `X` ([Piece::PlayerOne]) or `O` ([Piece::PlayerTwo]).
//!
//! ```
//! use connect4_bots::board::{Board, Piece};
//!
//! let board: Board = "..../..../O.../XX..".parse().unwrap();
//! assert_eq!(board.cell(0, 1), Some(Piece::PlayerOne));
//! assert_eq!(board.cell(1, 0), Some(Piece::PlayerTwo));
//! assert_eq!(board.count_filled_slots(), 3);
//! ```
use std::str::FromStr;

use nom::Finish;

use crate::board::{Board, BoardShape, Cell, Piece, WINDOW};
use crate::error::BoardParseError;

mod parse {
    use nom::branch::alt;
    use nom::bytes::complete::tag;
    use nom::character::complete::{line_ending, multispace0, one_of, space0};
    use nom::combinator::{eof, map};
    use nom::multi::{many1, separated_list1};
    use nom::sequence::{delimited, terminated};
    use nom::IResult;

    use super::*;

    fn cell(input: &str) -> IResult<&str, Cell> {
        map(one_of(".XO"), |c| match c {
            '.' => None,
            'X' => Some(Piece::PlayerOne),
            'O' => Some(Piece::PlayerTwo),
            _ => unreachable!(),
        })(input)
    }

    fn row(input: &str) -> IResult<&str, Vec<Cell>> {
        delimited(space0, many1(cell), space0)(input)
    }

    pub(super) fn rows(input: &str) -> IResult<&str, Vec<Vec<Cell>>> {
        terminated(
            delimited(
                multispace0,
                separated_list1(alt((tag("/"), line_ending)), row),
                multispace0,
            ),
            eof,
        )(input)
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = match parse::rows(s).finish() {
            Ok((_, rows)) => rows,
            Err(e) => return Err(BoardParseError::Syntax(e.input.to_string())),
        };

        let expected = rows[0].len();
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, cells)| cells.len() != expected) {
            return Err(BoardParseError::RaggedRow {
                row,
                len: cells.len(),
                expected,
            });
        }

        let shape_err = BoardParseError::Shape {
            rows: rows.len(),
            columns: expected,
        };
        if rows.len() < WINDOW || rows.len() > u8::MAX as usize || expected < WINDOW || expected > 64 {
            return Err(shape_err);
        }
        let shape = BoardShape {
            rows: rows.len() as u8,
            columns: expected as u8,
        };

        let mut board = Board::new(shape);
        // the diagram lists the top row first
        for (board_row, cells) in rows.iter().rev().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                let index = board.index(board_row as u8, col as u8);
                board.cells[index] = cell;
            }
        }

        for col in 0..shape.columns {
            let height = board.column_height(col);
            if let Some(row) = (height..shape.rows).find(|&row| board.cell(row, col).is_some()) {
                return Err(BoardParseError::Floating { row, column: col });
            }
        }

        board.filled = board.cells.iter().filter(|cell| cell.is_some()).count() as u32;
        Ok(board)
    }
}
