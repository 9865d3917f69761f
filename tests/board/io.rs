use connect4_bots::board::{Board, BoardShape, Piece};
use connect4_bots::error::BoardParseError;
use connect4_bots::util::board_gen::random_board_with_moves;
use connect4_bots::util::tiny::consistent_rng;

use crate::util::board;

#[test]
fn display() {
    let board = board("..../..../O.../XX..");
    assert_eq!(board.to_string(), "....\n....\nO...\nXX..\n");
    assert_eq!(board.shape(), BoardShape { rows: 4, columns: 4 });
    assert_eq!(board.next_piece(), Piece::PlayerTwo);
}

#[test]
fn display_parse_roundtrip_random() {
    let mut rng = consistent_rng();
    for n in [0, 1, 5, 12, 20] {
        let board = random_board_with_moves(&Board::default(), n, &mut rng);
        let parsed: Board = board.to_string().parse().unwrap();
        assert_eq!(parsed, board, "roundtrip failed for\n{}", board);
    }
}

#[test]
fn multiline_with_indent() {
    let board = board(
        "
        .......
        .......
        .......
        .......
        ...O...
        ..XX...
        ",
    );
    assert_eq!(board, "......./......./......./......./...O.../..XX...".parse().unwrap());
    assert_eq!(board.cell(1, 3), Some(Piece::PlayerTwo));
    assert_eq!(board.count_filled_slots(), 3);
}

#[test]
fn errors() {
    assert_eq!(
        "..../.../..../....".parse::<Board>(),
        Err(BoardParseError::RaggedRow {
            row: 1,
            len: 3,
            expected: 4
        })
    );
    assert_eq!(
        "..../..../....".parse::<Board>(),
        Err(BoardParseError::Shape { rows: 3, columns: 4 })
    );
    assert_eq!(
        "X.../..../..../....".parse::<Board>(),
        Err(BoardParseError::Floating { row: 3, column: 0 })
    );
    assert!(matches!(
        "..A./..../..../....".parse::<Board>(),
        Err(BoardParseError::Syntax(_))
    ));
    assert!(matches!("".parse::<Board>(), Err(BoardParseError::Syntax(_))));
}
