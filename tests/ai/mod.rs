use connect4_bots::ai::Bot;
use connect4_bots::board::{Board, Piece};

use crate::util::board;

mod expectimax;
mod genetic;
mod heuristic;
mod mcts;

/// PlayerOne to move, and playing column 3 wins immediately.
pub fn immediate_win() -> Board {
    board(
        "
        .......
        .......
        .......
        .......
        OOO....
        XXX....
        ",
    )
}

/// PlayerOne to move, PlayerTwo wins next move unless column 3 is blocked.
pub fn must_block() -> Board {
    board(
        "
        .......
        .......
        .......
        .......
        ......X
        OOO..XX
        ",
    )
}

/// PlayerOne to move with a three in a row at the bottom, both column 0 and column 4 win.
pub fn open_three() -> Board {
    board(
        "
        .......
        .......
        .......
        .......
        .OOO...
        .XXX...
        ",
    )
}

/// PlayerTwo to move, column 0 is the only playable column and filling it draws.
pub fn last_cell() -> Board {
    board(
        "
        .OXX
        XXOO
        OOXX
        XXOO
        ",
    )
}

/// PlayerTwo to move, column 3 is the only playable column and PlayerOne has a single reply.
pub fn single_reply() -> Board {
    board(
        "
        OOX.
        XXO.
        OOX.
        XXOO
        ",
    )
}

pub fn full_board() -> Board {
    board(
        "
        OOXX
        XXOO
        OOXX
        XXOO
        ",
    )
}

/// Check the shared contract of all bots on boards with one or zero playable columns.
pub fn check_forced_moves(mut make_bot: impl FnMut(Piece) -> Box<dyn Bot>) {
    let last = last_cell();
    let mut bot = make_bot(last.next_piece());
    assert_eq!(bot.select_move(&last), Some(0), "{:?} on\n{}", bot, last);

    let full = full_board();
    let mut bot = make_bot(full.next_piece());
    assert_eq!(bot.select_move(&full), None, "{:?} on\n{}", bot, full);
}
