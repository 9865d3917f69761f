use rand::rngs::SmallRng;
use rand::SeedableRng;

use connect4_bots::ai::minimax::MiniMaxBot;
use connect4_bots::ai::simple::RandomBot;
use connect4_bots::ai::Bot;
use connect4_bots::board::{Board, Outcome, Piece};
use connect4_bots::config::BotConfig;
use connect4_bots::error::{GameError, InvalidMoveError};
use connect4_bots::util::board_gen::board_with_moves;
use connect4_bots::util::bot_game::{play_game, run};
use connect4_bots::util::tiny::seeded_rng;

use crate::ai::last_cell;

/// Always plays the same column, even when it is full.
#[derive(Debug)]
struct FixedBot {
    piece: Piece,
    col: Option<u8>,
}

impl Bot for FixedBot {
    fn piece(&self) -> Piece {
        self.piece
    }

    fn select_move(&mut self, _: &Board) -> Option<u8> {
        self.col
    }
}

#[test]
fn last_cell_is_a_draw() {
    let start = last_cell();
    let mut one = RandomBot::new(Piece::PlayerOne, seeded_rng(0));
    let mut two = MiniMaxBot::with_depth(Piece::PlayerTwo, 2);

    let replay = play_game(&start, &mut one, &mut two).unwrap();
    assert_eq!(replay.moves, vec![0]);
    assert_eq!(replay.outcome, Outcome::Draw);
    assert_eq!(replay.move_count, [0, 1]);
    assert_eq!(replay.move_count_of(Piece::PlayerTwo), 1);
}

#[test]
fn finished_start_plays_no_moves() {
    let start = board_with_moves(Board::default(), &[1, 1, 2, 2, 3, 3, 4]).unwrap();
    let mut one = RandomBot::new(Piece::PlayerOne, seeded_rng(0));
    let mut two = RandomBot::new(Piece::PlayerTwo, seeded_rng(1));

    let replay = play_game(&start, &mut one, &mut two).unwrap();
    assert!(replay.moves.is_empty());
    assert_eq!(replay.outcome, Outcome::WonBy(Piece::PlayerOne));
}

#[test]
fn replay_is_consistent() {
    let config = BotConfig::default();
    let start = config.empty_board();

    let mut one = MiniMaxBot::with_depth(Piece::PlayerOne, 2);
    let mut two = config.mcts_bot(
        Piece::PlayerTwo,
        SmallRng::seed_from_u64(7),
    );
    let replay = play_game(&start, &mut one, &mut two).unwrap();

    let end = board_with_moves(start.clone(), &replay.moves).unwrap();
    assert_eq!(end.outcome(), Some(replay.outcome));
    assert_eq!(
        (replay.move_count[0] + replay.move_count[1]) as usize,
        replay.moves.len()
    );
    assert!(replay.debug[0].starts_with("MiniMaxBot"));
    assert!(replay.debug[1].starts_with("MctsBot"));
}

#[test]
fn illegal_move_aborts() {
    let start = Board::default();
    let mut one = FixedBot {
        piece: Piece::PlayerOne,
        col: Some(0),
    };
    let mut two = FixedBot {
        piece: Piece::PlayerTwo,
        col: Some(0),
    };

    let result = play_game(&start, &mut one, &mut two);
    assert_eq!(
        result.err(),
        Some(GameError::IllegalMove {
            piece: Piece::PlayerOne,
            source: InvalidMoveError::ColumnFull(0),
        })
    );

    let mut two = FixedBot {
        piece: Piece::PlayerTwo,
        col: Some(7),
    };
    let result = play_game(&start, &mut one, &mut two);
    assert_eq!(
        result.err(),
        Some(GameError::IllegalMove {
            piece: Piece::PlayerTwo,
            source: InvalidMoveError::OutOfRange { column: 7, columns: 7 },
        })
    );
}

#[test]
fn missing_move_aborts() {
    let mut one = RandomBot::new(Piece::PlayerOne, seeded_rng(0));
    let mut two = FixedBot {
        piece: Piece::PlayerTwo,
        col: None,
    };

    let result = play_game(&Board::default(), &mut one, &mut two);
    assert_eq!(result.err(), Some(GameError::MissingMove(Piece::PlayerTwo)));
}

#[test]
fn match_both_sides() {
    let games_per_side = 4;
    let result = run(
        &Board::default(),
        |piece, _| MiniMaxBot::with_depth(piece, 2),
        |piece, game| RandomBot::new(piece, seeded_rng(game as u64)),
        games_per_side,
        true,
    )
    .unwrap();
    println!("{:?}", result);

    assert_eq!(result.game_count, 2 * games_per_side);
    assert_eq!(result.games.len(), 8);
    assert_eq!(result.wdl_one.sum(), 8);
    assert!(result.wdl_one.win > result.wdl_one.loss);

    let firsts = result.games.iter().filter(|g| g.piece_one == Piece::PlayerOne).count();
    assert_eq!(firsts, 4);
    assert!(result.average_game_length >= 7.0);
}

#[test]
fn match_propagates_errors() {
    let result = run(
        &Board::default(),
        |piece, _| FixedBot { piece, col: Some(0) },
        |piece, _| FixedBot { piece, col: Some(0) },
        2,
        false,
    );
    assert!(matches!(result, Err(GameError::IllegalMove { .. })));
}
