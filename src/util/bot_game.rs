//! Utilities to run bots against each other and report the results.
use std::fmt::{Debug, Formatter};
use std::sync::Mutex;
use std::time::Instant;

use rayon::iter::IntoParallelIterator;
use rayon::iter::ParallelIterator;
use tracing::{debug, info};

use crate::ai::Bot;
use crate::board::{Board, Outcome, Piece};
use crate::error::GameError;
use crate::util::rating::elo_from_wdl;
use crate::wdl::WDL;

/// A single finished game. Per-side statistics are indexed by [Piece::index].
#[derive(Debug, Clone)]
pub struct Replay {
    pub start: Board,
    pub moves: Vec<u8>,
    pub outcome: Outcome,

    /// Total time spent in `select_move`, in seconds.
    pub total_time: [f32; 2],
    pub move_count: [u32; 2],

    pub debug: [String; 2],
}

impl Replay {
    pub fn total_time_of(&self, piece: Piece) -> f32 {
        self.total_time[piece.index() as usize]
    }

    pub fn move_count_of(&self, piece: Piece) -> u32 {
        self.move_count[piece.index() as usize]
    }
}

/// Play a single game from `start` until it is done, `player_one` plays [Piece::PlayerOne].
///
/// A bot that returns no move while the game is still going, or returns a column that can't be played,
/// aborts the game with a [GameError].
pub fn play_game(start: &Board, player_one: &mut impl Bot, player_two: &mut impl Bot) -> Result<Replay, GameError> {
    assert_eq!(player_one.piece(), Piece::PlayerOne, "first bot must play PlayerOne");
    assert_eq!(player_two.piece(), Piece::PlayerTwo, "second bot must play PlayerTwo");

    let mut board = start.clone();
    let mut total_time = [0.0; 2];
    let mut move_count = [0; 2];
    let mut moves = vec![];

    loop {
        if let Some(outcome) = board.outcome() {
            debug!(?outcome, moves = moves.len(), "game finished");
            return Ok(Replay {
                start: start.clone(),
                moves,
                outcome,
                total_time,
                move_count,
                debug: [format!("{:?}", player_one), format!("{:?}", player_two)],
            });
        }

        let piece = board.next_piece();
        let start_time = Instant::now();
        let mv = match piece {
            Piece::PlayerOne => player_one.select_move(&board),
            Piece::PlayerTwo => player_two.select_move(&board),
        };
        total_time[piece.index() as usize] += start_time.elapsed().as_secs_f32();
        move_count[piece.index() as usize] += 1;

        let col = mv.ok_or(GameError::MissingMove(piece))?;
        board
            .drop_piece(col, piece)
            .map_err(|source| GameError::IllegalMove { piece, source })?;
        moves.push(col);
    }
}

/// A game played by [run], remembering which piece the first bot played.
#[derive(Debug, Clone)]
pub struct MatchGame {
    pub piece_one: Piece,
    pub replay: Replay,
}

/// Run the bots built by `bot_one` and `bot_two` against each other, starting from `start`.
///
/// `games_per_side` games are run, except if `both_sides` is true, in which case every game is played
/// a second time with the bots switching pieces. The factories are called once per game with the piece the bot
/// plays and the game index, so every game can get its own bots with independent random state.
/// Games run in parallel, the first [GameError] aborts the match.
pub fn run<B1: Bot, B2: Bot>(
    start: &Board,
    bot_one: impl Fn(Piece, u32) -> B1 + Sync,
    bot_two: impl Fn(Piece, u32) -> B2 + Sync,
    games_per_side: u32,
    both_sides: bool,
) -> Result<BotGameResult, GameError> {
    let game_count = if both_sides { 2 * games_per_side } else { games_per_side };

    // this instantiates both at least once so we catch errors before starting a bunch of threads
    let debug_one = format!("{:?}", bot_one(Piece::PlayerOne, 0));
    let debug_two = format!("{:?}", bot_two(Piece::PlayerTwo, 0));

    let partial_wdl = Mutex::new(WDL::<u32>::default());

    let games: Vec<MatchGame> = (0..game_count)
        .into_par_iter()
        .panic_fuse()
        .map(|game_i| -> Result<MatchGame, GameError> {
            let flip = both_sides && game_i % 2 == 1;
            let piece_one = if flip { Piece::PlayerTwo } else { Piece::PlayerOne };

            let mut one = bot_one(piece_one, game_i);
            let mut two = bot_two(piece_one.other(), game_i);
            let replay = if flip {
                play_game(start, &mut two, &mut one)?
            } else {
                play_game(start, &mut one, &mut two)?
            };

            let mut partial_wdl = partial_wdl.lock().unwrap_or_else(|e| e.into_inner());
            *partial_wdl += replay.outcome.pov(piece_one).to_wdl();
            debug!(game = game_i, wdl = ?*partial_wdl, "match progress");

            Ok(MatchGame { piece_one, replay })
        })
        .collect::<Result<Vec<_>, GameError>>()?;

    let side_stats = |first: bool| {
        let (time, count) = games.iter().fold((0.0, 0), |(time, count), g| {
            let piece = if first { g.piece_one } else { g.piece_one.other() };
            (
                time + g.replay.total_time_of(piece),
                count + g.replay.move_count_of(piece),
            )
        });
        time / count.max(1) as f32
    };

    let result = BotGameResult {
        game_count,
        average_game_length: games.iter().map(|g| g.replay.moves.len() as f32).sum::<f32>() / game_count.max(1) as f32,
        wdl_one: games.iter().map(|g| g.replay.outcome.pov(g.piece_one).to_wdl()).sum(),
        time_one: side_stats(true),
        time_two: side_stats(false),
        debug_one,
        debug_two,
        games,
    };
    info!(games = game_count, wdl = ?result.wdl_one, "match finished");
    Ok(result)
}

/// Structure returned by the function [`run`].
pub struct BotGameResult {
    pub game_count: u32,
    pub games: Vec<MatchGame>,

    pub average_game_length: f32,
    /// The results from the POV of the first bot.
    pub wdl_one: WDL<u32>,

    //time per move in seconds
    pub time_one: f32,
    pub time_two: f32,

    pub debug_one: String,
    pub debug_two: String,
}

impl Debug for BotGameResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "BotGameResult {{")?;
        writeln!(
            f,
            "  {} games, average length {}",
            self.game_count, self.average_game_length
        )?;
        writeln!(f, "  one       {:?}", self.wdl_one)?;
        writeln!(
            f,
            "  one       {:.3?}",
            self.wdl_one.cast::<f32>() / self.game_count.max(1) as f32
        )?;
        writeln!(f, "  one elo:  {:.1}", elo_from_wdl(self.wdl_one.cast::<f32>()))?;
        writeln!(f, "  time_one: {:.4}, time_two: {:.4}", self.time_one, self.time_two)?;
        writeln!(f, "  one:      {}", self.debug_one)?;
        writeln!(f, "  two:      {}", self.debug_two)?;
        writeln!(f, "}}")?;

        Ok(())
    }
}
