use std::error::Error;
use std::path::Path;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use connect4_bots::ai::simple::RandomBot;
use connect4_bots::board::Piece;
use connect4_bots::config::BotConfig;
use connect4_bots::util::bot_game;

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let config = BotConfig::load_or_default(Path::new("bots.toml"))?;
    let start = config.empty_board();

    // a single game, printed move by move at the end
    let mut one = config.minimax_bot(Piece::PlayerOne);
    let mut two = config.mcts_bot(Piece::PlayerTwo, SmallRng::from_entropy());
    let replay = bot_game::play_game(&start, &mut one, &mut two)?;

    let mut board = start.clone();
    for &col in &replay.moves {
        let piece = board.next_piece();
        board.drop_piece(col, piece)?;
    }
    println!("{}", board);
    println!("moves: {:?}", replay.moves);
    println!("outcome: {:?}", replay.outcome);

    // a small match against the random baseline
    let result = bot_game::run(
        &start,
        |piece, game| config.annealing_bot(piece, SmallRng::seed_from_u64(game as u64)),
        |piece, game| RandomBot::new(piece, SmallRng::seed_from_u64(1000 + game as u64)),
        10,
        true,
    )?;
    println!("{:?}", result);

    Ok(())
}
