#![warn(missing_debug_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::new_without_default)]

//! A [Connect Four](https://en.wikipedia.org/wiki/Connect_Four) [Board](crate::board::Board) on a configurable grid,
//! together with a family of interchangeable bots that all implement [Bot](crate::ai::Bot).
//!
//! # Features
//!
//! The implemented bots are:
//! * [RandomBot](crate::ai::simple::RandomBot),
//!     which simply picks a random column.
//! * [OneStepBot](crate::ai::simple::OneStepBot),
//!     which takes an immediate win if there is one and otherwise the move with the best heuristic value.
//! * [MiniMaxBot](crate::ai::minimax::MiniMaxBot),
//!     which picks the best move as evaluated by the shared [heuristic](crate::heuristic) at a fixed depth,
//!     implemented as minimax with alpha-beta pruning.
//! * [ExpectiMaxBot](crate::ai::expectimax::ExpectiMaxBot),
//!     which assumes the opponent plays uniformly at random.
//! * [AnnealingBot](crate::ai::annealing::AnnealingBot),
//!     an alpha-beta search that sometimes accepts worse moves early in the game, like simulated annealing.
//! * [MctsBot](crate::ai::mcts::MctsBot),
//!     which picks the best move as found by [Monte Carlo Tree Search](https://en.wikipedia.org/wiki/Monte_Carlo_tree_search).
//! * [GeneticBot](crate::ai::genetic::GeneticBot),
//!     which evolves a population of move plans and plays the first move of the best one.
//!
//! Every bot is tuned with a serde config struct, all of them can be loaded together from TOML with
//! [BotConfig](crate::config::BotConfig).
//! A bot vs bot game runner to compare playing strength lives in [bot_game](crate::util::bot_game).
//!
//! # Examples
//!
//! ## Parse a board and let minimax find the winning move.
//!
//! ```
//! use connect4_bots::ai::minimax::MiniMaxBot;
//! use connect4_bots::ai::Bot;
//! use connect4_bots::board::{Board, Piece};
//!
//! let board: Board = "
//!     .......
//!     .......
//!     .......
//!     .......
//!     OOO....
//!     XXX....
//! "
//! .parse()
//! .unwrap();
//!
//! let mut bot = MiniMaxBot::with_depth(Piece::PlayerOne, 4);
//! assert_eq!(bot.select_move(&board), Some(3));
//! ```
//!
//! ## Get the best move according to MCTS
//!
//! ```
//! use connect4_bots::ai::mcts::{MctsBot, MctsConfig};
//! use connect4_bots::ai::Bot;
//! use connect4_bots::board::{Board, Piece};
//! use rand::thread_rng;
//!
//! let board = Board::default();
//! let config = MctsConfig {
//!     iterations: 200,
//!     ..MctsConfig::default()
//! };
//!
//! let mut bot = MctsBot::new(Piece::PlayerOne, config, thread_rng());
//! println!("{:?}", bot.select_move(&board))
//! ```

pub mod board;

pub mod wdl;

pub mod ai;

pub mod heuristic;

pub mod config;
pub mod error;

pub mod util;
