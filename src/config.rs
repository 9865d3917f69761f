//! Configuration for the board and every bot, loadable from TOML.
//!
//! Every section and every field is optional, missing values fall back to their defaults:
//!
//! ```
//! use connect4_bots::config::BotConfig;
//!
//! let config = BotConfig::from_toml_str(
//!     r#"
//!     [minimax]
//!     depth = 6
//!
//!     [mcts]
//!     iterations = 200
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.minimax.depth, 6);
//! assert_eq!(config.mcts.iterations, 200);
//! assert_eq!(config.board.columns, 7);
//! ```
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ai::annealing::{AnnealingBot, AnnealingConfig};
use crate::ai::expectimax::{ExpectiMaxBot, ExpectimaxConfig};
use crate::ai::genetic::{GeneticBot, GeneticConfig};
use crate::ai::mcts::{MctsBot, MctsConfig};
use crate::ai::minimax::{MiniMaxBot, MinimaxConfig};
use crate::board::{Board, BoardShape, Piece};
use crate::error::ConfigError;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub board: BoardShape,
    pub minimax: MinimaxConfig,
    pub expectimax: ExpectimaxConfig,
    pub annealing: AnnealingConfig,
    pub mcts: MctsConfig,
    pub genetic: GeneticConfig,
}

impl BotConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: BotConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let shape = self.board;
        shape.validate()?;

        for (name, eval) in [
            ("minimax", &self.minimax.eval),
            ("expectimax", &self.expectimax.eval),
            ("annealing", &self.annealing.eval),
            ("mcts", &self.mcts.eval),
            ("genetic", &self.genetic.eval),
        ] {
            eval.validate(shape)
                .map_err(|e| ConfigError::Validation(format!("{}.eval: {}", name, e)))?;
        }

        if self.minimax.depth == 0 {
            return Err(validation("minimax.depth must be > 0"));
        }
        if self.expectimax.depth == 0 {
            return Err(validation("expectimax.depth must be > 0"));
        }

        let annealing = &self.annealing;
        if annealing.depth == 0 {
            return Err(validation("annealing.depth must be > 0"));
        }
        if !(0.0..1.0).contains(&annealing.acceptance_threshold) {
            return Err(validation("annealing.acceptance_threshold must be in [0, 1)"));
        }
        if !(0.0..=1.0).contains(&annealing.fill_threshold) {
            return Err(validation("annealing.fill_threshold must be in [0, 1]"));
        }
        if !(annealing.temperature_constant >= 0.0) {
            return Err(validation("annealing.temperature_constant must be >= 0"));
        }

        let mcts = &self.mcts;
        if !(mcts.exploration >= 0.0) {
            return Err(validation("mcts.exploration must be >= 0"));
        }
        if !(mcts.heuristic_scale > 0.0) {
            return Err(validation("mcts.heuristic_scale must be > 0"));
        }

        let genetic = &self.genetic;
        if genetic.population_size == 0 {
            return Err(validation("genetic.population_size must be > 0"));
        }
        if genetic.sequence_length == 0 {
            return Err(validation("genetic.sequence_length must be > 0"));
        }
        if !(0.0..=1.0).contains(&genetic.mutation_rate) {
            return Err(validation("genetic.mutation_rate must be in [0, 1]"));
        }

        Ok(())
    }

    pub fn empty_board(&self) -> Board {
        Board::new(self.board)
    }

    pub fn minimax_bot(&self, piece: Piece) -> MiniMaxBot {
        MiniMaxBot::new(piece, self.minimax)
    }

    pub fn expectimax_bot(&self, piece: Piece) -> ExpectiMaxBot {
        ExpectiMaxBot::new(piece, self.expectimax)
    }

    pub fn annealing_bot<R: Rng>(&self, piece: Piece, rng: R) -> AnnealingBot<R> {
        AnnealingBot::new(piece, self.annealing, rng)
    }

    pub fn mcts_bot<R: Rng>(&self, piece: Piece, rng: R) -> MctsBot<R> {
        MctsBot::new(piece, self.mcts, rng)
    }

    pub fn genetic_bot<R: Rng>(&self, piece: Piece, rng: R) -> GeneticBot<R> {
        GeneticBot::new(piece, self.genetic, rng)
    }
}

fn validation(msg: &str) -> ConfigError {
    ConfigError::Validation(msg.to_string())
}
