//! A genetic algorithm over fixed-length move plans.
//!
//! Each chromosome is a sequence of columns for our piece. Its fitness is found by replaying it on a copy of the
//! board, with the opponent answering every move greedily (see [FitnessPolicy]). The population evolves through
//! roulette-wheel selection, single-point crossover and per-gene mutation, and the first move of the fittest
//! plan in the final generation is played.
use std::fmt::{Debug, Formatter};

use internal_iterator::InternalIterator;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::ai::Bot;
use crate::board::{Board, Piece};
use crate::heuristic::{EvalConfig, Evaluation};

/// Added to the shifted fitness values so every chromosome keeps a nonzero chance of being selected.
const SELECTION_EPSILON: f64 = 0.1;

/// A candidate plan: the columns our piece plays, in order.
pub type Chromosome = Vec<u8>;

/// How the opponent is simulated while replaying a chromosome.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessPolicy {
    /// After each of our moves the opponent plays an immediate win if it has one,
    /// and otherwise the move that maximizes its own heuristic value.
    GreedyReply,
    /// Only our moves are played, the opponent never answers.
    PlanOnly,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticConfig {
    pub population_size: usize,
    pub generations: u32,
    /// The probability that a single gene is replaced by a random column.
    pub mutation_rate: f64,
    pub sequence_length: usize,
    pub fitness: FitnessPolicy,
    pub eval: EvalConfig,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        GeneticConfig {
            population_size: 20,
            generations: 50,
            mutation_rate: 0.1,
            sequence_length: 6,
            fitness: FitnessPolicy::GreedyReply,
            eval: EvalConfig::default(),
        }
    }
}

impl GeneticConfig {
    /// The fitness of a chromosome that tries to play an unavailable column, lower than any other fitness.
    pub fn invalid_fitness(&self) -> f64 {
        2.0 * self.eval.scores.loss as f64
    }
}

/// Replay `chromosome` for `eval.piece()` on a copy of `board` and score the result.
///
/// * an unavailable column gives [GeneticConfig::invalid_fitness]
/// * a win gives the win score, decreasing the later in the plan it happens
/// * an opponent win gives the loss score
/// * otherwise the heuristic value of the final board
pub fn fitness(eval: &Evaluation, config: &GeneticConfig, board: &Board, chromosome: &[u8]) -> f64 {
    let scores = eval.scores();
    let win_decay = scores.win as f64 / (2.0 * chromosome.len().max(1) as f64);
    let opponent = eval.flipped();

    let mut board = board.clone();
    for (step, &col) in chromosome.iter().enumerate() {
        if board.is_terminal() {
            break;
        }
        if board.drop_piece(col, eval.piece()).is_err() {
            return config.invalid_fitness();
        }
        if board.winning_move(eval.piece()) {
            return scores.win as f64 - step as f64 * win_decay;
        }

        if config.fitness == FitnessPolicy::GreedyReply {
            if let Some(reply) = greedy_reply(&opponent, &board) {
                board.play(reply, opponent.piece());
                if board.winning_move(opponent.piece()) {
                    return scores.loss as f64;
                }
            }
        }
    }

    eval.score_position(&board) as f64
}

/// The reply with the best value for `opponent` one ply deep, the first column wins ties.
fn greedy_reply(opponent: &Evaluation, board: &Board) -> Option<u8> {
    let mut best: Option<(i64, u8)> = None;
    board.available_moves().for_each(|col| {
        let child = board.clone_and_play(col, opponent.piece());
        let value = opponent.leaf_value(&child, 0);
        if best.map_or(true, |(best_value, _)| value > best_value) {
            best = Some((value, col));
        }
    });
    best.map(|(_, col)| col)
}

pub struct GeneticBot<R: Rng> {
    eval: Evaluation,
    config: GeneticConfig,
    rng: R,
}

impl<R: Rng> Debug for GeneticBot<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GeneticBot {{ piece: {:?}, population: {}, generations: {}, length: {}, fitness: {:?} }}",
            self.eval.piece(),
            self.config.population_size,
            self.config.generations,
            self.config.sequence_length,
            self.config.fitness
        )
    }
}

impl<R: Rng> GeneticBot<R> {
    pub fn new(piece: Piece, config: GeneticConfig, rng: R) -> Self {
        assert!(config.population_size > 0, "requires a nonempty population");
        assert!(config.sequence_length > 0, "requires chromosomes of at least one gene");
        assert!(
            (0.0..=1.0).contains(&config.mutation_rate),
            "mutation rate must be a probability"
        );
        GeneticBot {
            eval: Evaluation::new(piece, config.eval),
            config,
            rng,
        }
    }

    pub fn fitness(&self, board: &Board, chromosome: &[u8]) -> f64 {
        fitness(&self.eval, &self.config, board, chromosome)
    }

    /// Run the full evolution on `board` and return the fittest chromosome of the final generation
    /// with its fitness, `None` if there are no available columns.
    pub fn evolve(&mut self, board: &Board) -> Option<(Chromosome, f64)> {
        let valid = board.valid_columns();
        if valid.is_empty() {
            return None;
        }

        let mut population: Vec<Chromosome> = (0..self.config.population_size)
            .map(|_| self.random_chromosome(&valid))
            .collect();

        for generation in 0..self.config.generations {
            let scores = self.evaluate(board, &population);
            trace!(
                generation,
                best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                "genetic generation"
            );

            let parents = self.select(&population, &scores);
            population = self.breed(&parents);
            self.mutate(&mut population, &valid);
        }

        let scores = self.evaluate(board, &population);
        let mut best: Option<(usize, f64)> = None;
        for (i, &score) in scores.iter().enumerate() {
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((i, score));
            }
        }
        best.map(|(i, score)| (population.swap_remove(i), score))
    }

    fn random_chromosome(&mut self, valid: &[u8]) -> Chromosome {
        (0..self.config.sequence_length)
            .filter_map(|_| valid.choose(&mut self.rng).copied())
            .collect()
    }

    fn evaluate(&self, board: &Board, population: &[Chromosome]) -> Vec<f64> {
        population.iter().map(|c| self.fitness(board, c)).collect()
    }

    /// Fitness-proportionate selection of a full population of parents.
    fn select(&mut self, population: &[Chromosome], scores: &[f64]) -> Vec<Chromosome> {
        let n = self.config.population_size;
        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let shift = if min <= 0.0 { -min + SELECTION_EPSILON } else { 0.0 };

        match WeightedIndex::<f64>::new(scores.iter().map(|&s| s + shift)) {
            Ok(dist) => (0..n).map(|_| population[dist.sample(&mut self.rng)].clone()).collect(),
            Err(e) => {
                warn!(error = %e, "degenerate fitness weights, selecting uniformly");
                (0..n)
                    .filter_map(|_| population.choose(&mut self.rng).cloned())
                    .collect()
            }
        }
    }

    /// Single-point crossover of consecutive pairs of parents, two children per pair.
    fn breed(&mut self, parents: &[Chromosome]) -> Vec<Chromosome> {
        let mut next = Vec::with_capacity(parents.len() + 1);
        for i in (0..parents.len()).step_by(2) {
            let a = &parents[i];
            let b = parents.get(i + 1).unwrap_or(&parents[0]);

            let len = a.len();
            let cut = match len {
                0 | 1 => len,
                2 => 1,
                _ => self.rng.gen_range(1..len - 1),
            };

            next.push(a[..cut].iter().chain(&b[cut..]).copied().collect());
            next.push(b[..cut].iter().chain(&a[cut..]).copied().collect());
        }
        next.truncate(parents.len());
        next
    }

    fn mutate(&mut self, population: &mut [Chromosome], valid: &[u8]) {
        let rate = self.config.mutation_rate;
        for chromosome in population {
            for gene in chromosome.iter_mut() {
                if self.rng.gen_bool(rate) {
                    if let Some(&col) = valid.choose(&mut self.rng) {
                        *gene = col;
                    }
                }
            }
        }
    }
}

impl<R: Rng> Bot for GeneticBot<R> {
    fn piece(&self) -> Piece {
        self.eval.piece()
    }

    fn select_move(&mut self, board: &Board) -> Option<u8> {
        let (best, score) = self.evolve(board)?;

        match best.first() {
            Some(&col) if board.is_valid_column(col) => {
                debug!(piece = ?self.eval.piece(), column = col, fitness = score, plan = ?best, "genetic selected move");
                Some(col)
            }
            _ => {
                warn!(plan = ?best, "fittest plan starts with an unavailable column, picking a random column");
                board.random_available_move(&mut self.rng)
            }
        }
    }
}
