use rand::rngs::SmallRng;
use rand::SeedableRng;

use connect4_bots::ai::genetic::{fitness, FitnessPolicy, GeneticBot, GeneticConfig};
use connect4_bots::ai::Bot;
use connect4_bots::board::{Board, Piece};
use connect4_bots::heuristic::{EvalConfig, Evaluation};
use connect4_bots::util::board_gen::board_with_moves;

use crate::ai::{check_forced_moves, immediate_win, must_block};

fn config(policy: FitnessPolicy) -> GeneticConfig {
    GeneticConfig {
        fitness: policy,
        ..GeneticConfig::default()
    }
}

#[test]
fn invalid_genes() {
    let board = board_with_moves(Board::default(), &[0, 0, 0, 0, 0, 0]).unwrap();
    let eval = Evaluation::new(Piece::PlayerOne, EvalConfig::default());

    for policy in [FitnessPolicy::GreedyReply, FitnessPolicy::PlanOnly] {
        let config = config(policy);
        assert_eq!(fitness(&eval, &config, &board, &[0, 1, 2]), config.invalid_fitness());
        assert_eq!(fitness(&eval, &config, &board, &[1, 9, 2]), config.invalid_fitness());
        assert!(fitness(&eval, &config, &board, &[1, 2, 3]) > config.invalid_fitness());
    }
}

#[test]
fn invalid_is_worse_than_loss() {
    let config = GeneticConfig::default();
    assert!(config.invalid_fitness() < config.eval.scores.loss as f64);
}

#[test]
fn earlier_wins_score_higher() {
    let board = immediate_win();
    let eval = Evaluation::new(Piece::PlayerOne, EvalConfig::default());
    let config = config(FitnessPolicy::PlanOnly);
    let win = config.eval.scores.win as f64;

    let now = fitness(&eval, &config, &board, &[3, 6]);
    let later = fitness(&eval, &config, &board, &[6, 3]);

    assert_eq!(now, win);
    assert_eq!(later, win - win / 4.0);
    assert!(later > config.eval.weights.max_abs_score(board.shape()) as f64);
}

#[test]
fn greedy_reply_punishes_ignored_threat() {
    let board = must_block();
    let eval = Evaluation::new(Piece::PlayerOne, EvalConfig::default());

    let greedy = config(FitnessPolicy::GreedyReply);
    assert_eq!(fitness(&eval, &greedy, &board, &[6, 6]), greedy.eval.scores.loss as f64);
    assert!(fitness(&eval, &greedy, &board, &[3, 6]) > greedy.eval.scores.loss as f64);

    let plan = config(FitnessPolicy::PlanOnly);
    assert!(fitness(&eval, &plan, &board, &[6, 6]) > plan.eval.scores.loss as f64);
}

#[test]
fn evolve_finds_immediate_win() {
    let board = immediate_win();
    for policy in [FitnessPolicy::GreedyReply, FitnessPolicy::PlanOnly] {
        let config = GeneticConfig {
            population_size: 40,
            ..config(policy)
        };
        let mut bot = GeneticBot::new(Piece::PlayerOne, config, SmallRng::seed_from_u64(3));

        let (plan, score) = bot.evolve(&board).unwrap();
        assert_eq!(plan.len(), GeneticConfig::default().sequence_length);
        assert_eq!(plan[0], 3, "{:?}", policy);
        assert_eq!(score, GeneticConfig::default().eval.scores.win as f64);
    }
}

#[test]
fn selected_moves_are_valid() {
    let mut board = Board::default();
    let mut bot = GeneticBot::new(
        Piece::PlayerOne,
        GeneticConfig {
            generations: 10,
            ..GeneticConfig::default()
        },
        SmallRng::seed_from_u64(0),
    );

    for _ in 0..3 {
        let col = bot.select_move(&board).unwrap();
        assert!(board.is_valid_column(col));
        board.drop_piece(col, Piece::PlayerOne).unwrap();
        board.drop_piece(6, Piece::PlayerTwo).unwrap();
    }
}

#[test]
fn forced_moves() {
    check_forced_moves(|piece| {
        Box::new(GeneticBot::new(
            piece,
            GeneticConfig {
                generations: 5,
                ..GeneticConfig::default()
            },
            SmallRng::seed_from_u64(1),
        ))
    });
}
