use rand::rngs::SmallRng;
use rand::SeedableRng;

use connect4_bots::ai::mcts::{MctsBot, MctsConfig};
use connect4_bots::ai::Bot;
use connect4_bots::board::{Board, Piece};
use connect4_bots::util::tiny::consistent_rng;

use crate::ai::{check_forced_moves, immediate_win};

fn config(iterations: u64) -> MctsConfig {
    MctsConfig {
        iterations,
        ..MctsConfig::default()
    }
}

#[test]
fn root_visits_add_up() {
    let iterations = 500;
    let mut bot = MctsBot::new(Piece::PlayerOne, config(iterations), consistent_rng());
    let tree = bot.search(&Board::default());

    let root = tree.get(tree.root());
    assert_eq!(root.visits, iterations);
    assert_eq!(tree.root_children().map(|(_, visits)| visits).sum::<u64>(), iterations);
    assert_eq!(tree.root_children().count(), 7, "all columns should be expanded");
    assert!(tree.len() <= iterations as usize + 1);

    let best = tree.best_move().unwrap();
    let best_visits = tree
        .root_children()
        .find(|&(col, _)| col == best)
        .map(|(_, visits)| visits)
        .unwrap();
    assert!(best_visits > 0);
    assert!(tree.root_children().all(|(_, visits)| visits <= best_visits));
}

#[test]
fn children_are_linked_to_parents() {
    let mut bot = MctsBot::new(Piece::PlayerOne, config(200), consistent_rng());
    let tree = bot.search(&Board::default());

    let root = tree.root();
    assert_eq!(tree.get(root).parent, None);
    assert_eq!(tree.get(root).column, None);

    for &child in &tree.get(root).children {
        let node = tree.get(child);
        assert_eq!(node.parent, Some(root));
        assert_eq!(node.mover(), Piece::PlayerOne);
        assert_eq!(node.to_move, Piece::PlayerTwo);
        assert_eq!(node.board.count_filled_slots(), 1);

        let child_visits: u64 = node.children.iter().map(|&c| tree.get(c).visits).sum();
        assert!(child_visits <= node.visits);
    }
}

#[test]
fn takes_immediate_win() {
    let board = immediate_win();
    for seed in 0..4 {
        let mut bot = MctsBot::new(Piece::PlayerOne, config(2000), SmallRng::seed_from_u64(seed));
        assert_eq!(bot.select_move(&board), Some(3), "seed {}", seed);
    }
}

#[test]
fn depth_capped_rollouts() {
    let config = MctsConfig {
        iterations: 300,
        rollout_depth: Some(4),
        ..MctsConfig::default()
    };
    let mut bot = MctsBot::new(Piece::PlayerOne, config, consistent_rng());
    let tree = bot.search(&Board::default());

    let root = tree.get(tree.root());
    assert_eq!(root.visits, 300);
    assert!(root.children.iter().all(|&c| tree.get(c).mean_reward().abs() <= 1.0));
}

#[test]
fn forced_moves() {
    check_forced_moves(|piece| Box::new(MctsBot::new(piece, config(100), consistent_rng())));
}
