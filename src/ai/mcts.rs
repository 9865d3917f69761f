//! Monte Carlo Tree Search with random rollouts and UCT child selection.
//!
//! The tree is stored as an arena of nodes addressed by [NodeId], each node keeps the id of its parent
//! so rewards can be propagated back up. A new tree is built for every move and dropped afterwards.
use std::fmt::{Debug, Formatter};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::ai::Bot;
use crate::board::{Board, Piece};
use crate::heuristic::{EvalConfig, Evaluation};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// The number of select-expand-rollout-backpropagate iterations per move.
    pub iterations: u64,
    /// The exploration constant in the UCT formula.
    pub exploration: f64,
    /// Stop rollouts after this many moves and score the board with the heuristic instead.
    pub rollout_depth: Option<u32>,
    /// The heuristic value that maps to a full win or loss for depth-capped rollouts.
    pub heuristic_scale: f64,
    pub eval: EvalConfig,
}

impl Default for MctsConfig {
    fn default() -> Self {
        MctsConfig {
            iterations: 1000,
            exploration: std::f64::consts::SQRT_2,
            rollout_depth: None,
            heuristic_scale: 100.0,
            eval: EvalConfig::default(),
        }
    }
}

/// Index into the node arena of a [Tree].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub struct Node {
    pub parent: Option<NodeId>,
    /// The column that was played to reach this node, `None` for the root.
    pub column: Option<u8>,
    pub board: Board,
    /// The piece that moves next on `board`.
    pub to_move: Piece,
    pub terminal: bool,

    pub visits: u64,
    /// The sum of the rewards from the POV of the piece that played `column`.
    pub total_reward: f64,

    untried: Vec<u8>,
    pub children: Vec<NodeId>,
}

impl Node {
    fn new(parent: Option<NodeId>, column: Option<u8>, board: Board, to_move: Piece) -> Self {
        let terminal = board.is_terminal();
        let untried = if terminal { vec![] } else { board.valid_columns() };
        Node {
            parent,
            column,
            board,
            to_move,
            terminal,
            visits: 0,
            total_reward: 0.0,
            untried,
            children: vec![],
        }
    }

    /// The piece that played the move leading to this node.
    pub fn mover(&self) -> Piece {
        self.to_move.other()
    }

    pub fn mean_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward / self.visits as f64
        }
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    /// The upper confidence bound used to select this node from its parent.
    pub fn uct(&self, parent_visits: u64, exploration: f64) -> f64 {
        if self.visits == 0 || parent_visits == 0 {
            return f64::INFINITY;
        }
        let explore = ((parent_visits as f64).ln() / self.visits as f64).sqrt();
        self.mean_reward() + exploration * explore
    }
}

/// The search tree for a single move decision.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new(board: Board, to_move: Piece) -> Self {
        Tree {
            nodes: vec![Node::new(None, None, board, to_move)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The `(column, visits)` pairs of the children of the root, in expansion order.
    pub fn root_children(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.get(self.root()).children.iter().filter_map(move |&child| {
            let node = self.get(child);
            node.column.map(|col| (col, node.visits))
        })
    }

    /// The most visited child of the root, ties go to the child that was expanded first.
    pub fn best_move(&self) -> Option<u8> {
        let mut best: Option<(u8, u64)> = None;
        for (col, visits) in self.root_children() {
            if visits > 0 && best.map_or(true, |(_, best_visits)| visits > best_visits) {
                best = Some((col, visits));
            }
        }
        best.map(|(col, _)| col)
    }

    /// Descend from the root through fully expanded nodes, picking the child with the highest UCT.
    fn select(&self, exploration: f64) -> NodeId {
        let mut curr = self.root();
        loop {
            let node = self.get(curr);
            if node.terminal || !node.is_fully_expanded() || node.children.is_empty() {
                return curr;
            }

            let mut best: Option<(NodeId, f64)> = None;
            for &child in &node.children {
                let value = self.get(child).uct(node.visits, exploration);
                if best.map_or(true, |(_, best_value)| value > best_value) {
                    best = Some((child, value));
                }
            }

            match best {
                Some((child, _)) => curr = child,
                None => return curr,
            }
        }
    }

    /// Add a child for a random untried move of `id`, returns `id` itself if there is nothing to expand.
    fn expand(&mut self, id: NodeId, rng: &mut impl Rng) -> NodeId {
        let node = self.get_mut(id);
        if node.terminal || node.untried.is_empty() {
            return id;
        }

        let index = rng.gen_range(0..node.untried.len());
        let col = node.untried.swap_remove(index);
        let to_move = node.to_move;
        let board = node.board.clone_and_play(col, to_move);

        let child_id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(Some(id), Some(col), board, to_move.other()));
        self.get_mut(id).children.push(child_id);
        child_id
    }

    /// Add `reward`, given from the POV of `pov`, to `id` and all of its ancestors.
    fn backpropagate(&mut self, id: NodeId, reward: f64, pov: Piece) {
        let mut curr = Some(id);
        while let Some(id) = curr {
            let node = self.get_mut(id);
            node.visits += 1;
            node.total_reward += if node.mover() == pov { reward } else { -reward };
            curr = node.parent;
        }
    }
}

pub struct MctsBot<R: Rng> {
    eval: Evaluation,
    config: MctsConfig,
    rng: R,
}

impl<R: Rng> Debug for MctsBot<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MctsBot {{ piece: {:?}, iterations: {}, exploration: {}, rollout_depth: {:?} }}",
            self.eval.piece(),
            self.config.iterations,
            self.config.exploration,
            self.config.rollout_depth
        )
    }
}

impl<R: Rng> MctsBot<R> {
    pub fn new(piece: Piece, config: MctsConfig, rng: R) -> Self {
        MctsBot {
            eval: Evaluation::new(piece, config.eval),
            config,
            rng,
        }
    }

    /// Build a search tree for `board` with our piece to move, running the configured number of iterations.
    pub fn search(&mut self, board: &Board) -> Tree {
        let mut tree = Tree::new(board.clone(), self.eval.piece());

        for _ in 0..self.config.iterations {
            let leaf = tree.select(self.config.exploration);
            let node = tree.expand(leaf, &mut self.rng);

            let reward = {
                let node = tree.get(node);
                self.rollout(&node.board, node.to_move)
            };
            tree.backpropagate(node, reward, self.eval.piece());
        }

        let root = tree.get(tree.root());
        trace!(
            nodes = tree.len(),
            visits = root.visits,
            mean_reward = root.mean_reward(),
            "mcts search done"
        );
        tree
    }

    /// Play random moves until the game ends or the rollout depth is reached.
    /// Returns the reward from our POV: `1` for a win, `-1` for a loss, `0` for a draw.
    fn rollout(&mut self, board: &Board, to_move: Piece) -> f64 {
        let mut board = board.clone();
        let mut piece = to_move;
        let mut depth = 0;

        loop {
            if let Some(outcome) = board.outcome() {
                return outcome.pov(self.eval.piece()).sign::<f64>();
            }
            if self.config.rollout_depth.map_or(false, |max| depth >= max) {
                let value = self.eval.score_position(&board) as f64 / self.config.heuristic_scale;
                return value.clamp(-1.0, 1.0);
            }

            match board.random_available_move(&mut self.rng) {
                Some(col) => board.play(col, piece),
                None => unreachable!("no available moves on non-terminal board {:?}", board),
            }
            piece = piece.other();
            depth += 1;
        }
    }
}

impl<R: Rng> Bot for MctsBot<R> {
    fn piece(&self) -> Piece {
        self.eval.piece()
    }

    fn select_move(&mut self, board: &Board) -> Option<u8> {
        if board.valid_columns().is_empty() {
            return None;
        }

        let tree = self.search(board);
        match tree.best_move() {
            Some(col) => {
                debug!(piece = ?self.eval.piece(), column = col, nodes = tree.len(), "mcts selected move");
                Some(col)
            }
            None => {
                warn!(
                    iterations = self.config.iterations,
                    "mcts search visited no moves, picking a random column"
                );
                board.random_available_move(&mut self.rng)
            }
        }
    }
}
