//! Monte Carlo Tree Search (MCTS) with UCB1 selection.
//!
//! Each iteration runs the four classic phases:
//! - Selection: descend through fully expanded nodes by UCB1
//! - Expansion: materialise one random untried move as a new child
//! - Simulation: random playout from the new node to the end of the game
//! - Backpropagation: add the result to every node on the path to the root
//!
//! The tree is an arena: nodes live in one `Vec` and refer to each other by
//! index, the parent link being a plain non-owning index. The whole tree is
//! built for a single `get_move` call and dropped afterwards.
//!
//! Rewards are always measured for the engine's own player (1 win, 0.5 draw,
//! 0 loss) and are added unchanged at every level of the tree.

use fastrand::Rng;
use log::debug;

use crate::board::{Board, Move, Outcome, Player, str_coord};
use crate::constants::{REWARD_DRAW, REWARD_LOSS, REWARD_WIN, UCB_C};
use crate::engine::Engine;
use crate::playout::random_playout;

/// Index of a node inside a [`SearchTree`].
pub type NodeId = usize;

/// A node in the MCTS search tree.
pub struct TreeNode {
    /// The position at this node (owned, never shared)
    pub board: Board,
    /// Parent node, `None` for the root
    pub parent: Option<NodeId>,
    /// Move that led here from the parent, `None` for the root
    pub mv: Option<Move>,
    /// Children in order of expansion
    pub children: Vec<NodeId>,
    /// Accumulated reward
    pub wins: f64,
    /// Number of visits
    pub visits: u32,
    /// Legal moves not yet expanded into children
    pub untried_moves: Vec<Move>,
}

impl TreeNode {
    fn new(board: Board, parent: Option<NodeId>, mv: Option<Move>) -> Self {
        let untried_moves = board.valid_moves(board.current_player());
        Self {
            board,
            parent,
            mv,
            children: Vec::new(),
            wins: 0.0,
            visits: 0,
            untried_moves,
        }
    }

    /// A node is fully expanded once every legal move has a child.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried_moves.is_empty()
    }

    /// Average reward, or -0.1 for an unvisited node.
    #[inline]
    pub fn winrate(&self) -> f64 {
        if self.visits > 0 {
            self.wins / self.visits as f64
        } else {
            -0.1
        }
    }
}

/// UCB1 score of `child` under a parent visited `parent_visits` times.
/// Unvisited children score infinity.
pub fn ucb1(child: &TreeNode, parent_visits: u32) -> f64 {
    if child.visits == 0 {
        return f64::INFINITY;
    }
    let visits = child.visits as f64;
    child.wins / visits + UCB_C * ((parent_visits as f64).ln() / visits).sqrt()
}

/// Reward of `outcome` for `player`.
pub fn reward(outcome: Outcome, player: Player) -> f64 {
    match outcome {
        Outcome::Win(winner) if winner == player => REWARD_WIN,
        Outcome::Win(_) => REWARD_LOSS,
        Outcome::Draw => REWARD_DRAW,
    }
}

/// Arena-backed search tree. Node 0 is the root.
pub struct SearchTree {
    nodes: Vec<TreeNode>,
}

impl SearchTree {
    pub const ROOT: NodeId = 0;

    /// Create a tree holding only a root for `board`.
    pub fn new(board: Board) -> Self {
        Self {
            nodes: vec![TreeNode::new(board, None, None)],
        }
    }

    pub fn root(&self) -> &TreeNode {
        &self.nodes[Self::ROOT]
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    /// Total number of nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Children of `id` in expansion order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &TreeNode> + '_ {
        self.nodes[id].children.iter().map(|&child| &self.nodes[child])
    }

    /// Child of `id` with the highest UCB1 score; the first one wins ties.
    fn select_child(&self, id: NodeId) -> NodeId {
        let node = &self.nodes[id];
        let mut best = node.children[0];
        let mut best_score = f64::NEG_INFINITY;
        for &child in &node.children {
            let score = ucb1(&self.nodes[child], node.visits);
            if score > best_score {
                best_score = score;
                best = child;
            }
        }
        best
    }

    /// Descend from the root while nodes are fully expanded and have children.
    fn select(&self) -> NodeId {
        let mut id = Self::ROOT;
        while self.nodes[id].is_fully_expanded() && !self.nodes[id].children.is_empty() {
            id = self.select_child(id);
        }
        id
    }

    /// Turn one random untried move of `id` into a new child.
    fn expand(&mut self, id: NodeId, rng: &mut Rng) -> NodeId {
        let node = &mut self.nodes[id];
        let mv = node.untried_moves.remove(rng.usize(..node.untried_moves.len()));

        let mut board = node.board.clone();
        let player = board.current_player();
        board.make_move(mv.0, mv.1, player);

        let child = self.nodes.len();
        self.nodes.push(TreeNode::new(board, Some(id), Some(mv)));
        self.nodes[id].children.push(child);
        child
    }

    /// Add one visit and `reward` to `id` and all its ancestors.
    fn backpropagate(&mut self, id: NodeId, reward: f64) {
        let mut current = Some(id);
        while let Some(id) = current {
            let node = &mut self.nodes[id];
            node.visits += 1;
            node.wins += reward;
            current = node.parent;
        }
    }

    /// Move of the most visited root child; the first expanded wins ties.
    pub fn best_move(&self) -> Option<Move> {
        let mut best: Option<&TreeNode> = None;
        for child in self.children(Self::ROOT) {
            if best.is_none_or(|b| child.visits > b.visits) {
                best = Some(child);
            }
        }
        best.and_then(|child| child.mv)
    }
}

/// Monte Carlo Tree Search player.
pub struct MctsEngine {
    player: Player,
    iterations: usize,
    rng: Rng,
}

impl MctsEngine {
    /// Create an engine drawing its randomness from `rng`.
    pub fn new(player: Player, iterations: usize, rng: Rng) -> Self {
        Self {
            player,
            iterations,
            rng,
        }
    }

    /// Engine with a fixed seed, for reproducible play.
    pub fn with_seed(player: Player, iterations: usize, seed: u64) -> Self {
        Self::new(player, iterations, Rng::with_seed(seed))
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Build a search tree for `board` and return it.
    ///
    /// The root's side to move is set to the engine's player regardless of
    /// the turn marker on `board`, so the tree always opens with our moves.
    pub fn search(&mut self, board: &Board) -> SearchTree {
        let mut root_board = board.clone();
        root_board.set_current_player(self.player);
        let mut tree = SearchTree::new(root_board);

        for _ in 0..self.iterations {
            let mut id = tree.select();

            if !tree.nodes[id].is_fully_expanded() {
                id = tree.expand(id, &mut self.rng);
            }

            let mut rollout = tree.nodes[id].board.clone();
            let outcome = random_playout(&mut rollout, &mut self.rng);

            tree.backpropagate(id, reward(outcome, self.player));
        }

        tree
    }
}

impl Engine for MctsEngine {
    fn name(&self) -> &str {
        "MCTS"
    }

    fn player(&self) -> Player {
        self.player
    }

    fn get_move(&mut self, board: &Board) -> Option<Move> {
        let moves = board.valid_moves(self.player);
        if moves.len() <= 1 {
            return moves.first().copied();
        }

        let tree = self.search(board);
        dump_children(&tree);
        // Without iterations the root has no children.
        tree.best_move().or(moves.first().copied())
    }
}

/// Log statistics of the root's children.
pub fn dump_children(tree: &SearchTree) {
    for child in tree.children(SearchTree::ROOT) {
        if let Some(mv) = child.mv {
            debug!(
                "move {} v={} w={:.1} wr={:.3}",
                str_coord(mv),
                child.visits,
                child.wins,
                child.winrate()
            );
        }
    }
}
