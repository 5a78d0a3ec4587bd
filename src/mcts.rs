//! Monte Carlo Tree Search with UCT selection.
//!
//! Each round runs the four classic phases:
//! - selection: descend through fully expanded nodes by UCT score
//! - expansion: add one child for a random unvisited move
//! - simulation: random playout from the new node to the end of the game
//! - backpropagation: count the rollout and the winner on every node up to the root
//!
//! Nodes live in an arena owned by [`MctsTree`]; a node refers to its parent
//! and children by [`NodeId`], so the parent link never owns anything.

use std::ops::Index;
use std::rc::Rc;

use fastrand::Rng;
use tracing::{debug, trace};

use crate::agent::Agent;
use crate::constants::{DEFAULT_SEED, MCTS_ROUNDS, MCTS_TEMPERATURE};
use crate::error::{GoError, Result};
use crate::game_state::GameState;
use crate::playout::simulate_random_game;
use crate::types::{Move, Player};

/// Index of a node in an [`MctsTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A node in the search tree.
#[derive(Debug)]
pub struct MctsNode {
    state: Rc<GameState>,
    parent: Option<NodeId>,
    mv: Option<Move>,
    /// Wins indexed by color (black, white)
    win_counts: [u32; 2],
    num_rollouts: u32,
    children: Vec<NodeId>,
    /// Legal moves not yet expanded into children
    unvisited_moves: Vec<Move>,
}

impl MctsNode {
    fn new(state: Rc<GameState>, parent: Option<NodeId>, mv: Option<Move>) -> Result<Self> {
        let unvisited_moves = if state.is_over() {
            Vec::new()
        } else {
            state.legal_moves()?
        };
        Ok(Self {
            state,
            parent,
            mv,
            win_counts: [0, 0],
            num_rollouts: 0,
            children: Vec::new(),
            unvisited_moves,
        })
    }

    pub fn state(&self) -> &Rc<GameState> {
        &self.state
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The move that led here from the parent (`None` at the root).
    pub fn mv(&self) -> Option<Move> {
        self.mv
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn num_rollouts(&self) -> u32 {
        self.num_rollouts
    }

    pub fn win_count(&self, player: Player) -> u32 {
        self.win_counts[color_index(player)]
    }

    pub fn can_add_child(&self) -> bool {
        !self.unvisited_moves.is_empty()
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_over()
    }

    /// Count one rollout; a drawn rollout credits nobody.
    pub fn record_win(&mut self, winner: Option<Player>) {
        self.num_rollouts += 1;
        if let Some(winner) = winner {
            self.win_counts[color_index(winner)] += 1;
        }
    }

    /// Fraction of this node's rollouts won by `player`.
    pub fn winning_frac(&self, player: Player) -> Result<f64> {
        if self.num_rollouts == 0 {
            return Err(GoError::EmptyRolloutQuery);
        }
        Ok(self.win_count(player) as f64 / self.num_rollouts as f64)
    }
}

#[inline]
fn color_index(player: Player) -> usize {
    match player {
        Player::Black => 0,
        Player::White => 1,
    }
}

/// Arena holding every node of one search. Node 0 is the root.
#[derive(Debug)]
pub struct MctsTree {
    nodes: Vec<MctsNode>,
}

impl MctsTree {
    pub const ROOT: NodeId = NodeId(0);

    pub fn new(state: Rc<GameState>) -> Result<Self> {
        Ok(Self {
            nodes: vec![MctsNode::new(state, None, None)?],
        })
    }

    pub fn root(&self) -> &MctsNode {
        &self[Self::ROOT]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Expand one unvisited move of `id`, chosen uniformly at random.
    ///
    /// Panics if `id` has no unvisited moves left; check
    /// [`MctsNode::can_add_child`] first.
    pub fn add_random_child(&mut self, id: NodeId, rng: &mut Rng) -> Result<NodeId> {
        let node = &mut self.nodes[id.0];
        let index = rng.usize(..node.unvisited_moves.len());
        let mv = node.unvisited_moves.swap_remove(index);
        let child_state = node.state.apply_move(mv)?;

        let child_id = NodeId(self.nodes.len());
        let child = MctsNode::new(child_state, Some(id), Some(mv))?;
        self.nodes.push(child);
        self.nodes[id.0].children.push(child_id);
        Ok(child_id)
    }

    /// Record `winner` on `id` and each of its ancestors.
    pub fn backpropagate(&mut self, id: NodeId, winner: Option<Player>) {
        let mut current = Some(id);
        while let Some(id) = current {
            let node = &mut self.nodes[id.0];
            node.record_win(winner);
            current = node.parent;
        }
    }
}

impl Index<NodeId> for MctsTree {
    type Output = MctsNode;

    fn index(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.0]
    }
}

/// Picks moves by running a fixed number of MCTS rounds.
#[derive(Debug, Clone)]
pub struct MctsAgent {
    num_rounds: usize,
    temperature: f64,
    rng: Rng,
}

impl Default for MctsAgent {
    fn default() -> Self {
        Self::new(MCTS_ROUNDS, MCTS_TEMPERATURE, DEFAULT_SEED)
    }
}

impl MctsAgent {
    pub fn new(num_rounds: usize, temperature: f64, seed: u64) -> Self {
        Self::with_rng(num_rounds, temperature, Rng::with_seed(seed))
    }

    pub fn with_rng(num_rounds: usize, temperature: f64, rng: Rng) -> Self {
        Self {
            num_rounds,
            temperature,
            rng,
        }
    }

    /// Build a search tree for `state` by running every round.
    pub fn search(&mut self, state: &Rc<GameState>) -> Result<MctsTree> {
        let mut tree = MctsTree::new(Rc::clone(state))?;

        for round in 0..self.num_rounds {
            let mut node = MctsTree::ROOT;
            while !tree[node].can_add_child() && !tree[node].is_terminal() {
                node = self.select_child(&tree, node)?;
            }

            if tree[node].can_add_child() {
                node = tree.add_random_child(node, &mut self.rng)?;
            }

            let winner = simulate_random_game(tree[node].state(), &mut self.rng)?;
            tree.backpropagate(node, winner);
            trace!(round, nodes = tree.len(), ?winner, "mcts round");
        }
        Ok(tree)
    }

    /// Child of `id` with the highest UCT score.
    fn select_child(&self, tree: &MctsTree, id: NodeId) -> Result<NodeId> {
        let node = &tree[id];
        let player = node.state().next_player();
        let total_rollouts: u32 = node.children.iter().map(|&c| tree[c].num_rollouts).sum();
        let log_rollouts = (total_rollouts as f64).ln();

        let mut best_score = f64::NEG_INFINITY;
        let mut best_child = None;
        for &child_id in &node.children {
            let child = &tree[child_id];
            let win_percentage = child.winning_frac(player)?;
            let exploration = (log_rollouts / child.num_rollouts as f64).sqrt();
            let uct_score = win_percentage + self.temperature * exploration;
            if uct_score > best_score {
                best_score = uct_score;
                best_child = Some(child_id);
            }
        }
        best_child.ok_or(GoError::EmptyRolloutQuery)
    }
}

impl Agent for MctsAgent {
    fn select_move(&mut self, state: &Rc<GameState>) -> Result<Move> {
        let tree = self.search(state)?;
        let player = state.next_player();

        let mut best_move = Move::Pass;
        let mut best_pct = -1.0;
        for &child_id in tree.root().children() {
            let child = &tree[child_id];
            let child_pct = child.winning_frac(player)?;
            if child_pct > best_pct {
                best_pct = child_pct;
                best_move = child.mv().unwrap_or(Move::Pass);
            }
        }
        debug!(%best_move, win_pct = best_pct, nodes = tree.len(), "mcts selected move");
        Ok(best_move)
    }
}
