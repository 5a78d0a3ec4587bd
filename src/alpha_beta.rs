//! Depth-limited negamax with alpha-beta pruning.
//!
//! Instead of a single (alpha, beta) window the search carries one bound per
//! color: the best value Black, respectively White, is already guaranteed
//! elsewhere in the tree. Both are passed by value, so sibling branches never
//! see each other's updates.

use std::rc::Rc;

use fastrand::Rng;
use tracing::debug;

use crate::agent::{Agent, choose};
use crate::constants::DEFAULT_SEED;
use crate::error::Result;
use crate::eval::{Evaluator, Score, terminal_score};
use crate::game_state::GameState;
use crate::types::{Move, Player};

/// Negamax value of `state` for the player to move, skipping lines the
/// opponent would never allow.
///
/// A returned value strictly worse for the opponent than their bound is only
/// a bound itself; values that tie a bound are exact.
pub fn alpha_beta_result<E>(
    state: &Rc<GameState>,
    max_depth: u32,
    mut best_black: Score,
    mut best_white: Score,
    eval: &E,
) -> Result<Score>
where
    E: Evaluator + ?Sized,
{
    if state.is_over() {
        return Ok(terminal_score(state));
    }
    if max_depth == 0 {
        return Ok(Score::Heuristic(eval.evaluate(state)));
    }

    let mut best_so_far = Score::Loss;
    for mv in state.legal_moves()? {
        let next = state.apply_move(mv)?;
        let ours = -alpha_beta_result(&next, max_depth - 1, best_black, best_white, eval)?;
        best_so_far = best_so_far.max(ours);

        match state.next_player() {
            Player::White => {
                best_white = best_white.max(best_so_far);
                let outcome_for_black = -best_so_far;
                if outcome_for_black < best_black {
                    return Ok(best_so_far);
                }
            }
            Player::Black => {
                best_black = best_black.max(best_so_far);
                let outcome_for_white = -best_so_far;
                if outcome_for_white < best_white {
                    return Ok(best_so_far);
                }
            }
        }
    }
    Ok(best_so_far)
}

/// Alpha-beta counterpart of [`DepthPrunedAgent`](crate::depth_prune::DepthPrunedAgent):
/// same depth convention and tie-breaking, fewer nodes.
#[derive(Debug, Clone)]
pub struct AlphaBetaAgent<E> {
    max_depth: u32,
    eval: E,
    rng: Rng,
}

impl<E: Evaluator> AlphaBetaAgent<E> {
    pub fn new(max_depth: u32, eval: E) -> Self {
        Self::with_rng(max_depth, eval, Rng::with_seed(DEFAULT_SEED))
    }

    pub fn with_rng(max_depth: u32, eval: E, rng: Rng) -> Self {
        Self {
            max_depth,
            eval,
            rng,
        }
    }

    /// The best value for the player to move and every move achieving it.
    pub fn best_moves(&self, state: &Rc<GameState>) -> Result<(Score, Vec<Move>)> {
        let depth = self.max_depth.saturating_sub(1);
        let mut best_moves = Vec::new();
        let mut best_score = Score::Loss;
        let mut best_black = Score::Loss;
        let mut best_white = Score::Loss;

        for mv in state.legal_moves()? {
            let next = state.apply_move(mv)?;
            let ours = -alpha_beta_result(&next, depth, best_black, best_white, &self.eval)?;
            if best_moves.is_empty() || ours > best_score {
                best_moves = vec![mv];
                best_score = ours;
                match state.next_player() {
                    Player::Black => best_black = ours,
                    Player::White => best_white = ours,
                }
            } else if ours == best_score {
                best_moves.push(mv);
            }
        }
        Ok((best_score, best_moves))
    }
}

impl<E: Evaluator> Agent for AlphaBetaAgent<E> {
    fn select_move(&mut self, state: &Rc<GameState>) -> Result<Move> {
        let (best, best_moves) = self.best_moves(state)?;
        debug!(%best, ties = best_moves.len(), "alpha-beta search done");
        if best_moves.is_empty() {
            return Ok(Move::Pass);
        }
        Ok(choose(&mut self.rng, &best_moves))
    }
}
