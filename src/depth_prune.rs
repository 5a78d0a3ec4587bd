//! Depth-limited negamax search with a heuristic cutoff.

use std::rc::Rc;

use fastrand::Rng;
use tracing::debug;

use crate::agent::{Agent, choose};
use crate::constants::DEFAULT_SEED;
use crate::error::Result;
use crate::eval::{Evaluator, Score, terminal_score};
use crate::game_state::GameState;
use crate::types::Move;

/// Negamax value of `state` for the player to move, searching `max_depth`
/// plies before falling back to `eval`.
pub fn best_result<E>(state: &Rc<GameState>, max_depth: u32, eval: &E) -> Result<Score>
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
        let ours = -best_result(&next, max_depth - 1, eval)?;
        best_so_far = best_so_far.max(ours);
    }
    Ok(best_so_far)
}

/// Searches each candidate `max_depth` plies deep (the candidate itself
/// counts as the first ply) and plays a random move among the best.
#[derive(Debug, Clone)]
pub struct DepthPrunedAgent<E> {
    max_depth: u32,
    eval: E,
    rng: Rng,
}

impl<E: Evaluator> DepthPrunedAgent<E> {
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

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Value of every legal move for the player to move.
    pub fn score_moves(&self, state: &Rc<GameState>) -> Result<Vec<(Move, Score)>> {
        let depth = self.max_depth.saturating_sub(1);
        state
            .legal_moves()?
            .into_iter()
            .map(|mv| {
                let next = state.apply_move(mv)?;
                Ok((mv, -best_result(&next, depth, &self.eval)?))
            })
            .collect()
    }
}

impl<E: Evaluator> Agent for DepthPrunedAgent<E> {
    fn select_move(&mut self, state: &Rc<GameState>) -> Result<Move> {
        let scored = self.score_moves(state)?;
        let Some(best) = scored.iter().map(|(_, score)| *score).max() else {
            return Ok(Move::Pass);
        };
        let best_moves: Vec<Move> = scored
            .into_iter()
            .filter(|(_, score)| *score == best)
            .map(|(mv, _)| mv)
            .collect();
        debug!(%best, ties = best_moves.len(), "depth-pruned search done");
        Ok(choose(&mut self.rng, &best_moves))
    }
}
