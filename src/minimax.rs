//! Exhaustive minimax search.
//!
//! Searches every line of play down to a terminal state. Only practical for
//! games that are guaranteed to end within a handful of moves, but it is the
//! reference the pruned searches are checked against.

use std::rc::Rc;

use fastrand::Rng;
use tracing::debug;

use crate::agent::{Agent, choose};
use crate::constants::DEFAULT_SEED;
use crate::error::Result;
use crate::game_state::GameState;
use crate::types::Move;

/// Outcome of perfect play, from the perspective of the player to move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Loss,
    Draw,
    Win,
}

impl Outcome {
    /// The same outcome seen by the opponent.
    pub fn reverse(self) -> Outcome {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Loss => Outcome::Win,
            Outcome::Draw => Outcome::Draw,
        }
    }
}

/// Best outcome the player to move can force from `state`.
pub fn best_result(state: &Rc<GameState>) -> Result<Outcome> {
    if state.is_over() {
        return Ok(match state.winner() {
            Some(winner) if winner == state.next_player() => Outcome::Win,
            None => Outcome::Draw,
            Some(_) => Outcome::Loss,
        });
    }

    let mut best_so_far = Outcome::Loss;
    for mv in state.legal_moves()? {
        let next = state.apply_move(mv)?;
        let ours = best_result(&next)?.reverse();
        best_so_far = best_so_far.max(ours);
    }
    Ok(best_so_far)
}

/// Plays a random move among those with the best forced outcome.
#[derive(Debug, Clone)]
pub struct MinimaxAgent {
    rng: Rng,
}

impl Default for MinimaxAgent {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl MinimaxAgent {
    pub fn new(seed: u64) -> Self {
        Self::with_rng(Rng::with_seed(seed))
    }

    pub fn with_rng(rng: Rng) -> Self {
        Self { rng }
    }
}

impl Agent for MinimaxAgent {
    fn select_move(&mut self, state: &Rc<GameState>) -> Result<Move> {
        let mut winning = Vec::new();
        let mut drawing = Vec::new();
        let mut losing = Vec::new();

        for mv in state.legal_moves()? {
            let next = state.apply_move(mv)?;
            match best_result(&next)?.reverse() {
                Outcome::Win => winning.push(mv),
                Outcome::Draw => drawing.push(mv),
                Outcome::Loss => losing.push(mv),
            }
        }
        debug!(
            winning = winning.len(),
            drawing = drawing.len(),
            losing = losing.len(),
            "minimax buckets"
        );

        // Losing moves are still played rather than resigning.
        let bucket = [winning, drawing, losing]
            .into_iter()
            .find(|moves| !moves.is_empty())
            .unwrap_or_else(|| vec![Move::Pass]);
        Ok(choose(&mut self.rng, &bucket))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse() {
        assert_eq!(Outcome::Win.reverse(), Outcome::Loss);
        assert_eq!(Outcome::Loss.reverse(), Outcome::Win);
        assert_eq!(Outcome::Draw.reverse(), Outcome::Draw);
        assert!(Outcome::Win > Outcome::Draw && Outcome::Draw > Outcome::Loss);
    }
}
