//! The [`Agent`] interface and the random bot.

use fastrand::Rng;

use crate::constants::DEFAULT_SEED;
use crate::error::Result;
use crate::game_state::GameState;
use crate::playout::random_move;
use crate::types::Move;

use std::rc::Rc;

/// Something that picks a move for the player to move in a position.
pub trait Agent {
    fn select_move(&mut self, state: &Rc<GameState>) -> Result<Move>;
}

/// Plays a uniformly random valid move that does not fill one of its own
/// eyes, passing only when nothing else is left.
#[derive(Debug, Clone)]
pub struct RandomBot {
    rng: Rng,
}

impl Default for RandomBot {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RandomBot {
    pub fn new(seed: u64) -> Self {
        Self::with_rng(Rng::with_seed(seed))
    }

    pub fn with_rng(rng: Rng) -> Self {
        Self { rng }
    }
}

impl Agent for RandomBot {
    fn select_move(&mut self, state: &Rc<GameState>) -> Result<Move> {
        random_move(state, &mut self.rng)
    }
}

/// Pick one element uniformly at random. `items` must not be empty.
pub(crate) fn choose<T: Copy>(rng: &mut Rng, items: &[T]) -> T {
    items[rng.usize(..items.len())]
}
