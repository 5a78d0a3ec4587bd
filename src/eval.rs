//! Search values and heuristic evaluation.
//!
//! Depth-limited searches score positions with a [`Score`]: decisive results
//! are tagged [`Score::Win`] / [`Score::Loss`] and can never collide with a
//! heuristic number, whatever its magnitude.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;

use crate::game_state::GameState;
use crate::types::Player;

/// A search value from the perspective of the player to move.
///
/// Ordered `Loss < Heuristic(_) < Win`. A `Draw` ranks level with
/// `Heuristic(0)`.
#[derive(Copy, Clone, Debug)]
pub enum Score {
    Loss,
    Draw,
    Heuristic(i32),
    Win,
}

impl Score {
    fn rank(self) -> (u8, i32) {
        match self {
            Score::Loss => (0, 0),
            Score::Draw => (1, 0),
            Score::Heuristic(v) => (1, v),
            Score::Win => (2, 0),
        }
    }

    pub fn is_decisive(self) -> bool {
        matches!(self, Score::Win | Score::Loss)
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.rank() == other.rank()
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

/// The same value seen from the opponent's side.
impl Neg for Score {
    type Output = Score;

    fn neg(self) -> Score {
        match self {
            Score::Loss => Score::Win,
            Score::Win => Score::Loss,
            Score::Draw => Score::Draw,
            Score::Heuristic(v) => Score::Heuristic(v.saturating_neg()),
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Loss => write!(f, "loss"),
            Score::Draw => write!(f, "draw"),
            Score::Heuristic(v) => write!(f, "{v:+}"),
            Score::Win => write!(f, "win"),
        }
    }
}

/// Heuristic position evaluator for the depth-limited searches.
///
/// Returns a score from the point of view of `state.next_player()`. It must
/// be deterministic.
pub trait Evaluator {
    fn evaluate(&self, state: &GameState) -> i32;
}

impl<F> Evaluator for F
where
    F: Fn(&GameState) -> i32,
{
    fn evaluate(&self, state: &GameState) -> i32 {
        self(state)
    }
}

/// Stone count difference from the mover's point of view. Captures show up
/// as a swing in this number.
pub fn capture_diff(state: &GameState) -> i32 {
    let board = state.board();
    let black = board.num_stones(Player::Black) as i32;
    let white = board.num_stones(Player::White) as i32;
    match state.next_player() {
        Player::Black => black - white,
        Player::White => white - black,
    }
}

/// Terminal value of a finished game for the player to move.
pub(crate) fn terminal_score(state: &GameState) -> Score {
    match state.winner() {
        Some(winner) if winner == state.next_player() => Score::Win,
        Some(_) => Score::Loss,
        None => Score::Draw,
    }
}
