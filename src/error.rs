use thiserror::Error;

use crate::types::Point;

/// Errors raised by the engine and the search agents.
///
/// None of these are retried. `legal_moves()` never yields a move that would
/// trigger the placement errors, so seeing one means a caller bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GoError {
    /// Point lies outside the board
    #[error("illegal move: {0} is off the board")]
    OffBoard(Point),
    /// Point already holds a stone
    #[error("illegal move: {0} is occupied")]
    OccupiedPoint(Point),
    /// Placement leaves its own group without liberties and captures nothing
    #[error("illegal move: {0} is self-capture")]
    SelfCapture(Point),
    /// Placement recreates an earlier whole-board position (superko)
    #[error("illegal move: {0} repeats a previous position")]
    PositionRepeated(Point),
    /// A move was applied to, or generated for, a finished game
    #[error("game is already over")]
    MoveOnTerminalGame,
    /// A win fraction was requested from a node with no rollouts
    #[error("win fraction requested before any rollout")]
    EmptyRolloutQuery,
}

pub type Result<T, E = GoError> = std::result::Result<T, E>;
