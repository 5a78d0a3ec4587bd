//! Engine defaults: board geometry, scoring, and search parameters.
//!
//! Everything here is a default only. Board size, komi and the search
//! budgets are runtime values passed to [`GameState`](crate::game_state::GameState),
//! [`AreaScoring`](crate::scoring::AreaScoring) and the agent constructors.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN).
pub const DEFAULT_BOARD_SIZE: u8 = 9;

/// Largest supported board. Column letters run out past 25 (no `I`).
pub const MAX_BOARD_SIZE: u8 = 25;

/// Column letters used in coordinates. `I` is skipped to avoid confusion with `J`.
pub const COLS: &str = "ABCDEFGHJKLMNOPQRSTUVWXYZ";

// =============================================================================
// Scoring
// =============================================================================

/// Default komi (compensation points for White).
pub const DEFAULT_KOMI: f32 = 7.5;

/// Games are cut off after `GAME_LEN_FACTOR * size * size` moves.
pub const GAME_LEN_FACTOR: usize = 3;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default number of MCTS rounds per move.
pub const MCTS_ROUNDS: usize = 200;

/// Default UCT exploration temperature (close to sqrt(2)).
pub const MCTS_TEMPERATURE: f64 = 1.41;

/// Default depth for the depth-limited searches.
pub const SEARCH_DEPTH: u32 = 2;

/// Default seed for agents built without an explicit RNG.
pub const DEFAULT_SEED: u64 = 42;
