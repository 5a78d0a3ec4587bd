//! goboard-agents: a rules-correct Go state engine and the search agents built on it.
//!
//! The engine tracks groups, liberties, captures and positional superko
//! exactly; every state is an immutable snapshot linked to its predecessor.
//! Four search agents consume it: exhaustive minimax, depth-limited negamax,
//! alpha-beta, and Monte Carlo Tree Search.
//!
//! ## Modules
//!
//! - [`constants`] - Engine defaults (board size, komi, search budgets)
//! - [`types`] - Points, players and moves
//! - [`board`] - Stone groups, liberties, captures
//! - [`game_state`] - Immutable game states and move legality
//! - [`scoring`] - End-of-game detection and area scoring
//! - [`eval`] - Search scores and heuristic evaluation
//! - [`agent`] - The `Agent` trait and a random bot
//! - [`playout`] - Random game simulation
//! - [`minimax`], [`depth_prune`], [`alpha_beta`], [`mcts`] - Search agents
//!
//! ## Example
//!
//! ```
//! use goboard_agents::agent::Agent;
//! use goboard_agents::game_state::GameState;
//! use goboard_agents::mcts::MctsAgent;
//! use goboard_agents::types::Move;
//!
//! // Create a new game and play a move
//! let game = GameState::new_game(5);
//! let game = game.apply_move("C3".parse::<Move>()?)?;
//!
//! // Let MCTS find White's reply
//! let mut agent = MctsAgent::new(50, 1.41, 7);
//! let reply = agent.select_move(&game)?;
//! assert!(game.is_valid_move(reply));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod agent;
pub mod alpha_beta;
pub mod board;
pub mod constants;
pub mod depth_prune;
pub mod error;
pub mod eval;
pub mod game_state;
pub mod mcts;
pub mod minimax;
pub mod playout;
pub mod scoring;
pub mod types;

pub use error::{GoError, Result};
