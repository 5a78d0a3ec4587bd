//! Random playouts (game simulation).
//!
//! A playout plays random valid moves for both sides until the referee
//! declares the game over, then reports the winner. Moves that would fill
//! the mover's own eye are skipped so playouts end in settled positions.

use std::rc::Rc;

use fastrand::Rng;
use tracing::trace;

use crate::error::{GoError, Result};
use crate::game_state::GameState;
use crate::types::{Move, Player, Point};

/// Choose a random valid move that is not one of the mover's own eyes.
///
/// Candidates are shuffled and tried in order, so every valid candidate is
/// equally likely. Passes when no candidate is valid.
pub fn random_move(state: &GameState, rng: &mut Rng) -> Result<Move> {
    if state.is_over() {
        return Err(GoError::MoveOnTerminalGame);
    }
    let board = state.board();
    let player = state.next_player();
    let mut candidates: Vec<Point> = board
        .points()
        .filter(|&pt| board.get(pt).is_none() && !board.is_eye(pt, player))
        .collect();
    rng.shuffle(&mut candidates);

    Ok(candidates
        .into_iter()
        .map(Move::Play)
        .find(|&mv| state.is_valid_move(mv))
        .unwrap_or(Move::Pass))
}

/// Play random moves from `state` to the end of the game and return the winner.
pub fn simulate_random_game(state: &Rc<GameState>, rng: &mut Rng) -> Result<Option<Player>> {
    let mut game = Rc::clone(state);
    while !game.is_over() {
        let mv = random_move(&game, rng)?;
        game = game.apply_move(mv)?;
    }
    trace!(
        moves = game.move_number() - state.move_number(),
        "playout finished"
    );
    Ok(game.winner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::AreaScoring;

    #[test]
    fn test_random_move_is_legal() {
        let mut rng = Rng::with_seed(3);
        let mut state = GameState::new_game(5);
        for _ in 0..20 {
            if state.is_over() {
                break;
            }
            let mv = random_move(&state, &mut rng).unwrap();
            assert!(state.is_valid_move(mv), "{mv} should be valid");
            state = state.apply_move(mv).unwrap();
        }
    }

    #[test]
    fn test_random_move_never_fills_own_eye() {
        // Black owns the whole 2x2 board except its eye at A1.
        let referee = std::rc::Rc::new(AreaScoring::new(0.5));
        let state = GameState::new_game_with_referee(2, referee);
        let state = state.apply_move(Move::play(1, 2)).unwrap();
        let state = state.apply_move(Move::Pass).unwrap();
        let state = state.apply_move(Move::play(2, 1)).unwrap();
        let state = state.apply_move(Move::Pass).unwrap();
        let state = state.apply_move(Move::play(2, 2)).unwrap();
        let state = state.apply_move(Move::Pass).unwrap();

        let mut rng = Rng::with_seed(1);
        assert_eq!(random_move(&state, &mut rng).unwrap(), Move::Pass);
    }

    #[test]
    fn test_playout_reaches_terminal_state() {
        let mut rng = Rng::with_seed(11);
        let state = GameState::new_game(5);
        let first = simulate_random_game(&state, &mut rng).unwrap();

        let mut rng = Rng::with_seed(11);
        let again = simulate_random_game(&state, &mut rng).unwrap();
        assert_eq!(first, again, "playouts are reproducible for a fixed seed");
    }

    #[test]
    fn test_playout_on_finished_game() {
        let mut rng = Rng::with_seed(0);
        let state = GameState::new_game(5);
        let state = state.apply_move(Move::Resign).unwrap();
        assert_eq!(
            simulate_random_game(&state, &mut rng).unwrap(),
            Some(Player::White)
        );
        assert_eq!(
            random_move(&state, &mut rng).unwrap_err(),
            GoError::MoveOnTerminalGame
        );
    }
}
