//! Immutable game states linked into a history chain.
//!
//! Applying a move never mutates a state: it builds a new one whose
//! `previous` link shares the old state through `Rc`. Superko is enforced by
//! walking that chain.

use std::rc::Rc;

use crate::board::{Board, handicap_points};
use crate::error::{GoError, Result};
use crate::scoring::{AreaScoring, Referee};
use crate::types::{Move, Player, Point};

/// A snapshot of a game: the board, whose turn it is, and how we got here.
#[derive(Debug)]
pub struct GameState {
    board: Board,
    next_player: Player,
    previous: Option<Rc<GameState>>,
    last_move: Option<Move>,
    move_number: usize,
    referee: Rc<dyn Referee>,
}

impl GameState {
    /// A fresh game on an empty board, scored by [`AreaScoring::for_board`].
    pub fn new_game(size: u8) -> Rc<Self> {
        Self::new_game_with_referee(size, Rc::new(AreaScoring::for_board(size)))
    }

    /// A fresh game on an empty board with a custom referee.
    pub fn new_game_with_referee(size: u8, referee: Rc<dyn Referee>) -> Rc<Self> {
        Rc::new(Self {
            board: Board::new(size),
            next_player: Player::Black,
            previous: None,
            last_move: None,
            move_number: 0,
            referee,
        })
    }

    /// A handicap game: Black's stones sit on the star points and White moves
    /// first. Returns `None` when the board does not support `stones`.
    pub fn with_handicap(size: u8, stones: u8, referee: Rc<dyn Referee>) -> Option<Rc<Self>> {
        let mut board = Board::new(size);
        for pt in handicap_points(size, stones)? {
            board = board.place_stone(Player::Black, pt).ok()?;
        }
        Some(Rc::new(Self {
            board,
            next_player: Player::White,
            previous: None,
            last_move: None,
            move_number: 0,
            referee,
        }))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn next_player(&self) -> Player {
        self.next_player
    }

    pub fn previous_state(&self) -> Option<&Rc<GameState>> {
        self.previous.as_ref()
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Number of moves applied since the root state.
    pub fn move_number(&self) -> usize {
        self.move_number
    }

    pub fn referee(&self) -> &Rc<dyn Referee> {
        &self.referee
    }

    /// This state followed by each of its ancestors, newest first.
    pub fn history(&self) -> impl Iterator<Item = &GameState> {
        std::iter::successors(Some(self), |s| s.previous.as_deref())
    }

    pub fn is_over(&self) -> bool {
        self.referee.is_over(self)
    }

    pub fn winner(&self) -> Option<Player> {
        self.referee.winner(self)
    }

    /// Board after the current player plays at `pt`, checked for superko.
    fn play_at(&self, pt: Point) -> Result<Board> {
        let board = self.board.place_stone(self.next_player, pt)?;
        if self.repeats(&board, self.next_player.other()) {
            return Err(GoError::PositionRepeated(pt));
        }
        Ok(board)
    }

    /// Whether (`board`, `to_move`) already occurred in this game.
    fn repeats(&self, board: &Board, to_move: Player) -> bool {
        let hash = board.zobrist_hash();
        self.history().any(|s| {
            s.next_player == to_move && s.board.zobrist_hash() == hash && s.board == *board
        })
    }

    /// Whether playing `mv` would recreate an earlier position.
    pub fn does_move_violate_ko(&self, mv: Move) -> bool {
        match mv {
            Move::Play(pt) => matches!(self.play_at(pt), Err(GoError::PositionRepeated(_))),
            _ => false,
        }
    }

    pub fn is_valid_move(&self, mv: Move) -> bool {
        if self.is_over() {
            return false;
        }
        match mv {
            Move::Pass | Move::Resign => true,
            Move::Play(pt) => self.play_at(pt).is_ok(),
        }
    }

    /// Apply `mv`, producing the next state.
    pub fn apply_move(self: &Rc<Self>, mv: Move) -> Result<Rc<GameState>> {
        if self.is_over() {
            return Err(GoError::MoveOnTerminalGame);
        }
        let board = match mv {
            Move::Play(pt) => self.play_at(pt)?,
            Move::Pass | Move::Resign => self.board.clone(),
        };
        Ok(Rc::new(GameState {
            board,
            next_player: self.next_player.other(),
            previous: Some(Rc::clone(self)),
            last_move: Some(mv),
            move_number: self.move_number + 1,
            referee: Rc::clone(&self.referee),
        }))
    }

    /// Every valid play followed by [`Move::Pass`]. Resigning is never generated.
    pub fn legal_moves(&self) -> Result<Vec<Move>> {
        if self.is_over() {
            return Err(GoError::MoveOnTerminalGame);
        }
        let mut moves: Vec<Move> = self
            .board
            .points()
            .filter(|&pt| self.board.get(pt).is_none() && self.play_at(pt).is_ok())
            .map(Move::Play)
            .collect();
        moves.push(Move::Pass);
        Ok(moves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(state: &Rc<GameState>, mv: &str) -> Rc<GameState> {
        state.apply_move(mv.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_new_game() {
        let state = GameState::new_game(5);
        assert_eq!(state.next_player(), Player::Black);
        assert!(state.previous_state().is_none());
        assert_eq!(state.last_move(), None);
        assert_eq!(state.legal_moves().unwrap().len(), 26);
    }

    #[test]
    fn test_apply_move_links_history() {
        let root = GameState::new_game(5);
        let next = play(&root, "C3");
        assert_eq!(next.next_player(), Player::White);
        assert_eq!(next.last_move(), Some(Move::play(3, 3)));
        assert!(Rc::ptr_eq(next.previous_state().unwrap(), &root));
        assert_eq!(next.move_number(), 1);
        assert_eq!(next.history().count(), 2);
        // the root is untouched
        assert_eq!(root.board().get(Point::new(3, 3)), None);
    }

    #[test]
    fn test_pass_keeps_board() {
        let root = GameState::new_game(5);
        let state = play(&play(&root, "C3"), "pass");
        assert_eq!(state.next_player(), Player::Black);
        assert_eq!(state.board(), state.previous_state().unwrap().board());
    }

    #[test]
    fn test_legal_moves_skip_occupied() {
        let state = play(&GameState::new_game(5), "C3");
        let moves = state.legal_moves().unwrap();
        assert!(!moves.contains(&Move::play(3, 3)));
        assert!(!moves.contains(&Move::Resign));
        assert_eq!(moves.last(), Some(&Move::Pass));
        assert!(!state.is_valid_move(Move::play(3, 3)));
        assert!(state.is_valid_move(Move::Resign));
    }

    #[test]
    fn test_terminal_state_rejects_moves() {
        let state = play(&play(&GameState::new_game(5), "pass"), "pass");
        assert_eq!(state.legal_moves().unwrap_err(), GoError::MoveOnTerminalGame);
        assert_eq!(
            state.apply_move(Move::Pass).unwrap_err(),
            GoError::MoveOnTerminalGame
        );
        assert!(!state.is_valid_move(Move::Pass));
    }

    #[test]
    fn test_handicap_game() {
        let state = GameState::with_handicap(9, 4, Rc::new(AreaScoring::new(0.5))).unwrap();
        assert_eq!(state.next_player(), Player::White);
        assert_eq!(state.board().num_stones(Player::Black), 4);
        assert_eq!(state.board().get(Point::new(3, 3)), Some(Player::Black));
        assert!(GameState::with_handicap(5, 2, Rc::new(AreaScoring::default())).is_none());
    }
}
