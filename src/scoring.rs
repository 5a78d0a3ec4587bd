//! End-of-game detection and area scoring.
//!
//! The engine asks a [`Referee`] whether a game is over and who won. Scoring
//! rules are pluggable; [`AreaScoring`] is the default and counts stones plus
//! empty regions bordered by a single color (Chinese rules), with komi.

use std::collections::BTreeSet;
use std::fmt;

use crate::board::Board;
use crate::constants::{DEFAULT_KOMI, GAME_LEN_FACTOR};
use crate::game_state::GameState;
use crate::types::{Move, Player, Point};

/// Decides when a game ends and who won it.
pub trait Referee: fmt::Debug {
    /// Whether `state` is terminal.
    fn is_over(&self, state: &GameState) -> bool;

    /// Winner of a terminal `state`. `None` is a draw.
    fn winner(&self, state: &GameState) -> Option<Player>;
}

/// Area scoring with komi, ending on resignation, two passes in a row, or
/// an optional move cap.
#[derive(Clone, Debug, PartialEq)]
pub struct AreaScoring {
    pub komi: f32,
    pub max_moves: Option<usize>,
}

impl Default for AreaScoring {
    fn default() -> Self {
        Self {
            komi: DEFAULT_KOMI,
            max_moves: None,
        }
    }
}

impl AreaScoring {
    pub fn new(komi: f32) -> Self {
        Self {
            komi,
            max_moves: None,
        }
    }

    /// Default komi with the game length capped for a `size` x `size` board.
    pub fn for_board(size: u8) -> Self {
        Self::default().with_max_moves(GAME_LEN_FACTOR * size as usize * size as usize)
    }

    pub fn with_max_moves(mut self, max_moves: usize) -> Self {
        self.max_moves = Some(max_moves);
        self
    }
}

impl Referee for AreaScoring {
    fn is_over(&self, state: &GameState) -> bool {
        if self.max_moves.is_some_and(|max| state.move_number() >= max) {
            return true;
        }
        ends_by_agreement(state)
    }

    fn winner(&self, state: &GameState) -> Option<Player> {
        if state.last_move() == Some(Move::Resign) {
            return Some(state.next_player());
        }
        GameResult::compute(state.board(), self.komi).winner()
    }
}

/// Whether the last move was a resignation or the second of two passes.
pub fn ends_by_agreement(state: &GameState) -> bool {
    match state.last_move() {
        Some(Move::Resign) => true,
        Some(Move::Pass) => state
            .previous_state()
            .is_some_and(|prev| prev.last_move() == Some(Move::Pass)),
        _ => false,
    }
}

/// Area count of a board.
#[derive(Clone, Debug, PartialEq)]
pub struct GameResult {
    pub black: usize,
    pub white: usize,
    pub komi: f32,
}

impl GameResult {
    /// Count stones and single-color territory on `board`.
    pub fn compute(board: &Board, komi: f32) -> Self {
        let mut black = board.num_stones(Player::Black);
        let mut white = board.num_stones(Player::White);

        let mut visited = BTreeSet::new();
        for pt in board.points() {
            if board.get(pt).is_some() || visited.contains(&pt) {
                continue;
            }
            let (region, borders) = empty_region(board, pt);
            visited.extend(region.iter().copied());
            match borders.as_slice() {
                [Player::Black] => black += region.len(),
                [Player::White] => white += region.len(),
                _ => {}
            }
        }

        Self { black, white, komi }
    }

    /// Black's score minus White's score including komi.
    pub fn margin(&self) -> f32 {
        self.black as f32 - (self.white as f32 + self.komi)
    }

    pub fn winner(&self) -> Option<Player> {
        let margin = self.margin();
        if margin > 0.0 {
            Some(Player::Black)
        } else if margin < 0.0 {
            Some(Player::White)
        } else {
            None
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let margin = self.margin();
        match self.winner() {
            Some(Player::Black) => write!(f, "B+{margin:.1}"),
            Some(Player::White) => write!(f, "W+{:.1}", -margin),
            None => write!(f, "draw"),
        }
    }
}

/// Flood-fill the empty region containing `start`, returning its points and
/// the distinct colors touching it.
fn empty_region(board: &Board, start: Point) -> (Vec<Point>, Vec<Player>) {
    let mut region = Vec::new();
    let mut borders = Vec::new();
    let mut seen = BTreeSet::from([start]);
    let mut stack = vec![start];
    while let Some(pt) = stack.pop() {
        region.push(pt);
        for n in board.neighbours(pt) {
            match board.get(n) {
                Some(color) => {
                    if !borders.contains(&color) {
                        borders.push(color);
                    }
                }
                None => {
                    if seen.insert(n) {
                        stack.push(n);
                    }
                }
            }
        }
    }
    (region, borders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn play(state: &Rc<GameState>, mv: &str) -> Rc<GameState> {
        state.apply_move(mv.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_area_count() {
        let board = [(Player::Black, "B1"), (Player::Black, "B2"), (Player::Black, "B3")]
            .iter()
            .fold(Board::new(3), |b, (p, s)| b.place_stone(*p, s.parse().unwrap()).unwrap());
        let result = GameResult::compute(&board, 0.5);
        assert_eq!(result.black, 9);
        assert_eq!(result.white, 0);
        assert_eq!(result.winner(), Some(Player::Black));
        assert_eq!(result.to_string(), "B+8.5");
    }

    #[test]
    fn test_shared_region_is_neutral() {
        let board = Board::new(3)
            .place_stone(Player::Black, "A1".parse().unwrap())
            .unwrap()
            .place_stone(Player::White, "C3".parse().unwrap())
            .unwrap();
        let result = GameResult::compute(&board, 0.0);
        assert_eq!((result.black, result.white), (1, 1));
        assert_eq!(result.winner(), None);
        assert_eq!(result.to_string(), "draw");
    }

    #[test]
    fn test_two_passes_end_the_game() {
        let state = GameState::new_game(5);
        let once = play(&state, "pass");
        assert!(!once.is_over());
        let twice = play(&once, "pass");
        assert!(twice.is_over());
        // empty board: White wins on komi
        assert_eq!(twice.winner(), Some(Player::White));
    }

    #[test]
    fn test_pass_play_pass_does_not_end() {
        let state = GameState::new_game(5);
        let state = play(&play(&play(&state, "pass"), "C3"), "pass");
        assert!(!state.is_over());
    }

    #[test]
    fn test_resignation() {
        let state = GameState::new_game(5);
        let state = play(&state, "C3");
        let resigned = play(&state, "resign");
        assert!(resigned.is_over());
        assert_eq!(resigned.winner(), Some(Player::Black));
    }

    #[test]
    fn test_move_cap() {
        let referee = Rc::new(AreaScoring::new(0.5).with_max_moves(2));
        let state = GameState::new_game_with_referee(5, referee);
        let state = play(&state, "C3");
        assert!(!state.is_over());
        let state = play(&state, "D3");
        assert!(state.is_over());
        assert_eq!(AreaScoring::for_board(9).max_moves, Some(243));
    }
}
