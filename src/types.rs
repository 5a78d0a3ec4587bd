//! Value types shared by the engine and the agents: points, players, moves.
//!
//! Coordinates follow the usual Go convention: a column letter (skipping `I`)
//! followed by a 1-based row number, e.g. `"D4"`.

use std::fmt;
use std::str::FromStr;

use crate::constants::COLS;

/// A stone color, which doubles as the player to move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// The opposing color.
    #[inline]
    pub fn other(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => write!(f, "black"),
            Player::White => write!(f, "white"),
        }
    }
}

/// A board coordinate. Both `row` and `col` are 1-based.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: u8,
    pub col: u8,
}

impl Point {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// The four orthogonal neighbours. Points off the low edge are omitted;
    /// points past the high edge are left for the board to filter.
    pub fn neighbours(self) -> impl Iterator<Item = Point> {
        let Point { row, col } = self;
        [
            (row.checked_sub(1), Some(col)),
            (row.checked_add(1), Some(col)),
            (Some(row), col.checked_sub(1)),
            (Some(row), col.checked_add(1)),
        ]
        .into_iter()
        .filter_map(|(r, c)| match (r, c) {
            (Some(r), Some(c)) if r > 0 && c > 0 => Some(Point::new(r, c)),
            _ => None,
        })
    }

    /// The four diagonal neighbours, filtered the same way as [`Point::neighbours`].
    pub fn corners(self) -> impl Iterator<Item = Point> {
        let Point { row, col } = self;
        [
            (row.checked_sub(1), col.checked_sub(1)),
            (row.checked_sub(1), col.checked_add(1)),
            (row.checked_add(1), col.checked_sub(1)),
            (row.checked_add(1), col.checked_add(1)),
        ]
        .into_iter()
        .filter_map(|(r, c)| match (r, c) {
            (Some(r), Some(c)) if r > 0 && c > 0 => Some(Point::new(r, c)),
            _ => None,
        })
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = (self.col as usize)
            .checked_sub(1)
            .and_then(|i| COLS.chars().nth(i));
        match letter {
            Some(letter) => write!(f, "{letter}{}", self.row),
            _ => write!(f, "({},{})", self.row, self.col),
        }
    }
}

/// Error returned when a coordinate string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {0:?}")]
pub struct ParseCoordError(pub String);

impl FromStr for Point {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars
            .next()
            .map(|c| c.to_ascii_uppercase())
            .ok_or_else(|| ParseCoordError(s.to_string()))?;
        let col = COLS
            .find(letter)
            .ok_or_else(|| ParseCoordError(s.to_string()))?;
        let row: u8 = chars
            .as_str()
            .parse()
            .map_err(|_| ParseCoordError(s.to_string()))?;
        if row == 0 {
            return Err(ParseCoordError(s.to_string()));
        }
        Ok(Point::new(row, col as u8 + 1))
    }
}

/// A move: place a stone, pass, or resign.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Play(Point),
    Pass,
    Resign,
}

impl Move {
    pub fn play(row: u8, col: u8) -> Self {
        Move::Play(Point::new(row, col))
    }

    #[inline]
    pub fn is_play(&self) -> bool {
        matches!(self, Move::Play(_))
    }

    #[inline]
    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass)
    }

    #[inline]
    pub fn is_resign(&self) -> bool {
        matches!(self, Move::Resign)
    }

    /// The point played, if any.
    pub fn point(&self) -> Option<Point> {
        match self {
            Move::Play(pt) => Some(*pt),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Play(pt) => write!(f, "{pt}"),
            Move::Pass => write!(f, "pass"),
            Move::Resign => write!(f, "resign"),
        }
    }
}

impl FromStr for Move {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass" => Ok(Move::Pass),
            "resign" => Ok(Move::Resign),
            _ => s.parse().map(Move::Play),
        }
    }
}
