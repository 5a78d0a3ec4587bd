//! Board representation with incremental group and liberty tracking.
//!
//! Every occupied point maps to the [`Group`] it belongs to. Groups are
//! immutable and shared through `Rc`, so cloning a board copies pointers,
//! not stone sets. A placement always builds a fresh board; the receiver is
//! never touched.

use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use crate::constants::COLS;
use crate::error::{GoError, Result};
use crate::types::{Player, Point};

/// A maximal connected set of same-colored stones and its liberties.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    color: Player,
    stones: BTreeSet<Point>,
    liberties: BTreeSet<Point>,
}

impl Group {
    fn new(color: Player, stones: BTreeSet<Point>, liberties: BTreeSet<Point>) -> Self {
        Self {
            color,
            stones,
            liberties,
        }
    }

    pub fn color(&self) -> Player {
        self.color
    }

    pub fn stones(&self) -> &BTreeSet<Point> {
        &self.stones
    }

    pub fn liberties(&self) -> &BTreeSet<Point> {
        &self.liberties
    }

    #[inline]
    pub fn num_liberties(&self) -> usize {
        self.liberties.len()
    }

    fn without_liberty(&self, pt: Point) -> Group {
        let mut liberties = self.liberties.clone();
        liberties.remove(&pt);
        Group::new(self.color, self.stones.clone(), liberties)
    }

    fn with_liberty(&self, pt: Point) -> Group {
        let mut liberties = self.liberties.clone();
        liberties.insert(pt);
        Group::new(self.color, self.stones.clone(), liberties)
    }

    /// Union of both groups. Liberties covered by either group's stones are dropped.
    fn merged_with(&self, other: &Group) -> Group {
        debug_assert_eq!(self.color, other.color);
        let stones: BTreeSet<Point> = self.stones.union(&other.stones).copied().collect();
        let liberties = self
            .liberties
            .union(&other.liberties)
            .filter(|pt| !stones.contains(pt))
            .copied()
            .collect();
        Group::new(self.color, stones, liberties)
    }
}

/// Zobrist key for a stone, derived by mixing the point and color (splitmix64).
fn zobrist(pt: Point, color: Player) -> u64 {
    let color_bit = match color {
        Player::Black => 1u64,
        Player::White => 2u64,
    };
    let mut z = ((pt.row as u64) << 16 | (pt.col as u64) << 8 | color_bit)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// A square Go board.
#[derive(Clone, Debug)]
pub struct Board {
    size: u8,
    grid: Vec<Option<Rc<Group>>>,
    hash: u64,
}

impl Board {
    /// Create an empty `size` x `size` board.
    pub fn new(size: u8) -> Self {
        let cells = size as usize * size as usize;
        Self {
            size,
            grid: vec![None; cells],
            hash: 0,
        }
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    #[inline]
    pub fn is_on_grid(&self, pt: Point) -> bool {
        (1..=self.size).contains(&pt.row) && (1..=self.size).contains(&pt.col)
    }

    #[inline]
    fn idx(&self, pt: Point) -> usize {
        (pt.row as usize - 1) * self.size as usize + (pt.col as usize - 1)
    }

    /// All points of the board, row by row.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (1..=self.size).flat_map(move |row| (1..=self.size).map(move |col| Point::new(row, col)))
    }

    /// On-board orthogonal neighbours of `pt`.
    pub fn neighbours(&self, pt: Point) -> impl Iterator<Item = Point> + '_ {
        pt.neighbours().filter(|n| self.is_on_grid(*n))
    }

    /// Color of the stone at `pt`, or `None` if empty or off the board.
    pub fn get(&self, pt: Point) -> Option<Player> {
        self.group_at(pt).map(Group::color)
    }

    /// The group owning the stone at `pt`.
    pub fn group_at(&self, pt: Point) -> Option<&Group> {
        if !self.is_on_grid(pt) {
            return None;
        }
        self.grid[self.idx(pt)].as_deref()
    }

    /// Every distinct group on the board.
    pub fn groups(&self) -> Vec<&Group> {
        let mut seen: Vec<&Rc<Group>> = Vec::new();
        for group in self.grid.iter().flatten() {
            if !seen.iter().any(|g| Rc::ptr_eq(g, group)) {
                seen.push(group);
            }
        }
        seen.into_iter().map(|g| g.as_ref()).collect()
    }

    /// Zobrist hash of the stone layout. Equal boards always hash equal.
    pub fn zobrist_hash(&self) -> u64 {
        self.hash
    }

    pub fn num_stones(&self, color: Player) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|g| g.color == color)
            .count()
    }

    /// Place a stone for `player` at `pt`, returning the resulting board.
    ///
    /// Opposing groups left without liberties are captured before the
    /// placer's own liberties are checked, so a capturing move into a
    /// surrounded point is legal.
    pub fn place_stone(&self, player: Player, pt: Point) -> Result<Board> {
        if !self.is_on_grid(pt) {
            return Err(GoError::OffBoard(pt));
        }
        if self.grid[self.idx(pt)].is_some() {
            return Err(GoError::OccupiedPoint(pt));
        }

        let mut same: Vec<&Rc<Group>> = Vec::new();
        let mut opposing: Vec<&Rc<Group>> = Vec::new();
        let mut liberties = BTreeSet::new();
        for n in self.neighbours(pt) {
            match &self.grid[self.idx(n)] {
                None => {
                    liberties.insert(n);
                }
                Some(group) => {
                    let bucket = if group.color == player {
                        &mut same
                    } else {
                        &mut opposing
                    };
                    if !bucket.iter().any(|g| Rc::ptr_eq(g, group)) {
                        bucket.push(group);
                    }
                }
            }
        }

        let mut placed = Group::new(player, BTreeSet::from([pt]), liberties);
        for group in same {
            placed = placed.merged_with(group);
        }

        let mut next = self.clone();
        next.replace_group(Rc::new(placed));
        next.hash ^= zobrist(pt, player);

        for group in opposing {
            let reduced = group.without_liberty(pt);
            if reduced.num_liberties() == 0 {
                next.remove_group(&reduced);
            } else {
                next.replace_group(Rc::new(reduced));
            }
        }

        let own = next.grid[next.idx(pt)]
            .as_ref()
            .map_or(0, |g| g.num_liberties());
        if own == 0 {
            return Err(GoError::SelfCapture(pt));
        }
        Ok(next)
    }

    fn replace_group(&mut self, group: Rc<Group>) {
        for &stone in group.stones() {
            let i = self.idx(stone);
            self.grid[i] = Some(Rc::clone(&group));
        }
    }

    /// Lift a captured group, handing each vacated point back as a liberty
    /// to the surrounding groups.
    fn remove_group(&mut self, group: &Group) {
        for &stone in group.stones() {
            let mut freed: Vec<Rc<Group>> = Vec::new();
            for n in self.neighbours(stone) {
                if let Some(neighbour) = &self.grid[self.idx(n)] {
                    if neighbour.color != group.color
                        && !freed.iter().any(|g| Rc::ptr_eq(g, neighbour))
                    {
                        freed.push(Rc::clone(neighbour));
                    }
                }
            }
            for neighbour in freed {
                self.replace_group(Rc::new(neighbour.with_liberty(stone)));
            }
            let i = self.idx(stone);
            self.grid[i] = None;
            self.hash ^= zobrist(stone, group.color);
        }
    }

    /// Whether `pt` is an eye for `player`: every neighbour is a friendly
    /// stone, and the diagonals are mostly friendly too (all of them on the
    /// edge, three of four in the middle).
    pub fn is_eye(&self, pt: Point, player: Player) -> bool {
        if !self.is_on_grid(pt) || self.get(pt).is_some() {
            return false;
        }
        if self.neighbours(pt).any(|n| self.get(n) != Some(player)) {
            return false;
        }
        let mut friendly = 0;
        let mut off_board = 0;
        for corner in pt.corners().chain(self.overflow_corners(pt)) {
            if !self.is_on_grid(corner) {
                off_board += 1;
            } else if self.get(corner) == Some(player) {
                friendly += 1;
            }
        }
        if off_board > 0 {
            friendly + off_board == 4
        } else {
            friendly >= 3
        }
    }

    /// Phantom corners past the low edge, which `Point::corners` omits.
    fn overflow_corners(&self, pt: Point) -> impl Iterator<Item = Point> {
        let missing = 4 - pt.corners().count();
        std::iter::repeat_n(Point::new(0, 0), missing)
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self.hash == other.hash
            && self
                .grid
                .iter()
                .zip(&other.grid)
                .all(|(a, b)| a.as_ref().map(|g| g.color) == b.as_ref().map(|g| g.color))
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (1..=self.size).rev() {
            write!(f, "{row:>2} ")?;
            for col in 1..=self.size {
                let ch = match self.get(Point::new(row, col)) {
                    Some(Player::Black) => 'X',
                    Some(Player::White) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        let letters: Vec<String> = COLS
            .chars()
            .take(self.size as usize)
            .map(String::from)
            .collect();
        writeln!(f, "   {}", letters.join(" "))
    }
}

/// Star points for `count` handicap stones on an odd square board of at least 7x7.
///
/// Returns `None` if the board is unsupported or the count is out of range
/// (2..=5 below 13x13, 2..=9 from 13x13 up).
pub fn handicap_points(size: u8, count: u8) -> Option<Vec<Point>> {
    let max = match size {
        s if s < 7 || s % 2 == 0 => 0,
        s if s >= 13 => 9,
        _ => 5,
    };
    if count < 2 || count > max {
        return None;
    }

    let low = if size >= 13 { 4 } else { 3 };
    let high = size + 1 - low;
    let mid = size / 2 + 1;

    let tl = Point::new(high, low);
    let tr = Point::new(high, high);
    let bl = Point::new(low, low);
    let br = Point::new(low, high);
    let cc = Point::new(mid, mid);
    let ml = Point::new(mid, low);
    let mr = Point::new(mid, high);
    let tc = Point::new(high, mid);
    let bc = Point::new(low, mid);

    let pts = match count {
        2 => vec![tr, bl],
        3 => vec![tr, bl, br],
        4 => vec![tl, tr, bl, br],
        5 => vec![tl, tr, bl, br, cc],
        6 => vec![tl, tr, ml, mr, bl, br],
        7 => vec![tl, tr, ml, mr, bl, br, cc],
        8 => vec![tl, tr, ml, mr, bl, br, tc, bc],
        _ => vec![tl, tr, ml, mr, bl, br, tc, bc, cc],
    };
    Some(pts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(s: &str) -> Point {
        s.parse().unwrap()
    }

    fn setup(size: u8, stones: &[(Player, &str)]) -> Board {
        stones.iter().fold(Board::new(size), |board, (p, s)| {
            board.place_stone(*p, pt(s)).unwrap()
        })
    }

    #[test]
    fn test_single_stone_liberties() {
        let board = setup(9, &[(Player::Black, "E5")]);
        assert_eq!(board.get(pt("E5")), Some(Player::Black));
        assert_eq!(board.group_at(pt("E5")).unwrap().num_liberties(), 4);

        let corner = setup(9, &[(Player::White, "A1")]);
        assert_eq!(corner.group_at(pt("A1")).unwrap().num_liberties(), 2);
    }

    #[test]
    fn test_place_leaves_receiver_untouched() {
        let board = Board::new(5);
        let next = board.place_stone(Player::Black, pt("C3")).unwrap();
        assert_eq!(board.get(pt("C3")), None);
        assert_eq!(next.get(pt("C3")), Some(Player::Black));
    }

    #[test]
    fn test_occupied_and_off_board() {
        let board = setup(5, &[(Player::Black, "C3")]);
        assert_eq!(
            board.place_stone(Player::White, pt("C3")).unwrap_err(),
            GoError::OccupiedPoint(pt("C3"))
        );
        assert_eq!(
            board.place_stone(Player::White, Point::new(6, 1)).unwrap_err(),
            GoError::OffBoard(Point::new(6, 1))
        );
    }

    #[test]
    fn test_merge_groups() {
        let board = setup(
            9,
            &[(Player::Black, "C3"), (Player::Black, "E3"), (Player::Black, "D3")],
        );
        let group = board.group_at(pt("C3")).unwrap();
        assert_eq!(group.stones().len(), 3);
        assert_eq!(group, board.group_at(pt("E3")).unwrap());
        // C2 D2 E2 C4 D4 E4 B3 F3
        assert_eq!(group.num_liberties(), 8);
        assert_eq!(board.groups().len(), 1);
    }

    #[test]
    fn test_opponent_takes_liberty() {
        let board = setup(9, &[(Player::Black, "E5"), (Player::White, "E6")]);
        assert_eq!(board.group_at(pt("E5")).unwrap().num_liberties(), 3);
        assert_eq!(board.group_at(pt("E6")).unwrap().num_liberties(), 3);
    }

    #[test]
    fn test_capture_restores_liberties() {
        let board = setup(
            5,
            &[
                (Player::White, "A1"),
                (Player::Black, "A2"),
                (Player::Black, "B1"),
            ],
        );
        assert_eq!(board.get(pt("A1")), None);
        assert!(board.group_at(pt("A2")).unwrap().liberties().contains(&pt("A1")));
        assert!(board.group_at(pt("B1")).unwrap().liberties().contains(&pt("A1")));
    }

    #[test]
    fn test_self_capture_rejected() {
        let board = setup(5, &[(Player::Black, "A2"), (Player::Black, "B1")]);
        assert_eq!(
            board.place_stone(Player::White, pt("A1")).unwrap_err(),
            GoError::SelfCapture(pt("A1"))
        );
    }

    #[test]
    fn test_capture_into_surrounded_point_is_legal() {
        // White B1 has its last liberty at A1, and A1 has no empty neighbours.
        let board = setup(
            5,
            &[
                (Player::Black, "C1"),
                (Player::Black, "B2"),
                (Player::White, "B1"),
                (Player::White, "A2"),
            ],
        );
        let next = board.place_stone(Player::Black, pt("A1")).unwrap();
        assert_eq!(next.get(pt("B1")), None);
        assert_eq!(next.get(pt("A2")), Some(Player::White));
        assert_eq!(next.group_at(pt("A2")).unwrap().num_liberties(), 1);
        assert!(next.group_at(pt("A1")).unwrap().liberties().contains(&pt("B1")));
    }

    #[test]
    fn test_hash_tracks_layout() {
        let a = setup(5, &[(Player::Black, "C3"), (Player::White, "D4")]);
        let b = setup(5, &[(Player::White, "D4"), (Player::Black, "C3")]);
        assert_eq!(a.zobrist_hash(), b.zobrist_hash());
        assert_eq!(a, b);

        let captured = setup(
            5,
            &[
                (Player::White, "A1"),
                (Player::Black, "A2"),
                (Player::Black, "B1"),
            ],
        );
        let plain = setup(5, &[(Player::Black, "A2"), (Player::Black, "B1")]);
        assert_eq!(captured, plain);
        assert_ne!(captured, Board::new(5));
    }

    #[test]
    fn test_is_eye() {
        let board = setup(
            5,
            &[(Player::Black, "A2"), (Player::Black, "B1"), (Player::Black, "B2")],
        );
        assert!(board.is_eye(pt("A1"), Player::Black));
        assert!(!board.is_eye(pt("A1"), Player::White));

        let false_eye = setup(
            5,
            &[(Player::Black, "A2"), (Player::Black, "B1"), (Player::White, "B2")],
        );
        assert!(!false_eye.is_eye(pt("A1"), Player::Black));
    }

    #[test]
    fn test_display() {
        let board = setup(3, &[(Player::Black, "A1"), (Player::White, "C3")]);
        let text = board.to_string();
        assert_eq!(text, " 3 . . O \n 2 . . . \n 1 X . . \n   A B C\n");
    }

    #[test]
    fn test_handicap_points() {
        assert!(handicap_points(5, 2).is_none());
        assert!(handicap_points(8, 2).is_none());
        assert!(handicap_points(9, 6).is_none());
        assert!(handicap_points(19, 1).is_none());
        assert_eq!(
            handicap_points(9, 2).unwrap(),
            vec![Point::new(7, 7), Point::new(3, 3)]
        );
        let nine = handicap_points(19, 9).unwrap();
        assert_eq!(nine.len(), 9);
        assert!(nine.contains(&Point::new(10, 10)));
        assert!(nine.contains(&Point::new(4, 16)));
    }
}
