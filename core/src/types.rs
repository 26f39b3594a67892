use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Represents one of the two players.
/// Light starts on rows 0-2 and moves up the board; Dark starts on rows 5-7.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Side {
    Light,
    Dark,
}

impl Side {
    /// Returns the opposite side.
    pub const fn opponent(self) -> Self {
        match self {
            Side::Light => Side::Dark,
            Side::Dark => Side::Light,
        }
    }

    /// Returns the row direction men of this side move in.
    pub const fn forward(self) -> i8 {
        match self {
            Side::Light => 1,
            Side::Dark => -1,
        }
    }

    /// Returns the row on which men of this side are crowned.
    pub const fn promotion_row(self) -> u8 {
        match self {
            Side::Light => 7,
            Side::Dark => 0,
        }
    }

    /// Light maximizes the evaluation, Dark minimizes it.
    pub const fn is_maximizer(self) -> bool {
        matches!(self, Side::Light)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Side::Light => "Light",
            Side::Dark => "Dark",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A checker, either a man or a king.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Piece {
    pub owner: Side,
    pub is_king: bool,
}

impl Piece {
    /// Creates an uncrowned piece.
    pub const fn man(owner: Side) -> Self {
        Self {
            owner,
            is_king: false,
        }
    }

    /// Creates a king.
    pub const fn king(owner: Side) -> Self {
        Self {
            owner,
            is_king: true,
        }
    }

    /// Returns true if this piece may move with the given row delta.
    /// Men only move toward the opponent's back row; kings move both ways.
    pub const fn can_move_toward(self, row_delta: i8) -> bool {
        if self.is_king {
            return true;
        }
        match self.owner {
            Side::Light => row_delta > 0,
            Side::Dark => row_delta < 0,
        }
    }

    /// Returns the FEN-style character for this piece.
    pub const fn to_char(self) -> char {
        match (self.owner, self.is_king) {
            (Side::Light, false) => 'l',
            (Side::Light, true) => 'L',
            (Side::Dark, false) => 'd',
            (Side::Dark, true) => 'D',
        }
    }

    /// Parses a FEN-style piece character.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'l' => Some(Piece::man(Side::Light)),
            'L' => Some(Piece::king(Side::Light)),
            'd' => Some(Piece::man(Side::Dark)),
            'D' => Some(Piece::king(Side::Dark)),
            _ => None,
        }
    }
}

/// A square on the 8x8 board.
/// Stored as `row * 8 + col`, so a value always lies on the board.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square(u8);

impl Square {
    pub const A1: Square = Square(0);

    /// Creates a square from column and row (0-7 each).
    /// Returns None if either coordinate is off the board.
    pub const fn new(col: u8, row: u8) -> Option<Self> {
        if col < 8 && row < 8 {
            Some(Square(row * 8 + col))
        } else {
            None
        }
    }

    /// Creates a square from signed coordinates, as produced by offsets.
    pub const fn from_coords(col: i8, row: i8) -> Option<Self> {
        if col >= 0 && col < 8 && row >= 0 && row < 8 {
            Some(Square(row as u8 * 8 + col as u8))
        } else {
            None
        }
    }

    /// Creates a square from index (0-63).
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    pub const fn col(self) -> u8 {
        self.0 % 8
    }

    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    /// Returns the square index (0-63).
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the square displaced by the given deltas, if it is on the board.
    pub const fn offset(self, dc: i8, dr: i8) -> Option<Self> {
        Self::from_coords(self.col() as i8 + dc, self.row() as i8 + dr)
    }

    /// Dark squares, the only ones pieces ever stand on.
    pub const fn is_playable(self) -> bool {
        (self.col() + self.row()) % 2 == 1
    }

    /// Returns true if the square lies on any border of the board.
    pub const fn is_edge(self) -> bool {
        self.col() == 0 || self.col() == 7 || self.row() == 0 || self.row() == 7
    }

    /// All squares in column-major order: a1, a2, .. a8, b1, ..
    /// This is the scan order move enumeration follows.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|col| (0..8u8).map(move |row| Square(row * 8 + col)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col()) as char, (b'1' + self.row()) as char)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid square: {0:?}")]
pub struct SquareParseError(pub String);

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(SquareParseError(s.to_string()));
        }
        let col = bytes[0].to_ascii_lowercase().wrapping_sub(b'a');
        let row = bytes[1].wrapping_sub(b'1');
        Square::new(col, row).ok_or_else(|| SquareParseError(s.to_string()))
    }
}

/// A single step of a piece: either a one-square diagonal slide or a
/// two-square diagonal jump over the midpoint.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Column and row deltas of the move.
    pub const fn delta(self) -> (i8, i8) {
        (
            self.to.col() as i8 - self.from.col() as i8,
            self.to.row() as i8 - self.from.row() as i8,
        )
    }

    pub const fn is_simple(self) -> bool {
        let (dc, dr) = self.delta();
        dc.abs() == 1 && dr.abs() == 1
    }

    pub const fn is_jump(self) -> bool {
        let (dc, dr) = self.delta();
        dc.abs() == 2 && dr.abs() == 2
    }

    /// The square jumped over, for jump moves.
    pub const fn captured_square(self) -> Option<Square> {
        if !self.is_jump() {
            return None;
        }
        Square::new(
            (self.from.col() + self.to.col()) / 2,
            (self.from.row() + self.to.row()) / 2,
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_jump() { 'x' } else { '-' };
        write!(f, "{}{}{}", self.from, sep, self.to)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid move text: {0:?} (expected e.g. c3d4, c3-d4 or c3xe5)")]
pub struct MoveParseError(pub String);

impl FromStr for Move {
    type Err = MoveParseError;

    /// Accepts `c3d4`, `c3-d4` and `c3xe5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || MoveParseError(s.to_string());
        let compact: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | 'x' | 'X'))
            .collect();
        if compact.len() != 4 || !compact.is_ascii() {
            return Err(err());
        }
        let from = compact[..2].parse::<Square>().map_err(|_| err())?;
        let to = compact[2..].parse::<Square>().map_err(|_| err())?;
        Ok(Move::new(from, to))
    }
}

/// The jumps made so far in the current multi-capture turn.
pub type MoveChain = Vec<Move>;

/// Result of the game, derived from a position and the side to move.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum GameOutcome {
    Continuing,
    LightWins,
    DarkWins,
}

impl GameOutcome {
    /// The outcome in which `side` wins.
    pub const fn win_for(side: Side) -> Self {
        match side {
            Side::Light => GameOutcome::LightWins,
            Side::Dark => GameOutcome::DarkWins,
        }
    }

    pub const fn winner(self) -> Option<Side> {
        match self {
            GameOutcome::Continuing => None,
            GameOutcome::LightWins => Some(Side::Light),
            GameOutcome::DarkWins => Some(Side::Dark),
        }
    }

    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameOutcome::Continuing)
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Continuing => f.write_str("game in progress"),
            GameOutcome::LightWins => f.write_str("Light wins"),
            GameOutcome::DarkWins => f.write_str("Dark wins"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(col: u8, row: u8) -> Square {
        Square::new(col, row).unwrap()
    }

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::Light.opponent(), Side::Dark);
        assert_eq!(Side::Dark.opponent(), Side::Light);
    }

    #[test]
    fn test_square_creation() {
        let c3 = sq(2, 2);
        assert_eq!(c3.index(), 18);
        assert_eq!(format!("{}", c3), "c3");
        assert!(Square::new(8, 0).is_none());
        assert!(Square::from_coords(-1, 3).is_none());
        assert_eq!("h8".parse::<Square>(), Ok(sq(7, 7)));
        assert!("i1".parse::<Square>().is_err());
    }

    #[test]
    fn test_playable_squares() {
        assert!(sq(1, 0).is_playable());
        assert!(!sq(0, 0).is_playable());
        assert_eq!(Square::all().filter(|s| s.is_playable()).count(), 32);
    }

    #[test]
    fn test_column_major_order() {
        let order: Vec<Square> = Square::all().take(9).collect();
        assert_eq!(order[0], sq(0, 0));
        assert_eq!(order[1], sq(0, 1));
        assert_eq!(order[8], sq(1, 0));
    }

    #[test]
    fn test_move_classification() {
        let simple = Move::new(sq(2, 2), sq(3, 3));
        let jump = Move::new(sq(2, 2), sq(4, 4));
        assert!(simple.is_simple() && !simple.is_jump());
        assert!(jump.is_jump() && !jump.is_simple());
        assert_eq!(jump.captured_square(), Some(sq(3, 3)));
        assert_eq!(simple.captured_square(), None);
        assert_eq!(jump.to_string(), "c3xe5");
    }

    #[test]
    fn test_move_parsing() {
        let expected = Move::new(sq(2, 2), sq(3, 3));
        assert_eq!("c3d4".parse::<Move>(), Ok(expected));
        assert_eq!("c3-d4".parse::<Move>(), Ok(expected));
        assert_eq!("c3xe5".parse::<Move>(), Ok(Move::new(sq(2, 2), sq(4, 4))));
        assert!("c3".parse::<Move>().is_err());
    }
}
