//! Board representation: the occupancy of all 64 squares.
use crate::types::*;

/// A snapshot of every square's occupant.
/// Positions are cheap to copy, so search gives each node its own.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Position {
    /// 64 squares, indexed by Square::index()
    squares: [Option<Piece>; 64],
}

impl Position {
    /// Creates an empty board.
    pub const fn empty() -> Self {
        Self {
            squares: [None; 64],
        }
    }

    /// Creates the standard opening layout: twelve men per side on the
    /// dark squares of the three rows nearest each player.
    pub fn starting_position() -> Self {
        let mut position = Self::empty();

        for square in Square::all().filter(|s| s.is_playable()) {
            match square.row() {
                0..=2 => position.set_piece(square, Some(Piece::man(Side::Light))),
                5..=7 => position.set_piece(square, Some(Piece::man(Side::Dark))),
                _ => {}
            }
        }

        position
    }

    /// Gets the piece at the given square.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index() as usize]
    }

    /// Sets the piece at the given square.
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.index() as usize] = piece;
    }

    /// Moves a piece from one square to another, leaving `from` empty.
    /// Returns the piece that moved.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        let piece = self.squares[from.index() as usize].take();
        self.squares[to.index() as usize] = piece;
        piece
    }

    /// Returns true if the given square is empty.
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Returns true if the given square holds a piece of `side`.
    pub fn is_side(&self, square: Square, side: Side) -> bool {
        self.piece_at(square).is_some_and(|p| p.owner == side)
    }

    /// Returns true if the given square holds a piece of `side`'s opponent.
    pub fn is_enemy(&self, square: Square, side: Side) -> bool {
        self.is_side(square, side.opponent())
    }

    /// Iterates over all occupied squares in column-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |s| self.piece_at(s).map(|p| (s, p)))
    }

    /// Iterates over the squares holding pieces of `side`, column-major.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = Square> + '_ {
        self.occupied()
            .filter(move |(_, p)| p.owner == side)
            .map(|(s, _)| s)
    }

    /// Counts the pieces of `side`.
    pub fn count(&self, side: Side) -> usize {
        self.pieces(side).count()
    }

    /// Counts the kings of `side`.
    pub fn count_kings(&self, side: Side) -> usize {
        self.occupied()
            .filter(|(_, p)| p.owner == side && p.is_king)
            .count()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::starting_position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(col: u8, row: u8) -> Square {
        Square::new(col, row).unwrap()
    }

    #[test]
    fn test_starting_position() {
        let position = Position::starting_position();

        assert_eq!(position.piece_at(sq(1, 0)), Some(Piece::man(Side::Light)));
        assert_eq!(position.piece_at(sq(0, 5)), Some(Piece::man(Side::Dark)));
        assert!(position.piece_at(sq(0, 0)).is_none());
        assert!(position.piece_at(sq(3, 4)).is_none());

        assert_eq!(position.count(Side::Light), 12);
        assert_eq!(position.count(Side::Dark), 12);
        assert!(position.occupied().all(|(s, _)| s.is_playable()));
    }

    #[test]
    fn test_move_piece() {
        let mut position = Position::starting_position();
        let moved = position.move_piece(sq(1, 2), sq(0, 3));

        assert_eq!(moved, Some(Piece::man(Side::Light)));
        assert!(position.is_empty(sq(1, 2)));
        assert!(position.is_side(sq(0, 3), Side::Light));
        assert!(position.is_enemy(sq(0, 3), Side::Dark));
    }

    #[test]
    fn test_pieces_are_column_major() {
        let position = Position::starting_position();
        let first: Vec<Square> = position.pieces(Side::Light).take(3).collect();
        assert_eq!(first, vec![sq(0, 1), sq(1, 0), sq(1, 2)]);
    }
}
