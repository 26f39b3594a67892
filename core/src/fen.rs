use crate::board::Position;
use crate::game::BoardState;
use crate::types::{Piece, Side, Square};
use thiserror::Error;

/// FEN-style position notation.
///
/// Eight `/`-separated rows from row 8 down to row 1, `l`/`L` for a light
/// man/king, `d`/`D` for a dark man/king, digits for runs of empty squares,
/// then the side to move (`l` or `d`):
///
/// `d1d1d1d1/1d1d1d1d/d1d1d1d1/8/8/1l1l1l1l/l1l1l1l1/1l1l1l1l l`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("Invalid FEN format: {0}")]
    InvalidFormat(String),
    #[error("Invalid piece character: '{0}'")]
    InvalidPiece(char),
    #[error("Piece on unplayable square {0}")]
    UnplayableSquare(Square),
    #[error("Uncrowned man on its promotion row at {0}")]
    UncrownedMan(Square),
    #[error("Invalid side to move: {0}")]
    InvalidSide(String),
}

/// Parses a FEN string into a position and the side to move.
pub fn parse_fen(fen: &str) -> Result<(Position, Side), FenError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FenError::InvalidFormat(format!(
            "Expected 2 fields, got {}",
            parts.len()
        )));
    }

    let position = parse_board(parts[0])?;

    let side = match parts[1] {
        "l" => Side::Light,
        "d" => Side::Dark,
        other => return Err(FenError::InvalidSide(other.to_string())),
    };

    Ok((position, side))
}

/// Converts a position and side to move to FEN notation.
pub fn to_fen(position: &Position, side: Side) -> String {
    let side = match side {
        Side::Light => 'l',
        Side::Dark => 'd',
    };
    format!("{} {}", board_to_fen(position), side)
}

impl BoardState {
    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let (position, side) = parse_fen(fen)?;
        Ok(BoardState::from_position(position, side))
    }

    /// Converts the board and side to move to FEN notation.
    /// A pending multi-jump is not part of the notation.
    pub fn to_fen(&self) -> String {
        to_fen(self.current_position(), self.side_to_move())
    }
}

/// Parses the board portion of a FEN string.
fn parse_board(board_str: &str) -> Result<Position, FenError> {
    let mut position = Position::empty();
    let rows: Vec<&str> = board_str.split('/').collect();

    if rows.len() != 8 {
        return Err(FenError::InvalidFormat(format!(
            "Expected 8 rows, got {}",
            rows.len()
        )));
    }

    for (idx, row_str) in rows.iter().enumerate() {
        // FEN starts from row 8 (index 7) down to row 1 (index 0)
        let row = 7 - idx as u8;
        let mut col = 0u8;

        for ch in row_str.chars() {
            if col >= 8 {
                return Err(FenError::InvalidFormat(format!(
                    "Too many squares in row {}",
                    row + 1
                )));
            }

            if let Some(empty_count) = ch.to_digit(10) {
                col += empty_count as u8;
                continue;
            }

            let piece = Piece::from_char(ch).ok_or(FenError::InvalidPiece(ch))?;
            let square = Square::new(col, row)
                .ok_or_else(|| FenError::InvalidFormat(format!("Square off board in row {}", row + 1)))?;
            if !square.is_playable() {
                return Err(FenError::UnplayableSquare(square));
            }
            if !piece.is_king && row == piece.owner.promotion_row() {
                return Err(FenError::UncrownedMan(square));
            }
            position.set_piece(square, Some(piece));
            col += 1;
        }

        if col != 8 {
            return Err(FenError::InvalidFormat(format!(
                "Row {} has {} squares, expected 8",
                row + 1,
                col
            )));
        }
    }

    Ok(position)
}

/// Converts a board to FEN notation.
fn board_to_fen(position: &Position) -> String {
    let mut fen = String::new();

    for row in (0..8).rev() {
        let mut empty_count = 0;

        for col in 0..8 {
            let piece = Square::new(col, row).and_then(|s| position.piece_at(s));
            match piece {
                Some(piece) => {
                    if empty_count > 0 {
                        fen.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    fen.push(piece.to_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            fen.push_str(&empty_count.to_string());
        }

        if row > 0 {
            fen.push('/');
        }
    }

    fen
}

/// Standard positions for testing.
pub mod positions {
    /// Starting position.
    pub const STARTING: &str = "d1d1d1d1/1d1d1d1d/d1d1d1d1/8/8/1l1l1l1l/l1l1l1l1/1l1l1l1l l";

    /// Light's man on b3 can take c4 and then e6 in one turn.
    pub const DOUBLE_JUMP: &str = "d7/8/4d3/8/2d5/1l6/8/8 l";

    /// Two light kings against one dark king.
    pub const KINGS_ENDGAME: &str = "8/8/8/3D4/8/8/2L5/1L6 d";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GameOutcome;

    #[test]
    fn test_parse_starting_position() {
        let (position, side) = parse_fen(positions::STARTING).unwrap();
        assert_eq!(side, Side::Light);
        assert_eq!(position, Position::starting_position());
    }

    #[test]
    fn test_round_trip() {
        for fen in [positions::STARTING, positions::DOUBLE_JUMP, positions::KINGS_ENDGAME] {
            let board = BoardState::from_fen(fen).unwrap();
            assert_eq!(board.to_fen(), fen);
        }
    }

    #[test]
    fn test_double_jump_position() {
        let mut board = BoardState::from_fen(positions::DOUBLE_JUMP).unwrap();
        let b3 = "b3".parse().unwrap();
        let d5 = "d5".parse().unwrap();
        let f7 = "f7".parse().unwrap();

        let turn = board.request_move(b3, d5).unwrap();
        assert_eq!(turn.must_continue_from, Some(d5));
        let turn = board.request_move(d5, f7).unwrap();
        assert!(turn.turn_complete());
        assert_eq!(turn.outcome, GameOutcome::Continuing);
        assert_eq!(board.current_position().count(Side::Dark), 1);
    }

    #[test]
    fn test_invalid_fen() {
        assert!(parse_fen("invalid").is_err());
        assert!(parse_fen("d1d1d1d1/1d1d1d1d/d1d1d1d1/8/8/1l1l1l1l/l1l1l1l1/1l1l1l1l").is_err());
        assert_eq!(
            parse_fen("8/8/8/8/8/8/8/8 x"),
            Err(FenError::InvalidSide("x".to_string()))
        );
        assert_eq!(parse_fen("8/8/8/8/8/8/8/7q l"), Err(FenError::InvalidPiece('q')));
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8/l7 l"),
            Err(FenError::UnplayableSquare(_))
        ));
        assert!(matches!(
            parse_fen("l7/8/8/8/8/8/8/8 l"),
            Err(FenError::UncrownedMan(_))
        ));
        assert!(parse_fen("9/8/8/8/8/8/8/8 l").is_err());
    }
}
