//! The live game: the single authoritative board, whose turn it is, and
//! the multi-jump continuation rule that spans several requests.
use crate::board::Position;
use crate::rules::{self, MoveList};
use crate::types::*;
use log::{debug, info};
use thiserror::Error;

/// Where the live board is in its turn cycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    /// Any legal move by the side to move is accepted.
    Normal,
    /// The piece on this square just captured and must capture again.
    MustContinueJump(Square),
    /// The game has ended; no further moves are accepted.
    GameOver(GameOutcome),
}

/// Why a move request was refused.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IllegalReason {
    NoPiece,
    NotYourPiece,
    InvalidMove,
    CaptureRequired,
    MustContinueFrom(Square),
}

impl std::fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalReason::NoPiece => write!(f, "no piece on the source square"),
            IllegalReason::NotYourPiece => write!(f, "piece belongs to the opponent"),
            IllegalReason::InvalidMove => write!(f, "not a legal step for this piece"),
            IllegalReason::CaptureRequired => write!(f, "a capture is available and must be taken"),
            IllegalReason::MustContinueFrom(square) => {
                write!(f, "the piece on {square} must continue jumping")
            }
        }
    }
}

/// Errors returned by [`BoardState::request_move`]. The board is left
/// unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("illegal move {mv}: {reason}")]
    Illegal { mv: Move, reason: IllegalReason },
    #[error("game is over: {0}")]
    GameOver(GameOutcome),
}

/// Everything the caller needs after a committed move.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TurnOutcome {
    pub captured_square: Option<Square>,
    pub promoted: bool,
    /// Set when the same piece must jump again before the turn ends.
    pub must_continue_from: Option<Square>,
    pub outcome: GameOutcome,
}

impl TurnOutcome {
    pub fn turn_complete(&self) -> bool {
        self.must_continue_from.is_none()
    }
}

#[derive(Clone, Debug)]
pub struct BoardState {
    position: Position,
    to_move: Side,
    mode: Mode,
    chain: MoveChain,
    history: Vec<Move>,
}

impl BoardState {
    /// Creates a new game in the opening position, Light to move.
    pub fn new() -> Self {
        Self::from_position(Position::starting_position(), Side::Light)
    }

    /// Creates a game from an arbitrary position.
    /// The game is over immediately if the position is already decided.
    pub fn from_position(position: Position, to_move: Side) -> Self {
        let outcome = rules::outcome(&position, to_move);
        let mode = if outcome.is_terminal() {
            Mode::GameOver(outcome)
        } else {
            Mode::Normal
        };
        Self {
            position,
            to_move,
            mode,
            chain: MoveChain::new(),
            history: Vec::new(),
        }
    }

    pub fn current_position(&self) -> &Position {
        &self.position
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position.piece_at(square)
    }

    pub fn side_to_move(&self) -> Side {
        self.to_move
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn outcome(&self) -> GameOutcome {
        match self.mode {
            Mode::GameOver(outcome) => outcome,
            _ => GameOutcome::Continuing,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.mode, Mode::GameOver(_))
    }

    /// All moves committed so far, one entry per jump.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The jumps taken so far in the turn that is still in progress.
    pub fn current_chain(&self) -> &[Move] {
        &self.chain
    }

    /// The moves `request_move` would accept right now.
    pub fn legal_moves(&self) -> MoveList {
        match self.mode {
            Mode::Normal => rules::generate_legal_moves(&self.position, self.to_move),
            Mode::MustContinueJump(square) => rules::generate_jumps_from(&self.position, square),
            Mode::GameOver(_) => MoveList::new(),
        }
    }

    /// Validates and commits a move for the side to move.
    pub fn request_move(&mut self, from: Square, to: Square) -> Result<TurnOutcome, MoveError> {
        let mv = Move::new(from, to);
        self.check_move(mv)?;

        let mover = self.to_move;
        let effect = rules::apply_move(&self.position, mv);
        self.position = effect.position;
        self.history.push(mv);
        debug!("{mover} plays {mv}");

        let mut must_continue_from = None;
        if effect.was_capture() && rules::must_jump_from(&self.position, to) {
            self.chain.push(mv);
            self.mode = Mode::MustContinueJump(to);
            must_continue_from = Some(to);
            debug!("{mover} must continue jumping from {to}");
        } else {
            self.chain.clear();
            self.mode = Mode::Normal;
            self.to_move = mover.opponent();
        }

        let outcome = rules::outcome(&self.position, self.to_move);
        if outcome.is_terminal() {
            self.mode = Mode::GameOver(outcome);
            must_continue_from = None;
            info!("game over after {mv}: {outcome}");
        }

        Ok(TurnOutcome {
            captured_square: effect.captured,
            promoted: effect.promoted,
            must_continue_from,
            outcome,
        })
    }

    /// Convenience wrapper taking a whole move.
    pub fn apply(&mut self, mv: Move) -> Result<TurnOutcome, MoveError> {
        self.request_move(mv.from, mv.to)
    }

    fn check_move(&self, mv: Move) -> Result<(), MoveError> {
        let illegal = |reason| Err(MoveError::Illegal { mv, reason });

        if let Mode::GameOver(outcome) = self.mode {
            return Err(MoveError::GameOver(outcome));
        }

        let Some(piece) = self.position.piece_at(mv.from) else {
            return illegal(IllegalReason::NoPiece);
        };
        if piece.owner != self.to_move {
            return illegal(IllegalReason::NotYourPiece);
        }

        if let Mode::MustContinueJump(square) = self.mode {
            if mv.from != square || !mv.is_jump() {
                return illegal(IllegalReason::MustContinueFrom(square));
            }
        }

        if !rules::is_valid_move(&self.position, mv.from, mv.to) {
            return illegal(IllegalReason::InvalidMove);
        }

        if !mv.is_jump() && rules::any_jump_available(&self.position, self.to_move) {
            return illegal(IllegalReason::CaptureRequired);
        }

        Ok(())
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(col: u8, row: u8) -> Square {
        Square::new(col, row).unwrap()
    }

    fn board_with(pieces: &[(u8, u8, Piece)], to_move: Side) -> BoardState {
        let mut position = Position::empty();
        for &(col, row, piece) in pieces {
            position.set_piece(sq(col, row), Some(piece));
        }
        BoardState::from_position(position, to_move)
    }

    #[test]
    fn test_starting_state() {
        let board = BoardState::new();
        assert_eq!(board.side_to_move(), Side::Light);
        assert_eq!(board.mode(), Mode::Normal);
        assert_eq!(board.outcome(), GameOutcome::Continuing);
        assert_eq!(board.legal_moves().len(), 7);
    }

    #[test]
    fn test_simple_move_ends_turn() {
        let mut board = BoardState::new();
        let turn = board.request_move(sq(1, 2), sq(0, 3)).unwrap();

        assert!(turn.turn_complete());
        assert_eq!(turn.captured_square, None);
        assert_eq!(board.side_to_move(), Side::Dark);
        assert_eq!(board.piece_at(sq(0, 3)), Some(Piece::man(Side::Light)));
        assert_eq!(board.history(), &[Move::new(sq(1, 2), sq(0, 3))]);
    }

    #[test]
    fn test_rejections_leave_state_unchanged() {
        let mut board = BoardState::new();
        let before = *board.current_position();

        let err = board.request_move(sq(2, 5), sq(3, 4)).unwrap_err();
        assert!(matches!(
            err,
            MoveError::Illegal { reason: IllegalReason::NotYourPiece, .. }
        ));

        let err = board.request_move(sq(2, 3), sq(3, 4)).unwrap_err();
        assert!(matches!(
            err,
            MoveError::Illegal { reason: IllegalReason::NoPiece, .. }
        ));

        let err = board.request_move(sq(1, 2), sq(1, 3)).unwrap_err();
        assert!(matches!(
            err,
            MoveError::Illegal { reason: IllegalReason::InvalidMove, .. }
        ));

        assert_eq!(board.current_position(), &before);
        assert_eq!(board.side_to_move(), Side::Light);
        assert!(board.history().is_empty());
    }

    #[test]
    fn test_capture_is_required() {
        let mut board = board_with(
            &[
                (2, 2, Piece::man(Side::Light)),
                (3, 3, Piece::man(Side::Dark)),
                (6, 0, Piece::man(Side::Light)),
                (0, 6, Piece::man(Side::Dark)),
            ],
            Side::Light,
        );

        let err = board.request_move(sq(6, 0), sq(7, 1)).unwrap_err();
        assert!(matches!(
            err,
            MoveError::Illegal { reason: IllegalReason::CaptureRequired, .. }
        ));
        assert!(board.request_move(sq(2, 2), sq(4, 4)).is_ok());
    }

    #[test]
    fn test_multi_jump_must_continue() {
        let mut board = board_with(
            &[
                (2, 2, Piece::man(Side::Light)),
                (3, 3, Piece::man(Side::Dark)),
                (5, 5, Piece::man(Side::Dark)),
                (6, 0, Piece::man(Side::Light)),
                (0, 6, Piece::man(Side::Dark)),
            ],
            Side::Light,
        );

        let turn = board.request_move(sq(2, 2), sq(4, 4)).unwrap();
        assert_eq!(turn.captured_square, Some(sq(3, 3)));
        assert_eq!(turn.must_continue_from, Some(sq(4, 4)));
        assert_eq!(board.mode(), Mode::MustContinueJump(sq(4, 4)));
        assert_eq!(board.side_to_move(), Side::Light);
        assert_eq!(board.current_chain().len(), 1);

        // Another piece may not move, and the jumping piece may not slide.
        for (from, to) in [(sq(6, 0), sq(7, 1)), (sq(4, 4), sq(3, 5))] {
            let err = board.request_move(from, to).unwrap_err();
            assert_eq!(
                err,
                MoveError::Illegal {
                    mv: Move::new(from, to),
                    reason: IllegalReason::MustContinueFrom(sq(4, 4)),
                }
            );
        }
        assert_eq!(board.mode(), Mode::MustContinueJump(sq(4, 4)));
        assert_eq!(board.legal_moves().as_slice(), &[Move::new(sq(4, 4), sq(6, 6))]);

        let turn = board.request_move(sq(4, 4), sq(6, 6)).unwrap();
        assert_eq!(turn.captured_square, Some(sq(5, 5)));
        assert!(turn.turn_complete());
        assert_eq!(turn.outcome, GameOutcome::Continuing);
        assert_eq!(board.mode(), Mode::Normal);
        assert_eq!(board.side_to_move(), Side::Dark);
        assert!(board.current_chain().is_empty());
    }

    #[test]
    fn test_capturing_last_piece_ends_game() {
        let mut board = board_with(
            &[
                (2, 2, Piece::man(Side::Light)),
                (3, 3, Piece::man(Side::Dark)),
            ],
            Side::Light,
        );

        let turn = board.request_move(sq(2, 2), sq(4, 4)).unwrap();
        assert_eq!(turn.outcome, GameOutcome::LightWins);
        assert_eq!(board.mode(), Mode::GameOver(GameOutcome::LightWins));
        assert!(board.legal_moves().is_empty());

        let before = *board.current_position();
        let err = board.request_move(sq(4, 4), sq(5, 5)).unwrap_err();
        assert_eq!(err, MoveError::GameOver(GameOutcome::LightWins));
        assert_eq!(board.current_position(), &before);
    }

    #[test]
    fn test_blocking_opponent_wins() {
        let mut board = board_with(
            &[
                (0, 1, Piece::man(Side::Dark)),
                (2, 1, Piece::king(Side::Light)),
            ],
            Side::Light,
        );

        // The king steps onto b1, the only square Dark's man could reach.
        let turn = board.request_move(sq(2, 1), sq(1, 0)).unwrap();
        assert_eq!(turn.outcome, GameOutcome::LightWins);
        assert!(!rules::has_any_legal_move(board.current_position(), Side::Dark));
        assert_eq!(board.current_position().count(Side::Dark), 1);
    }

    #[test]
    fn test_promotion_reported() {
        let mut board = board_with(
            &[
                (2, 6, Piece::man(Side::Light)),
                (0, 6, Piece::man(Side::Dark)),
            ],
            Side::Light,
        );
        let turn = board.request_move(sq(2, 6), sq(3, 7)).unwrap();
        assert!(turn.promoted);
        assert_eq!(board.piece_at(sq(3, 7)), Some(Piece::king(Side::Light)));
    }

    #[test]
    fn test_decided_position_is_over() {
        let board = board_with(&[(1, 0, Piece::man(Side::Light))], Side::Dark);
        assert!(board.is_over());
        assert_eq!(board.outcome(), GameOutcome::LightWins);
    }
}
