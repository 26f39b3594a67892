use crate::board::Position;
use crate::types::{GameOutcome, Move, Side, Square};

/// Upper bound on moves from any position: 32 playable squares, four
/// diagonals each.
const MAX_MOVES: usize = 128;

/// Destination deltas in ascending (col, row) order, so that scanning them
/// per source square matches a full destination scan of the board.
const MOVE_DELTAS: [(i8, i8); 8] = [
    (-2, -2),
    (-2, 2),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
    (2, -2),
    (2, 2),
];

const JUMP_DELTAS: [(i8, i8); 4] = [(-2, -2), (-2, 2), (2, -2), (2, 2)];

/// A list of moves with a fixed capacity to avoid allocations.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    count: usize,
}

impl MoveList {
    /// Creates an empty move list.
    pub const fn new() -> Self {
        Self {
            moves: [Move::new(Square::A1, Square::A1); MAX_MOVES],
            count: 0,
        }
    }

    /// Adds a move to the list.
    pub fn push(&mut self, mv: Move) {
        debug_assert!(self.count < MAX_MOVES, "Move list overflow");
        self.moves[self.count] = mv;
        self.count += 1;
    }

    /// Returns the number of moves.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns an iterator over the moves.
    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.as_slice().iter()
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.count]
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.iter().any(|&m| m == mv)
    }

    /// Clears the move list.
    pub fn clear(&mut self) {
        self.count = 0;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// What applying a move did to the board.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MoveEffect {
    pub position: Position,
    /// Square of the piece removed by a jump.
    pub captured: Option<Square>,
    /// True if the moving man was crowned on this move.
    pub promoted: bool,
}

impl MoveEffect {
    pub fn was_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// Checks the geometry, direction and capture rules for a single step.
/// Turn order and the mandatory-capture rule are not considered here.
pub fn is_valid_move(position: &Position, from: Square, to: Square) -> bool {
    if !position.is_empty(to) {
        return false;
    }
    let Some(piece) = position.piece_at(from) else {
        return false;
    };

    let mv = Move::new(from, to);
    let (_, dr) = mv.delta();

    if mv.is_simple() {
        return piece.can_move_toward(dr);
    }

    if let Some(middle) = mv.captured_square() {
        return position.is_enemy(middle, piece.owner) && piece.can_move_toward(dr);
    }

    false
}

/// Returns true if the piece on `square` has at least one capture available.
pub fn must_jump_from(position: &Position, square: Square) -> bool {
    let Some(piece) = position.piece_at(square) else {
        return false;
    };

    JUMP_DELTAS.iter().any(|&(dc, dr)| {
        square.offset(dc, dr).is_some_and(|to| {
            is_valid_move(position, square, to)
                && Move::new(square, to)
                    .captured_square()
                    .is_some_and(|middle| position.is_enemy(middle, piece.owner))
        })
    })
}

/// Returns true if any piece of `side` has a capture available.
/// While this holds, only jumps are legal for `side`.
pub fn any_jump_available(position: &Position, side: Side) -> bool {
    position
        .pieces(side)
        .any(|square| must_jump_from(position, square))
}

/// Generates all legal moves for `side` in enumeration order: source
/// squares column-major, destinations ascending by (col, row).
/// When any capture exists, only captures are returned.
pub fn generate_legal_moves(position: &Position, side: Side) -> MoveList {
    let mut simple = MoveList::new();
    let mut jumps = MoveList::new();

    for from in position.pieces(side) {
        for &(dc, dr) in &MOVE_DELTAS {
            if let Some(to) = from.offset(dc, dr) {
                if is_valid_move(position, from, to) {
                    if dc.abs() == 2 {
                        jumps.push(Move::new(from, to));
                    } else {
                        simple.push(Move::new(from, to));
                    }
                }
            }
        }
    }

    if jumps.is_empty() {
        simple
    } else {
        jumps
    }
}

/// Generates the captures available to the piece on `square`, as required
/// when a multi-jump must continue.
pub fn generate_jumps_from(position: &Position, square: Square) -> MoveList {
    let mut jumps = MoveList::new();

    for &(dc, dr) in &JUMP_DELTAS {
        if let Some(to) = square.offset(dc, dr) {
            if is_valid_move(position, square, to) {
                jumps.push(Move::new(square, to));
            }
        }
    }

    jumps
}

/// Applies a move, returning the new position.
/// The move is assumed to be valid; the input position is untouched.
pub fn apply_move(position: &Position, mv: Move) -> MoveEffect {
    let mut next = *position;

    let Some(mut piece) = next.move_piece(mv.from, mv.to) else {
        debug_assert!(false, "No piece at source square {}", mv.from);
        return MoveEffect {
            position: next,
            captured: None,
            promoted: false,
        };
    };

    let captured = mv.captured_square();
    if let Some(middle) = captured {
        next.set_piece(middle, None);
    }

    let promoted = !piece.is_king && mv.to.row() == piece.owner.promotion_row();
    if promoted {
        piece.is_king = true;
        next.set_piece(mv.to, Some(piece));
    }

    MoveEffect {
        position: next,
        captured,
        promoted,
    }
}

/// Returns true if `side` can make any move at all.
pub fn has_any_legal_move(position: &Position, side: Side) -> bool {
    position.pieces(side).any(|from| {
        MOVE_DELTAS.iter().any(|&(dc, dr)| {
            from.offset(dc, dr)
                .is_some_and(|to| is_valid_move(position, from, to))
        })
    })
}

pub fn count_pieces(position: &Position, side: Side) -> usize {
    position.count(side)
}

/// Determines the game result with `to_move` about to play.
/// A side with no pieces loses; a side to move with no legal move loses.
pub fn outcome(position: &Position, to_move: Side) -> GameOutcome {
    if count_pieces(position, Side::Light) == 0 {
        return GameOutcome::DarkWins;
    }
    if count_pieces(position, Side::Dark) == 0 {
        return GameOutcome::LightWins;
    }
    if !has_any_legal_move(position, to_move) {
        return GameOutcome::win_for(to_move.opponent());
    }
    GameOutcome::Continuing
}
