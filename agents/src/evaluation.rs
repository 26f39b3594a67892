use checkers_core::{Position, Side};
use serde::Deserialize;

/// Heuristic constants of the static evaluation.
/// `Default` is the reference set the engine is tuned and tested against.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub man: f32,
    pub king: f32,
    /// Per row advanced toward the promotion row, men only.
    pub advancement: f32,
    /// Scaled by `7 - manhattan distance to the board centre`.
    pub center: f32,
    /// Subtracted for pieces on any border square.
    pub edge_penalty: f32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            man: 3.0,
            king: 5.0,
            advancement: 0.1,
            center: 0.05,
            edge_penalty: 0.2,
        }
    }
}

/// Types that can be scored from Light's perspective.
pub trait Evaluatable {
    fn evaluate(&self) -> f32;
}

impl Evaluatable for Position {
    fn evaluate(&self) -> f32 {
        evaluate(self)
    }
}

/// Evaluates a position with the reference weights.
/// Positive scores favor Light, negative favor Dark.
pub fn evaluate(position: &Position) -> f32 {
    evaluate_with(position, &EvalWeights::default())
}

/// Evaluates a position with the given weights.
///
/// Single-precision arithmetic, summed over squares in column-major
/// order, so scores are reproducible to the bit.
pub fn evaluate_with(position: &Position, weights: &EvalWeights) -> f32 {
    let mut score = 0.0f32;

    for (square, piece) in position.occupied() {
        let col = square.col();
        let row = square.row();

        let mut value = if piece.is_king {
            weights.king
        } else {
            weights.man
        };

        if !piece.is_king {
            let advanced = match piece.owner {
                Side::Light => row,
                Side::Dark => 7 - row,
            };
            value += advanced as f32 * weights.advancement;
        }

        let center_distance = (col as f32 - 3.5).abs() + (row as f32 - 3.5).abs();
        value += (7.0 - center_distance) * weights.center;

        if square.is_edge() {
            value -= weights.edge_penalty;
        }

        match piece.owner {
            Side::Light => score += value,
            Side::Dark => score -= value,
        }
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkers_core::{Piece, Square};

    fn single(col: u8, row: u8, piece: Piece) -> Position {
        let mut position = Position::empty();
        position.set_piece(Square::new(col, row).unwrap(), Some(piece));
        position
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_starting_position_is_balanced() {
        assert!(Position::starting_position().evaluate().abs() < 1e-4);
    }

    #[test]
    fn test_empty_board_is_zero() {
        assert_eq!(evaluate(&Position::empty()), 0.0);
    }

    #[test]
    fn test_light_man_terms() {
        // 3.0 + 2 rows advanced + centre distance 3
        assert_close(evaluate(&single(2, 2, Piece::man(Side::Light))), 3.4);
    }

    #[test]
    fn test_dark_man_counts_negative() {
        // 3.0 + 3 rows advanced + centre distance 1
        assert_close(evaluate(&single(3, 4, Piece::man(Side::Dark))), -3.6);
    }

    #[test]
    fn test_king_on_corner() {
        // No advancement for kings; far corner earns no centre bonus and an edge penalty.
        assert_close(evaluate(&single(0, 7, Piece::king(Side::Light))), 4.8);
    }

    #[test]
    fn test_evaluation_is_pure() {
        let position = Position::starting_position();
        let first = evaluate(&position);
        let second = evaluate(&position);
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_custom_weights() {
        let weights = EvalWeights {
            man: 1.0,
            advancement: 0.0,
            center: 0.0,
            edge_penalty: 0.0,
            ..EvalWeights::default()
        };
        let score = evaluate_with(&Position::starting_position(), &weights);
        assert_eq!(score, 0.0);
        let score = evaluate_with(&single(1, 0, Piece::king(Side::Dark)), &weights);
        assert_eq!(score, -5.0);
    }
}
