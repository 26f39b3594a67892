use crate::board::Position;
use crate::rules::{apply_move, generate_legal_moves, outcome};
use crate::types::{Move, Side};

/// Perft (performance test) results at each depth.
///
/// The tree is the one the search walks: one jump per ply, sides
/// alternating, capture mandatory.
#[derive(Debug, Default)]
pub struct PerftResults {
    pub nodes: u64,
    pub captures: u64,
    pub promotions: u64,
    /// Leaves where the side to move has lost.
    pub wins: u64,
}

impl PerftResults {
    /// Combines results from child nodes.
    pub fn add(&mut self, other: &Self) {
        self.nodes += other.nodes;
        self.captures += other.captures;
        self.promotions += other.promotions;
        self.wins += other.wins;
    }
}

/// Performs perft test to given depth and returns node count.
pub fn perft(position: &Position, side: Side, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal_moves(position, side);

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|&mv| perft(&apply_move(position, mv).position, side.opponent(), depth - 1))
        .sum()
}

/// Performs perft with a per-root-move breakdown.
pub fn perft_divide(position: &Position, side: Side, depth: u8) -> Vec<(Move, u64)> {
    let moves = generate_legal_moves(position, side);
    let mut results = Vec::with_capacity(moves.len());

    for &mv in moves.iter() {
        let child = apply_move(position, mv).position;
        let nodes = if depth <= 1 {
            1
        } else {
            perft(&child, side.opponent(), depth - 1)
        };
        results.push((mv, nodes));
    }

    results
}

/// Performs perft test with detailed statistics.
pub fn perft_detailed(position: &Position, side: Side, depth: u8) -> PerftResults {
    let mut results = PerftResults::default();

    if depth == 0 {
        results.nodes = 1;
        return results;
    }

    for &mv in generate_legal_moves(position, side).iter() {
        let effect = apply_move(position, mv);

        if depth == 1 {
            results.nodes += 1;
            if effect.was_capture() {
                results.captures += 1;
            }
            if effect.promoted {
                results.promotions += 1;
            }
            if outcome(&effect.position, side.opponent()).is_terminal() {
                results.wins += 1;
            }
        } else {
            let child = perft_detailed(&effect.position, side.opponent(), depth - 1);
            results.add(&child);
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::{parse_fen, positions};

    #[test]
    fn test_perft_starting_position() {
        let position = Position::starting_position();

        for &(depth, expected) in &[(0, 1), (1, 7), (2, 49)] {
            let result = perft(&position, Side::Light, depth);
            assert_eq!(
                result, expected,
                "Perft({}) failed: expected {}, got {}",
                depth, expected, result
            );
        }
    }

    #[test]
    fn test_perft_divide() {
        let position = Position::starting_position();
        let results = perft_divide(&position, Side::Light, 2);

        assert_eq!(results.len(), 7);
        assert!(results.iter().all(|&(_, n)| n == 7));
        assert_eq!(results.iter().map(|(_, n)| n).sum::<u64>(), 49);
    }

    #[test]
    fn test_perft_detailed_counts_captures() {
        let (position, side) = parse_fen(positions::DOUBLE_JUMP).unwrap();
        let results = perft_detailed(&position, side, 1);

        assert_eq!(results.nodes, 1);
        assert_eq!(results.captures, 1);
        assert_eq!(results.promotions, 0);
        assert_eq!(results.nodes, perft(&position, side, 1));
    }

    #[test]
    fn test_perft_detailed_matches_perft() {
        let position = Position::starting_position();
        for depth in 1..=3 {
            assert_eq!(
                perft_detailed(&position, Side::Light, depth).nodes,
                perft(&position, Side::Light, depth)
            );
        }
    }
}
