use crate::Agent;
use checkers_core::{BoardState, Move};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            name: "Random".to_string(),
            rng: StdRng::from_entropy(),
        }
    }

    /// A reproducible agent, for self-play and tests.
    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            name: format!("Random(seed={})", seed),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn best_move(&mut self, board: &BoardState) -> Option<Move> {
        board.legal_moves().as_slice().choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_agent_plays_a_full_game() {
        let mut board = BoardState::new();
        let mut agent = RandomAgent::with_seed(7);
        let mut plies = 0;

        while let Some(mv) = agent.best_move(&board) {
            assert!(board.legal_moves().contains(mv));
            board.apply(mv).unwrap();
            plies += 1;
            if plies > 1000 {
                break;
            }
        }
        // Either decided, or a long king shuffle.
        assert!(board.is_over() || plies > 1000);
    }

    #[test]
    fn test_same_seed_same_moves() {
        let board = BoardState::new();
        let a = RandomAgent::with_seed(42).best_move(&board);
        let b = RandomAgent::with_seed(42).best_move(&board);
        assert_eq!(a, b);
    }
}
