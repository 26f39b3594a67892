pub mod evaluation;
pub mod minimax;
pub mod random;
pub mod search;

use checkers_core::{BoardState, Move};

/// Core trait for checkers agents
pub trait Agent {
    /// Pick the next move for the side to move, honoring a pending
    /// multi-jump. None when the game is over or no move exists.
    fn best_move(&mut self, board: &BoardState) -> Option<Move>;

    /// Get the agent's name
    fn name(&self) -> &str;
}

pub use evaluation::*;
pub use minimax::MinimaxAgent;
pub use random::RandomAgent;
pub use search::*;
