use crate::{
    evaluation::EvalWeights,
    search::{search_continuation, search_with_weights, SearchLimits, SearchResult},
    Agent,
};
use checkers_core::{BoardState, Mode, Move};

pub struct MinimaxAgent {
    name: String,
    limits: SearchLimits,
    weights: EvalWeights,
}

impl MinimaxAgent {
    pub fn new(depth: u8) -> Self {
        MinimaxAgent {
            name: format!("Minimax(depth={})", depth),
            limits: SearchLimits::depth(depth),
            weights: EvalWeights::default(),
        }
    }

    /// Searches to `depth` but gives up after `time_ms`, keeping the best
    /// fully searched move.
    pub fn with_time_limit(depth: u8, time_ms: u64) -> Self {
        MinimaxAgent {
            name: format!("Minimax(depth={}, time={}ms)", depth, time_ms),
            limits: SearchLimits::depth(depth).with_move_time(time_ms),
            weights: EvalWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: EvalWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Runs the search for the board's current mode.
    pub fn think(&self, board: &BoardState) -> Option<SearchResult> {
        let position = board.current_position();
        let side = board.side_to_move();

        match board.mode() {
            Mode::Normal => Some(search_with_weights(position, side, self.limits, &self.weights)),
            Mode::MustContinueJump(from) => Some(search_continuation(
                position,
                side,
                from,
                self.limits,
                &self.weights,
            )),
            Mode::GameOver(_) => None,
        }
    }
}

impl Agent for MinimaxAgent {
    fn best_move(&mut self, board: &BoardState) -> Option<Move> {
        self.think(board).and_then(|result| result.best_move)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
