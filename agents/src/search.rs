use crate::evaluation::{evaluate_with, EvalWeights};
use checkers_core::{
    apply_move, generate_jumps_from, generate_legal_moves, outcome, Move, MoveList, Position, Side,
    Square,
};
use log::{info, trace};
use std::time::{Duration, Instant};

pub const INFINITY: f32 = f32::INFINITY;
const TIME_CHECK_INTERVAL: u64 = 1024; // Check the clock every 1024 nodes

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    /// Minimax score of the chosen move, from Light's perspective.
    pub score: f32,
    pub depth: u8,
    pub nodes: u64,
    /// True if the deadline cut the search short.
    pub stopped: bool,
    /// Score of every fully searched root move, in enumeration order.
    pub root_scores: Vec<(Move, f32)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_depth: u8,
    /// Optional deadline. Without one the search always runs to completion.
    pub move_time: Option<Duration>,
}

impl SearchLimits {
    pub fn depth(depth: u8) -> Self {
        Self {
            max_depth: depth,
            move_time: None,
        }
    }

    pub fn with_move_time(mut self, millis: u64) -> Self {
        self.move_time = Some(Duration::from_millis(millis));
        self
    }
}

struct SearchInfo {
    start_time: Instant,
    limits: SearchLimits,
    weights: EvalWeights,
    nodes: u64,
    stopped: bool,
}

impl SearchInfo {
    fn new(limits: SearchLimits, weights: EvalWeights) -> Self {
        Self {
            start_time: Instant::now(),
            limits,
            weights,
            nodes: 0,
            stopped: false,
        }
    }

    fn should_stop(&mut self) -> bool {
        if self.stopped {
            return true;
        }

        if self.nodes % TIME_CHECK_INTERVAL == 0 {
            if let Some(move_time) = self.limits.move_time {
                if self.start_time.elapsed() >= move_time {
                    self.stopped = true;
                }
            }
        }

        self.stopped
    }
}

/// Chooses the best move for `side`, searching `depth` plies.
/// Returns None when `side` has no legal move.
pub fn best_move(position: &Position, side: Side, depth: u8) -> Option<Move> {
    search(position, side, SearchLimits::depth(depth)).best_move
}

/// Chooses the best continuation jump for the piece on `from`, for use
/// while a multi-jump is in progress.
pub fn best_continuation(position: &Position, side: Side, from: Square, depth: u8) -> Option<Move> {
    search_continuation(
        position,
        side,
        from,
        SearchLimits::depth(depth),
        &EvalWeights::default(),
    )
    .best_move
}

pub fn search(position: &Position, side: Side, limits: SearchLimits) -> SearchResult {
    search_with_weights(position, side, limits, &EvalWeights::default())
}

pub fn search_with_weights(
    position: &Position,
    side: Side,
    limits: SearchLimits,
    weights: &EvalWeights,
) -> SearchResult {
    let moves = generate_legal_moves(position, side);
    let mut info = SearchInfo::new(limits, *weights);
    search_root(position, side, &moves, &mut info)
}

pub fn search_continuation(
    position: &Position,
    side: Side,
    from: Square,
    limits: SearchLimits,
    weights: &EvalWeights,
) -> SearchResult {
    let moves = if position.is_side(from, side) {
        generate_jumps_from(position, from)
    } else {
        MoveList::new()
    };
    let mut info = SearchInfo::new(limits, *weights);
    search_root(position, side, &moves, &mut info)
}

/// Minimax with alpha-beta pruning and the reference evaluation.
/// Light maximizes; `maximizing` selects which side is to move.
pub fn minimax(position: &Position, depth: u8, alpha: f32, beta: f32, maximizing: bool) -> f32 {
    let mut info = SearchInfo::new(SearchLimits::depth(depth), EvalWeights::default());
    alpha_beta(position, depth, alpha, beta, maximizing, &mut info)
}

fn search_root(
    position: &Position,
    side: Side,
    moves: &MoveList,
    info: &mut SearchInfo,
) -> SearchResult {
    let depth = info.limits.max_depth;
    let child_depth = depth.saturating_sub(1);
    let maximizing = side.is_maximizer();

    let mut best_move = None;
    let mut best_score = if maximizing { -INFINITY } else { INFINITY };
    let mut root_scores = Vec::with_capacity(moves.len());

    for &mv in moves.iter() {
        let child = apply_move(position, mv).position;
        // Every root move gets the full window, so its score is exact.
        let score = alpha_beta(&child, child_depth, -INFINITY, INFINITY, !maximizing, info);

        if info.stopped {
            break;
        }

        trace!("{side} {mv}: {score}");
        root_scores.push((mv, score));

        // Strict comparison keeps the first of equally scored moves.
        let better = if maximizing {
            score > best_score
        } else {
            score < best_score
        };
        if better || best_move.is_none() {
            best_score = score;
            best_move = Some(mv);
        }
    }

    // Deadline hit before any root move finished: still answer with a legal move.
    if best_move.is_none() && info.stopped {
        best_move = moves.iter().next().copied();
    }

    info!(
        "{side} depth {depth}: best {} score {best_score:.3} nodes {}{}",
        best_move.map_or_else(|| "none".to_string(), |m| m.to_string()),
        info.nodes,
        if info.stopped { " (stopped)" } else { "" }
    );

    SearchResult {
        best_move,
        score: best_score,
        depth,
        nodes: info.nodes,
        stopped: info.stopped,
        root_scores,
    }
}

fn alpha_beta(
    position: &Position,
    depth: u8,
    mut alpha: f32,
    mut beta: f32,
    maximizing: bool,
    info: &mut SearchInfo,
) -> f32 {
    info.nodes += 1;

    // The root discards anything computed after this point.
    if info.should_stop() {
        return 0.0;
    }

    let side = if maximizing { Side::Light } else { Side::Dark };

    if depth == 0 || outcome(position, side).is_terminal() {
        return evaluate_with(position, &info.weights);
    }

    let moves = generate_legal_moves(position, side);
    if moves.is_empty() {
        return evaluate_with(position, &info.weights);
    }

    if maximizing {
        let mut best = -INFINITY;
        for &mv in moves.iter() {
            let child = apply_move(position, mv).position;
            let score = alpha_beta(&child, depth - 1, alpha, beta, false, info);
            best = best.max(score);
            alpha = alpha.max(score);

            if beta <= alpha {
                break; // Beta cutoff
            }
        }
        best
    } else {
        let mut best = INFINITY;
        for &mv in moves.iter() {
            let child = apply_move(position, mv).position;
            let score = alpha_beta(&child, depth - 1, alpha, beta, true, info);
            best = best.min(score);
            beta = beta.min(score);

            if beta <= alpha {
                break; // Alpha cutoff
            }
        }
        best
    }
}
