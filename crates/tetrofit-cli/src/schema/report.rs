use serde::Serialize;
use tetrofit_engine::{Board, SessionStats};
use tetrofit_solver::{Lookahead, Move};

/// Result of playing every move of a puzzle.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub moves: Vec<MoveReport>,
    pub stats: SessionStats,
    pub board: Board,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoveReport {
    pub lookahead: Lookahead,
    #[serde(flatten)]
    pub placement: Move,
    /// Rendered board after the move.
    pub board: String,
}
