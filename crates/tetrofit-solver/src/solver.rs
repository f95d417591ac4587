use std::fmt;

use serde::Serialize;
use tetrofit_engine::{Board, Placement, PieceId, SessionStats, Shape};
use tracing::debug;

use crate::{
    Catalogue, SolverError,
    lookahead::{select_greedy, select_with_lookahead},
};

/// Number of further placements considered after the current one.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    derive_more::Display,
    derive_more::From,
    derive_more::Into,
)]
#[serde(transparent)]
pub struct Lookahead(usize);

impl Lookahead {
    /// Scores each placement on its own.
    pub const GREEDY: Self = Self(0);

    #[must_use]
    pub const fn new(depth: usize) -> Self {
        Self(depth)
    }

    #[must_use]
    pub const fn depth(self) -> usize {
        self.0
    }
}

impl TryFrom<i64> for Lookahead {
    type Error = SolverError;

    fn try_from(lookahead: i64) -> Result<Self, Self::Error> {
        usize::try_from(lookahead)
            .map(Self)
            .map_err(|_| SolverError::NegativeLookahead { lookahead })
    }
}

/// A placement committed by [`Solver::play`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Move {
    piece: PieceId,
    orientation: usize,
    anchor_row: usize,
    anchor_col: usize,
    rows_cleared: usize,
    score: i64,
}

impl Move {
    #[must_use]
    pub fn piece(&self) -> PieceId {
        self.piece
    }

    #[must_use]
    pub fn orientation(&self) -> usize {
        self.orientation
    }

    #[must_use]
    pub fn anchor_row(&self) -> usize {
        self.anchor_row
    }

    #[must_use]
    pub fn anchor_col(&self) -> usize {
        self.anchor_col
    }

    #[must_use]
    pub fn rows_cleared(&self) -> usize {
        self.rows_cleared
    }

    /// Immediate score minus the penalty of the committed board.
    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }
}

/// Board, piece catalogue and placement policy.
///
/// The board only changes through [`Solver::add_seed_row`] and [`Solver::place`]; a
/// failed operation leaves the board, the catalogue and the statistics as they were.
#[derive(Debug, Clone)]
pub struct Solver {
    board: Board,
    catalogue: Catalogue,
    stats: SessionStats,
}

impl Solver {
    /// Creates a solver with an empty `width × height` board and no pieces.
    pub fn new(width: usize, height: usize) -> Result<Self, SolverError> {
        Ok(Self {
            board: Board::new(width, height)?,
            catalogue: Catalogue::new(),
            stats: SessionStats::new(),
        })
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    #[must_use]
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Adds a row of obstacles above the highest non-empty row.
    ///
    /// See [`Board::add_seed_row`] for the row format.
    pub fn add_seed_row(&mut self, pattern: &str) -> Result<(), SolverError> {
        self.board.add_seed_row(pattern)?;
        Ok(())
    }

    /// Registers a piece and returns its id.
    pub fn add_piece(&mut self, shape: Shape, frequency: u32) -> Result<PieceId, SolverError> {
        let id = self.catalogue.add(
            shape,
            frequency,
            self.board.width(),
            self.board.height(),
        )?;
        debug!(%id, frequency, "registered piece");
        Ok(id)
    }

    /// Parses a piece string and registers the piece.
    pub fn add_piece_str(&mut self, piece: &str, frequency: u32) -> Result<PieceId, SolverError> {
        let shape = piece
            .parse::<Shape>()
            .map_err(|err| SolverError::InvalidPiece(err.into()))?;
        self.add_piece(shape, frequency)
    }

    /// Every legal placement of piece `id` on the current board, in enumeration order.
    pub fn candidates(&self, id: PieceId) -> Result<Vec<Placement>, SolverError> {
        let piece = self
            .catalogue
            .get(id)
            .ok_or(SolverError::UnknownPiece { id })?;
        Ok(self.board.candidate_placements(piece))
    }

    /// Places piece `id` at the best position and returns its score.
    ///
    /// The score is the rows-cleared score of the placement minus the penalty of the
    /// committed board.
    pub fn place(&mut self, id: PieceId, lookahead: Lookahead) -> Result<i64, SolverError> {
        self.play(id, lookahead).map(|m| m.score())
    }

    /// Same as [`Solver::place`], returning the details of the committed placement.
    pub fn play(&mut self, id: PieceId, lookahead: Lookahead) -> Result<Move, SolverError> {
        let mut candidates = self.candidates(id)?;
        debug!(%id, %lookahead, candidates = candidates.len(), "enumerated placements");

        let index = if lookahead == Lookahead::GREEDY {
            select_greedy(&candidates)
        } else {
            select_with_lookahead(&candidates, &self.catalogue, lookahead.depth())
                .or_else(|| select_greedy(&candidates))
        }
        .ok_or(SolverError::GameOver { id })?;

        let placement = candidates.swap_remove(index);
        let m = Move {
            piece: id,
            orientation: placement.orientation(),
            anchor_row: placement.anchor_row(),
            anchor_col: placement.anchor_col(),
            rows_cleared: placement.rows_cleared(),
            score: placement.net_score(),
        };
        self.board = placement.into_board();
        self.stats.record_placement(m.rows_cleared, m.score);
        debug!(
            %id,
            orientation = m.orientation,
            row = m.anchor_row,
            col = m.anchor_col,
            rows_cleared = m.rows_cleared,
            score = m.score,
            "committed placement"
        );
        Ok(m)
    }

    /// Renders the board; see [`Board`]'s `Display` implementation.
    #[must_use]
    pub fn render(&self) -> String {
        self.board.to_string()
    }
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.board, f)
    }
}
