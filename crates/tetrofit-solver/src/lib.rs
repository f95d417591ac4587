//! Lookahead placement solver for polyomino stacking puzzles.
//!
//! A [`Solver`] owns a board and a catalogue of pieces. Each call to [`Solver::place`]
//! drops one piece where it scores best and commits the resulting board:
//!
//! - **Greedy** (lookahead 0): maximise rows-cleared score minus board penalty
//! - **Lookahead** (depth `n`): extend every candidate with `n` further placements of any
//!   catalogue piece and keep the candidate that heads the best chain. Later placements
//!   are weighted by their piece's share of the total catalogue frequency, and only the
//!   final board of a chain is penalised
//!
//! Enumeration order is fixed (piece id, orientation, anchor row, anchor column), and the
//! first of several equally valued choices wins, so results are reproducible.
//!
//! # Example
//!
//! ```
//! use tetrofit_solver::{Lookahead, Solver};
//!
//! let mut solver = Solver::new(3, 4)?;
//! solver.add_seed_row("* *")?;
//! let single = solver.add_piece_str("*", 9)?;
//! solver.add_piece_str("**", 1)?;
//!
//! let score = solver.place(single, Lookahead::GREEDY)?;
//! assert_eq!(score, 50);
//! assert_eq!(solver.render(), "");
//! # Ok::<(), tetrofit_solver::SolverError>(())
//! ```

use tetrofit_engine::{BoardError, PieceError, PieceId, RowError};

pub use self::{catalogue::*, solver::*};

mod catalogue;
mod lookahead;
mod solver;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SolverError {
    #[display("{_0}")]
    InvalidDimensions(BoardError),
    #[display("invalid seed row: {_0}")]
    InvalidRow(RowError),
    #[display("invalid piece: {_0}")]
    InvalidPiece(PieceError),
    #[display("{rows}x{cols} piece does not fit on the board in any orientation")]
    OutOfGrid { rows: usize, cols: usize },
    #[display("piece duplicates an orientation of piece {existing}")]
    DuplicatePiece { existing: PieceId },
    #[display("unknown piece {id}")]
    UnknownPiece { id: PieceId },
    #[display("lookahead must not be negative, got {lookahead}")]
    NegativeLookahead { lookahead: i64 },
    #[display("no legal placement for piece {id}")]
    GameOver { id: PieceId },
}

impl From<BoardError> for SolverError {
    fn from(err: BoardError) -> Self {
        Self::InvalidDimensions(err)
    }
}

impl From<RowError> for SolverError {
    fn from(err: RowError) -> Self {
        Self::InvalidRow(err)
    }
}

impl From<PieceError> for SolverError {
    fn from(err: PieceError) -> Self {
        match err {
            PieceError::OutOfGrid { rows, cols } => Self::OutOfGrid { rows, cols },
            err => Self::InvalidPiece(err),
        }
    }
}
