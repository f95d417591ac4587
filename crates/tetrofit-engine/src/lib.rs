//! Board, piece and scoring rules for polyomino stacking puzzles.
//!
//! - [`core`] - cell grid ([`Board`]), polyomino bitmaps ([`Shape`]) and pieces ([`Piece`])
//! - [`engine`] - placement enumeration ([`Placement`]), scoring and session statistics

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    #[display("invalid board dimensions {width}x{height} (width must be 1..=64, height at least 1)")]
    InvalidDimensions { width: usize, height: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RowError {
    #[display("row has {actual} cells, board is {expected} wide")]
    WidthMismatch { expected: usize, actual: usize },
    #[display("row has no filled cells")]
    Empty,
    #[display("row has no empty cells")]
    Full,
    #[display("no room for another row on a board of height {height}")]
    NoRoom { height: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeError {
    #[display("shape has no filled cells")]
    Blank,
    #[display("shape row {row} has no filled cells")]
    EmptyRow { row: usize },
    #[display("shape column {col} has no filled cells")]
    EmptyColumn { col: usize },
    #[display("shape has {components} disconnected parts")]
    Disconnected { components: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PieceError {
    #[display("{_0}")]
    Shape(ShapeError),
    #[display("piece frequency must be at least 1")]
    ZeroFrequency,
    #[display("{rows}x{cols} piece does not fit on the board in any orientation")]
    OutOfGrid { rows: usize, cols: usize },
}

impl From<ShapeError> for PieceError {
    fn from(err: ShapeError) -> Self {
        Self::Shape(err)
    }
}
