use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::PieceError;

use super::shape::Shape;

/// Identifier of a piece in a catalogue.
///
/// Ids are dense and assigned in registration order starting from 0.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
    derive_more::Into,
)]
#[serde(transparent)]
pub struct PieceId(usize);

impl PieceId {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A registered polyomino with its precomputed orientations.
///
/// Orientations are the primary shape followed by its 90°, 180° and 270° clockwise
/// rotations, with bit-equal duplicates removed first and orientations larger than the
/// board removed afterwards. The orientation order is the order in which placements are
/// enumerated, so it decides ties between equally scored placements.
///
/// # Example
///
/// ```
/// use tetrofit_engine::{Piece, PieceId};
///
/// let shape = "****".parse().unwrap();
/// let piece = Piece::new(PieceId::new(0), shape, 1, 4, 4).unwrap();
/// assert_eq!(piece.orientations().len(), 2);
///
/// // Only the horizontal orientation fits on a 4x2 board.
/// let shape = "****".parse().unwrap();
/// let piece = Piece::new(PieceId::new(0), shape, 1, 4, 2).unwrap();
/// assert_eq!(piece.orientations().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    id: PieceId,
    shape: Shape,
    frequency: u32,
    orientations: ArrayVec<Shape, 4>,
}

impl Piece {
    /// Creates a piece for a `board_width × board_height` board.
    ///
    /// Fails with [`PieceError::ZeroFrequency`] when `frequency` is 0 and with
    /// [`PieceError::OutOfGrid`] when no orientation fits on the board.
    pub fn new(
        id: PieceId,
        shape: Shape,
        frequency: u32,
        board_width: usize,
        board_height: usize,
    ) -> Result<Self, PieceError> {
        if frequency == 0 {
            return Err(PieceError::ZeroFrequency);
        }

        let orientations: ArrayVec<Shape, 4> = shape
            .distinct_rotations()
            .into_iter()
            .filter(|s| s.fits_within(board_width, board_height))
            .collect();
        if orientations.is_empty() {
            return Err(PieceError::OutOfGrid {
                rows: shape.rows(),
                cols: shape.cols(),
            });
        }

        Ok(Self {
            id,
            shape,
            frequency,
            orientations,
        })
    }

    #[must_use]
    pub fn id(&self) -> PieceId {
        self.id
    }

    /// The shape as registered (before rotation).
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Relative usage frequency, always at least 1.
    #[must_use]
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    #[must_use]
    pub fn orientations(&self) -> &[Shape] {
        &self.orientations
    }

    #[must_use]
    pub fn orientation(&self, index: usize) -> Option<&Shape> {
        self.orientations.get(index)
    }

    /// Returns whether any orientation of `self` is bit-equal to an orientation of `other`.
    #[must_use]
    pub fn shares_orientation_with(&self, other: &Piece) -> bool {
        self.orientations
            .iter()
            .any(|mine| other.orientations.contains(mine))
    }
}
