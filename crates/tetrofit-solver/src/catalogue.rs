use tetrofit_engine::{Piece, PieceId, Shape};

use crate::SolverError;

/// Append-only list of the pieces a solver can place.
///
/// Ids are dense and assigned in registration order, so a piece's id is its index.
/// No two pieces share an orientation.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    pieces: Vec<Piece>,
    total_frequency: u64,
}

impl Catalogue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())
    }

    /// Iterates over the pieces in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter()
    }

    /// Sum of the frequencies of all registered pieces.
    #[must_use]
    pub fn total_frequency(&self) -> u64 {
        self.total_frequency
    }

    /// Registers a piece for a `board_width × board_height` board and returns its id.
    ///
    /// # Errors
    ///
    /// - [`SolverError::InvalidPiece`] if `frequency` is 0
    /// - [`SolverError::OutOfGrid`] if no orientation fits on the board
    /// - [`SolverError::DuplicatePiece`] if an orientation equals one of a registered piece
    pub fn add(
        &mut self,
        shape: Shape,
        frequency: u32,
        board_width: usize,
        board_height: usize,
    ) -> Result<PieceId, SolverError> {
        let id = PieceId::new(self.pieces.len());
        let piece = Piece::new(id, shape, frequency, board_width, board_height)?;
        if let Some(existing) = self.pieces.iter().find(|p| p.shares_orientation_with(&piece)) {
            return Err(SolverError::DuplicatePiece {
                existing: existing.id(),
            });
        }
        self.total_frequency += u64::from(frequency);
        self.pieces.push(piece);
        Ok(id)
    }
}
