use serde::Serialize;

use crate::core::{Board, Piece, PieceId};

use super::stats::immediate_score;

/// The outcome of dropping one orientation of a piece at one anchor.
///
/// A placement owns the board as it looks after the piece is stamped and full rows are
/// cleared, so chains of placements can branch without sharing state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    piece: PieceId,
    orientation: usize,
    anchor_row: usize,
    anchor_col: usize,
    rows_cleared: usize,
    immediate_score: i64,
    board: Board,
}

impl Placement {
    #[must_use]
    pub fn piece(&self) -> PieceId {
        self.piece
    }

    /// Index into the piece's orientation list.
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

    #[must_use]
    pub fn immediate_score(&self) -> i64 {
        self.immediate_score
    }

    /// The board after this placement.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn into_board(self) -> Board {
        self.board
    }

    /// Immediate score minus the penalty of the resulting board.
    #[must_use]
    pub fn net_score(&self) -> i64 {
        net_score(self.immediate_score, &self.board)
    }
}

/// Returns `immediate - board.penalty()`, saturating.
#[must_use]
pub fn net_score(immediate: i64, board: &Board) -> i64 {
    let penalty = i64::try_from(board.penalty()).unwrap_or(i64::MAX);
    immediate.saturating_sub(penalty)
}

impl Board {
    /// Enumerates every legal placement of `piece` on this board.
    ///
    /// Placements are produced orientation by orientation (in the piece's orientation
    /// order), and within an orientation by anchor row ascending, then anchor column
    /// ascending. This order decides ties between equally scored placements.
    ///
    /// # Example
    ///
    /// ```
    /// use tetrofit_engine::{Board, Piece, PieceId};
    ///
    /// let mut board = Board::new(3, 4).unwrap();
    /// board.add_seed_row("* *").unwrap();
    /// let piece = Piece::new(PieceId::new(0), "*".parse().unwrap(), 1, 3, 4).unwrap();
    ///
    /// let placements = board.candidate_placements(&piece);
    /// let anchors: Vec<_> = placements
    ///     .iter()
    ///     .map(|p| (p.anchor_row(), p.anchor_col()))
    ///     .collect();
    /// assert_eq!(anchors, [(0, 1), (1, 0), (1, 2)]);
    /// assert_eq!(placements[0].rows_cleared(), 1);
    /// assert_eq!(placements[0].net_score(), 50);
    /// ```
    #[must_use]
    pub fn candidate_placements(&self, piece: &Piece) -> Vec<Placement> {
        let components = self.component_count();
        let mut placements = vec![];
        for (orientation, shape) in piece.orientations().iter().enumerate() {
            let max_row = self.height().saturating_sub(shape.rows());
            let max_col = self.width().saturating_sub(shape.cols());
            for anchor_row in 0..=max_row {
                for anchor_col in 0..=max_col {
                    if !self.is_placement_legal_with(shape, anchor_row, anchor_col, || components)
                    {
                        continue;
                    }
                    let mut board = self.clone();
                    let rows_cleared = board.apply_placement(shape, anchor_row, anchor_col);
                    placements.push(Placement {
                        piece: piece.id(),
                        orientation,
                        anchor_row,
                        anchor_col,
                        rows_cleared,
                        immediate_score: immediate_score(rows_cleared),
                        board,
                    });
                }
            }
        }
        placements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(id: usize, s: &str, board: &Board) -> Piece {
        Piece::new(
            PieceId::new(id),
            s.parse().unwrap(),
            1,
            board.width(),
            board.height(),
        )
        .unwrap()
    }

    #[test]
    fn test_candidates_on_empty_board() {
        let board = Board::new(3, 3).unwrap();
        let domino = piece(0, "**", &board);
        let placements = board.candidate_placements(&domino);
        let keys: Vec<_> = placements
            .iter()
            .map(|p| (p.orientation(), p.anchor_row(), p.anchor_col()))
            .collect();
        assert_eq!(
            keys,
            [(0, 0, 0), (0, 0, 1), (1, 0, 0), (1, 0, 1), (1, 0, 2)]
        );
        assert!(placements.iter().all(|p| p.piece() == PieceId::new(0)));
        assert!(placements.iter().all(|p| p.rows_cleared() == 0));
    }

    #[test]
    fn test_candidates_do_not_mutate_board() {
        let board = Board::from_ascii(3, "#.#");
        let before = board.clone();
        let single = piece(0, "*", &board);
        let placements = board.candidate_placements(&single);
        assert_eq!(board, before);
        assert_eq!(placements[0].board().to_string(), "");
        assert_eq!(placements[1].board().to_string(), "   \n*  \n* *");
    }

    #[test]
    fn test_candidates_skip_floating_placements() {
        // The only gap a domino fits in is covered by row 1.
        let board = Board::from_ascii(
            2,
            r"
            ##.
            ..#
            ",
        );
        let domino = piece(0, "**", &board);
        assert!(board.candidate_placements(&domino).is_empty());

        let single = piece(0, "*", &board);
        let placements = board.candidate_placements(&single);
        let anchors: Vec<_> = placements
            .iter()
            .map(|p| (p.anchor_row(), p.anchor_col()))
            .collect();
        assert_eq!(anchors, [(1, 2)]);
        assert_eq!(placements[0].rows_cleared(), 1);
    }

    #[test]
    fn test_candidates_never_add_components() {
        let board = Board::from_ascii(
            5,
            r"
            .#..#
            ##.##
            #...#
            ",
        );
        for s in ["*", "**", "**\n*", "***\n *", "*\n**\n*"] {
            let piece = piece(0, s, &board);
            for placement in board.candidate_placements(&piece) {
                let shape = &piece.orientations()[placement.orientation()];
                let mut stamped = board.clone();
                stamped.fill_shape(shape, placement.anchor_row(), placement.anchor_col());
                assert!(
                    stamped.component_count() <= board.component_count(),
                    "{s:?} at ({}, {})",
                    placement.anchor_row(),
                    placement.anchor_col()
                );
                assert!(placement.board().is_tidy());
            }
        }
    }

    #[test]
    fn test_net_score() {
        let board = Board::from_ascii(
            4,
            r"
            .###
            .###
            .###
            .###
            ",
        );
        let bar = piece(0, "*\n*\n*\n*", &board);
        let placements = board.candidate_placements(&bar);
        let clearing = placements
            .iter()
            .find(|p| p.anchor_col() == 0 && p.orientation() == 0)
            .unwrap();
        assert_eq!(clearing.rows_cleared(), 4);
        assert_eq!(clearing.immediate_score(), 400);
        assert_eq!(clearing.net_score(), 400);
        assert!(clearing.board().is_empty());
    }

    #[test]
    fn test_net_score_subtracts_penalty() {
        let board = Board::from_ascii(2, "#...");
        assert_eq!(net_score(0, &board), -1);
        assert_eq!(net_score(50, &Board::new(4, 2).unwrap()), 50);
    }
}
