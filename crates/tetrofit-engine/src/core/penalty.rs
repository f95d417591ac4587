use super::bit_board::Board;

/// Cost per row of depth for an empty cell buried under its column top.
const HOLE_DEPTH_WEIGHT: u64 = 7;
/// Cost per row of height for a filled cell.
const HEIGHT_WEIGHT: u64 = 10;

impl Board {
    /// Computes the board's quality cost (lower is better).
    ///
    /// Every cell below [`Board::first_empty_row`] contributes:
    ///
    /// - **Empty cell** at row `r` under a column top `t` (`r < t`): `(t - r) * 7`
    /// - **Filled cell** at row `r`: `r * 10` plus its distance from the centre columns
    ///
    /// With `center = width / 2`, an even-width board treats columns `center - 1` and
    /// `center` as the centre; an odd-width board only column `center`.
    ///
    /// # Example
    ///
    /// ```
    /// use tetrofit_engine::Board;
    ///
    /// let board = Board::from_ascii(
    ///     3,
    ///     r"
    ///     #..
    ///     .#.
    ///     ",
    /// );
    /// // hole under (1, 0): 7, filled (1, 0): 10 + 1, filled (0, 1): 0
    /// assert_eq!(board.penalty(), 18);
    /// ```
    #[must_use]
    pub fn penalty(&self) -> u64 {
        let mut penalty = 0;
        for x in 0..self.width() {
            let top = self.top_row_in_column(x);
            let off_center = self.off_center_cost(x);
            for y in 0..self.first_empty_row() {
                if self.is_cell_filled(y, x) {
                    penalty += y as u64 * HEIGHT_WEIGHT + off_center;
                } else if let Some(top) = top.filter(|&top| y < top) {
                    penalty += (top - y) as u64 * HOLE_DEPTH_WEIGHT;
                }
            }
        }
        penalty
    }

    fn off_center_cost(&self, x: usize) -> u64 {
        let center = self.width() / 2;
        let cost = if self.width() % 2 == 0 {
            if x + 1 < center {
                center - x - 1
            } else {
                x.saturating_sub(center)
            }
        } else if x < center {
            center - x
        } else {
            x - center
        };
        cost as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_has_no_penalty() {
        assert_eq!(Board::new(4, 4).unwrap().penalty(), 0);
        assert_eq!(Board::new(1, 1).unwrap().penalty(), 0);
    }

    #[test]
    fn test_off_center_cost_even_width() {
        let board = Board::new(6, 1).unwrap();
        let costs: Vec<u64> = (0..6).map(|x| board.off_center_cost(x)).collect();
        assert_eq!(costs, [2, 1, 0, 0, 1, 2]);

        let board = Board::new(2, 1).unwrap();
        assert_eq!(board.off_center_cost(0), 0);
        assert_eq!(board.off_center_cost(1), 0);
    }

    #[test]
    fn test_off_center_cost_odd_width() {
        let board = Board::new(5, 1).unwrap();
        let costs: Vec<u64> = (0..5).map(|x| board.off_center_cost(x)).collect();
        assert_eq!(costs, [2, 1, 0, 1, 2]);

        let board = Board::new(1, 1).unwrap();
        assert_eq!(board.off_center_cost(0), 0);
    }

    #[test]
    fn test_penalty_height_and_center() {
        // filled (0, 0): 0 + 1, filled (0, 1): 0 + 0
        let board = Board::from_ascii(2, "##..");
        assert_eq!(board.penalty(), 1);

        // (0, 3): 1, (1, 3): 10 + 1
        let board = Board::from_ascii(
            2,
            r"
            ...#
            ...#
            ",
        );
        assert_eq!(board.penalty(), 12);
    }

    #[test]
    fn test_penalty_hole_depth() {
        // Column 1 has a hole at row 0 under a top at row 2: (2 - 0) * 7.
        // Column 1 also has a hole at row 1: (2 - 1) * 7.
        let board = Board::from_ascii(
            3,
            r"
            .#.
            ...
            #..
            ",
        );
        // holes: 14 + 7, filled (2, 1): 20 + 0, filled (0, 0): 0 + 1
        assert_eq!(board.penalty(), 42);
    }

    #[test]
    fn test_penalty_ignores_empty_cells_above_column_top() {
        let board = Board::from_ascii(
            3,
            r"
            #..
            #..
            ",
        );
        // filled (0, 0): 1, filled (1, 0): 11; the empty cells of columns 1 and 2 are free.
        assert_eq!(board.penalty(), 12);
    }
}
