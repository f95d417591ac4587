use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{BoardError, RowError};

use super::{connectivity::count_components, shape::Shape};

/// Widest supported board: one `u64` word per row.
pub const MAX_BOARD_WIDTH: usize = 64;

/// Single row of a [`Board`], stored as a bitmask.
///
/// Bit `x` (LSB first) is set when the cell in column `x` is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BitRow {
    bits: u64,
}

impl BitRow {
    pub const EMPTY: Self = Self { bits: 0 };

    #[inline]
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Checks if the cell at column `x` is filled.
    #[inline]
    #[must_use]
    pub fn is_cell_filled(self, x: usize) -> bool {
        x < MAX_BOARD_WIDTH && (self.bits >> x) & 1 != 0
    }

    /// Number of filled cells in the row.
    #[inline]
    #[must_use]
    pub fn filled_count(self) -> u32 {
        self.bits.count_ones()
    }

    /// Checks if any cell in the given mask (shifted by `x0`) is filled.
    #[inline]
    fn is_any_cell_filled(self, x0: usize, mask: u64) -> bool {
        (self.bits & (mask << x0)) != 0
    }

    /// Sets cells in the given mask (shifted by `x0`) as filled.
    #[inline]
    fn fill_cells(&mut self, x0: usize, mask: u64) {
        self.bits |= mask << x0;
    }

    /// Iterates over the first `width` cells of the row, returning their filled status.
    pub fn iter_cells(self, width: usize) -> impl Iterator<Item = bool> {
        (0..width).map(move |x| self.is_cell_filled(x))
    }
}

/// The rectangular cell grid that pieces are stacked on.
///
/// Row 0 is the floor and row `height - 1` the top; column 0 is the left edge. Each row
/// is a [`BitRow`], so copying a board is a single vector clone, which keeps the
/// per-placement snapshots used by the solver cheap.
///
/// Every public mutator leaves the board *tidy*: no row is completely filled when
/// control returns to the caller.
///
/// # Example
///
/// ```
/// use tetrofit_engine::Board;
///
/// let mut board = Board::new(3, 4).unwrap();
/// board.add_seed_row("* *").unwrap();
///
/// let single = "*".parse().unwrap();
/// assert!(board.is_placement_legal(&single, 0, 1));
/// assert!(!board.is_placement_legal(&single, 2, 1));
///
/// let cleared = board.apply_placement(&single, 0, 1);
/// assert_eq!(cleared, 1);
/// assert_eq!(board.to_string(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    full_mask: u64,
    rows: Vec<BitRow>,
}

impl Board {
    /// Creates an empty `width × height` board.
    ///
    /// Fails when either dimension is 0 or `width` exceeds [`MAX_BOARD_WIDTH`].
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        if width == 0 || height == 0 || width > MAX_BOARD_WIDTH {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        let full_mask = if width == MAX_BOARD_WIDTH {
            u64::MAX
        } else {
            (1 << width) - 1
        };
        Ok(Self {
            width,
            height,
            full_mask,
            rows: vec![BitRow::EMPTY; height],
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns row `y` (0 is the floor).
    #[must_use]
    pub fn row(&self, y: usize) -> BitRow {
        self.rows[y]
    }

    /// Iterates over the rows from the floor upwards.
    pub fn rows(&self) -> impl Iterator<Item = BitRow> + '_ {
        self.rows.iter().copied()
    }

    #[must_use]
    pub fn is_cell_filled(&self, y: usize, x: usize) -> bool {
        y < self.height && x < self.width && self.rows[y].is_cell_filled(x)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.is_empty())
    }

    fn is_row_full(&self, row: BitRow) -> bool {
        row.bits == self.full_mask
    }

    /// Returns whether no row is completely filled.
    #[must_use]
    pub fn is_tidy(&self) -> bool {
        self.rows.iter().all(|&row| !self.is_row_full(row))
    }

    /// Index of the row just above the highest non-empty row (0 for an empty board).
    #[must_use]
    pub fn first_empty_row(&self) -> usize {
        self.rows
            .iter()
            .rposition(|row| !row.is_empty())
            .map_or(0, |y| y + 1)
    }

    /// Index of the highest filled cell in column `x`, or `None` for an empty column.
    #[must_use]
    pub fn top_row_in_column(&self, x: usize) -> Option<usize> {
        self.rows.iter().rposition(|row| row.is_cell_filled(x))
    }

    /// Index of the cell just above the highest filled cell in column `x`.
    #[must_use]
    pub fn first_empty_row_in_column(&self, x: usize) -> usize {
        self.top_row_in_column(x).map_or(0, |y| y + 1)
    }

    /// Appends a row of obstacles directly above the highest non-empty row.
    ///
    /// `' '` marks an empty cell and any other character a filled one. The row must be
    /// exactly `width` characters long and must be neither empty nor full.
    pub fn add_seed_row(&mut self, pattern: &str) -> Result<(), RowError> {
        let actual = pattern.chars().count();
        if actual != self.width {
            return Err(RowError::WidthMismatch {
                expected: self.width,
                actual,
            });
        }

        let bits = pattern
            .chars()
            .enumerate()
            .filter(|(_, ch)| *ch != ' ')
            .fold(0, |bits, (x, _)| bits | (1 << x));
        let row = BitRow { bits };
        if row.is_empty() {
            return Err(RowError::Empty);
        }
        if self.is_row_full(row) {
            return Err(RowError::Full);
        }

        let y = self.first_empty_row();
        if y >= self.height {
            return Err(RowError::NoRoom {
                height: self.height,
            });
        }
        self.rows[y] = row;
        Ok(())
    }

    /// Checks if `shape` anchored at (`row`, `col`) lies entirely inside the board.
    #[must_use]
    pub fn is_in_bounds(&self, shape: &Shape, row: usize, col: usize) -> bool {
        row.saturating_add(shape.rows()) <= self.height
            && col.saturating_add(shape.cols()) <= self.width
    }

    /// Checks if any filled cell of `shape` overlaps a filled board cell.
    ///
    /// The shape must be in bounds.
    #[must_use]
    pub fn is_colliding(&self, shape: &Shape, row: usize, col: usize) -> bool {
        (0..shape.rows()).any(|r| self.rows[row + r].is_any_cell_filled(col, shape.row_mask(r)))
    }

    /// Checks if some filled cell of `shape` sits exactly on top of its column.
    ///
    /// A cell at column `x` is resting when its row equals the column's first empty row,
    /// which is the floor for an empty column.
    #[must_use]
    pub fn is_resting(&self, shape: &Shape, row: usize, col: usize) -> bool {
        shape
            .filled_cells()
            .any(|(r, c)| row + r == self.first_empty_row_in_column(col + c))
    }

    /// Returns whether placing `shape` with its `(0, 0)` cell at (`row`, `col`) is legal.
    ///
    /// A placement is legal when the shape is in bounds, overlaps nothing, rests on the
    /// floor or on top of a column, and does not increase the number of 4-connected
    /// filled components (the floor counts as a filled row below row 0).
    #[must_use]
    pub fn is_placement_legal(&self, shape: &Shape, row: usize, col: usize) -> bool {
        self.is_placement_legal_with(shape, row, col, || self.component_count())
    }

    /// Same as [`Board::is_placement_legal`], taking the pre-placement component count
    /// lazily so that enumeration can compute it once per board.
    pub(crate) fn is_placement_legal_with<F>(
        &self,
        shape: &Shape,
        row: usize,
        col: usize,
        components_before: F,
    ) -> bool
    where
        F: FnOnce() -> usize,
    {
        if !self.is_in_bounds(shape, row, col)
            || self.is_colliding(shape, row, col)
            || !self.is_resting(shape, row, col)
        {
            return false;
        }
        let mut after = self.clone();
        after.fill_shape(shape, row, col);
        after.component_count() <= components_before()
    }

    /// Sets the filled cells of `shape` without clearing rows.
    ///
    /// # Panics
    ///
    /// Panics if the shape is not in bounds.
    pub(crate) fn fill_shape(&mut self, shape: &Shape, row: usize, col: usize) {
        assert!(self.is_in_bounds(shape, row, col));
        for r in 0..shape.rows() {
            self.rows[row + r].fill_cells(col, shape.row_mask(r));
        }
    }

    /// Stamps `shape` at (`row`, `col`), clears full rows and returns how many were cleared.
    ///
    /// Legality is not checked; see [`Board::is_placement_legal`].
    ///
    /// # Panics
    ///
    /// Panics if the shape is not in bounds.
    pub fn apply_placement(&mut self, shape: &Shape, row: usize, col: usize) -> usize {
        self.fill_shape(shape, row, col);
        self.clear_full_rows()
    }

    /// Clears full rows and returns the number of rows cleared.
    ///
    /// Rows above a cleared row move down; the vacated rows at the top become empty.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut count = 0;
        for y in 0..self.height {
            if self.is_row_full(self.rows[y]) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y - count] = self.rows[y];
            }
        }
        self.rows[self.height - count..].fill(BitRow::EMPTY);
        count
    }

    /// Number of 4-connected filled components, counting the floor as one component.
    #[must_use]
    pub fn component_count(&self) -> usize {
        count_components(self.height, self.width, true, |y, x| {
            self.rows[y].is_cell_filled(x)
        })
    }

    /// Creates a board from ASCII art for testing.
    ///
    /// `'#'` is a filled cell and `'.'` an empty one. Rows are listed from top to bottom
    /// and the last line is row 0; rows above the art are empty. The width is taken from
    /// the art. Full rows are kept as drawn.
    ///
    /// # Panics
    ///
    /// Panics if the art is malformed or does not fit in `height` rows.
    #[must_use]
    pub fn from_ascii(height: usize, art: &str) -> Self {
        let lines: Vec<Vec<char>> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().filter(|c| *c == '#' || *c == '.').collect())
            .collect();
        assert!(!lines.is_empty(), "board art must have at least one row");
        assert!(lines.len() <= height, "board art taller than {height} rows");

        let width = lines[0].len();
        let mut board = Self::new(width, height).unwrap();
        for (i, line) in lines.iter().enumerate() {
            assert_eq!(
                line.len(),
                width,
                "Each row must have exactly {width} cells, got {} at line {i}",
                line.len()
            );
            let y = lines.len() - 1 - i;
            for (x, &ch) in line.iter().enumerate() {
                if ch == '#' {
                    board.rows[y].fill_cells(x, 0b1);
                }
            }
        }
        board
    }

    fn row_string(&self, y: usize) -> String {
        self.rows[y]
            .iter_cells(self.width)
            .map(|filled| if filled { '*' } else { ' ' })
            .collect()
    }
}

/// Renders the board from the top row down to the lowest non-empty row.
///
/// Filled cells are `'*'`, empty cells `' '`; rows are separated by `'\n'` with no
/// trailing newline. Empty rows above the stack are included. An empty board renders
/// as the empty string.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(lowest) = self.rows.iter().position(|row| !row.is_empty()) else {
            return Ok(());
        };
        for y in (lowest..self.height).rev() {
            f.write_str(&self.row_string(y))?;
            if y > lowest {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct BoardRepr {
    width: usize,
    height: usize,
    /// All rows from top to bottom.
    rows: Vec<String>,
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: {"width":3,"height":2,"rows":["   ","* *"]}
        let repr = BoardRepr {
            width: self.width,
            height: self.height,
            rows: (0..self.height).rev().map(|y| self.row_string(y)).collect(),
        };
        repr.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr = BoardRepr::deserialize(deserializer)?;
        let mut board =
            Board::new(repr.width, repr.height).map_err(serde::de::Error::custom)?;
        if repr.rows.len() != repr.height {
            return Err(serde::de::Error::custom(format!(
                "expected {} rows, got {}",
                repr.height,
                repr.rows.len()
            )));
        }

        for (i, line) in repr.rows.iter().enumerate() {
            let y = repr.height - 1 - i;
            let cells: Vec<char> = line.chars().collect();
            if cells.len() != repr.width {
                return Err(serde::de::Error::custom(format!(
                    "row {y} has {} cells, expected {}",
                    cells.len(),
                    repr.width
                )));
            }
            for (x, ch) in cells.into_iter().enumerate() {
                if ch != ' ' {
                    board.rows[y].fill_cells(x, 0b1);
                }
            }
            if board.is_row_full(board.rows[y]) {
                return Err(serde::de::Error::custom(format!("row {y} is full")));
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(s: &str) -> Shape {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(5, 7).unwrap();
        assert_eq!((board.width(), board.height()), (5, 7));
        assert!(board.is_empty());
        assert!(board.is_tidy());
        assert_eq!(board.first_empty_row(), 0);
        for x in 0..5 {
            assert_eq!(board.top_row_in_column(x), None);
            assert_eq!(board.first_empty_row_in_column(x), 0);
        }
        assert_eq!(board.to_string(), "");
    }

    #[test]
    fn test_new_rejects_invalid_dimensions() {
        assert_eq!(
            Board::new(0, 4),
            Err(BoardError::InvalidDimensions {
                width: 0,
                height: 4
            })
        );
        assert_eq!(
            Board::new(4, 0),
            Err(BoardError::InvalidDimensions {
                width: 4,
                height: 0
            })
        );
        assert!(Board::new(MAX_BOARD_WIDTH + 1, 4).is_err());
        assert!(Board::new(MAX_BOARD_WIDTH, 1).is_ok());
        assert!(Board::new(1, 1).is_ok());
    }

    #[test]
    fn test_add_seed_row_stacks_rows() {
        let mut board = Board::new(3, 4).unwrap();
        board.add_seed_row("* *").unwrap();
        board.add_seed_row(" # ").unwrap();
        assert_eq!(board.to_string(), "   \n   \n * \n* *");
        assert_eq!(board.first_empty_row(), 2);
        assert_eq!(board.top_row_in_column(1), Some(1));
        assert_eq!(board.first_empty_row_in_column(0), 1);
    }

    #[test]
    fn test_add_seed_row_rejects_invalid_rows() {
        let mut board = Board::new(3, 2).unwrap();
        assert_eq!(
            board.add_seed_row("* "),
            Err(RowError::WidthMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(board.add_seed_row("   "), Err(RowError::Empty));
        assert_eq!(board.add_seed_row("***"), Err(RowError::Full));
        assert_eq!(board.add_seed_row("x*x"), Err(RowError::Full));
        assert!(board.is_empty());

        board.add_seed_row("** ").unwrap();
        board.add_seed_row(" **").unwrap();
        assert_eq!(
            board.add_seed_row("*  "),
            Err(RowError::NoRoom { height: 2 })
        );
        assert_eq!(board.to_string(), " **\n** ");
    }

    #[test]
    fn test_placement_in_bounds_and_collision() {
        let board = Board::from_ascii(4, "#.#");
        let domino = shape("**");
        assert!(board.is_in_bounds(&domino, 0, 1));
        assert!(!board.is_in_bounds(&domino, 0, 2));
        assert!(!board.is_in_bounds(&shape("*\n*"), 3, 0));
        assert!(board.is_colliding(&domino, 0, 1));
        assert!(!board.is_colliding(&domino, 1, 1));
    }

    #[test]
    fn test_placement_must_rest_on_column_top() {
        let board = Board::from_ascii(
            4,
            r"
            .#.
            #.#
            ",
        );
        let vertical = shape("*\n*");
        // Column 0 top is row 0, so a domino starting at row 2 hovers.
        assert!(!board.is_placement_legal(&vertical, 2, 0));
        // Column 1 top is row 1, so a domino starting at row 2 rests on it.
        assert!(board.is_placement_legal(&vertical, 2, 1));
        // Resting on the floor is legal.
        let single = shape("*");
        assert!(!board.is_placement_legal(&single, 0, 1));
        assert!(board.is_placement_legal(&single, 1, 0));
    }

    #[test]
    fn test_floor_resting_placement_is_legal() {
        let board = Board::from_ascii(3, "#..");
        assert!(board.is_placement_legal(&shape("*"), 0, 2));
        assert!(board.is_placement_legal(&shape("**"), 0, 1));

        let empty = Board::new(2, 2).unwrap();
        assert!(empty.is_placement_legal(&shape("*"), 0, 0));
        assert!(!empty.is_placement_legal(&shape("*"), 1, 0));
    }

    #[test]
    fn test_placement_in_covered_gap_is_not_legal() {
        // Cells (0, 0) and (0, 1) are covered by row 1.
        let board = Board::from_ascii(
            2,
            r"
            ##.
            ..#
            ",
        );
        assert!(!board.is_placement_legal(&shape("**"), 0, 0));
        assert!(!board.is_placement_legal(&shape("*"), 0, 0));
        assert!(board.is_placement_legal(&shape("*"), 1, 2));
    }

    #[test]
    fn test_apply_placement_clears_rows() {
        let mut board = Board::from_ascii(
            4,
            r"
            .###
            .###
            .###
            ",
        );
        let cleared = board.apply_placement(&shape("*\n*\n*\n*"), 0, 0);
        assert_eq!(cleared, 3);
        assert_eq!(board.to_string(), "    \n    \n    \n*   ");
        assert!(board.is_tidy());
    }

    #[test]
    fn test_clear_full_rows_compacts_downward() {
        let mut board = Board::from_ascii(
            5,
            r"
            #..
            ###
            .#.
            ###
            ",
        );
        assert!(!board.is_tidy());
        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(board.to_string(), "   \n   \n   \n*  \n * ");
        assert_eq!(board.clear_full_rows(), 0);
    }

    #[test]
    fn test_clear_full_rows_top_row() {
        let mut board = Board::from_ascii(
            2,
            r"
            ##
            #.
            ",
        );
        assert_eq!(board.clear_full_rows(), 1);
        assert_eq!(board.to_string(), "  \n* ");
    }

    #[test]
    fn test_component_count_includes_floor() {
        assert_eq!(Board::new(3, 3).unwrap().component_count(), 1);
        assert_eq!(Board::from_ascii(3, "#.#").component_count(), 1);

        let board = Board::from_ascii(
            3,
            r"
            .#.
            #.#
            ",
        );
        assert_eq!(board.component_count(), 2);
    }

    #[test]
    fn test_render_full_width_rows() {
        let board = Board::from_ascii(
            4,
            r"
            ...#
            #..#
            ",
        );
        assert_eq!(board.to_string(), "    \n    \n   *\n*  *");
    }

    #[test]
    fn test_render_includes_empty_rows_above_stack() {
        let mut board = Board::new(3, 4).unwrap();
        board.add_seed_row("* *").unwrap();
        assert_eq!(board.to_string(), "   \n   \n   \n* *");

        // A full board has no empty rows to add.
        let board = Board::from_ascii(
            2,
            r"
            .#
            #.
            ",
        );
        assert_eq!(board.to_string(), " *\n* ");
    }

    #[test]
    fn test_render_stops_at_lowest_non_empty_row() {
        let board = Board::from_ascii(
            4,
            r"
            .#.
            ...
            ...
            ",
        );
        assert_eq!(board.to_string(), "   \n * ");
    }

    #[test]
    fn test_board_serialization() {
        let board = Board::from_ascii(
            3,
            r"
            .#.
            #.#
            ",
        );
        let serialized = serde_json::to_string(&board).unwrap();
        assert_eq!(
            serialized,
            r#"{"width":3,"height":3,"rows":["   "," * ","* *"]}"#
        );
        let deserialized: Board = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, board);
    }

    #[test]
    fn test_board_deserialization_error_cases() {
        // Wrong row count
        assert!(serde_json::from_str::<Board>(r#"{"width":2,"height":2,"rows":["  "]}"#).is_err());
        // Wrong row width
        assert!(
            serde_json::from_str::<Board>(r#"{"width":2,"height":1,"rows":["   "]}"#).is_err()
        );
        // Full row
        assert!(serde_json::from_str::<Board>(r#"{"width":2,"height":1,"rows":["**"]}"#).is_err());
        // Invalid dimensions
        assert!(serde_json::from_str::<Board>(r#"{"width":0,"height":1,"rows":[""]}"#).is_err());
    }
}
