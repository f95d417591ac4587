use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::ShapeError;

use super::connectivity::count_components;

/// A well-formed polyomino bitmap.
///
/// A `Shape` is a `rows × cols` grid of cells where every row and every column contains
/// at least one filled cell and the filled cells form a single 4-connected component.
/// Both constructors ([`Shape::from_rows`] and [`FromStr`]) enforce these rules, so any
/// `Shape` value (and any rotation of it) is valid.
///
/// # Coordinate System
///
/// - Bitmap row 0 is the first row of the input (the first line of a piece string)
/// - When placed, bitmap cell `(r, c)` lands on board cell `(anchor_row + r, anchor_col + c)`,
///   so bitmap row 0 sits lowest on the board
///
/// # Example
///
/// ```
/// use tetrofit_engine::Shape;
///
/// let shape: Shape = "**\n*".parse().unwrap();
/// assert_eq!((shape.rows(), shape.cols()), (2, 2));
/// assert!(shape.is_filled(1, 0));
/// assert!(!shape.is_filled(1, 1));
///
/// let rotated = shape.rotated_clockwise();
/// assert_eq!(rotated.to_string(), "**\n *");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Shape {
    /// Builds a shape from rows of cells, padding short rows with empty cells.
    pub fn from_rows<R>(rows: R) -> Result<Self, ShapeError>
    where
        R: IntoIterator<Item = Vec<bool>>,
    {
        let rows: Vec<Vec<bool>> = rows.into_iter().collect();
        let num_rows = rows.len();
        let num_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        if num_rows == 0 || num_cols == 0 {
            return Err(ShapeError::Blank);
        }

        let mut cells = vec![false; num_rows * num_cols];
        for (r, row) in rows.iter().enumerate() {
            cells[r * num_cols..][..row.len()].copy_from_slice(row);
        }

        let shape = Self {
            rows: num_rows,
            cols: num_cols,
            cells,
        };
        shape.validate()?;
        Ok(shape)
    }

    fn validate(&self) -> Result<(), ShapeError> {
        if !self.cells.contains(&true) {
            return Err(ShapeError::Blank);
        }
        if let Some(row) = (0..self.rows).find(|&r| (0..self.cols).all(|c| !self.is_filled(r, c)))
        {
            return Err(ShapeError::EmptyRow { row });
        }
        if let Some(col) = (0..self.cols).find(|&c| (0..self.rows).all(|r| !self.is_filled(r, c)))
        {
            return Err(ShapeError::EmptyColumn { col });
        }
        let components = count_components(self.rows, self.cols, false, |r, c| self.is_filled(r, c));
        if components != 1 {
            return Err(ShapeError::Disconnected { components });
        }
        Ok(())
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns whether the cell at bitmap row `r`, column `c` is filled.
    ///
    /// Out-of-range coordinates are reported as empty.
    #[must_use]
    pub fn is_filled(&self, r: usize, c: usize) -> bool {
        r < self.rows && c < self.cols && self.cells[r * self.cols + c]
    }

    /// Number of filled cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Iterates over the `(row, col)` coordinates of filled cells in row-major order.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows).flat_map(move |r| {
            (0..self.cols).filter_map(move |c| self.is_filled(r, c).then_some((r, c)))
        })
    }

    /// Returns bitmap row `r` as a bit mask (bit `c` set for a filled column `c`).
    ///
    /// Only meaningful for shapes at most 64 columns wide; the board only asks for masks
    /// of shapes that fit inside it.
    #[must_use]
    pub(crate) fn row_mask(&self, r: usize) -> u64 {
        (0..self.cols.min(64))
            .filter(|&c| self.is_filled(r, c))
            .fold(0, |mask, c| mask | (1 << c))
    }

    /// Returns whether this shape fits inside a `width × height` board.
    #[must_use]
    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        self.cols <= width && self.rows <= height
    }

    /// Rotates the shape 90° clockwise.
    ///
    /// An `h × w` bitmap becomes `w × h`, with the cell at `(r, c)` moving to
    /// `(c, h - 1 - r)`.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        let (h, w) = (self.rows, self.cols);
        let mut cells = vec![false; h * w];
        for (r, c) in self.filled_cells() {
            let (nr, nc) = (c, h - 1 - r);
            cells[nr * h + nc] = true;
        }
        Self {
            rows: w,
            cols: h,
            cells,
        }
    }

    /// Returns the primary bitmap followed by its distinct clockwise rotations.
    ///
    /// Rotations bit-equal to an earlier one are skipped, so the result holds one, two
    /// or four shapes.
    #[must_use]
    pub fn distinct_rotations(&self) -> ArrayVec<Self, 4> {
        let mut rotations = ArrayVec::new();
        rotations.push(self.clone());
        let mut prev = self.clone();
        for _ in 0..3 {
            let rotated = prev.rotated_clockwise();
            if !rotations.contains(&rotated) {
                rotations.push(rotated.clone());
            }
            prev = rotated;
        }
        rotations
    }
}

/// Parses the piece-string format.
///
/// Rows are separated by line breaks; within a row `' '` is empty and any other
/// character is filled. Rows made only of whitespace are skipped, short rows are padded
/// with empty cells on the right, and a trailing line break is allowed.
impl FromStr for Shape {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.chars().map(|ch| ch != ' ').collect::<Vec<_>>());
        Self::from_rows(rows)
    }
}

/// Formats the shape in piece-string format using `'*'` for filled cells.
impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            if r > 0 {
                writeln!(f)?;
            }
            let line: String = (0..self.cols)
                .map(|c| if self.is_filled(r, c) { '*' } else { ' ' })
                .collect();
            f.write_str(line.trim_end())?;
        }
        Ok(())
    }
}

impl Serialize for Shape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: piece string, e.g. "**\n*"
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Shape {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid shape {s:?}: {e}")))
    }
}
