use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rectangular grid of values, stored in row-major order.
///
/// A grid always has at least one row and one column. A `1 × 1` grid is a *scalar*, and is the
/// shape of every number literal in a formula.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Grid<T> {
    /// Creates a grid from a list of rows.
    ///
    /// Returns [`None`] if there are no rows, if the rows are empty, or if the rows have
    /// different lengths.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Option<Self> {
        let cols = rows.first()?.len();
        if cols == 0 || rows.iter().any(|row| row.len() != cols) {
            return None;
        }

        let num_rows = rows.len();
        Some(Self {
            rows: num_rows,
            cols,
            data: rows.into_iter().flatten().collect(),
        })
    }

    /// Creates a `rows × cols` grid, where the value at each position is computed by `f`.
    ///
    /// Both dimensions are raised to at least one.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let (rows, cols) = (rows.max(1), cols.max(1));
        let data = (0..rows)
            .flat_map(|i| (0..cols).map(move |j| (i, j)))
            .map(|(i, j)| f(i, j))
            .collect();
        Self { rows, cols, data }
    }

    /// Creates a `1 × 1` grid holding the given value.
    pub fn scalar(value: T) -> Self {
        Self { rows: 1, cols: 1, data: vec![value] }
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the `(rows, cols)` pair.
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns true if the grid is `1 × 1`.
    pub fn is_scalar(&self) -> bool {
        self.rows == 1 && self.cols == 1
    }

    /// Returns the value at the given position, or [`None`] if it is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Returns an iterator over the rows of the grid.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks(self.cols)
    }

    /// Returns an iterator over every value in the grid, row by row.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Applies `f` to every value, producing a grid of the same shape.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Consumes the grid, returning its rows.
    pub fn into_rows(self) -> Vec<Vec<T>> {
        let cols = self.cols;
        let mut data = self.data.into_iter();
        (0..self.rows)
            .map(|_| data.by_ref().take(cols).collect())
            .collect()
    }
}

impl<T: Clone> Grid<T> {
    /// Returns the transpose of the grid.
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |i, j| self[(j, i)].clone())
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[row * self.cols + col]
    }
}
