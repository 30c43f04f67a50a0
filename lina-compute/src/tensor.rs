use crate::{error::InvalidDimensions, fmt, grid::Grid};
use lina_error::Error;
use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One declared dimension of a [`Tensor`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Dim {
    /// A non-negative integer, such as `3`.
    Fixed(usize),

    /// Any other text, such as `n` or `m + 1`.
    Symbolic(String),
}

impl Dim {
    /// Parses a dimension. The text is trimmed first; a run of ASCII digits is [`Dim::Fixed`],
    /// anything else is [`Dim::Symbolic`].
    pub fn parse(spec: &str) -> Self {
        let spec = spec.trim();
        if !spec.is_empty() && spec.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = spec.parse() {
                return Dim::Fixed(n);
            }
        }
        Dim::Symbolic(spec.to_string())
    }

    /// Returns the dimension if it is fixed.
    pub fn as_fixed(&self) -> Option<usize> {
        match self {
            Dim::Fixed(n) => Some(*n),
            Dim::Symbolic(_) => None,
        }
    }

    /// Returns true if the dimension is exactly `1`.
    pub fn is_one(&self) -> bool {
        match self {
            Dim::Fixed(n) => *n == 1,
            Dim::Symbolic(spec) => spec == "1",
        }
    }
}

impl Display for Dim {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Dim::Fixed(n) => write!(f, "{}", n),
            Dim::Symbolic(spec) => write!(f, "{}", spec),
        }
    }
}

/// The shape of a [`Tensor`], derived from its declared dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Shape {
    /// Both dimensions are `1`.
    Scalar,

    /// Exactly one dimension is `1`.
    Vector,

    /// Neither dimension is `1`.
    Matrix,
}

impl Shape {
    /// Classifies a pair of declared dimensions.
    pub fn classify(rows: &Dim, cols: &Dim) -> Self {
        match (rows.is_one(), cols.is_one()) {
            (true, true) => Shape::Scalar,
            (true, false) | (false, true) => Shape::Vector,
            (false, false) => Shape::Matrix,
        }
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::Scalar => write!(f, "scalar"),
            Shape::Vector => write!(f, "vector"),
            Shape::Matrix => write!(f, "matrix"),
        }
    }
}

/// The largest number of cells a tensor built from user input may hold.
pub const MAX_CELLS: usize = 10_000;

/// The raw values typed by the user when assigning a variable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TensorInput {
    /// The number of rows, as typed.
    pub rows: String,

    /// The number of columns, as typed.
    pub cols: String,

    /// The cell expressions in row-major order. Missing or blank cells are read as `0`, and extra
    /// cells are ignored.
    pub cells: Vec<String>,
}

/// A named value in a formula: a scalar, vector, or matrix whose cells are expressions.
///
/// A tensor with fixed dimensions always holds a grid of cells of that size. A tensor with
/// symbolic dimensions (such as `n x m`) is a placeholder: it can be rendered, but has no cells to
/// compute with.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tensor {
    rows: Dim,
    cols: Dim,
    cells: Option<Grid<String>>,
}

impl Tensor {
    /// Creates a tensor holding the given cells, with dimensions taken from the grid.
    pub fn from_grid(cells: Grid<String>) -> Self {
        Self {
            rows: Dim::Fixed(cells.rows()),
            cols: Dim::Fixed(cells.cols()),
            cells: Some(cells),
        }
    }

    /// Creates a placeholder without cells.
    pub fn placeholder(rows: Dim, cols: Dim) -> Self {
        Self { rows, cols, cells: None }
    }

    /// Returns the number of cells in a `rows x cols` grid, or [`None`] if either dimension is
    /// zero or the grid would hold more than [`MAX_CELLS`] cells.
    pub fn cell_count(rows: usize, cols: usize) -> Option<usize> {
        rows.checked_mul(cols).filter(|count| (1..=MAX_CELLS).contains(count))
    }

    /// Builds a tensor from raw user input.
    ///
    /// If both dimensions are fixed, a grid of that size is filled from the input cells, each
    /// trimmed. Otherwise a placeholder is created and the cells are ignored. Fixed dimensions of
    /// zero, or too large for [`Tensor::cell_count`], are rejected.
    pub fn from_input(input: TensorInput) -> Result<Self, Error> {
        let rows = Dim::parse(&input.rows);
        let cols = Dim::parse(&input.cols);

        let (Some(num_rows), Some(num_cols)) = (rows.as_fixed(), cols.as_fixed()) else {
            return Ok(Self::placeholder(rows, cols));
        };

        if Self::cell_count(num_rows, num_cols).is_none() {
            return Err(Error::new(Vec::new(), InvalidDimensions {
                rows: num_rows,
                cols: num_cols,
            }));
        }

        let cells = Grid::from_fn(num_rows, num_cols, |i, j| {
            match input.cells.get(i * num_cols + j).map(|cell| cell.trim()) {
                Some(cell) if !cell.is_empty() => cell.to_string(),
                _ => "0".to_string(),
            }
        });
        Ok(Self { rows, cols, cells: Some(cells) })
    }

    /// Returns the declared number of rows.
    pub fn rows(&self) -> &Dim {
        &self.rows
    }

    /// Returns the declared number of columns.
    pub fn cols(&self) -> &Dim {
        &self.cols
    }

    /// Returns the cells, if the tensor has any.
    pub fn cells(&self) -> Option<&Grid<String>> {
        self.cells.as_ref()
    }

    /// Returns true if either dimension is symbolic.
    pub fn is_symbolic(&self) -> bool {
        self.rows.as_fixed().is_none() || self.cols.as_fixed().is_none()
    }

    /// Returns the shape of the tensor.
    pub fn shape(&self) -> Shape {
        Shape::classify(&self.rows, &self.cols)
    }

    /// Returns the numeric value of every cell, or [`None`] if any cell is not a sum of plain
    /// numbers (or there are no cells).
    ///
    /// See [`fmt::parse_sum`] for the accepted cell syntax.
    pub fn numeric_view(&self) -> Option<Grid<f64>> {
        let cells = self.cells.as_ref()?;
        let values = cells.iter()
            .map(|cell| fmt::parse_sum(cell))
            .collect::<Option<Vec<_>>>()?;
        Some(Grid::from_fn(cells.rows(), cells.cols(), |i, j| values[i * cells.cols() + j]))
    }

    /// Returns the tensor with its dimensions and cells swapped.
    pub fn transposed(&self) -> Self {
        Self {
            rows: self.cols.clone(),
            cols: self.rows.clone(),
            cells: self.cells.as_ref().map(Grid::transpose),
        }
    }

    /// Renders the tensor as LaTeX.
    ///
    /// Cells are written in a `pmatrix`. A placeholder is written as an elided `bmatrix`
    /// subscripted with its dimensions.
    pub fn to_latex(&self) -> String {
        match &self.cells {
            Some(cells) => fmt::grid_to_latex(cells),
            None => format!(
                r"\begin{{bmatrix}} \dots \end{{bmatrix}}_{{{} \times {}}}",
                self.rows,
                self.cols,
            ),
        }
    }
}

impl Display for Tensor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_latex())
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_relative_error_msg,
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use pretty_assertions::assert_eq;
    use super::*;

    fn input(rows: &str, cols: &str, cells: &[&str]) -> TensorInput {
        TensorInput {
            rows: rows.to_string(),
            cols: cols.to_string(),
            cells: cells.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn parse_dims() {
        assert_eq!(Dim::parse(" 3 "), Dim::Fixed(3));
        assert_eq!(Dim::parse("n"), Dim::Symbolic("n".to_string()));
        assert_eq!(Dim::parse("-1"), Dim::Symbolic("-1".to_string()));
        assert_eq!(Dim::parse(""), Dim::Symbolic(String::new()));
    }

    #[test]
    fn classify_shapes() {
        let one = Dim::Fixed(1);
        let three = Dim::Fixed(3);
        let n = Dim::Symbolic("n".to_string());
        assert_eq!(Shape::classify(&one, &one), Shape::Scalar);
        assert_eq!(Shape::classify(&three, &one), Shape::Vector);
        assert_eq!(Shape::classify(&one, &n), Shape::Vector);
        assert_eq!(Shape::classify(&n, &three), Shape::Matrix);
    }

    #[test]
    fn fill_cells_from_input() {
        let tensor = Tensor::from_input(input("2", "2", &["1", " x ", ""])).unwrap();
        assert!(!tensor.is_symbolic());
        assert_eq!(tensor.shape(), Shape::Matrix);
        assert_eq!(tensor.to_latex(), r"\begin{pmatrix}1 & x \\ 0 & 0\end{pmatrix}");
    }

    #[test]
    fn symbolic_placeholder() {
        let tensor = Tensor::from_input(input("n", "1", &["ignored"])).unwrap();
        assert!(tensor.is_symbolic());
        assert!(tensor.cells().is_none());
        assert_eq!(tensor.shape(), Shape::Vector);
        assert_eq!(tensor.to_latex(), r"\begin{bmatrix} \dots \end{bmatrix}_{n \times 1}");
        assert_eq!(
            tensor.transposed().to_latex(),
            r"\begin{bmatrix} \dots \end{bmatrix}_{1 \times n}",
        );
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let err = Tensor::from_input(input("0", "3", &[])).unwrap_err();
        assert!(err.is::<InvalidDimensions>());
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        let huge = usize::MAX.to_string();
        let err = Tensor::from_input(input(&huge, &huge, &[])).unwrap_err();
        assert!(err.is::<InvalidDimensions>());

        let err = Tensor::from_input(input("100000", "100000", &[])).unwrap_err();
        assert_eq!(err.downcast_ref::<InvalidDimensions>().unwrap().rows, 100_000);

        assert_eq!(Tensor::cell_count(100, 100), Some(MAX_CELLS));
        assert_eq!(Tensor::cell_count(100, 101), None);
        assert_eq!(Tensor::cell_count(0, 5), None);
    }

    #[test]
    fn numeric_view() {
        let tensor = Tensor::from_input(input("1", "3", &["1 + 2", "2,5", "-4"])).unwrap();
        let view = tensor.numeric_view().unwrap();
        assert_float_relative_eq!(view[(0, 0)], 3.0);
        assert_float_relative_eq!(view[(0, 1)], 2.5);
        assert_float_relative_eq!(view[(0, 2)], -4.0);

        let tensor = Tensor::from_input(input("1", "2", &["1", "x"])).unwrap();
        assert!(tensor.numeric_view().is_none());
    }

    #[test]
    fn transposed_cells() {
        let tensor = Tensor::from_input(input("2", "1", &["a", "b"])).unwrap();
        let transposed = tensor.transposed();
        assert_eq!(transposed.rows(), &Dim::Fixed(1));
        assert_eq!(transposed.to_latex(), r"\begin{pmatrix}a & b\end{pmatrix}");
    }
}
