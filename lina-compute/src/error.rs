//! Errors that can occur while evaluating a formula or assigning a variable.

use crate::tensor::MAX_CELLS;
use ariadne::Fmt;
use lina_attrs::ErrorKind;
use lina_error::EXPR;

/// The variable is undefined.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not defined", self.name),
    labels = ["this variable"],
    help = if self.suggestions.is_empty() {
        format!("to define it, type: {} =", (&self.name).fg(EXPR))
    } else if self.suggestions.len() == 1 {
        format!("did you mean the `{}` variable?", (&*self.suggestions[0]).fg(EXPR))
    } else {
        format!(
            "did you mean one of these variables? {}",
            self.suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
)]
pub struct UndefinedVariable {
    /// The name of the variable that was undefined.
    pub name: String,

    /// A list of similarly named variables, if any.
    pub suggestions: Vec<String>,
}

/// The operands of an operation have incompatible dimensions.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot {} these operands", self.op),
    labels = [
        format!("this operand is {}x{}", self.left.0, self.left.1),
        "".to_string(),
        format!("this operand is {}x{}", self.right.0, self.right.1),
    ],
    help = if self.op == "multiply" {
        "the number of columns on the left must equal the number of rows on the right"
    } else {
        "both operands must have the same number of rows and columns"
    }
)]
pub struct DimensionMismatch {
    /// The operation that was attempted, as a verb (`add`, `subtract`, `multiply`).
    pub op: &'static str,

    /// The `(rows, cols)` of the left operand.
    pub left: (usize, usize),

    /// The `(rows, cols)` of the right operand.
    pub right: (usize, usize),
}

/// An exponent other than the transpose `^T` was used.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unsupported exponent `{}`", self.found),
    labels = ["this exponent"],
    help = format!("only the transpose is supported: {}", "A^T".fg(EXPR)),
)]
pub struct UnsupportedExponent {
    /// The text that followed the `^`.
    pub found: String,
}

/// Attempted to divide by something that is not `1x1`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "cannot divide by a matrix or vector",
    labels = [
        "".to_string(),
        "".to_string(),
        format!("this divisor is {}x{}", self.rows, self.cols),
    ],
    help = "the divisor must be a single number or scalar expression",
)]
pub struct NonScalarDivisor {
    /// The number of rows of the divisor.
    pub rows: usize,

    /// The number of columns of the divisor.
    pub cols: usize,
}

/// Attempted to divide by zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "division by zero",
    labels = ["", "", "this divisor is zero"],
)]
pub struct DivisionByZero;

/// A variable with symbolic dimensions has no values to compute with.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` has no values", self.name),
    labels = [format!("this variable is a symbolic {} x {} placeholder", self.rows, self.cols)],
    help = format!(
        "assign it again with numeric dimensions, such as {}",
        format!("{} =", self.name).fg(EXPR),
    ),
)]
pub struct MissingCells {
    /// The name of the variable.
    pub name: String,

    /// The declared number of rows.
    pub rows: String,

    /// The declared number of columns.
    pub cols: String,
}

/// A tensor was declared with zero rows or zero columns, or with more cells than a grid can hold.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot create a {} x {} grid", self.rows, self.cols),
    labels = ["this variable"],
    help = format!(
        "the number of rows and columns must both be at least 1, with at most {} cells in total",
        MAX_CELLS,
    ),
)]
pub struct InvalidDimensions {
    /// The declared number of rows.
    pub rows: usize,

    /// The declared number of columns.
    pub cols: usize,
}
