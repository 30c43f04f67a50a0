//! Shape-aware arithmetic on grids of cell expressions.
//!
//! Each operation checks the shapes of its operands, then combines the cells with the functions
//! in [`term`].

pub mod term;

use crate::{error, grid::Grid};
use lina_error::Error;
use std::ops::Range;

/// An error produced by a grid operation.
///
/// The operations have no access to the source of the formula, so the error is converted into an
/// [`Error`] pointing at the operands by the caller, using [`AlgebraError::into_error`].
#[derive(Debug, Clone, PartialEq)]
pub enum AlgebraError {
    /// The shapes of the operands are incompatible.
    DimensionMismatch(error::DimensionMismatch),

    /// The divisor is not `1x1`.
    NonScalarDivisor(error::NonScalarDivisor),

    /// The divisor is zero.
    DivisionByZero(error::DivisionByZero),
}

impl AlgebraError {
    /// Converts the error into an [`Error`] with the given spans. The spans should be the left
    /// operand, the operator, and the right operand, in that order.
    pub fn into_error(self, spans: Vec<Range<usize>>) -> Error {
        match self {
            Self::DimensionMismatch(e) => Error::new(spans, e),
            Self::NonScalarDivisor(e) => Error::new(spans, e),
            Self::DivisionByZero(e) => Error::new(spans, e),
        }
    }
}

/// Checks that two grids have exactly the same shape.
fn same_shape(op: &'static str, a: &Grid<String>, b: &Grid<String>) -> Result<(), AlgebraError> {
    if a.dims() == b.dims() {
        Ok(())
    } else {
        Err(AlgebraError::DimensionMismatch(error::DimensionMismatch {
            op,
            left: a.dims(),
            right: b.dims(),
        }))
    }
}

/// Returns a grid of zeros with the same shape as the given grid.
pub fn zero_like<T>(a: &Grid<T>) -> Grid<String> {
    a.map(|_| "0".to_string())
}

/// Adds two grids of the same shape.
pub fn add(a: &Grid<String>, b: &Grid<String>) -> Result<Grid<String>, AlgebraError> {
    same_shape("add", a, b)?;
    Ok(Grid::from_fn(a.rows(), a.cols(), |i, j| term::add(&a[(i, j)], &b[(i, j)])))
}

/// Subtracts `b` from `a`, which must have the same shape.
pub fn sub(a: &Grid<String>, b: &Grid<String>) -> Result<Grid<String>, AlgebraError> {
    same_shape("subtract", a, b)?;
    Ok(Grid::from_fn(a.rows(), a.cols(), |i, j| term::sub(&a[(i, j)], &b[(i, j)])))
}

/// Multiplies two grids.
///
/// If either operand is `1x1`, it scales every cell of the other operand. Otherwise, this is the
/// matrix product, and the number of columns of `a` must equal the number of rows of `b`.
pub fn mul(a: &Grid<String>, b: &Grid<String>) -> Result<Grid<String>, AlgebraError> {
    if a.is_scalar() {
        let scalar = &a[(0, 0)];
        return Ok(b.map(|cell| term::mul(scalar, cell)));
    }
    if b.is_scalar() {
        let scalar = &b[(0, 0)];
        return Ok(a.map(|cell| term::mul(scalar, cell)));
    }

    if a.cols() != b.rows() {
        return Err(AlgebraError::DimensionMismatch(error::DimensionMismatch {
            op: "multiply",
            left: a.dims(),
            right: b.dims(),
        }));
    }

    Ok(Grid::from_fn(a.rows(), b.cols(), |i, j| {
        let mut sum = String::new();
        for k in 0..a.cols() {
            let product = term::mul(&a[(i, k)], &b[(k, j)]);
            if term::is_zero(&product) {
                continue;
            }

            if sum.is_empty() {
                sum = product;
            } else if let Some(rest) = product.strip_prefix('-') {
                sum.push_str(" - ");
                sum.push_str(rest);
            } else {
                sum.push_str(" + ");
                sum.push_str(&product);
            }
        }

        if sum.is_empty() {
            "0".to_string()
        } else {
            sum
        }
    }))
}

/// Divides every cell of `a` by the single cell of `b`.
pub fn div(a: &Grid<String>, b: &Grid<String>) -> Result<Grid<String>, AlgebraError> {
    if !b.is_scalar() {
        return Err(AlgebraError::NonScalarDivisor(error::NonScalarDivisor {
            rows: b.rows(),
            cols: b.cols(),
        }));
    }

    let divisor = &b[(0, 0)];
    if term::is_zero(divisor) {
        return Err(AlgebraError::DivisionByZero(error::DivisionByZero));
    }

    Ok(a.map(|cell| term::div(cell, divisor)))
}

/// Negates every cell.
pub fn neg(a: &Grid<String>) -> Grid<String> {
    a.map(|cell| term::neg(cell))
}

/// Returns the transpose.
pub fn transpose(a: &Grid<String>) -> Grid<String> {
    a.transpose()
}
