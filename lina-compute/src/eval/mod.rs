//! Symbolic evaluation of formulas.
//!
//! The [`Evaluator`] is a recursive descent parser that computes as it parses. Every
//! sub-expression evaluates to a [`Grid`] of cell expressions, which are combined with the
//! functions in [`crate::algebra`]. The grammar is:
//!
//! ```text
//! expr   = term (('+' | '-') term)*
//! term   = factor (('*' | '·' | '/') factor | factor)*
//! factor = '-' factor | power
//! power  = atom ('^' 'T')*
//! atom   = '(' expr ')' | number | identifier
//! ```
//!
//! A factor directly following another factor (`2x`, `A(B + C)`) is an implicit multiplication.

pub mod disambiguate;

use crate::{
    algebra::{self, AlgebraError},
    consts,
    error::{MissingCells, UndefinedVariable, UnsupportedExponent},
    fmt,
    grid::Grid,
    store::VarStore,
    tensor::Tensor,
};
use lina_error::Error;
use lina_parser::{
    parser::{
        error::{InvalidNumber, UnclosedParenthesis, UnexpectedEof, UnexpectedToken},
        Parser,
    },
    tokenizer::{Token, TokenKind},
};
use log::trace;
use std::ops::Range;

/// An evaluated sub-expression, along with the region of the source it came from.
#[derive(Debug, Clone, PartialEq)]
struct Operand {
    grid: Grid<String>,
    span: Range<usize>,
}

/// The signature shared by the binary grid operations.
type BinaryOp = fn(&Grid<String>, &Grid<String>) -> Result<Grid<String>, AlgebraError>;

/// Evaluates a formula against the variables in a [`VarStore`].
#[derive(Debug, Clone)]
pub struct Evaluator<'a> {
    store: &'a VarStore,
    parser: Parser<'a>,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator for the given formula.
    pub fn new(store: &'a VarStore, source: &'a str) -> Self {
        Self { store, parser: Parser::new(source) }
    }

    /// Evaluates the whole formula.
    pub fn evaluate(mut self) -> Result<Grid<String>, Error> {
        trace!("evaluating `{}`", self.parser.source());
        let result = self.expr()?;
        self.parser.expect_eof()?;
        trace!("`{}` evaluated to {:?}", self.parser.source(), result.grid);
        Ok(result.grid)
    }

    /// Applies a binary operation, pointing any error at both operands and the operator.
    fn binary(
        op: BinaryOp,
        left: Operand,
        op_span: Range<usize>,
        right: Operand,
    ) -> Result<Operand, Error> {
        let span = left.span.start..right.span.end;
        let grid = op(&left.grid, &right.grid)
            .map_err(|err| err.into_error(vec![left.span, op_span, right.span]))?;
        Ok(Operand { grid, span })
    }

    fn expr(&mut self) -> Result<Operand, Error> {
        let mut left = self.term()?;
        loop {
            let op: BinaryOp = match self.parser.peek_kind() {
                Some(TokenKind::Add) => algebra::add,
                Some(TokenKind::Sub) => algebra::sub,
                _ => return Ok(left),
            };
            let op_span = self.parser.next_token()?.span;
            let right = self.term()?;
            left = Self::binary(op, left, op_span, right)?;
        }
    }

    fn term(&mut self) -> Result<Operand, Error> {
        let mut left = self.factor()?;
        loop {
            let op: BinaryOp = match self.parser.peek_kind() {
                Some(TokenKind::Mul | TokenKind::Dot) => algebra::mul,
                Some(TokenKind::Div) => algebra::div,
                _ => {
                    // implicit multiplication, only if another operand starts here
                    let checkpoint = self.parser.checkpoint();
                    if !self.parser.peek_kind().is_some_and(TokenKind::starts_operand) {
                        self.parser.restore(checkpoint);
                        return Ok(left);
                    }
                    let right = self.factor()?;
                    let op_span = left.span.end..right.span.start;
                    left = Self::binary(algebra::mul, left, op_span, right)?;
                    continue;
                },
            };

            let op_span = self.parser.next_token()?.span;
            let right = self.factor()?;
            left = Self::binary(op, left, op_span, right)?;
        }
    }

    fn factor(&mut self) -> Result<Operand, Error> {
        match self.parser.eat(TokenKind::Sub) {
            Some(minus) => {
                let operand = self.factor()?;
                Ok(Operand {
                    grid: algebra::neg(&operand.grid),
                    span: minus.span.start..operand.span.end,
                })
            },
            None => self.power(),
        }
    }

    fn power(&mut self) -> Result<Operand, Error> {
        let mut base = self.atom()?;
        while self.parser.eat(TokenKind::Exp).is_some() {
            match self.parser.peek_char() {
                Some('T' | 't') => {
                    self.parser.bump_char();
                    base = Operand {
                        grid: algebra::transpose(&base.grid),
                        span: base.span.start..self.parser.cursor(),
                    };
                },
                Some(_) => {
                    let span = self.parser.span();
                    let found = self.parser.source()[span.clone()].to_string();
                    return Err(Error::new(vec![span], UnsupportedExponent { found }));
                },
                None => return Err(self.parser.error(UnexpectedEof)),
            }
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Operand, Error> {
        let token = self.parser.next_token()?;
        match token.kind {
            TokenKind::OpenParen => {
                let inner = self.expr()?;
                match self.parser.eat(TokenKind::CloseParen) {
                    Some(close) => Ok(Operand {
                        grid: inner.grid,
                        span: token.span.start..close.span.end,
                    }),
                    None => Err(Error::new(vec![token.span], UnclosedParenthesis)),
                }
            },
            TokenKind::Number => match fmt::parse_decimal(token.lexeme) {
                Some(value) => Ok(Operand {
                    grid: Grid::scalar(fmt::format_number(value)),
                    span: token.span,
                }),
                None => Err(Error::new(vec![token.span], InvalidNumber {
                    lexeme: token.lexeme.to_string(),
                })),
            },
            TokenKind::Name => self.identifier(token),
            _ => Err(Error::new(vec![token.span], UnexpectedToken {
                found: token.lexeme.to_string(),
            })),
        }
    }

    /// Resolves an identifier: a variable, two variables written together, or a constant.
    fn identifier(&mut self, token: Token<'a>) -> Result<Operand, Error> {
        let name = token.lexeme;
        if let Some(tensor) = self.store.get(name) {
            return Self::cells(name, tensor, token.span);
        }

        if let Some(split) = disambiguate::split(self.store, name) {
            // hand the suffix back to the input, where it becomes the next factor
            let suffix_start = token.span.start + split.at;
            self.parser.seek(suffix_start);
            return Self::cells(split.prefix, split.value, token.span.start..suffix_start);
        }

        if let Some(value) = consts::constant(name) {
            return Ok(Operand { grid: Grid::scalar(value.to_string()), span: token.span });
        }

        Err(Error::new(vec![token.span], UndefinedVariable {
            name: name.to_string(),
            suggestions: self.store.similar(name).into_iter().map(String::from).collect(),
        }))
    }

    /// Returns the cells of a variable, or an error if it is a placeholder without any.
    fn cells(name: &str, tensor: &Tensor, span: Range<usize>) -> Result<Operand, Error> {
        match tensor.cells() {
            Some(grid) => Ok(Operand { grid: grid.clone(), span }),
            None => Err(Error::new(vec![span], MissingCells {
                name: name.to_string(),
                rows: tensor.rows().to_string(),
                cols: tensor.cols().to_string(),
            })),
        }
    }
}

/// Evaluates a formula against the variables in the given store.
pub fn evaluate(store: &VarStore, source: &str) -> Result<Grid<String>, Error> {
    Evaluator::new(store, source).evaluate()
}

#[cfg(test)]
mod tests {
    use crate::error::{DimensionMismatch, DivisionByZero, NonScalarDivisor};
    use lina_parser::parser::error::ExpectedEof;
    use pretty_assertions::assert_eq;
    use super::*;

    fn grid(rows: &[&[&str]]) -> Grid<String> {
        Grid::from_rows(
            rows.iter()
                .map(|row| row.iter().map(ToString::to_string).collect())
                .collect()
        ).unwrap()
    }

    fn store(vars: &[(&str, &[&[&str]])]) -> VarStore {
        let mut store = VarStore::new();
        for (name, rows) in vars {
            store.save(*name, Tensor::from_grid(grid(rows)));
        }
        store
    }

    #[test]
    fn numbers() {
        let store = VarStore::new();
        assert_eq!(evaluate(&store, "2+3").unwrap(), grid(&[&["5"]]));
        assert_eq!(evaluate(&store, "2 * (3 - 5)").unwrap(), grid(&[&["-4"]]));
        assert_eq!(evaluate(&store, "1/4").unwrap(), grid(&[&["0.25"]]));
        assert_eq!(evaluate(&store, "2.50").unwrap(), grid(&[&["2.5"]]));
        assert_eq!(evaluate(&store, "--3").unwrap(), grid(&[&["3"]]));
    }

    #[test]
    fn division_is_left_associative() {
        let store = VarStore::new();
        assert_eq!(evaluate(&store, "8 / 2 / 2").unwrap(), grid(&[&["2"]]));
        assert_eq!(evaluate(&store, "8 / 2 * 2").unwrap(), grid(&[&["8"]]));
    }

    #[test]
    fn undefined_variable() {
        let store = VarStore::new();
        let err = evaluate(&store, "2*x").unwrap_err();
        assert_eq!(err.spans, vec![2..3]);
        assert_eq!(err.downcast_ref::<UndefinedVariable>(), Some(&UndefinedVariable {
            name: "x".to_string(),
            suggestions: vec![],
        }));
    }

    #[test]
    fn suggestions_for_undefined_variable() {
        let store = store(&[("alpha", &[&["1"]])]);
        let err = evaluate(&store, "alpa").unwrap_err();
        let kind = err.downcast_ref::<UndefinedVariable>().unwrap();
        assert_eq!(kind.suggestions, vec!["alpha".to_string()]);
    }

    #[test]
    fn matrix_vector_product() {
        let store = store(&[
            ("A", &[&["1", "2"], &["3", "4"]]),
            ("v", &[&["x"], &["y"]]),
        ]);
        assert_eq!(evaluate(&store, "A v").unwrap(), grid(&[&["x + 2y"], &["3x + 4y"]]));
        assert_eq!(evaluate(&store, "A·v").unwrap(), evaluate(&store, "A*v").unwrap());
        assert_eq!(evaluate(&store, "v^T A").unwrap(), grid(&[&["x + 3y", "2x + 4y"]]));
    }

    #[test]
    fn disambiguation() {
        let store = store(&[("a", &[&["1"]]), ("v", &[&["2"], &["3"]])]);
        assert_eq!(evaluate(&store, "av").unwrap(), grid(&[&["2"], &["3"]]));
        assert_eq!(evaluate(&store, "2av + v").unwrap(), grid(&[&["6"], &["9"]]));
    }

    #[test]
    fn transpose() {
        let store = store(&[("A", &[&["1", "x"]])]);
        assert_eq!(evaluate(&store, "A^T").unwrap(), grid(&[&["1"], &["x"]]));
        assert_eq!(evaluate(&store, "A^t^T").unwrap(), grid(&[&["1", "x"]]));
        assert_eq!(evaluate(&store, "(A^T)^T").unwrap(), grid(&[&["1", "x"]]));
    }

    #[test]
    fn unsupported_exponent() {
        let store = store(&[("A", &[&["1"]])]);
        let err = evaluate(&store, "A^2").unwrap_err();
        assert_eq!(err.spans, vec![2..3]);
        assert_eq!(err.downcast_ref::<UnsupportedExponent>().unwrap().found, "2");

        assert!(evaluate(&store, "A^").unwrap_err().is::<UnexpectedEof>());
    }

    #[test]
    fn constants() {
        let store = VarStore::new();
        assert_eq!(evaluate(&store, "2pi").unwrap(), grid(&[&[r"2\pi"]]));
        assert_eq!(evaluate(&store, "E").unwrap(), grid(&[&["e"]]));
    }

    #[test]
    fn variables_shadow_constants() {
        let store = store(&[("e", &[&["5"]])]);
        assert_eq!(evaluate(&store, "e + 1").unwrap(), grid(&[&["6"]]));
    }

    #[test]
    fn dimension_mismatch() {
        let store = store(&[
            ("A", &[&["1", "2"], &["3", "4"]]),
            ("b", &[&["1", "2"]]),
        ]);
        let err = evaluate(&store, "A + b").unwrap_err();
        assert_eq!(err.spans, vec![0..1, 2..3, 4..5]);
        assert_eq!(err.downcast_ref::<DimensionMismatch>(), Some(&DimensionMismatch {
            op: "add",
            left: (2, 2),
            right: (1, 2),
        }));

        assert!(evaluate(&store, "A b").unwrap_err().is::<DimensionMismatch>());
    }

    #[test]
    fn division_errors() {
        let store = store(&[("A", &[&["1", "2"]])]);
        assert!(evaluate(&store, "A / 0").unwrap_err().is::<DivisionByZero>());
        assert!(evaluate(&store, "A / 0.0").unwrap_err().is::<DivisionByZero>());
        assert!(evaluate(&store, "1 / A").unwrap_err().is::<NonScalarDivisor>());
    }

    #[test]
    fn placeholder_has_no_cells() {
        let mut store = VarStore::new();
        store.save("M", Tensor::from_input(crate::tensor::TensorInput {
            rows: "n".to_string(),
            cols: "n".to_string(),
            cells: vec![],
        }).unwrap());
        let err = evaluate(&store, "2M").unwrap_err();
        assert_eq!(err.spans, vec![1..2]);
        assert!(err.is::<MissingCells>());
    }

    #[test]
    fn syntax_errors() {
        let store = store(&[("x", &[&["1"]])]);
        assert!(evaluate(&store, "(x + 1").unwrap_err().is::<UnclosedParenthesis>());
        assert!(evaluate(&store, "x )").unwrap_err().is::<ExpectedEof>());
        assert!(evaluate(&store, "x +").unwrap_err().is::<UnexpectedEof>());
        assert!(evaluate(&store, "x + *").unwrap_err().is::<UnexpectedToken>());
        assert!(evaluate(&store, "1.2.3").unwrap_err().is::<InvalidNumber>());
        assert!(evaluate(&store, "").unwrap_err().is::<UnexpectedEof>());
    }
}
