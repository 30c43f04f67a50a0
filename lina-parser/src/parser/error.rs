//! Syntax errors that can occur while scanning a formula.

use ariadne::Fmt;
use lina_attrs::ErrorKind;
use lina_error::EXPR;

/// The end of the input was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of expression",
    labels = [format!("you might need to add another {} here", "operand".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the input was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected character `{}`", self.found),
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof {
    /// The text that was found instead of the end of the input.
    pub found: String,
}

/// A token was found where an operand was expected.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected character `{}`", self.found),
    labels = ["expected a number, a variable, or a parenthesized expression here"],
)]
pub struct UnexpectedToken {
    /// The lexeme that was found.
    pub found: String,
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing closing parenthesis `)`",
    labels = ["this parenthesis is not closed"],
    help = "add a closing parenthesis `)` somewhere after this",
)]
pub struct UnclosedParenthesis;

/// A run of digits and decimal points is not a valid number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid number `{}`", self.lexeme),
    labels = ["this number"],
    help = "numbers may contain at most one decimal point `.`",
)]
pub struct InvalidNumber {
    /// The raw text of the number.
    pub lexeme: String,
}
