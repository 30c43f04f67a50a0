use logos::Logos;
use std::ops::Range;

/// The different kinds of tokens that can be produced by the tokenizer.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    /// A run of Unicode whitespace. This is the only definition of whitespace used when scanning
    /// formulas.
    #[regex(r"\s+")]
    Whitespace,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    /// Multiplication written with a middle dot (`·`), dot operator (`⋅`) or bullet (`•`).
    #[token("·")]
    #[token("⋅")]
    #[token("•")]
    Dot,

    #[token("/")]
    Div,

    #[token("^")]
    Exp,

    #[token("=")]
    Assign,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    /// The start of a LaTeX command, such as `\begin` or `\frac`.
    #[token("\\")]
    Backslash,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Name,

    /// A run of digits and decimal points. The run is not guaranteed to be a valid number.
    #[regex(r"[0-9.]+")]
    Number,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }

    /// Returns true if a token of this kind can begin an operand, which is what triggers implicit
    /// multiplication.
    pub fn starts_operand(self) -> bool {
        matches!(self, TokenKind::OpenParen | TokenKind::Name | TokenKind::Number)
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl Token<'_> {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }
}
