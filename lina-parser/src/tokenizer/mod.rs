pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns the first token of the input, including whitespace, or [`None`] if the input is
/// empty. The span of the token is relative to the start of `input`.
pub fn first_token(input: &str) -> Option<Token<'_>> {
    let mut lexer = tokenize(input);
    let kind = lexer.next()?.ok()?;
    Some(Token {
        span: lexer.span(),
        kind,
        lexeme: lexer.slice(),
    })
}

/// Returns an owned array containing all of the tokens produced by the tokenizer, whitespace
/// included.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(Ok(kind)) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind,
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "A + 2",
            [
                (TokenKind::Name, "A"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Number, "2"),
            ],
        );
    }

    #[test]
    fn implicit_product() {
        compare_tokens(
            "2x(v_1)^T",
            [
                (TokenKind::Number, "2"),
                (TokenKind::Name, "x"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "v_1"),
                (TokenKind::CloseParen, ")"),
                (TokenKind::Exp, "^"),
                (TokenKind::Name, "T"),
            ],
        );
    }

    #[test]
    fn unicode_operators() {
        compare_tokens(
            "a·b⋅c•d",
            [
                (TokenKind::Name, "a"),
                (TokenKind::Dot, "·"),
                (TokenKind::Name, "b"),
                (TokenKind::Dot, "⋅"),
                (TokenKind::Name, "c"),
                (TokenKind::Dot, "•"),
                (TokenKind::Name, "d"),
            ],
        );
    }

    #[test]
    fn latex_and_symbols() {
        compare_tokens(
            "\\frac{1.50}{x} = $",
            [
                (TokenKind::Backslash, "\\"),
                (TokenKind::Name, "frac"),
                (TokenKind::Symbol, "{"),
                (TokenKind::Number, "1.50"),
                (TokenKind::Symbol, "}"),
                (TokenKind::Symbol, "{"),
                (TokenKind::Name, "x"),
                (TokenKind::Symbol, "}"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Assign, "="),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, "$"),
            ],
        );
    }

    #[test]
    fn unicode_whitespace() {
        compare_tokens(
            "A\u{A0}^\u{2009}T",
            [
                (TokenKind::Name, "A"),
                (TokenKind::Whitespace, "\u{A0}"),
                (TokenKind::Exp, "^"),
                (TokenKind::Whitespace, "\u{2009}"),
                (TokenKind::Name, "T"),
            ],
        );
    }

    #[test]
    fn first_token_of_input() {
        let token = first_token("  x").unwrap();
        assert_eq!(token.kind, TokenKind::Whitespace);
        assert_eq!(token.span, 0..2);
        assert!(first_token("").is_none());
    }
}
