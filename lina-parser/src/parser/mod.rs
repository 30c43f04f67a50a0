pub mod error;

use crate::tokenizer::{first_token, Token, TokenKind};
use error::{ExpectedEof, UnexpectedEof};
use lina_error::{Error, ErrorKind};
use std::ops::Range;

/// A saved position of a [`Parser`], used to backtrack after speculative parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// A scanning cursor over a formula.
///
/// The cursor is a byte offset into the source, and tokens are produced lazily starting from it.
/// This means the cursor can be moved to any token boundary, or to any character boundary inside
/// an identifier, and scanning will resume from there. Parsers built on top of this type use
/// [`Parser::checkpoint`] and [`Parser::restore`] for speculative lookahead, and
/// [`Parser::seek`] to hand part of an already-scanned token back to the input.
///
/// Whitespace is insignificant: every method that inspects or consumes a token skips whitespace
/// first.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The source being parsed.
    source: &'source str,

    /// The byte offset of the **next** character to be scanned.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self { source, cursor: 0 }
    }

    /// Returns the full source being parsed.
    pub fn source(&self) -> &'source str {
        self.source
    }

    /// Returns the byte offset of the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the unscanned remainder of the source, whitespace included.
    pub fn rest(&self) -> &'source str {
        &self.source[self.cursor..]
    }

    /// Saves the current position of the cursor.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.cursor)
    }

    /// Moves the cursor back to a saved position.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.cursor = checkpoint.0;
    }

    /// Moves the cursor to the given byte offset.
    ///
    /// The offset is clamped to the length of the source, and must lie on a character boundary.
    pub fn seek(&mut self, offset: usize) {
        debug_assert!(self.source.is_char_boundary(offset.min(self.source.len())));
        self.cursor = offset.min(self.source.len());
    }

    /// Advances the cursor past any whitespace, as defined by [`TokenKind::Whitespace`].
    pub fn skip_whitespace(&mut self) {
        if let Some(token) = first_token(self.rest()).filter(Token::is_whitespace) {
            self.cursor += token.span.end;
        }
    }

    /// Returns true if only whitespace remains.
    pub fn is_eof(&self) -> bool {
        let mut parser = self.clone();
        parser.skip_whitespace();
        parser.rest().is_empty()
    }

    /// Returns the next token without consuming it. Whitespace is skipped, and the span of the
    /// returned token is relative to the start of the source.
    pub fn peek(&mut self) -> Option<Token<'source>> {
        self.skip_whitespace();
        let start = self.cursor;
        first_token(self.rest()).map(|token| Token {
            span: token.span.start + start..token.span.end + start,
            ..token
        })
    }

    /// Returns the kind of the next token without consuming it.
    pub fn peek_kind(&mut self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    /// Returns the next token, then advances the cursor past it.
    ///
    /// Returns an [`UnexpectedEof`] error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        match self.peek() {
            Some(token) => {
                self.cursor = token.span.end;
                Ok(token)
            },
            None => Err(self.error(UnexpectedEof)),
        }
    }

    /// Consumes the next token if it is of the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> Option<Token<'source>> {
        let token = self.peek()?;
        if token.kind == kind {
            self.cursor = token.span.end;
            Some(token)
        } else {
            None
        }
    }

    /// Returns the next character without consuming it. Whitespace is skipped.
    pub fn peek_char(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.rest().chars().next()
    }

    /// Consumes and returns the next character **without** skipping whitespace.
    pub fn bump_char(&mut self) -> Option<char> {
        let c = self.rest().chars().next()?;
        self.cursor += c.len_utf8();
        Some(c)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.source.len()..self.source.len()
    }

    /// Returns the span of the next token, or the end of the source code if there are no more
    /// tokens. The cursor is not moved (whitespace excluded).
    pub fn span(&self) -> Range<usize> {
        self.clone().peek().map_or(self.eof_span(), |token| token.span)
    }

    /// Creates an error that points at the next token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Ensures that the entire source was consumed. Returns an [`ExpectedEof`] error pointing at
    /// the remaining input otherwise.
    pub fn expect_eof(&mut self) -> Result<(), Error> {
        self.skip_whitespace();
        if self.is_eof() {
            Ok(())
        } else {
            let span = self.cursor..self.source.len();
            let found = self.rest().chars().next().map(String::from).unwrap_or_default();
            Err(Error::new(vec![span], ExpectedEof { found }))
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn peek_does_not_consume() {
        let mut parser = Parser::new("  A + b");
        let token = parser.peek().unwrap();
        assert_eq!(token.kind, TokenKind::Name);
        assert_eq!(token.span, 2..3);
        assert_eq!(parser.peek().unwrap().span, 2..3);
        assert_eq!(parser.next_token().unwrap().lexeme, "A");
        assert_eq!(parser.next_token().unwrap().kind, TokenKind::Add);
        assert_eq!(parser.next_token().unwrap().lexeme, "b");
        assert!(parser.is_eof());
    }

    #[test]
    fn eat_matching_kind_only() {
        let mut parser = Parser::new("(x)");
        assert!(parser.eat(TokenKind::CloseParen).is_none());
        assert!(parser.eat(TokenKind::OpenParen).is_some());
        assert_eq!(parser.eat(TokenKind::Name).unwrap().lexeme, "x");
        assert!(parser.eat(TokenKind::CloseParen).is_some());
        assert!(parser.next_token().unwrap_err().is::<UnexpectedEof>());
    }

    #[test]
    fn checkpoint_and_restore() {
        let mut parser = Parser::new("a b c");
        parser.next_token().unwrap();
        let checkpoint = parser.checkpoint();
        parser.next_token().unwrap();
        parser.next_token().unwrap();
        parser.restore(checkpoint);
        assert_eq!(parser.next_token().unwrap().lexeme, "b");
    }

    #[test]
    fn seek_inside_identifier() {
        let mut parser = Parser::new("Av + 1");
        let name = parser.next_token().unwrap();
        assert_eq!(name.lexeme, "Av");

        // hand the `v` back to the input
        parser.seek(name.span.start + 1);
        let suffix = parser.next_token().unwrap();
        assert_eq!(suffix.lexeme, "v");
        assert_eq!(suffix.span, 1..2);
    }

    #[test]
    fn single_characters() {
        let mut parser = Parser::new("^ Tv");
        assert!(parser.eat(TokenKind::Exp).is_some());
        assert_eq!(parser.peek_char(), Some('T'));
        assert_eq!(parser.bump_char(), Some('T'));
        assert_eq!(parser.next_token().unwrap().lexeme, "v");
    }

    #[test]
    fn unicode_whitespace() {
        let mut parser = Parser::new("\u{A0}x\u{2003}^ 2\u{3000}");
        assert_eq!(parser.next_token().unwrap().lexeme, "x");
        assert_eq!(parser.peek_char(), Some('^'));
        assert!(parser.eat(TokenKind::Exp).is_some());
        assert_eq!(parser.next_token().unwrap().lexeme, "2");
        assert!(parser.is_eof());
        assert!(parser.expect_eof().is_ok());
    }

    #[test]
    fn trailing_input() {
        let mut parser = Parser::new("x )");
        parser.next_token().unwrap();
        let err = parser.expect_eof().unwrap_err();
        assert_eq!(err.spans, vec![2..3]);
        assert_eq!(err.downcast_ref::<ExpectedEof>().unwrap().found, ")");

        let mut parser = Parser::new("x   ");
        parser.next_token().unwrap();
        assert!(parser.expect_eof().is_ok());
    }
}
