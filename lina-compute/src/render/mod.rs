//! Rendering of formulas as LaTeX.
//!
//! The [`Renderer`] parses a formula with the same grammar as the evaluator, with a few additions
//! for presentation: `=` may chain expressions, Greek letters and function names are recognized,
//! and LaTeX blocks such as `\frac{1}{2}` are copied through unchanged. Instead of computing a
//! value, it writes the formula back out as markup, asking a [`Resolve`] strategy how to write
//! each identifier.

pub mod resolve;
pub mod transpose;

use crate::{consts, fmt, options::RenderOptions, store::VarStore};
use lina_error::Error;
use lina_parser::{
    parser::{
        error::{UnclosedParenthesis, UnexpectedToken},
        Parser,
    },
    tokenizer::TokenKind,
};
pub use resolve::{Colorize, Expand, Resolve};

/// The markup placed between implicitly or explicitly multiplied factors.
const CDOT: &str = r" \cdot ";

/// Renders a formula as LaTeX, resolving identifiers with `R`.
#[derive(Debug, Clone)]
pub struct Renderer<'a, R> {
    parser: Parser<'a>,
    resolver: R,
}

impl<'a, R: Resolve> Renderer<'a, R> {
    /// Creates a renderer for the given formula.
    pub fn new(source: &'a str, resolver: R) -> Self {
        Self { parser: Parser::new(source), resolver }
    }

    /// Renders the whole formula.
    pub fn render(mut self) -> Result<String, Error> {
        let output = self.expr()?;
        self.parser.expect_eof()?;
        Ok(output)
    }

    fn expr(&mut self) -> Result<String, Error> {
        let mut output = self.term()?;
        loop {
            let op = match self.parser.peek_kind() {
                Some(TokenKind::Add) => " + ",
                Some(TokenKind::Sub) => " - ",
                Some(TokenKind::Assign) => {
                    self.parser.next_token()?;
                    let rhs = self.expr()?;
                    return Ok(format!("{} = {}", output, rhs));
                },
                _ => return Ok(output),
            };
            self.parser.next_token()?;
            output.push_str(op);
            output.push_str(&self.term()?);
        }
    }

    fn term(&mut self) -> Result<String, Error> {
        let mut output = self.factor()?;
        loop {
            if self.parser.eat(TokenKind::Mul).is_none() {
                let checkpoint = self.parser.checkpoint();
                let implicit = self.parser.peek_kind()
                    .is_some_and(|kind| kind.starts_operand() || kind == TokenKind::Backslash);
                if !implicit {
                    self.parser.restore(checkpoint);
                    return Ok(output);
                }
            }

            output.push_str(CDOT);
            output.push_str(&self.factor()?);
        }
    }

    fn factor(&mut self) -> Result<String, Error> {
        if self.parser.eat(TokenKind::Sub).is_some() {
            return Ok(format!("-{}", self.factor()?));
        }

        let mut output = self.power()?;
        while self.parser.eat(TokenKind::Div).is_some() {
            let denominator = self.power()?;
            output = format!(r"\frac{{{}}}{{{}}}", output, denominator);
        }
        Ok(output)
    }

    fn power(&mut self) -> Result<String, Error> {
        let base = self.atom()?;
        if self.parser.eat(TokenKind::Exp).is_some() {
            let exponent = self.power()?;
            Ok(format!("{{{}}}^{{{}}}", base, exponent))
        } else {
            Ok(base)
        }
    }

    fn atom(&mut self) -> Result<String, Error> {
        let token = self.parser.next_token()?;
        match token.kind {
            TokenKind::Backslash => Ok(self.latex_block(token.span.start)),
            TokenKind::OpenParen => {
                let inner = self.expr()?;
                if self.parser.eat(TokenKind::CloseParen).is_none() {
                    return Err(Error::new(vec![token.span], UnclosedParenthesis));
                }
                Ok(format!(r"\left({}\right)", inner))
            },
            TokenKind::Number => Ok(fmt::tidy_number(token.lexeme)),
            TokenKind::Name => Ok(self.identifier(token.lexeme)),
            _ => Err(Error::new(vec![token.span], UnexpectedToken {
                found: token.lexeme.to_string(),
            })),
        }
    }

    /// Writes an identifier.
    ///
    /// Function names become LaTeX operators, and Greek letters become their symbols. Any other
    /// run of letters that is not a known variable is read as a product of single-letter
    /// variables. Digits or an underscore after the letters start a subscript on the last of
    /// them, so `x2` and `x_2` are both written `x_{2}`.
    fn identifier(&self, name: &str) -> String {
        if consts::is_function(name) {
            return format!(r"\{}", name.to_ascii_lowercase());
        }
        if let Some(output) = self.symbol(name) {
            return output;
        }

        let split = name.find(|c: char| !c.is_ascii_alphabetic()).unwrap_or(name.len());
        let (letters, suffix) = name.split_at(split);
        if suffix.is_empty() {
            return self.letters(letters).join(CDOT);
        }

        let subscript = suffix.strip_prefix('_').unwrap_or(suffix).replace('_', r"\_");
        let mut factors = match self.symbol(letters) {
            Some(symbol) => vec![symbol],
            None => self.letters(letters),
        };
        let base = factors.pop().unwrap_or_else(|| "{}".to_string());
        if !subscript.is_empty() {
            factors.push(format!("{}_{{{}}}", base, subscript));
        } else {
            factors.push(base);
        }
        factors.join(CDOT)
    }

    /// Writes a Greek letter or a known variable, or returns [`None`] if the name is neither.
    fn symbol(&self, name: &str) -> Option<String> {
        if let Some(symbol) = consts::greek(name) {
            return Some(self.resolver.resolve(name, symbol).unwrap_or_else(|| symbol.to_string()));
        }
        self.resolver.resolve(name, name)
    }

    /// Writes each letter as its own variable.
    fn letters(&self, letters: &str) -> Vec<String> {
        letters.chars()
            .map(|c| {
                let c = c.to_string();
                self.resolver.resolve(&c, &c).unwrap_or(c)
            })
            .collect()
    }

    /// Copies a LaTeX block through unchanged. The cursor must be just after the `\` at `start`.
    ///
    /// A `\begin{env}` block extends to the matching `\end{env}`, or to the end of the input if
    /// there is none. Any other command extends over the brace groups directly following it, such
    /// as the two groups of `\frac{a}{b}`. Either kind of block also takes in a subscript group
    /// written directly after it, as in `\end{bmatrix}_{n \times 1}`.
    fn latex_block(&mut self, start: usize) -> String {
        while self.parser.rest().starts_with(|c: char| c.is_ascii_alphabetic()) {
            self.parser.bump_char();
        }
        let command = &self.parser.source()[start..self.parser.cursor()];

        if command == r"\begin" {
            let env_start = self.parser.cursor();
            while let Some(c) = self.parser.bump_char() {
                if c == '}' {
                    break;
                }
            }

            let env = &self.parser.source()[env_start..self.parser.cursor()];
            let end_tag = format!(r"\end{}", env);
            let end = self.parser.rest()
                .find(&end_tag)
                .map_or(self.parser.source().len(), |i| self.parser.cursor() + i + end_tag.len());
            self.parser.seek(end);
        } else {
            while self.brace_group() {}
        }

        while self.parser.rest().starts_with("_{") {
            self.parser.bump_char();
            self.brace_group();
        }

        self.parser.source()[start..self.parser.cursor()].to_string()
    }

    /// Consumes a balanced `{...}` group if one starts at the cursor, returning true if it did.
    /// An unbalanced group extends to the end of the input.
    fn brace_group(&mut self) -> bool {
        if !self.parser.rest().starts_with('{') {
            return false;
        }

        let mut depth = 0usize;
        while let Some(c) = self.parser.bump_char() {
            match c {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {},
            }
            if depth == 0 {
                break;
            }
        }
        true
    }
}

/// Renders a formula with variables highlighted by shape.
pub fn render_colorized(
    store: &VarStore,
    options: &RenderOptions,
    source: &str,
) -> Result<String, Error> {
    Renderer::new(source, Colorize { store, options }).render()
}

/// Renders a formula with variables replaced by their values.
///
/// Errors point into `source`, even though parsing is done on a rewritten copy of it.
pub fn render_expanded(store: &VarStore, source: &str) -> Result<String, Error> {
    let rewritten = transpose::expand_transposes(store, source);
    Renderer::new(&rewritten.source, Expand { store })
        .render()
        .map_err(|mut err| {
            err.spans = err.spans
                .into_iter()
                .map(|span| rewritten.original_span(span))
                .collect();
            err
        })
}
