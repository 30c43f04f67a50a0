//! The pre-pass of expanded rendering, which replaces transposed variables with the markup of the
//! transposed value.
//!
//! The pass is done on the token stream, before parsing, since `A^T` would otherwise be rendered
//! as the exponent `{A}^{T}` of the expanded value of `A`.

use crate::{fmt, store::VarStore, tensor::Tensor};
use lina_parser::tokenizer::{tokenize_complete, Token, TokenKind};
use log::debug;
use std::ops::Range;

/// A region of the source that was replaced.
#[derive(Debug, Clone, PartialEq)]
struct Splice {
    /// The region in the original source.
    original: Range<usize>,

    /// The region in the rewritten source holding the replacement.
    rewritten: Range<usize>,
}

/// The source with every transposed variable replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct Rewritten {
    /// The rewritten source.
    pub source: String,
    splices: Vec<Splice>,
}

impl Rewritten {
    /// Maps a span of the rewritten source back to the original source, so that errors found while
    /// parsing the rewritten source can be reported against what the user typed.
    pub fn original_span(&self, span: Range<usize>) -> Range<usize> {
        self.original_offset(span.start, false)..self.original_offset(span.end, true)
    }

    fn original_offset(&self, offset: usize, is_end: bool) -> usize {
        let mut shift = 0isize;
        for splice in &self.splices {
            if offset < splice.rewritten.start || (is_end && offset == splice.rewritten.start) {
                break;
            }
            if offset < splice.rewritten.end {
                return if is_end { splice.original.end } else { splice.original.start };
            }
            shift = splice.original.end as isize - splice.rewritten.end as isize;
        }
        offset.saturating_add_signed(shift)
    }
}

/// Returns the markup of the transpose of a variable.
///
/// A tensor with a numeric view is transposed and written as formatted numbers. Otherwise, the
/// raw cells are transposed, or the dimensions of a placeholder are swapped.
fn transposed_latex(tensor: &Tensor) -> String {
    match tensor.numeric_view() {
        Some(values) => fmt::grid_to_latex(&values.transpose().map(|v| fmt::format_number(*v))),
        None => tensor.transposed().to_latex(),
    }
}

/// Returns the index of the first token at or after `start` that is not whitespace.
fn skip_whitespace(tokens: &[Token], start: usize) -> usize {
    tokens[start..]
        .iter()
        .position(|token| !token.is_whitespace())
        .map_or(tokens.len(), |offset| start + offset)
}

/// If `name ^ T` (or `name ^ t`) starts at token `i`, returns the index of the `T` token.
fn transpose_at(tokens: &[Token], i: usize) -> Option<usize> {
    let exp = skip_whitespace(tokens, i + 1);
    if tokens.get(exp)?.kind != TokenKind::Exp {
        return None;
    }

    let t = skip_whitespace(tokens, exp + 1);
    let token = tokens.get(t)?;
    (token.kind == TokenKind::Name && matches!(token.lexeme, "T" | "t")).then_some(t)
}

/// Replaces every transposed variable in the source with the markup of its transpose.
pub fn expand_transposes(store: &VarStore, source: &str) -> Rewritten {
    let tokens = tokenize_complete(source);
    let mut rewritten = String::with_capacity(source.len());
    let mut splices = Vec::new();
    let mut copied = 0;

    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        let found = (token.kind == TokenKind::Name)
            .then(|| store.get(token.lexeme))
            .flatten()
            .zip(transpose_at(&tokens, i));

        let Some((tensor, t)) = found else {
            i += 1;
            continue;
        };

        let original = token.span.start..tokens[t].span.end;
        let latex = transposed_latex(tensor);
        debug!("expanding `{}` to `{}`", &source[original.clone()], latex);

        rewritten.push_str(&source[copied..original.start]);
        let start = rewritten.len();
        rewritten.push_str(&latex);
        splices.push(Splice { original: original.clone(), rewritten: start..rewritten.len() });

        copied = original.end;
        i = t + 1;
    }
    rewritten.push_str(&source[copied..]);

    Rewritten { source: rewritten, splices }
}

#[cfg(test)]
mod tests {
    use crate::grid::Grid;
    use pretty_assertions::assert_eq;
    use super::*;

    fn store() -> VarStore {
        let mut store = VarStore::new();
        store.save("A", Tensor::from_grid(Grid::from_rows(vec![
            vec!["1".to_string()],
            vec!["2.50".to_string()],
        ]).unwrap()));
        store.save("B", Tensor::from_grid(Grid::from_rows(vec![
            vec!["x".to_string(), "y".to_string()],
        ]).unwrap()));
        store
    }

    #[test]
    fn numeric_transpose() {
        let rewritten = expand_transposes(&store(), "A^T");
        assert_eq!(rewritten.source, r"\begin{pmatrix}1 & 2.5\end{pmatrix}");
    }

    #[test]
    fn symbolic_transpose() {
        let rewritten = expand_transposes(&store(), "2 B ^ t + 1");
        assert_eq!(rewritten.source, r"2 \begin{pmatrix}x \\ y\end{pmatrix} + 1");
    }

    #[test]
    fn unicode_whitespace_around_caret() {
        let rewritten = expand_transposes(&store(), "A\u{A0}^\u{2003}T");
        assert_eq!(rewritten.source, r"\begin{pmatrix}1 & 2.5\end{pmatrix}");
    }

    #[test]
    fn only_known_variables() {
        let store = store();
        assert_eq!(expand_transposes(&store, "C^T").source, "C^T");
        assert_eq!(expand_transposes(&store, "A^Tx").source, "A^Tx");
        assert_eq!(expand_transposes(&store, "A^2").source, "A^2");
    }

    #[test]
    fn map_spans_back() {
        let rewritten = expand_transposes(&store(), "A^T + $");
        let dollar = rewritten.source.find('$').unwrap();
        assert_eq!(rewritten.original_span(dollar..dollar + 1), 6..7);

        let latex_end = rewritten.source.find(" +").unwrap();
        assert_eq!(rewritten.original_span(0..latex_end), 0..3);
        assert_eq!(rewritten.original_span(2..4), 0..3);
    }
}
