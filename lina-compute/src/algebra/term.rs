//! Arithmetic on single cell expressions.
//!
//! Cells are plain infix strings, and these functions combine them textually. Only a fixed set of
//! rules is applied: identities with `0` and `1` are absorbed, two plain numbers are computed, and
//! signs are moved to the front of products. Nothing else is simplified, so `x + x` stays as is.
//!
//! Every function trims its inputs before applying any rule.

use crate::fmt::{format_number, parse_decimal};

/// Returns the value of the term if it is a plain signed decimal.
fn number(term: &str) -> Option<f64> {
    parse_decimal(term)
}

/// Returns true if the term is numerically zero.
pub fn is_zero(term: &str) -> bool {
    number(term.trim()) == Some(0.0)
}

/// Returns true if the term is numerically one.
pub fn is_one(term: &str) -> bool {
    number(term.trim()) == Some(1.0)
}

/// Returns true if the term is a sum or difference at the top level, meaning it has a `+`, or a
/// `-` anywhere but the first character, outside of any `()` or `{}`.
///
/// Such a term must be parenthesized before it is used as a factor or subtrahend.
pub fn is_complex(term: &str) -> bool {
    let mut depth = 0usize;
    for (i, c) in term.char_indices() {
        match c {
            '(' | '{' => depth += 1,
            ')' | '}' => depth = depth.saturating_sub(1),
            '+' if depth == 0 => return true,
            '-' if depth == 0 && i > 0 => return true,
            _ => {},
        }
    }
    false
}

/// Wraps the term in parentheses if it [is complex](is_complex).
fn parenthesize(term: &str) -> String {
    if is_complex(term) {
        format!("({})", term)
    } else {
        term.to_string()
    }
}

/// If the term is `-(inner)` where the parentheses enclose the rest of the term and `inner` is
/// complex, returns `inner`.
fn negated_group(term: &str) -> Option<&str> {
    let inner = term.strip_prefix("-(")?.strip_suffix(')')?;

    // the opening parenthesis must not close before the end
    let mut depth = 1usize;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return None;
                }
            },
            _ => {},
        }
    }

    is_complex(inner).then_some(inner)
}

/// Adds two terms.
pub fn add(a: &str, b: &str) -> String {
    let (a, b) = (a.trim(), b.trim());
    if is_zero(b) {
        return a.to_string();
    }
    if is_zero(a) {
        return b.to_string();
    }
    if let (Some(x), Some(y)) = (number(a), number(b)) {
        return format_number(x + y);
    }
    format!("{} + {}", a, b)
}

/// Subtracts `b` from `a`.
pub fn sub(a: &str, b: &str) -> String {
    let (a, b) = (a.trim(), b.trim());
    if is_zero(b) {
        return a.to_string();
    }
    if is_zero(a) {
        return neg(b);
    }
    if let (Some(x), Some(y)) = (number(a), number(b)) {
        return format_number(x - y);
    }
    format!("{} - {}", a, parenthesize(b))
}

/// Negates a term.
///
/// Negating twice gives back the original term, except that numbers come back in canonical form.
pub fn neg(term: &str) -> String {
    let term = term.trim();
    if is_zero(term) {
        return "0".to_string();
    }
    if let Some(x) = number(term) {
        return format_number(-x);
    }
    if let Some(inner) = negated_group(term) {
        return inner.to_string();
    }
    if is_complex(term) {
        return format!("-({})", term);
    }
    match term.strip_prefix('-') {
        Some(rest) => rest.to_string(),
        None => format!("-{}", term),
    }
}

/// Multiplies two terms.
///
/// A number multiplying a symbolic term is written in front of it without an operator (`2x`,
/// `2(x + 1)`), unless that would run two numbers together; every other product uses `\cdot`.
pub fn mul(a: &str, b: &str) -> String {
    let (a, b) = (a.trim(), b.trim());
    if is_zero(a) || is_zero(b) {
        return "0".to_string();
    }
    if is_one(a) {
        return b.to_string();
    }
    if is_one(b) {
        return a.to_string();
    }

    let (x, y) = (number(a), number(b));
    if let (Some(x), Some(y)) = (x, y) {
        return format_number(x * y);
    }

    if x == Some(-1.0) {
        return neg(b);
    }
    if y == Some(-1.0) {
        return neg(a);
    }

    // pull the sign out of simple symbolic factors
    if x.is_none() && a.len() > 1 && !is_complex(a) {
        if let Some(rest) = a.strip_prefix('-') {
            return neg(&mul(rest, b));
        }
    }
    if y.is_none() && b.len() > 1 && !is_complex(b) {
        if let Some(rest) = b.strip_prefix('-') {
            return neg(&mul(a, rest));
        }
    }

    let (pa, pb) = (parenthesize(a), parenthesize(b));
    let starts_numeric = |s: &str| s.starts_with(|c: char| c.is_ascii_digit() || c == '.');
    match (x, y) {
        (Some(_), None) if !starts_numeric(&pb) => format!("{}{}", pa, pb),
        (None, Some(_)) if !starts_numeric(&pa) => format!("{}{}", pb, pa),
        _ => format!(r"{} \cdot {}", pa, pb),
    }
}

/// Divides `numerator` by `denominator`, which must not be zero.
pub fn div(numerator: &str, denominator: &str) -> String {
    let (n, d) = (numerator.trim(), denominator.trim());
    if let (Some(x), Some(y)) = (number(n), number(d)) {
        return format_number(x / y);
    }
    if is_zero(n) {
        return "0".to_string();
    }
    if is_one(d) {
        return n.to_string();
    }
    format!(r"\frac{{{}}}{{{}}}", n, d)
}
