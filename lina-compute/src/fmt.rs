//! Parsing and formatting of the plain decimal numbers that appear in cell expressions, and the
//! LaTeX markup of grids.

use crate::grid::Grid;
use std::fmt::Display;

/// Parses a plain signed decimal: an optional `+` or `-`, then digits with at most one `.`, with
/// at least one digit overall.
///
/// Exponents, `inf`, `NaN` and surrounding whitespace are all rejected.
pub fn parse_decimal(s: &str) -> Option<f64> {
    let (sign, unsigned) = match s.as_bytes().first()? {
        b'-' => ("-", &s[1..]),
        b'+' => ("", &s[1..]),
        _ => ("", s),
    };

    let valid = unsigned.chars().all(|c| c.is_ascii_digit() || c == '.')
        && unsigned.chars().filter(|&c| c == '.').count() <= 1
        && unsigned.chars().any(|c| c.is_ascii_digit());
    if !valid {
        return None;
    }

    // `f64::from_str` wants digits on both sides of the point
    let mut normalized = String::with_capacity(unsigned.len() + 3);
    normalized.push_str(sign);
    if unsigned.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(unsigned);
    if unsigned.ends_with('.') {
        normalized.push('0');
    }

    normalized.parse().ok()
}

/// Returns true if the (trimmed) term is a plain signed decimal.
pub fn is_number(term: &str) -> bool {
    parse_decimal(term.trim()).is_some()
}

/// Formats the result of an arithmetic operation on cells.
///
/// Integral values are printed without a decimal point, everything else uses the shortest
/// representation that round-trips.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // also catches `-0`
        "0".to_string()
    } else if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Tidies a number literal for display, removing redundant leading and trailing zeros.
///
/// `2.50` becomes `2.5`, `3.0` becomes `3`, and a lone `.` becomes `0`. Runs that are not valid
/// numbers (such as `1.2.3`) are returned unchanged.
pub fn tidy_number(raw: &str) -> String {
    if raw == "." {
        return "0".to_string();
    }
    if parse_decimal(raw).is_none() {
        return raw.to_string();
    }

    let (int, frac) = raw.split_once('.').unwrap_or((raw, ""));
    let int = match int.trim_start_matches('0') {
        "" => "0",
        int => int,
    };
    let frac = frac.trim_end_matches('0');

    if frac.is_empty() {
        int.to_string()
    } else {
        format!("{}.{}", int, frac)
    }
}

/// Parses a cell as a sum of signed decimals.
///
/// Whitespace is removed and `,` is read as a decimal point first. The cell is split before every
/// `+` and `-`, and pieces that are empty or a bare sign are skipped, so `1 + -2` and `--3` both
/// parse. An empty cell is `0`. Returns [`None`] if any piece is not a number.
pub fn parse_sum(cell: &str) -> Option<f64> {
    let cleaned = cell
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect::<String>();

    let mut pieces = Vec::new();
    let mut start = 0;
    for (i, c) in cleaned.char_indices() {
        if (c == '+' || c == '-') && i > start {
            pieces.push(&cleaned[start..i]);
            start = i;
        }
    }
    pieces.push(&cleaned[start..]);

    pieces.into_iter()
        .filter(|piece| !matches!(*piece, "" | "+" | "-"))
        .try_fold(0.0, |sum, piece| Some(sum + parse_decimal(piece)?))
}

/// Writes a grid as a LaTeX `pmatrix`, with ` & ` between columns and ` \\ ` between rows.
pub fn grid_to_latex<T: Display>(grid: &Grid<T>) -> String {
    let body = grid.iter_rows()
        .map(|row| row.iter().map(ToString::to_string).collect::<Vec<_>>().join(" & "))
        .collect::<Vec<_>>()
        .join(r" \\ ");
    format!(r"\begin{{pmatrix}}{}\end{{pmatrix}}", body)
}
