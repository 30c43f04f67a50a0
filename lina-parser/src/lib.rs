//! Tokenizer and scanning cursor shared by the evaluator and the formula renderer.
//!
//! Formulas are not parsed into a syntax tree. Instead, [`parser::Parser`] exposes a cursor over
//! the source that recursive-descent consumers drive directly, producing their result (a
//! symbolic value or rendered markup) as they go.

pub mod parser;
pub mod tokenizer;
