//! Splitting of identifiers written without a separator, such as `Av` for `A` times `v`.

use crate::{store::VarStore, tensor::Tensor};
use log::debug;

/// The result of splitting an identifier into two known variables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Split<'a> {
    /// The byte offset at which the identifier is split. The suffix starts here.
    pub at: usize,

    /// The name of the prefix variable.
    pub prefix: &'a str,

    /// The value of the prefix variable.
    pub value: &'a Tensor,
}

/// Tries to split an identifier that is not a variable into a prefix and a suffix that both are.
///
/// Split points are tried from left to right, so the shortest known prefix wins. Returns [`None`]
/// if the identifier is shorter than two characters, or if no split point works.
pub fn split<'a>(store: &'a VarStore, run: &'a str) -> Option<Split<'a>> {
    (1..run.len())
        .filter(|&at| run.is_char_boundary(at))
        .find_map(|at| {
            let (prefix, suffix) = run.split_at(at);
            let value = store.get(prefix)?;
            if !store.exists(suffix) {
                return None;
            }

            debug!("splitting `{}` into `{}` and `{}`", run, prefix, suffix);
            Some(Split { at, prefix, value })
        })
}
