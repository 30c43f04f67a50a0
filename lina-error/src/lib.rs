//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that associates an [`ErrorKind`] with regions of the input.

// the `ErrorKind` derive macro refers to this crate by name
extern crate self as lina_error;

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::{self, Debug, Display, Formatter}, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Returns this error as a [`&dyn Any`](Any), so that callers can recover the concrete kind.
    fn as_any(&self) -> &dyn Any;

    /// The message describing this error, without any source code context.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Returns the kind of this error as `K`, if it is one.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Returns true if the kind of this error is `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.downcast_ref::<K>().is_some()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Writes the report of this error to the given writer, using `input` as the source code the
    /// spans point into.
    pub fn write_report(&self, src_id: &str, input: &str, w: impl io::Write) -> io::Result<()> {
        self.build_report(src_id).write((src_id, Source::from(input)), w)
    }

    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use lina_attrs::ErrorKind;
    use super::*;

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("`{}` is not here", self.name),
        labels = ["this one", "and this one"],
        help = "try something else",
    )]
    struct Missing {
        name: String,
    }

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(message = "nothing to see", labels = ["here"])]
    struct Empty;

    fn report_text(err: &Error, input: &str) -> String {
        let mut buf = Vec::new();
        err.write_report("input", input, &mut buf).unwrap();
        String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
    }

    #[test]
    fn display_is_message() {
        let err = Error::new(vec![0..1], Missing { name: "x".to_string() });
        assert_eq!(err.to_string(), "`x` is not here");
    }

    #[test]
    fn downcast_to_kind() {
        let err = Error::new(vec![0..1], Empty);
        assert!(err.is::<Empty>());
        assert!(!err.is::<Missing>());
        assert_eq!(err.downcast_ref::<Empty>(), Some(&Empty));
    }

    #[test]
    fn report_contains_labels_and_help() {
        let err = Error::new(vec![0..1, 4..5], Missing { name: "a".to_string() });
        let text = report_text(&err, "a + b");
        assert!(text.contains("`a` is not here"));
        assert!(text.contains("this one"));
        assert!(text.contains("and this one"));
        assert!(text.contains("try something else"));
    }

    #[test]
    fn report_with_fewer_spans_than_labels() {
        let err = Error::new(vec![2..3], Missing { name: "b".to_string() });
        let text = report_text(&err, "a + b");
        assert!(text.contains("this one"));
        assert!(!text.contains("and this one"));
    }
}
