use lina_error::Error as FormulaError;
use std::io;

/// Utility enum to package errors that can occur while processing a line.
#[derive(Debug)]
pub enum Error {
    /// An error in a formula. The formula is kept so the report can point into it.
    Formula {
        source: String,
        error: FormulaError,
    },

    /// The line started with `:`, but named no known command.
    UnknownCommand(String),
}

impl Error {
    /// Packages an error with the formula it occurred in.
    pub fn formula(source: &str, error: FormulaError) -> Self {
        Self::Formula { source: source.to_string(), error }
    }

    /// Report this error to stderr.
    ///
    /// Formula errors are printed as an `ariadne` report highlighting the formula.
    pub fn report_to_stderr(&self) -> io::Result<()> {
        match self {
            Self::Formula { source, error } => error.report_to_stderr("input", source),
            Self::UnknownCommand(name) => {
                eprintln!("unknown command `:{}`; try :calc, :expand, :vars or :numeric", name);
                Ok(())
            },
        }
    }
}
