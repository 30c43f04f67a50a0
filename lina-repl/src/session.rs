use crate::{error::Error, prompt::{Prompt, PromptSource}};
use lina_compute::Workspace;
use log::debug;

/// A line of input, classified by its leading command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// `:calc <expr>`, evaluate the formula.
    Calc(&'a str),

    /// `:expand <expr>`, render the formula with variables replaced by their values.
    Expand(&'a str),

    /// `:vars`, list the variables.
    Vars,

    /// `:numeric <name>`, print the numeric value of a variable.
    Numeric(&'a str),

    /// Anything else: an assignment prompt like `A =`, or a formula to render.
    Formula(&'a str),
}

impl<'a> Command<'a> {
    /// Classifies a line of input.
    pub fn parse(line: &'a str) -> Result<Self, Error> {
        let Some(command) = line.trim_start().strip_prefix(':') else {
            return Ok(Command::Formula(line));
        };

        let (name, arg) = command.split_once(char::is_whitespace).unwrap_or((command, ""));
        match name {
            "calc" => Ok(Command::Calc(arg)),
            "expand" => Ok(Command::Expand(arg)),
            "vars" => Ok(Command::Vars),
            "numeric" => Ok(Command::Numeric(arg.trim())),
            _ => Err(Error::UnknownCommand(name.to_string())),
        }
    }
}

/// The state of the REPL.
#[derive(Debug, Default)]
pub struct Session {
    workspace: Workspace,
}

impl Session {
    /// Creates a session with no variables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes one line of input, returning the text to print.
    ///
    /// Assignments ask `prompt` for the dimensions and cells of the variable.
    pub fn process(
        &mut self,
        line: &str,
        prompt: &mut impl Prompt,
    ) -> Result<Option<String>, Error> {
        debug!("processing `{}`", line);
        match Command::parse(line)? {
            Command::Calc(expr) => self.workspace.render_result(expr)
                .map(Some)
                .map_err(|err| Error::formula(expr, err)),
            Command::Expand(expr) => self.workspace.render_expanded(expr)
                .map(Some)
                .map_err(|err| Error::formula(expr, err)),
            Command::Vars => Ok(Some(self.list_vars())),
            Command::Numeric(name) => Ok(Some(self.numeric(name))),
            Command::Formula(expr) => {
                let mut source = PromptSource::new(prompt);
                match self.workspace.try_assign(expr, &mut source) {
                    Some(result) => result.map(Some).map_err(|err| Error::formula(expr, err)),
                    None if Workspace::assignment_target(expr).is_some() => Ok(None),
                    None => self.workspace.render_colorized(expr)
                        .map(Some)
                        .map_err(|err| Error::formula(expr, err)),
                }
            },
        }
    }

    /// Lists every variable with its dimensions and shape, sorted by name.
    fn list_vars(&self) -> String {
        let mut vars = self.workspace.all().iter().collect::<Vec<_>>();
        if vars.is_empty() {
            return "no variables defined".to_string();
        }

        vars.sort_by(|(a, _), (b, _)| a.cmp(b));
        vars.into_iter()
            .map(|(name, tensor)| {
                format!("{}: {} x {} {}", name, tensor.rows(), tensor.cols(), tensor.shape())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Prints the numeric value of a variable, one row per line.
    fn numeric(&self, name: &str) -> String {
        if !self.workspace.exists(name) {
            return format!("`{}` is not defined", name);
        }

        match self.workspace.numeric_view(name) {
            Some(values) => values.iter_rows()
                .map(|row| row.iter().map(ToString::to_string).collect::<Vec<_>>().join(" "))
                .collect::<Vec<_>>()
                .join("\n"),
            None => format!("`{}` has no numeric value", name),
        }
    }
}
