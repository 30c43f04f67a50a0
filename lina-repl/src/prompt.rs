use lina_compute::{Dim, Tensor, TensorInput, TensorSource};

/// Asks the user a question and returns the answer.
pub trait Prompt {
    /// Returns the answer, or [`None`] if no answer will come (end of input, or the user gave up).
    fn ask(&mut self, question: &str) -> Option<String>;
}

/// Answers questions with the next line of a script, echoing both.
pub struct ScriptPrompt<I> {
    lines: I,
}

impl<I: Iterator<Item = String>> ScriptPrompt<I> {
    pub fn new(lines: I) -> Self {
        Self { lines }
    }
}

impl<I: Iterator<Item = String>> Prompt for ScriptPrompt<I> {
    fn ask(&mut self, question: &str) -> Option<String> {
        let answer = self.lines.next()?;
        println!("{}{}", question, answer);
        Some(answer)
    }
}

/// Collects the value of a variable being assigned by asking for its dimensions, then for each
/// cell in row-major order.
pub struct PromptSource<'p, P> {
    prompt: &'p mut P,
}

impl<'p, P: Prompt> PromptSource<'p, P> {
    pub fn new(prompt: &'p mut P) -> Self {
        Self { prompt }
    }
}

impl<P: Prompt> TensorSource for PromptSource<'_, P> {
    fn collect(&mut self, name: &str) -> Option<TensorInput> {
        let rows = self.prompt.ask(&format!("{} rows: ", name))?;
        let cols = self.prompt.ask(&format!("{} cols: ", name))?;

        // placeholders have no cells to ask for, and invalid grids are rejected by the workspace
        let fixed = (Dim::parse(&rows).as_fixed(), Dim::parse(&cols).as_fixed());
        let (Some(num_rows), Some(num_cols)) = fixed else {
            return Some(TensorInput { rows, cols, cells: Vec::new() });
        };
        let Some(count) = Tensor::cell_count(num_rows, num_cols) else {
            return Some(TensorInput { rows, cols, cells: Vec::new() });
        };

        let mut cells = Vec::with_capacity(count);
        for i in 1..=num_rows {
            for j in 1..=num_cols {
                cells.push(self.prompt.ask(&format!("{}[{},{}] = ", name, i, j))?);
            }
        }
        Some(TensorInput { rows, cols, cells })
    }
}
