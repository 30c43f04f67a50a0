use crate::{
    consts,
    eval,
    fmt,
    grid::Grid,
    options::RenderOptions,
    render,
    store::VarStore,
    tensor::{Tensor, TensorInput},
};
use lina_error::Error;
use lina_parser::tokenizer::{tokenize_complete, TokenKind};
use std::collections::HashMap;

/// Supplies the dimensions and cells of a variable being assigned, usually by asking the user.
pub trait TensorSource {
    /// Returns the input for the variable `name`, or [`None`] if the assignment was cancelled.
    fn collect(&mut self, name: &str) -> Option<TensorInput>;
}

impl<F> TensorSource for F
where
    F: FnMut(&str) -> Option<TensorInput>,
{
    fn collect(&mut self, name: &str) -> Option<TensorInput> {
        self(name)
    }
}

/// A session of variables and formulas.
///
/// This is the entry point for front ends: it owns the [`VarStore`] and the [`RenderOptions`],
/// and exposes every operation on formulas by name.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    store: VarStore,
    options: RenderOptions,
}

impl Workspace {
    /// Creates an empty workspace with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty workspace with the given options.
    pub fn with_options(options: RenderOptions) -> Self {
        Self { store: VarStore::new(), options }
    }

    /// Returns the render options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// If the input is an assignment prompt, such as `A =`, returns the name being assigned.
    ///
    /// The name must start the input, and the `=` must end it.
    pub fn assignment_target(input: &str) -> Option<&str> {
        let tokens = tokenize_complete(input);
        let (name, assign) = match &*tokens {
            [name, assign] => (name, assign),
            [name, space, assign] if space.is_whitespace() => (name, assign),
            _ => return None,
        };
        (name.kind == TokenKind::Name && assign.kind == TokenKind::Assign).then_some(name.lexeme)
    }

    /// Handles an assignment prompt.
    ///
    /// Returns [`None`] if the input is not an assignment prompt, or if `source` cancels the
    /// assignment. Otherwise, the variable is saved and its LaTeX definition (such as
    /// `\alpha = \begin{pmatrix}1\end{pmatrix}`) is returned.
    pub fn try_assign(
        &mut self,
        input: &str,
        source: &mut impl TensorSource,
    ) -> Option<Result<String, Error>> {
        let name = Self::assignment_target(input)?;
        let tensor_input = source.collect(name)?;
        Some(Tensor::from_input(tensor_input).map(|tensor| {
            let latex = format!("{} = {}", consts::display_name(name), tensor.to_latex());
            self.store.save(name, tensor);
            latex
        }))
    }

    /// Evaluates a formula.
    pub fn evaluate(&self, expr: &str) -> Result<Grid<String>, Error> {
        eval::evaluate(&self.store, expr)
    }

    /// Renders a formula with variables highlighted by shape.
    pub fn render_colorized(&self, expr: &str) -> Result<String, Error> {
        render::render_colorized(&self.store, &self.options, expr)
    }

    /// Renders a formula with variables replaced by their values.
    pub fn render_expanded(&self, expr: &str) -> Result<String, Error> {
        render::render_expanded(&self.store, expr)
    }

    /// Evaluates a formula and renders the result.
    pub fn render_result(&self, expr: &str) -> Result<String, Error> {
        self.evaluate(expr).map(|grid| fmt::grid_to_latex(&grid))
    }

    /// Returns the numeric value of a variable, if it exists and every cell is a number.
    pub fn numeric_view(&self, name: &str) -> Option<Grid<f64>> {
        self.store.get(name)?.numeric_view()
    }

    /// Returns true if the variable exists.
    pub fn exists(&self, name: &str) -> bool {
        self.store.exists(name)
    }

    /// Returns a variable.
    pub fn get(&self, name: &str) -> Option<&Tensor> {
        self.store.get(name)
    }

    /// Returns every variable.
    pub fn all(&self) -> &HashMap<String, Tensor> {
        self.store.all()
    }

    /// Saves a variable, replacing any previous value.
    pub fn save(&mut self, name: impl Into<String>, tensor: Tensor) {
        self.store.save(name, tensor);
    }
}

#[cfg(test)]
mod tests {
    use crate::{error::InvalidDimensions, options::RenderOptionsBuilder};
    use pretty_assertions::assert_eq;
    use super::*;

    fn input(rows: &str, cols: &str, cells: &[&str]) -> TensorInput {
        TensorInput {
            rows: rows.to_string(),
            cols: cols.to_string(),
            cells: cells.iter().map(ToString::to_string).collect(),
        }
    }

    /// Assigns a variable as if the user typed `name =` and answered the prompts.
    fn assign(workspace: &mut Workspace, name: &str, rows: &str, cols: &str, cells: &[&str]) {
        let mut source = |_: &str| Some(input(rows, cols, cells));
        workspace.try_assign(&format!("{} =", name), &mut source).unwrap().unwrap();
    }

    #[test]
    fn assignment_targets() {
        assert_eq!(Workspace::assignment_target("A ="), Some("A"));
        assert_eq!(Workspace::assignment_target("v_1="), Some("v_1"));
        assert_eq!(Workspace::assignment_target("x = 2"), None);
        assert_eq!(Workspace::assignment_target(" A ="), None);
        assert_eq!(Workspace::assignment_target("A + B ="), None);
        assert_eq!(Workspace::assignment_target("2 ="), None);
    }

    #[test]
    fn custom_options() {
        let options = RenderOptionsBuilder::new().vector_color("blue").into();
        let mut workspace = Workspace::with_options(options);
        assert_eq!(workspace.options().matrix_color, "red");
        assert_eq!(workspace.options().vector_color, "blue");

        assign(&mut workspace, "v", "2", "1", &["1", "2"]);
        assert_eq!(workspace.render_colorized("2v").unwrap(), r"2 \cdot \textcolor{blue}{v}");
    }

    #[test]
    fn assign_and_echo() {
        let mut workspace = Workspace::new();
        let mut source = |name: &str| {
            assert_eq!(name, "alfa");
            Some(input("2", "1", &["1", ""]))
        };
        let echo = workspace.try_assign("alfa =", &mut source).unwrap().unwrap();
        assert_eq!(echo, r"\alpha = \begin{pmatrix}1 \\ 0\end{pmatrix}");
        assert!(workspace.exists("alfa"));
    }

    #[test]
    fn not_an_assignment() {
        let mut workspace = Workspace::new();
        let mut source = |_: &str| -> Option<TensorInput> { panic!("should not be asked") };
        assert!(workspace.try_assign("A + B", &mut source).is_none());
    }

    #[test]
    fn cancelled_assignment() {
        let mut workspace = Workspace::new();
        let mut source = |_: &str| -> Option<TensorInput> { None };
        assert!(workspace.try_assign("A =", &mut source).is_none());
        assert!(!workspace.exists("A"));
    }

    #[test]
    fn invalid_assignment() {
        let mut workspace = Workspace::new();
        let mut source = |_: &str| Some(input("0", "2", &[]));
        let err = workspace.try_assign("A =", &mut source).unwrap().unwrap_err();
        assert!(err.is::<InvalidDimensions>());
        assert!(!workspace.exists("A"));
    }

    #[test]
    fn evaluate_after_assignment() {
        let mut workspace = Workspace::new();
        assign(&mut workspace, "a", "1", "1", &["1"]);
        assign(&mut workspace, "v", "2", "1", &["2", "3"]);
        assert_eq!(workspace.render_result("av").unwrap(), r"\begin{pmatrix}2 \\ 3\end{pmatrix}");
        assert_eq!(workspace.render_result("2+3").unwrap(), r"\begin{pmatrix}5\end{pmatrix}");
    }

    #[test]
    fn render_modes() {
        let mut workspace = Workspace::new();
        assign(&mut workspace, "A", "1", "2", &["1", "2"]);
        assert_eq!(workspace.render_colorized("2A").unwrap(), r"2 \cdot \textcolor{purple}{A}");
        assert_eq!(
            workspace.render_expanded("2A").unwrap(),
            r"2 \cdot \begin{pmatrix}1 & 2\end{pmatrix}",
        );
    }

    #[test]
    fn symbolic_variables() {
        let mut workspace = Workspace::new();
        assign(&mut workspace, "M", "n", "m", &[]);
        assert!(workspace.get("M").unwrap().is_symbolic());
        assert!(workspace.numeric_view("M").is_none());
        assert_eq!(
            workspace.render_expanded("M").unwrap(),
            r"\begin{bmatrix} \dots \end{bmatrix}_{n \times m}",
        );
    }

    #[test]
    fn numeric_export() {
        let mut workspace = Workspace::new();
        assign(&mut workspace, "v", "2", "1", &["1,5", "2"]);
        let view = workspace.numeric_view("v").unwrap();
        assert_eq!(view.into_rows(), vec![vec![1.5], vec![2.0]]);
        assert!(workspace.numeric_view("w").is_none());
        assert_eq!(workspace.all().len(), 1);
    }
}
