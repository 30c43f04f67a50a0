use crate::{options::RenderOptions, store::VarStore, tensor::{Shape, Tensor}};

/// Decides how the renderer writes an identifier.
///
/// This is the only difference between the rendering modes: the grammar and the layout of the
/// output are shared, and only known identifiers are written differently.
pub trait Resolve {
    /// Returns the markup for the identifier `name`, or [`None`] if it is not known.
    ///
    /// `display` is how the identifier is written if nothing special is done with it, which is the
    /// name itself, or its symbol for Greek letters.
    fn resolve(&self, name: &str, display: &str) -> Option<String>;
}

impl<F> Resolve for F
where
    F: Fn(&str, &str) -> Option<String>,
{
    fn resolve(&self, name: &str, display: &str) -> Option<String> {
        self(name, display)
    }
}

/// Writes identifiers as they are, highlighting variables with a color based on their shape.
#[derive(Debug, Clone, Copy)]
pub struct Colorize<'a> {
    pub store: &'a VarStore,
    pub options: &'a RenderOptions,
}

impl Resolve for Colorize<'_> {
    fn resolve(&self, name: &str, display: &str) -> Option<String> {
        let tensor = self.store.get(name)?;
        let color = match tensor.shape() {
            Shape::Matrix => &self.options.matrix_color,
            Shape::Vector => &self.options.vector_color,
            Shape::Scalar => return Some(display.to_string()),
        };
        Some(format!(r"\textcolor{{{}}}{{{}}}", color, display))
    }
}

/// Replaces variables with their values.
#[derive(Debug, Clone, Copy)]
pub struct Expand<'a> {
    pub store: &'a VarStore,
}

impl Resolve for Expand<'_> {
    fn resolve(&self, name: &str, _: &str) -> Option<String> {
        self.store.get(name).map(Tensor::to_latex)
    }
}
