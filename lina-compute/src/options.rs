#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options that control how formulas are rendered.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RenderOptions {
    /// The LaTeX color name used to highlight matrix-shaped variables in colorized rendering.
    ///
    /// The default is `red`.
    pub matrix_color: String,

    /// The LaTeX color name used to highlight vector-shaped variables in colorized rendering.
    ///
    /// The default is `purple`.
    pub vector_color: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            matrix_color: "red".to_string(),
            vector_color: "purple".to_string(),
        }
    }
}

impl RenderOptions {
    /// Wraps the given [`RenderOptions`] into a builder for further customization.
    pub fn into_builder(self) -> RenderOptionsBuilder {
        RenderOptionsBuilder(self)
    }
}

/// A builder for [`RenderOptions`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderOptionsBuilder(RenderOptions);

impl RenderOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the color of matrix-shaped variables. See [`RenderOptions::matrix_color`].
    pub fn matrix_color(mut self, color: impl Into<String>) -> Self {
        self.0.matrix_color = color.into();
        self
    }

    /// Sets the color of vector-shaped variables. See [`RenderOptions::vector_color`].
    pub fn vector_color(mut self, color: impl Into<String>) -> Self {
        self.0.vector_color = color.into();
        self
    }

    /// Builds the [`RenderOptions`].
    pub fn build(self) -> RenderOptions {
        self.0
    }
}

impl From<RenderOptionsBuilder> for RenderOptions {
    fn from(builder: RenderOptionsBuilder) -> Self {
        builder.build()
    }
}
