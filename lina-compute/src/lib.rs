//! Symbolic evaluation and rendering of linear-algebra formulas.
//!
//! Variables are [`Tensor`]s: rectangular grids whose cells are themselves small algebraic
//! expressions, such as `2`, `x` or `a + 1`. Formulas over these variables can be handled in two
//! ways:
//!
//! - **Evaluated**, producing a [`Grid`] of cell expressions. This is done by the [`eval`] module,
//!   with the [`algebra`] module combining cells using a fixed set of textual simplification
//!   rules.
//! - **Rendered**, producing LaTeX markup of the formula itself. This is done by the [`render`]
//!   module, where identifiers are resolved by an injected [`render::Resolve`] strategy.
//!
//! The [`Workspace`] type ties the two together with a [`VarStore`] and [`RenderOptions`].
//!
//! ```
//! use lina_compute::{Grid, Tensor, Workspace};
//!
//! let mut workspace = Workspace::new();
//! let a = Grid::from_rows(vec![
//!     vec!["1".to_string(), "x".to_string()],
//!     vec!["0".to_string(), "2".to_string()],
//! ]).unwrap();
//! workspace.save("A", Tensor::from_grid(a));
//!
//! let result = workspace.render_result("2A").unwrap();
//! assert_eq!(result, r"\begin{pmatrix}2 & 2x \\ 0 & 4\end{pmatrix}");
//! ```

pub mod algebra;
pub mod consts;
pub mod error;
pub mod eval;
pub mod fmt;
pub mod grid;
pub mod options;
pub mod render;
pub mod store;
pub mod tensor;
pub mod workspace;

pub use grid::Grid;
pub use options::{RenderOptions, RenderOptionsBuilder};
pub use store::VarStore;
pub use tensor::{Dim, Shape, Tensor, TensorInput, MAX_CELLS};
pub use workspace::{TensorSource, Workspace};
