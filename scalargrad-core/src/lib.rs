//! # scalargrad-core
//!
//! A scalar reverse-mode automatic differentiation engine.
//!
//! Operations on a [`Graph`] build a dynamic computation graph of scalar
//! [`Value`]s as they are evaluated; [`Graph::backward`] then fills in the
//! gradient of a chosen output with respect to every node it depends on.
//!
//! ```
//! use scalargrad_core::{AutogradError, Graph};
//!
//! # fn main() -> Result<(), AutogradError> {
//! let mut graph: Graph = Graph::new();
//! let x = graph.leaf(3.0);
//! let y = graph.mul(x, x)?;
//! let z = graph.add(y, 1.0)?;
//!
//! graph.backward(z)?;
//! assert_eq!(graph.data(z)?, 10.0);
//! assert_eq!(graph.grad(x)?, 6.0);
//! # Ok(())
//! # }
//! ```

pub mod autograd;
pub mod error;
pub mod graph;
pub mod ops;
pub mod value;

pub use error::AutogradError;
pub use graph::{Checkpoint, Graph};
pub use value::{Input, Op, Operand, Value, ValueId};
// Re-export traits required by public functions/structs
pub use num_traits;

use num_traits::{Float, NumCast};

/// Converts an `f64` constant to the graph's scalar type.
///
/// Every `Float` implementation in practice represents these constants; if
/// one cannot, the constant becomes NaN and propagates like any other
/// non-finite value.
pub(crate) fn scalar<T: Float>(value: f64) -> T {
    <T as NumCast>::from(value).unwrap_or_else(T::nan)
}
