use crate::error::NnError;
use scalargrad_core::num_traits::Float;
use scalargrad_core::{Graph, ValueId};

/// Trait defining the common interface for all optimizers.
///
/// An optimizer holds the handles of the parameters it updates; the numbers
/// themselves live in the [`Graph`] passed to every call.
pub trait Optimizer<T: Float> {
    /// Performs a single optimization step using the gradients accumulated
    /// on the managed parameters.
    fn step(&mut self, graph: &mut Graph<T>) -> Result<(), NnError>;

    /// Clears the gradients of all managed parameters.
    ///
    /// Called before each backward pass, since gradients otherwise
    /// accumulate across passes.
    fn zero_grad(&mut self, graph: &mut Graph<T>) -> Result<(), NnError>;

    fn params(&self) -> &[ValueId];

    fn learning_rate(&self) -> T;

    fn set_learning_rate(&mut self, learning_rate: T) -> Result<(), NnError>;
}
