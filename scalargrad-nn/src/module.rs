use crate::error::NnError;
use scalargrad_core::num_traits::Float;
use scalargrad_core::{Graph, ValueId};
use std::fmt::Debug;

/// The base trait for all network components (neurons, layers, perceptrons).
///
/// A module owns no numbers itself: its parameters are leaves of a
/// [`Graph`] and the module only keeps their handles. `forward` appends the
/// computation for one sample to the same graph.
pub trait Module<T: Float>: Debug {
    /// Performs a forward pass for one sample.
    ///
    /// # Arguments
    /// * `graph`: The graph holding the parameters; outputs are appended to it.
    /// * `inputs`: One node per input feature.
    ///
    /// # Errors
    /// `DimensionMismatch` if `inputs` does not have the expected width,
    /// or any error raised by the underlying operations.
    fn forward(&self, graph: &mut Graph<T>, inputs: &[ValueId]) -> Result<Vec<ValueId>, NnError>;

    /// Handles of all learnable parameters, in a stable order.
    fn parameters(&self) -> Vec<ValueId>;

    /// Parameters with hierarchical names such as `"layer1.neuron0.w2"`.
    fn named_parameters(&self) -> Vec<(String, ValueId)>;

    /// Number of input features the module expects.
    fn n_inputs(&self) -> usize;

    /// Number of outputs produced per sample.
    fn n_outputs(&self) -> usize;

    fn num_parameters(&self) -> usize {
        self.parameters().len()
    }

    /// Copies the graph labels from [`named_parameters`](Self::named_parameters)
    /// onto the parameter leaves.
    fn label_parameters(&self, graph: &mut Graph<T>) -> Result<(), NnError> {
        for (name, id) in self.named_parameters() {
            graph.set_label(id, name)?;
        }
        Ok(())
    }
}

/// Wraps a sample of plain numbers into constant leaves.
pub fn constants<T: Float>(graph: &mut Graph<T>, sample: &[T]) -> Vec<ValueId> {
    sample.iter().map(|&x| graph.constant(x)).collect()
}

pub(crate) fn check_width(expected: usize, actual: usize, context: &str) -> Result<(), NnError> {
    if expected != actual {
        return Err(NnError::DimensionMismatch {
            expected,
            actual,
            context: context.to_string(),
        });
    }
    Ok(())
}
