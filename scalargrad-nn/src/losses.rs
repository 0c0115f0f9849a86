//! Scalar losses over one batch of single-output predictions.

use crate::error::NnError;
use crate::module::check_width;
use scalargrad_core::num_traits::Float;
use scalargrad_core::{Graph, Operand, ValueId};

/// `Σ (ŷᵢ - yᵢ)²`.
///
/// Targets are plain numbers and become constants in `graph`. An empty batch
/// yields a constant zero.
pub fn sum_squared_error<T: Float>(
    graph: &mut Graph<T>,
    predictions: &[ValueId],
    targets: &[T],
) -> Result<ValueId, NnError> {
    check_width(predictions.len(), targets.len(), "sum_squared_error")?;
    let mut squares = Vec::with_capacity(predictions.len());
    for (&prediction, &target) in predictions.iter().zip(targets) {
        let residual = graph.sub(prediction, Operand::Scalar(target))?;
        squares.push(graph.pow(residual, Operand::Scalar(T::one() + T::one()))?);
    }
    Ok(graph.sum(&squares)?)
}

/// [`sum_squared_error`] divided by the batch size.
///
/// # Errors
/// `InvalidConfig` on an empty batch.
pub fn mean_squared_error<T: Float>(
    graph: &mut Graph<T>,
    predictions: &[ValueId],
    targets: &[T],
) -> Result<ValueId, NnError> {
    if predictions.is_empty() {
        return Err(NnError::InvalidConfig(
            "mean_squared_error of an empty batch".to_string(),
        ));
    }
    let total = sum_squared_error(graph, predictions, targets)?;
    let count: T = crate::cast(predictions.len() as f64, "batch size")?;
    Ok(graph.div(total, Operand::Scalar(count))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::constants;
    use approx::assert_relative_eq;

    #[test]
    fn test_sum_squared_error() -> Result<(), NnError> {
        let mut graph: Graph = Graph::new();
        let predictions = constants(&mut graph, &[0.5, -0.5]);
        let loss = sum_squared_error(&mut graph, &predictions, &[1.0, -1.0])?;
        assert_relative_eq!(graph.data(loss)?, 0.5, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_sum_squared_error_gradient() -> Result<(), NnError> {
        let mut graph: Graph = Graph::new();
        let prediction = graph.leaf(0.25);
        let loss = sum_squared_error(&mut graph, &[prediction], &[1.0])?;
        graph.backward(loss)?;
        // d/dŷ (ŷ - y)² = 2 (ŷ - y)
        assert_relative_eq!(graph.grad(prediction)?, -1.5, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_mean_squared_error() -> Result<(), NnError> {
        let mut graph: Graph = Graph::new();
        let a = graph.leaf(3.0);
        let b = graph.leaf(0.0);
        let loss = mean_squared_error(&mut graph, &[a, b], &[1.0, 0.0])?;
        assert_relative_eq!(graph.data(loss)?, 2.0, epsilon = 1e-12);
        graph.backward(loss)?;
        assert_relative_eq!(graph.grad(a)?, 2.0, epsilon = 1e-12);
        assert_eq!(graph.grad(b)?, 0.0);
        Ok(())
    }

    #[test]
    fn test_loss_length_mismatch() {
        let mut graph: Graph = Graph::new();
        let predictions = constants(&mut graph, &[0.0, 1.0, 2.0]);
        assert!(matches!(
            sum_squared_error(&mut graph, &predictions, &[0.0]),
            Err(NnError::DimensionMismatch { expected: 3, actual: 1, .. })
        ));
    }

    #[test]
    fn test_empty_batch() -> Result<(), NnError> {
        let mut graph: Graph = Graph::new();
        let loss = sum_squared_error(&mut graph, &[], &[])?;
        assert_eq!(graph.data(loss)?, 0.0);
        assert!(mean_squared_error::<f64>(&mut graph, &[], &[]).is_err());
        Ok(())
    }
}
