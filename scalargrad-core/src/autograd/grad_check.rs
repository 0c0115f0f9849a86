use crate::error::AutogradError;
use crate::graph::Graph;
use crate::value::ValueId;
use num_traits::Float;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}: Analytical grad {analytical_grad:?} != Numerical grad {numerical_grad:?}. Difference: {difference:?}")]
    GradientMismatch {
        input_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },

    #[error("Numerical gradient is NaN or infinite for input {input_index}. Details: Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },

    #[error("Analytical gradient is NaN or infinite for input {input_index}. Value: {value:?}")]
    AnalyticalGradNaNOrInfinite { input_index: usize, value: f64 },

    #[error("Graph error during gradient check: {0}")]
    Graph(#[from] AutogradError),
}

/// Central finite difference `(f(x + ε) - f(x - ε)) / 2ε`.
pub fn central_difference<T, F>(f: F, x: T, epsilon: T) -> T
where
    T: Float,
    F: Fn(T) -> T,
{
    let two = T::one() + T::one();
    (f(x + epsilon) - f(x - epsilon)) / (two * epsilon)
}

/// Checks analytical gradients against numerical gradients using finite
/// differences.
///
/// `func` receives a fresh graph holding one leaf per entry of `inputs` and
/// must return the scalar output node. The analytical gradient of every
/// input is obtained with one backward pass; each numerical gradient
/// rebuilds the graph twice with that input shifted by `±epsilon`.
///
/// A pair passes when the absolute difference or the relative difference
/// is within `tolerance`.
///
/// # Returns
/// The analytical gradients, in input order.
pub fn check_grad<T, F>(
    func: F,
    inputs: &[T],
    epsilon: f64,
    tolerance: f64,
) -> Result<Vec<T>, GradCheckError>
where
    T: Float,
    F: Fn(&mut Graph<T>, &[ValueId]) -> Result<ValueId, AutogradError>,
{
    // --- 1. Forward and backward on the unperturbed inputs ---
    let mut graph = Graph::new();
    let leaves: Vec<ValueId> = inputs.iter().map(|&x| graph.leaf(x)).collect();
    let output = func(&mut graph, &leaves)?;
    graph.backward(output)?;
    let analytical = leaves
        .iter()
        .map(|&leaf| graph.grad(leaf))
        .collect::<Result<Vec<T>, _>>()?;

    // --- 2. Central differences, one input at a time ---
    let shift: T = crate::scalar(epsilon);
    for (i, &grad) in analytical.iter().enumerate() {
        let loss_plus = evaluate_shifted(&func, inputs, i, shift)?;
        let loss_minus = evaluate_shifted(&func, inputs, i, -shift)?;
        let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon);
        let analytical_grad = grad.to_f64().unwrap_or(f64::NAN);

        if !numerical_grad.is_finite() {
            return Err(GradCheckError::NumericalGradNaNOrInfinite {
                input_index: i,
                loss_plus,
                loss_minus,
            });
        }
        if !analytical_grad.is_finite() {
            return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                input_index: i,
                value: analytical_grad,
            });
        }

        let close = approx::abs_diff_eq!(analytical_grad, numerical_grad, epsilon = tolerance)
            || approx::relative_eq!(analytical_grad, numerical_grad, max_relative = tolerance);
        if !close {
            return Err(GradCheckError::GradientMismatch {
                input_index: i,
                analytical_grad,
                numerical_grad,
                difference: (analytical_grad - numerical_grad).abs(),
            });
        }
    }
    log::debug!("Gradient check passed for {} inputs", inputs.len());

    Ok(analytical)
}

/// Runs `func` on a fresh graph with input `index` shifted by `shift` and
/// returns the output as `f64`.
fn evaluate_shifted<T, F>(func: &F, inputs: &[T], index: usize, shift: T) -> Result<f64, GradCheckError>
where
    T: Float,
    F: Fn(&mut Graph<T>, &[ValueId]) -> Result<ValueId, AutogradError>,
{
    let mut graph = Graph::new();
    let leaves: Vec<ValueId> = inputs
        .iter()
        .enumerate()
        .map(|(j, &x)| graph.leaf(if j == index { x + shift } else { x }))
        .collect();
    let output = func(&mut graph, &leaves)?;
    Ok(graph.data(output)?.to_f64().unwrap_or(f64::NAN))
}
