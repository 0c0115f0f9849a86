use crate::error::NnError;
use crate::optim::optimizer_trait::Optimizer;
use scalargrad_core::num_traits::Float;
use scalargrad_core::{Graph, ValueId};

/// Plain stochastic gradient descent: `p ← p - lr · ∂L/∂p`.
#[derive(Debug, Clone)]
pub struct Sgd<T: Float> {
    params: Vec<ValueId>,
    learning_rate: T,
    steps: usize,
}

impl<T: Float> Sgd<T> {
    /// Creates an optimizer over `params`.
    ///
    /// # Errors
    /// `InvalidConfig` if `learning_rate` is not finite and positive.
    pub fn new(
        params: impl IntoIterator<Item = ValueId>,
        learning_rate: T,
    ) -> Result<Self, NnError> {
        validate_learning_rate(learning_rate)?;
        Ok(Sgd {
            params: params.into_iter().collect(),
            learning_rate,
            steps: 0,
        })
    }

    /// Number of completed calls to [`step`](Optimizer::step).
    pub fn steps(&self) -> usize {
        self.steps
    }
}

impl<T: Float> Optimizer<T> for Sgd<T> {
    fn step(&mut self, graph: &mut Graph<T>) -> Result<(), NnError> {
        for &param in &self.params {
            let data = graph.data(param)?;
            let grad = graph.grad(param)?;
            graph.set_data(param, data - self.learning_rate * grad)?;
        }
        self.steps += 1;
        log::debug!("SGD step {} over {} parameters", self.steps, self.params.len());
        Ok(())
    }

    fn zero_grad(&mut self, graph: &mut Graph<T>) -> Result<(), NnError> {
        graph.zero_grad_of(&self.params)?;
        Ok(())
    }

    fn params(&self) -> &[ValueId] {
        &self.params
    }

    fn learning_rate(&self) -> T {
        self.learning_rate
    }

    fn set_learning_rate(&mut self, learning_rate: T) -> Result<(), NnError> {
        validate_learning_rate(learning_rate)?;
        self.learning_rate = learning_rate;
        Ok(())
    }
}

fn validate_learning_rate<T: Float>(learning_rate: T) -> Result<(), NnError> {
    if !(learning_rate.is_finite() && learning_rate > T::zero()) {
        return Err(NnError::InvalidConfig(format!(
            "learning rate must be finite and positive, got {:?}",
            learning_rate.to_f64()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
