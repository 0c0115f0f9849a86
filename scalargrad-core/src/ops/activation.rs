//! Nonlinearities used as neuron activations.
//!
//! `sigmoid` and `softplus` follow a fixed numerical-stability policy:
//!
//! - sigmoid evaluates `1 / (1 + e^-x)` for `x >= 0` and `e^x / (1 + e^x)`
//!   for `x < 0`, so `e^-x` is never computed for large negative `x`.
//! - softplus returns `x` itself above a threshold of `20` and
//!   `ln(1 + e^x)` otherwise; its derivative is exactly `1` above the
//!   threshold.

use crate::error::AutogradError;
use crate::graph::Graph;
use crate::value::{Op, ValueId, SOFTPLUS_THRESHOLD};
use num_traits::Float;

/// Negative-side slope used by [`Graph::leaky_relu`].
pub const LEAKY_RELU_DEFAULT_ALPHA: f64 = 0.01;

impl<T: Float> Graph<T> {
    /// Logistic function `1 / (1 + e^-x)`, evaluated branch-stable.
    pub fn sigmoid(&mut self, input: ValueId) -> Result<ValueId, AutogradError> {
        self.apply_unary_op(
            input,
            stable_sigmoid,
            |input, output| Op::Sigmoid { input, output },
            "sigmoid",
        )
    }

    /// `max(0, x)`.
    pub fn relu(&mut self, input: ValueId) -> Result<ValueId, AutogradError> {
        self.apply_unary_op(
            input,
            |x| if x > T::zero() { x } else { T::zero() },
            |input, _| Op::Relu { input },
            "relu",
        )
    }

    /// Leaky ReLU with the default slope of `0.01`.
    pub fn leaky_relu(&mut self, input: ValueId) -> Result<ValueId, AutogradError> {
        self.leaky_relu_with_alpha(input, crate::scalar(LEAKY_RELU_DEFAULT_ALPHA))
    }

    /// `x` for positive inputs, `alpha * x` otherwise.
    pub fn leaky_relu_with_alpha(
        &mut self,
        input: ValueId,
        alpha: T,
    ) -> Result<ValueId, AutogradError> {
        self.apply_unary_op(
            input,
            |x| if x > T::zero() { x } else { alpha * x },
            |input, _| Op::LeakyRelu { input, alpha },
            "leaky_relu",
        )
    }

    /// `ln(1 + e^x)`, or `x` itself above the threshold.
    pub fn softplus(&mut self, input: ValueId) -> Result<ValueId, AutogradError> {
        self.apply_unary_op(
            input,
            |x| {
                if x > crate::scalar(SOFTPLUS_THRESHOLD) {
                    x
                } else {
                    (T::one() + x.exp()).ln()
                }
            },
            |input, _| Op::Softplus { input },
            "softplus",
        )
    }
}

fn stable_sigmoid<T: Float>(x: T) -> T {
    if x >= T::zero() {
        T::one() / (T::one() + (-x).exp())
    } else {
        let e = x.exp();
        e / (T::one() + e)
    }
}

#[cfg(test)]
#[path = "activation_test.rs"]
mod tests;
