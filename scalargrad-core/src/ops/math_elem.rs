use crate::error::AutogradError;
use crate::graph::Graph;
use crate::value::{Op, ValueId};
use num_traits::Float;

impl<T: Float> Graph<T> {
    /// `e^input`.
    pub fn exp(&mut self, input: ValueId) -> Result<ValueId, AutogradError> {
        self.apply_unary_op(
            input,
            |x| x.exp(),
            |input, output| Op::Exp { input, output },
            "exp",
        )
    }

    /// Hyperbolic tangent, `(e^2x - 1) / (e^2x + 1)`.
    ///
    /// Evaluated with `Float::tanh`, which saturates to `±1` instead of
    /// producing `inf / inf` for large inputs.
    pub fn tanh(&mut self, input: ValueId) -> Result<ValueId, AutogradError> {
        self.apply_unary_op(
            input,
            |x| x.tanh(),
            |input, output| Op::Tanh { input, output },
            "tanh",
        )
    }
}
