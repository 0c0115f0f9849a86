//! # Operation registry (`ops`)
//!
//! Every differentiable primitive is a method on [`Graph`]. A primitive
//! computes its forward value, appends exactly one output node and records an
//! [`Op`] tag holding what the backward pass needs. Composite operations
//! (`div`, `neg`, `sub`, `sum`) are expressed through the primitives and add
//! one node per primitive they use.
//!
//! ## Submodules
//!
//! - [`arithmetic`]: add, mul, pow, div, neg, sub, sum.
//! - [`math_elem`]: exp, tanh.
//! - [`activation`]: sigmoid, relu, leaky relu, softplus.

pub mod activation;
pub mod arithmetic;
pub mod math_elem;

pub use activation::LEAKY_RELU_DEFAULT_ALPHA;

use crate::error::AutogradError;
use crate::graph::Graph;
use crate::value::{Input, Op, Operand, Value, ValueId};
use num_traits::Float;

impl<T: Float> Graph<T> {
    /// Applies a one-operand primitive.
    ///
    /// # Arguments
    /// * `input`: The operand node.
    /// * `forward`: Computes the output from the operand's data.
    /// * `build_op`: Builds the tag from the frozen operand and output.
    /// * `op_name`: Name of the operation for tracing.
    pub(crate) fn apply_unary_op<F, B>(
        &mut self,
        input: ValueId,
        forward: F,
        build_op: B,
        op_name: &str,
    ) -> Result<ValueId, AutogradError>
    where
        F: FnOnce(T) -> T,
        B: FnOnce(Input<T>, T) -> Op<T>,
    {
        let data = self.data(input)?;
        let output = forward(data);
        let op = build_op(Input { id: input, data }, output);
        let id = self.push(Value::new(output, op));
        log::trace!("{}({}) -> {}", op_name, input, id);
        Ok(id)
    }

    /// Applies a two-operand primitive, promoting scalar operands to
    /// constant leaves first (left operand first).
    pub(crate) fn apply_binary_op<F, B>(
        &mut self,
        lhs: Operand<T>,
        rhs: Operand<T>,
        forward: F,
        build_op: B,
        op_name: &str,
    ) -> Result<ValueId, AutogradError>
    where
        F: FnOnce(T, T) -> T,
        B: FnOnce([Input<T>; 2]) -> Op<T>,
    {
        let lhs = self.promote(lhs)?;
        let rhs = self.promote(rhs)?;
        let lhs_data = self.data(lhs)?;
        let rhs_data = self.data(rhs)?;
        let output = forward(lhs_data, rhs_data);
        let op = build_op([
            Input { id: lhs, data: lhs_data },
            Input { id: rhs, data: rhs_data },
        ]);
        let id = self.push(Value::new(output, op));
        log::trace!("{}({}, {}) -> {}", op_name, lhs, rhs, id);
        Ok(id)
    }
}
