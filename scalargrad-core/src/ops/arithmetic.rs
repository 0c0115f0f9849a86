// scalargrad-core/src/ops/arithmetic.rs

use crate::error::AutogradError;
use crate::graph::Graph;
use crate::value::{Input, Op, Operand, Value, ValueId};
use num_traits::Float;

impl<T: Float> Graph<T> {
    /// `lhs + rhs`.
    pub fn add(
        &mut self,
        lhs: impl Into<Operand<T>>,
        rhs: impl Into<Operand<T>>,
    ) -> Result<ValueId, AutogradError> {
        self.apply_binary_op(lhs.into(), rhs.into(), |a, b| a + b, Op::Add, "add")
    }

    /// `lhs * rhs`.
    pub fn mul(
        &mut self,
        lhs: impl Into<Operand<T>>,
        rhs: impl Into<Operand<T>>,
    ) -> Result<ValueId, AutogradError> {
        self.apply_binary_op(lhs.into(), rhs.into(), |a, b| a * b, Op::Mul, "mul")
    }

    /// Raises `base` to a fixed scalar power.
    ///
    /// # Errors
    /// * `InvalidArgument` if `exponent` is a node: only scalar exponents are
    ///   differentiable here.
    /// * `UnknownValue` if `base` is not a node of this graph.
    pub fn pow(
        &mut self,
        base: ValueId,
        exponent: impl Into<Operand<T>>,
    ) -> Result<ValueId, AutogradError> {
        let exponent = match exponent.into() {
            Operand::Scalar(exponent) => exponent,
            Operand::Value(id) => {
                return Err(AutogradError::InvalidArgument {
                    operation: "pow".to_string(),
                    reason: format!("exponent must be a scalar, got node {}", id),
                })
            }
        };
        let data = self.data(base)?;
        let id = self.push(Value::new(
            data.powf(exponent),
            Op::Pow {
                base: Input { id: base, data },
                exponent,
            },
        ));
        log::trace!("pow({}) -> {}", base, id);
        Ok(id)
    }

    /// `lhs / rhs`, built as `lhs * rhs^-1`.
    pub fn div(
        &mut self,
        lhs: impl Into<Operand<T>>,
        rhs: impl Into<Operand<T>>,
    ) -> Result<ValueId, AutogradError> {
        let lhs = self.promote(lhs)?;
        let rhs = self.promote(rhs)?;
        let reciprocal = self.pow(rhs, Operand::Scalar(-T::one()))?;
        self.mul(lhs, reciprocal)
    }

    /// `-input`, built as `input * -1`.
    pub fn neg(&mut self, input: ValueId) -> Result<ValueId, AutogradError> {
        self.mul(input, Operand::Scalar(-T::one()))
    }

    /// `lhs - rhs`, built as `lhs + (-rhs)`.
    pub fn sub(
        &mut self,
        lhs: impl Into<Operand<T>>,
        rhs: impl Into<Operand<T>>,
    ) -> Result<ValueId, AutogradError> {
        let lhs = self.promote(lhs)?;
        let rhs = self.promote(rhs)?;
        let negated = self.neg(rhs)?;
        self.add(lhs, negated)
    }

    /// Sum of `terms` as a left fold of `add`.
    ///
    /// An empty slice yields a constant `0` leaf; a single term is returned
    /// as is.
    pub fn sum(&mut self, terms: &[ValueId]) -> Result<ValueId, AutogradError> {
        let (first, rest) = match terms.split_first() {
            Some(split) => split,
            None => return Ok(self.constant(T::zero())),
        };
        self.check(*first)?;
        rest.iter()
            .try_fold(*first, |total, &term| self.add(total, term))
    }
}

#[cfg(test)]
#[path = "arithmetic_test.rs"]
mod tests;
