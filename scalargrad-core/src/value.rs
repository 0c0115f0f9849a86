//! Graph nodes and the tags recording how each node was produced.
//!
//! A [`Value`] is one scalar of the computation graph. It lives inside a
//! [`Graph`](crate::graph::Graph) arena and is addressed by a copyable
//! [`ValueId`]. The [`Op`] stored with each value records which primitive
//! produced it, the handles of its operands and the forward values needed by
//! its backward rule, frozen at construction time.

use num_traits::Float;
use std::fmt;

/// Handle to a node of a [`Graph`](crate::graph::Graph).
///
/// Handles are plain arena indices: copying one is free and two handles are
/// equal exactly when they designate the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueId(pub(crate) usize);

impl ValueId {
    /// Position of the node in its graph's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

/// An operand of a primitive together with its forward value at the time the
/// primitive was applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Input<T> {
    pub id: ValueId,
    pub data: T,
}

/// Tag identifying the primitive that produced a node.
///
/// Backward propagation is a single `match` on this tag; every variant
/// carries what its local derivative needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Op<T> {
    /// Input or constant; nothing to propagate.
    Leaf,
    Add([Input<T>; 2]),
    Mul([Input<T>; 2]),
    Pow { base: Input<T>, exponent: T },
    Exp { input: Input<T>, output: T },
    Tanh { input: Input<T>, output: T },
    Sigmoid { input: Input<T>, output: T },
    Relu { input: Input<T> },
    LeakyRelu { input: Input<T>, alpha: T },
    Softplus { input: Input<T> },
}

impl<T: Float> Op<T> {
    /// Operands of the primitive, in the order they were passed.
    pub fn inputs(&self) -> &[Input<T>] {
        match self {
            Op::Leaf => &[],
            Op::Add(inputs) | Op::Mul(inputs) => &inputs[..],
            Op::Pow { base: input, .. }
            | Op::Exp { input, .. }
            | Op::Tanh { input, .. }
            | Op::Sigmoid { input, .. }
            | Op::Relu { input }
            | Op::LeakyRelu { input, .. }
            | Op::Softplus { input } => std::slice::from_ref(input),
        }
    }

    /// Handles of the predecessors of the node, in operand order.
    pub fn predecessors(&self) -> impl DoubleEndedIterator<Item = ValueId> + '_ {
        self.inputs().iter().map(|input| input.id)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Op::Leaf)
    }

    /// Short diagnostic tag: `""` for leaves, `"+"`, `"*"`, `"**2"`, `"tanh"`...
    pub fn symbol(&self) -> String {
        match self {
            Op::Leaf => String::new(),
            Op::Add(_) => "+".to_string(),
            Op::Mul(_) => "*".to_string(),
            Op::Pow { exponent, .. } => format!("**{}", fmt_scalar(*exponent)),
            Op::Exp { .. } => "exp".to_string(),
            Op::Tanh { .. } => "tanh".to_string(),
            Op::Sigmoid { .. } => "sigmoid".to_string(),
            Op::Relu { .. } => "relu".to_string(),
            Op::LeakyRelu { alpha, .. } => format!("leaky_relu{}", fmt_scalar(*alpha)),
            Op::Softplus { .. } => "softplus".to_string(),
        }
    }

    /// Pushes `upstream` (the gradient of the output of this primitive) into
    /// the pass gradients of its operands.
    pub(crate) fn propagate(&self, upstream: T, adjoints: &mut [T]) {
        let mut accumulate = |id: ValueId, contribution: T| {
            adjoints[id.0] = adjoints[id.0] + contribution;
        };
        match self {
            Op::Leaf => {}
            Op::Add([a, b]) => {
                accumulate(a.id, upstream);
                accumulate(b.id, upstream);
            }
            Op::Mul([a, b]) => {
                accumulate(a.id, b.data * upstream);
                accumulate(b.id, a.data * upstream);
            }
            Op::Pow { base, exponent } => {
                let local = *exponent * base.data.powf(*exponent - T::one());
                accumulate(base.id, local * upstream);
            }
            Op::Exp { input, output } => accumulate(input.id, *output * upstream),
            Op::Tanh { input, output } => {
                accumulate(input.id, (T::one() - *output * *output) * upstream)
            }
            Op::Sigmoid { input, output } => {
                accumulate(input.id, *output * (T::one() - *output) * upstream)
            }
            Op::Relu { input } => {
                if input.data > T::zero() {
                    accumulate(input.id, upstream);
                }
            }
            Op::LeakyRelu { input, alpha } => {
                let slope = if input.data > T::zero() { T::one() } else { *alpha };
                accumulate(input.id, slope * upstream);
            }
            Op::Softplus { input } => {
                accumulate(input.id, softplus_slope(input.data) * upstream)
            }
        }
    }
}

impl<T: Float> fmt::Display for Op<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol())
    }
}

/// Beyond this input softplus is treated as the identity.
pub(crate) const SOFTPLUS_THRESHOLD: f64 = 20.0;

/// Derivative of softplus: the logistic function, pinned to exactly one
/// above the threshold.
pub(crate) fn softplus_slope<T: Float>(x: T) -> T {
    if x > crate::scalar(SOFTPLUS_THRESHOLD) {
        T::one()
    } else {
        T::one() / (T::one() + (-x).exp())
    }
}

fn fmt_scalar<T: Float>(value: T) -> String {
    match value.to_f64() {
        Some(v) => format!("{}", v),
        None => "?".to_string(),
    }
}

/// One scalar node of the computation graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Value<T> {
    pub(crate) data: T,
    pub(crate) grad: T,
    pub(crate) op: Op<T>,
    pub(crate) label: Option<String>,
}

impl<T: Float> Value<T> {
    pub(crate) fn new(data: T, op: Op<T>) -> Self {
        Value {
            data,
            grad: T::zero(),
            op,
            label: None,
        }
    }

    /// Current forward value.
    pub fn data(&self) -> T {
        self.data
    }

    /// Gradient accumulated by backward passes since the last reset.
    pub fn grad(&self) -> T {
        self.grad
    }

    pub fn op(&self) -> &Op<T> {
        &self.op
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.op.is_leaf()
    }

    pub fn predecessors(&self) -> impl DoubleEndedIterator<Item = ValueId> + '_ {
        self.op.predecessors()
    }
}

impl<T: Float> fmt::Display for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value(data={})", fmt_scalar(self.data))
    }
}

/// Argument of a primitive: either an existing node or a bare scalar.
///
/// Scalars are never used directly; the graph promotes them to constant
/// leaves (see [`Graph::promote`](crate::graph::Graph::promote)) before the
/// primitive runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand<T> {
    Value(ValueId),
    Scalar(T),
}

impl<T> From<ValueId> for Operand<T> {
    fn from(id: ValueId) -> Self {
        Operand::Value(id)
    }
}

impl From<f64> for Operand<f64> {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl From<f32> for Operand<f32> {
    fn from(value: f32) -> Self {
        Operand::Scalar(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(id: usize, data: f64) -> Input<f64> {
        Input { id: ValueId(id), data }
    }

    #[test]
    fn test_op_symbols() {
        let a = input(0, 2.0);
        assert_eq!(Op::<f64>::Leaf.symbol(), "");
        assert_eq!(Op::Add([a, a]).symbol(), "+");
        assert_eq!(Op::Mul([a, a]).symbol(), "*");
        assert_eq!(Op::Pow { base: a, exponent: 2.0 }.symbol(), "**2");
        assert_eq!(Op::Pow { base: a, exponent: -1.0 }.symbol(), "**-1");
        assert_eq!(Op::LeakyRelu { input: a, alpha: 0.01 }.to_string(), "leaky_relu0.01");
        assert_eq!(Op::Softplus { input: a }.to_string(), "softplus");
    }

    #[test]
    fn test_predecessors_in_operand_order() {
        let op = Op::Mul([input(3, 1.0), input(1, 2.0)]);
        let preds: Vec<ValueId> = op.predecessors().collect();
        assert_eq!(preds, vec![ValueId(3), ValueId(1)]);
        assert_eq!(Op::<f64>::Leaf.predecessors().count(), 0);
    }

    #[test]
    fn test_propagate_accumulates_into_shared_operand() {
        // x * x: both operand slots point at the same node
        let x = input(0, 3.0);
        let mut adjoints = vec![0.0, 0.0];
        Op::Mul([x, x]).propagate(1.0, &mut adjoints);
        assert_eq!(adjoints[0], 6.0);
    }

    #[test]
    fn test_value_display() {
        let v = Value::new(2.5_f64, Op::Leaf);
        assert_eq!(v.to_string(), "Value(data=2.5)");
        assert_eq!(v.grad(), 0.0);
        assert!(v.is_leaf());
        assert_eq!(v.label(), None);
    }

    #[test]
    fn test_operand_conversions() {
        assert_eq!(Operand::<f64>::from(ValueId(4)), Operand::Value(ValueId(4)));
        assert_eq!(Operand::from(1.5_f64), Operand::Scalar(1.5));
        assert_eq!(Operand::from(1.5_f32), Operand::Scalar(1.5_f32));
    }
}
