//! The arena holding every node of a computation graph.

use crate::error::AutogradError;
use crate::value::{Op, Operand, Value, ValueId};
use num_traits::Float;

/// Arena of [`Value`]s forming a directed acyclic computation graph.
///
/// Nodes are appended by leaf constructors and by the primitive operations
/// (see the [`ops`](crate::ops) module) and are never removed individually.
/// A node may only refer to nodes created before it, so the arena order is
/// always a valid topological order and cycles cannot be expressed.
///
/// The scalar type defaults to `f64`; any [`Float`] works.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph<T = f64> {
    pub(crate) nodes: Vec<Value<T>>,
}

/// Marker of the arena length at some point, used to drop everything built
/// afterwards with [`Graph::rewind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    len: usize,
}

impl<T: Float> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Graph<T> {
    pub fn new() -> Self {
        Graph { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Graph {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over all nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (ValueId, &Value<T>)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, value)| (ValueId(index), value))
    }

    // --- Leaves ---

    /// Creates an input leaf holding `data`.
    pub fn leaf(&mut self, data: T) -> ValueId {
        self.push(Value::new(data, Op::Leaf))
    }

    /// Creates an input leaf with a diagnostic label.
    pub fn leaf_labeled(&mut self, data: T, label: impl Into<String>) -> ValueId {
        let id = self.leaf(data);
        self.nodes[id.0].label = Some(label.into());
        id
    }

    /// Creates a constant leaf. Constants are ordinary leaves; they still
    /// receive a gradient during backward, which callers are free to ignore.
    pub fn constant(&mut self, data: T) -> ValueId {
        self.leaf(data)
    }

    /// Resolves an operand to a node, wrapping a bare scalar into a fresh
    /// constant leaf.
    ///
    /// # Errors
    /// `UnknownValue` if the operand is a handle outside this graph.
    pub fn promote(&mut self, operand: impl Into<Operand<T>>) -> Result<ValueId, AutogradError> {
        match operand.into() {
            Operand::Value(id) => {
                self.check(id)?;
                Ok(id)
            }
            Operand::Scalar(data) => Ok(self.constant(data)),
        }
    }

    // --- Accessors ---

    /// Returns the node behind `id`.
    pub fn value(&self, id: ValueId) -> Result<&Value<T>, AutogradError> {
        self.nodes.get(id.0).ok_or(AutogradError::UnknownValue {
            id: id.0,
            len: self.nodes.len(),
        })
    }

    fn value_mut(&mut self, id: ValueId) -> Result<&mut Value<T>, AutogradError> {
        let len = self.nodes.len();
        self.nodes
            .get_mut(id.0)
            .ok_or(AutogradError::UnknownValue { id: id.0, len })
    }

    pub fn data(&self, id: ValueId) -> Result<T, AutogradError> {
        self.value(id).map(Value::data)
    }

    pub fn grad(&self, id: ValueId) -> Result<T, AutogradError> {
        self.value(id).map(Value::grad)
    }

    pub fn op(&self, id: ValueId) -> Result<&Op<T>, AutogradError> {
        self.value(id).map(Value::op)
    }

    pub fn label(&self, id: ValueId) -> Result<Option<&str>, AutogradError> {
        self.value(id).map(Value::label)
    }

    /// Handles of the nodes `id` was computed from, in operand order.
    pub fn predecessors(&self, id: ValueId) -> Result<Vec<ValueId>, AutogradError> {
        Ok(self.value(id)?.predecessors().collect())
    }

    /// Overwrites the forward value of a node.
    ///
    /// Meant for optimizer updates of parameter leaves between training
    /// steps. Nodes already built on top of `id` keep the value they were
    /// computed with, and so does their backward rule.
    pub fn set_data(&mut self, id: ValueId, data: T) -> Result<(), AutogradError> {
        self.value_mut(id)?.data = data;
        Ok(())
    }

    pub fn set_grad(&mut self, id: ValueId, grad: T) -> Result<(), AutogradError> {
        self.value_mut(id)?.grad = grad;
        Ok(())
    }

    pub fn set_label(&mut self, id: ValueId, label: impl Into<String>) -> Result<(), AutogradError> {
        self.value_mut(id)?.label = Some(label.into());
        Ok(())
    }

    // --- Lifecycle ---

    /// Remembers the current arena length.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            len: self.nodes.len(),
        }
    }

    /// Drops every node created after `checkpoint`.
    ///
    /// Handles to dropped nodes must not be used afterwards: once new nodes
    /// are created they would designate those instead.
    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        let dropped = self.nodes.len().saturating_sub(checkpoint.len);
        self.nodes.truncate(checkpoint.len);
        log::debug!(
            "Graph rewound to {} nodes ({} dropped)",
            self.nodes.len(),
            dropped
        );
    }

    // --- Internals ---

    pub(crate) fn check(&self, id: ValueId) -> Result<(), AutogradError> {
        self.value(id).map(|_| ())
    }

    pub(crate) fn push(&mut self, value: Value<T>) -> ValueId {
        let id = ValueId(self.nodes.len());
        self.nodes.push(value);
        id
    }
}
