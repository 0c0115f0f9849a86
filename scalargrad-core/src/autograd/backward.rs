use crate::autograd::graph::topological_sort;
use crate::error::AutogradError;
use crate::graph::Graph;
use crate::value::ValueId;
use num_traits::Float;

impl<T: Float> Graph<T> {
    /// Performs the backward pass starting from `root`.
    ///
    /// After the call, every node reachable from `root` has had
    /// `∂root/∂node` added to its `grad` (the root itself receives `1`).
    /// Gradients are accumulated during the pass in a scratch buffer indexed
    /// by node, then added to the nodes' `grad` fields in one sweep, so a
    /// second call without [`zero_grad`](Self::zero_grad) adds exactly the
    /// same amounts again.
    ///
    /// Nodes not reachable from `root` are left untouched.
    ///
    /// # Errors
    /// `UnknownValue` if `root` is not a node of this graph.
    pub fn backward(&mut self, root: ValueId) -> Result<(), AutogradError> {
        self.check(root)?;
        let order = topological_sort(&self.nodes, root);
        log::trace!("backward from {}: {} reachable nodes", root, order.len());

        // Every predecessor has a smaller index than its consumer, so the
        // reachable set fits in 0..=root.
        let mut adjoints = vec![T::zero(); root.0 + 1];
        adjoints[root.0] = T::one();

        for &id in order.iter().rev() {
            let upstream = adjoints[id.0];
            self.nodes[id.0].op.propagate(upstream, &mut adjoints);
        }

        for id in order {
            let node = &mut self.nodes[id.0];
            node.grad = node.grad + adjoints[id.0];
        }
        Ok(())
    }

    /// The order in which [`backward`](Self::backward) visits the nodes
    /// reachable from `root`, producers first.
    pub fn topological_order(&self, root: ValueId) -> Result<Vec<ValueId>, AutogradError> {
        self.check(root)?;
        Ok(topological_sort(&self.nodes, root))
    }

    /// Resets the gradient of every node to zero.
    pub fn zero_grad(&mut self) {
        for node in &mut self.nodes {
            node.grad = T::zero();
        }
    }

    /// Resets the gradient of the given nodes to zero.
    pub fn zero_grad_of(&mut self, ids: &[ValueId]) -> Result<(), AutogradError> {
        for &id in ids {
            self.set_grad(id, T::zero())?;
        }
        Ok(())
    }
}
