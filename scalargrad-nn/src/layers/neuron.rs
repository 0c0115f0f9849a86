use crate::activation::Activation;
use crate::error::NnError;
use crate::init::Init;
use crate::module::{check_width, Module};
use rand::Rng;
use scalargrad_core::num_traits::Float;
use scalargrad_core::{Graph, ValueId};

/// A single unit computing `activation(b + Σ wᵢ·xᵢ)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Neuron {
    weights: Vec<ValueId>,
    bias: ValueId,
    activation: Activation,
}

impl Neuron {
    /// Creates a neuron with `n_inputs` weights and a bias, all drawn from
    /// `init`, as leaves of `graph` labelled `w0..wN` and `b`.
    pub fn new<T, R>(
        graph: &mut Graph<T>,
        n_inputs: usize,
        activation: Activation,
        init: Init,
        rng: &mut R,
    ) -> Result<Self, NnError>
    where
        T: Float,
        R: Rng + ?Sized,
    {
        let initial: Vec<T> = init.sample(n_inputs + 1, rng)?;
        let weights = initial[..n_inputs]
            .iter()
            .enumerate()
            .map(|(i, &w)| graph.leaf_labeled(w, format!("w{}", i)))
            .collect();
        let bias = graph.leaf_labeled(initial[n_inputs], "b");
        Ok(Neuron {
            weights,
            bias,
            activation,
        })
    }

    pub fn weights(&self) -> &[ValueId] {
        &self.weights
    }

    pub fn bias(&self) -> ValueId {
        self.bias
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Weights followed by the bias.
    pub fn parameters(&self) -> Vec<ValueId> {
        let mut params = self.weights.clone();
        params.push(self.bias);
        params
    }

    pub fn named_parameters(&self) -> Vec<(String, ValueId)> {
        let mut named: Vec<(String, ValueId)> = self
            .weights
            .iter()
            .enumerate()
            .map(|(i, &w)| (format!("w{}", i), w))
            .collect();
        named.push(("b".to_string(), self.bias));
        named
    }

    pub fn num_parameters(&self) -> usize {
        self.weights.len() + 1
    }

    pub fn n_inputs(&self) -> usize {
        self.weights.len()
    }

    /// Forward pass returning the single output node.
    pub fn forward_one<T: Float>(
        &self,
        graph: &mut Graph<T>,
        inputs: &[ValueId],
    ) -> Result<ValueId, NnError> {
        check_width(self.weights.len(), inputs.len(), "Neuron::forward")?;
        let mut terms = Vec::with_capacity(inputs.len() + 1);
        terms.push(self.bias);
        for (&w, &x) in self.weights.iter().zip(inputs) {
            terms.push(graph.mul(w, x)?);
        }
        let activation_input = graph.sum(&terms)?;
        Ok(self.activation.apply(graph, activation_input)?)
    }
}

impl<T: Float> Module<T> for Neuron {
    fn forward(&self, graph: &mut Graph<T>, inputs: &[ValueId]) -> Result<Vec<ValueId>, NnError> {
        Ok(vec![self.forward_one(graph, inputs)?])
    }

    fn parameters(&self) -> Vec<ValueId> {
        Neuron::parameters(self)
    }

    fn named_parameters(&self) -> Vec<(String, ValueId)> {
        Neuron::named_parameters(self)
    }

    fn n_inputs(&self) -> usize {
        Neuron::n_inputs(self)
    }

    fn n_outputs(&self) -> usize {
        1
    }
}
