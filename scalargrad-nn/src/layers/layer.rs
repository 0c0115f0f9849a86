use crate::activation::Activation;
use crate::error::NnError;
use crate::init::Init;
use crate::layers::neuron::Neuron;
use crate::module::{check_width, Module};
use rand::Rng;
use scalargrad_core::num_traits::Float;
use scalargrad_core::{Graph, ValueId};

/// A row of neurons reading the same inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    neurons: Vec<Neuron>,
    n_inputs: usize,
}

impl Layer {
    pub fn new<T, R>(
        graph: &mut Graph<T>,
        n_inputs: usize,
        n_outputs: usize,
        activation: Activation,
        init: Init,
        rng: &mut R,
    ) -> Result<Self, NnError>
    where
        T: Float,
        R: Rng + ?Sized,
    {
        if n_outputs == 0 {
            return Err(NnError::InvalidConfig(
                "a layer needs at least one neuron".to_string(),
            ));
        }
        let neurons = (0..n_outputs)
            .map(|_| Neuron::new(graph, n_inputs, activation, init, rng))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Layer { neurons, n_inputs })
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn parameters(&self) -> Vec<ValueId> {
        self.neurons.iter().flat_map(Neuron::parameters).collect()
    }

    pub fn named_parameters(&self) -> Vec<(String, ValueId)> {
        self.neurons
            .iter()
            .enumerate()
            .flat_map(|(j, neuron)| {
                neuron
                    .named_parameters()
                    .into_iter()
                    .map(move |(name, id)| (format!("neuron{}.{}", j, name), id))
            })
            .collect()
    }

    pub fn num_parameters(&self) -> usize {
        self.neurons.iter().map(Neuron::num_parameters).sum()
    }

    pub fn n_inputs(&self) -> usize {
        self.n_inputs
    }

    pub fn n_outputs(&self) -> usize {
        self.neurons.len()
    }
}

impl<T: Float> Module<T> for Layer {
    fn forward(&self, graph: &mut Graph<T>, inputs: &[ValueId]) -> Result<Vec<ValueId>, NnError> {
        check_width(self.n_inputs, inputs.len(), "Layer::forward")?;
        self.neurons
            .iter()
            .map(|neuron| neuron.forward_one(graph, inputs))
            .collect()
    }

    fn parameters(&self) -> Vec<ValueId> {
        Layer::parameters(self)
    }

    fn named_parameters(&self) -> Vec<(String, ValueId)> {
        Layer::named_parameters(self)
    }

    fn n_inputs(&self) -> usize {
        Layer::n_inputs(self)
    }

    fn n_outputs(&self) -> usize {
        Layer::n_outputs(self)
    }
}
