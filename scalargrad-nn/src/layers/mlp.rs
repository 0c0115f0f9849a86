use crate::activation::Activation;
use crate::error::NnError;
use crate::init::Init;
use crate::layers::layer::Layer;
use crate::module::Module;
use rand::Rng;
use scalargrad_core::num_traits::Float;
use scalargrad_core::{Graph, ValueId};

/// Multi-layer perceptron: layers chained so each one reads the previous
/// layer's outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Mlp {
    layers: Vec<Layer>,
}

impl Mlp {
    /// Builds a perceptron with `n_inputs` features and one layer per entry
    /// of `layer_sizes`. Every layer uses `activation`.
    ///
    /// Parameters are labelled `layer{k}.neuron{j}.w{i}` / `...b` in `graph`.
    ///
    /// # Errors
    /// `InvalidConfig` if `layer_sizes` is empty or contains a zero, or if
    /// `init` is invalid.
    pub fn new<T, R>(
        graph: &mut Graph<T>,
        n_inputs: usize,
        layer_sizes: &[usize],
        activation: Activation,
        init: Init,
        rng: &mut R,
    ) -> Result<Self, NnError>
    where
        T: Float,
        R: Rng + ?Sized,
    {
        if layer_sizes.is_empty() {
            return Err(NnError::InvalidConfig(
                "an MLP needs at least one layer".to_string(),
            ));
        }
        let mut layers = Vec::with_capacity(layer_sizes.len());
        let mut width = n_inputs;
        for &size in layer_sizes {
            layers.push(Layer::new(graph, width, size, activation, init, rng)?);
            width = size;
        }
        let mlp = Mlp { layers };
        mlp.label_parameters(graph)?;
        log::debug!(
            "Built MLP {:?} with {} parameters",
            mlp.shape(),
            mlp.num_parameters()
        );
        Ok(mlp)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Widths from the input features through every layer, e.g. `[3, 4, 4, 1]`.
    pub fn shape(&self) -> Vec<usize> {
        let mut shape = Vec::with_capacity(self.layers.len() + 1);
        if let Some(first) = self.layers.first() {
            shape.push(first.n_inputs());
        }
        shape.extend(self.layers.iter().map(Layer::n_outputs));
        shape
    }

    pub fn parameters(&self) -> Vec<ValueId> {
        self.layers.iter().flat_map(Layer::parameters).collect()
    }

    pub fn named_parameters(&self) -> Vec<(String, ValueId)> {
        self.layers
            .iter()
            .enumerate()
            .flat_map(|(k, layer)| {
                layer
                    .named_parameters()
                    .into_iter()
                    .map(move |(name, id)| (format!("layer{}.{}", k, name), id))
            })
            .collect()
    }

    pub fn num_parameters(&self) -> usize {
        self.layers.iter().map(Layer::num_parameters).sum()
    }

    pub fn n_inputs(&self) -> usize {
        self.layers.first().map_or(0, Layer::n_inputs)
    }

    pub fn n_outputs(&self) -> usize {
        self.layers.last().map_or(0, Layer::n_outputs)
    }

    /// Forward pass for a perceptron with a single output unit.
    pub fn forward_scalar<T: Float>(
        &self,
        graph: &mut Graph<T>,
        inputs: &[ValueId],
    ) -> Result<ValueId, NnError> {
        let outputs = Module::<T>::forward(self, graph, inputs)?;
        match outputs.as_slice() {
            [single] => Ok(*single),
            _ => Err(NnError::DimensionMismatch {
                expected: 1,
                actual: outputs.len(),
                context: "Mlp::forward_scalar".to_string(),
            }),
        }
    }
}

impl<T: Float> Module<T> for Mlp {
    fn forward(&self, graph: &mut Graph<T>, inputs: &[ValueId]) -> Result<Vec<ValueId>, NnError> {
        let mut activations = inputs.to_vec();
        for layer in &self.layers {
            activations = layer.forward(graph, &activations)?;
        }
        Ok(activations)
    }

    fn parameters(&self) -> Vec<ValueId> {
        Mlp::parameters(self)
    }

    fn named_parameters(&self) -> Vec<(String, ValueId)> {
        Mlp::named_parameters(self)
    }

    fn n_inputs(&self) -> usize {
        Mlp::n_inputs(self)
    }

    fn n_outputs(&self) -> usize {
        Mlp::n_outputs(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::constants;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn build(graph: &mut Graph, sizes: &[usize]) -> Result<Mlp, NnError> {
        let mut rng = StdRng::seed_from_u64(1337);
        Mlp::new(graph, 3, sizes, Activation::Tanh, Init::default(), &mut rng)
    }

    #[test]
    fn test_mlp_parameter_count() -> Result<(), NnError> {
        let mut graph: Graph = Graph::new();
        let mlp = build(&mut graph, &[4, 4, 1])?;
        assert_eq!(mlp.shape(), vec![3, 4, 4, 1]);
        // (3+1)*4 + (4+1)*4 + (4+1)*1
        assert_eq!(mlp.num_parameters(), 41);
        assert_eq!(graph.len(), 41);
        Ok(())
    }

    #[test]
    fn test_mlp_labels_parameters() -> Result<(), NnError> {
        let mut graph: Graph = Graph::new();
        let mlp = build(&mut graph, &[2, 1])?;
        let named = mlp.named_parameters();
        assert_eq!(named[0].0, "layer0.neuron0.w0");
        let (last_name, last_id) = named.last().cloned().unwrap();
        assert_eq!(last_name, "layer1.neuron0.b");
        assert_eq!(graph.label(last_id)?, Some("layer1.neuron0.b"));
        Ok(())
    }

    #[test]
    fn test_mlp_forward_scalar() -> Result<(), NnError> {
        let mut graph: Graph = Graph::new();
        let mlp = build(&mut graph, &[4, 4, 1])?;
        let inputs = constants(&mut graph, &[2.0, 3.0, -1.0]);
        let out = mlp.forward_scalar(&mut graph, &inputs)?;
        let y = graph.data(out)?;
        assert!(y > -1.0 && y < 1.0);

        graph.backward(out)?;
        let touched = mlp
            .parameters()
            .into_iter()
            .filter(|&p| graph.grad(p).map(|g| g != 0.0).unwrap_or(false))
            .count();
        assert!(touched > 0);
        Ok(())
    }

    #[test]
    fn test_mlp_forward_scalar_rejects_wide_output() -> Result<(), NnError> {
        let mut graph: Graph = Graph::new();
        let mlp = build(&mut graph, &[2])?;
        let inputs = constants(&mut graph, &[0.0, 0.0, 0.0]);
        assert!(matches!(
            mlp.forward_scalar(&mut graph, &inputs),
            Err(NnError::DimensionMismatch { expected: 1, actual: 2, .. })
        ));
        Ok(())
    }

    #[test]
    fn test_mlp_rejects_empty_sizes() {
        let mut graph: Graph = Graph::new();
        assert!(matches!(build(&mut graph, &[]), Err(NnError::InvalidConfig(_))));
    }

    #[test]
    fn test_mlp_rejects_wrong_input_width() -> Result<(), NnError> {
        let mut graph: Graph = Graph::new();
        let mlp = build(&mut graph, &[1])?;
        let inputs = constants(&mut graph, &[1.0, 2.0]);
        assert!(matches!(
            mlp.forward(&mut graph, &inputs),
            Err(NnError::DimensionMismatch { expected: 3, actual: 2, .. })
        ));
        Ok(())
    }
}
