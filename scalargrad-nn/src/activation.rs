use scalargrad_core::num_traits::Float;
use scalargrad_core::{AutogradError, Graph, ValueId};

/// Nonlinearity applied by a [`Neuron`](crate::Neuron) to its weighted sum.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Activation {
    #[default]
    Tanh,
    Relu,
    LeakyRelu {
        alpha: f64,
    },
    Sigmoid,
    Softplus,
    /// No nonlinearity, e.g. for a regression output layer.
    Identity,
}

impl Activation {
    /// Appends the activation of `input` to `graph`. `Identity` returns
    /// `input` without allocating.
    pub fn apply<T: Float>(
        self,
        graph: &mut Graph<T>,
        input: ValueId,
    ) -> Result<ValueId, AutogradError> {
        match self {
            Activation::Tanh => graph.tanh(input),
            Activation::Relu => graph.relu(input),
            Activation::LeakyRelu { alpha } => {
                let alpha = <T as scalargrad_core::num_traits::NumCast>::from(alpha)
                    .ok_or_else(|| AutogradError::InvalidArgument {
                        operation: "leaky_relu".to_string(),
                        reason: format!("alpha {} is not representable", alpha),
                    })?;
                graph.leaky_relu_with_alpha(input, alpha)
            }
            Activation::Sigmoid => graph.sigmoid(input),
            Activation::Softplus => graph.softplus(input),
            Activation::Identity => Ok(input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scalargrad_core::Op;

    #[test]
    fn test_apply_records_matching_op() {
        let mut graph: Graph = Graph::new();
        let x = graph.leaf(-0.5);

        let cases = [
            (Activation::Tanh, "tanh"),
            (Activation::Relu, "relu"),
            (Activation::LeakyRelu { alpha: 0.1 }, "leaky_relu0.1"),
            (Activation::Sigmoid, "sigmoid"),
            (Activation::Softplus, "softplus"),
        ];
        for (activation, symbol) in cases {
            let y = activation.apply(&mut graph, x).unwrap();
            assert_eq!(graph.op(y).unwrap().symbol(), symbol);
        }
    }

    #[test]
    fn test_identity_does_not_allocate() {
        let mut graph: Graph = Graph::new();
        let x = graph.leaf(2.0);
        let y = Activation::Identity.apply(&mut graph, x).unwrap();
        assert_eq!(y, x);
        assert_eq!(graph.len(), 1);
        assert!(matches!(graph.op(y).unwrap(), Op::Leaf));
    }

    #[test]
    fn test_default_is_tanh() {
        assert_eq!(Activation::default(), Activation::Tanh);
    }
}
