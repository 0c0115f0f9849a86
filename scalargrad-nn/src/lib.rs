//! # scalargrad-nn
//!
//! Small neural networks on top of `scalargrad-core`: neurons computing
//! `activation(w·x + b)`, layers of neurons sharing their inputs, and
//! multi-layer perceptrons chaining layers. Parameters are leaves of a
//! [`Graph`](scalargrad_core::Graph) and are trained with plain gradient
//! descent through the [`Optimizer`] trait.

pub mod activation;
pub mod error;
pub mod init;
pub mod layers;
pub mod losses;
pub mod module;
pub mod optim;
pub mod train;

pub use activation::Activation;
pub use error::NnError;
pub use init::Init;
pub use layers::{Layer, Mlp, Neuron};
pub use module::Module;
pub use optim::{Optimizer, Sgd};
pub use train::TrainConfig;

use scalargrad_core::num_traits::{Float, NumCast};

/// Converts a configuration constant to the graph's scalar type.
pub(crate) fn cast<T: Float>(value: f64, what: &str) -> Result<T, NnError> {
    <T as NumCast>::from(value).ok_or_else(|| {
        NnError::InvalidConfig(format!("{} {} is not representable", what, value))
    })
}
