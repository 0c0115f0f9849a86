//! # Training a small MLP on four samples
//!
//! Builds a `3 -> 4 -> 4 -> 1` tanh perceptron and fits it to a four-sample
//! binary target set with plain gradient descent on the sum of squared
//! errors. Each epoch builds its forward graph on top of the parameter
//! leaves and rewinds the graph afterwards.
//!
//! ## Running
//! `RUST_LOG=info cargo run -p scalargrad-nn --example train_mlp`

use rand::rngs::StdRng;
use rand::SeedableRng;
use scalargrad_core::Graph;
use scalargrad_nn::train::{fit, predict, TrainConfig};
use scalargrad_nn::{Activation, Init, Mlp, NnError};

fn main() -> Result<(), NnError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let xs = [
        [2.0, 3.0, -1.0],
        [3.0, -1.0, 0.5],
        [0.5, 1.0, 1.0],
        [1.0, 1.0, -1.0],
    ];
    let ys = [1.0, -1.0, -1.0, 1.0];

    let mut graph: Graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(42);
    let mlp = Mlp::new(
        &mut graph,
        3,
        &[4, 4, 1],
        Activation::Tanh,
        Init::default(),
        &mut rng,
    )?;
    log::info!(
        "MLP {:?}: {} parameters",
        mlp.shape(),
        mlp.num_parameters()
    );

    let config = TrainConfig::default();
    let losses = fit(&mut graph, &mlp, &xs, &ys, &config)?;
    if let (Some(first), Some(last)) = (losses.first(), losses.last()) {
        log::info!("loss {:.6} -> {:.6}", first, last);
    }

    let predictions = predict(&mut graph, &mlp, &xs)?;
    for (prediction, target) in predictions.iter().zip(&ys) {
        println!("target {:+.1}  prediction {:+.4}", target, prediction);
    }
    Ok(())
}
