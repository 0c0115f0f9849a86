//! Full-batch training loop for single-output models.
//!
//! Every step builds the forward graph on top of the parameter leaves and
//! rewinds the graph afterwards, so memory stays flat across epochs while
//! parameters keep their updated values.

use crate::error::NnError;
use crate::losses::sum_squared_error;
use crate::module::{check_width, constants, Module};
use crate::optim::{Optimizer, Sgd};
use scalargrad_core::num_traits::Float;
use scalargrad_core::{Graph, ValueId};

/// Hyper-parameters for [`fit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    /// Log the loss every `log_every` epochs; `0` disables progress logging.
    pub log_every: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epochs: 1000,
            learning_rate: 0.05,
            log_every: 100,
        }
    }
}

/// Runs `model` on every sample and returns one output node per sample.
///
/// # Errors
/// `DimensionMismatch` if the model does not produce exactly one output.
pub fn forward_batch<T, M, S>(
    graph: &mut Graph<T>,
    model: &M,
    xs: &[S],
) -> Result<Vec<ValueId>, NnError>
where
    T: Float,
    M: Module<T> + ?Sized,
    S: AsRef<[T]>,
{
    xs.iter()
        .map(|sample| {
            let inputs = constants(graph, sample.as_ref());
            let outputs = model.forward(graph, &inputs)?;
            match outputs.as_slice() {
                [single] => Ok(*single),
                _ => Err(NnError::DimensionMismatch {
                    expected: 1,
                    actual: outputs.len(),
                    context: "train::forward_batch".to_string(),
                }),
            }
        })
        .collect()
}

/// Predictions of `model` for every sample. The forward nodes are dropped
/// before returning.
pub fn predict<T, M, S>(graph: &mut Graph<T>, model: &M, xs: &[S]) -> Result<Vec<T>, NnError>
where
    T: Float,
    M: Module<T> + ?Sized,
    S: AsRef<[T]>,
{
    let checkpoint = graph.checkpoint();
    let result = forward_batch(graph, model, xs).and_then(|outputs| {
        outputs
            .into_iter()
            .map(|id| graph.data(id).map_err(NnError::from))
            .collect()
    });
    graph.rewind(checkpoint);
    result
}

/// One gradient-descent step on the whole batch.
///
/// Computes the sum-of-squares loss, clears the optimizer's gradients,
/// backpropagates and updates the parameters. The graph is rewound to its
/// length before the call, on success and on error alike.
///
/// # Returns
/// The loss before the update.
pub fn train_epoch<T, M, O, S>(
    graph: &mut Graph<T>,
    model: &M,
    optimizer: &mut O,
    xs: &[S],
    ys: &[T],
) -> Result<T, NnError>
where
    T: Float,
    M: Module<T> + ?Sized,
    O: Optimizer<T> + ?Sized,
    S: AsRef<[T]>,
{
    check_width(xs.len(), ys.len(), "train_epoch")?;
    let checkpoint = graph.checkpoint();
    let result = step_on_batch(graph, model, optimizer, xs, ys);
    graph.rewind(checkpoint);
    result
}

fn step_on_batch<T, M, O, S>(
    graph: &mut Graph<T>,
    model: &M,
    optimizer: &mut O,
    xs: &[S],
    ys: &[T],
) -> Result<T, NnError>
where
    T: Float,
    M: Module<T> + ?Sized,
    O: Optimizer<T> + ?Sized,
    S: AsRef<[T]>,
{
    let predictions = forward_batch(graph, model, xs)?;
    let loss = sum_squared_error(graph, &predictions, ys)?;
    let loss_value = graph.data(loss)?;
    optimizer.zero_grad(graph)?;
    graph.backward(loss)?;
    optimizer.step(graph)?;
    Ok(loss_value)
}

/// Trains `model` with [`Sgd`] for `config.epochs` epochs.
///
/// # Returns
/// The loss of every epoch, measured before that epoch's update.
pub fn fit<T, M, S>(
    graph: &mut Graph<T>,
    model: &M,
    xs: &[S],
    ys: &[T],
    config: &TrainConfig,
) -> Result<Vec<T>, NnError>
where
    T: Float,
    M: Module<T> + ?Sized,
    S: AsRef<[T]>,
{
    let learning_rate: T = crate::cast(config.learning_rate, "learning rate")?;
    let mut optimizer = Sgd::new(model.parameters(), learning_rate)?;
    let mut losses = Vec::with_capacity(config.epochs);

    for epoch in 0..config.epochs {
        let loss = train_epoch(graph, model, &mut optimizer, xs, ys)?;
        if config.log_every > 0 && (epoch % config.log_every == 0 || epoch + 1 == config.epochs) {
            log::info!(
                "epoch {}/{}: loss {:.6}",
                epoch + 1,
                config.epochs,
                loss.to_f64().unwrap_or(f64::NAN)
            );
        }
        losses.push(loss);
    }
    Ok(losses)
}
