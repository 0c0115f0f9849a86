use scalargrad_core::{AutogradError, Graph, ValueId};

// Installs the test logger once per test binary.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Gradients of `ids`, in order.
#[allow(dead_code)]
pub fn grads(graph: &Graph, ids: &[ValueId]) -> Result<Vec<f64>, AutogradError> {
    ids.iter().map(|&id| graph.grad(id)).collect()
}
