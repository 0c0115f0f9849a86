use scalargrad_core::AutogradError;
use thiserror::Error;

/// Errors raised while building, running or training networks.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum NnError {
    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        expected: usize,
        actual: usize,
        context: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Autograd(#[from] AutogradError),
}
