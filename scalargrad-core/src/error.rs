use thiserror::Error;

/// Custom error type for the scalargrad engine.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum AutogradError {
    /// An operation received an argument it cannot differentiate through,
    /// e.g. a node-valued exponent passed to `pow`.
    #[error("Invalid argument for operation {operation}: {reason}")]
    InvalidArgument { operation: String, reason: String },

    /// A `ValueId` does not refer to a node of this graph (it was created by
    /// another graph or dropped by `Graph::rewind`).
    #[error("Unknown value: id {id} is out of bounds for a graph of {len} nodes")]
    UnknownValue { id: usize, len: usize },
}
