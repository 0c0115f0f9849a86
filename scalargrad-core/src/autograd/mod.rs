//! Reverse-mode differentiation over a [`Graph`](crate::graph::Graph).
//!
//! - [`graph`]: topological ordering of the nodes reachable from a root.
//! - `backward`: `Graph::backward`, `Graph::zero_grad` and friends.
//! - [`grad_check`]: finite-difference verification of gradients.

mod backward;
pub mod grad_check;
pub(crate) mod graph;

pub use grad_check::{central_difference, check_grad, GradCheckError};
