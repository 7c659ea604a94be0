//! Tape-based reverse-mode automatic differentiation.
//!
//! A [`Graph`] records every operation applied to its values while at least one input
//! tracks gradients. Each recorded operation stores a [`BackwardOp`] holding the
//! context its local gradient rule needs. [`Graph::backward`] walks the recorded DAG in
//! reverse topological order and accumulates gradients into leaves, intermediate values
//! and the [`Parameter`](crate::nn::Parameter)s bound to the tape.

pub mod backward_op;
pub mod grad_check;
pub mod graph;

pub use backward_op::BackwardOp;
pub use graph::{Graph, Var};
