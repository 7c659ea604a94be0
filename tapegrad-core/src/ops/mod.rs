// src/ops/mod.rs

//! Differentiable operations recorded on a [`Graph`](crate::autograd::Graph).
//!
//! Every `*_op` function computes its forward result eagerly from the values on the
//! tape, records the output, and (when an input tracks gradients) attaches the
//! `BackwardOp` implementing its local gradient rule. Untracked kernels such as
//! [`linalg::matmul`] and [`activation::softmax`] operate on plain tensors.

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod loss;
pub mod reduction;

pub use activation::{log_softmax_op, relu_op};
pub use arithmetic::{add_op, mul_op, mul_scalar_op, sub_op};
pub use linalg::{linear_op, matmul_op};
pub use loss::{cross_entropy_op, nll_loss_op};
pub use reduction::{mean_op, sum_op};
