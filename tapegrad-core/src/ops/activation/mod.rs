//! Non-linear activations applied per element or per row.

pub mod log_softmax;
pub mod relu;

pub use log_softmax::{log_softmax, log_softmax_op, softmax};
pub use relu::relu_op;
