//! Reductions of a whole value to a scalar.

pub mod mean;
pub mod sum;

pub use mean::mean_op;
pub use sum::sum_op;
