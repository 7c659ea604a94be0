// Linear algebra: matrix products and the fused linear transform.

pub mod linear;
pub mod matmul;
pub mod transpose;

pub use linear::linear_op;
pub use matmul::{matmul, matmul_op};
pub use transpose::transpose;
