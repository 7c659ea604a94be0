//! Element-wise arithmetic between values of identical shape.

pub mod add;
pub mod mul;
pub mod sub;

pub use add::add_op;
pub use mul::{mul_op, mul_scalar_op};
pub use sub::sub_op;
