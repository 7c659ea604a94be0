use crate::autograd::{BackwardOp, Graph, Var};
use crate::error::TapeGradError;
use crate::tensor::Tensor;

/// Element-wise (Hadamard) product `a * b`.
pub fn mul_op(graph: &mut Graph, a: Var, b: Var) -> Result<Var, TapeGradError> {
    let a_value = graph.value(a)?.clone();
    let b_value = graph.value(b)?.clone();
    let result = a_value.zip_map(&b_value, "mul_op", |x, y| x * y)?;
    graph.record(result, &[a, b], move || {
        Box::new(MulBackward {
            a: a_value,
            b: b_value,
        })
    })
}

/// Multiplies every element of `a` by a constant.
pub fn mul_scalar_op(graph: &mut Graph, a: Var, scalar: f64) -> Result<Var, TapeGradError> {
    let result = graph.value(a)?.map(|x| x * scalar);
    graph.record(result, &[a], move || Box::new(MulScalarBackward { scalar }))
}

#[derive(Debug)]
struct MulBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for MulBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, TapeGradError> {
        let grad_a = grad_output.zip_map(&self.b, "MulBackward", |g, b| g * b)?;
        let grad_b = grad_output.zip_map(&self.a, "MulBackward", |g, a| g * a)?;
        Ok(vec![grad_a, grad_b])
    }
}

#[derive(Debug)]
struct MulScalarBackward {
    scalar: f64,
}

impl BackwardOp for MulScalarBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, TapeGradError> {
        let scalar = self.scalar;
        Ok(vec![grad_output.map(|g| g * scalar)])
    }
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
