use crate::autograd::{BackwardOp, Graph, Var};
use crate::error::TapeGradError;
use crate::tensor::{self, Tensor};

/// Sums every element of `a` into a scalar.
pub fn sum_op(graph: &mut Graph, a: Var) -> Result<Var, TapeGradError> {
    let input = graph.value(a)?;
    let input_shape = input.shape().to_vec();
    let total: f64 = input.data().iter().sum();
    graph.record(Tensor::scalar(total), &[a], move || {
        Box::new(SumBackward { input_shape })
    })
}

#[derive(Debug)]
struct SumBackward {
    input_shape: Vec<usize>,
}

impl BackwardOp for SumBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, TapeGradError> {
        let g = grad_output.item()?;
        Ok(vec![tensor::full(self.input_shape.clone(), g)])
    }
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
