use crate::autograd::{BackwardOp, Graph, Var};
use crate::error::TapeGradError;
use crate::tensor::{self, Tensor};

/// Averages every element of `a` into a scalar.
///
/// # Errors
/// Returns `ShapeMismatch` for an empty input, whose mean is undefined.
pub fn mean_op(graph: &mut Graph, a: Var) -> Result<Var, TapeGradError> {
    let input = graph.value(a)?;
    let numel = input.numel();
    if numel == 0 {
        return Err(TapeGradError::ShapeMismatch {
            expected: "at least one element".to_string(),
            actual: format!("{:?}", input.shape()),
            operation: "mean_op".to_string(),
        });
    }
    let input_shape = input.shape().to_vec();
    let mean = input.data().iter().sum::<f64>() / numel as f64;
    graph.record(Tensor::scalar(mean), &[a], move || {
        Box::new(MeanBackward { input_shape, numel })
    })
}

#[derive(Debug)]
struct MeanBackward {
    input_shape: Vec<usize>,
    numel: usize,
}

impl BackwardOp for MeanBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, TapeGradError> {
        let g = grad_output.item()? / self.numel as f64;
        Ok(vec![tensor::full(self.input_shape.clone(), g)])
    }
}

#[cfg(test)]
#[path = "mean_test.rs"]
mod tests;
