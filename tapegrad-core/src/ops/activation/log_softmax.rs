use crate::autograd::{BackwardOp, Graph, Var};
use crate::error::TapeGradError;
use crate::tensor::utils::as_rows;
use crate::tensor::Tensor;

/// Row-wise log-softmax over the last dimension: `x - max - ln(sum(exp(x - max)))`.
///
/// Shifting by the row maximum keeps every exponent `<= 0`, so large logits neither
/// overflow nor produce NaN. Non-finite inputs are reported with `log::warn!` and the
/// computation continues.
///
/// A rank-1 tensor is a single row.
pub fn log_softmax(input: &Tensor) -> Result<Tensor, TapeGradError> {
    let (rows, cols) = as_rows(input.shape(), "log_softmax")?;
    if cols == 0 {
        return Err(TapeGradError::shape_mismatch(&[rows, 1], input.shape(), "log_softmax"));
    }
    if !input.is_finite() {
        log::warn!(
            "log_softmax received non-finite values in input of shape {:?}",
            input.shape()
        );
    }
    let mut out = input.clone();
    for row in out.data_mut().chunks_mut(cols) {
        let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let log_sum_exp = row.iter().map(|&x| (x - max).exp()).sum::<f64>().ln();
        for x in row.iter_mut() {
            *x = *x - max - log_sum_exp;
        }
    }
    Ok(out)
}

/// Row-wise softmax, not recorded on any tape. Used for class probabilities at
/// inference time.
pub fn softmax(input: &Tensor) -> Result<Tensor, TapeGradError> {
    Ok(log_softmax(input)?.map(f64::exp))
}

/// Log-softmax recorded on the tape.
pub fn log_softmax_op(graph: &mut Graph, a: Var) -> Result<Var, TapeGradError> {
    let output = log_softmax(graph.value(a)?)?;
    let saved = output.clone();
    graph.record(output, &[a], move || Box::new(LogSoftmaxBackward { output: saved }))
}

#[derive(Debug)]
struct LogSoftmaxBackward {
    output: Tensor,
}

impl BackwardOp for LogSoftmaxBackward {
    /// `grad_in = g - softmax(x) * sum(g)` for each row.
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, TapeGradError> {
        let (_, cols) = as_rows(self.output.shape(), "LogSoftmaxBackward")?;
        let mut grad = grad_output.zip_map(&self.output, "LogSoftmaxBackward", |g, _| g)?;
        for (grad_row, out_row) in grad
            .data_mut()
            .chunks_mut(cols)
            .zip(self.output.data().chunks(cols))
        {
            let grad_sum: f64 = grad_row.iter().sum();
            for (g, &logp) in grad_row.iter_mut().zip(out_row.iter()) {
                *g -= logp.exp() * grad_sum;
            }
        }
        Ok(vec![grad])
    }
}

#[cfg(test)]
#[path = "log_softmax_test.rs"]
mod tests;
