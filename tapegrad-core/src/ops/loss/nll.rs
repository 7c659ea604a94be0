use crate::autograd::{BackwardOp, Graph, Var};
use crate::error::TapeGradError;
use crate::ops::loss::check_labels;
use crate::tensor::{self, Tensor};

/// Negative log-likelihood over log-probabilities: `-mean_i(log_probs[i, labels[i]])`.
///
/// `log_probs` is `[batch, classes]`, typically the output of a log-softmax.
pub fn nll_loss_op(graph: &mut Graph, log_probs: Var, labels: &[usize]) -> Result<Var, TapeGradError> {
    let input = graph.value(log_probs)?;
    let (batch, classes) = check_labels(input.shape(), labels, "nll_loss_op")?;
    let data = input.data();
    let picked: f64 = labels
        .iter()
        .enumerate()
        .map(|(i, &label)| data[i * classes + label])
        .sum();
    let loss = Tensor::scalar(-picked / batch as f64);

    let labels = labels.to_vec();
    graph.record(loss, &[log_probs], move || {
        Box::new(NllLossBackward { labels, classes })
    })
}

#[derive(Debug)]
struct NllLossBackward {
    labels: Vec<usize>,
    classes: usize,
}

impl BackwardOp for NllLossBackward {
    /// `-g / batch` at each true-class entry, zero elsewhere.
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, TapeGradError> {
        let batch = self.labels.len();
        let scale = -grad_output.item()? / batch as f64;
        let mut grad = tensor::zeros(vec![batch, self.classes]);
        let data = grad.data_mut();
        for (i, &label) in self.labels.iter().enumerate() {
            data[i * self.classes + label] = scale;
        }
        Ok(vec![grad])
    }
}

#[cfg(test)]
#[path = "nll_test.rs"]
mod tests;
