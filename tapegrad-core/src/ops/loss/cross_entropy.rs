use crate::autograd::{BackwardOp, Graph, Var};
use crate::error::TapeGradError;
use crate::ops::activation::log_softmax;
use crate::ops::loss::check_labels;
use crate::tensor::Tensor;

/// Cross-entropy on raw logits, fusing log-softmax and NLL into one node.
///
/// The log-softmax is computed with the max-shift, so the loss stays finite for large
/// logits. The gradient with respect to the logits is `(softmax - one_hot) / batch`.
pub fn cross_entropy_op(graph: &mut Graph, logits: Var, labels: &[usize]) -> Result<Var, TapeGradError> {
    let input = graph.value(logits)?;
    let (batch, classes) = check_labels(input.shape(), labels, "cross_entropy_op")?;
    let log_probs = log_softmax(input)?;
    let data = log_probs.data();
    let picked: f64 = labels
        .iter()
        .enumerate()
        .map(|(i, &label)| data[i * classes + label])
        .sum();
    let loss = Tensor::scalar(-picked / batch as f64);

    let labels = labels.to_vec();
    graph.record(loss, &[logits], move || {
        Box::new(CrossEntropyBackward {
            probs: log_probs.map(f64::exp),
            labels,
        })
    })
}

#[derive(Debug)]
struct CrossEntropyBackward {
    probs: Tensor,
    labels: Vec<usize>,
}

impl BackwardOp for CrossEntropyBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, TapeGradError> {
        let batch = self.labels.len();
        let classes = self.probs.numel() / batch;
        let scale = grad_output.item()? / batch as f64;
        let mut grad = self.probs.clone();
        for (row, &label) in grad.data_mut().chunks_mut(classes).zip(self.labels.iter()) {
            row[label] -= 1.0;
            for g in row.iter_mut() {
                *g *= scale;
            }
        }
        Ok(vec![grad])
    }
}

#[cfg(test)]
#[path = "cross_entropy_test.rs"]
mod tests;
