//! Classification metrics.

use crate::error::TapeGradError;
use crate::tensor::Tensor;

/// Fraction of rows of `outputs` whose highest score is at the true label.
///
/// `outputs` are per-class scores `[n, classes]`: logits, probabilities or
/// log-probabilities all rank classes the same way.
///
/// # Errors
/// `ShapeMismatch` if the label count differs from the number of rows, or if there
/// are no rows at all.
pub fn accuracy(outputs: &Tensor, labels: &[usize]) -> Result<f64, TapeGradError> {
    let predictions = outputs.argmax_rows()?;
    if predictions.len() != labels.len() || labels.is_empty() {
        return Err(TapeGradError::ShapeMismatch {
            expected: format!("{} labels (at least one)", predictions.len()),
            actual: format!("{} labels", labels.len()),
            operation: "accuracy".to_string(),
        });
    }
    Ok(correct_count(&predictions, labels) as f64 / labels.len() as f64)
}

/// Number of positions where `predictions` and `labels` agree.
pub fn correct_count(predictions: &[usize], labels: &[usize]) -> usize {
    predictions
        .iter()
        .zip(labels.iter())
        .filter(|(p, l)| p == l)
        .count()
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod tests;
