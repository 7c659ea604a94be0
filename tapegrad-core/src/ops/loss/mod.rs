//! Classification losses reducing a `[batch, classes]` value to a scalar.

pub mod cross_entropy;
pub mod nll;

pub use cross_entropy::cross_entropy_op;
pub use nll::nll_loss_op;

use crate::error::TapeGradError;

/// Validates `labels` against a `[batch, classes]` input and returns `(batch, classes)`.
///
/// # Errors
/// * `RankMismatch` if the input is not 2-D.
/// * `ShapeMismatch` if the batch is empty or the label count differs from it.
/// * `LabelOutOfRange` for the first label outside `[0, classes)`.
pub(crate) fn check_labels(
    input_shape: &[usize],
    labels: &[usize],
    operation: &str,
) -> Result<(usize, usize), TapeGradError> {
    let (batch, classes) = match input_shape {
        [batch, classes] => (*batch, *classes),
        shape => {
            return Err(TapeGradError::RankMismatch {
                expected: 2,
                actual: shape.len(),
                operation: operation.to_string(),
            })
        }
    };
    if batch == 0 {
        return Err(TapeGradError::ShapeMismatch {
            expected: "a non-empty batch".to_string(),
            actual: format!("{:?}", input_shape),
            operation: operation.to_string(),
        });
    }
    if labels.len() != batch {
        return Err(TapeGradError::ShapeMismatch {
            expected: format!("{} labels", batch),
            actual: format!("{} labels", labels.len()),
            operation: operation.to_string(),
        });
    }
    if let Some((position, &label)) = labels.iter().enumerate().find(|&(_, &l)| l >= classes) {
        return Err(TapeGradError::LabelOutOfRange {
            label,
            position,
            num_classes: classes,
        });
    }
    Ok((batch, classes))
}

#[cfg(test)]
#[path = "loss_test.rs"]
mod tests;
