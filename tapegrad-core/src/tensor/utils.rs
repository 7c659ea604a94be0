use crate::error::TapeGradError;

/// Interprets a shape as `(rows, cols)`.
///
/// Rank 1 is a single row, rank 2 is used as is. Anything else is a `RankMismatch`.
pub fn as_rows(shape: &[usize], operation: &str) -> Result<(usize, usize), TapeGradError> {
    match shape {
        [cols] => Ok((1, *cols)),
        [rows, cols] => Ok((*rows, *cols)),
        _ => Err(TapeGradError::RankMismatch {
            expected: 2,
            actual: shape.len(),
            operation: operation.to_string(),
        }),
    }
}

/// Checks that `actual` equals `expected`, naming `operation` in the error.
pub fn check_shape(
    expected: &[usize],
    actual: &[usize],
    operation: &str,
) -> Result<(), TapeGradError> {
    if expected != actual {
        return Err(TapeGradError::shape_mismatch(expected, actual, operation));
    }
    Ok(())
}

#[cfg(test)]
#[path = "utils_test.rs"]
mod tests;
