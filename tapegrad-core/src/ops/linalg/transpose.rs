use crate::error::TapeGradError;
use crate::tensor::Tensor;

/// Returns the transpose of a 2-D tensor.
pub fn transpose(a: &Tensor) -> Result<Tensor, TapeGradError> {
    let (rows, cols) = match a.shape() {
        [rows, cols] => (*rows, *cols),
        shape => {
            return Err(TapeGradError::RankMismatch {
                expected: 2,
                actual: shape.len(),
                operation: "transpose".to_string(),
            })
        }
    };
    let data = a.data();
    let mut out = Vec::with_capacity(data.len());
    for j in 0..cols {
        for i in 0..rows {
            out.push(data[i * cols + j]);
        }
    }
    Tensor::new(out, vec![cols, rows])
}
