use crate::autograd::{BackwardOp, Graph, Var};
use crate::error::TapeGradError;
use crate::ops::linalg::transpose::transpose;
use crate::tensor::Tensor;

/// Untracked matrix product of `a` [m, k] and `b` [k, n].
pub fn matmul(a: &Tensor, b: &Tensor) -> Result<Tensor, TapeGradError> {
    let (m, k) = matrix_dims(a, "matmul")?;
    let (k2, n) = matrix_dims(b, "matmul")?;
    if k != k2 {
        return Err(TapeGradError::ShapeMismatch {
            expected: format!("[{}, _] for the right operand", k),
            actual: format!("{:?}", b.shape()),
            operation: "matmul".to_string(),
        });
    }
    let a_data = a.data();
    let b_data = b.data();
    let mut out = vec![0.0; m * n];
    for i in 0..m {
        for p in 0..k {
            let a_ip = a_data[i * k + p];
            let b_row = &b_data[p * n..(p + 1) * n];
            let out_row = &mut out[i * n..(i + 1) * n];
            for (o, &b_pj) in out_row.iter_mut().zip(b_row.iter()) {
                *o += a_ip * b_pj;
            }
        }
    }
    Tensor::new(out, vec![m, n])
}

fn matrix_dims(t: &Tensor, operation: &str) -> Result<(usize, usize), TapeGradError> {
    match t.shape() {
        [rows, cols] => Ok((*rows, *cols)),
        shape => Err(TapeGradError::RankMismatch {
            expected: 2,
            actual: shape.len(),
            operation: operation.to_string(),
        }),
    }
}

/// Matrix product `a · b` recorded on the tape.
pub fn matmul_op(graph: &mut Graph, a: Var, b: Var) -> Result<Var, TapeGradError> {
    let a_value = graph.value(a)?.clone();
    let b_value = graph.value(b)?.clone();
    let result = matmul(&a_value, &b_value)?;
    graph.record(result, &[a, b], move || {
        Box::new(MatMulBackward {
            a: a_value,
            b: b_value,
        })
    })
}

#[derive(Debug)]
struct MatMulBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for MatMulBackward {
    /// dA = G · Bᵀ, dB = Aᵀ · G
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, TapeGradError> {
        let grad_a = matmul(grad_output, &transpose(&self.b)?)?;
        let grad_b = matmul(&transpose(&self.a)?, grad_output)?;
        Ok(vec![grad_a, grad_b])
    }
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
