use crate::tensor::Tensor;

/// Checks that two tensors are approximately equal (shape and data within tolerance).
/// Panics with the offending index if they differ.
pub fn check_tensor_near(
    actual: &Tensor,
    expected_shape: &[usize],
    expected_data: &[f64],
    tolerance: f64,
) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");
    assert_eq!(
        actual.numel(),
        expected_data.len(),
        "Data length mismatch"
    );

    for (i, (a, e)) in actual.data().iter().zip(expected_data.iter()).enumerate() {
        let diff = (a - e).abs();
        if diff > tolerance {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// Helper to create a tensor for testing purposes.
pub fn create_test_tensor(data: Vec<f64>, shape: Vec<usize>) -> Tensor {
    Tensor::new(data, shape).expect("Failed to create test tensor")
}
