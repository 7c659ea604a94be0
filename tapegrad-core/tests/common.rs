use tapegrad_core::nn::layers::{Linear, LogSoftmax, ReLU};
use tapegrad_core::tensor::Tensor;
use tapegrad_core::train::Batch;
use tapegrad_core::Sequential;

/// Installs `env_logger` once per test binary; later calls are no-ops.
#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn tensor(data: Vec<f64>, shape: Vec<usize>) -> Tensor {
    Tensor::new(data, shape).expect("Test tensor creation failed")
}

/// The 4 -> 3 -> 2 network with fixed weights shared by the end-to-end tests.
#[allow(dead_code)]
pub fn fixture_model(with_log_softmax: bool) -> Sequential {
    let mut model = Sequential::new();
    model.add_module(
        "linear0",
        Linear::from_tensors(
            tensor(
                vec![0.1, -0.2, 0.3, 0.0, 0.1, -0.1, 0.2, 0.1, 0.0, -0.3, 0.2, 0.1],
                vec![4, 3],
            ),
            tensor(vec![0.01, -0.02, 0.03], vec![3]),
        )
        .expect("valid linear0")
        .into(),
    );
    model.add_module("relu0", ReLU::new().into());
    model.add_module(
        "linear1",
        Linear::from_tensors(
            tensor(vec![0.2, -0.1, 0.3, 0.4, -0.5, 0.2], vec![3, 2]),
            tensor(vec![0.0, 0.1], vec![2]),
        )
        .expect("valid linear1")
        .into(),
    );
    if with_log_softmax {
        model.add_module("log_softmax", LogSoftmax::new().into());
    }
    model
}

#[allow(dead_code)]
pub fn fixture_batch() -> Batch {
    Batch::new(
        tensor(vec![1.0, 2.0, -1.0, 0.5, 0.0, -1.0, 2.0, 1.0], vec![2, 4]),
        vec![0, 1],
    )
    .expect("valid batch")
}

/// Asserts element-wise closeness with a helpful message.
#[allow(dead_code)]
pub fn assert_all_close(actual: &[f64], expected: &[f64], tolerance: f64) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            approx::abs_diff_eq!(*a, *e, epsilon = tolerance),
            "mismatch at index {}: actual {}, expected {}",
            i,
            a,
            e
        );
    }
}
