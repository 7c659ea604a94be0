use thiserror::Error;

/// Custom error type for the tapegrad framework.
///
/// Shape and label errors are fatal to the current training step and are always
/// propagated to the caller. Numeric instability is not an error: it is reported
/// through `log::warn!` and recovered by the max-shift in the softmax kernels.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum TapeGradError {
    #[error("Shape mismatch: expected {expected}, got {actual} during operation {operation}")]
    ShapeMismatch {
        expected: String,
        actual: String,
        operation: String,
    },

    #[error("Rank mismatch: expected rank {expected}, got {actual} during operation {operation}")]
    RankMismatch {
        expected: usize,
        actual: usize,
        operation: String,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreation { data_len: usize, shape: Vec<usize> },

    #[error("Backward called on non-scalar value of shape {shape:?} without an explicit gradient")]
    BackwardNonScalar { shape: Vec<usize> },

    #[error("Backward called on value {index} which does not track gradients")]
    NotTracked { index: usize },

    #[error("Label {label} at position {position} is outside the valid class range [0, {num_classes})")]
    LabelOutOfRange {
        label: usize,
        position: usize,
        num_classes: usize,
    },

    #[error("Unknown value {index}: the graph only holds {len} values")]
    UnknownVar { index: usize, len: usize },

    #[error("Index out of bounds: index {index} for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Data source produced no batches during {0}")]
    EmptyDataset(String),

    #[error("Failed to acquire {lock_type} lock: {reason}")]
    LockError { lock_type: String, reason: String },

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl TapeGradError {
    /// Shorthand for a [`TapeGradError::ShapeMismatch`] built from two shapes.
    pub fn shape_mismatch(expected: &[usize], actual: &[usize], operation: &str) -> Self {
        TapeGradError::ShapeMismatch {
            expected: format!("{:?}", expected),
            actual: format!("{:?}", actual),
            operation: operation.to_string(),
        }
    }
}
