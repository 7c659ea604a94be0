pub mod synthetic;
pub mod tensor_dataset;
pub mod traits;

pub use synthetic::separable_blobs;
pub use tensor_dataset::TensorDataset;
pub use traits::{Dataset, Sample};
