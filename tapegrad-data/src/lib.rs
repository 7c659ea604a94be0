//! tapegrad-data: datasets, samplers and the [`DataLoader`] feeding mini-batches to
//! the `tapegrad-core` training loop.

pub mod dataloader;
pub mod datasets;
pub mod samplers;

pub use dataloader::DataLoader;
pub use datasets::{Dataset, Sample, TensorDataset};
pub use samplers::{RandomSampler, Sampler, SequentialSampler};
