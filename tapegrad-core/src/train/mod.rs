//! Mini-batch training loop: zero grads, forward, loss, backward, step.

pub mod batch;
pub mod config;
pub mod trainer;

pub use batch::{Batch, BatchSource};
pub use config::TrainConfig;
pub use trainer::{evaluate, EpochReport, Evaluation, Trainer};
