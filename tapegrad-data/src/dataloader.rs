//! # DataLoader
//!
//! Groups the samples of a [`Dataset`] into mini-batches, in the order chosen by a
//! [`Sampler`], and hands them to the training loop as a
//! [`BatchSource`](tapegrad_core::train::BatchSource).
//!
//! ```rust
//! use tapegrad_core::train::BatchSource;
//! use tapegrad_core::Tensor;
//! use tapegrad_data::{DataLoader, SequentialSampler, TensorDataset};
//!
//! let features = Tensor::new(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0], vec![3, 2]).unwrap();
//! let dataset = TensorDataset::new(features, vec![0, 1, 0]).unwrap();
//! let mut loader = DataLoader::new(dataset, 2, SequentialSampler::new(), false).unwrap();
//! let sizes: Vec<usize> = loader.batches().map(|b| b.unwrap().len()).collect();
//! assert_eq!(sizes, vec![2, 1]);
//! ```

use crate::datasets::{Dataset, Sample};
use crate::samplers::Sampler;
use tapegrad_core::train::{Batch, BatchSource};
use tapegrad_core::{TapeGradError, Tensor};

/// Batches a dataset in sampler order.
///
/// The loader is restartable: every call to [`BatchSource::batches`] asks the sampler
/// for a fresh epoch of indices.
#[derive(Debug)]
pub struct DataLoader<D: Dataset, S: Sampler> {
    dataset: D,
    batch_size: usize,
    sampler: S,
    /// If true, the last batch is dropped when it is smaller than `batch_size`.
    drop_last: bool,
}

impl<D: Dataset, S: Sampler> DataLoader<D, S> {
    /// Creates a new DataLoader.
    ///
    /// # Errors
    /// `InvalidConfig` if `batch_size` is 0.
    pub fn new(dataset: D, batch_size: usize, sampler: S, drop_last: bool) -> Result<Self, TapeGradError> {
        if batch_size == 0 {
            return Err(TapeGradError::InvalidConfig("batch_size must be > 0".to_string()));
        }
        Ok(Self {
            dataset,
            batch_size,
            sampler,
            drop_last,
        })
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of batches in one epoch.
    pub fn len(&self) -> usize {
        let samples = self.sampler.len(self.dataset.len());
        if self.drop_last {
            samples / self.batch_size
        } else {
            (samples + self.batch_size - 1) / self.batch_size
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<D, S> BatchSource for DataLoader<D, S>
where
    D: Dataset<Item = Sample>,
    S: Sampler,
{
    fn batches(&mut self) -> Box<dyn Iterator<Item = Result<Batch, TapeGradError>> + '_> {
        let indices: Vec<usize> = self.sampler.iter(self.dataset.len()).collect();
        let batch_size = self.batch_size;
        let drop_last = self.drop_last;
        let chunks: Vec<Vec<usize>> = indices
            .chunks(batch_size)
            .filter(|chunk| !drop_last || chunk.len() == batch_size)
            .map(|chunk| chunk.to_vec())
            .collect();
        log::debug!(
            "DataLoader epoch: {} samples in {} batches",
            indices.len(),
            chunks.len()
        );
        let dataset = &self.dataset;
        Box::new(chunks.into_iter().map(move |chunk| collate(dataset, &chunk)))
    }
}

/// Stacks the samples at `indices` into a `[n, features]` batch.
///
/// Samples of differing widths are a `ShapeMismatch`.
fn collate<D: Dataset<Item = Sample>>(dataset: &D, indices: &[usize]) -> Result<Batch, TapeGradError> {
    let mut rows = Vec::with_capacity(indices.len());
    let mut labels = Vec::with_capacity(indices.len());
    for &index in indices {
        let (features, label) = dataset.get(index)?;
        rows.push(features);
        labels.push(label);
    }
    Batch::new(Tensor::from_rows(&rows)?, labels)
}

#[cfg(test)]
#[path = "dataloader_test.rs"]
mod tests;
