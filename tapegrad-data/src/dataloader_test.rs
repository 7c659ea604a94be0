use super::*;
use crate::datasets::TensorDataset;
use crate::samplers::{RandomSampler, SequentialSampler};

fn dataset(n: usize) -> TensorDataset {
    let features: Vec<f64> = (0..n).flat_map(|i| [i as f64, -(i as f64)]).collect();
    let labels: Vec<usize> = (0..n).map(|i| i % 2).collect();
    TensorDataset::new(Tensor::new(features, vec![n, 2]).unwrap(), labels).unwrap()
}

fn first_features(loader: &mut DataLoader<TensorDataset, impl Sampler>) -> Vec<Vec<f64>> {
    loader
        .batches()
        .map(|b| {
            let batch = b.unwrap();
            batch.inputs.data().chunks(2).map(|row| row[0]).collect()
        })
        .collect()
}

#[test]
fn test_dataloader_sequential() {
    let mut loader = DataLoader::new(dataset(6), 2, SequentialSampler::new(), false).unwrap();
    assert_eq!(loader.len(), 3);
    assert_eq!(
        first_features(&mut loader),
        vec![vec![0.0, 1.0], vec![2.0, 3.0], vec![4.0, 5.0]]
    );
    let labels: Vec<Vec<usize>> = loader.batches().map(|b| b.unwrap().labels).collect();
    assert_eq!(labels, vec![vec![0, 1], vec![0, 1], vec![0, 1]]);
}

#[test]
fn test_dataloader_keeps_partial_last_batch() {
    let mut loader = DataLoader::new(dataset(5), 2, SequentialSampler::new(), false).unwrap();
    assert_eq!(loader.len(), 3);
    assert_eq!(
        first_features(&mut loader),
        vec![vec![0.0, 1.0], vec![2.0, 3.0], vec![4.0]]
    );
}

#[test]
fn test_dataloader_drop_last() {
    let mut loader = DataLoader::new(dataset(5), 2, SequentialSampler::new(), true).unwrap();
    assert_eq!(loader.len(), 2);
    assert_eq!(first_features(&mut loader), vec![vec![0.0, 1.0], vec![2.0, 3.0]]);
}

#[test]
fn test_dataloader_is_restartable() {
    let mut loader = DataLoader::new(dataset(4), 3, SequentialSampler::new(), false).unwrap();
    let first = first_features(&mut loader);
    let second = first_features(&mut loader);
    assert_eq!(first, second);
}

#[test]
fn test_dataloader_random_covers_every_sample_once() {
    let sampler = RandomSampler::new(false, None).with_seed(5);
    let mut loader = DataLoader::new(dataset(7), 3, sampler, false).unwrap();
    let mut seen: Vec<f64> = first_features(&mut loader).into_iter().flatten().collect();
    seen.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(seen, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn test_dataloader_zero_batch_size() {
    assert!(matches!(
        DataLoader::new(dataset(3), 0, SequentialSampler::new(), false),
        Err(TapeGradError::InvalidConfig(_))
    ));
}

#[test]
fn test_dataloader_empty_dataset_yields_nothing() {
    let empty = TensorDataset::new(Tensor::new(Vec::new(), vec![0, 2]).unwrap(), Vec::new()).unwrap();
    let mut loader = DataLoader::new(empty, 2, SequentialSampler::new(), false).unwrap();
    assert!(loader.is_empty());
    assert_eq!(loader.batches().count(), 0);
}

/// Returns rows of growing width, which cannot be stacked.
#[derive(Debug)]
struct RaggedDataset;

impl Dataset for RaggedDataset {
    type Item = Sample;

    fn get(&self, index: usize) -> Result<Sample, TapeGradError> {
        Ok((vec![1.0; index + 1], 0))
    }

    fn len(&self) -> usize {
        3
    }
}

#[test]
fn test_dataloader_rejects_ragged_samples() {
    let mut loader = DataLoader::new(RaggedDataset, 2, SequentialSampler::new(), false).unwrap();
    let first = loader.batches().next().unwrap();
    assert!(matches!(first, Err(TapeGradError::ShapeMismatch { .. })));
}
