use super::traits::Sampler;

/// Visits `0..dataset_len` in order.
///
/// Stateless: every epoch restarts from index 0 and yields the same order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialSampler;

impl SequentialSampler {
    pub fn new() -> Self {
        SequentialSampler
    }
}

impl Sampler for SequentialSampler {
    fn iter(&mut self, dataset_len: usize) -> Box<dyn Iterator<Item = usize>> {
        Box::new(0..dataset_len)
    }

    /// Always the full dataset; nothing is skipped or repeated.
    fn len(&self, dataset_len: usize) -> usize {
        dataset_len
    }
}

#[cfg(test)]
#[path = "sequential_sampler_test.rs"]
mod tests;
