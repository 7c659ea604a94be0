use super::traits::Sampler;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// A sampler that visits the dataset in a random order, reshuffled every epoch.
#[derive(Debug, Clone)]
pub struct RandomSampler {
    replacement: bool,
    num_samples: Option<usize>,
    rng: StdRng,
}

impl RandomSampler {
    /// Creates a new `RandomSampler` seeded from the operating system.
    ///
    /// # Arguments
    ///
    /// * `replacement`: If `true`, an index can be selected multiple times.
    /// * `num_samples`: The total number of samples to draw. If `None`, it defaults to the dataset size.
    pub fn new(replacement: bool, num_samples: Option<usize>) -> Self {
        RandomSampler {
            replacement,
            num_samples,
            rng: StdRng::from_entropy(),
        }
    }

    /// Replaces the generator with one seeded from `seed`, for reproducible epochs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl Sampler for RandomSampler {
    fn iter(&mut self, dataset_len: usize) -> Box<dyn Iterator<Item = usize>> {
        if dataset_len == 0 {
            return Box::new(std::iter::empty());
        }
        let num_samples = self.num_samples.unwrap_or(dataset_len);

        if self.replacement {
            let indices: Vec<usize> = (0..num_samples)
                .map(|_| self.rng.gen_range(0..dataset_len))
                .collect();
            Box::new(indices.into_iter())
        } else {
            if num_samples > dataset_len {
                log::warn!(
                    "RandomSampler: num_samples ({}) > dataset_len ({}) without replacement. Returning empty iterator.",
                    num_samples,
                    dataset_len
                );
                return Box::new(std::iter::empty());
            }
            let mut indices: Vec<usize> = (0..dataset_len).collect();
            indices.shuffle(&mut self.rng);
            indices.truncate(num_samples);
            Box::new(indices.into_iter())
        }
    }

    fn len(&self, dataset_len: usize) -> usize {
        if dataset_len == 0 {
            return 0;
        }
        let num_samples = self.num_samples.unwrap_or(dataset_len);
        if !self.replacement && num_samples > dataset_len {
            0
        } else {
            num_samples
        }
    }
}

#[cfg(test)]
#[path = "random_sampler_test.rs"]
mod tests;
