use std::fmt::Debug;

/// Defines the order in which a `DataLoader` visits a dataset.
///
/// Each call to `iter` starts a new epoch. Samplers may carry state between epochs
/// (e.g. a random generator), so `iter` takes `&mut self`.
pub trait Sampler: Debug {
    /// Returns the indices to visit for one epoch.
    ///
    /// # Arguments
    ///
    /// * `dataset_len` - The total number of items in the dataset.
    fn iter(&mut self, dataset_len: usize) -> Box<dyn Iterator<Item = usize>>;

    /// Returns the number of indices `iter` yields for a dataset of `dataset_len` items.
    fn len(&self, dataset_len: usize) -> usize;
}
