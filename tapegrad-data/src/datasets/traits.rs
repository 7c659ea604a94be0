use tapegrad_core::TapeGradError;

/// One labelled example: a feature vector and its class index.
pub type Sample = (Vec<f64>, usize);

/// Represents a dataset that can be accessed by index.
pub trait Dataset {
    /// The type of a single item returned by the dataset.
    type Item;

    /// Returns the item at the given index.
    ///
    /// # Errors
    ///
    /// Returns `TapeGradError::IndexOutOfBounds` if the index is not below `len()`.
    fn get(&self, index: usize) -> Result<Self::Item, TapeGradError>;

    /// Returns the total number of items in the dataset.
    fn len(&self) -> usize;

    /// Checks if the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
