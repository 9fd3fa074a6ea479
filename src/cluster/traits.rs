use crate::error::Result;
use crate::point::PointLike;

/// Common interface for hard clustering algorithms (one label per item).
pub trait Clustering<const D: usize> {
    /// Fit the model and return one cluster label per input item.
    fn fit_predict<T: PointLike<D>>(&self, data: &[T]) -> Result<Vec<usize>>;

    /// The configured number of clusters.
    fn n_clusters(&self) -> usize;
}
