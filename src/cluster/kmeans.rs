//! K-means clustering: k-means++ seeding followed by Lloyd iterations.
//!
//! Partitions data into k clusters by minimizing **within-cluster sum of squares**
//! (WCSS):
//!
//! ```text
//! WCSS = Σₖ Σᵢ∈Cₖ wᵢ ||xᵢ - μₖ||²
//! ```
//!
//! where `wᵢ` is the item's [`weight`](crate::PointLike::weight) (one for raw
//! points, the point count for spherical clusters).
//!
//! # Failure Modes
//!
//! - **Local optima**: Lloyd finds a local minimum only
//! - **Wrong k**: k must be chosen in advance
//! - **Initialization sensitivity**: k-means++ makes bad seeds unlikely, not
//!   impossible; fix the seed for reproducible results

use rand::prelude::*;

use super::engine::KMeansEngine;
use super::plusplus::KMeansPlusPlus;
use super::traits::Clustering;
use crate::error::{Error, Result};
use crate::kdtree::KdTree;
use crate::point::{Point, PointLike};

/// K-means clustering algorithm.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Maximum Lloyd iterations.
    max_iter: usize,
    /// Random seed for k-means++.
    seed: Option<u64>,
}

impl Kmeans {
    /// Create a new K-means clusterer.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 100,
            seed: None,
        }
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seed with k-means++ and refine with Lloyd's algorithm.
    pub fn fit<T: PointLike<D>, const D: usize>(&self, points: &[T]) -> Result<KmeansFit<D>> {
        self.validate()?;
        if points.is_empty() {
            return Err(Error::EmptyInput);
        }

        // Use an explicit seed when configured; otherwise derive one from entropy.
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        let centres = KMeansPlusPlus::new(StdRng::seed_from_u64(seed)).run(points, self.k)?;
        self.refine(points, centres)
    }

    /// Refine the given initial centres with Lloyd's algorithm.
    pub fn fit_with_centres<T: PointLike<D>, const D: usize>(
        &self,
        points: &[T],
        centres: Vec<Point<D>>,
    ) -> Result<KmeansFit<D>> {
        self.validate()?;
        self.refine(points, centres)
    }

    fn validate(&self) -> Result<()> {
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        Ok(())
    }

    fn refine<T: PointLike<D>, const D: usize>(
        &self,
        points: &[T],
        centres: Vec<Point<D>>,
    ) -> Result<KmeansFit<D>> {
        let mut engine = KMeansEngine::new();
        engine.set_points(points.to_vec())?;
        engine.set_centres(centres)?;
        let converged = engine.run(self.max_iter);
        KmeansFit::new(engine.centres().to_vec(), converged)
    }
}

impl Default for Kmeans {
    fn default() -> Self {
        Self::new(8)
    }
}

impl<const D: usize> Clustering<D> for Kmeans {
    fn fit_predict<T: PointLike<D>>(&self, data: &[T]) -> Result<Vec<usize>> {
        let fit = self.fit(data)?;
        Ok(fit.predict_all(data))
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

// A centre tagged with its index so a tree over centres can answer "which one".
#[derive(Clone, Debug)]
struct LabelledCentre<const D: usize> {
    index: usize,
    centre: Point<D>,
}

impl<const D: usize> PointLike<D> for LabelledCentre<D> {
    fn location(&self) -> &Point<D> {
        &self.centre
    }
}

/// Result of a k-means fit.
#[derive(Debug, Clone)]
pub struct KmeansFit<const D: usize> {
    centres: Vec<Point<D>>,
    converged: bool,
    index: KdTree<LabelledCentre<D>, D>,
}

impl<const D: usize> KmeansFit<D> {
    fn new(centres: Vec<Point<D>>, converged: bool) -> Result<Self> {
        let labelled = centres
            .iter()
            .enumerate()
            .map(|(index, centre)| LabelledCentre {
                index,
                centre: *centre,
            })
            .collect();
        Ok(Self {
            index: KdTree::build(labelled)?,
            centres,
            converged,
        })
    }

    /// Final centres; a cluster's label is its centre's index.
    pub fn centres(&self) -> &[Point<D>] {
        &self.centres
    }

    /// Whether Lloyd's algorithm reached a fixed point within the budget.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Label of the centre nearest to `x`.
    ///
    /// Ties may resolve to any of the equidistant centres.
    pub fn predict(&self, x: &Point<D>) -> usize {
        self.index.nearest_neighbour(x).index
    }

    /// Labels for every item.
    pub fn predict_all<T: PointLike<D>>(&self, points: &[T]) -> Vec<usize> {
        points.iter().map(|p| self.predict(p.location())).collect()
    }

    /// Items grouped by label.
    pub fn clusters<T: PointLike<D>>(&self, points: &[T]) -> Vec<Vec<T>> {
        let mut clusters = vec![Vec::new(); self.centres.len()];
        for p in points {
            clusters[self.predict(p.location())].push(p.clone());
        }
        clusters
    }
}
