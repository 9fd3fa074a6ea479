//! Lloyd's algorithm over a kd-tree.
//!
//! The tree is built once for the owned items and reused by every iteration;
//! only the centres change between iterations. Each iteration is one
//! [`CentroidComputer`] pass, so whole regions that are unambiguously nearest
//! one centre cost a single accumulator merge instead of a centre comparison
//! per item.

use log::{debug, trace};

use super::centroid::CentroidComputer;
use super::closest::ClosestPointsCollector;
use crate::error::{Error, Result};
use crate::kdtree::KdTree;
use crate::point::{Point, PointLike};

/// Exact k-means over a fixed set of (possibly weighted) items.
#[derive(Clone, Debug)]
pub struct KMeansEngine<T, const D: usize> {
    points: Vec<T>,
    centres: Vec<Point<D>>,
    tree: Option<KdTree<T, D>>,
}

impl<T: PointLike<D>, const D: usize> KMeansEngine<T, D> {
    /// An engine with no items and no centres.
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            centres: Vec::new(),
            tree: None,
        }
    }

    /// Replace the items to cluster.
    ///
    /// Any tree built over the previous items is discarded. The current centres
    /// are kept if there are no more of them than new items; otherwise they are
    /// cleared and must be set again before [`run`](Self::run) does anything.
    pub fn set_points(&mut self, points: Vec<T>) -> Result<()> {
        if points.is_empty() {
            return Err(Error::EmptyInput);
        }
        if self.centres.len() > points.len() {
            debug!(
                "clearing {} centres for {} new points",
                self.centres.len(),
                points.len()
            );
            self.centres.clear();
        }
        self.points = points;
        self.tree = None;
        Ok(())
    }

    /// Replace the centres. A centre's index is its position in `centres`.
    ///
    /// There must be at least one centre and no more centres than items, so
    /// items are set first.
    pub fn set_centres(&mut self, centres: Vec<Point<D>>) -> Result<()> {
        if centres.is_empty() || centres.len() > self.points.len() {
            return Err(Error::InvalidCentreCount {
                requested: centres.len(),
                n_items: self.points.len(),
            });
        }
        self.centres = centres;
        Ok(())
    }

    /// The items being clustered.
    pub fn points(&self) -> &[T] {
        &self.points
    }

    /// The current centres.
    pub fn centres(&self) -> &[Point<D>] {
        &self.centres
    }

    /// Run up to `max_iterations` Lloyd iterations.
    ///
    /// Returns `true` as soon as an iteration leaves every centre exactly where
    /// it was, and `false` if the budget runs out first. A centre nearest to no
    /// item keeps its value.
    pub fn run(&mut self, max_iterations: usize) -> bool {
        if self.centres.is_empty() || !self.ensure_tree() {
            return true;
        }
        let Some(tree) = self.tree.as_ref() else {
            return true;
        };

        for iteration in 0..max_iterations {
            let centroids = CentroidComputer::new(&self.centres).compute(tree);

            let mut moved = 0;
            for (centre, centroid) in self.centres.iter_mut().zip(&centroids) {
                if let Some(mean) = centroid.mean() {
                    if mean != *centre {
                        *centre = mean;
                        moved += 1;
                    }
                }
            }
            trace!("k-means iteration {iteration}: {moved} centres moved");

            if moved == 0 {
                debug!(
                    "k-means converged after {} iterations ({} centres, {} points)",
                    iteration + 1,
                    self.centres.len(),
                    self.points.len()
                );
                return true;
            }
        }

        debug!("k-means did not converge within {max_iterations} iterations");
        false
    }

    /// The items nearest to each centre, indexed by centre.
    pub fn clusters(&mut self) -> Vec<Vec<T>> {
        if self.centres.is_empty() || !self.ensure_tree() {
            return vec![Vec::new(); self.centres.len()];
        }
        match self.tree.as_ref() {
            Some(tree) => ClosestPointsCollector::new(self.points.len(), &self.centres).collect(tree),
            None => vec![Vec::new(); self.centres.len()],
        }
    }

    // Make sure a propagated tree over the current items exists.
    fn ensure_tree(&mut self) -> bool {
        if self.tree.is_none() {
            self.tree = KdTree::build(self.points.clone()).ok();
        }
        match self.tree.as_mut() {
            Some(tree) => {
                if !tree.is_propagated() {
                    tree.propagate_data();
                }
                true
            }
            None => false,
        }
    }
}

impl<T: PointLike<D>, const D: usize> Default for KMeansEngine<T, D> {
    fn default() -> Self {
        Self::new()
    }
}
