use std::ops::ControlFlow;

use super::filter::CentreFilter;
use crate::kdtree::KdTree;
use crate::point::{Point, PointLike};

/// Partitions the items of a tree by nearest centre, keeping the items
/// themselves.
///
/// This is the inspection path: every item is compared individually, after
/// narrowing the candidates with the node's bounding box when aggregates are
/// available.
#[derive(Debug)]
pub struct ClosestPointsCollector<'a, T, const D: usize> {
    centres: &'a [Point<D>],
    clusters: Vec<Vec<T>>,
}

impl<'a, T: PointLike<D>, const D: usize> ClosestPointsCollector<'a, T, D> {
    /// A collector sized for roughly `number_points` items over `centres`.
    pub fn new(number_points: usize, centres: &'a [Point<D>]) -> Self {
        let per_centre = number_points / centres.len().max(1) + 1;
        Self {
            centres,
            clusters: (0..centres.len())
                .map(|_| Vec::with_capacity(per_centre))
                .collect(),
        }
    }

    /// Walk `tree` postorder and return, for each centre index, the items
    /// nearest to it.
    pub fn collect(mut self, tree: &KdTree<T, D>) -> Vec<Vec<T>> {
        let centres = self.centres;
        tree.postorder_depth_first(|node| {
            let mut filter = CentreFilter::new(centres);
            if let Some(bb) = node.bounding_box() {
                filter.prune(bb);
            }
            if let Some(closest) = filter.closest(node.point().location()) {
                self.clusters[closest].push(node.point().clone());
            }
            ControlFlow::<()>::Continue(())
        });
        self.clusters
    }
}
