use super::filter::CentreFilter;
use crate::kdtree::{KdTree, Node};
use crate::point::{Point, PointLike};
use crate::stats::MeanAccumulator;

/// Accumulates, per centre, the weighted mean of the items nearest to it.
///
/// Walks a propagated [`KdTree`] preorder carrying a [`CentreFilter`]. Once a
/// subtree's box admits a single centre the subtree's precomputed centroid is
/// folded in whole and the walk goes no deeper. Otherwise the node's own item
/// goes to its nearest surviving centre and both children are visited with the
/// narrowed filter.
#[derive(Debug)]
pub struct CentroidComputer<'a, const D: usize> {
    centres: &'a [Point<D>],
    centroids: Vec<MeanAccumulator<D>>,
}

impl<'a, const D: usize> CentroidComputer<'a, D> {
    /// A computer with one empty accumulator per centre.
    pub fn new(centres: &'a [Point<D>]) -> Self {
        Self {
            centres,
            centroids: vec![MeanAccumulator::new(); centres.len()],
        }
    }

    /// Accumulate every item of `tree` and return the per-centre accumulators.
    ///
    /// Without propagated aggregates every node falls back to a direct nearest
    /// centre comparison; the result is the same, only slower.
    pub fn compute<T: PointLike<D>>(mut self, tree: &KdTree<T, D>) -> Vec<MeanAccumulator<D>> {
        tree.preorder_depth_first(CentreFilter::new(self.centres), |node, filter| {
            self.visit(node, filter)
        });
        self.centroids
    }

    fn visit<T: PointLike<D>>(&mut self, node: &Node<T, D>, filter: &mut CentreFilter<'a, D>) -> bool {
        if let Some(data) = node.data() {
            filter.prune(data.bounding_box());
            if let [only] = filter.filter() {
                self.centroids[*only] += data.centroid();
                return false;
            }
        }

        let point = node.point();
        if let Some(closest) = filter.closest(point.location()) {
            point.accumulate(&mut self.centroids[closest]);
        }
        true
    }
}
