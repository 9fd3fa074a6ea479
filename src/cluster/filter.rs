//! Pruning of candidate centres against a region of space.
//!
//! This is the filtering step of Kanungo et al. (2002), "An Efficient k-Means
//! Clustering Algorithm: Analysis and Implementation". For a box, take the
//! surviving centre `z*` nearest the box's midpoint; any other survivor `z` for
//! which every point of the box is strictly closer to `z*` cannot own any point
//! in the box and is dropped. Boxes only shrink walking down a kd-tree, so a
//! filter carried from parent to child only ever narrows.

use super::util::nearest_of;
use crate::bounding_box::BoundingBox;
use crate::point::Point;

/// The set of centres that may still be nearest to some point of a region.
#[derive(Clone, Debug)]
pub struct CentreFilter<'a, const D: usize> {
    centres: &'a [Point<D>],
    filter: Vec<usize>,
}

impl<'a, const D: usize> CentreFilter<'a, D> {
    /// A filter admitting every centre.
    pub fn new(centres: &'a [Point<D>]) -> Self {
        Self {
            centres,
            filter: (0..centres.len()).collect(),
        }
    }

    /// The full centre sequence.
    pub fn centres(&self) -> &'a [Point<D>] {
        self.centres
    }

    /// Indices of the surviving centres, in increasing order.
    pub fn filter(&self) -> &[usize] {
        &self.filter
    }

    /// Drop every centre that is provably farther than another survivor from
    /// every point of `bb`.
    ///
    /// Equal distances never prune, so for any point in `bb` all of its nearest
    /// centres survive.
    pub fn prune(&mut self, bb: &BoundingBox<D>) {
        if self.filter.len() <= 1 {
            return;
        }

        let Some((closest, _)) = nearest_of(self.centres, self.filter.iter().copied(), &bb.centre())
        else {
            return;
        };

        let centres = self.centres;
        let z = &centres[closest];
        let reach = bb.max_squared_distance(z);
        self.filter.retain(|&i| {
            i == closest || {
                let c = &centres[i];
                !(reach < bb.min_squared_distance(c) || bb.all_closer_to(z, c))
            }
        });
    }

    /// The surviving centre nearest to `x`, ties to the lowest index.
    pub fn closest(&self, x: &Point<D>) -> Option<usize> {
        nearest_of(self.centres, self.filter.iter().copied(), x).map(|(i, _)| i)
    }
}
