//! k-means++ seeding (Arthur and Vassilvitskii, 2007).
//!
//! 1. Pick the first centre uniformly at random.
//! 2. Pick each further centre with probability proportional to `D(x)^2`, the
//!    squared distance from `x` to its nearest centre chosen so far.
//!
//! In expectation this is an `O(log k)` approximation of the optimal
//! within-cluster sum of squares before any Lloyd iterations, and in practice it
//! rarely leaves a well-separated cluster without a seed.

use log::trace;
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

use crate::error::{Error, Result};
use crate::point::{Point, PointLike};

/// k-means++ initialisation driven by a caller-supplied generator.
///
/// The same generator state and input always produce the same centres.
#[derive(Debug)]
pub struct KMeansPlusPlus<R> {
    rng: R,
}

impl<R: Rng> KMeansPlusPlus<R> {
    /// Seed centres using `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Recover the generator.
    pub fn into_inner(self) -> R {
        self.rng
    }

    /// Choose `k` centres from `points`.
    ///
    /// Items are weighted by [`PointLike::weight`] as well as `D(x)^2`, so an
    /// aggregate of `n` points is as likely to be picked as `n` coincident raw
    /// points. If every item already coincides with a chosen centre the next
    /// pick is uniform, which can only happen when `points` has duplicates.
    pub fn run<T: PointLike<D>, const D: usize>(&mut self, points: &[T], k: usize) -> Result<Vec<Point<D>>> {
        let n = points.len();
        if k == 0 || k > n {
            return Err(Error::InvalidK { k, n_items: n });
        }

        let first = *points[self.rng.random_range(0..n)].location();
        let mut distances: Vec<f64> = points.iter().map(|p| p.squared_distance_to(&first)).collect();
        let mut centres = Vec::with_capacity(k);
        centres.push(first);

        while centres.len() < k {
            let weights = points.iter().zip(&distances).map(|(p, d)| p.weight() * d);
            let next = match WeightedIndex::new(weights) {
                Ok(dist) => dist.sample(&mut self.rng),
                Err(_) => self.rng.random_range(0..n),
            };

            let centre = *points[next].location();
            for (d, p) in distances.iter_mut().zip(points) {
                *d = d.min(p.squared_distance_to(&centre));
            }
            centres.push(centre);
        }

        trace!("k-means++ chose {k} centres from {n} items");
        Ok(centres)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spherical::SphericalCluster;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn line(n: usize) -> Vec<Point<2>> {
        (0..n).map(|i| Point::new([i as f64, 0.0])).collect()
    }

    #[test]
    fn rejects_invalid_k() {
        let mut seeding = KMeansPlusPlus::new(StdRng::seed_from_u64(1));
        assert_eq!(
            seeding.run(&line(3), 0),
            Err(Error::InvalidK { k: 0, n_items: 3 })
        );
        assert_eq!(
            seeding.run(&line(3), 4),
            Err(Error::InvalidK { k: 4, n_items: 3 })
        );
    }

    #[test]
    fn centres_are_drawn_from_points() {
        let points = line(50);
        let mut seeding = KMeansPlusPlus::new(StdRng::seed_from_u64(2));
        let centres = seeding.run(&points, 7).unwrap();
        assert_eq!(centres.len(), 7);
        assert!(centres.iter().all(|c| points.contains(c)));
    }

    #[test]
    fn k_equal_to_n_picks_every_distinct_point() {
        let points = line(6);
        let mut seeding = KMeansPlusPlus::new(StdRng::seed_from_u64(3));
        let mut centres = seeding.run(&points, 6).unwrap();
        centres.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(centres, points);
    }

    #[test]
    fn duplicates_fall_back_to_uniform() {
        let points = vec![Point::new([1.0, 1.0]); 4];
        let mut seeding = KMeansPlusPlus::new(StdRng::seed_from_u64(4));
        let centres = seeding.run(&points, 3).unwrap();
        assert_eq!(centres, vec![Point::new([1.0, 1.0]); 3]);
    }

    #[test]
    fn same_seed_same_centres() {
        let points: Vec<Point<2>> = (0..200)
            .map(|i| Point::new([(i as f64 * 0.37).sin() * 10.0, (i as f64 * 0.11).cos() * 4.0]))
            .collect();
        let a = KMeansPlusPlus::new(StdRng::seed_from_u64(42)).run(&points, 5).unwrap();
        let b = KMeansPlusPlus::new(StdRng::seed_from_u64(42)).run(&points, 5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn generator_state_carries_over() {
        let points = line(40);
        let mut seeding = KMeansPlusPlus::new(StdRng::seed_from_u64(5));
        let first = seeding.run(&points, 3).unwrap();
        let second = seeding.run(&points, 3).unwrap();

        let mut resumed = KMeansPlusPlus::new(StdRng::seed_from_u64(5));
        assert_eq!(resumed.run(&points, 3).unwrap(), first);
        let mut resumed = KMeansPlusPlus::new(resumed.into_inner());
        assert_eq!(resumed.run(&points, 3).unwrap(), second);
    }

    #[test]
    fn heavy_aggregates_are_favoured() {
        let light = SphericalCluster::new(Point::new([0.0, 0.0]), 1.0, 0.0);
        let heavy = SphericalCluster::new(Point::new([100.0, 0.0]), 10_000.0, 0.0);
        let distant = SphericalCluster::new(Point::new([-100.0, 0.0]), 1.0, 0.0);
        let clusters = [light, heavy, distant];

        // Unweighted D^2 sampling would pick the heavy cluster second about
        // 65% of the time when it was not picked first.
        let mut eligible = 0;
        let mut heavy_second = 0;
        for seed in 0..300 {
            let centres = KMeansPlusPlus::new(StdRng::seed_from_u64(seed))
                .run(&clusters, 2)
                .unwrap();
            if centres[0] == *heavy.mean() {
                continue;
            }
            eligible += 1;
            if centres[1] == *heavy.mean() {
                heavy_second += 1;
            }
        }

        assert!(eligible > 100);
        assert!(heavy_second as f64 > 0.97 * eligible as f64);
    }
}
