//! Spherical clusters: a group of points compressed to mean, count and average
//! variance.
//!
//! For k-means a spherical cluster behaves exactly like `count` coincident
//! points at its mean, so clustering aggregates approximates clustering the
//! points they summarise at a fraction of the cost.

use crate::error::{Error, Result};
use crate::point::{Point, PointLike};
use crate::stats::MeanVarAccumulator;

/// A summary of a group of points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphericalCluster<const D: usize> {
    mean: Point<D>,
    count: f64,
    average_variance: f64,
}

impl<const D: usize> SphericalCluster<D> {
    /// A cluster of `count` points at `mean` whose per-coordinate variance
    /// averages `average_variance`.
    pub fn new(mean: Point<D>, count: f64, average_variance: f64) -> Self {
        Self {
            mean,
            count,
            average_variance,
        }
    }

    /// Summarise `points`.
    ///
    /// The variance is the maximum likelihood estimate averaged over the
    /// coordinates.
    pub fn from_points(points: &[Point<D>]) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::EmptyInput);
        }
        let mut moments = MeanVarAccumulator::new();
        for x in points {
            moments.add(x);
        }
        Ok(Self::from_moments(&moments))
    }

    fn from_moments(moments: &MeanVarAccumulator<D>) -> Self {
        Self {
            mean: moments.mean(),
            count: moments.count(),
            average_variance: moments.average_variance(),
        }
    }

    fn moments(&self) -> MeanVarAccumulator<D> {
        MeanVarAccumulator::from_moments(
            self.count,
            self.mean,
            Point::zeros().map(|_| self.average_variance),
        )
    }

    /// Mean of the summarised points.
    pub fn mean(&self) -> &Point<D> {
        &self.mean
    }

    /// Number of summarised points.
    pub fn count(&self) -> f64 {
        self.count
    }

    /// Per-coordinate variance averaged over the coordinates.
    pub fn average_variance(&self) -> f64 {
        self.average_variance
    }

    /// The cluster summarising the points of both `self` and `other`.
    ///
    /// Spread between the two means is added to the pooled variance, so merging
    /// two summaries gives the summary of the union of their points.
    pub fn merge(&self, other: &Self) -> Self {
        let mut moments = self.moments();
        moments += &other.moments();
        Self::from_moments(&moments)
    }
}

impl<const D: usize> From<Point<D>> for SphericalCluster<D> {
    fn from(x: Point<D>) -> Self {
        Self::new(x, 1.0, 0.0)
    }
}

impl<const D: usize> PointLike<D> for SphericalCluster<D> {
    fn location(&self) -> &Point<D> {
        &self.mean
    }

    fn weight(&self) -> f64 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::MeanAccumulator;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-10 * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn from_points_summarises() {
        let points = [
            Point::new([0.0, 0.0]),
            Point::new([2.0, 0.0]),
            Point::new([0.0, 4.0]),
            Point::new([2.0, 4.0]),
        ];
        let cluster = SphericalCluster::from_points(&points).unwrap();
        assert!(approx(cluster.mean()[0], 1.0));
        assert!(approx(cluster.mean()[1], 2.0));
        assert_eq!(cluster.count(), 4.0);
        // Variances 1 and 4.
        assert!(approx(cluster.average_variance(), 2.5));

        assert_eq!(
            SphericalCluster::<2>::from_points(&[]),
            Err(Error::EmptyInput)
        );
    }

    #[test]
    fn merge_equals_summary_of_union() {
        let a: Vec<Point<3>> = (0..7)
            .map(|i| Point::new([i as f64, (i * 2) as f64, 1.0]))
            .collect();
        let b: Vec<Point<3>> = (0..5)
            .map(|i| Point::new([10.0 - i as f64, 3.0, i as f64 * 0.5]))
            .collect();

        let merged = SphericalCluster::from_points(&a)
            .unwrap()
            .merge(&SphericalCluster::from_points(&b).unwrap());
        let all: Vec<Point<3>> = a.iter().chain(&b).copied().collect();
        let direct = SphericalCluster::from_points(&all).unwrap();

        assert!(approx(merged.count(), direct.count()));
        for d in 0..3 {
            assert!(approx(merged.mean()[d], direct.mean()[d]));
        }
        // Averaged variances pool exactly when each cluster's coordinates are
        // summarised by their own average.
        let spread = a
            .iter()
            .chain(&b)
            .map(|x| x.squared_distance(direct.mean()))
            .sum::<f64>()
            / (3.0 * all.len() as f64);
        assert!(approx(merged.average_variance(), spread));
        assert!(approx(direct.average_variance(), spread));
    }

    #[test]
    fn weighs_as_count_points() {
        let cluster = SphericalCluster::new(Point::new([3.0, -1.0]), 5.0, 0.25);
        assert_eq!(cluster.weight(), 5.0);

        let mut acc = MeanAccumulator::new();
        cluster.accumulate(&mut acc);
        acc.add(&Point::new([9.0, 5.0]));
        assert_eq!(acc.count(), 6.0);
        assert_eq!(acc.mean(), Some(Point::new([4.0, 0.0])));

        let single = SphericalCluster::from(Point::new([1.0, 1.0]));
        assert_eq!(single.count(), 1.0);
        assert_eq!(single.average_variance(), 0.0);
    }
}
