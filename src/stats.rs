//! Streaming mean and variance accumulators over weighted points.

use std::ops::AddAssign;

use crate::point::Point;

/// Weighted mean of a set of points, kept as a weighted sum and a total weight.
///
/// Keeping the sum rather than a running mean means merging the same inputs in a
/// different grouping gives the same bits whenever the partial sums are exactly
/// representable, which is what lets the tree traversal reproduce brute-force
/// centroids exactly on quantised data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeanAccumulator<const D: usize> {
    count: f64,
    sum: Point<D>,
}

impl<const D: usize> MeanAccumulator<D> {
    /// An empty accumulator.
    pub const fn new() -> Self {
        Self {
            count: 0.0,
            sum: Point::zeros(),
        }
    }

    /// Add one point with unit weight.
    #[inline]
    pub fn add(&mut self, x: &Point<D>) {
        self.count += 1.0;
        self.sum += *x;
    }

    /// Add one point with weight `w`.
    #[inline]
    pub fn add_weighted(&mut self, x: &Point<D>, w: f64) {
        self.count += w;
        self.sum += *x * w;
    }

    /// Total weight added so far.
    pub fn count(&self) -> f64 {
        self.count
    }

    /// The mean, or `None` if nothing has been added.
    pub fn mean(&self) -> Option<Point<D>> {
        if self.count > 0.0 {
            Some(self.sum / self.count)
        } else {
            None
        }
    }
}

impl<const D: usize> Default for MeanAccumulator<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize> AddAssign<&MeanAccumulator<D>> for MeanAccumulator<D> {
    fn add_assign(&mut self, rhs: &Self) {
        self.count += rhs.count;
        self.sum += rhs.sum;
    }
}

/// Weighted mean and per-coordinate variance.
///
/// Uses Welford's update for single points and Chan's pairwise formula for
/// merges. [`variance`](Self::variance) is the maximum likelihood estimate
/// (divides by the total weight), which is what makes merged spherical clusters
/// exact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeanVarAccumulator<const D: usize> {
    count: f64,
    mean: Point<D>,
    // Weighted sum of squared deviations from the mean, per coordinate.
    m2: Point<D>,
}

impl<const D: usize> MeanVarAccumulator<D> {
    /// An empty accumulator.
    pub const fn new() -> Self {
        Self {
            count: 0.0,
            mean: Point::zeros(),
            m2: Point::zeros(),
        }
    }

    /// Rebuild an accumulator from its moments.
    ///
    /// `variance` is the per-coordinate maximum likelihood variance.
    pub fn from_moments(count: f64, mean: Point<D>, variance: Point<D>) -> Self {
        Self {
            count,
            mean,
            m2: variance * count,
        }
    }

    /// Add one point with unit weight.
    pub fn add(&mut self, x: &Point<D>) {
        self.add_weighted(x, 1.0);
    }

    /// Add one point with weight `w`.
    pub fn add_weighted(&mut self, x: &Point<D>, w: f64) {
        if w <= 0.0 {
            return;
        }
        self.count += w;
        let delta = *x - self.mean;
        self.mean += delta * (w / self.count);
        let after = *x - self.mean;
        self.m2 += delta.zip_with(&after, |a, b| w * a * b);
    }

    /// Total weight added so far.
    pub fn count(&self) -> f64 {
        self.count
    }

    /// The mean (the origin if empty).
    pub fn mean(&self) -> Point<D> {
        self.mean
    }

    /// Per-coordinate maximum likelihood variance (zero if empty).
    pub fn variance(&self) -> Point<D> {
        if self.count > 0.0 {
            self.m2 / self.count
        } else {
            Point::zeros()
        }
    }

    /// Variance averaged over the coordinates.
    pub fn average_variance(&self) -> f64 {
        if D == 0 {
            return 0.0;
        }
        self.variance().coords().iter().sum::<f64>() / D as f64
    }
}

impl<const D: usize> Default for MeanVarAccumulator<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize> AddAssign<&MeanVarAccumulator<D>> for MeanVarAccumulator<D> {
    fn add_assign(&mut self, rhs: &Self) {
        if rhs.count <= 0.0 {
            return;
        }
        if self.count <= 0.0 {
            *self = *rhs;
            return;
        }
        let count = self.count + rhs.count;
        let delta = rhs.mean - self.mean;
        let cross = self.count * rhs.count / count;
        self.m2 += rhs.m2;
        self.m2 += delta.map(|d| d * d * cross);
        self.mean += delta * (rhs.count / count);
        self.count = count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-10 * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn mean_of_empty_is_none() {
        let acc = MeanAccumulator::<3>::new();
        assert_eq!(acc.count(), 0.0);
        assert!(acc.mean().is_none());
    }

    #[test]
    fn merge_matches_sequential_adds() {
        let xs = [
            Point::new([1.0, 2.0]),
            Point::new([-3.0, 0.5]),
            Point::new([4.25, 8.0]),
            Point::new([0.0, -1.0]),
        ];

        let mut all = MeanAccumulator::new();
        for x in &xs {
            all.add(x);
        }

        let mut left = MeanAccumulator::new();
        let mut right = MeanAccumulator::new();
        for x in &xs[..1] {
            left.add(x);
        }
        for x in &xs[1..] {
            right.add(x);
        }
        left += &right;

        assert_eq!(left, all);
        assert_eq!(all.mean(), Some(Point::new([0.5625, 2.375])));
    }

    #[test]
    fn weighted_add_counts_weight() {
        let mut acc = MeanAccumulator::new();
        acc.add_weighted(&Point::new([2.0]), 3.0);
        acc.add(&Point::new([6.0]));
        assert_eq!(acc.count(), 4.0);
        assert_eq!(acc.mean(), Some(Point::new([3.0])));
    }

    #[test]
    fn variance_matches_two_pass() {
        let xs: Vec<Point<2>> = (0..20)
            .map(|i| Point::new([i as f64 * 0.7, (i * i) as f64 * 0.1 - 3.0]))
            .collect();

        let mut acc = MeanVarAccumulator::new();
        for x in &xs {
            acc.add(x);
        }

        let n = xs.len() as f64;
        let mean = xs.iter().fold(Point::zeros(), |s, x| s + *x) / n;
        for d in 0..2 {
            let var = xs.iter().map(|x| (x[d] - mean[d]).powi(2)).sum::<f64>() / n;
            assert!(approx(acc.variance()[d], var));
            assert!(approx(acc.mean()[d], mean[d]));
        }
    }

    #[test]
    fn merged_moments_match_pooled() {
        let xs: Vec<Point<2>> = (0..15)
            .map(|i| Point::new([(i as f64).sin() * 4.0, (i as f64).cos() + 2.0]))
            .collect();

        let mut all = MeanVarAccumulator::new();
        let mut a = MeanVarAccumulator::new();
        let mut b = MeanVarAccumulator::new();
        for (i, x) in xs.iter().enumerate() {
            all.add(x);
            if i % 3 == 0 {
                a.add(x);
            } else {
                b.add(x);
            }
        }
        a += &b;

        assert!(approx(a.count(), all.count()));
        for d in 0..2 {
            assert!(approx(a.mean()[d], all.mean()[d]));
            assert!(approx(a.variance()[d], all.variance()[d]));
        }
    }
}
