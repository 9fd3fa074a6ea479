//! Fixed-dimension points and the capability set clustering needs from them.
//!
//! The dimension is a const generic, so a tree or engine over `Point<2>` and one
//! over `Point<4>` are distinct types and every coordinate loop has a
//! compile-time trip count.

use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Sub};

use crate::stats::MeanAccumulator;

/// A point in `D`-dimensional Euclidean space.
///
/// Ordering is lexicographic over the coordinates.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Point<const D: usize>([f64; D]);

impl<const D: usize> Point<D> {
    /// Create a point from its coordinates.
    pub const fn new(coords: [f64; D]) -> Self {
        Self(coords)
    }

    /// The origin.
    pub const fn zeros() -> Self {
        Self([0.0; D])
    }

    /// Coordinates as an array.
    pub fn coords(&self) -> &[f64; D] {
        &self.0
    }

    /// Dot product.
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }

    /// Squared Euclidean norm.
    #[inline]
    pub fn squared_norm(&self) -> f64 {
        self.dot(self)
    }

    /// Euclidean norm.
    #[inline]
    pub fn euclidean(&self) -> f64 {
        self.squared_norm().sqrt()
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    pub fn squared_distance(&self, other: &Self) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| {
                let d = a - b;
                d * d
            })
            .sum()
    }

    /// Apply `f` coordinate-wise to `self` and `other`.
    #[inline]
    pub fn zip_with(&self, other: &Self, mut f: impl FnMut(f64, f64) -> f64) -> Self {
        let mut out = [0.0; D];
        for (i, o) in out.iter_mut().enumerate() {
            *o = f(self.0[i], other.0[i]);
        }
        Self(out)
    }

    /// Apply `f` to every coordinate.
    #[inline]
    pub fn map(&self, mut f: impl FnMut(f64) -> f64) -> Self {
        let mut out = self.0;
        for o in &mut out {
            *o = f(*o);
        }
        Self(out)
    }
}

impl<const D: usize> From<[f64; D]> for Point<D> {
    fn from(coords: [f64; D]) -> Self {
        Self(coords)
    }
}

impl<const D: usize> Index<usize> for Point<D> {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

impl<const D: usize> IndexMut<usize> for Point<D> {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.0[i]
    }
}

impl<const D: usize> Add for Point<D> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_with(&rhs, |a, b| a + b)
    }
}

impl<const D: usize> AddAssign for Point<D> {
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += b;
        }
    }
}

impl<const D: usize> Sub for Point<D> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_with(&rhs, |a, b| a - b)
    }
}

impl<const D: usize> Mul<f64> for Point<D> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.map(|a| a * rhs)
    }
}

impl<const D: usize> Div<f64> for Point<D> {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        self.map(|a| a / rhs)
    }
}

/// Anything k-means can treat as a (possibly weighted) point.
///
/// A raw [`Point`] has weight one. Aggregates such as
/// [`SphericalCluster`](crate::SphericalCluster) stand in for `weight`
/// coincident points at their mean, so the same tree, filter and Lloyd loop
/// cluster either representation.
pub trait PointLike<const D: usize>: Clone {
    /// Position used for distances and bounding boxes.
    fn location(&self) -> &Point<D>;

    /// Multiplicity in every mean this item contributes to.
    fn weight(&self) -> f64 {
        1.0
    }

    /// Squared distance from this item's location to `x`.
    #[inline]
    fn squared_distance_to(&self, x: &Point<D>) -> f64 {
        self.location().squared_distance(x)
    }

    /// Fold this item into a mean accumulator with its weight.
    #[inline]
    fn accumulate(&self, acc: &mut MeanAccumulator<D>) {
        acc.add_weighted(self.location(), self.weight());
    }
}

impl<const D: usize> PointLike<D> for Point<D> {
    fn location(&self) -> &Point<D> {
        self
    }

    #[inline]
    fn accumulate(&self, acc: &mut MeanAccumulator<D>) {
        acc.add(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_and_norms() {
        let a = Point::new([1.0, 2.0]);
        let b = Point::new([4.0, 6.0]);

        assert_eq!(b - a, Point::new([3.0, 4.0]));
        assert_eq!(a + b, Point::new([5.0, 8.0]));
        assert_eq!(a * 2.0, Point::new([2.0, 4.0]));
        assert_eq!(b / 2.0, Point::new([2.0, 3.0]));
        assert_eq!((b - a).euclidean(), 5.0);
        assert_eq!(a.squared_distance(&b), 25.0);
    }

    #[test]
    fn ordering_is_lexicographic() {
        let mut points = vec![
            Point::new([1.0, 5.0]),
            Point::new([0.0, 9.0]),
            Point::new([1.0, -1.0]),
        ];
        points.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(
            points,
            vec![
                Point::new([0.0, 9.0]),
                Point::new([1.0, -1.0]),
                Point::new([1.0, 5.0]),
            ]
        );
    }

    #[test]
    fn raw_points_have_unit_weight() {
        let p = Point::new([3.0, -1.0, 2.0, 0.5]);
        assert_eq!(p.weight(), 1.0);
        assert_eq!(p.location(), &p);

        let mut acc = MeanAccumulator::new();
        p.accumulate(&mut acc);
        assert_eq!(acc.count(), 1.0);
        assert_eq!(acc.mean(), Some(p));
    }
}
