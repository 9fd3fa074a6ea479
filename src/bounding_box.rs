//! Axis-aligned bounding boxes.

use crate::point::Point;

/// An axis-aligned box `[min, max]` over `D`-dimensional space.
///
/// A box is created around a single point and only ever widens.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox<const D: usize> {
    min: Point<D>,
    max: Point<D>,
}

impl<const D: usize> BoundingBox<D> {
    /// The degenerate box containing only `x`.
    pub fn new(x: &Point<D>) -> Self {
        Self { min: *x, max: *x }
    }

    /// Lower corner.
    pub fn min(&self) -> &Point<D> {
        &self.min
    }

    /// Upper corner.
    pub fn max(&self) -> &Point<D> {
        &self.max
    }

    /// Widen to contain `x`.
    pub fn add_point(&mut self, x: &Point<D>) {
        self.min = self.min.zip_with(x, f64::min);
        self.max = self.max.zip_with(x, f64::max);
    }

    /// Widen to contain `other`.
    pub fn add_box(&mut self, other: &Self) {
        self.min = self.min.zip_with(&other.min, f64::min);
        self.max = self.max.zip_with(&other.max, f64::max);
    }

    /// Midpoint of the box.
    pub fn centre(&self) -> Point<D> {
        self.min.zip_with(&self.max, |a, b| 0.5 * (a + b))
    }

    /// Whether `x` lies in the (closed) box.
    pub fn contains(&self, x: &Point<D>) -> bool {
        (0..D).all(|i| self.min[i] <= x[i] && x[i] <= self.max[i])
    }

    /// Smallest squared distance from any point of the box to `x`.
    pub fn min_squared_distance(&self, x: &Point<D>) -> f64 {
        (0..D)
            .map(|i| {
                let d = if x[i] < self.min[i] {
                    self.min[i] - x[i]
                } else if x[i] > self.max[i] {
                    x[i] - self.max[i]
                } else {
                    0.0
                };
                d * d
            })
            .sum()
    }

    /// Largest squared distance from any point of the box to `x`.
    pub fn max_squared_distance(&self, x: &Point<D>) -> f64 {
        (0..D)
            .map(|i| {
                let d = (x[i] - self.min[i]).abs().max((self.max[i] - x[i]).abs());
                d * d
            })
            .sum()
    }

    /// Whether every point of the box is strictly closer to `x` than to `y`.
    ///
    /// `|p - x|^2 - |p - y|^2` is linear in `p`, so it is enough to check the
    /// corner furthest in the direction `y - x`.
    pub fn all_closer_to(&self, x: &Point<D>, y: &Point<D>) -> bool {
        let mut corner = self.min;
        for i in 0..D {
            if y[i] > x[i] {
                corner[i] = self.max[i];
            }
        }
        corner.squared_distance(x) < corner.squared_distance(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> BoundingBox<2> {
        let mut bb = BoundingBox::new(&Point::new([0.0, 0.0]));
        bb.add_point(&Point::new([1.0, 1.0]));
        bb
    }

    #[test]
    fn union_only_widens() {
        let mut bb = unit_square();
        bb.add_point(&Point::new([0.5, 0.5]));
        assert_eq!(bb, unit_square());

        let mut other = BoundingBox::new(&Point::new([-1.0, 0.5]));
        other.add_point(&Point::new([0.5, 3.0]));
        bb.add_box(&other);
        assert_eq!(bb.min(), &Point::new([-1.0, 0.0]));
        assert_eq!(bb.max(), &Point::new([1.0, 3.0]));
        assert_eq!(bb.centre(), Point::new([0.0, 1.5]));
    }

    #[test]
    fn extreme_distances() {
        let bb = unit_square();
        assert_eq!(bb.min_squared_distance(&Point::new([0.5, 0.5])), 0.0);
        assert_eq!(bb.min_squared_distance(&Point::new([3.0, 0.5])), 4.0);
        assert_eq!(bb.max_squared_distance(&Point::new([3.0, 0.5])), 9.25);
        assert_eq!(bb.max_squared_distance(&Point::new([0.0, 0.0])), 2.0);
        assert!(bb.contains(&Point::new([1.0, 0.0])));
        assert!(!bb.contains(&Point::new([1.0, 1.5])));
    }

    #[test]
    fn dominance_uses_furthest_corner() {
        let bb = unit_square();
        // Bisector x = 1.5 lies outside the box.
        assert!(bb.all_closer_to(&Point::new([0.5, 0.5]), &Point::new([2.5, 0.5])));
        // Bisector x = 0.75 cuts the box.
        assert!(!bb.all_closer_to(&Point::new([0.5, 0.5]), &Point::new([1.0, 0.5])));
        // Bisector x = 1 touches the box: ties are not dominance.
        assert!(!bb.all_closer_to(&Point::new([0.0, 0.5]), &Point::new([2.0, 0.5])));
    }
}
