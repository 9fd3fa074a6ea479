use crate::point::{Point, PointLike};
use crate::stats::MeanAccumulator;

/// Index of the centre nearest to `x` and its squared distance.
///
/// Ties go to the lowest index. Returns `None` if `centres` is empty.
#[inline]
pub fn nearest_centre<const D: usize>(centres: &[Point<D>], x: &Point<D>) -> Option<(usize, f64)> {
    nearest_of(centres, 0..centres.len(), x)
}

/// As [`nearest_centre`], restricted to the centres named by `candidates`.
///
/// Ties go to the earliest candidate.
#[inline]
pub(crate) fn nearest_of<const D: usize>(
    centres: &[Point<D>],
    candidates: impl IntoIterator<Item = usize>,
    x: &Point<D>,
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for i in candidates {
        let d = centres[i].squared_distance(x);
        match best {
            Some((_, dmin)) if d >= dmin => {}
            _ => best = Some((i, d)),
        }
    }
    best
}

/// Sum over clusters of the weighted squared distances from each item to its
/// cluster's mean.
///
/// Useful for comparing the quality of two partitions of the same items.
pub fn sum_square_residuals<T: PointLike<D>, const D: usize>(clusters: &[Vec<T>]) -> f64 {
    clusters
        .iter()
        .map(|cluster| {
            let mut centroid = MeanAccumulator::new();
            for x in cluster {
                x.accumulate(&mut centroid);
            }
            match centroid.mean() {
                Some(m) => cluster
                    .iter()
                    .map(|x| x.weight() * x.squared_distance_to(&m))
                    .sum::<f64>(),
                None => 0.0,
            }
        })
        .sum()
}
