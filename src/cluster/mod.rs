//! Exact k-means accelerated by a kd-tree.
//!
//! ## Lloyd's algorithm
//!
//! Assign each point to the nearest centre, then move each centre to the mean
//! of its points. Repeat until no centre moves.
//!
//! **Objective**: Minimize within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! ## The filtering speed-up
//!
//! The naive assignment step costs `n * k` distance computations. Here the points
//! live in a [`KdTree`](crate::KdTree) whose nodes know the bounding box and
//! centroid of their subtree. Walking the tree from the root, a
//! [`CentreFilter`] discards every centre that cannot be nearest to anything in
//! the current node's box. As soon as one centre is left, the whole subtree
//! belongs to it and its precomputed centroid is merged in one step
//! ([`CentroidComputer`]). Only regions near cluster boundaries are walked point
//! by point.
//!
//! The result is the same partition as the naive algorithm: pruning only ever
//! drops centres that are strictly farther than another candidate from every
//! point of the box. The centres match the naive ones up to floating-point
//! summation order, since subtree sums are merged in a different grouping.
//! They are bit-identical when every partial sum is exact, for example on
//! coordinates that are small multiples of a power of two.
//!
//! ## Seeding
//!
//! [`KMeansPlusPlus`] picks initial centres by `D(x)^2` sampling from a
//! caller-supplied generator.
//!
//! ## Aggregated input
//!
//! Everything is generic over [`PointLike`](crate::PointLike), so
//! [`SphericalCluster`](crate::SphericalCluster)s (mean, count, variance)
//! cluster exactly like `count` copies of their mean.
//!
//! ## Usage
//!
//! ```rust
//! use kdmeans::cluster::{Clustering, Kmeans};
//! use kdmeans::Point;
//!
//! let data = vec![
//!     Point::new([0.0, 0.0]),
//!     Point::new([0.1, 0.1]),
//!     Point::new([10.0, 10.0]),
//!     Point::new([10.1, 10.1]),
//! ];
//!
//! let labels = Kmeans::new(2).with_seed(42).fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[1]);  // First two together
//! assert_ne!(labels[0], labels[2]);  // Separate from last two
//! ```
//!
//! Driving the engine directly:
//!
//! ```rust
//! use kdmeans::cluster::KMeansEngine;
//! use kdmeans::Point;
//!
//! let mut engine = KMeansEngine::new();
//! engine
//!     .set_points(vec![
//!         Point::new([0.0]),
//!         Point::new([2.0]),
//!         Point::new([10.0]),
//!         Point::new([12.0]),
//!     ])
//!     .unwrap();
//! engine.set_centres(vec![Point::new([0.0]), Point::new([5.0])]).unwrap();
//!
//! assert!(engine.run(10));
//! assert_eq!(engine.centres(), &[Point::new([1.0]), Point::new([11.0])]);
//! ```

mod centroid;
mod closest;
mod engine;
mod filter;
mod kmeans;
mod plusplus;
mod traits;
pub mod util;

pub use centroid::CentroidComputer;
pub use closest::ClosestPointsCollector;
pub use engine::KMeansEngine;
pub use filter::CentreFilter;
pub use kmeans::{Kmeans, KmeansFit};
pub use plusplus::KMeansPlusPlus;
pub use traits::Clustering;
