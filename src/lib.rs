//! Exact k-means, accelerated.
//!
//! `kdmeans` clusters fixed-dimension points with Lloyd's algorithm, using a
//! kd-tree with per-subtree aggregates to skip most point-to-centre distance
//! computations while producing the same result as the naive algorithm.
//!
//! - [`KdTree`]: balanced kd-tree with bounding box and centroid aggregates
//! - [`cluster`]: centre filtering, the Lloyd engine, k-means++ seeding and a
//!   [`Kmeans`] front end
//! - [`SphericalCluster`]: compressed point groups that cluster like the points
//!   they summarise

#![forbid(unsafe_code)]

pub mod bounding_box;
pub mod cluster;
pub mod error;
pub mod kdtree;
pub mod point;
pub mod spherical;
pub mod stats;

pub use bounding_box::BoundingBox;
pub use cluster::{
    CentreFilter, CentroidComputer, ClosestPointsCollector, Clustering, KMeansEngine,
    KMeansPlusPlus, Kmeans, KmeansFit,
};
pub use error::{Error, Result};
pub use kdtree::{KdTree, Node, NodeData};
pub use point::{Point, PointLike};
pub use spherical::SphericalCluster;
pub use stats::{MeanAccumulator, MeanVarAccumulator};
