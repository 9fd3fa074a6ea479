use thiserror::Error;

/// Errors returned by the clustering entry points in this crate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// No points were supplied where at least one is required.
    #[error("empty input")]
    EmptyInput,

    /// The centre count is zero or exceeds the number of points.
    #[error("invalid centre count: requested {requested}, but dataset has {n_items} items")]
    InvalidCentreCount {
        /// Number of centres supplied.
        requested: usize,
        /// Number of points being clustered.
        n_items: usize,
    },

    /// k-means++ was asked for zero centres or more centres than points.
    #[error("invalid k: requested {k}, but dataset has {n_items} items")]
    InvalidK {
        /// Requested number of centres.
        k: usize,
        /// Number of points available for sampling.
        n_items: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
