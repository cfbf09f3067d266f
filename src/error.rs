use thiserror::Error;

pub type Result<T> = std::result::Result<T, MlError>;

/// Recoverable failures surfaced to the caller of a clustering or training run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MlError {
    /// The dataset has no data points
    #[error("dataset contains no data points")]
    EmptyDataset,

    /// K must be at least one
    #[error("invalid cluster count: {0}")]
    InvalidClusterCount(usize),

    /// Not enough distinct data points to pick K initial centroids
    #[error("number of clusters ({k}) cannot be greater than the number of data points ({points})")]
    TooManyClusters { k: usize, points: usize },

    /// A vector does not have the width the model or dataset expects
    #[error("{what}: expected {expected} values but got {got}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// Prediction was requested before training
    #[error("model has not been trained, call train() first")]
    NotTrained,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
