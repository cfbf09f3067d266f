//! K-means clustering and gradient descent over generic data sources.
//!
//! Data enters through the [`DataSet`] and [`DataPoint`] traits (plus
//! [`SupervisedDataPoint`] for labelled samples). [`Model`] clusters any dataset,
//! the [`graddesc`] module optimizes any [`graddesc::Function`] supplied by an
//! [`graddesc::EpochProvider`], and [`Perceptron`] is built on top of the latter.
//!
//! ```rust
//! use kmeans_perceptron_graddesc::{KMeansConfig, Model};
//! use ndarray::array;
//!
//! let points = vec![array![0., 0.], array![0., 1.], array![10., 0.], array![10., 1.]];
//! let clusters = Model::with_config(KMeansConfig::new(2).with_n_init(10))
//!     .clustering(&points)
//!     .unwrap();
//!
//! assert_eq!(clusters.iter().map(|c| c.len()).sum::<usize>(), 4);
//! ```

mod algorithm;
mod centroid;
mod config;
mod data;
mod distance;
mod error;
pub mod graddesc;
mod image;
mod inertia;
mod initialization;
mod kmeans;
pub mod logger;
mod perceptron;

pub use config::{KMeansConfig, PerceptronConfig, TrainingMode};
pub use data::{feature_matrix, target_matrix, DataPoint, DataSet, Row, SupervisedDataPoint};
pub use distance::{euclidean_distance, squared_euclidean_distance};
pub use error::{MlError, Result};
pub use image::{Image, Pixel};
pub use initialization::Initialization;
pub use kmeans::{Cluster, Clustering, Model};
pub use perceptron::{Perceptron, PerceptronStep};
