use ndarray::{Array1, Array2, ArrayView1};

use crate::algorithm::{lloyd, LloydOutcome};
use crate::config::{rng_from_seed, KMeansConfig};
use crate::data::{feature_matrix, DataSet};
use crate::distance::nearest_centroid;
use crate::error::{MlError, Result};

/// A group of data points and the mean of their feature vectors.
#[derive(Debug, Clone)]
pub struct Cluster<P> {
    center: Array1<f64>,
    members: Vec<P>,
}

impl<P> Cluster<P> {
    pub fn center(&self) -> &Array1<f64> {
        &self.center
    }

    pub fn members(&self) -> &[P] {
        &self.members
    }

    pub fn into_members(self) -> Vec<P> {
        self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Result of fitting a [`Model`]: the clusters of the best restart and how it ended.
#[derive(Debug, Clone)]
pub struct Clustering<P> {
    pub clusters: Vec<Cluster<P>>,
    pub inertia: f64,
    pub iterations: usize,
    pub converged: bool,
}

impl<P> Clustering<P> {
    /// Index of the cluster whose centroid is nearest to `features`.
    pub fn predict(&self, features: ArrayView1<f64>) -> Result<usize> {
        let dim = self.clusters.first().map(|c| c.center.len()).unwrap_or(0);
        if features.len() != dim {
            return Err(MlError::DimensionMismatch {
                what: "feature vector",
                expected: dim,
                got: features.len(),
            });
        }

        let mut centroids = Array2::zeros((self.clusters.len(), dim));
        for (mut row, cluster) in centroids.outer_iter_mut().zip(&self.clusters) {
            row.assign(&cluster.center);
        }
        Ok(nearest_centroid(features, centroids.view()).0)
    }
}

/// K-means clustering over any [`DataSet`].
///
/// The model holds configuration only; every call to [`Model::fit`] starts from scratch.
#[derive(Debug, Clone, Default)]
pub struct Model {
    config: KMeansConfig,
}

impl Model {
    pub fn new(cluster_count: usize) -> Self {
        Self::with_config(KMeansConfig::new(cluster_count))
    }

    pub fn with_config(config: KMeansConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    /// Partitions the dataset into `k` clusters.
    ///
    /// # Errors
    /// Fails before iterating when the dataset is empty, its feature vectors
    /// have different widths, or `k` is zero or larger than the number of points.
    pub fn clustering<D: DataSet>(&self, dataset: &D) -> Result<Vec<Cluster<D::Point>>> {
        self.fit(dataset).map(|clustering| clustering.clusters)
    }

    pub fn fit<D: DataSet>(&self, dataset: &D) -> Result<Clustering<D::Point>> {
        self.config.validate()?;

        let points = dataset.data_points();
        if points.is_empty() {
            return Err(MlError::EmptyDataset);
        }
        let k = self.config.k;
        if k > points.len() {
            return Err(MlError::TooManyClusters {
                k,
                points: points.len(),
            });
        }

        let data = feature_matrix(&points)?;
        log::info!(
            "Starting KMeans: k={}, {} points, {} features, {:?} initialization",
            k,
            data.nrows(),
            data.ncols(),
            self.config.init
        );

        let mut rng = rng_from_seed(self.config.seed);
        let mut best: Option<(usize, LloydOutcome)> = None;

        for initialization_index in 0..self.config.n_init {
            let initial = self.config.init.centroids(data.view(), k, &mut rng);
            let outcome = lloyd(data.view(), initial, self.config.max_iters);
            log::info!(
                "Finished KMeans for initialization #{} - Inertia: {}",
                initialization_index,
                outcome.inertia
            );

            let better = match &best {
                Some((_, current)) => outcome.inertia < current.inertia,
                None => true,
            };
            if better {
                best = Some((initialization_index, outcome));
            }
        }

        let (best_index, outcome) = best.ok_or_else(|| {
            MlError::InvalidConfig("n_init must be at least 1".to_string())
        })?;
        if self.config.n_init > 1 {
            log::info!(
                "Best initialization is index #{} with {} inertia",
                best_index,
                outcome.inertia
            );
        }

        Ok(into_clustering(points, outcome))
    }
}

fn into_clustering<P>(points: Vec<P>, outcome: LloydOutcome) -> Clustering<P> {
    let LloydOutcome {
        centroids,
        labels,
        inertia,
        iterations,
        converged,
    } = outcome;

    let mut clusters: Vec<Cluster<P>> = centroids
        .outer_iter()
        .map(|center| Cluster {
            center: center.to_owned(),
            members: Vec::new(),
        })
        .collect();

    for (point, label) in points.into_iter().zip(labels) {
        clusters[label].members.push(point);
    }

    Clustering {
        clusters,
        inertia,
        iterations,
        converged,
    }
}
