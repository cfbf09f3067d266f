use ndarray::{Array2, ArrayView2, Axis};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use rayon::prelude::*;

use crate::distance::squared_euclidean_distance;

/// How the starting centroids are picked from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Initialization {
    /// K distinct data points chosen uniformly without replacement.
    #[default]
    Random,
    /// k-means++ seeding, weighting candidates by squared distance.
    KMeansPlusPlus,
}

impl Initialization {
    /// Picks `k` rows of `data` as starting centroids. Requires `1 <= k <= data.nrows()`.
    pub fn centroids<R: Rng>(&self, data: ArrayView2<f64>, k: usize, rng: &mut R) -> Array2<f64> {
        let indices = match self {
            Initialization::Random => random_selection(data.nrows(), k, rng),
            Initialization::KMeansPlusPlus => kmeans_plusplus(data, k, rng),
        };
        data.select(Axis(0), &indices)
    }
}

pub fn random_selection<R: Rng>(n: usize, k: usize, rng: &mut R) -> Vec<usize> {
    rand::seq::index::sample(rng, n, k).into_vec()
}

pub fn kmeans_plusplus<R: Rng>(data: ArrayView2<f64>, k: usize, rng: &mut R) -> Vec<usize> {
    let n = data.nrows();
    let mut chosen = Vec::with_capacity(k);

    // Randomly select the first centroid
    chosen.push(rng.gen_range(0..n));

    let mut min_distances = vec![f64::MAX; n];

    for _ in 1..k {
        let last = data.row(chosen[chosen.len() - 1]);
        min_distances
            .par_iter_mut()
            .enumerate()
            .for_each(|(idx, min_dist)| {
                let distance = squared_euclidean_distance(data.row(idx), last);
                *min_dist = min_dist.min(distance);
            });

        let next = match WeightedIndex::new(&min_distances) {
            Ok(dist) => dist.sample(rng),
            // every remaining point duplicates a chosen one
            Err(_) => (0..n).find(|idx| !chosen.contains(idx)).unwrap_or(0),
        };
        chosen.push(next);
    }

    chosen
}
