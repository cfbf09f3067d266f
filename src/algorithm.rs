use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;

use crate::centroid::recompute_centroids;
use crate::distance::nearest_centroid;
use crate::inertia::calculate_inertia;

/// Final state of a single Lloyd run.
#[derive(Debug, Clone)]
pub struct LloydOutcome {
    pub centroids: Array2<f64>,
    pub labels: Vec<usize>,
    pub inertia: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Labels every row of `data` with its nearest centroid, lowest index on ties.
pub fn assign_labels(data: ArrayView2<f64>, centroids: ArrayView2<f64>) -> Vec<usize> {
    (0..data.nrows())
        .into_par_iter()
        .map(|idx| nearest_centroid(data.row(idx), centroids).0)
        .collect()
}

/// Alternates nearest-centroid assignment and centroid recomputation.
///
/// Stops once an assignment pass leaves every label unchanged, or after
/// `max_iters` passes. Hitting the cap is not an error.
pub fn lloyd(data: ArrayView2<f64>, initial_centroids: Array2<f64>, max_iters: usize) -> LloydOutcome {
    let mut centroids = initial_centroids;
    let mut labels: Option<Vec<usize>> = None;
    let mut iterations = 0;
    let mut converged = false;

    for iter in 0..max_iters {
        if iter > 0 && iter % 10 == 0 {
            log::info!("Finished iteration {}", iter);
        }
        iterations = iter + 1;

        let new_labels = assign_labels(data, centroids.view());
        if labels.as_ref() == Some(&new_labels) {
            converged = true;
            log::info!("Converged after {} iterations", iterations);
            break;
        }

        centroids = recompute_centroids(data, &new_labels, centroids.view());
        labels = Some(new_labels);
    }

    // a zero iteration budget still needs a valid assignment
    let labels = labels.unwrap_or_else(|| assign_labels(data, centroids.view()));
    if !converged {
        log::info!("Stopped at the iteration cap ({}) before converging", max_iters);
    }

    let inertia = calculate_inertia(data, centroids.view(), &labels);

    LloydOutcome {
        centroids,
        labels,
        inertia,
        iterations,
        converged,
    }
}
