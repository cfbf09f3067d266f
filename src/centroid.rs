use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Running sums used to recompute one centroid after an assignment pass.
#[derive(Debug, Clone, PartialEq)]
pub struct CentroidAccumulator {
    sum: Array1<f64>,
    count: usize,
}

impl CentroidAccumulator {
    pub fn new(dim: usize) -> Self {
        Self {
            sum: Array1::zeros(dim),
            count: 0,
        }
    }

    pub fn update_centroid(&mut self, data_point: ArrayView1<f64>) {
        self.sum += &data_point;
        self.count += 1;
    }

    /// Mean of the accumulated points, `None` when nothing was accumulated.
    pub fn finalize_centroid(&self) -> Option<Array1<f64>> {
        if self.count == 0 {
            return None;
        }
        Some(&self.sum / self.count as f64)
    }
}

/// Recomputes every centroid as the mean of the rows labelled with its index.
///
/// Points are summed in row order so results do not depend on scheduling.
/// A centroid that received no points keeps its previous value.
pub fn recompute_centroids(
    data: ArrayView2<f64>,
    labels: &[usize],
    previous: ArrayView2<f64>,
) -> Array2<f64> {
    let (k, dim) = previous.dim();
    let mut accumulators = vec![CentroidAccumulator::new(dim); k];

    for (point, &label) in data.outer_iter().zip(labels) {
        accumulators[label].update_centroid(point);
    }

    let mut centroids = previous.to_owned();
    for (mut centroid, accumulator) in centroids.outer_iter_mut().zip(&accumulators) {
        if let Some(mean) = accumulator.finalize_centroid() {
            centroid.assign(&mean);
        }
    }

    centroids
}
