use itertools::Itertools;
use ndarray::{ArrayView1, ArrayView2};
use num_traits::Float;

pub fn squared_euclidean_distance<F: Float>(us: ArrayView1<F>, them: ArrayView1<F>) -> F {
    us.iter()
        .zip(them.iter())
        .fold(F::zero(), |acc, (&a, &b)| {
            let diff = a - b;
            acc + diff * diff
        })
}

pub fn euclidean_distance<F: Float>(us: ArrayView1<F>, them: ArrayView1<F>) -> F {
    squared_euclidean_distance(us, them).sqrt()
}

/// Index of the centroid row closest to `point`, together with its squared distance.
///
/// Ties go to the lowest centroid index.
pub fn nearest_centroid<F: Float>(point: ArrayView1<F>, centroids: ArrayView2<F>) -> (usize, F) {
    let distances = centroids
        .outer_iter()
        .map(|centroid| squared_euclidean_distance(point, centroid))
        .collect_vec();

    let idx = distances
        .iter()
        .position_min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or(0);

    (idx, distances.get(idx).copied().unwrap_or_else(F::infinity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn squared_distance() {
        let a = array![0.0f64, 0.0];
        let b = array![3.0f64, 4.0];
        assert_eq!(squared_euclidean_distance(a.view(), b.view()), 25.0);
        assert_eq!(euclidean_distance(a.view(), b.view()), 5.0);
    }

    #[test]
    fn nearest_centroid_breaks_ties_by_lowest_index() {
        let centroids = array![[1.0f64, 0.0], [-1.0, 0.0], [0.0, 5.0]];
        let point = array![0.0f64, 0.0];

        assert_eq!(nearest_centroid(point.view(), centroids.view()), (0, 1.0));
    }

    #[test]
    fn nearest_centroid_f32() {
        let centroids = array![[0.0f32, 0.0], [10.0, 10.0]];
        let point = array![9.0f32, 9.5];

        assert_eq!(nearest_centroid(point.view(), centroids.view()).0, 1);
    }
}
