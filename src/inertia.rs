use ndarray::ArrayView2;

use crate::distance::squared_euclidean_distance;

/// Sum of squared distances between each point and the centroid it is labelled with.
pub fn calculate_inertia(data: ArrayView2<f64>, centroids: ArrayView2<f64>, labels: &[usize]) -> f64 {
    data.outer_iter()
        .zip(labels)
        .map(|(point, &label)| squared_euclidean_distance(point, centroids.row(label)))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn inertia_of_two_pairs() {
        let data = array![[0., 0.], [0., 1.], [10., 0.], [10., 1.]];
        let centroids = array![[0., 0.5], [10., 0.5]];

        assert_eq!(calculate_inertia(data.view(), centroids.view(), &[0, 0, 1, 1]), 1.0);
    }
}
