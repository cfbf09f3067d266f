use ndarray::{Array1, ArrayView1};
use rayon::prelude::*;

/// A differentiable objective over a flat parameter vector.
///
/// Callers guarantee that parameters passed in have `input_size()` values and
/// implementations return gradients of that same length.
pub trait Function {
    fn input_size(&self) -> usize;

    /// Per-sample loss values at `params`.
    fn loss(&self, params: ArrayView1<f64>) -> Array1<f64>;

    fn gradient(&self, params: ArrayView1<f64>) -> Array1<f64>;
}

/// Aggregate of per-sample functions evaluated together.
///
/// The loss is the concatenation of every part's loss vector and the gradient
/// is the sum of every part's gradient.
#[derive(Debug, Clone)]
pub struct Batch<F> {
    input_size: usize,
    parts: Vec<F>,
}

impl<F: Function> Batch<F> {
    pub fn new(input_size: usize, parts: Vec<F>) -> Self {
        debug_assert!(parts.iter().all(|f| f.input_size() == input_size));
        Self { input_size, parts }
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl<F: Function + Sync> Function for Batch<F> {
    fn input_size(&self) -> usize {
        self.input_size
    }

    fn loss(&self, params: ArrayView1<f64>) -> Array1<f64> {
        self.parts
            .iter()
            .flat_map(|part| part.loss(params).to_vec())
            .collect()
    }

    fn gradient(&self, params: ArrayView1<f64>) -> Array1<f64> {
        let gradients: Vec<Array1<f64>> = self
            .parts
            .par_iter()
            .map(|part| part.gradient(params))
            .collect();

        // summed in sample order, independent of how rayon split the work
        gradients
            .iter()
            .fold(Array1::zeros(self.input_size), |acc, g| acc + g)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ndarray::array;

    /// (w - target)^2 summed over coordinates, one sample.
    #[derive(Debug, Clone)]
    pub(crate) struct Quadratic {
        pub target: Array1<f64>,
    }

    impl Function for Quadratic {
        fn input_size(&self) -> usize {
            self.target.len()
        }

        fn loss(&self, params: ArrayView1<f64>) -> Array1<f64> {
            let diff = &params - &self.target;
            array![diff.mapv(|d| d * d).sum()]
        }

        fn gradient(&self, params: ArrayView1<f64>) -> Array1<f64> {
            (&params - &self.target) * 2.0
        }
    }

    #[test]
    fn batch_sums_gradients_and_concatenates_losses() {
        let batch = Batch::new(
            2,
            vec![
                Quadratic { target: array![1., 0.] },
                Quadratic { target: array![0., 3.] },
            ],
        );
        let params = array![0., 0.];

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.gradient(params.view()), array![-2., -6.]);
        assert_eq!(batch.loss(params.view()), array![1., 9.]);
    }

    #[test]
    fn empty_batch_has_zero_gradient() {
        let batch: Batch<Quadratic> = Batch::new(3, vec![]);

        assert!(batch.is_empty());
        assert_eq!(batch.gradient(array![1., 2., 3.].view()), Array1::<f64>::zeros(3));
    }
}
