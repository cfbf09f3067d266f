use ndarray::{Array1, ArrayView1};

/// Defines how parameters move given a gradient.
pub trait Updater {
    /// Produces the next parameters from the current ones.
    ///
    /// # Arguments
    /// * `params` - The current parameters, consumed.
    /// * `gradient` - Gradient of the objective at `params`.
    /// * `learning_rate` - Step size.
    fn update(&mut self, params: Array1<f64>, gradient: ArrayView1<f64>, learning_rate: f64) -> Array1<f64>;
}

/// Plain descent: `params - learning_rate * gradient`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseUpdater;

impl Updater for BaseUpdater {
    fn update(&mut self, mut params: Array1<f64>, gradient: ArrayView1<f64>, learning_rate: f64) -> Array1<f64> {
        params.scaled_add(-learning_rate, &gradient);
        params
    }
}

/// Descent with a velocity term: `v = momentum * v + gradient`, `params -= learning_rate * v`.
#[derive(Debug, Clone)]
pub struct MomentumUpdater {
    momentum: f64,
    velocity: Option<Array1<f64>>,
}

impl MomentumUpdater {
    pub fn new(momentum: f64) -> Self {
        Self {
            momentum,
            velocity: None,
        }
    }
}

impl Updater for MomentumUpdater {
    fn update(&mut self, mut params: Array1<f64>, gradient: ArrayView1<f64>, learning_rate: f64) -> Array1<f64> {
        let mu = self.momentum;
        let velocity = self
            .velocity
            .get_or_insert_with(|| Array1::zeros(gradient.len()));

        velocity.zip_mut_with(&gradient, |v, &g| *v = mu * *v + g);
        params.scaled_add(-learning_rate, &*velocity);
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn base_step() {
        let params = array![5.0, 3.0];
        let grad = array![1.0, -1.0];
        let params = BaseUpdater.update(params, grad.view(), 0.1);

        assert!((params[0] - 4.9).abs() < 1e-10);
        assert!((params[1] - 3.1).abs() < 1e-10);
    }

    #[test]
    fn momentum_accumulates_velocity() {
        let mut updater = MomentumUpdater::new(0.5);
        let grad = array![1.0];

        let params = updater.update(array![0.0], grad.view(), 1.0);
        assert_eq!(params, array![-1.0]);

        // v = 0.5 * 1 + 1
        let params = updater.update(params, grad.view(), 1.0);
        assert_eq!(params, array![-2.5]);
    }

    #[test]
    fn zero_momentum_matches_base() {
        let mut momentum = MomentumUpdater::new(0.0);
        let grad = array![0.25, -4.0];

        assert_eq!(
            momentum.update(array![1.0, 1.0], grad.view(), 0.5),
            BaseUpdater.update(array![1.0, 1.0], grad.view(), 0.5)
        );
    }
}
